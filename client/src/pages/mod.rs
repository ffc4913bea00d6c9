//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its route-scoped orchestration and returns the next
//! [`Route`](crate::router::Route) from navigation actions instead of
//! navigating itself. The router decides what gets built.

pub mod dashboard;
pub mod list;
pub mod login;
