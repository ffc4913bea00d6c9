//! Shared helpers with no page or store dependencies.

pub mod debounce;
pub mod item_meta;
pub mod notify;
