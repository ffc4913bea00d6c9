//! Client-side state: the cookie session and the item-list store.

pub mod auth;
pub mod cookies;
pub mod list;
