//! Flutter-facing bindings for the Kwani navigator.

pub mod api;
