//! Pass-through records read from the remote tables.
//!
//! # Responsibility
//! - Define the typed shapes decoded from each remote collection.
//! - Provide the display label each record contributes to a list view.
//!
//! # Invariants
//! - Records are never mutated or persisted locally.
//! - Foreign keys are plain string ids owned by the backend.

pub mod records;
