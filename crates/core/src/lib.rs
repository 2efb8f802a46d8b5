//! Courier domain core.
//!
//! Pure domain logic with no I/O: shared types, the error taxonomy,
//! input validation, and the child-collection reconciliation planner used
//! when a template's attribute set is replaced.

pub mod error;
pub mod reconcile;
pub mod template;
pub mod types;
pub mod validation;
