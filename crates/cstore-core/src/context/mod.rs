//! Context selection and prompt assembly.
//!
//! Given a user query, pick a small subset of the catalog, render it as a
//! fixed-width text table, and embed it in the system instruction sent to
//! the model.

pub mod prompt;
pub mod selector;

pub use prompt::{build_system_instruction, render_context_table};
pub use selector::{ContextSelection, ContextSelector, SelectionStrategy, query_key};
