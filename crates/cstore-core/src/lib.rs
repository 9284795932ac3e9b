//! Business logic and port definitions for cstore.
//!
//! This crate defines the "ports" (`CatalogSource`, `CompletionClient`)
//! that the infrastructure layer implements, plus the logic that sits on
//! top of them: the catalog cache, context selection, prompt assembly,
//! the chat controller, and the dashboard view. It depends only on
//! `cstore-types` -- never on `cstore-infra` or any file/HTTP crate.

pub mod catalog;
pub mod chat;
pub mod context;
pub mod dashboard;
pub mod llm;
