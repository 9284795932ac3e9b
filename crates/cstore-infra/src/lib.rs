//! Infrastructure layer for cstore.
//!
//! Implements the ports defined in `cstore-core` against real resources:
//! the CSV catalog file, an OpenAI-compatible completion endpoint, and the
//! TOML configuration file.

pub mod catalog;
pub mod config;
pub mod llm;
