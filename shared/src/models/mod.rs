//! Data models
//!
//! Every field is carried as display text: the form shows it verbatim and
//! posts it back verbatim. Typing numbers is the backend's job.

pub mod product;

// Re-exports
pub use product::*;
