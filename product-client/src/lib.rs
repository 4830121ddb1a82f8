//! Product Client - form-bound client for the product REST API
//!
//! One user action maps to one HTTP call. The outcome is written back into
//! a [`ConsoleState`] (form fields, flash message, results table) that a
//! front end renders.

pub mod config;
pub mod console;
pub mod error;
pub mod form;
pub mod http;
pub mod table;

pub use config::ClientConfig;
pub use console::{Action, Completion, ConsoleState};
pub use error::{ClientError, ClientResult};
pub use form::{FormField, ProductForm};
pub use http::{HealthStatus, NetworkHttpClient, ProductApi};
pub use table::ResultTable;

// Re-export shared types for convenience
pub use shared::{ApiErrorBody, PriceBand, Product, ProductPayload, ProductQuery};
