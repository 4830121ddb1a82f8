//! Shared types for the product console
//!
//! Wire types exchanged with the product REST API: the product record,
//! the create/update payload, search filters and the error body.

pub mod error;
pub mod models;
pub mod query;

// Re-exports
pub use error::ApiErrorBody;
pub use models::{Product, ProductPayload};
pub use query::{PriceBand, ProductQuery};
pub use serde::{Deserialize, Serialize};
