//! v1 API Data Transfer Objects.
//!
//! These types define the wire format for the v1 REST API. They are
//! separate from the internal domain models in `src/models/` and handle
//! serialization, deserialization, and domain-model conversion.

pub mod estimate;
pub mod meals;
pub mod recipes;
pub mod settings;

// Re-export all public types for convenient access via `dto::*`.
pub use estimate::*;
pub use meals::*;
pub use recipes::*;
pub use settings::*;
