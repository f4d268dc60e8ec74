//! `adminconsole-core`: shared building blocks for the admin console.
//!
//! This crate contains **pure** primitives (no IO): the error model,
//! backend-assigned identifiers and the scalar values records expose.

pub mod error;
pub mod id;
pub mod value;

pub use error::{DomainError, DomainResult, FieldError, ValidationErrors};
pub use id::{SessionId, UserId};
pub use value::FieldValue;
