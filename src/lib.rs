//! toolwire - tool definition catalog
//!
//! Turns declared tool signatures into registered tool definitions with
//! wire-type schemas. Annotated types are resolved to their effective type
//! and description before wire classification.

pub mod error;
pub mod tools;
pub mod types;
pub mod wire;

pub use error::{Result, ToolwireError};
