//! # ct-core
//!
//! Core types, traits, and utilities for the contacts API.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types and the field-level validation error collection
//! - Result type alias
//! - The `Id` alias and the `UserContext` trait
//! - Paging types
//! - Configuration types

pub mod error;
pub mod result;
pub mod traits;
pub mod pagination;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use pagination::*;
