//! Core types for the URL shortener.
//!
//! This crate holds the pieces shared by the storage layer and the HTTP
//! gateway: the [`UrlMapping`] entity with its input validation, URL syntax
//! checks, and the error taxonomy every layer reports through.

pub mod error;
pub mod mapping;
pub mod url;

pub use error::{InvalidInput, RepositoryError, Result, StorageError};
pub use mapping::UrlMapping;
