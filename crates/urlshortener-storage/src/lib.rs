//! Transactional storage for short URL mappings.
//!
//! [`RedbRepository`] keeps every mapping in a single `urls` table of an
//! embedded [redb](https://docs.rs/redb) database. Reads run in snapshot
//! read transactions, writes in serialized write transactions that either
//! commit in full or abort on drop.

pub mod redb;

pub use crate::redb::{RedbRepository, MAX_KEY_SIZE, URLS_BUCKET};
pub use urlshortener_core::{InvalidInput, RepositoryError, Result, StorageError, UrlMapping};
