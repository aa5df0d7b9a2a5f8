use ::redb::{
    CommitError, Database, DatabaseError, ReadableTable, TableDefinition, TableError,
    TableHandle, TransactionError, WriteTransaction,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, trace};
use urlshortener_core::{RepositoryError, Result, StorageError, UrlMapping};

/// Name of the table holding the short URL to long URL records.
pub const URLS_BUCKET: &str = "urls";

/// Largest short URL, in bytes, the repository will store.
///
/// redb itself accepts much larger keys; the limit keeps keys in line with
/// what page-based stores with inline keys allow.
pub const MAX_KEY_SIZE: usize = 32768;

const URLS_TABLE: TableDefinition<&str, &str> = TableDefinition::new(URLS_BUCKET);

/// redb implementation of the mapping repository.
///
/// The repository shares the database handle it was given and never closes
/// it. Each operation maps to exactly one transaction; concurrency control is
/// left to redb, which serializes writers and gives readers a snapshot.
#[derive(Clone)]
pub struct RedbRepository {
    db: Arc<Database>,
}

impl RedbRepository {
    /// Creates a repository on top of an already opened database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Creates or opens the database file at `path`.
    ///
    /// The `urls` table is not created here, see [`RedbRepository::initialize`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(map_database_error)?;
        info!(path = %path.display(), "opened url store");
        Ok(Self::new(Arc::new(db)))
    }

    /// Returns a reference to the underlying database.
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Ensures the `urls` table exists, creating it when missing.
    ///
    /// Calling this on an initialized store is a no-op that keeps every record.
    pub fn initialize(&self) -> Result<()> {
        let txn = self.db.begin_write().map_err(map_transaction_error)?;
        txn.open_table(URLS_TABLE).map_err(map_table_error)?;
        txn.commit().map_err(map_commit_error)?;

        debug!(bucket = URLS_BUCKET, "url store initialized");
        Ok(())
    }

    /// Looks up the long URL stored for `short_url`.
    ///
    /// A missing key and a key mapped to an empty value both report
    /// [`RepositoryError::NotFound`].
    pub fn read_url(&self, short_url: &str) -> Result<String> {
        let txn = self.db.begin_read().map_err(map_transaction_error)?;

        let table = match txn.open_table(URLS_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                return Err(RepositoryError::PreconditionFailed(URLS_BUCKET.to_string()))
            }
            Err(err) => return Err(map_table_error(err).into()),
        };

        let long_url = table
            .get(short_url)
            .map_err(map_storage_error)?
            .map(|guard| guard.value().to_owned())
            .unwrap_or_default();

        if long_url.is_empty() {
            trace!(short_url, "short url not found");
            return Err(RepositoryError::NotFound);
        }

        trace!(short_url, long_url = %long_url, "resolved short url");
        Ok(long_url)
    }

    /// Validates and stores a new mapping.
    ///
    /// The bucket check, the uniqueness check and the insert share one write
    /// transaction. Any error drops the transaction uncommitted, so a failed
    /// call leaves the store untouched.
    pub fn add_url(&self, short_url: &str, long_url: &str) -> Result<()> {
        let mapping = UrlMapping::new(short_url, long_url)?;

        let txn = self.db.begin_write().map_err(map_transaction_error)?;
        if !bucket_exists(&txn)? {
            return Err(RepositoryError::PreconditionFailed(URLS_BUCKET.to_string()));
        }

        {
            let mut table = txn.open_table(URLS_TABLE).map_err(map_table_error)?;

            if table
                .get(mapping.short_url())
                .map_err(map_storage_error)?
                .is_some()
            {
                return Err(RepositoryError::Conflict(mapping.short_url().to_string()));
            }

            let size = mapping.short_url().len();
            if size > MAX_KEY_SIZE {
                return Err(StorageError::KeyTooLarge {
                    size,
                    max: MAX_KEY_SIZE,
                }
                .into());
            }

            table
                .insert(mapping.short_url(), mapping.long_url())
                .map_err(map_storage_error)?;
        }

        txn.commit().map_err(map_commit_error)?;

        info!(
            short_url = mapping.short_url(),
            long_url = mapping.long_url(),
            "added short url"
        );
        Ok(())
    }
}

fn bucket_exists(txn: &WriteTransaction) -> Result<bool> {
    let exists = txn
        .list_tables()
        .map_err(map_storage_error)?
        .any(|table| table.name() == URLS_BUCKET);

    Ok(exists)
}

fn map_database_error(err: DatabaseError) -> StorageError {
    match err {
        DatabaseError::Storage(err) => map_storage_error(err),
        other => StorageError::Unavailable(other.to_string()),
    }
}

fn map_transaction_error(err: TransactionError) -> StorageError {
    match err {
        TransactionError::Storage(err) => map_storage_error(err),
        other => StorageError::Transaction(other.to_string()),
    }
}

fn map_table_error(err: TableError) -> StorageError {
    match err {
        TableError::Storage(err) => map_storage_error(err),
        other => StorageError::Table(other.to_string()),
    }
}

fn map_commit_error(err: CommitError) -> StorageError {
    match err {
        CommitError::Storage(err) => map_storage_error(err),
        other => StorageError::Commit(other.to_string()),
    }
}

fn map_storage_error(err: ::redb::StorageError) -> StorageError {
    let message = err.to_string();

    match err {
        ::redb::StorageError::Io(_) => StorageError::Unavailable(message),
        _ => StorageError::Operation(message),
    }
}
