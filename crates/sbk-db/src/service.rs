//! Service layer hosting every repository method.
//!
//! `SiteService` wraps `SiteDb` (raw database access). All repo methods are
//! implemented as `impl SiteService` blocks under `repos/`.

use crate::SiteDb;
use crate::error::DatabaseError;

pub struct SiteService {
    db: SiteDb,
}

impl SiteService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = SiteDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `SiteDb` (for testing).
    #[must_use]
    pub const fn from_db(db: SiteDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SiteDb {
        &self.db
    }
}
