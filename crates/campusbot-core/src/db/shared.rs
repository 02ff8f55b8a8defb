//! Database handle shared between request handlers

use super::Database;
use crate::error::{CampusBotError, Result};
use std::sync::{Arc, Mutex};

/// Cloneable handle around one SQLite connection.
///
/// The lock is taken per call and released before returning, so no guard is
/// ever held across an `.await`.
#[derive(Clone)]
pub struct SharedDatabase {
    inner: Arc<Mutex<Database>>,
}

impl SharedDatabase {
    pub fn new(db: Database) -> Self {
        Self {
            inner: Arc::new(Mutex::new(db)),
        }
    }

    /// Run `f` with exclusive access to the database
    pub fn with<T>(&self, f: impl FnOnce(&Database) -> Result<T>) -> Result<T> {
        let db = self.inner.lock().map_err(|_| CampusBotError::LockPoisoned)?;
        f(&db)
    }
}

impl From<Database> for SharedDatabase {
    fn from(db: Database) -> Self {
        Self::new(db)
    }
}
