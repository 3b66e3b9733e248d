//! Key/blob persistence gateway contract.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure raised by a gateway implementation.
///
/// The catalog logs and swallows these; they never reach catalog callers.
#[derive(Debug)]
pub enum GatewayError {
    Db(DbError),
    /// A previous holder of the store lock panicked.
    LockPoisoned,
    /// The background writer is gone, so a write could not be queued.
    WriterUnavailable,
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::LockPoisoned => write!(f, "blob store lock poisoned"),
            Self::WriterUnavailable => write!(f, "background writer unavailable"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::LockPoisoned | Self::WriterUnavailable => None,
        }
    }
}

impl From<DbError> for GatewayError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key/blob store used by the catalog.
///
/// Implementations are shared with the background writer thread, hence the
/// `Send + Sync` bound.
pub trait PersistenceGateway: Send + Sync {
    /// Overwrites the blob stored under `key`.
    fn save(&self, key: &str, blob: &[u8]) -> GatewayResult<()>;
    /// Returns the blob stored under `key`, or `None` when absent.
    fn load(&self, key: &str) -> GatewayResult<Option<Vec<u8>>>;
}
