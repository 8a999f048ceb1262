use thiserror::Error;

use crate::db::{DbConnection, DbPool};
use crate::domain::price::{Price, PriceSearchCriteria};

pub mod price;

#[cfg(test)]
pub mod mock;

/// Result type returned by all repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// A stored value could not be converted back into the domain model.
    #[error("malformed stored record: {0}")]
    Malformed(String),
}

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over priced rate records.
///
/// `list_prices_at` is the candidate fetcher: it returns exactly the records
/// valid at the criteria's instant, in no guaranteed order.
pub trait PriceReader {
    fn list_prices_at(&self, criteria: &PriceSearchCriteria) -> RepositoryResult<Vec<Price>>;
    fn get_price_by_list_id(&self, price_list: i64) -> RepositoryResult<Option<Price>>;
}

/// Write operations over priced rate records.
pub trait PriceWriter {
    fn create_prices(&self, prices: &[Price]) -> RepositoryResult<usize>;
    fn delete_price(&self, price_list: i64) -> RepositoryResult<()>;
}
