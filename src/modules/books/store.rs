use async_trait::async_trait;
use sqlx::{postgres::PgPool, query::Query, Database, Encode, FromRow, Type};
use thiserror::Error;

use super::models::Book;
use super::query::{BookQuery, QueryArg};

/// Failures while reading books from the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book query failed")]
    Query(#[source] sqlx::Error),

    #[error("book row decode failed")]
    Decode(#[source] sqlx::Error),
}

/// Read access to the books relation
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Run exactly one read and return the rows in store order
    async fn fetch_books(&self, query: &BookQuery) -> Result<Vec<Book>, StoreError>;
}

/// [`BookStore`] over a shared PostgreSQL pool
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn fetch_books(&self, query: &BookQuery) -> Result<Vec<Book>, StoreError> {
        let rows = bind_args(sqlx::query(query.sql()), query.args())
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Query)?;

        rows.iter()
            .map(|row| Book::from_row(row).map_err(StoreError::Decode))
            .collect()
    }
}

/// Bind `args` positionally, in the order their placeholders were numbered.
pub(crate) fn bind_args<'q, DB>(
    mut query: Query<'q, DB, <DB as Database>::Arguments<'q>>,
    args: &'q [QueryArg],
) -> Query<'q, DB, <DB as Database>::Arguments<'q>>
where
    DB: Database,
    &'q str: Encode<'q, DB> + Type<DB>,
    i64: Encode<'q, DB> + Type<DB>,
{
    for arg in args {
        query = match arg {
            QueryArg::Text(value) => query.bind(value.as_str()),
            QueryArg::Int(value) => query.bind(*value),
        };
    }
    query
}
