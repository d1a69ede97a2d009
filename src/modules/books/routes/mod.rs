//! `GET /books` handler.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{OriginalUri, Query, State},
    http::{HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bookshelf_http::error::AppError;

use super::models::{BookParams, ListOptions};
use super::query::BookQuery;
use super::store::BookStore;

/// Wall-clock time spent building, running and draining the query.
pub const QUERY_TIME_HEADER: &str = "x-query-time";

/// Routes served by the books module, bound to `store`.
pub fn router(store: Arc<dyn BookStore>) -> Router {
    Router::new()
        .route("/books", get(list_books))
        .with_state(store)
}

/// List books, optionally filtered by genre, ordered by price and paginated.
async fn list_books(
    State(store): State<Arc<dyn BookStore>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let started = Instant::now();
    let request_uri = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());

    let options = ListOptions::from(BookParams::from_pairs(pairs));
    let query = BookQuery::from(&options);

    let books = store
        .fetch_books(&query)
        .await
        .with_context(|| format!("{} {}", method, request_uri))?;

    let elapsed = started.elapsed();

    tracing::info!(
        target: "bookshelf::access",
        method = %method,
        uri = %request_uri,
        rows = books.len(),
        elapsed = ?elapsed,
        "{} {} -> {} rows, took {:?}",
        method,
        request_uri,
        books.len(),
        elapsed
    );

    let query_time = HeaderValue::from_str(&format!("{:?}", elapsed))
        .context("query time is not a valid header value")?;

    // `Json` writes `[]` for an empty result, never `null`.
    Ok(([(QUERY_TIME_HEADER, query_time)], Json(books)).into_response())
}
