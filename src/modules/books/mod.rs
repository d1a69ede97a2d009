pub mod models;
pub mod query;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};

use store::BookStore;

/// Books module: read-only catalogue listing over an injected [`BookStore`]
pub struct BooksModule {
    store: Arc<dyn BookStore>,
}

impl BooksModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.store))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "genre",
                                "in": "query",
                                "required": false,
                                "description": "Exact, case-sensitive genre match; empty means no filter",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "sort",
                                "in": "query",
                                "required": false,
                                "description": "price_asc or price_desc; other values leave order to the store",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "limit",
                                "in": "query",
                                "required": false,
                                "description": "Maximum number of rows; ignored unless a non-negative integer",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "offset",
                                "in": "query",
                                "required": false,
                                "description": "Rows to skip; ignored unless a non-negative integer",
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Matching books, [] when none match",
                                "headers": {
                                    "X-Query-Time": {
                                        "description": "Time spent running the query, e.g. 1.2ms",
                                        "schema": { "type": "string" }
                                    }
                                },
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Book"
                                            }
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "text/plain": {
                                        "schema": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "description": "Unique identifier for the book"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book"
                            },
                            "author": {
                                "type": "string",
                                "description": "Author of the book"
                            },
                            "genre": {
                                "type": "string",
                                "description": "Genre of the book"
                            },
                            "price": {
                                "type": "integer",
                                "description": "Price in whole currency units"
                            }
                        },
                        "required": ["id", "title", "author", "genre", "price"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<dyn BookStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
