pub mod books;

use std::sync::Arc;

use bookshelf_kernel::ModuleRegistry;
use sqlx::PgPool;

use books::store::PgBookStore;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, pool: PgPool) {
    registry.register(books::create_module(Arc::new(PgBookStore::new(pool))));
}
