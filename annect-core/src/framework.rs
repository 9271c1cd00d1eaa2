//! Database access wrappers used by the query objects in [`crate::entities`].
//!
//! Read queries are modeled as small message structs handled through
//! `kanau::processor::Processor` impls on [`DatabaseProcessor`]. Writes are
//! `async fn` methods on the entity types; each is a single conditional
//! statement, so atomicity comes from the statement itself rather than an
//! explicit transaction.

use sqlx::PgPool;

/// Pool-backed executor for single-statement queries.
pub struct DatabaseProcessor {
    pub pool: PgPool,
}

impl DatabaseProcessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
