//! Account rows mirrored from the identity provider.
//!
//! The primary key is the provider's subject id, so a row can be upserted
//! idempotently every time a signed-in caller first touches the system.

use crate::entities::UserRole;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: UserRole,
    pub created_at: time::PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInsert {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: UserRole,
}

impl User {
    /// Insert the account if it does not exist yet.
    ///
    /// Returns `Some(user)` only when the row was freshly created, which is
    /// the signal to fire the welcome email. An existing row is left
    /// untouched and yields `None`.
    pub async fn provision(
        pool: &sqlx::PgPool,
        insert: UserInsert,
    ) -> Result<Option<User>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, image, role)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, name, email, image, role, created_at
            "#,
        )
        .bind(&insert.id)
        .bind(&insert.name)
        .bind(&insert.email)
        .bind(&insert.image)
        .bind(insert.role)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }
}

#[derive(Debug, Clone)]
pub struct GetUserById {
    pub id: String,
}

impl Processor<GetUserById> for DatabaseProcessor {
    type Output = Option<User>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetUserById")]
    async fn process(&self, query: GetUserById) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, image, role, created_at FROM users WHERE id = $1",
        )
        .bind(&query.id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Count accounts holding a given role (dashboard statistic).
#[derive(Debug, Clone, Copy)]
pub struct CountUsersWithRole {
    pub role: UserRole,
}

impl Processor<CountUsersWithRole> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CountUsersWithRole")]
    async fn process(&self, query: CountUsersWithRole) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(query.role)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
