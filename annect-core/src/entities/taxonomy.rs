//! Tags and categories used to classify events and drive listing filters.

use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ListTags;

impl Processor<ListTags> for DatabaseProcessor {
    type Output = Vec<Tag>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListTags")]
    async fn process(&self, _query: ListTags) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListCategories;

impl Processor<ListCategories> for DatabaseProcessor {
    type Output = Vec<Category>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListCategories")]
    async fn process(&self, _query: ListCategories) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }
}

/// Number of events under each tag, for the dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct TagCount {
    pub name: String,
    pub total: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct CountEventsPerTag;

impl Processor<CountEventsPerTag> for DatabaseProcessor {
    type Output = Vec<TagCount>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CountEventsPerTag")]
    async fn process(&self, _query: CountEventsPerTag) -> Result<Vec<TagCount>, sqlx::Error> {
        sqlx::query_as::<_, TagCount>(
            r#"
            SELECT t.name, COUNT(e.id) AS total
            FROM tags t
            LEFT JOIN events e ON e.tag_id = t.id
            GROUP BY t.name
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
