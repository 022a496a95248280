//! Item repository implementation

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::DatabaseError;

const ITEM_COLUMNS: &str = "id, title, category, description, location, campus, status, \
     image_url, reporter_id, created_at, updated_at";

/// Items aliased `i` joined to their reporter; `LEFT JOIN` keeps the item
/// row even when the reporter cannot be resolved
const ITEM_DETAILS_FROM: &str = "SELECT i.id, i.title, i.category, i.description, i.location, \
     i.campus, i.status, i.image_url, i.reporter_id, i.created_at, i.updated_at, \
     u.first_name AS reporter_first_name, u.last_name AS reporter_last_name, \
     u.email AS reporter_email \
     FROM items i LEFT JOIN users u ON u.id = i.reporter_id";

/// Repository for reported items
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves an item by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ItemRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves an item with its reporter's name and email
    pub async fn get_details(&self, id: Uuid) -> Result<Option<ItemDetailsRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ItemDetailsRow>(&format!(
            "{ITEM_DETAILS_FROM} WHERE i.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Returns one page of matching items with their reporters, newest
    /// first, and the total number of matches
    pub async fn list(
        &self,
        query: &ItemQuery,
    ) -> Result<(Vec<ItemDetailsRow>, i64), DatabaseError> {
        let mut select = QueryBuilder::<Postgres>::new(format!("{ITEM_DETAILS_FROM} WHERE TRUE"));
        push_filters(&mut select, query);
        select
            .push(" ORDER BY i.created_at DESC, i.id DESC LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let rows = select
            .build_query_as::<ItemDetailsRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM items i WHERE TRUE");
        push_filters(&mut count, query);

        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Inserts a newly reported item
    pub async fn insert(&self, item: NewItemRecord) -> Result<ItemRow, DatabaseError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            INSERT INTO items (
                id, title, category, description, location, campus, status,
                image_url, reporter_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(item.title)
        .bind(item.category)
        .bind(item.description)
        .bind(item.location)
        .bind(item.campus)
        .bind(item.status)
        .bind(item.image_url)
        .bind(item.reporter_id)
        .bind(item.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Applies a partial update; `NULL` parameters keep the stored value
    pub async fn update(
        &self,
        id: Uuid,
        changes: ItemChanges,
    ) -> Result<Option<ItemRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            UPDATE items SET
                title = COALESCE($2, title),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                campus = COALESCE($6, campus),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.category)
        .bind(changes.description)
        .bind(changes.location)
        .bind(changes.campus)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Overwrites the status outside any transaction
    pub async fn set_status(
        &self,
        id: Uuid,
        status: ItemStatus,
    ) -> Result<Option<ItemRow>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        Self::set_status_on(&mut conn, id, status).await
    }

    /// Deletes an item; its claims go with it through `ON DELETE CASCADE`
    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reads the item and holds its row lock until the transaction ends
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<ItemRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    /// Writes the status on the given connection
    pub async fn set_status_on(
        conn: &mut PgConnection,
        id: Uuid,
        status: ItemStatus,
    ) -> Result<Option<ItemRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            UPDATE items SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }
}

/// Appends the `AND` clauses for every present filter, against items
/// aliased `i`
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ItemQuery) {
    if let Some(category) = query.category {
        builder.push(" AND i.category = ").push_bind(category);
    }
    if let Some(campus) = &query.campus {
        builder.push(" AND i.campus = ").push_bind(campus.clone());
    }
    if let Some(status) = query.status {
        builder.push(" AND i.status = ").push_bind(status);
    }
    if let Some(term) = &query.search {
        let pattern = like_pattern(term);
        builder
            .push(" AND (i.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR i.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// Builds a `%term%` pattern with LIKE metacharacters escaped
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Item category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "item_category", rename_all = "snake_case")]
pub enum ItemCategory {
    Electronics,
    Textbooks,
    Keys,
    IdCards,
    Clothing,
    Bags,
    Other,
}

/// Item status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "item_status", rename_all = "snake_case")]
pub enum ItemStatus {
    Lost,
    Found,
    Claimed,
}

/// Database row for an item
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemRow {
    pub id: Uuid,
    pub title: String,
    pub category: ItemCategory,
    pub description: Option<String>,
    pub location: String,
    pub campus: String,
    pub status: ItemStatus,
    pub image_url: Option<String>,
    pub reporter_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item row with the reporter columns of [`ITEM_DETAILS_FROM`]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemDetailsRow {
    #[sqlx(flatten)]
    pub item: ItemRow,
    pub reporter_first_name: Option<String>,
    pub reporter_last_name: Option<String>,
    pub reporter_email: Option<String>,
}

/// Data for inserting an item
#[derive(Debug, Clone)]
pub struct NewItemRecord {
    pub id: Uuid,
    pub title: String,
    pub category: ItemCategory,
    pub description: Option<String>,
    pub location: String,
    pub campus: String,
    pub status: ItemStatus,
    pub image_url: Option<String>,
    pub reporter_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub category: Option<ItemCategory>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub campus: Option<String>,
}

/// Listing criteria, already resolved to SQL-ready values
#[derive(Debug, Clone)]
pub struct ItemQuery {
    pub category: Option<ItemCategory>,
    pub campus: Option<String>,
    pub status: Option<ItemStatus>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
