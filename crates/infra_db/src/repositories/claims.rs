//! Claim repository implementation
//!
//! Every claim write is exposed as an associated function over a
//! caller-owned connection; the adapter composes them with
//! [`super::ItemRepository`] inside one transaction. Reads go through the
//! pool and join the item and both parties.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str =
    "id, item_id, claimer_id, owner_id, status, verification_notes, created_at, updated_at";

/// Claims aliased `c` with the claimed item and both parties' names
const CLAIM_DETAILS_FROM: &str = "SELECT c.id, c.item_id, c.claimer_id, c.owner_id, c.status, \
     c.verification_notes, c.created_at, c.updated_at, \
     i.title AS item_title, i.description AS item_description, i.image_url AS item_image, \
     cu.first_name AS claimer_first, cu.last_name AS claimer_last, \
     ou.first_name AS owner_first, ou.last_name AS owner_last \
     FROM claims c \
     LEFT JOIN items i ON i.id = c.item_id \
     LEFT JOIN users cu ON cu.id = c.claimer_id \
     LEFT JOIN users ou ON ou.id = c.owner_id";

/// Repository for item claims
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ClaimRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a claim with its item and party names
    pub async fn get_details(&self, id: Uuid) -> Result<Option<ClaimDetailsRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimDetailsRow>(&format!(
            "{CLAIM_DETAILS_FROM} WHERE c.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Claims against an item, newest first
    pub async fn list_for_item(
        &self,
        item_id: Uuid,
    ) -> Result<Vec<ClaimDetailsRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimDetailsRow>(&format!(
            r#"
            {CLAIM_DETAILS_FROM}
            WHERE c.item_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#
        ))
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Claims where the user is claimer or owner, newest first
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ClaimDetailsRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimDetailsRow>(&format!(
            r#"
            {CLAIM_DETAILS_FROM}
            WHERE c.claimer_id = $1 OR c.owner_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a claim on the given connection
    pub async fn insert_on(
        conn: &mut PgConnection,
        claim: NewClaimRecord,
    ) -> Result<ClaimRow, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(&format!(
            r#"
            INSERT INTO claims (
                id, item_id, claimer_id, owner_id, status, verification_notes,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {CLAIM_COLUMNS}
            "#
        ))
        .bind(claim.id)
        .bind(claim.item_id)
        .bind(claim.claimer_id)
        .bind(claim.owner_id)
        .bind(claim.status)
        .bind(claim.verification_notes)
        .bind(claim.created_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row)
    }

    /// Reads the claim and holds its row lock until the transaction ends
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<ClaimRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    /// Persists status, notes, and timestamp of an existing claim
    pub async fn save_review_on(
        conn: &mut PgConnection,
        review: ClaimReview,
    ) -> Result<Option<ClaimRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(&format!(
            r#"
            UPDATE claims
            SET status = $2, verification_notes = $3, updated_at = $4
            WHERE id = $1
            RETURNING {CLAIM_COLUMNS}
            "#
        ))
        .bind(review.id)
        .bind(review.status)
        .bind(review.verification_notes)
        .bind(review.updated_at)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    /// Deletes a claim on the given connection
    pub async fn delete_on(conn: &mut PgConnection, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM claims WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of claims recorded against an item
    pub async fn count_for_item_on(
        conn: &mut PgConnection,
        item_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM claims WHERE item_id = $1")
                .bind(item_id)
                .fetch_one(&mut *conn)
                .await?;

        Ok(count)
    }
}

/// Claim status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_status", rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Verified,
    Rejected,
    Completed,
}

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: Uuid,
    pub item_id: Uuid,
    pub claimer_id: Uuid,
    pub owner_id: Option<Uuid>,
    pub status: ClaimStatus,
    pub verification_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Claim row with the joined columns of [`CLAIM_DETAILS_FROM`]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimDetailsRow {
    #[sqlx(flatten)]
    pub claim: ClaimRow,
    pub item_title: Option<String>,
    pub item_description: Option<String>,
    pub item_image: Option<String>,
    pub claimer_first: Option<String>,
    pub claimer_last: Option<String>,
    pub owner_first: Option<String>,
    pub owner_last: Option<String>,
}

/// Data for inserting a claim
#[derive(Debug, Clone)]
pub struct NewClaimRecord {
    pub id: Uuid,
    pub item_id: Uuid,
    pub claimer_id: Uuid,
    pub owner_id: Option<Uuid>,
    pub status: ClaimStatus,
    pub verification_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Mutable fields of a claim after review or amendment
#[derive(Debug, Clone)]
pub struct ClaimReview {
    pub id: Uuid,
    pub status: ClaimStatus,
    pub verification_notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}
