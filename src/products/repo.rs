use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Product row. Every query below filters by owner as well as id, so a row
/// owned by someone else behaves exactly like a missing row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
}

impl Product {
    pub async fn list_by_owner(db: &PgPool, owner: Uuid) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, user_id, created_at
            FROM products
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(db)
        .await
    }

    pub async fn find_owned(
        db: &PgPool,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, user_id, created_at
            FROM products
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(
        db: &PgPool,
        owner: Uuid,
        name: &str,
        price: f64,
    ) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, user_id, created_at
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(owner)
        .fetch_one(db)
        .await
    }

    /// Write the full row back after patch resolution. Second half of the
    /// read-modify-write; the write itself stays owner-scoped.
    pub async fn update_owned(
        db: &PgPool,
        owner: Uuid,
        id: Uuid,
        name: &str,
        price: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $1, price = $2
            WHERE id = $3 AND user_id = $4
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(id)
        .bind(owner)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Owner-scoped delete; the caller decides what zero affected rows means.
    pub async fn delete_owned(db: &PgPool, owner: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
