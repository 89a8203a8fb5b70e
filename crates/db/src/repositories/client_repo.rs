//! Repository for the `clients` table.

use roomdesk_core::entity::EntityKind;
use roomdesk_core::listing::ListQuery;
use roomdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, ClientChanges, NewClient};
use crate::models::outbox::OutboxEvent;
use crate::repositories::list::build_list_query;
use crate::repositories::OutboxRepo;

const COLUMNS: &str =
    "id, fname, sname, email, password_hash, user_role, activated, version, created_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a client and its `client.created` outbox row in one transaction.
    ///
    /// A duplicate email violates `uq_clients_email`.
    pub async fn create(
        pool: &PgPool,
        input: &NewClient,
    ) -> Result<(Client, OutboxEvent), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO clients (fname, sname, email, password_hash, user_role, activated)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(&input.fname)
            .bind(&input.sname)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.user_role)
            .bind(input.activated)
            .fetch_one(&mut *tx)
            .await?;

        let event = OutboxRepo::enqueue_created(&mut tx, EntityKind::Client, &client).await?;
        tx.commit().await?;
        Ok((client, event))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE email = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Version-checked full-row update. Bumps `version` on success.
    ///
    /// Returns `None` when no row matches both `id` and the expected
    /// version; the caller tells a missing row from a stale one.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &ClientChanges,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                fname = $2,
                sname = $3,
                email = $4,
                user_role = $5,
                activated = $6,
                password_hash = COALESCE($7, password_hash),
                version = version + 1
             WHERE id = $1 AND version = $8
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&changes.fname)
            .bind(&changes.sname)
            .bind(&changes.email)
            .bind(&changes.user_role)
            .bind(changes.activated)
            .bind(&changes.password_hash)
            .bind(changes.expected_version)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a client. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Vec<Client>, sqlx::Error> {
        build_list_query("clients", COLUMNS, query)
            .build_query_as::<Client>()
            .fetch_all(pool)
            .await
    }
}
