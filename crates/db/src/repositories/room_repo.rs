//! Repository for the `rooms` table.

use roomdesk_core::entity::EntityKind;
use roomdesk_core::listing::ListQuery;
use roomdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::outbox::OutboxEvent;
use crate::models::room::{CreateRoom, Room, UpdateRoom};
use crate::repositories::list::build_list_query;
use crate::repositories::OutboxRepo;

const COLUMNS: &str = "id, name, description, available";

/// Provides CRUD operations for rooms.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a room and its `room.created` outbox row in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRoom,
    ) -> Result<(Room, OutboxEvent), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO rooms (name, description, available)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let room = sqlx::query_as::<_, Room>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.available)
            .fetch_one(&mut *tx)
            .await?;

        let event = OutboxRepo::enqueue_created(&mut tx, EntityKind::Room, &room).await?;
        tx.commit().await?;
        Ok((room, event))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET name = $2, description = $3, available = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.available)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Vec<Room>, sqlx::Error> {
        build_list_query("rooms", COLUMNS, query)
            .build_query_as::<Room>()
            .fetch_all(pool)
            .await
    }
}
