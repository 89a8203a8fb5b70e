//! Repository for the `bookings` table.

use roomdesk_core::entity::EntityKind;
use roomdesk_core::listing::ListQuery;
use roomdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{Booking, CreateBooking, UpdateBooking};
use crate::models::outbox::OutboxEvent;
use crate::repositories::list::build_list_query;
use crate::repositories::OutboxRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, room_id, start_date, end_date, status";

/// Provides CRUD operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking and its `booking.created` outbox row in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBooking,
    ) -> Result<(Booking, OutboxEvent), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO bookings (client_id, room_id, start_date, end_date, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(input.client_id)
            .bind(input.room_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .fetch_one(&mut *tx)
            .await?;

        let event = OutboxRepo::enqueue_created(&mut tx, EntityKind::Booking, &booking).await?;
        tx.commit().await?;
        Ok((booking, event))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every column of a booking.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBooking,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                client_id = $2,
                room_id = $3,
                start_date = $4,
                end_date = $5,
                status = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(input.client_id)
            .bind(input.room_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a booking. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Vec<Booking>, sqlx::Error> {
        build_list_query("bookings", COLUMNS, query)
            .build_query_as::<Booking>()
            .fetch_all(pool)
            .await
    }
}
