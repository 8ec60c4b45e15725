use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use tavolo_booking::models::{Reservation, ReservationStatus};
use tavolo_booking::ReservationRepository;
use tavolo_core::CoreError;
use uuid::Uuid;

pub struct StoreReservationRepository {
    pool: PgPool,
}

impl StoreReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    customer_id: Uuid,
    venue_id: Uuid,
    reservation_time: NaiveDateTime,
    party_size: i32,
    status: String,
    notes: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl ReservationRow {
    fn into_reservation(self) -> Result<Reservation, CoreError> {
        let status = ReservationStatus::parse(&self.status).ok_or_else(|| {
            CoreError::InternalError(format!("unknown reservation status in row: {}", self.status))
        })?;
        Ok(Reservation {
            id: self.id,
            customer_id: self.customer_id,
            venue_id: self.venue_id,
            reservation_time: self.reservation_time,
            party_size: self.party_size,
            status,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

const SELECT_RESERVATION: &str = "SELECT id, customer_id, venue_id, reservation_time, \
     party_size, status, notes, created_at FROM reservations";

#[async_trait]
impl ReservationRepository for StoreReservationRepository {
    async fn create_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO reservations (id, customer_id, venue_id, reservation_time,
                                      party_size, status, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reservation.id)
        .bind(reservation.customer_id)
        .bind(reservation.venue_id)
        .bind(reservation.reservation_time)
        .bind(reservation.party_size)
        .bind(reservation.status.as_str())
        .bind(&reservation.notes)
        .bind(reservation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_reservation(
        &self,
        id: Uuid,
    ) -> Result<Option<Reservation>, Box<dyn std::error::Error + Send + Sync>> {
        let row =
            sqlx::query_as::<_, ReservationRow>(&format!("{} WHERE id = $1", SELECT_RESERVATION))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(ReservationRow::into_reservation)
            .transpose()
            .map_err(Into::into)
    }

    async fn list_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<Reservation>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{} WHERE customer_id = $1 ORDER BY reservation_time DESC",
            SELECT_RESERVATION
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_reservation().map_err(Into::into))
            .collect()
    }

    async fn list_by_venue(
        &self,
        venue_id: Uuid,
    ) -> Result<Vec<Reservation>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{} WHERE venue_id = $1 ORDER BY reservation_time DESC",
            SELECT_RESERVATION
        ))
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_reservation().map_err(Into::into))
            .collect()
    }

    async fn list_by_venues(
        &self,
        venue_ids: &[Uuid],
    ) -> Result<Vec<Reservation>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{} WHERE venue_id = ANY($1) ORDER BY reservation_time DESC",
            SELECT_RESERVATION
        ))
        .bind(venue_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_reservation().map_err(Into::into))
            .collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("UPDATE reservations SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_reservation(
        &self,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reject_overdue_pending(
        &self,
        now: NaiveDateTime,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            "UPDATE reservations SET status = 'rejected' \
             WHERE status = 'pending' AND reservation_time < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
