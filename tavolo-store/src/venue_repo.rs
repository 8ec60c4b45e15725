use async_trait::async_trait;
use sqlx::PgPool;
use tavolo_core::CoreError;
use tavolo_venue::venue::{Venue, VenueType};
use tavolo_venue::VenueRepository;
use uuid::Uuid;

use crate::map_db_err;

pub struct StoreVenueRepository {
    pool: PgPool,
}

impl StoreVenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VenueRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    venue_type: String,
    phone: String,
    email: String,
    address: String,
    image_url: Option<String>,
    menu_image_url: Option<String>,
    weekdays_hours: String,
    weekend_hours: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl VenueRow {
    fn into_venue(self) -> Result<Venue, CoreError> {
        let venue_type = VenueType::parse(&self.venue_type).ok_or_else(|| {
            CoreError::InternalError(format!("unknown venue_type in row: {}", self.venue_type))
        })?;
        Ok(Venue {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            venue_type,
            phone: self.phone,
            email: self.email,
            address: self.address,
            image_url: self.image_url,
            menu_image_url: self.menu_image_url,
            weekdays_hours: self.weekdays_hours,
            weekend_hours: self.weekend_hours,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: self.created_at,
        })
    }
}

const SELECT_VENUE: &str = "SELECT id, owner_id, name, venue_type, phone, email, address, \
     image_url, menu_image_url, weekdays_hours, weekend_hours, latitude, longitude, created_at \
     FROM venues";

#[async_trait]
impl VenueRepository for StoreVenueRepository {
    async fn create_venue(
        &self,
        venue: &Venue,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO venues (id, owner_id, name, venue_type, phone, email, address,
                                image_url, menu_image_url, weekdays_hours, weekend_hours,
                                latitude, longitude, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(venue.id)
        .bind(venue.owner_id)
        .bind(&venue.name)
        .bind(venue.venue_type.as_str())
        .bind(&venue.phone)
        .bind(&venue.email)
        .bind(&venue.address)
        .bind(&venue.image_url)
        .bind(&venue.menu_image_url)
        .bind(&venue.weekdays_hours)
        .bind(&venue.weekend_hours)
        .bind(venue.latitude)
        .bind(venue.longitude)
        .bind(venue.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn get_venue(
        &self,
        id: Uuid,
    ) -> Result<Option<Venue>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, VenueRow>(&format!("{} WHERE id = $1", SELECT_VENUE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(VenueRow::into_venue).transpose().map_err(Into::into)
    }

    async fn list_venues(
        &self,
    ) -> Result<Vec<Venue>, Box<dyn std::error::Error + Send + Sync>> {
        let rows =
            sqlx::query_as::<_, VenueRow>(&format!("{} ORDER BY created_at DESC", SELECT_VENUE))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|row| row.into_venue().map_err(Into::into))
            .collect()
    }

    async fn list_venues_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Venue>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, VenueRow>(&format!(
            "{} WHERE owner_id = $1 ORDER BY created_at DESC",
            SELECT_VENUE
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_venue().map_err(Into::into))
            .collect()
    }

    async fn delete_venue(
        &self,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
