use async_trait::async_trait;
use uuid::Uuid;

use crate::comment::VenueComment;
use crate::venue::Venue;

/// Repository trait for venue data access
#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn create_venue(
        &self,
        venue: &Venue,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_venue(
        &self,
        id: Uuid,
    ) -> Result<Option<Venue>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_venues(
        &self,
    ) -> Result<Vec<Venue>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_venues_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Venue>, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns false when no venue with this id existed.
    async fn delete_venue(
        &self,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for venue comment access
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn add_comment(
        &self,
        comment: &VenueComment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Newest first.
    async fn list_comments(
        &self,
        venue_id: Uuid,
    ) -> Result<Vec<VenueComment>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_comment(
        &self,
        venue_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<VenueComment>, Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_comment(
        &self,
        comment_id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
