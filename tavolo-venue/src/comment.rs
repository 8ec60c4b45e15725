use chrono::{DateTime, Utc};
use tavolo_core::identity::UserType;
use tavolo_core::CoreError;
use uuid::Uuid;

/// A review left on a venue. Customers rate 1-5; owner replies carry no
/// rating.
#[derive(Debug, Clone)]
pub struct VenueComment {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl VenueComment {
    pub fn new(venue_id: Uuid, user_id: Uuid, body: String, rating: Option<i32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            venue_id,
            user_id,
            body,
            rating,
            created_at: Utc::now(),
        }
    }
}

/// Customers must provide a 1-5 rating; anything an owner sends is dropped.
pub fn normalize_rating(user_type: UserType, rating: Option<i32>) -> Result<Option<i32>, CoreError> {
    match user_type {
        UserType::Customer => match rating {
            Some(r) if (1..=5).contains(&r) => Ok(Some(r)),
            _ => Err(CoreError::ValidationError(
                "Rating (1-5) is required for customers".to_string(),
            )),
        },
        UserType::Owner => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customers_need_a_rating_in_range() {
        assert_eq!(normalize_rating(UserType::Customer, Some(4)).unwrap(), Some(4));
        assert!(normalize_rating(UserType::Customer, None).is_err());
        assert!(normalize_rating(UserType::Customer, Some(0)).is_err());
        assert!(normalize_rating(UserType::Customer, Some(6)).is_err());
    }

    #[test]
    fn owner_ratings_are_discarded() {
        assert_eq!(normalize_rating(UserType::Owner, Some(5)).unwrap(), None);
        assert_eq!(normalize_rating(UserType::Owner, None).unwrap(), None);
    }
}
