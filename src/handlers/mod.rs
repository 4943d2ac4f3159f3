pub mod auth;
pub mod bookings;
pub mod materials;
pub mod notes;
pub mod payments;
pub mod reviews;
pub mod sessions;
pub mod users;

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Parse a path segment into a store-native record identifier.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::bad_request(format!("Invalid record id: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
        assert!(parse_object_id("not-an-id").is_err());
    }
}
