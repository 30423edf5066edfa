use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A photo attached to a person's timeline. The bucketing engine only ever
/// reads `date_taken`; image bytes and asset handles live outside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Photo ID in format: "photo::epoch_millis"
    pub id: String,
    /// ID of the person this photo belongs to
    pub person_id: String,
    /// Civil date the photo was taken
    pub date_taken: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Generate a unique ID for a photo
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("photo::{}", timestamp_millis)
    }
}
