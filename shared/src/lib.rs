use serde::{Deserialize, Serialize};
use std::fmt;

/// Person ID in format: "person::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    /// Display name (max 100 characters)
    pub name: String,
    /// Birth date as YYYY-MM-DD
    pub date_of_birth: String,
    /// How early postnatal life is bucketed for display
    pub birth_months_display: BirthMonthsDisplay,
    /// Whether/how pre-birth photos are bucketed
    pub pregnancy_tracking: PregnancyTracking,
    /// Which components appear in age captions once age >= 1 year
    pub age_format: AgeFormat,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last-update timestamp (RFC 3339)
    pub updated_at: String,
}

/// Controls whether early postnatal life is bucketed by month before
/// switching to yearly buckets, or bucketed yearly from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BirthMonthsDisplay {
    /// Yearly buckets from birth ("Birth Year", "1 Year", ...)
    None,
    /// Monthly buckets for the first year, then yearly
    TwelveMonths,
    /// Monthly buckets for the first two years, then yearly
    TwentyFourMonths,
}

/// Controls whether pre-birth photos are bucketed at all, and at what
/// granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PregnancyTracking {
    /// Pre-birth photos are excluded from display
    None,
    /// Three trimester buckets
    Trimesters,
    /// One bucket per pregnancy week (1-40)
    Weeks,
}

/// Controls which components appear in the human-readable age string once
/// the person is at least one year old.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeFormat {
    /// Years, months and days
    Full,
    /// Years and months
    YearMonth,
    /// Years only
    YearOnly,
}

impl fmt::Display for BirthMonthsDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirthMonthsDisplay::None => write!(f, "none"),
            BirthMonthsDisplay::TwelveMonths => write!(f, "twelve_months"),
            BirthMonthsDisplay::TwentyFourMonths => write!(f, "twenty_four_months"),
        }
    }
}

impl fmt::Display for PregnancyTracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PregnancyTracking::None => write!(f, "none"),
            PregnancyTracking::Trimesters => write!(f, "trimesters"),
            PregnancyTracking::Weeks => write!(f, "weeks"),
        }
    }
}

impl fmt::Display for AgeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeFormat::Full => write!(f, "full"),
            AgeFormat::YearMonth => write!(f, "year_month"),
            AgeFormat::YearOnly => write!(f, "year_only"),
        }
    }
}

/// A single photo placed on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackPhoto {
    /// Photo ID in format: "photo::epoch_millis"
    pub id: String,
    /// Date the photo was taken, as YYYY-MM-DD
    pub date_taken: String,
    /// Human-readable age caption for this photo ("3 months", "Newborn", ...)
    pub age_caption: String,
}

/// One life-stage bucket on the timeline, possibly empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoStack {
    /// Bucket label ("Birth Month", "3 Months", "Week 14", ...)
    pub name: String,
    /// First day covered by this bucket (YYYY-MM-DD, inclusive)
    pub start_date: String,
    /// First day after this bucket (YYYY-MM-DD, exclusive)
    pub end_date: String,
    /// Photos in this bucket, oldest first
    pub photos: Vec<StackPhoto>,
}

/// The complete timeline for a person as of a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackTimeline {
    pub person: Person,
    /// The "today" the timeline was generated against (YYYY-MM-DD)
    pub generated_on: String,
    /// Every expected stack in natural timeline order, empty ones included
    pub stacks: Vec<PhotoStack>,
    /// Pre-birth photos dropped because pregnancy tracking is off
    pub excluded_photo_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_display_names() {
        assert_eq!(BirthMonthsDisplay::TwelveMonths.to_string(), "twelve_months");
        assert_eq!(PregnancyTracking::Trimesters.to_string(), "trimesters");
        assert_eq!(AgeFormat::YearOnly.to_string(), "year_only");
    }

    #[test]
    fn test_timeline_serializes_with_empty_stacks() {
        let timeline = StackTimeline {
            person: Person {
                id: "person::1702516122000".to_string(),
                name: "Emma".to_string(),
                date_of_birth: "2020-01-15".to_string(),
                birth_months_display: BirthMonthsDisplay::TwelveMonths,
                pregnancy_tracking: PregnancyTracking::None,
                age_format: AgeFormat::Full,
                created_at: "2023-12-14T01:02:02.000Z".to_string(),
                updated_at: "2023-12-14T01:02:02.000Z".to_string(),
            },
            generated_on: "2020-05-01".to_string(),
            stacks: vec![PhotoStack {
                name: "Birth Month".to_string(),
                start_date: "2020-01-15".to_string(),
                end_date: "2020-02-15".to_string(),
                photos: vec![],
            }],
            excluded_photo_count: 0,
        };

        let json = serde_json::to_string(&timeline).unwrap();
        assert!(json.contains("\"Birth Month\""));
        assert!(json.contains("\"excluded_photo_count\":0"));
    }
}
