use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a tracked person (typically a child).
/// The birth date is the fixed anchor for all age and bucket math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub birth_months_display: BirthMonthsDisplay,
    pub pregnancy_tracking: PregnancyTracking,
    pub age_format: AgeFormat,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// Generate a unique ID for a person
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("person::{}", timestamp_millis)
    }
}

/// How early postnatal life is bucketed: yearly from birth, or monthly for
/// the first 12 or 24 months before switching to yearly buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BirthMonthsDisplay {
    None,
    TwelveMonths,
    TwentyFourMonths,
}

impl BirthMonthsDisplay {
    /// Convert to string for YAML storage
    pub fn as_str(&self) -> &'static str {
        match self {
            BirthMonthsDisplay::None => "none",
            BirthMonthsDisplay::TwelveMonths => "twelve_months",
            BirthMonthsDisplay::TwentyFourMonths => "twenty_four_months",
        }
    }

    /// Parse from string for YAML loading
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "none" => Ok(BirthMonthsDisplay::None),
            "twelve_months" => Ok(BirthMonthsDisplay::TwelveMonths),
            "twenty_four_months" => Ok(BirthMonthsDisplay::TwentyFourMonths),
            _ => Err(format!("Invalid birth months display: {}", s)),
        }
    }
}

/// Whether pre-birth photos are bucketed, and at what granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PregnancyTracking {
    None,
    Trimesters,
    Weeks,
}

impl PregnancyTracking {
    /// Convert to string for YAML storage
    pub fn as_str(&self) -> &'static str {
        match self {
            PregnancyTracking::None => "none",
            PregnancyTracking::Trimesters => "trimesters",
            PregnancyTracking::Weeks => "weeks",
        }
    }

    /// Parse from string for YAML loading
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "none" => Ok(PregnancyTracking::None),
            "trimesters" => Ok(PregnancyTracking::Trimesters),
            "weeks" => Ok(PregnancyTracking::Weeks),
            _ => Err(format!("Invalid pregnancy tracking: {}", s)),
        }
    }
}

/// Which components the age caption shows once the person is at least one
/// year old. The first year always renders as months regardless of format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeFormat {
    Full,
    YearMonth,
    YearOnly,
}

impl AgeFormat {
    /// Convert to string for YAML storage
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeFormat::Full => "full",
            AgeFormat::YearMonth => "year_month",
            AgeFormat::YearOnly => "year_only",
        }
    }

    /// Parse from string for YAML loading
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "full" => Ok(AgeFormat::Full),
            "year_month" => Ok(AgeFormat::YearMonth),
            "year_only" => Ok(AgeFormat::YearOnly),
            _ => Err(format!("Invalid age format: {}", s)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersonValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name is too long")]
    NameTooLong,
}
