//! Command and result types for person and photo operations.

use crate::domain::models::person::{AgeFormat, BirthMonthsDisplay, Person, PregnancyTracking};
use crate::domain::models::photo::Photo;

#[derive(Debug, Clone)]
pub struct CreatePersonCommand {
    pub name: String,
    /// Birth date as YYYY-MM-DD
    pub date_of_birth: String,
    pub birth_months_display: BirthMonthsDisplay,
    pub pregnancy_tracking: PregnancyTracking,
    pub age_format: AgeFormat,
}

#[derive(Debug, Clone)]
pub struct CreatePersonResult {
    pub person: Person,
}

#[derive(Debug, Clone)]
pub struct GetPersonCommand {
    pub person_id: String,
}

#[derive(Debug, Clone)]
pub struct GetPersonResult {
    pub person: Option<Person>,
}

#[derive(Debug, Clone)]
pub struct ListPeopleResult {
    pub people: Vec<Person>,
}

#[derive(Debug, Clone)]
pub struct UpdatePersonCommand {
    pub person_id: String,
    pub name: Option<String>,
    /// Birth date as YYYY-MM-DD
    pub date_of_birth: Option<String>,
    pub birth_months_display: Option<BirthMonthsDisplay>,
    pub pregnancy_tracking: Option<PregnancyTracking>,
    pub age_format: Option<AgeFormat>,
}

#[derive(Debug, Clone)]
pub struct UpdatePersonResult {
    pub person: Person,
}

#[derive(Debug, Clone)]
pub struct DeletePersonCommand {
    pub person_id: String,
}

#[derive(Debug, Clone)]
pub struct DeletePersonResult {
    pub deleted: bool,
}

#[derive(Debug, Clone)]
pub struct AddPhotoCommand {
    pub person_id: String,
    /// Date the photo was taken, as YYYY-MM-DD
    pub date_taken: String,
    /// Stable identifier from the photo source; reused imports of the same
    /// photo are deduplicated on it
    pub photo_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddPhotoResult {
    pub photo: Photo,
    /// False when the photo was already attached and nothing changed
    pub added: bool,
}

#[derive(Debug, Clone)]
pub struct RemovePhotoCommand {
    pub person_id: String,
    pub photo_id: String,
}

#[derive(Debug, Clone)]
pub struct RemovePhotoResult {
    pub deleted: bool,
}

#[derive(Debug, Clone)]
pub struct TimelineQuery {
    pub person_id: String,
    /// Evaluation date as YYYY-MM-DD; defaults to the current local date
    pub as_of: Option<String>,
}
