use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::person::{
    AddPhotoCommand, AddPhotoResult, CreatePersonCommand, CreatePersonResult, DeletePersonCommand,
    DeletePersonResult, GetPersonCommand, GetPersonResult, ListPeopleResult, RemovePhotoCommand,
    RemovePhotoResult, UpdatePersonCommand, UpdatePersonResult,
};
use crate::domain::models::person::{Person as DomainPerson, PersonValidationError};
use crate::domain::models::photo::Photo as DomainPhoto;
use crate::storage::traits::PersonStorage;
use crate::storage::yaml::{PersonRepository, YamlConnection};

const MAX_NAME_LENGTH: usize = 100;

/// Service for managing the people tracked by the app
#[derive(Clone)]
pub struct PersonService {
    person_repository: PersonRepository,
}

impl PersonService {
    /// Create a new PersonService
    pub fn new(connection: Arc<YamlConnection>) -> Self {
        let person_repository = PersonRepository::new(connection);
        Self { person_repository }
    }

    /// Create a new person
    pub fn create_person(&self, command: CreatePersonCommand) -> Result<CreatePersonResult> {
        info!("Creating person: name={}, date_of_birth={}", command.name, command.date_of_birth);

        Self::validate_name(&command.name)?;
        let date_of_birth = parse_birth_date(&command.date_of_birth)
            .context("Invalid birth date in create_person command")?;

        let now = Utc::now();
        let person = DomainPerson {
            id: DomainPerson::generate_id(now.timestamp_millis() as u64),
            name: command.name.trim().to_string(),
            date_of_birth,
            birth_months_display: command.birth_months_display,
            pregnancy_tracking: command.pregnancy_tracking,
            age_format: command.age_format,
            created_at: now,
            updated_at: now,
        };

        self.person_repository.store_person(&person)?;

        info!("Created person: {} with ID: {}", person.name, person.id);

        Ok(CreatePersonResult { person })
    }

    /// Get a person by ID
    pub fn get_person(&self, command: GetPersonCommand) -> Result<GetPersonResult> {
        let person = self.person_repository.get_person(&command.person_id)?;

        if person.is_none() {
            warn!("Person not found: {}", command.person_id);
        }

        Ok(GetPersonResult { person })
    }

    /// List all people, oldest first
    pub fn list_people(&self) -> Result<ListPeopleResult> {
        let people = self.person_repository.list_people()?;
        Ok(ListPeopleResult { people })
    }

    /// Update an existing person. Changing the birth date rebases every
    /// bucket; stored photos keep their dates and simply re-classify.
    pub fn update_person(&self, command: UpdatePersonCommand) -> Result<UpdatePersonResult> {
        info!("Updating person: {}", command.person_id);

        let mut person = self
            .person_repository
            .get_person(&command.person_id)?
            .ok_or_else(|| anyhow::anyhow!("Person not found: {}", command.person_id))?;

        if let Some(name) = command.name {
            Self::validate_name(&name)?;
            person.name = name.trim().to_string();
        }
        if let Some(date_of_birth) = command.date_of_birth {
            person.date_of_birth = parse_birth_date(&date_of_birth)
                .context("Invalid birth date in update_person command")?;
        }
        if let Some(birth_months_display) = command.birth_months_display {
            person.birth_months_display = birth_months_display;
        }
        if let Some(pregnancy_tracking) = command.pregnancy_tracking {
            person.pregnancy_tracking = pregnancy_tracking;
        }
        if let Some(age_format) = command.age_format {
            person.age_format = age_format;
        }

        person.updated_at = Utc::now();
        self.person_repository.update_person(&person)?;

        info!("Updated person: {} with ID: {}", person.name, person.id);

        Ok(UpdatePersonResult { person })
    }

    /// Delete a person and their photos
    pub fn delete_person(&self, command: DeletePersonCommand) -> Result<DeletePersonResult> {
        info!("Deleting person: {}", command.person_id);

        let deleted = self.person_repository.delete_person(&command.person_id)?;
        if !deleted {
            warn!("Delete requested for unknown person: {}", command.person_id);
        }

        Ok(DeletePersonResult { deleted })
    }

    /// Attach a photo to a person's timeline.
    ///
    /// When the command carries a photo ID that is already attached this is
    /// a no-op dedup, mirroring repeated photo-library imports.
    pub fn add_photo(&self, command: AddPhotoCommand) -> Result<AddPhotoResult> {
        let person = self
            .person_repository
            .get_person(&command.person_id)?
            .ok_or_else(|| anyhow::anyhow!("Person not found: {}", command.person_id))?;

        let date_taken = NaiveDate::parse_from_str(&command.date_taken, "%Y-%m-%d")
            .context("Invalid date_taken in add_photo command")?;

        let now = Utc::now();
        let photo = DomainPhoto {
            id: command
                .photo_id
                .unwrap_or_else(|| DomainPhoto::generate_id(now.timestamp_millis() as u64)),
            person_id: person.id.clone(),
            date_taken,
            created_at: now,
        };

        let added = self.person_repository.add_photo(&photo)?;
        if added {
            info!("Attached photo {} to {}", photo.id, person.id);
        } else {
            info!("Photo {} already attached to {}, skipping", photo.id, person.id);
        }

        Ok(AddPhotoResult { photo, added })
    }

    /// Detach a photo from a person's timeline
    pub fn remove_photo(&self, command: RemovePhotoCommand) -> Result<RemovePhotoResult> {
        let deleted = self
            .person_repository
            .remove_photo(&command.person_id, &command.photo_id)?;

        if deleted {
            info!("Removed photo {} from {}", command.photo_id, command.person_id);
        } else {
            warn!("Photo not found: {} on {}", command.photo_id, command.person_id);
        }

        Ok(RemovePhotoResult { deleted })
    }

    /// List a person's photos, oldest first
    pub fn list_photos(&self, person_id: &str) -> Result<Vec<DomainPhoto>> {
        let mut photos = self.person_repository.list_photos(person_id)?;
        photos.sort_by(|a, b| a.date_taken.cmp(&b.date_taken).then(a.id.cmp(&b.id)));
        Ok(photos)
    }

    fn validate_name(name: &str) -> Result<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PersonValidationError::EmptyName.into());
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(PersonValidationError::NameTooLong.into());
        }
        Ok(())
    }
}

fn parse_birth_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(Into::into)
}
