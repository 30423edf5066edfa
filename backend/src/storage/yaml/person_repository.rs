//! YAML-file person repository using filesystem discovery.
//!
//! Each person lives in their own subdirectory under `people/`, named from
//! a filesystem-safe version of their display name plus the ID timestamp:
//! `people/emma_1702516122000/person.yaml` holds the person record and
//! `photos.yaml` the attached photos. Lookup is by scanning the person
//! files, so renames never orphan a directory.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use super::connection::YamlConnection;
use crate::domain::models::person::{
    AgeFormat, BirthMonthsDisplay, Person as DomainPerson, PregnancyTracking,
};
use crate::domain::models::photo::Photo as DomainPhoto;
use crate::storage::traits::PersonStorage;

const PERSON_FILE: &str = "person.yaml";
const PHOTOS_FILE: &str = "photos.yaml";

/// Intermediate struct for YAML serialization with string date fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlPerson {
    id: String,
    name: String,
    date_of_birth: String,
    birth_months_display: String,
    pregnancy_tracking: String,
    age_format: String,
    created_at: String,
    updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlPhoto {
    id: String,
    person_id: String,
    date_taken: String,
    created_at: String,
}

impl From<&DomainPerson> for YamlPerson {
    fn from(person: &DomainPerson) -> Self {
        Self {
            id: person.id.clone(),
            name: person.name.clone(),
            date_of_birth: person.date_of_birth.format("%Y-%m-%d").to_string(),
            birth_months_display: person.birth_months_display.as_str().to_string(),
            pregnancy_tracking: person.pregnancy_tracking.as_str().to_string(),
            age_format: person.age_format.as_str().to_string(),
            created_at: person.created_at.to_rfc3339(),
            updated_at: person.updated_at.to_rfc3339(),
        }
    }
}

impl YamlPerson {
    fn to_domain(&self) -> Result<DomainPerson> {
        Ok(DomainPerson {
            id: self.id.clone(),
            name: self.name.clone(),
            date_of_birth: NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d")
                .context("Invalid date_of_birth in person file")?,
            birth_months_display: BirthMonthsDisplay::from_string(&self.birth_months_display)
                .map_err(anyhow::Error::msg)?,
            pregnancy_tracking: PregnancyTracking::from_string(&self.pregnancy_tracking)
                .map_err(anyhow::Error::msg)?,
            age_format: AgeFormat::from_string(&self.age_format).map_err(anyhow::Error::msg)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

impl From<&DomainPhoto> for YamlPhoto {
    fn from(photo: &DomainPhoto) -> Self {
        Self {
            id: photo.id.clone(),
            person_id: photo.person_id.clone(),
            date_taken: photo.date_taken.format("%Y-%m-%d").to_string(),
            created_at: photo.created_at.to_rfc3339(),
        }
    }
}

impl YamlPhoto {
    fn to_domain(&self) -> Result<DomainPhoto> {
        Ok(DomainPhoto {
            id: self.id.clone(),
            person_id: self.person_id.clone(),
            date_taken: NaiveDate::parse_from_str(&self.date_taken, "%Y-%m-%d")
                .context("Invalid date_taken in photos file")?,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .context("Invalid timestamp in store file")?
        .with_timezone(&Utc))
}

/// YAML-backed person repository
#[derive(Clone)]
pub struct PersonRepository {
    connection: Arc<YamlConnection>,
}

impl PersonRepository {
    /// Create a new YAML person repository
    pub fn new(connection: Arc<YamlConnection>) -> Self {
        Self { connection }
    }

    /// Generate a safe filesystem identifier from a person's name:
    /// lowercase ASCII alphanumerics, everything else collapsed to single
    /// underscores ("Emma Smith" -> "emma_smith").
    pub fn generate_safe_directory_name(name: &str) -> String {
        let mut result = String::new();
        let mut last_was_underscore = true;
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                result.push(c.to_ascii_lowercase());
                last_was_underscore = false;
            } else if !last_was_underscore {
                result.push('_');
                last_was_underscore = true;
            }
        }
        let trimmed = result.trim_end_matches('_');
        if trimmed.is_empty() {
            "person".to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn directory_for(&self, person: &DomainPerson) -> PathBuf {
        let millis = person.id.rsplit("::").next().unwrap_or("0");
        let name = Self::generate_safe_directory_name(&person.name);
        self.connection
            .people_directory()
            .join(format!("{}_{}", name, millis))
    }

    /// Find the directory holding `person_id` by scanning person files
    fn find_person_directory(&self, person_id: &str) -> Result<Option<PathBuf>> {
        let people_dir = self.connection.people_directory();
        for entry in fs::read_dir(&people_dir).context("Failed to read people directory")? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let person_file = path.join(PERSON_FILE);
            if !person_file.is_file() {
                continue;
            }
            match self.read_person_file(&person_file) {
                Ok(person) if person.id == person_id => return Ok(Some(path)),
                Ok(_) => {}
                Err(err) => warn!("Skipping unreadable person file {:?}: {}", person_file, err),
            }
        }
        Ok(None)
    }

    fn read_person_file(&self, path: &PathBuf) -> Result<DomainPerson> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read person file {:?}", path))?;
        let yaml_person: YamlPerson =
            serde_yaml::from_str(&contents).context("Failed to parse person file")?;
        yaml_person.to_domain()
    }

    fn write_person_file(&self, directory: &PathBuf, person: &DomainPerson) -> Result<()> {
        fs::create_dir_all(directory).context("Failed to create person directory")?;
        let yaml_person = YamlPerson::from(person);
        let contents =
            serde_yaml::to_string(&yaml_person).context("Failed to serialize person")?;
        fs::write(directory.join(PERSON_FILE), contents).context("Failed to write person file")?;
        Ok(())
    }

    fn read_photos(&self, directory: &PathBuf) -> Result<Vec<DomainPhoto>> {
        let photos_file = directory.join(PHOTOS_FILE);
        if !photos_file.is_file() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&photos_file)
            .with_context(|| format!("Failed to read photos file {:?}", photos_file))?;
        let yaml_photos: Vec<YamlPhoto> =
            serde_yaml::from_str(&contents).context("Failed to parse photos file")?;
        yaml_photos.iter().map(YamlPhoto::to_domain).collect()
    }

    fn write_photos(&self, directory: &PathBuf, photos: &[DomainPhoto]) -> Result<()> {
        let yaml_photos: Vec<YamlPhoto> = photos.iter().map(YamlPhoto::from).collect();
        let contents =
            serde_yaml::to_string(&yaml_photos).context("Failed to serialize photos")?;
        fs::write(directory.join(PHOTOS_FILE), contents).context("Failed to write photos file")?;
        Ok(())
    }
}

impl PersonStorage for PersonRepository {
    fn store_person(&self, person: &DomainPerson) -> Result<()> {
        let directory = self.directory_for(person);
        debug!("Storing person {} in {:?}", person.id, directory);
        self.write_person_file(&directory, person)
    }

    fn get_person(&self, person_id: &str) -> Result<Option<DomainPerson>> {
        match self.find_person_directory(person_id)? {
            Some(directory) => Ok(Some(self.read_person_file(&directory.join(PERSON_FILE))?)),
            None => Ok(None),
        }
    }

    fn list_people(&self) -> Result<Vec<DomainPerson>> {
        let people_dir = self.connection.people_directory();
        let mut people = Vec::new();
        for entry in fs::read_dir(&people_dir).context("Failed to read people directory")? {
            let path = entry?.path();
            let person_file = path.join(PERSON_FILE);
            if !person_file.is_file() {
                continue;
            }
            match self.read_person_file(&person_file) {
                Ok(person) => people.push(person),
                Err(err) => warn!("Skipping unreadable person file {:?}: {}", person_file, err),
            }
        }
        people.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(people)
    }

    fn update_person(&self, person: &DomainPerson) -> Result<()> {
        let directory = self
            .find_person_directory(&person.id)?
            .ok_or_else(|| anyhow::anyhow!("Person not found: {}", person.id))?;
        self.write_person_file(&directory, person)
    }

    fn delete_person(&self, person_id: &str) -> Result<bool> {
        match self.find_person_directory(person_id)? {
            Some(directory) => {
                fs::remove_dir_all(&directory).context("Failed to delete person directory")?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn add_photo(&self, photo: &DomainPhoto) -> Result<bool> {
        let directory = self
            .find_person_directory(&photo.person_id)?
            .ok_or_else(|| anyhow::anyhow!("Person not found: {}", photo.person_id))?;

        let mut photos = self.read_photos(&directory)?;
        if photos.iter().any(|existing| existing.id == photo.id) {
            return Ok(false);
        }
        photos.push(photo.clone());
        self.write_photos(&directory, &photos)?;
        Ok(true)
    }

    fn remove_photo(&self, person_id: &str, photo_id: &str) -> Result<bool> {
        let directory = self
            .find_person_directory(person_id)?
            .ok_or_else(|| anyhow::anyhow!("Person not found: {}", person_id))?;

        let mut photos = self.read_photos(&directory)?;
        let before = photos.len();
        photos.retain(|photo| photo.id != photo_id);
        if photos.len() == before {
            return Ok(false);
        }
        self.write_photos(&directory, &photos)?;
        Ok(true)
    }

    fn list_photos(&self, person_id: &str) -> Result<Vec<DomainPhoto>> {
        let directory = self
            .find_person_directory(person_id)?
            .ok_or_else(|| anyhow::anyhow!("Person not found: {}", person_id))?;
        self.read_photos(&directory)
    }
}
