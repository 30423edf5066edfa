//! # Storage Traits
//!
//! Storage abstraction for the person store so the domain layer can work
//! against different backends without modification. All operations are
//! synchronous; there is no remote storage.

use anyhow::Result;

use crate::domain::models::person::Person as DomainPerson;
use crate::domain::models::photo::Photo as DomainPhoto;

/// Trait defining the interface for person and photo storage operations
pub trait PersonStorage: Send + Sync {
    /// Store a new person
    fn store_person(&self, person: &DomainPerson) -> Result<()>;

    /// Retrieve a specific person by ID
    fn get_person(&self, person_id: &str) -> Result<Option<DomainPerson>>;

    /// List all people, in creation order
    fn list_people(&self) -> Result<Vec<DomainPerson>>;

    /// Update an existing person
    fn update_person(&self, person: &DomainPerson) -> Result<()>;

    /// Delete a person and their photos
    /// Returns true if the person was found and deleted, false otherwise
    fn delete_person(&self, person_id: &str) -> Result<bool>;

    /// Attach a photo to its person
    /// Returns false when a photo with the same ID is already attached
    fn add_photo(&self, photo: &DomainPhoto) -> Result<bool>;

    /// Detach a photo from a person
    /// Returns true if the photo was found and removed, false otherwise
    fn remove_photo(&self, person_id: &str, photo_id: &str) -> Result<bool>;

    /// List all photos attached to a person, in stored order
    fn list_photos(&self, person_id: &str) -> Result<Vec<DomainPhoto>>;
}
