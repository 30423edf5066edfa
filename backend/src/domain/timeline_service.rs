//! Timeline assembly for the stack grid UI.
//!
//! Takes a person and their photos and produces the complete ordered list of
//! photo stacks as of a given day, empty placeholders included, with a
//! human-readable age caption per photo. All presentation concerns stay in
//! the UI; this module owns the grouping rules.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use shared::{PhotoStack, StackPhoto, StackTimeline};

use crate::domain::age_service::AgeService;
use crate::domain::commands::person::{GetPersonCommand, TimelineQuery};
use crate::domain::person_service::PersonService;
use crate::domain::models::person::Person as DomainPerson;
use crate::domain::models::photo::Photo as DomainPhoto;
use crate::domain::models::stack::Stack;
use crate::domain::stack_service::StackService;

const DATE_FORMAT: &str = "%Y-%m-%d";

struct PersonMapper;

impl PersonMapper {
    pub fn to_dto(person: &DomainPerson) -> shared::Person {
        shared::Person {
            id: person.id.clone(),
            name: person.name.clone(),
            date_of_birth: person.date_of_birth.format(DATE_FORMAT).to_string(),
            birth_months_display: match person.birth_months_display {
                crate::domain::models::person::BirthMonthsDisplay::None => {
                    shared::BirthMonthsDisplay::None
                }
                crate::domain::models::person::BirthMonthsDisplay::TwelveMonths => {
                    shared::BirthMonthsDisplay::TwelveMonths
                }
                crate::domain::models::person::BirthMonthsDisplay::TwentyFourMonths => {
                    shared::BirthMonthsDisplay::TwentyFourMonths
                }
            },
            pregnancy_tracking: match person.pregnancy_tracking {
                crate::domain::models::person::PregnancyTracking::None => {
                    shared::PregnancyTracking::None
                }
                crate::domain::models::person::PregnancyTracking::Trimesters => {
                    shared::PregnancyTracking::Trimesters
                }
                crate::domain::models::person::PregnancyTracking::Weeks => {
                    shared::PregnancyTracking::Weeks
                }
            },
            age_format: match person.age_format {
                crate::domain::models::person::AgeFormat::Full => shared::AgeFormat::Full,
                crate::domain::models::person::AgeFormat::YearMonth => shared::AgeFormat::YearMonth,
                crate::domain::models::person::AgeFormat::YearOnly => shared::AgeFormat::YearOnly,
            },
            created_at: person.created_at.to_rfc3339(),
            updated_at: person.updated_at.to_rfc3339(),
        }
    }
}

/// Service that turns a person's photos into the ordered stack timeline
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineService {
    stacks: StackService,
    ages: AgeService,
}

impl TimelineService {
    /// Create a new TimelineService instance
    pub fn new() -> Self {
        Self {
            stacks: StackService::new(),
            ages: AgeService::new(),
        }
    }

    /// Load a person and their photos and build the timeline. This moves
    /// the orchestration out of any UI layer: callers hand over a query and
    /// get the finished DTO back.
    pub fn get_timeline_for_person(
        &self,
        query: TimelineQuery,
        person_service: &PersonService,
    ) -> Result<StackTimeline> {
        let person = person_service
            .get_person(GetPersonCommand { person_id: query.person_id.clone() })?
            .person
            .ok_or_else(|| anyhow::anyhow!("Person not found: {}", query.person_id))?;

        let today = match &query.as_of {
            Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
                .context("Invalid as_of date in timeline query")?,
            None => Local::now().date_naive(),
        };

        let photos = person_service.list_photos(&person.id)?;
        Ok(self.build_timeline(&person, &photos, today))
    }

    /// Build the timeline for `person` as of `today`.
    ///
    /// Every expected stack appears in natural order even when empty.
    /// Photos classify into exactly one stack; photos in buckets past
    /// today's expected set (future-dated imports) are appended after, and
    /// pre-birth photos are only counted when pregnancy tracking is off.
    pub fn build_timeline(
        &self,
        person: &DomainPerson,
        photos: &[DomainPhoto],
        today: NaiveDate,
    ) -> StackTimeline {
        info!(
            "Building timeline for {} with {} photos as of {}",
            person.id,
            photos.len(),
            today
        );

        let expected = self.stacks.expected_stacks(person, today);

        let mut sorted: Vec<&DomainPhoto> = photos.iter().collect();
        sorted.sort_by(|a, b| a.date_taken.cmp(&b.date_taken).then(a.id.cmp(&b.id)));

        let mut by_stack: HashMap<Stack, Vec<&DomainPhoto>> = HashMap::new();
        let mut excluded_photo_count = 0;
        for photo in sorted {
            match self.stacks.section_for_photo(photo.date_taken, person) {
                Some(stack) => by_stack.entry(stack).or_default().push(photo),
                None => {
                    debug!("Excluding pre-birth photo {} (tracking off)", photo.id);
                    excluded_photo_count += 1;
                }
            }
        }

        // Photos can land past today's expected set; keep them, ordered by
        // their range start
        let mut order = expected;
        let mut extras: Vec<Stack> = by_stack
            .keys()
            .filter(|stack| !order.contains(*stack))
            .copied()
            .collect();
        extras.sort_by_key(|stack| {
            self.stacks
                .date_range_for_stack(*stack, person)
                .map(|range| range.start)
                .unwrap_or(today)
        });
        order.extend(extras);

        let stacks = order
            .iter()
            .map(|stack| self.build_stack(*stack, person, &by_stack, today))
            .collect::<Vec<_>>();

        debug!(
            "Timeline for {}: {} stacks, {} excluded photos",
            person.id,
            stacks.len(),
            excluded_photo_count
        );

        StackTimeline {
            person: PersonMapper::to_dto(person),
            generated_on: today.format(DATE_FORMAT).to_string(),
            stacks,
            excluded_photo_count,
        }
    }

    fn build_stack(
        &self,
        stack: Stack,
        person: &DomainPerson,
        by_stack: &HashMap<Stack, Vec<&DomainPhoto>>,
        today: NaiveDate,
    ) -> PhotoStack {
        let range = match self.stacks.date_range_for_stack(stack, person) {
            Ok(range) => range,
            Err(err) => {
                // Callers get today's date rather than a hard failure
                warn!("No date range for stack '{}': {}", stack, err);
                crate::domain::stack_service::DateRange { start: today, end: today }
            }
        };

        let photos = by_stack
            .get(&stack)
            .map(|photos| {
                photos
                    .iter()
                    .map(|photo| StackPhoto {
                        id: photo.id.clone(),
                        date_taken: photo.date_taken.format(DATE_FORMAT).to_string(),
                        age_caption: self.ages.format_age(person, photo.date_taken),
                    })
                    .collect()
            })
            .unwrap_or_default();

        PhotoStack {
            name: stack.to_string(),
            start_date: range.start.format(DATE_FORMAT).to_string(),
            end_date: range.end.format(DATE_FORMAT).to_string(),
            photos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::person::{AgeFormat, BirthMonthsDisplay, PregnancyTracking};
    use chrono::Utc;

    fn test_person(tracking: PregnancyTracking) -> DomainPerson {
        let now = Utc::now();
        DomainPerson {
            id: DomainPerson::generate_id(1702516122000),
            name: "Emma".to_string(),
            date_of_birth: date("2020-01-15"),
            birth_months_display: BirthMonthsDisplay::TwelveMonths,
            pregnancy_tracking: tracking,
            age_format: AgeFormat::Full,
            created_at: now,
            updated_at: now,
        }
    }

    fn test_photo(id: u64, person: &DomainPerson, taken: &str) -> DomainPhoto {
        DomainPhoto {
            id: DomainPhoto::generate_id(id),
            person_id: person.id.clone(),
            date_taken: date(taken),
            created_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_timeline_includes_empty_placeholders() {
        let service = TimelineService::new();
        let person = test_person(PregnancyTracking::None);
        let photos = vec![test_photo(1, &person, "2020-04-20")];

        let timeline = service.build_timeline(&person, &photos, date("2020-06-20"));

        let stack_names: Vec<&str> = timeline.stacks.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            stack_names,
            ["Birth Month", "1 Month", "2 Months", "3 Months", "4 Months", "5 Months"]
        );
        // Only "3 Months" holds the photo, the rest are placeholders
        for stack in &timeline.stacks {
            let expected = if stack.name == "3 Months" { 1 } else { 0 };
            assert_eq!(stack.photos.len(), expected, "stack {}", stack.name);
        }
    }

    #[test]
    fn test_timeline_photo_captions_and_order() {
        let service = TimelineService::new();
        let person = test_person(PregnancyTracking::None);
        let photos = vec![
            test_photo(2, &person, "2020-04-25"),
            test_photo(1, &person, "2020-04-18"),
            test_photo(3, &person, "2020-01-15"),
        ];

        let timeline = service.build_timeline(&person, &photos, date("2020-06-20"));

        let birth_month = &timeline.stacks[0];
        assert_eq!(birth_month.name, "Birth Month");
        assert_eq!(birth_month.photos.len(), 1);
        assert_eq!(birth_month.photos[0].age_caption, "Newborn");

        let three_months = timeline.stacks.iter().find(|s| s.name == "3 Months").unwrap();
        assert_eq!(three_months.photos.len(), 2);
        // Oldest first within a stack
        assert_eq!(three_months.photos[0].date_taken, "2020-04-18");
        assert_eq!(three_months.photos[1].date_taken, "2020-04-25");
        assert_eq!(three_months.photos[0].age_caption, "3 months");
    }

    #[test]
    fn test_timeline_excludes_prebirth_photos_when_tracking_off() {
        let service = TimelineService::new();
        let person = test_person(PregnancyTracking::None);
        let photos = vec![
            test_photo(1, &person, "2019-11-01"),
            test_photo(2, &person, "2020-02-01"),
        ];

        let timeline = service.build_timeline(&person, &photos, date("2020-06-20"));

        assert_eq!(timeline.excluded_photo_count, 1);
        let total: usize = timeline.stacks.iter().map(|s| s.photos.len()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_timeline_buckets_pregnancy_photos() {
        let service = TimelineService::new();
        let person = test_person(PregnancyTracking::Weeks);
        let photos = vec![test_photo(1, &person, "2019-11-01")];

        let timeline = service.build_timeline(&person, &photos, date("2020-06-20"));

        assert_eq!(timeline.excluded_photo_count, 0);
        let week_thirty = timeline.stacks.iter().find(|s| s.name == "Week 30").unwrap();
        assert_eq!(week_thirty.photos.len(), 1);
        assert_eq!(week_thirty.photos[0].age_caption, "30 weeks pregnant");
    }

    #[test]
    fn test_timeline_appends_future_buckets() {
        let service = TimelineService::new();
        let person = test_person(PregnancyTracking::None);
        // Photo dated past "today": its bucket is not in the expected set
        let photos = vec![test_photo(1, &person, "2021-03-01")];

        let timeline = service.build_timeline(&person, &photos, date("2020-06-20"));

        let last = timeline.stacks.last().unwrap();
        assert_eq!(last.name, "1 Year");
        assert_eq!(last.photos.len(), 1);
    }

    #[test]
    fn test_get_timeline_for_person_orchestration() {
        use crate::domain::commands::person::{AddPhotoCommand, CreatePersonCommand};
        use crate::storage::yaml::test_utils::TestEnvironment;
        use std::sync::Arc;

        let env = TestEnvironment::new().unwrap();
        let person_service = PersonService::new(Arc::new(env.connection.clone()));
        let service = TimelineService::new();

        let created = person_service
            .create_person(CreatePersonCommand {
                name: "Emma".to_string(),
                date_of_birth: "2020-01-15".to_string(),
                birth_months_display: BirthMonthsDisplay::TwelveMonths,
                pregnancy_tracking: PregnancyTracking::None,
                age_format: AgeFormat::Full,
            })
            .unwrap();
        person_service
            .add_photo(AddPhotoCommand {
                person_id: created.person.id.clone(),
                date_taken: "2020-04-18".to_string(),
                photo_id: None,
            })
            .unwrap();

        let timeline = service
            .get_timeline_for_person(
                TimelineQuery {
                    person_id: created.person.id.clone(),
                    as_of: Some("2020-06-20".to_string()),
                },
                &person_service,
            )
            .unwrap();

        assert_eq!(timeline.person.id, created.person.id);
        assert_eq!(timeline.stacks.len(), 6);
        let total: usize = timeline.stacks.iter().map(|s| s.photos.len()).sum();
        assert_eq!(total, 1);

        // Unknown person surfaces as an error, not an empty timeline
        assert!(service
            .get_timeline_for_person(
                TimelineQuery { person_id: "person::0".to_string(), as_of: None },
                &person_service,
            )
            .is_err());
    }

    #[test]
    fn test_timeline_dto_dates_are_iso() {
        let service = TimelineService::new();
        let person = test_person(PregnancyTracking::None);

        let timeline = service.build_timeline(&person, &[], date("2020-06-20"));

        assert_eq!(timeline.generated_on, "2020-06-20");
        assert_eq!(timeline.person.date_of_birth, "2020-01-15");
        assert_eq!(timeline.stacks[0].start_date, "2020-01-15");
        assert_eq!(timeline.stacks[0].end_date, "2020-02-15");
    }
}
