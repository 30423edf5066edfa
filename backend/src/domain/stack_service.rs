//! Bucket classification and enumeration for the photo timeline.
//!
//! Maps photo dates to named life-stage buckets ("stacks") relative to a
//! person's birth date and display configuration, enumerates the complete
//! ordered bucket list as of a given day so the UI can render empty
//! placeholders, and maps bucket names back to their date ranges for
//! section headers.

use chrono::{Days, Months, NaiveDate};
use log::warn;

use crate::domain::age_service::{AgeService, FULL_TERM_WEEKS};
use crate::domain::models::person::{BirthMonthsDisplay, Person, PregnancyTracking};
use crate::domain::models::stack::{Stack, StackError};

/// Length of the pregnancy interval used for trimester and week ranges,
/// measured backwards from the birth date.
const PREGNANCY_MONTHS: u32 = 9;

/// Half-open date interval covered by a stack: `start` inclusive, `end`
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Service resolving photo dates to stacks and stacks to date ranges
#[derive(Debug, Clone, Copy, Default)]
pub struct StackService {
    ages: AgeService,
}

impl StackService {
    /// Create a new StackService instance
    pub fn new() -> Self {
        Self { ages: AgeService::new() }
    }

    /// Classify a photo date into exactly one stack.
    ///
    /// Returns `None` only for pre-birth photos when pregnancy tracking is
    /// off; those photos are excluded from display. The first calendar month
    /// of life is always "Birth Month", regardless of the monthly-display
    /// mode, so month zero never renders as "0 Months" in the normal case.
    pub fn section_for_photo(&self, photo_date: NaiveDate, person: &Person) -> Option<Stack> {
        let age = self.ages.calculate(person, photo_date);

        if age.is_pregnancy {
            return match person.pregnancy_tracking {
                PregnancyTracking::None => None,
                PregnancyTracking::Trimesters => {
                    let trimester = ((age.pregnancy_weeks as i64 - 1) / 13 + 1).clamp(1, 3);
                    Some(Stack::Trimester(trimester as u32))
                }
                PregnancyTracking::Weeks => Some(Stack::Week(age.pregnancy_weeks)),
            };
        }

        // Birth month wins over month/year bucketing
        if photo_date < add_months(person.date_of_birth, 1) {
            return Some(Stack::BirthMonth);
        }

        let months = age.total_months();
        Some(match person.birth_months_display {
            BirthMonthsDisplay::None => {
                if age.years == 0 {
                    Stack::BirthYear
                } else {
                    Stack::Year(age.years)
                }
            }
            BirthMonthsDisplay::TwelveMonths => {
                if months < 12 {
                    Stack::Month(months)
                } else {
                    Stack::Year(age.years)
                }
            }
            BirthMonthsDisplay::TwentyFourMonths => {
                if months < 24 {
                    Stack::Month(months)
                } else {
                    Stack::Year(age.years)
                }
            }
        })
    }

    /// Enumerate every stack that should exist for `person` as of `today`,
    /// in natural timeline order (pregnancy ascending, then birth, months
    /// and years ascending). Empty stacks are included so the UI can render
    /// placeholders.
    pub fn expected_stacks(&self, person: &Person, today: NaiveDate) -> Vec<Stack> {
        let mut stacks = Vec::new();
        let dob = person.date_of_birth;
        let pregnancy_start = sub_months(dob, PREGNANCY_MONTHS);
        // Pregnancy buckets stop appearing once birth (or today) is reached
        let cutoff = dob.min(today);

        match person.pregnancy_tracking {
            PregnancyTracking::None => {}
            PregnancyTracking::Trimesters => {
                let third = (dob - pregnancy_start).num_days() / 3;
                for trimester in 1..=3u32 {
                    let start = add_days(pregnancy_start, (trimester as i64 - 1) * third);
                    if start < cutoff {
                        stacks.push(Stack::Trimester(trimester));
                    }
                }
            }
            PregnancyTracking::Weeks => {
                for week in 1..=FULL_TERM_WEEKS as u32 {
                    let start = add_days(pregnancy_start, (week as i64 - 1) * 7);
                    if start < cutoff {
                        stacks.push(Stack::Week(week));
                    }
                }
            }
        }

        if dob > today {
            return stacks;
        }

        let age = self.ages.calculate(person, today);
        let months = age.total_months();
        let years = age.years;

        match person.birth_months_display {
            BirthMonthsDisplay::None => {
                stacks.push(Stack::BirthYear);
                for year in 1..=years {
                    stacks.push(Stack::Year(year));
                }
            }
            BirthMonthsDisplay::TwelveMonths => {
                stacks.push(Stack::BirthMonth);
                for month in 1..=months.min(11) {
                    stacks.push(Stack::Month(month));
                }
                if months >= 12 {
                    stacks.push(Stack::Year(1));
                    if years > 1 {
                        for year in 2..=years {
                            stacks.push(Stack::Year(year));
                        }
                    }
                }
            }
            BirthMonthsDisplay::TwentyFourMonths => {
                stacks.push(Stack::BirthMonth);
                for month in 1..=months.min(23) {
                    stacks.push(Stack::Month(month));
                }
                if years >= 2 {
                    for year in 2..=years {
                        stacks.push(Stack::Year(year));
                    }
                }
            }
        }

        stacks
    }

    /// Resolve the half-open date range a stack covers for `person`.
    ///
    /// Degenerate variants that the classifier and enumerator never produce
    /// (`Trimester(0)`, `Week(41)`, `Month(0)`, `Year(0)`, ...) fail with
    /// `InvalidSection`, same as an unparseable name.
    pub fn date_range_for_stack(&self, stack: Stack, person: &Person) -> Result<DateRange, StackError> {
        let dob = person.date_of_birth;
        let pregnancy_start = sub_months(dob, PREGNANCY_MONTHS);

        match stack {
            Stack::Pregnancy => Ok(DateRange { start: pregnancy_start, end: dob }),
            Stack::Trimester(t @ 1..=3) => {
                let third = (dob - pregnancy_start).num_days() / 3;
                let start = add_days(pregnancy_start, (t as i64 - 1) * third);
                let end = if t == 3 { dob } else { add_days(pregnancy_start, t as i64 * third) };
                Ok(DateRange { start, end })
            }
            Stack::Week(n) if n >= 1 && n <= FULL_TERM_WEEKS as u32 => {
                // Anchored so the range inverts the week formula
                // (40 - whole weeks before birth); a 9-month interval is
                // only ~39.3 weeks, so week 1 opens a few days before it
                let anchor = add_days(dob, -(FULL_TERM_WEEKS * 7 - 1));
                let start = add_days(anchor, (n as i64 - 1) * 7);
                Ok(DateRange { start, end: add_days(start, 7).min(dob) })
            }
            Stack::BirthMonth => Ok(DateRange { start: dob, end: add_months(dob, 1) }),
            Stack::BirthYear => Ok(DateRange { start: dob, end: add_months(dob, 12) }),
            Stack::Month(n) if n >= 1 => Ok(DateRange {
                start: add_months(dob, n),
                end: add_months(dob, n + 1),
            }),
            Stack::Year(n) if n >= 1 => Ok(DateRange {
                start: add_months(dob, 12 * n),
                end: add_months(dob, 12 * (n + 1)),
            }),
            _ => Err(StackError::InvalidSection(stack.to_string())),
        }
    }

    /// Resolve a bucket name to its date range. This is the string-in entry
    /// point for UI section headers; anything outside the fixed vocabulary
    /// fails with `InvalidSection` and the caller decides the fallback.
    pub fn date_range_for_name(&self, name: &str, person: &Person) -> Result<DateRange, StackError> {
        let stack: Stack = name.parse().map_err(|e| {
            warn!("Rejected unknown section name: '{}'", name);
            e
        })?;
        self.date_range_for_stack(stack, person)
    }
}

/// Month addition with end-of-month clamping; falls back to the input date
/// on calendar overflow rather than failing.
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64)).unwrap_or(date)
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs())).unwrap_or(date)
    }
}
