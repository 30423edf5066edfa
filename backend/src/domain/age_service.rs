//! Age calculation for timeline captions and bucket classification.
//!
//! Everything here is pure date arithmetic over the proleptic Gregorian
//! calendar: no ambient clock, no locale, no shared state. Callers pass the
//! evaluation date explicitly so results are reproducible.

use chrono::{Datelike, Months, NaiveDate};

use crate::domain::models::person::{AgeFormat, Person};

/// A full-term pregnancy in whole weeks; week counts are measured backwards
/// from the birth date.
pub const FULL_TERM_WEEKS: i64 = 40;

/// Exact age of a person at a specific date, decomposed the way the display
/// layer needs it. Computed fresh on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactAge {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    /// True when the evaluated date precedes the birth date
    pub is_pregnancy: bool,
    /// Pregnancy week 0-40; valid only when `is_pregnancy` is true
    pub pregnancy_weeks: u32,
    /// True at age exactly zero, or at pregnancy week 40
    pub is_newborn: bool,
}

impl ExactAge {
    /// Age in whole months, used by the month-bucket classification
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

/// Service computing exact ages and their human-readable captions
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeService;

impl AgeService {
    /// Create a new AgeService instance
    pub fn new() -> Self {
        Self
    }

    /// Compute the exact age of `person` on `on`.
    ///
    /// Dates before the birth date land in the pregnancy branch: the week
    /// count is 40 minus the whole weeks remaining until birth, clamped to
    /// 0-40. There are no error cases; pathological inputs clamp to the
    /// nearest boundary value.
    pub fn calculate(&self, person: &Person, on: NaiveDate) -> ExactAge {
        if on < person.date_of_birth {
            let weeks_before_birth = (person.date_of_birth - on).num_days() / 7;
            let weeks = (FULL_TERM_WEEKS - weeks_before_birth).clamp(0, FULL_TERM_WEEKS) as u32;
            return ExactAge {
                years: 0,
                months: 0,
                days: 0,
                is_pregnancy: true,
                pregnancy_weeks: weeks,
                is_newborn: weeks == FULL_TERM_WEEKS as u32,
            };
        }

        let (years, months, days) = self.calendar_diff(person.date_of_birth, on);
        ExactAge {
            years,
            months,
            days,
            is_pregnancy: false,
            pregnancy_weeks: 0,
            is_newborn: years == 0 && months == 0 && days == 0,
        }
    }

    /// Render the age of `person` on `on` as a caption string.
    ///
    /// The first year of life always renders in months ("3 months",
    /// "Less than 1 month") regardless of the configured `AgeFormat`; the
    /// format only selects components once the person is a year old.
    pub fn format_age(&self, person: &Person, on: NaiveDate) -> String {
        let age = self.calculate(person, on);

        if age.is_pregnancy {
            return if age.pregnancy_weeks == FULL_TERM_WEEKS as u32 {
                "Newborn".to_string()
            } else if age.pregnancy_weeks > 0 {
                format!(
                    "{} week{} pregnant",
                    age.pregnancy_weeks,
                    if age.pregnancy_weeks == 1 { "" } else { "s" }
                )
            } else {
                "Before pregnancy".to_string()
            };
        }

        if age.is_newborn {
            return "Newborn".to_string();
        }

        if age.years == 0 {
            return if age.months > 0 {
                format!("{} month{}", age.months, if age.months == 1 { "" } else { "s" })
            } else {
                "Less than 1 month".to_string()
            };
        }

        let mut parts: Vec<String> = Vec::new();
        match person.age_format {
            AgeFormat::Full => {
                if age.years > 0 {
                    parts.push(unit(age.years, "year"));
                }
                if age.months > 0 {
                    parts.push(unit(age.months, "month"));
                }
                if age.days > 0 || parts.is_empty() {
                    parts.push(unit(age.days, "day"));
                }
            }
            AgeFormat::YearMonth => {
                if age.years > 0 {
                    parts.push(unit(age.years, "year"));
                }
                if age.months > 0 || parts.is_empty() {
                    parts.push(unit(age.months, "month"));
                }
            }
            AgeFormat::YearOnly => {
                parts.push(unit(age.years, "year"));
            }
        }
        parts.join(", ")
    }

    /// Whole-unit (years, months, days) difference between two dates,
    /// `from` <= `to`, with the same borrowing rules as civil calendar
    /// subtraction.
    ///
    /// The day component is the distance from `from` plus the whole months
    /// elapsed (end-of-month clamped) to `to`, so month-end birth dates stay
    /// exact across short months.
    fn calendar_diff(&self, from: NaiveDate, to: NaiveDate) -> (u32, u32, u32) {
        let mut whole_months =
            (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
        if to.day() < from.day() {
            whole_months -= 1;
        }
        let whole_months = whole_months.max(0) as u32;

        let anchor = from
            .checked_add_months(Months::new(whole_months))
            .unwrap_or(from);
        let days = (to - anchor).num_days().max(0) as u32;

        (whole_months / 12, whole_months % 12, days)
    }
}

fn unit(n: u32, name: &str) -> String {
    if n == 1 {
        format!("1 {}", name)
    } else {
        format!("{} {}s", n, name)
    }
}
