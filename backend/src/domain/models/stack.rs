//! The closed vocabulary of life-stage buckets ("stacks") that photos are
//! classified into. Every bucket name a caller can see comes from the
//! `Display` impl here, and `FromStr` is the only parser, so the two cannot
//! drift apart.

use std::fmt;
use std::str::FromStr;

/// A named life-stage bucket on a person's timeline.
///
/// `Pregnancy` covers the whole pre-birth interval and exists for date-range
/// headers only; classification always produces one of the finer-grained
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stack {
    Pregnancy,
    /// Trimester number, 1 through 3
    Trimester(u32),
    /// Pregnancy week, 1 through 40 (0 can occur for dates more than 40
    /// weeks before birth; it is never enumerated)
    Week(u32),
    BirthMonth,
    BirthYear,
    /// Whole months of age, used while the person is under the configured
    /// monthly-display horizon
    Month(u32),
    /// Whole years of age
    Year(u32),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    #[error("invalid section name: {0}")]
    InvalidSection(String),
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stack::Pregnancy => write!(f, "Pregnancy"),
            Stack::Trimester(1) => write!(f, "First Trimester"),
            Stack::Trimester(2) => write!(f, "Second Trimester"),
            Stack::Trimester(3) => write!(f, "Third Trimester"),
            Stack::Trimester(n) => write!(f, "Trimester {}", n),
            Stack::Week(n) => write!(f, "Week {}", n),
            Stack::BirthMonth => write!(f, "Birth Month"),
            Stack::BirthYear => write!(f, "Birth Year"),
            Stack::Month(1) => write!(f, "1 Month"),
            Stack::Month(n) => write!(f, "{} Months", n),
            Stack::Year(1) => write!(f, "1 Year"),
            Stack::Year(n) => write!(f, "{} Years", n),
        }
    }
}

impl FromStr for Stack {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pregnancy" => return Ok(Stack::Pregnancy),
            "First Trimester" => return Ok(Stack::Trimester(1)),
            "Second Trimester" => return Ok(Stack::Trimester(2)),
            "Third Trimester" => return Ok(Stack::Trimester(3)),
            "Birth Month" => return Ok(Stack::BirthMonth),
            "Birth Year" => return Ok(Stack::BirthYear),
            _ => {}
        }
        let invalid = || StackError::InvalidSection(s.to_string());
        if let Some(rest) = s.strip_prefix("Week ") {
            let n = rest.parse::<u32>().map_err(|_| invalid())?;
            return Ok(Stack::Week(n));
        }
        if let Some(num) = s.strip_suffix(" Months").or_else(|| s.strip_suffix(" Month")) {
            let n = num.parse::<u32>().map_err(|_| invalid())?;
            return Ok(Stack::Month(n));
        }
        if let Some(num) = s.strip_suffix(" Years").or_else(|| s.strip_suffix(" Year")) {
            let n = num.parse::<u32>().map_err(|_| invalid())?;
            return Ok(Stack::Year(n));
        }
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_vocabulary() {
        assert_eq!(Stack::Trimester(1).to_string(), "First Trimester");
        assert_eq!(Stack::Week(14).to_string(), "Week 14");
        assert_eq!(Stack::BirthMonth.to_string(), "Birth Month");
        assert_eq!(Stack::BirthYear.to_string(), "Birth Year");
        assert_eq!(Stack::Month(1).to_string(), "1 Month");
        assert_eq!(Stack::Month(3).to_string(), "3 Months");
        assert_eq!(Stack::Year(1).to_string(), "1 Year");
        assert_eq!(Stack::Year(2).to_string(), "2 Years");
    }

    #[test]
    fn test_parse_known_names() {
        assert_eq!("Pregnancy".parse::<Stack>().unwrap(), Stack::Pregnancy);
        assert_eq!("Second Trimester".parse::<Stack>().unwrap(), Stack::Trimester(2));
        assert_eq!("Week 40".parse::<Stack>().unwrap(), Stack::Week(40));
        assert_eq!("Birth Month".parse::<Stack>().unwrap(), Stack::BirthMonth);
        assert_eq!("1 Month".parse::<Stack>().unwrap(), Stack::Month(1));
        assert_eq!("23 Months".parse::<Stack>().unwrap(), Stack::Month(23));
        assert_eq!("5 Years".parse::<Stack>().unwrap(), Stack::Year(5));
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        for bad in ["Not A Bucket", "", "Week x", "Months", "Trimester", "12", "Year 5"] {
            assert_eq!(
                bad.parse::<Stack>(),
                Err(StackError::InvalidSection(bad.to_string())),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_display_parse_round_trip() {
        let stacks = [
            Stack::Pregnancy,
            Stack::Trimester(3),
            Stack::Week(1),
            Stack::BirthMonth,
            Stack::BirthYear,
            Stack::Month(11),
            Stack::Year(18),
        ];
        for stack in stacks {
            assert_eq!(stack.to_string().parse::<Stack>().unwrap(), stack);
        }
    }
}
