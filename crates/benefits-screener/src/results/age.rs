use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::HouseholdMember;

/// Calendar month against which member ages are computed.
///
/// Every age-dependent predicate takes this explicitly so results do not drift with the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceMonth {
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceMonthError {
    #[error("month {0} is outside 1..=12")]
    MonthOutOfRange(u32),
    #[error("'{0}' is not a YYYY-MM month")]
    Malformed(String),
}

impl ReferenceMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ReferenceMonthError> {
        if !(1..=12).contains(&month) {
            return Err(ReferenceMonthError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    pub fn current() -> Self {
        Self::from(Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }
}

impl From<NaiveDate> for ReferenceMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl FromStr for ReferenceMonth {
    type Err = ReferenceMonthError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let malformed = || ReferenceMonthError::Malformed(trimmed.to_string());
        let (year, month) = trimmed.split_once('-').ok_or_else(malformed)?;
        let year = year.parse::<i32>().map_err(|_| malformed())?;
        let month = month.parse::<u32>().map_err(|_| malformed())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for ReferenceMonth {
    type Error = ReferenceMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReferenceMonth> for String {
    fn from(value: ReferenceMonth) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ReferenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Age in whole years at `as_of`, from birth month and year.
///
/// Returns `None` without a birth year or when the birth lies after `as_of`. A missing or
/// out-of-range birth month falls back to a year-only difference.
pub fn age_at(
    birth_year: Option<i32>,
    birth_month: Option<u32>,
    as_of: ReferenceMonth,
) -> Option<u32> {
    let birth_year = birth_year?;
    let mut years = i64::from(as_of.year) - i64::from(birth_year);

    if let Some(month) = birth_month.filter(|month| (1..=12).contains(month)) {
        if as_of.month < month {
            years -= 1;
        }
    }

    u32::try_from(years).ok()
}

pub fn member_age(member: &HouseholdMember, as_of: ReferenceMonth) -> Option<u32> {
    age_at(member.birth_year, member.birth_month, as_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_2025() -> ReferenceMonth {
        ReferenceMonth::new(2025, 6).expect("valid month")
    }

    #[test]
    fn birthday_month_counts_as_reached() {
        assert_eq!(age_at(Some(2006), Some(6), june_2025()), Some(19));
        assert_eq!(age_at(Some(2006), Some(7), june_2025()), Some(18));
    }

    #[test]
    fn missing_birth_data_has_no_age() {
        assert_eq!(age_at(None, Some(3), june_2025()), None);
        assert_eq!(age_at(None, None, june_2025()), None);
    }

    #[test]
    fn missing_or_invalid_month_uses_year_difference() {
        assert_eq!(age_at(Some(2000), None, june_2025()), Some(25));
        assert_eq!(age_at(Some(2000), Some(0), june_2025()), Some(25));
        assert_eq!(age_at(Some(2000), Some(14), june_2025()), Some(25));
    }

    #[test]
    fn future_births_have_no_age() {
        assert_eq!(age_at(Some(2025), Some(9), june_2025()), None);
        assert_eq!(age_at(Some(2031), None, june_2025()), None);
    }

    #[test]
    fn parses_and_displays_year_month() {
        let month: ReferenceMonth = "2024-03".parse().expect("parses");
        assert_eq!(month, ReferenceMonth::new(2024, 3).expect("valid"));
        assert_eq!(month.to_string(), "2024-03");
        assert!(matches!(
            "2024".parse::<ReferenceMonth>(),
            Err(ReferenceMonthError::Malformed(_))
        ));
        assert_eq!(
            "2024-00".parse::<ReferenceMonth>(),
            Err(ReferenceMonthError::MonthOutOfRange(0))
        );
    }
}
