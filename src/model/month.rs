//! Calendar-month arithmetic for the month selector.

use crate::Result;
use anyhow::{bail, Context};
use chrono::{Datelike, Locale, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar month of a specific year, e.g. March 2024.
///
/// Displays and parses as `YYYY-MM`.
///
/// ```
/// # use gofinances::model::Month;
/// let december = Month::new(2023, 12).unwrap();
/// assert_eq!(december.next().to_string(), "2024-01");
/// assert_eq!(december.next().prev(), december);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Month {
    year: i32,
    /// 1 through 12.
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("Month must be between 1 and 12, got {month}");
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("Year {year} is out of range"))?;
        Ok(Self { year, month })
    }

    /// The month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves `n` months forward, or backward when `n` is negative, rolling the year over.
    pub fn add(&self, n: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(n);
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) + 1;
        Self {
            year: year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            month: month as u32,
        }
    }

    pub fn next(&self) -> Self {
        self.add(1)
    }

    pub fn prev(&self) -> Self {
        self.add(-1)
    }

    /// Returns true if `date` falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month as people read it, e.g. `março, 2024`.
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format_localized("%B, %Y", Locale::pt_BR).to_string(),
            None => self.to_string(),
        }
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .with_context(|| format!("Expected a month like 2024-03, got '{s}'"))?;
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in '{s}'"))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month in '{s}'"))?;
        Month::new(year, month)
    }
}

impl Serialize for Month {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Month::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(year: i32, month: u32) -> Month {
        Month::new(year, month).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(Month::new(2024, 0).is_err());
        assert!(Month::new(2024, 13).is_err());
    }

    #[test]
    fn test_next_rolls_year_over() {
        assert_eq!(m(2023, 12).next(), m(2024, 1));
        assert_eq!(m(2024, 3).next(), m(2024, 4));
    }

    #[test]
    fn test_prev_rolls_year_back() {
        assert_eq!(m(2024, 1).prev(), m(2023, 12));
        assert_eq!(m(2024, 3).prev(), m(2024, 2));
    }

    #[test]
    fn test_add_many() {
        assert_eq!(m(2024, 3).add(12), m(2025, 3));
        assert_eq!(m(2024, 3).add(-15), m(2022, 12));
        assert_eq!(m(2024, 3).add(0), m(2024, 3));
    }

    #[test]
    fn test_contains() {
        let march = m(2024, 3);
        assert!(march.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()));
    }

    #[test]
    fn test_parse_and_display() {
        let month: Month = "2024-03".parse().unwrap();
        assert_eq!(month, m(2024, 3));
        assert_eq!(month.to_string(), "2024-03");
        assert_eq!("2024-3".parse::<Month>().unwrap(), m(2024, 3));
        assert!("2024".parse::<Month>().is_err());
        assert!("2024-xx".parse::<Month>().is_err());
        assert!("2024-13".parse::<Month>().is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(m(2024, 3).label(), "março, 2024");
        assert_eq!(m(2021, 4).label(), "abril, 2021");
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&m(2024, 3)).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m(2024, 3));
    }
}
