use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A receipt's transaction date with one canonical display form:
/// `"{day} {Month} {year}"`, e.g. "15 June 2024". The day is unpadded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReceiptDate(NaiveDate);

impl ReceiptDate {
    /// Returns `None` for invalid calendar dates (month 13, day 32, …).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(ReceiptDate)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    fn month_name(self) -> &'static str {
        const MONTHS: [&str; 12] = [
            "January", "February", "March", "April", "May", "June",
            "July", "August", "September", "October", "November", "December",
        ];
        MONTHS[self.0.month0() as usize]
    }
}

impl From<NaiveDate> for ReceiptDate {
    fn from(d: NaiveDate) -> Self {
        ReceiptDate(d)
    }
}

impl fmt::Display for ReceiptDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.0.day(), self.month_name(), self.0.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_display() {
        let d = ReceiptDate::from_ymd(2024, 6, 15).unwrap();
        assert_eq!(d.to_string(), "15 June 2024");
    }

    #[test]
    fn single_digit_day_unpadded() {
        let d = ReceiptDate::from_ymd(2024, 3, 5).unwrap();
        assert_eq!(d.to_string(), "5 March 2024");
    }

    #[test]
    fn rejects_invalid_calendar_dates() {
        assert!(ReceiptDate::from_ymd(2024, 13, 1).is_none());
        assert!(ReceiptDate::from_ymd(2024, 2, 30).is_none());
        assert!(ReceiptDate::from_ymd(2024, 4, 31).is_none());
    }

    #[test]
    fn leap_day_accepted() {
        assert_eq!(
            ReceiptDate::from_ymd(2024, 2, 29).unwrap().to_string(),
            "29 February 2024"
        );
    }
}
