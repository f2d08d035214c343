use crate::types::traits::types::{DateRange, Month, Year};
use crate::types::traits::utils::parse_calendar_date;
use chrono::{NaiveDate, NaiveDateTime};

/// Anything that can be resolved to an inclusive span of calendar dates.
///
/// Used for the bounds of a series request: the start bound takes the start of
/// the resolved span and the end bound takes its end, so `Year(2030)` as an end
/// bound reaches through 2030-12-31.
pub trait AnyDate {
    fn get_date_range(self) -> Option<DateRange>;
}

impl AnyDate for NaiveDate {
    fn get_date_range(self) -> Option<DateRange> {
        Some(DateRange {
            start: self,
            end: self,
        })
    }
}

impl AnyDate for NaiveDateTime {
    fn get_date_range(self) -> Option<DateRange> {
        self.date().get_date_range()
    }
}

impl AnyDate for &str {
    fn get_date_range(self) -> Option<DateRange> {
        parse_calendar_date(self)?.get_date_range()
    }
}

impl AnyDate for String {
    fn get_date_range(self) -> Option<DateRange> {
        self.as_str().get_date_range()
    }
}

impl AnyDate for Year {
    fn get_date_range(self) -> Option<DateRange> {
        Some(DateRange {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl AnyDate for Month {
    fn get_date_range(self) -> Option<DateRange> {
        Some(DateRange {
            start: self.first_day()?,
            end: self.last_day()?,
        })
    }
}

impl AnyDate for DateRange {
    fn get_date_range(self) -> Option<DateRange> {
        Some(self)
    }
}
