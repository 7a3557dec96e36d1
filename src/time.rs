//! Calendar dates and Julian day numbers.
//!
//! All dates are proleptic Gregorian in UTC. The integer Julian Day Number (JDN)
//! counts days since 4713 BC (proleptic Julian calendar) and changes at noon UTC,
//! so 2000-01-01 has JDN 2451545 and 2000-01-01T12:00Z is Julian date 2451545.0.

use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::{Datelike, TimeZone, Timelike};

/// Julian Day Number of 2000-01-01 (the J2000.0 epoch is noon of that day).
pub const J2000_JDN: i64 = 2_451_545;

const HOURS_PER_DAY: f64 = 24.0;
const MINUTES_PER_DAY: f64 = 1_440.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Calculates the Julian Day Number of a calendar date.
///
/// `month` is 1-based. No validation is performed: the formula is total, and
/// out-of-range inputs give a numerically valid but meaningless number.
///
/// # Example
/// ```
/// # use daylength::time::julian_day_number;
/// assert_eq!(julian_day_number(2000, 1, 1), 2_451_545);
/// assert_eq!(julian_day_number(2012, 1, 1), 2_455_928);
/// ```
#[must_use]
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    let a = (14 - month).div_euclid(12);
    let y = i64::from(year) + 4800 - a;
    let m = month + 12 * a - 3;

    i64::from(day) + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4)
        - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Calculates the fractional Julian date of a UTC date and time of day.
///
/// Adds `(hour - 12)/24 + minute/1440 + second/86400` to the Julian Day Number.
/// Unchecked, like [`julian_day_number`].
#[must_use]
pub fn julian_date(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
    julian_day_number(year, month, day) as f64 + day_fraction(hour, minute, second)
}

fn day_fraction(hour: u32, minute: u32, second: f64) -> f64 {
    (f64::from(hour) - 12.0) / HOURS_PER_DAY
        + f64::from(minute) / MINUTES_PER_DAY
        + second / SECONDS_PER_DAY
}

/// Calculates the fractional Julian date of a timezone-aware instant.
///
/// The instant is converted to UTC first; sub-second precision is dropped.
#[cfg(feature = "chrono")]
#[must_use]
pub fn julian_date_from_datetime<Tz: TimeZone>(datetime: &chrono::DateTime<Tz>) -> f64 {
    let utc = datetime.with_timezone(&chrono::Utc);
    julian_date(
        utc.year(),
        utc.month(),
        utc.day(),
        utc.hour(),
        utc.minute(),
        f64::from(utc.second()),
    )
}

/// Whether `year` is a leap year in the proleptic Gregorian calendar.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`; zero for an invalid month.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Number of days in `year`: 366 for leap years, 365 otherwise.
#[must_use]
pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// A validated proleptic Gregorian calendar date (UTC).
///
/// # Example
/// ```
/// # use daylength::time::CalendarDate;
/// let date = CalendarDate::new(2012, 2, 28).unwrap();
/// assert_eq!(date.succ().unwrap(), CalendarDate::new(2012, 2, 29).unwrap());
/// assert!(CalendarDate::new(2013, 2, 29).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "DateParts", into = "DateParts")
)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Creates a calendar date.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the month is outside 1-12 or the day does not
    /// exist in that month (February 29 only in leap years).
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_date("month must be between 1 and 12"));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(Error::invalid_date("day is out of range for month"));
        }
        Ok(Self { year, month, day })
    }

    /// January 1st of `year`.
    #[must_use]
    pub const fn first_of_year(year: i32) -> Self {
        Self {
            year,
            month: 1,
            day: 1,
        }
    }

    /// Converts a Julian Day Number back to a calendar date.
    ///
    /// Uses the Richards form of the Fliegel-Van Flandern algorithm.
    ///
    /// # Errors
    /// Returns `InvalidDate` for negative day numbers or years outside `i32`.
    pub fn from_julian_day_number(jdn: i64) -> Result<Self> {
        if jdn < 0 {
            return Err(Error::invalid_date(
                "julian day number must not be negative",
            ));
        }
        if jdn > julian_day_number(i32::MAX, 12, 31) {
            return Err(Error::invalid_date("year is out of range"));
        }

        let f = jdn + 1401 + ((4 * jdn + 274_277).div_euclid(146_097) * 3).div_euclid(4) - 38;
        let e = 4 * f + 3;
        let g = e.rem_euclid(1461).div_euclid(4);
        let h = 5 * g + 2;
        let day = h.rem_euclid(153).div_euclid(5) + 1;
        let month = (h.div_euclid(153) + 2).rem_euclid(12) + 1;
        let year = e.div_euclid(1461) - 4716 + (14 - month).div_euclid(12);

        let year = i32::try_from(year)
            .map_err(|_| Error::invalid_date("year is out of range"))?;
        // day and month are bounded by the remainders above
        Ok(Self {
            year,
            month: month as u32,
            day: day as u32,
        })
    }

    /// The `ordinal`-th day of `year`, 1 being January 1st.
    ///
    /// # Errors
    /// Returns `InvalidDate` if `ordinal` is zero or past the end of the year.
    pub fn from_ordinal(year: i32, ordinal: u32) -> Result<Self> {
        if ordinal == 0 || ordinal > days_in_year(year) {
            return Err(Error::invalid_date("day of year is out of range"));
        }
        let mut day = ordinal;
        for month in 1..=12 {
            let length = days_in_month(year, month);
            if day <= length {
                return Ok(Self { year, month, day });
            }
            day -= length;
        }
        Err(Error::invalid_date("day of year is out of range"))
    }

    /// Creates the UTC calendar date of a timezone-aware instant.
    #[cfg(feature = "chrono")]
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(datetime: &chrono::DateTime<Tz>) -> Self {
        Self::from(datetime.with_timezone(&chrono::Utc).date_naive())
    }

    /// Converts to a chrono date, if chrono can represent the year.
    #[cfg(feature = "chrono")]
    #[must_use]
    pub const fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Day of month (1-31).
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Day of year, starting at 1 for January 1st.
    #[must_use]
    pub fn ordinal(&self) -> u32 {
        (1..self.month)
            .map(|m| days_in_month(self.year, m))
            .sum::<u32>()
            + self.day
    }

    /// Julian Day Number of this date.
    #[must_use]
    pub fn julian_day_number(&self) -> i64 {
        julian_day_number(self.year, self.month, self.day)
    }

    /// Fractional Julian date at the given UTC time of day.
    ///
    /// # Errors
    /// Returns `InvalidDate` if any time component is out of range.
    pub fn julian_date_at(&self, hour: u32, minute: u32, second: f64) -> Result<f64> {
        if hour > 23 {
            return Err(Error::invalid_date("hour must be between 0 and 23"));
        }
        if minute > 59 {
            return Err(Error::invalid_date("minute must be between 0 and 59"));
        }
        if !(0.0..60.0).contains(&second) {
            return Err(Error::invalid_date(
                "second must be between 0 and 59.999...",
            ));
        }
        Ok(self.julian_day_number() as f64 + day_fraction(hour, minute, second))
    }

    /// The following calendar day, or `None` past the last representable year.
    #[must_use]
    pub fn succ(&self) -> Option<Self> {
        if self.day < days_in_month(self.year, self.month) {
            Some(Self {
                day: self.day + 1,
                ..*self
            })
        } else if self.month < 12 {
            Some(Self {
                month: self.month + 1,
                day: 1,
                ..*self
            })
        } else {
            self.year.checked_add(1).map(Self::first_of_year)
        }
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for CalendarDate {
    fn from(date: chrono::NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct DateParts {
    year: i32,
    month: u32,
    day: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<DateParts> for CalendarDate {
    type Error = Error;

    fn try_from(parts: DateParts) -> Result<Self> {
        Self::new(parts.year, parts.month, parts.day)
    }
}

#[cfg(feature = "serde")]
impl From<CalendarDate> for DateParts {
    fn from(date: CalendarDate) -> Self {
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_epoch() {
        assert_eq!(julian_day_number(2000, 1, 1), J2000_JDN);
        assert_eq!(julian_date(2000, 1, 1, 12, 0, 0.0), 2_451_545.0);
        assert_eq!(julian_date(2000, 1, 1, 0, 0, 0.0), 2_451_544.5);
    }

    #[test]
    fn test_known_julian_day_numbers() {
        assert_eq!(julian_day_number(2012, 1, 1), 2_455_928);
        assert_eq!(julian_day_number(1970, 1, 1), 2_440_588);
        assert_eq!(julian_day_number(1582, 10, 15), 2_299_161);
        assert_eq!(julian_day_number(-4713, 11, 24), 0);
    }

    #[test]
    fn test_julian_day_number_is_monotonic_across_boundaries() {
        let pairs = [
            ((2012, 2, 28), (2012, 2, 29)),
            ((2012, 2, 29), (2012, 3, 1)),
            ((2013, 2, 28), (2013, 3, 1)),
            ((2012, 12, 31), (2013, 1, 1)),
            ((1999, 12, 31), (2000, 1, 1)),
        ];
        for ((y1, m1, d1), (y2, m2, d2)) in pairs {
            assert_eq!(
                julian_day_number(y2, m2, d2) - julian_day_number(y1, m1, d1),
                1,
                "{y1}-{m1}-{d1} -> {y2}-{m2}-{d2}"
            );
        }
    }

    #[test]
    fn test_day_fraction() {
        let jd = julian_date(2000, 1, 1, 18, 30, 36.0);
        let expected = 2_451_545.0 + 6.0 / 24.0 + 30.0 / 1440.0 + 36.0 / 86400.0;
        assert!((jd - expected).abs() < 1e-9);
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2012));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2013));
        assert_eq!(days_in_year(2012), 366);
        assert_eq!(days_in_year(2013), 365);
        assert_eq!(days_in_month(2012, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2012, 13), 0);
    }

    #[test]
    fn test_calendar_date_validation() {
        assert!(CalendarDate::new(2012, 2, 29).is_ok());
        assert!(CalendarDate::new(2013, 2, 29).is_err());
        assert!(CalendarDate::new(2013, 0, 1).is_err());
        assert!(CalendarDate::new(2013, 13, 1).is_err());
        assert!(CalendarDate::new(2013, 4, 31).is_err());
        assert!(CalendarDate::new(2013, 4, 0).is_err());
    }

    #[test]
    fn test_succ_rolls_over() {
        let d = CalendarDate::new(2012, 2, 28).unwrap();
        assert_eq!(d.succ(), Some(CalendarDate::new(2012, 2, 29).unwrap()));

        let d = CalendarDate::new(2013, 2, 28).unwrap();
        assert_eq!(d.succ(), Some(CalendarDate::new(2013, 3, 1).unwrap()));

        let d = CalendarDate::new(2012, 12, 31).unwrap();
        assert_eq!(d.succ(), Some(CalendarDate::first_of_year(2013)));

        let d = CalendarDate::new(i32::MAX, 12, 31).unwrap();
        assert_eq!(d.succ(), None);
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(CalendarDate::first_of_year(2012).ordinal(), 1);
        assert_eq!(CalendarDate::new(2012, 3, 1).unwrap().ordinal(), 61);
        assert_eq!(CalendarDate::new(2013, 3, 1).unwrap().ordinal(), 60);
        assert_eq!(CalendarDate::new(2012, 12, 31).unwrap().ordinal(), 366);
    }

    #[test]
    fn test_from_julian_day_number() {
        assert_eq!(
            CalendarDate::from_julian_day_number(J2000_JDN).unwrap(),
            CalendarDate::first_of_year(2000)
        );
        assert_eq!(
            CalendarDate::from_julian_day_number(2_455_928).unwrap(),
            CalendarDate::first_of_year(2012)
        );
        assert_eq!(
            CalendarDate::from_julian_day_number(2_455_987).unwrap(),
            CalendarDate::new(2012, 2, 29).unwrap()
        );
        assert!(CalendarDate::from_julian_day_number(-1).is_err());
    }

    #[test]
    fn test_from_julian_day_number_upper_bound() {
        let last = julian_day_number(i32::MAX, 12, 31);
        assert_eq!(last, 784_354_017_364);
        assert_eq!(
            CalendarDate::from_julian_day_number(last).unwrap(),
            CalendarDate::new(i32::MAX, 12, 31).unwrap()
        );
        assert!(CalendarDate::from_julian_day_number(last + 1).is_err());
        assert!(CalendarDate::from_julian_day_number(i64::MAX / 2).is_err());
        assert!(CalendarDate::from_julian_day_number(i64::MAX).is_err());
    }

    #[test]
    fn test_from_ordinal() {
        assert_eq!(
            CalendarDate::from_ordinal(2012, 1).unwrap(),
            CalendarDate::first_of_year(2012)
        );
        assert_eq!(
            CalendarDate::from_ordinal(2012, 60).unwrap(),
            CalendarDate::new(2012, 2, 29).unwrap()
        );
        assert_eq!(
            CalendarDate::from_ordinal(2013, 60).unwrap(),
            CalendarDate::new(2013, 3, 1).unwrap()
        );
        assert_eq!(
            CalendarDate::from_ordinal(2012, 366).unwrap(),
            CalendarDate::new(2012, 12, 31).unwrap()
        );
        assert!(CalendarDate::from_ordinal(2013, 366).is_err());
        assert!(CalendarDate::from_ordinal(2013, 0).is_err());

        // proleptic years before the Julian Day Number epoch
        let date = CalendarDate::from_ordinal(-4800, 100).unwrap();
        assert_eq!(date.ordinal(), 100);
        assert!(date.julian_day_number() < 0);
    }

    #[test]
    fn test_julian_day_number_inverse_over_a_leap_year() {
        let mut date = CalendarDate::first_of_year(2012);
        for _ in 0..400 {
            let jdn = date.julian_day_number();
            assert_eq!(CalendarDate::from_julian_day_number(jdn).unwrap(), date);
            date = date.succ().unwrap();
        }
    }

    #[test]
    fn test_julian_date_at_validation() {
        let date = CalendarDate::first_of_year(2000);
        assert_eq!(date.julian_date_at(12, 0, 0.0).unwrap(), 2_451_545.0);
        assert!(date.julian_date_at(24, 0, 0.0).is_err());
        assert!(date.julian_date_at(0, 60, 0.0).is_err());
        assert!(date.julian_date_at(0, 0, 60.0).is_err());
        assert!(date.julian_date_at(0, 0, -1.0).is_err());
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_chrono_conversions() {
        use chrono::{FixedOffset, NaiveDate, TimeZone};

        let naive = NaiveDate::from_ymd_opt(2012, 6, 20).unwrap();
        let date = CalendarDate::from(naive);
        assert_eq!(date, CalendarDate::new(2012, 6, 20).unwrap());
        assert_eq!(date.to_naive_date(), Some(naive));

        // 2012-06-20T23:30-02:00 is already June 21st in UTC
        let local = FixedOffset::west_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2012, 6, 20, 23, 30, 0)
            .unwrap();
        assert_eq!(
            CalendarDate::from_datetime(&local),
            CalendarDate::new(2012, 6, 21).unwrap()
        );

        let jd = julian_date_from_datetime(&local);
        assert!((jd - julian_date(2012, 6, 21, 1, 30, 0.0)).abs() < 1e-9);
    }
}
