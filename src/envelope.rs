//! Year envelopes: one day length per calendar day of a year.
//!
//! Two equivalent strategies are provided. [`year_envelope`] walks the calendar
//! from January 1st to December 31st and converts every date to its Julian Day
//! Number; [`envelope_from_julian_day`] starts from a precomputed first day and
//! simply increments the day number. For the same year they produce identical
//! sequences.
//!
//! Envelopes are calendar-aware: leap years have 366 entries, other years 365.
//! Index 0 is January 1st. Polar days keep their slot and hold NaN.

use alloc::vec::Vec;

use crate::span::{SolarDay, day_span, solar_day_on};
use crate::time::{CalendarDate, julian_day_number};
use crate::{GeoPosition, Result};

/// Julian Day Number of January 1st of `year` (day 0 of the envelope).
///
/// # Example
/// ```
/// # use daylength::envelope::first_day_of_year;
/// assert_eq!(first_day_of_year(2012), 2_455_928);
/// ```
#[must_use]
pub fn first_day_of_year(year: i32) -> i64 {
    julian_day_number(year, 1, 1)
}

/// Lazily yields every calendar day of `year` with its day length.
///
/// # Example
/// ```
/// use daylength::envelope::spans;
///
/// let (date, span) = spans(51.5, -0.1, 2013).nth(171).unwrap();
/// assert_eq!((date.month(), date.day()), (6, 21));
/// assert!(span > 16.0);
/// ```
pub fn spans(
    latitude: f64,
    longitude: f64,
    year: i32,
) -> impl Iterator<Item = (CalendarDate, f64)> {
    core::iter::successors(Some(CalendarDate::first_of_year(year)), CalendarDate::succ)
        .take_while(move |date| date.year() == year)
        .map(move |date| {
            let span = day_span(date.julian_day_number() as f64, latitude, longitude);
            (date, span)
        })
}

/// Builds the day-length envelope of `year` by stepping through calendar dates.
///
/// The result has `days_in_year(year)` entries regardless of position. Inputs are
/// not validated; see [`YearEnvelope::build`] for the validated variant.
///
/// # Example
/// ```
/// use daylength::envelope::year_envelope;
///
/// let envelope = year_envelope(0.0, 0.0, 2012);
/// assert_eq!(envelope.len(), 366);
/// assert!(envelope.iter().all(|span| (span - 12.0).abs() < 0.2));
/// ```
#[must_use]
#[tracing::instrument(level = "debug")]
pub fn year_envelope(latitude: f64, longitude: f64, year: i32) -> Vec<f64> {
    let envelope: Vec<f64> = spans(latitude, longitude, year)
        .map(|(_, span)| span)
        .collect();
    log_summary(&envelope);
    envelope
}

/// Builds an envelope of `days` consecutive days starting at Julian Day Number `start`.
///
/// # Example
/// ```
/// use daylength::envelope::{envelope_from_julian_day, first_day_of_year, year_envelope};
///
/// let by_day_number = envelope_from_julian_day(first_day_of_year(2012), 366, 37.0, 0.0);
/// assert_eq!(by_day_number, year_envelope(37.0, 0.0, 2012));
/// ```
#[must_use]
#[tracing::instrument(level = "debug")]
pub fn envelope_from_julian_day(
    start: i64,
    days: u32,
    latitude: f64,
    longitude: f64,
) -> Vec<f64> {
    let envelope: Vec<f64> = (0..i64::from(days))
        .map(|offset| day_span((start + offset) as f64, latitude, longitude))
        .collect();
    log_summary(&envelope);
    envelope
}

/// Builds the envelope of `year` with one rayon task per day.
///
/// Produces exactly the same sequence as [`year_envelope`].
#[cfg(feature = "rayon")]
#[must_use]
#[tracing::instrument(level = "debug")]
pub fn year_envelope_par(latitude: f64, longitude: f64, year: i32) -> Vec<f64> {
    use rayon::prelude::*;

    let start = first_day_of_year(year);
    let envelope: Vec<f64> = (0..crate::time::days_in_year(year))
        .into_par_iter()
        .map(|offset| day_span((start + i64::from(offset)) as f64, latitude, longitude))
        .collect();
    log_summary(&envelope);
    envelope
}

fn log_summary(envelope: &[f64]) {
    let polar_days = envelope.iter().filter(|span| span.is_nan()).count();
    tracing::debug!(days = envelope.len(), polar_days, "built envelope");
}

/// Day lengths of one year at one position, with the context to interpret them.
///
/// # Example
/// ```
/// use daylength::YearEnvelope;
///
/// let envelope = YearEnvelope::build(37.0, 0.0, 2012).unwrap();
/// let (date, hours) = envelope.longest_day().unwrap();
/// assert_eq!(date.month(), 6);
/// assert!(hours > 14.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct YearEnvelope {
    year: i32,
    position: GeoPosition,
    spans: Vec<f64>,
}

impl YearEnvelope {
    /// Validates the position and builds the envelope of `year`.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range or NaN coordinates.
    pub fn build(latitude: f64, longitude: f64, year: i32) -> Result<Self> {
        let position = GeoPosition::new(latitude, longitude)?;
        Ok(Self::for_position(position, year))
    }

    /// Builds the envelope of `year` for an already constructed position.
    #[must_use]
    pub fn for_position(position: GeoPosition, year: i32) -> Self {
        let spans = year_envelope(position.latitude(), position.longitude(), year);
        Self {
            year,
            position,
            spans,
        }
    }

    /// The year covered.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The observer position.
    #[must_use]
    pub const fn position(&self) -> GeoPosition {
        self.position
    }

    /// Day lengths in hours, index 0 being January 1st.
    #[must_use]
    pub fn spans(&self) -> &[f64] {
        &self.spans
    }

    /// Consumes the envelope, returning the day lengths.
    #[must_use]
    pub fn into_spans(self) -> Vec<f64> {
        self.spans
    }

    /// Number of days in the envelope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the envelope has no days. Never true for a built envelope.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Calendar date of the day at `index`.
    #[must_use]
    pub fn date_of(&self, index: usize) -> Option<CalendarDate> {
        if index >= self.spans.len() {
            return None;
        }
        let ordinal = u32::try_from(index).ok()? + 1;
        CalendarDate::from_ordinal(self.year, ordinal).ok()
    }

    /// Envelope index of `date`, if it falls in this envelope's year.
    #[must_use]
    pub fn index_of(&self, date: CalendarDate) -> Option<usize> {
        if date.year() != self.year {
            return None;
        }
        usize::try_from(date.ordinal() - 1).ok()
    }

    /// Day length on `date`, if it falls in this envelope's year.
    #[must_use]
    pub fn span_on(&self, date: CalendarDate) -> Option<f64> {
        self.index_of(date).and_then(|index| self.spans.get(index).copied())
    }

    /// Full sunrise-equation result for the day at `index`, for sunrise and sunset times.
    #[must_use]
    pub fn solar_day(&self, index: usize) -> Option<SolarDay> {
        self.date_of(index).map(|date| solar_day_on(date, self.position))
    }

    /// The day with the most daylight, ignoring polar (NaN) days.
    #[must_use]
    pub fn longest_day(&self) -> Option<(CalendarDate, f64)> {
        self.finite_days().max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// The day with the least daylight, ignoring polar (NaN) days.
    #[must_use]
    pub fn shortest_day(&self) -> Option<(CalendarDate, f64)> {
        self.finite_days().min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Number of days without sunrise or sunset.
    #[must_use]
    pub fn polar_days(&self) -> usize {
        self.spans.iter().filter(|span| span.is_nan()).count()
    }

    fn finite_days(&self) -> impl Iterator<Item = (CalendarDate, f64)> + '_ {
        self.spans
            .iter()
            .enumerate()
            .filter(|(_, span)| !span.is_nan())
            .filter_map(|(index, &span)| self.date_of(index).map(|date| (date, span)))
    }
}
