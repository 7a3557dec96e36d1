//! Day length from the sunrise equation.
//!
//! This follows the Astronomical Almanac approximation of the sunrise equation
//! (as popularized by NOAA and Wikipedia): solar mean anomaly, equation of center,
//! ecliptic longitude, declination, and hour angle, all referenced to J2000.0.
//! Accuracy is on the order of a minute of day length for mid latitudes.
//!
//! The day count `n` is *not* rounded to the nearest solar noon. Keeping it
//! continuous makes consecutive days of an envelope vary smoothly, at the cost of
//! evaluating the sun half a day after the noon of the given Julian Day Number.
//!
//! When the sun never crosses the horizon, the arccosine of the hour-angle
//! equation is taken outside [-1, 1] and the span is NaN. That is a value, not an
//! error: use [`SolarDay::polar_condition`] to tell polar day from polar night.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use crate::error::{check_coordinates, check_finite};
use crate::math::{
    acos, asin, cos, cos_deg, mul_add, normalize_degrees_0_to_360, radians_to_degrees, sin_deg,
};
use crate::time::CalendarDate;
use crate::{GeoPosition, HoursUtc, PolarCondition, Result, SunriseResult};

/// J2000.0 as a Julian date.
const J2000: f64 = 2451545.0;

/// J2000.0 plus the leap-second offset used by the sunrise equation.
const J2000_TRANSIT: f64 = 2451545.0009;

/// Solar mean anomaly at J2000.0 in degrees.
const MEAN_ANOMALY_AT_EPOCH: f64 = 357.5291;

/// Daily motion of the solar mean anomaly in degrees.
const MEAN_ANOMALY_RATE: f64 = 0.98560028;

/// Equation of center coefficients for sin(M), sin(2M), sin(3M), in degrees.
const EQUATION_OF_CENTER: [f64; 3] = [1.9148, 0.0200, 0.0003];

/// Argument of perihelion in degrees.
const PERIHELION: f64 = 102.9372;

/// Transit correction coefficient for the mean anomaly term (days).
const TRANSIT_ANOMALY_COEFF: f64 = 0.0053;

/// Transit correction coefficient for the ecliptic longitude term (days).
const TRANSIT_LONGITUDE_COEFF: f64 = 0.0069;

/// Obliquity of the ecliptic in degrees.
const OBLIQUITY: f64 = 23.45;

/// Sun elevation at sunrise/sunset: refraction plus the solar disk radius.
const SUNRISE_SUNSET_ANGLE: f64 = -0.83;

const HOURS_PER_DAY: f64 = 24.0;

/// Intermediate and final quantities of one sunrise-equation evaluation.
///
/// Angles are in degrees, times are Julian dates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolarDay {
    julian_day: f64,
    longitude: f64,
    mean_anomaly: f64,
    ecliptic_longitude: f64,
    sin_declination: f64,
    cos_hour_angle: f64,
    hour_angle: f64,
    transit: f64,
    sunset: f64,
    span: f64,
}

/// Evaluates the sunrise equation for a Julian day and position.
///
/// No validation is performed; see [`day_span_checked`] for the validated variant.
///
/// # Arguments
/// * `julian_day` - Julian day number (integer or fractional)
/// * `latitude` - Observer latitude in degrees (-90 to +90)
/// * `longitude` - Observer longitude east of Greenwich in degrees (-180 to +180)
///
/// # Example
/// ```
/// use daylength::span;
///
/// // 2012-06-20, San Francisco
/// let day = span::solar_day(2_456_099.0, 37.7749, -122.4194);
/// assert!(day.span() > 14.0 && day.span() < 15.0);
/// assert!(!day.is_polar());
/// ```
#[must_use]
pub fn solar_day(julian_day: f64, latitude: f64, longitude: f64) -> SolarDay {
    let l_w = -longitude;
    let n_star = julian_day - J2000_TRANSIT - l_w / 360.0;
    let n = n_star + 0.5;

    // approximate solar noon
    let j_star = J2000_TRANSIT + l_w / 360.0 + n;

    let m = normalize_degrees_0_to_360(mul_add(
        MEAN_ANOMALY_RATE,
        j_star - J2000,
        MEAN_ANOMALY_AT_EPOCH,
    ));

    let c = mul_add(
        EQUATION_OF_CENTER[0],
        sin_deg(m),
        mul_add(
            EQUATION_OF_CENTER[1],
            sin_deg(2.0 * m),
            EQUATION_OF_CENTER[2] * sin_deg(3.0 * m),
        ),
    );

    let lambda = normalize_degrees_0_to_360(m + PERIHELION + c + 180.0);

    let transit_correction = mul_add(
        TRANSIT_ANOMALY_COEFF,
        sin_deg(m),
        -TRANSIT_LONGITUDE_COEFF * sin_deg(2.0 * lambda),
    );
    let j_transit = j_star + transit_correction;

    let sin_delta = sin_deg(lambda) * sin_deg(OBLIQUITY);

    let cos_omega = mul_add(-sin_deg(latitude), sin_delta, sin_deg(SUNRISE_SUNSET_ANGLE))
        / (cos_deg(latitude) * cos(asin(sin_delta)));
    let omega = radians_to_degrees(acos(cos_omega));
    if omega.is_nan() {
        tracing::trace!(julian_day, latitude, cos_omega, "no sunrise or sunset");
    }

    let j_set = J2000_TRANSIT + (omega + l_w) / 360.0 + n + transit_correction;

    // twice the noon-to-sunset interval, in hours
    let span = (j_set - j_transit) * 2.0 * HOURS_PER_DAY;

    SolarDay {
        julian_day,
        longitude,
        mean_anomaly: m,
        ecliptic_longitude: lambda,
        sin_declination: sin_delta,
        cos_hour_angle: cos_omega,
        hour_angle: omega,
        transit: j_transit,
        sunset: j_set,
        span,
    }
}

/// Calculates the day length in hours for a Julian day and position.
///
/// Returns NaN when the sun does not rise or does not set (polar conditions).
/// Inputs are not validated.
///
/// # Example
/// ```
/// use daylength::span::day_span;
///
/// let equator = day_span(2_455_928.0, 0.0, 0.0);
/// assert!((equator - 12.0).abs() < 0.2);
///
/// // 80°N in late December: polar night
/// assert!(day_span(2_456_282.0, 80.0, 0.0).is_nan());
/// ```
#[must_use]
pub fn day_span(julian_day: f64, latitude: f64, longitude: f64) -> f64 {
    solar_day(julian_day, latitude, longitude).span
}

/// Calculates the day length in hours after validating the inputs.
///
/// Polar conditions still yield `Ok(NaN)`.
///
/// # Errors
/// Returns `NonFiniteInput` for a non-finite Julian day, or `InvalidLatitude` /
/// `InvalidLongitude` for out-of-range coordinates.
pub fn day_span_checked(julian_day: f64, latitude: f64, longitude: f64) -> Result<f64> {
    check_finite(julian_day, "julian day")?;
    check_coordinates(latitude, longitude)?;
    Ok(day_span(julian_day, latitude, longitude))
}

/// Evaluates the sunrise equation for a calendar date at a position.
#[must_use]
pub fn solar_day_on(date: CalendarDate, position: GeoPosition) -> SolarDay {
    solar_day(
        date.julian_day_number() as f64,
        position.latitude(),
        position.longitude(),
    )
}

impl SolarDay {
    /// The Julian day this evaluation was made for.
    #[must_use]
    pub const fn julian_day(&self) -> f64 {
        self.julian_day
    }

    /// Day length in hours; NaN under polar conditions.
    #[must_use]
    pub const fn span(&self) -> f64 {
        self.span
    }

    /// Solar mean anomaly in degrees [0, 360).
    #[must_use]
    pub const fn mean_anomaly(&self) -> f64 {
        self.mean_anomaly
    }

    /// Ecliptic longitude of the sun in degrees [0, 360).
    #[must_use]
    pub const fn ecliptic_longitude(&self) -> f64 {
        self.ecliptic_longitude
    }

    /// Solar declination in degrees.
    #[must_use]
    pub fn declination(&self) -> f64 {
        radians_to_degrees(asin(self.sin_declination))
    }

    /// Sunset hour angle in degrees; NaN under polar conditions.
    #[must_use]
    pub const fn hour_angle(&self) -> f64 {
        self.hour_angle
    }

    /// Solar transit as a Julian date.
    #[must_use]
    pub const fn transit(&self) -> f64 {
        self.transit
    }

    /// Sunset as a Julian date; NaN under polar conditions.
    #[must_use]
    pub const fn sunset(&self) -> f64 {
        self.sunset
    }

    /// Whether the sun fails to rise or set on this day.
    #[must_use]
    pub const fn is_polar(&self) -> bool {
        self.hour_angle.is_nan()
    }

    /// Which polar condition applies, if any.
    ///
    /// Returns `None` for regular days and for non-finite inputs.
    #[must_use]
    pub fn polar_condition(&self) -> Option<PolarCondition> {
        if self.cos_hour_angle > 1.0 {
            Some(PolarCondition::ContinuousNight)
        } else if self.cos_hour_angle < -1.0 {
            Some(PolarCondition::ContinuousDay)
        } else {
            None
        }
    }

    /// Local solar noon in hours since 0h UTC of the evaluated day.
    ///
    /// This is 12h shifted by the longitude (15° per hour) and by the transit
    /// correction of the equation of time. It may fall slightly outside 0..24
    /// near the antimeridian.
    #[must_use]
    pub fn solar_noon(&self) -> HoursUtc {
        let offset_days = (J2000_TRANSIT - J2000) - self.longitude / 360.0
            + (self.transit - (self.julian_day + 0.5));
        HoursUtc::from_hours(mul_add(offset_days, HOURS_PER_DAY, 12.0))
    }

    /// Sunrise, solar noon and sunset in hours since 0h UTC of the evaluated day.
    ///
    /// Sunrise and sunset are placed symmetrically around solar noon:
    /// `noon - span/2` and `noon + span/2`.
    ///
    /// # Example
    /// ```
    /// use daylength::{span, SunriseResult};
    ///
    /// let day = span::solar_day(2_456_099.0, 37.7749, -122.4194);
    /// if let SunriseResult::RegularDay { sunrise, sunset, .. } = day.sun_times() {
    ///     // 05:48 PDT is 12:48 UTC
    ///     assert!((sunrise.hours() - 12.8).abs() < 0.25);
    ///     // 20:35 PDT is 03:35 UTC on the next day
    ///     assert_eq!(sunset.day_and_hours().0, 1);
    /// }
    /// ```
    #[must_use]
    pub fn sun_times(&self) -> SunriseResult<HoursUtc> {
        let transit = self.solar_noon();
        match self.polar_condition() {
            Some(PolarCondition::ContinuousDay) => SunriseResult::AllDay { transit },
            Some(PolarCondition::ContinuousNight) => SunriseResult::AllNight { transit },
            None => {
                let half = self.span / 2.0;
                SunriseResult::RegularDay {
                    sunrise: HoursUtc::from_hours(transit.hours() - half),
                    transit,
                    sunset: HoursUtc::from_hours(transit.hours() + half),
                }
            }
        }
    }

    /// Sunrise, noon and sunset in local solar time, with noon fixed at 12h.
    ///
    /// Only the day length matters here: sunrise is `12 - span/2` and sunset
    /// `12 + span/2`, independent of longitude and time zone.
    ///
    /// # Example
    /// ```
    /// use daylength::{span, SunriseResult};
    ///
    /// let day = span::solar_day(2_456_099.0, 37.0, 0.0);
    /// if let SunriseResult::RegularDay { sunrise, sunset, .. } = day.local_solar_times() {
    ///     assert!(sunrise > 4.5 && sunrise < 5.0);
    ///     assert!((sunrise + sunset - 24.0).abs() < 1e-9);
    /// }
    /// ```
    #[must_use]
    pub fn local_solar_times(&self) -> SunriseResult<f64> {
        const NOON: f64 = 12.0;
        match self.polar_condition() {
            Some(PolarCondition::ContinuousDay) => SunriseResult::AllDay { transit: NOON },
            Some(PolarCondition::ContinuousNight) => SunriseResult::AllNight { transit: NOON },
            None => {
                let half = self.span / 2.0;
                SunriseResult::RegularDay {
                    sunrise: NOON - half,
                    transit: NOON,
                    sunset: NOON + half,
                }
            }
        }
    }
}
