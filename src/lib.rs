//! # Day Length Library
//!
//! Day length ("span") for every day of a year at a given location, for drawing
//! day-length envelopes and sunrise/sunset charts.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! The crate is built from three pure pieces:
//! - [`time`]: calendar dates to Julian Day Numbers and back (proleptic Gregorian, UTC)
//! - [`span`]: the sunrise equation (solar mean anomaly, equation of center,
//!   ecliptic longitude, declination, hour angle) giving hours of daylight
//! - [`envelope`]: one day length per calendar day of a year
//!
//! Everything is stateless: position and year are explicit arguments and every
//! call returns a fresh result.
//!
//! ## Polar conditions
//!
//! When the sun does not rise or does not set, the day length is NaN. This is not
//! an error. [`SolarDay::polar_condition`] tells midnight sun from polar night.
//!
//! ## Feature Flags
//!
//! - `std` (default): Use standard library for native math functions
//! - `chrono` (default): Convert from `chrono` dates and `DateTime<Tz>`
//! - `libm`: Use pure Rust math for `no_std` environments (`alloc` is still required)
//! - `rayon`: Parallel envelope builder, [`envelope::year_envelope_par`]
//! - `serde`: `Serialize`/`Deserialize` for the value types
//!
//! **Configuration examples:**
//! ```toml
//! # Default: std + chrono
//! daylength = "0.1"
//!
//! # no_std, numeric API only
//! daylength = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## Quick Start
//!
//! ### Year envelope
//! ```rust
//! use daylength::envelope::year_envelope;
//!
//! // Madrid, 2012 (a leap year)
//! let envelope = year_envelope(40.4, -3.7, 2012);
//! assert_eq!(envelope.len(), 366);
//!
//! let june = envelope[171];
//! let december = envelope[355];
//! assert!(june - december > 5.0);
//! ```
//!
//! ### One day, with sunrise and sunset
//! ```rust
//! use daylength::{span, time::CalendarDate, GeoPosition, SunriseResult};
//!
//! let date = CalendarDate::new(2012, 6, 20).unwrap();
//! let oslo = GeoPosition::new(59.91, 10.75).unwrap();
//! let day = span::solar_day_on(date, oslo);
//!
//! match day.sun_times() {
//!     SunriseResult::RegularDay { sunrise, sunset, .. } => {
//!         println!("Sunrise: {:?} UTC", sunrise.hours_minutes());
//!         println!("Sunset: {:?} UTC", sunset.hours_minutes());
//!     }
//!     _ => println!("No sunrise/sunset (polar day/night)"),
//! }
//! ```
//!
//! ## References
//!
//! - Sunrise equation, Astronomical Almanac approximation:
//!   <https://en.wikipedia.org/wiki/Sunrise_equation>
//! - Fliegel, H. F.; Van Flandern, T. C. (1968). A machine algorithm for processing
//!   calendar dates. Communications of the ACM, 11(10), 657.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("either the `std` or the `libm` feature must be enabled");

extern crate alloc;

// Public API exports
pub use crate::envelope::YearEnvelope;
pub use crate::error::{Error, Result};
pub use crate::span::SolarDay;
pub use crate::time::CalendarDate;
pub use crate::types::{GeoPosition, HoursUtc, PolarCondition, SunriseResult};

// Calculation modules
pub mod envelope;
pub mod span;
pub mod time;

// Core modules
pub mod error;
pub mod types;

// Internal modules
mod math;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_and_single_day_agree() {
        let envelope = YearEnvelope::build(48.2, 16.4, 2012).unwrap();
        let date = CalendarDate::new(2012, 8, 15).unwrap();
        let position = GeoPosition::new(48.2, 16.4).unwrap();

        let single = span::solar_day_on(date, position).span();
        assert_eq!(envelope.span_on(date), Some(single));
    }

    #[test]
    fn test_public_reexports() {
        let position = GeoPosition::new(0.0, 0.0).unwrap();
        let envelope: YearEnvelope = YearEnvelope::for_position(position, 2013);
        let day: SolarDay = envelope.solar_day(0).unwrap();
        let times: SunriseResult<HoursUtc> = day.sun_times();
        assert!(times.is_regular_day());
        assert!(day.polar_condition().is_none());
        let _: Result<GeoPosition> = Err(Error::invalid_latitude(100.0));
        let _ = PolarCondition::ContinuousDay;
    }
}
