//! Prints a year of day lengths for a few cities.
//!
//! Run with `RUST_LOG=daylength=debug` to see the envelope builder's spans.

use daylength::{CalendarDate, SunriseResult, YearEnvelope};
use tracing_subscriber::EnvFilter;

const CITIES: &[(&str, f64, f64)] = &[
    ("Quito", -0.18, -78.47),
    ("San Francisco", 37.7749, -122.4194),
    ("London", 51.51, -0.13),
    ("Tromsø", 69.65, 18.96),
    ("Sydney", -33.87, 151.21),
];

fn format_hours(hours: f64) -> String {
    if hours.is_nan() {
        return "--:--".to_string();
    }
    let minutes = (hours * 60.0).round() as i64;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let year = 2012;
    let solstice = CalendarDate::new(year, 6, 20)?;

    for &(name, latitude, longitude) in CITIES {
        let envelope = YearEnvelope::build(latitude, longitude, year)?;

        println!("{name} ({latitude:.2}°, {longitude:.2}°), {year}:");
        if let Some((date, hours)) = envelope.longest_day() {
            println!(
                "  Longest day:  {}-{:02}-{:02} {}",
                date.year(),
                date.month(),
                date.day(),
                format_hours(hours)
            );
        }
        if let Some((date, hours)) = envelope.shortest_day() {
            println!(
                "  Shortest day: {}-{:02}-{:02} {}",
                date.year(),
                date.month(),
                date.day(),
                format_hours(hours)
            );
        }
        if envelope.polar_days() > 0 {
            println!("  Days without sunrise or sunset: {}", envelope.polar_days());
        }

        let Some(index) = envelope.index_of(solstice) else {
            continue;
        };
        let Some(day) = envelope.solar_day(index) else {
            continue;
        };
        match day.sun_times() {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => {
                let (Some((rise_h, rise_m)), Some((set_h, set_m))) =
                    (sunrise.hours_minutes(), sunset.hours_minutes())
                else {
                    continue;
                };
                println!(
                    "  June 20: sunrise {rise_h:02}:{rise_m:02} UTC, sunset {set_h:02}:{set_m:02} UTC"
                );
                if let SunriseResult::RegularDay {
                    sunrise, sunset, ..
                } = day.local_solar_times()
                {
                    println!(
                        "           {} to {} local solar time",
                        format_hours(sunrise),
                        format_hours(sunset)
                    );
                }
            }
            SunriseResult::AllDay { .. } => println!("  June 20: midnight sun"),
            SunriseResult::AllNight { .. } => println!("  June 20: polar night"),
        }

        // one character per fortnight, scaled to 24 hours
        let sparkline: String = envelope
            .spans()
            .iter()
            .step_by(14)
            .map(|&hours| {
                const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
                if hours.is_nan() {
                    ' '
                } else {
                    BARS[((hours / 24.0 * 7.0).round() as usize).min(7)]
                }
            })
            .collect();
        println!("  {sparkline}");
        println!();
    }

    Ok(())
}
