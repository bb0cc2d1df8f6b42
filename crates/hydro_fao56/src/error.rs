//! Error types for FAO-56 input validation.
//!
//! This module provides:
//! - `Fao56Error`: Out-of-range or missing meteorological and site inputs

use thiserror::Error;

/// FAO-56 input errors.
///
/// # Variants
/// - `InvalidDayOfYear`: Day of year outside `1..=366`
/// - `InvalidLatitude`: Latitude outside `[-90, 90]` degrees
/// - `InvalidTemperatureRange`: Minimum temperature above maximum
/// - `InvalidRelativeHumidity`: Relative humidity outside `[0, 100]` %
/// - `InvalidSunshineHours`: Sunshine duration outside `[0, N]`
/// - `InvalidWindSpeed`: Negative or non-finite wind speed
/// - `InvalidHeight`: Measurement height too low for the log wind profile
/// - `MissingInput`: Required observation not supplied
/// - `UnknownMethod`: Unrecognised method name
///
/// # Examples
/// ```
/// use hydro_fao56::Fao56Error;
///
/// let err = Fao56Error::InvalidDayOfYear { day: 400 };
/// assert!(format!("{}", err).contains("400"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Fao56Error {
    /// Day of year outside `1..=366`.
    #[error("Invalid day of year: J = {day}")]
    InvalidDayOfYear {
        /// The invalid day
        day: u32,
    },

    /// Latitude outside `[-90, 90]` degrees or non-finite.
    #[error("Invalid latitude: φ = {latitude}°")]
    InvalidLatitude {
        /// The invalid latitude in degrees
        latitude: f64,
    },

    /// Minimum temperature exceeds maximum temperature.
    #[error("Invalid temperature range: Tmin = {tmin} °C > Tmax = {tmax} °C")]
    InvalidTemperatureRange {
        /// Minimum temperature
        tmin: f64,
        /// Maximum temperature
        tmax: f64,
    },

    /// Relative humidity outside `[0, 100]` %.
    #[error("Invalid relative humidity: RH = {value} %")]
    InvalidRelativeHumidity {
        /// The invalid relative humidity
        value: f64,
    },

    /// Sunshine duration negative or longer than the daylight hours.
    #[error("Invalid sunshine hours: n = {hours} h with N = {daylight_hours} h")]
    InvalidSunshineHours {
        /// Measured sunshine duration
        hours: f64,
        /// Maximum possible sunshine duration
        daylight_hours: f64,
    },

    /// Wind speed negative or non-finite.
    #[error("Invalid wind speed: u = {speed} m/s")]
    InvalidWindSpeed {
        /// The invalid wind speed
        speed: f64,
    },

    /// Measurement height outside the range of the logarithmic profile.
    #[error("Invalid measurement height: z = {height} m")]
    InvalidHeight {
        /// The invalid height
        height: f64,
    },

    /// A required input is missing.
    #[error("Missing input: {name}")]
    MissingInput {
        /// Name of the missing input
        name: &'static str,
    },

    /// Method name not recognised.
    #[error("Unknown method: {name}")]
    UnknownMethod {
        /// The unrecognised name
        name: String,
    },
}

/// Check that `day` is a valid day of the year.
pub(crate) fn check_day_of_year(day: u32) -> Result<u32, Fao56Error> {
    if (1..=366).contains(&day) {
        Ok(day)
    } else {
        Err(Fao56Error::InvalidDayOfYear { day })
    }
}

/// Check that `latitude` (degrees) is on the globe.
pub(crate) fn check_latitude(latitude: f64) -> Result<f64, Fao56Error> {
    if (-90.0..=90.0).contains(&latitude) {
        Ok(latitude)
    } else {
        Err(Fao56Error::InvalidLatitude { latitude })
    }
}

/// Check `tmin <= tmax`.
pub(crate) fn check_temperature_range(tmin: f64, tmax: f64) -> Result<(), Fao56Error> {
    if tmin <= tmax {
        Ok(())
    } else {
        Err(Fao56Error::InvalidTemperatureRange { tmin, tmax })
    }
}

/// Check a relative humidity in percent.
pub(crate) fn check_relative_humidity(value: f64) -> Result<f64, Fao56Error> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(Fao56Error::InvalidRelativeHumidity { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Fao56Error::InvalidTemperatureRange {
            tmin: 20.0,
            tmax: 10.0,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid temperature range: Tmin = 20 °C > Tmax = 10 °C"
        );
        let err = Fao56Error::MissingInput { name: "tdew" };
        assert_eq!(format!("{}", err), "Missing input: tdew");
    }

    #[test]
    fn test_checks() {
        assert_eq!(check_day_of_year(1), Ok(1));
        assert_eq!(check_day_of_year(366), Ok(366));
        assert!(check_day_of_year(0).is_err());
        assert!(check_day_of_year(367).is_err());

        assert!(check_latitude(-90.0).is_ok());
        assert!(check_latitude(90.5).is_err());
        assert!(check_latitude(f64::NAN).is_err());

        assert!(check_temperature_range(10.0, 10.0).is_ok());
        assert!(check_temperature_range(10.1, 10.0).is_err());
        assert!(check_temperature_range(f64::NAN, 10.0).is_err());

        assert!(check_relative_humidity(0.0).is_ok());
        assert!(check_relative_humidity(100.0).is_ok());
        assert!(check_relative_humidity(101.0).is_err());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = Fao56Error::InvalidHeight { height: 0.0 };
        let _: &dyn std::error::Error = &err;
    }
}
