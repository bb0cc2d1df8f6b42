//! Vapour pressure and humidity (FAO-56 chapter 3).
//!
//! [`HumiditySource`] names the available humidity observation, in FAO-56
//! order of preference, and turns it into actual vapour pressure `ea`.

use crate::error::{check_relative_humidity, check_temperature_range, Fao56Error};

/// Saturation vapour pressure e°(T) (kPa) at air temperature `t` (°C), FAO-56 Eq. 11.
///
/// # Examples
/// ```
/// use hydro_fao56::humidity::saturation_vapour_pressure;
///
/// assert!((saturation_vapour_pressure(20.0) - 2.338).abs() < 1e-3);
/// ```
#[inline]
pub fn saturation_vapour_pressure(t: f64) -> f64 {
    0.6108 * (17.27 * t / (t + 237.3)).exp()
}

/// Mean saturation vapour pressure `es` (kPa) over a day, FAO-56 Eq. 12.
///
/// Averages e° at the extremes rather than evaluating e° at the mean
/// temperature, which underestimates `es` because e° is convex.
pub fn mean_saturation_vapour_pressure(tmin: f64, tmax: f64) -> f64 {
    0.5 * (saturation_vapour_pressure(tmax) + saturation_vapour_pressure(tmin))
}

/// Slope Δ (kPa °C⁻¹) of the saturation vapour pressure curve at `t` °C, FAO-56 Eq. 13.
pub fn saturation_slope(t: f64) -> f64 {
    let denom = t + 237.3;
    4098.0 * saturation_vapour_pressure(t) / (denom * denom)
}

/// Vapour pressure deficit `es − ea` (kPa).
#[inline]
pub fn vapour_pressure_deficit(es: f64, ea: f64) -> f64 {
    es - ea
}

/// Humidity observation used to derive actual vapour pressure.
///
/// Variants are listed in FAO-56 order of preference.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "source", rename_all = "snake_case"))]
pub enum HumiditySource {
    /// Dew point temperature (°C), Eq. 14.
    DewPoint {
        /// Dew point temperature
        tdew: f64,
    },
    /// Daily minimum and maximum relative humidity (%), Eq. 17.
    RelativeHumidityExtremes {
        /// Minimum relative humidity
        rh_min: f64,
        /// Maximum relative humidity
        rh_max: f64,
    },
    /// Maximum relative humidity only (%), Eq. 18.
    MaximumRelativeHumidity {
        /// Maximum relative humidity
        rh_max: f64,
    },
    /// Mean relative humidity (%), Eq. 19.
    MeanRelativeHumidity {
        /// Mean relative humidity
        rh_mean: f64,
    },
    /// No humidity data: dew point approximated by `Tmin − offset`
    /// (FAO-56 Annex 6; offset 0 °C for humid, 2–3 °C for arid sites).
    MinimumTemperature {
        /// Dew point depression below Tmin (°C)
        offset: f64,
    },
}

impl HumiditySource {
    /// Actual vapour pressure `ea` (kPa) for a day with extremes `tmin`, `tmax` (°C).
    ///
    /// # Errors
    /// - `InvalidTemperatureRange` if `tmin > tmax`
    /// - `InvalidRelativeHumidity` for relative humidity outside `[0, 100]`
    ///
    /// # Examples
    /// ```
    /// use hydro_fao56::humidity::HumiditySource;
    ///
    /// // FAO-56 Example 5
    /// let source = HumiditySource::RelativeHumidityExtremes { rh_min: 54.0, rh_max: 82.0 };
    /// let ea = source.actual_vapour_pressure(18.0, 25.0).unwrap();
    /// assert!((ea - 1.70).abs() < 0.01);
    /// ```
    pub fn actual_vapour_pressure(&self, tmin: f64, tmax: f64) -> Result<f64, Fao56Error> {
        check_temperature_range(tmin, tmax)?;
        let ea = match *self {
            HumiditySource::DewPoint { tdew } => saturation_vapour_pressure(tdew),
            HumiditySource::RelativeHumidityExtremes { rh_min, rh_max } => {
                let rh_min = check_relative_humidity(rh_min)?;
                let rh_max = check_relative_humidity(rh_max)?;
                0.5 * (saturation_vapour_pressure(tmin) * rh_max / 100.0
                    + saturation_vapour_pressure(tmax) * rh_min / 100.0)
            }
            HumiditySource::MaximumRelativeHumidity { rh_max } => {
                saturation_vapour_pressure(tmin) * check_relative_humidity(rh_max)? / 100.0
            }
            HumiditySource::MeanRelativeHumidity { rh_mean } => {
                check_relative_humidity(rh_mean)? / 100.0
                    * mean_saturation_vapour_pressure(tmin, tmax)
            }
            HumiditySource::MinimumTemperature { offset } => {
                saturation_vapour_pressure(tmin - offset)
            }
        };
        Ok(ea)
    }

    /// Short identifier of the source.
    pub fn name(&self) -> &'static str {
        match self {
            HumiditySource::DewPoint { .. } => "dew_point",
            HumiditySource::RelativeHumidityExtremes { .. } => "relative_humidity_extremes",
            HumiditySource::MaximumRelativeHumidity { .. } => "maximum_relative_humidity",
            HumiditySource::MeanRelativeHumidity { .. } => "mean_relative_humidity",
            HumiditySource::MinimumTemperature { .. } => "minimum_temperature",
        }
    }
}
