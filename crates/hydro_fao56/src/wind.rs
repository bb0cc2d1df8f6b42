//! Wind speed (FAO-56 chapter 3).

use crate::error::Fao56Error;

/// Wind speed at 2 m (m s⁻¹) assumed when no measurement is available.
pub const DEFAULT_WIND_SPEED: f64 = 2.0;

/// Standard measurement height (m).
pub const STANDARD_HEIGHT: f64 = 2.0;

/// Wind speed at 2 m from a measurement `uz` at height `z` metres, Eq. 47.
///
/// # Errors
/// - `InvalidWindSpeed` if `uz` is negative or non-finite
/// - `InvalidHeight` if `z` is too low for the logarithmic profile
///   (`67.8 z − 5.42 ≤ 1`) or non-finite
///
/// # Examples
/// ```
/// use hydro_fao56::wind::wind_speed_at_2m;
///
/// // FAO-56 Example 14
/// let u2 = wind_speed_at_2m(3.2, 10.0).unwrap();
/// assert!((u2 - 2.4).abs() < 0.01);
/// ```
pub fn wind_speed_at_2m(uz: f64, z: f64) -> Result<f64, Fao56Error> {
    if !(uz.is_finite() && uz >= 0.0) {
        return Err(Fao56Error::InvalidWindSpeed { speed: uz });
    }
    let log_argument = 67.8 * z - 5.42;
    if !(log_argument.is_finite() && log_argument > 1.0) {
        return Err(Fao56Error::InvalidHeight { height: z });
    }
    Ok(uz * 4.87 / log_argument.ln())
}

/// Source of the 2 m wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "source", rename_all = "snake_case"))]
pub enum WindSource {
    /// Anemometer reading at a known height.
    Measured {
        /// Wind speed (m s⁻¹)
        speed: f64,
        /// Measurement height (m)
        height: f64,
    },
    /// Global average of 2 m s⁻¹ for missing wind data.
    #[default]
    Default,
}

impl WindSource {
    /// Wind speed at 2 m (m s⁻¹).
    pub fn speed_at_2m(&self) -> Result<f64, Fao56Error> {
        match *self {
            WindSource::Measured { speed, height } => wind_speed_at_2m(speed, height),
            WindSource::Default => Ok(DEFAULT_WIND_SPEED),
        }
    }

    /// Short identifier of the source.
    pub fn name(&self) -> &'static str {
        match self {
            WindSource::Measured { .. } => "measured",
            WindSource::Default => "default",
        }
    }
}
