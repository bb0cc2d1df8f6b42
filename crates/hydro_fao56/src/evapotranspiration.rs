//! Reference crop evapotranspiration ET₀.
//!
//! This module provides:
//! - [`penman_monteith_daily`]: FAO Penman–Monteith, daily step (Eq. 6)
//! - [`penman_monteith_hourly`]: hourly step (Eq. 53) with day/night
//!   surface resistance coefficients
//! - [`hargreaves`]: temperature-only fallback (Eq. 52)

use crate::error::{check_temperature_range, Fao56Error};
use crate::soil_heat::DayPeriod;

/// Conversion factor from MJ m⁻² day⁻¹ to mm day⁻¹ of evaporated water (1/λ).
pub const MJ_TO_MM: f64 = 0.408;

/// Denominator coefficient Cd of the daily grass reference.
const CD_DAILY: f64 = 0.34;

/// Denominator coefficient Cd for daytime hours (ASCE-EWRI short reference).
const CD_HOURLY_DAY: f64 = 0.24;

/// Denominator coefficient Cd for night-time hours (ASCE-EWRI short reference).
const CD_HOURLY_NIGHT: f64 = 0.96;

/// Meteorological terms of the Penman–Monteith equation for one time step.
///
/// Energy terms are per time step: MJ m⁻² day⁻¹ for the daily form and
/// MJ m⁻² hour⁻¹ for the hourly form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenmanMonteithInputs {
    /// Mean air temperature at 2 m (°C)
    pub temperature: f64,
    /// Net radiation at the crop surface Rn
    pub net_radiation: f64,
    /// Soil heat flux density G
    pub soil_heat_flux: f64,
    /// Wind speed at 2 m u2 (m s⁻¹)
    pub wind_speed: f64,
    /// Saturation vapour pressure es (kPa)
    pub es: f64,
    /// Actual vapour pressure ea (kPa)
    pub ea: f64,
    /// Slope of the saturation vapour pressure curve Δ (kPa °C⁻¹)
    pub slope: f64,
    /// Psychrometric constant γ (kPa °C⁻¹)
    pub psychrometric_constant: f64,
}

impl PenmanMonteithInputs {
    fn evaluate(&self, numerator_coefficient: f64, cd: f64) -> f64 {
        let delta = self.slope;
        let gamma = self.psychrometric_constant;
        let u2 = self.wind_speed;

        let radiation_term = MJ_TO_MM * delta * (self.net_radiation - self.soil_heat_flux);
        let aerodynamic_term =
            gamma * numerator_coefficient / (self.temperature + 273.0) * u2 * (self.es - self.ea);
        (radiation_term + aerodynamic_term) / (delta + gamma * (1.0 + cd * u2))
    }
}

/// Daily FAO Penman–Monteith reference evapotranspiration (mm day⁻¹), Eq. 6.
///
/// # Examples
/// ```
/// use hydro_fao56::evapotranspiration::{penman_monteith_daily, PenmanMonteithInputs};
///
/// // FAO-56 Example 18, Brussels, 6 July
/// let inputs = PenmanMonteithInputs {
///     temperature: 16.9,
///     net_radiation: 13.28,
///     soil_heat_flux: 0.0,
///     wind_speed: 2.078,
///     es: 1.997,
///     ea: 1.409,
///     slope: 0.122,
///     psychrometric_constant: 0.0666,
/// };
/// assert!((penman_monteith_daily(&inputs) - 3.9).abs() < 0.05);
/// ```
pub fn penman_monteith_daily(inputs: &PenmanMonteithInputs) -> f64 {
    inputs.evaluate(900.0, CD_DAILY)
}

/// Hourly Penman–Monteith reference evapotranspiration (mm hour⁻¹), Eq. 53.
///
/// Uses `Cd = 0.24` during the day and `0.96` at night.
pub fn penman_monteith_hourly(inputs: &PenmanMonteithInputs, period: DayPeriod) -> f64 {
    let cd = match period {
        DayPeriod::Day => CD_HOURLY_DAY,
        DayPeriod::Night => CD_HOURLY_NIGHT,
    };
    inputs.evaluate(37.0, cd)
}

/// Hargreaves reference evapotranspiration (mm day⁻¹), Eq. 52.
///
/// `ra` is the extraterrestrial radiation in MJ m⁻² day⁻¹.
///
/// # Errors
/// - `InvalidTemperatureRange` if `tmin > tmax`
pub fn hargreaves(tmin: f64, tmax: f64, ra: f64) -> Result<f64, Fao56Error> {
    check_temperature_range(tmin, tmax)?;
    let t_mean = 0.5 * (tmin + tmax);
    Ok(0.0023 * (t_mean + 17.8) * (tmax - tmin).sqrt() * MJ_TO_MM * ra)
}
