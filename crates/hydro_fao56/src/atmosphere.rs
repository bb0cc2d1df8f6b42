//! Atmospheric parameters (FAO-56 chapter 3).

/// Psychrometric coefficient ε·λ⁻¹·cp for λ = 2.45 MJ kg⁻¹ (kPa⁻¹ °C⁻¹ per kPa).
pub const PSYCHROMETRIC_COEFFICIENT: f64 = 0.665e-3;

/// Atmospheric pressure (kPa) at `elevation` metres above sea level.
///
/// FAO-56 Eq. 7, a simplification of the ideal gas law for a standard
/// atmosphere at 20 °C.
///
/// # Examples
/// ```
/// use hydro_fao56::atmosphere::atmospheric_pressure;
///
/// assert!((atmospheric_pressure(0.0) - 101.3).abs() < 1e-12);
/// // FAO-56 Example 2
/// assert!((atmospheric_pressure(1800.0) - 81.8).abs() < 0.05);
/// ```
pub fn atmospheric_pressure(elevation: f64) -> f64 {
    101.3 * ((293.0 - 0.0065 * elevation) / 293.0).powf(5.26)
}

/// Psychrometric constant γ (kPa °C⁻¹) at `pressure` kPa, FAO-56 Eq. 8.
#[inline]
pub fn psychrometric_constant(pressure: f64) -> f64 {
    PSYCHROMETRIC_COEFFICIENT * pressure
}
