//! # hydro_fao56
//!
//! FAO Irrigation and Drainage Paper 56 formulas for the grass reference
//! evapotranspiration ET₀.
//!
//! ## Modules
//!
//! - [`atmosphere`]: Pressure and psychrometric constant
//! - [`humidity`]: Saturation and actual vapour pressure
//! - [`radiation`]: Solar geometry, shortwave and longwave balance
//! - [`wind`]: Log-profile height adjustment
//! - [`soil_heat`]: Soil heat flux by time step
//! - [`evapotranspiration`]: Penman–Monteith and Hargreaves
//! - [`observations`]: Fallback resolution and the daily pipeline
//!
//! Units follow FAO-56: °C, kPa, MJ m⁻² day⁻¹, m s⁻¹, metres and
//! decimal degrees of latitude.
//!
//! ## Example
//!
//! ```
//! use hydro_fao56::{reference_et0, DailyObservations, Site};
//!
//! let site = Site::new(50.8, 100.0);
//! let obs = DailyObservations::new(187, 12.3, 21.5).with_relative_humidity(63.0, 84.0);
//!
//! let estimate = reference_et0(&obs, &site).unwrap();
//! assert!(estimate.et0 > 0.0);
//! assert_eq!(estimate.inputs.solar.name(), "temperature_range");
//! ```

#![deny(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod atmosphere;
pub mod error;
pub mod evapotranspiration;
pub mod humidity;
pub mod observations;
pub mod radiation;
pub mod soil_heat;
pub mod wind;

pub use error::Fao56Error;
pub use evapotranspiration::{hargreaves, penman_monteith_daily, penman_monteith_hourly};
pub use humidity::HumiditySource;
pub use observations::{reference_et0, DailyObservations, Et0Estimate, ResolvedInputs, Site};
pub use radiation::{ClearSkyModel, LongwaveMethod, SolarRadiationSource};
pub use soil_heat::{DayPeriod, SoilHeatFlux};
pub use wind::WindSource;
