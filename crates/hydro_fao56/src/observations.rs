//! Daily observations, site description and the full ET₀ pipeline.
//!
//! [`DailyObservations::resolve`] picks, for each concern, the best source
//! the available data supports:
//!
//! | Concern | Priority |
//! |---------|----------|
//! | Humidity | Tdew, RHmin + RHmax, RHmax, RHmean, Tmin − offset |
//! | Shortwave | measured Rs, sunshine hours, temperature range |
//! | Wind | measured, 2 m s⁻¹ default |
//!
//! [`reference_et0`] then evaluates the daily Penman–Monteith equation and
//! reports the intermediate terms alongside the result.

use tracing::debug;

use crate::atmosphere::{atmospheric_pressure, psychrometric_constant};
use crate::error::{check_temperature_range, Fao56Error};
use crate::evapotranspiration::{penman_monteith_daily, PenmanMonteithInputs};
use crate::humidity::{mean_saturation_vapour_pressure, saturation_slope, HumiditySource};
use crate::radiation::{
    net_longwave_radiation, net_radiation, net_shortwave_radiation, AngstromCoefficients,
    ClearSkyModel, LongwaveMethod, SolarGeometry, SolarRadiationSource, DEFAULT_ALBEDO,
    KRS_COASTAL, KRS_INTERIOR,
};
use crate::soil_heat::SoilHeatFlux;
use crate::wind::{WindSource, STANDARD_HEIGHT};

/// Station description.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    /// Latitude in decimal degrees, north positive
    pub latitude: f64,
    /// Elevation above sea level (m)
    pub elevation: f64,
    /// Coastal location (selects k_Rs = 0.19 for temperature-range radiation)
    pub coastal: bool,
    /// Surface albedo
    pub albedo: f64,
    /// Locally calibrated Ångström coefficients, if any
    pub angstrom: Option<AngstromCoefficients>,
    /// Net emissivity formulation
    pub longwave: LongwaveMethod,
    /// Dew point depression below Tmin used when no humidity data exist (°C)
    pub dew_point_offset: f64,
}

impl Site {
    /// Interior site with FAO-56 defaults for the grass reference.
    pub fn new(latitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            elevation,
            coastal: false,
            albedo: DEFAULT_ALBEDO,
            angstrom: None,
            longwave: LongwaveMethod::Fao56,
            dew_point_offset: 0.0,
        }
    }

    /// Mark the site as coastal.
    pub fn with_coastal(mut self, coastal: bool) -> Self {
        self.coastal = coastal;
        self
    }

    /// Set the surface albedo.
    pub fn with_albedo(mut self, albedo: f64) -> Self {
        self.albedo = albedo;
        self
    }

    /// Use calibrated Ångström coefficients.
    pub fn with_angstrom(mut self, angstrom: AngstromCoefficients) -> Self {
        self.angstrom = Some(angstrom);
        self
    }

    /// Select the net emissivity formulation.
    pub fn with_longwave(mut self, longwave: LongwaveMethod) -> Self {
        self.longwave = longwave;
        self
    }

    /// Set the dew point depression for sites without humidity data.
    pub fn with_dew_point_offset(mut self, offset: f64) -> Self {
        self.dew_point_offset = offset;
        self
    }

    /// Hargreaves radiation coefficient for this site.
    pub fn krs(&self) -> f64 {
        if self.coastal {
            KRS_COASTAL
        } else {
            KRS_INTERIOR
        }
    }

    /// Clear-sky model: calibrated Ångström sum if available, else elevation based.
    pub fn clear_sky_model(&self) -> ClearSkyModel {
        match self.angstrom {
            Some(coefficients) => ClearSkyModel::Angstrom(coefficients),
            None => ClearSkyModel::Elevation {
                elevation: self.elevation,
            },
        }
    }
}

/// Weather observations for one day. Only the temperature extremes are required.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyObservations {
    /// Day of the year (1–366)
    pub doy: u32,
    /// Minimum air temperature (°C)
    pub tmin: f64,
    /// Maximum air temperature (°C)
    pub tmax: f64,
    /// Dew point temperature (°C)
    pub tdew: Option<f64>,
    /// Minimum relative humidity (%)
    pub rh_min: Option<f64>,
    /// Maximum relative humidity (%)
    pub rh_max: Option<f64>,
    /// Mean relative humidity (%)
    pub rh_mean: Option<f64>,
    /// Measured solar radiation (MJ m⁻² day⁻¹)
    pub rs: Option<f64>,
    /// Sunshine duration (h)
    pub sunshine_hours: Option<f64>,
    /// Wind speed (m s⁻¹) at `wind_height`
    pub wind_speed: Option<f64>,
    /// Anemometer height (m)
    pub wind_height: f64,
}

impl DailyObservations {
    /// Observations with temperature extremes only.
    pub fn new(doy: u32, tmin: f64, tmax: f64) -> Self {
        Self {
            doy,
            tmin,
            tmax,
            tdew: None,
            rh_min: None,
            rh_max: None,
            rh_mean: None,
            rs: None,
            sunshine_hours: None,
            wind_speed: None,
            wind_height: STANDARD_HEIGHT,
        }
    }

    /// Add a dew point temperature.
    pub fn with_dew_point(mut self, tdew: f64) -> Self {
        self.tdew = Some(tdew);
        self
    }

    /// Add daily relative humidity extremes.
    pub fn with_relative_humidity(mut self, rh_min: f64, rh_max: f64) -> Self {
        self.rh_min = Some(rh_min);
        self.rh_max = Some(rh_max);
        self
    }

    /// Add maximum relative humidity only.
    pub fn with_max_relative_humidity(mut self, rh_max: f64) -> Self {
        self.rh_max = Some(rh_max);
        self
    }

    /// Add mean relative humidity.
    pub fn with_mean_relative_humidity(mut self, rh_mean: f64) -> Self {
        self.rh_mean = Some(rh_mean);
        self
    }

    /// Add measured solar radiation.
    pub fn with_solar_radiation(mut self, rs: f64) -> Self {
        self.rs = Some(rs);
        self
    }

    /// Add sunshine duration.
    pub fn with_sunshine_hours(mut self, hours: f64) -> Self {
        self.sunshine_hours = Some(hours);
        self
    }

    /// Add a wind measurement taken at `height` metres.
    pub fn with_wind(mut self, speed: f64, height: f64) -> Self {
        self.wind_speed = Some(speed);
        self.wind_height = height;
        self
    }

    /// Choose the humidity, radiation and wind sources for this day.
    pub fn resolve(&self, site: &Site) -> ResolvedInputs {
        let humidity = match (self.tdew, self.rh_min, self.rh_max, self.rh_mean) {
            (Some(tdew), _, _, _) => HumiditySource::DewPoint { tdew },
            (None, Some(rh_min), Some(rh_max), _) => {
                HumiditySource::RelativeHumidityExtremes { rh_min, rh_max }
            }
            (None, _, Some(rh_max), _) => HumiditySource::MaximumRelativeHumidity { rh_max },
            (None, _, None, Some(rh_mean)) => HumiditySource::MeanRelativeHumidity { rh_mean },
            _ => HumiditySource::MinimumTemperature {
                offset: site.dew_point_offset,
            },
        };

        let solar = match (self.rs, self.sunshine_hours) {
            (Some(rs), _) => SolarRadiationSource::Measured { rs },
            (None, Some(hours)) => SolarRadiationSource::Sunshine {
                hours,
                angstrom: site.angstrom.unwrap_or_default(),
            },
            (None, None) => SolarRadiationSource::TemperatureRange {
                tmin: self.tmin,
                tmax: self.tmax,
                krs: site.krs(),
            },
        };

        let wind = match self.wind_speed {
            Some(speed) => WindSource::Measured {
                speed,
                height: self.wind_height,
            },
            None => WindSource::Default,
        };

        debug!(
            doy = self.doy,
            humidity = humidity.name(),
            solar = solar.name(),
            wind = wind.name(),
            "Resolved ET0 input sources"
        );

        ResolvedInputs {
            doy: self.doy,
            tmin: self.tmin,
            tmax: self.tmax,
            humidity,
            solar,
            wind,
        }
    }
}

/// Observations with every fallback decided.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedInputs {
    /// Day of the year
    pub doy: u32,
    /// Minimum air temperature (°C)
    pub tmin: f64,
    /// Maximum air temperature (°C)
    pub tmax: f64,
    /// Humidity source
    pub humidity: HumiditySource,
    /// Shortwave radiation source
    pub solar: SolarRadiationSource,
    /// Wind source
    pub wind: WindSource,
}

/// Daily reference evapotranspiration with its intermediate terms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Et0Estimate {
    /// Reference evapotranspiration (mm day⁻¹)
    pub et0: f64,
    /// Extraterrestrial radiation Ra (MJ m⁻² day⁻¹)
    pub ra: f64,
    /// Incoming shortwave radiation Rs
    pub rs: f64,
    /// Clear-sky radiation Rso
    pub rso: f64,
    /// Net shortwave radiation Rns
    pub rns: f64,
    /// Net longwave radiation Rnl
    pub rnl: f64,
    /// Net radiation Rn
    pub rn: f64,
    /// Slope of the vapour pressure curve Δ (kPa °C⁻¹)
    pub slope: f64,
    /// Psychrometric constant γ (kPa °C⁻¹)
    pub gamma: f64,
    /// Mean saturation vapour pressure es (kPa)
    pub es: f64,
    /// Actual vapour pressure ea (kPa)
    pub ea: f64,
    /// Wind speed at 2 m (m s⁻¹)
    pub u2: f64,
    /// Sources used
    pub inputs: ResolvedInputs,
}

/// Daily FAO Penman–Monteith ET₀ for one day at one site.
///
/// # Errors
/// Any input range error from the component formulas: latitude, day of
/// year, temperature order, relative humidity, sunshine hours and wind.
///
/// # Examples
/// ```
/// use hydro_fao56::{reference_et0, DailyObservations, Site};
///
/// // FAO-56 Example 18, Brussels, 6 July
/// let site = Site::new(50.8, 100.0);
/// let obs = DailyObservations::new(187, 12.3, 21.5)
///     .with_relative_humidity(63.0, 84.0)
///     .with_sunshine_hours(9.25)
///     .with_wind(10.0 / 3.6, 10.0);
/// let estimate = reference_et0(&obs, &site).unwrap();
/// assert!((estimate.et0 - 3.9).abs() < 0.05);
/// ```
pub fn reference_et0(obs: &DailyObservations, site: &Site) -> Result<Et0Estimate, Fao56Error> {
    let inputs = obs.resolve(site);
    check_temperature_range(inputs.tmin, inputs.tmax)?;

    let geometry = SolarGeometry::new(site.latitude, inputs.doy)?;
    let t_mean = 0.5 * (inputs.tmin + inputs.tmax);

    let es = mean_saturation_vapour_pressure(inputs.tmin, inputs.tmax);
    let ea = inputs
        .humidity
        .actual_vapour_pressure(inputs.tmin, inputs.tmax)?;
    let slope = saturation_slope(t_mean);
    let gamma = psychrometric_constant(atmospheric_pressure(site.elevation));

    let ra = geometry.extraterrestrial_radiation();
    let rs = inputs.solar.solar_radiation(&geometry)?;
    let rso = site.clear_sky_model().clear_sky_radiation(ra);
    let rns = net_shortwave_radiation(rs, site.albedo);
    let rnl = net_longwave_radiation(site.longwave, inputs.tmin, inputs.tmax, ea, rs, rso)?;
    let rn = net_radiation(rns, rnl);

    let u2 = inputs.wind.speed_at_2m()?;

    let et0 = penman_monteith_daily(&PenmanMonteithInputs {
        temperature: t_mean,
        net_radiation: rn,
        soil_heat_flux: SoilHeatFlux::Daily.flux(rn),
        wind_speed: u2,
        es,
        ea,
        slope,
        psychrometric_constant: gamma,
    });

    debug!(doy = inputs.doy, et0, rn, u2, "Computed Penman-Monteith ET0");

    Ok(Et0Estimate {
        et0,
        ra,
        rs,
        rso,
        rns,
        rnl,
        rn,
        slope,
        gamma,
        es,
        ea,
        u2,
        inputs,
    })
}
