//! `hydro et0` command implementation
//!
//! Daily reference evapotranspiration from station observations.

use clap::Subcommand;
use hydro_fao56::radiation::extraterrestrial_radiation;
use hydro_fao56::{hargreaves, reference_et0, DailyObservations, LongwaveMethod, Site};
use serde::Serialize;
use std::io::Write;
use tracing::info;

use crate::config::{HydroConfig, OutputFormat};
use crate::output::{format_number, render, TableRow};
use crate::{CliError, Result};

/// `et0` subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Et0Command {
    /// FAO Penman-Monteith with fallbacks for missing data
    PenmanMonteith {
        /// Latitude in decimal degrees (north positive)
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,

        /// Elevation above sea level (m)
        #[arg(long, allow_hyphen_values = true)]
        elevation: f64,

        /// Day of the year (1-366)
        #[arg(long)]
        doy: u32,

        /// Minimum air temperature (°C)
        #[arg(long, allow_hyphen_values = true)]
        tmin: f64,

        /// Maximum air temperature (°C)
        #[arg(long, allow_hyphen_values = true)]
        tmax: f64,

        /// Dew point temperature (°C)
        #[arg(long, allow_hyphen_values = true)]
        tdew: Option<f64>,

        /// Minimum relative humidity (%), requires --rh-max
        #[arg(long, allow_hyphen_values = true)]
        rh_min: Option<f64>,

        /// Maximum relative humidity (%)
        #[arg(long, allow_hyphen_values = true)]
        rh_max: Option<f64>,

        /// Mean relative humidity (%)
        #[arg(long, allow_hyphen_values = true)]
        rh_mean: Option<f64>,

        /// Measured solar radiation (MJ m-2 day-1)
        #[arg(long, allow_hyphen_values = true)]
        rs: Option<f64>,

        /// Sunshine duration (h)
        #[arg(long, allow_hyphen_values = true)]
        sunshine_hours: Option<f64>,

        /// Wind speed (m/s)
        #[arg(long, allow_hyphen_values = true)]
        wind: Option<f64>,

        /// Anemometer height (m)
        #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
        wind_height: f64,

        /// Coastal site (k_Rs = 0.19 when radiation is estimated from temperature)
        #[arg(long)]
        coastal: bool,

        /// Net longwave formulation (fao56, brutsaert, swinbank, idso-jackson)
        #[arg(long)]
        longwave: Option<LongwaveMethod>,
    },

    /// Hargreaves temperature-only estimate
    Hargreaves {
        /// Latitude in decimal degrees (north positive)
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,

        /// Day of the year (1-366)
        #[arg(long)]
        doy: u32,

        /// Minimum air temperature (°C)
        #[arg(long, allow_hyphen_values = true)]
        tmin: f64,

        /// Maximum air temperature (°C)
        #[arg(long, allow_hyphen_values = true)]
        tmax: f64,
    },
}

#[derive(Debug, Serialize)]
struct QuantityRow {
    quantity: &'static str,
    value: String,
    unit: &'static str,
}

impl QuantityRow {
    fn number(quantity: &'static str, value: f64, unit: &'static str) -> Self {
        Self {
            quantity,
            value: format_number(value),
            unit,
        }
    }

    fn label(quantity: &'static str, value: &str) -> Self {
        Self {
            quantity,
            value: value.to_string(),
            unit: "",
        }
    }
}

impl TableRow for QuantityRow {
    fn headers() -> &'static [&'static str] {
        &["quantity", "value", "unit"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.quantity.to_string(),
            self.value.clone(),
            self.unit.to_string(),
        ]
    }
}

#[derive(Debug, Serialize)]
struct HargreavesRow {
    doy: u32,
    ra: f64,
    et0: f64,
}

impl TableRow for HargreavesRow {
    fn headers() -> &'static [&'static str] {
        &["doy", "ra", "et0"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.doy.to_string(),
            format_number(self.ra),
            format_number(self.et0),
        ]
    }
}

/// Run the et0 command
pub fn run<W: Write>(command: &Et0Command, config: &HydroConfig, out: &mut W) -> Result<()> {
    match *command {
        Et0Command::PenmanMonteith {
            latitude,
            elevation,
            doy,
            tmin,
            tmax,
            tdew,
            rh_min,
            rh_max,
            rh_mean,
            rs,
            sunshine_hours,
            wind,
            wind_height,
            coastal,
            longwave,
        } => {
            if rh_min.is_some() && rh_max.is_none() {
                return Err(CliError::InvalidArgument(
                    "--rh-min requires --rh-max".to_string(),
                ));
            }

            let longwave = longwave.unwrap_or(config.longwave);
            let site = Site::new(latitude, elevation)
                .with_coastal(coastal)
                .with_longwave(longwave)
                .with_dew_point_offset(config.dew_point_offset);

            let mut obs = DailyObservations::new(doy, tmin, tmax);
            obs.tdew = tdew;
            obs.rh_min = rh_min;
            obs.rh_max = rh_max;
            obs.rh_mean = rh_mean;
            obs.rs = rs;
            obs.sunshine_hours = sunshine_hours;
            if let Some(speed) = wind {
                obs = obs.with_wind(speed, wind_height);
            }

            info!(latitude, elevation, doy, %longwave, "Computing Penman-Monteith ET0");
            let estimate = reference_et0(&obs, &site)?;

            if config.output == OutputFormat::Json {
                serde_json::to_writer_pretty(&mut *out, &estimate)?;
                writeln!(out)?;
                return Ok(());
            }

            let inputs = &estimate.inputs;
            let rows = vec![
                QuantityRow::number("ET0", estimate.et0, "mm/day"),
                QuantityRow::number("Ra", estimate.ra, "MJ/m2/day"),
                QuantityRow::number("Rs", estimate.rs, "MJ/m2/day"),
                QuantityRow::number("Rso", estimate.rso, "MJ/m2/day"),
                QuantityRow::number("Rns", estimate.rns, "MJ/m2/day"),
                QuantityRow::number("Rnl", estimate.rnl, "MJ/m2/day"),
                QuantityRow::number("Rn", estimate.rn, "MJ/m2/day"),
                QuantityRow::number("slope", estimate.slope, "kPa/degC"),
                QuantityRow::number("gamma", estimate.gamma, "kPa/degC"),
                QuantityRow::number("es", estimate.es, "kPa"),
                QuantityRow::number("ea", estimate.ea, "kPa"),
                QuantityRow::number("u2", estimate.u2, "m/s"),
                QuantityRow::label("humidity_source", inputs.humidity.name()),
                QuantityRow::label("solar_source", inputs.solar.name()),
                QuantityRow::label("wind_source", inputs.wind.name()),
                QuantityRow::label("longwave_method", longwave.as_str()),
            ];
            render(config.output, &rows, out)
        }
        Et0Command::Hargreaves {
            latitude,
            doy,
            tmin,
            tmax,
        } => {
            info!(latitude, doy, "Computing Hargreaves ET0");
            let ra = extraterrestrial_radiation(latitude, doy)?;
            let et0 = hargreaves(tmin, tmax, ra)?;
            render(config.output, &[HargreavesRow { doy, ra, et0 }], out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn brussels() -> Et0Command {
        Et0Command::PenmanMonteith {
            latitude: 50.8,
            elevation: 100.0,
            doy: 187,
            tmin: 12.3,
            tmax: 21.5,
            tdew: None,
            rh_min: Some(63.0),
            rh_max: Some(84.0),
            rh_mean: None,
            rs: None,
            sunshine_hours: Some(9.25),
            wind: Some(10.0 / 3.6),
            wind_height: 10.0,
            coastal: false,
            longwave: None,
        }
    }

    fn config(output: OutputFormat) -> HydroConfig {
        HydroConfig {
            output,
            ..Default::default()
        }
    }

    #[test]
    fn test_penman_monteith_json() {
        let mut buffer = Vec::new();
        run(&brussels(), &config(OutputFormat::Json), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_abs_diff_eq!(value["et0"].as_f64().unwrap(), 3.88, epsilon = 0.01);
        assert_eq!(value["inputs"]["solar"]["source"], "sunshine");
    }

    #[test]
    fn test_penman_monteith_csv_lists_sources() {
        let mut buffer = Vec::new();
        run(&brussels(), &config(OutputFormat::Csv), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("quantity,value,unit"));
        assert!(text.contains("humidity_source,relative_humidity_extremes,"));
        assert!(text.contains("wind_source,measured,"));
    }

    #[test]
    fn test_rh_min_alone_rejected() {
        let command = Et0Command::PenmanMonteith {
            latitude: 50.8,
            elevation: 100.0,
            doy: 187,
            tmin: 12.3,
            tmax: 21.5,
            tdew: None,
            rh_min: Some(63.0),
            rh_max: None,
            rh_mean: None,
            rs: None,
            sunshine_hours: None,
            wind: None,
            wind_height: 2.0,
            coastal: false,
            longwave: None,
        };
        let mut buffer = Vec::new();
        let err = run(&command, &config(OutputFormat::Table), &mut buffer).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_hargreaves() {
        let command = Et0Command::Hargreaves {
            latitude: 50.8,
            doy: 187,
            tmin: 12.3,
            tmax: 21.5,
        };
        let mut buffer = Vec::new();
        run(&command, &config(OutputFormat::Json), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_abs_diff_eq!(value[0]["et0"].as_f64().unwrap(), 4.058, epsilon = 2e-3);
    }

    #[test]
    fn test_invalid_day_propagates() {
        let command = Et0Command::Hargreaves {
            latitude: 50.8,
            doy: 0,
            tmin: 12.3,
            tmax: 21.5,
        };
        let mut buffer = Vec::new();
        let err = run(&command, &config(OutputFormat::Table), &mut buffer).unwrap_err();
        assert!(matches!(err, CliError::Fao56(_)));
    }
}
