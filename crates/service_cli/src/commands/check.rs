//! `hydro check` command implementation
//!
//! Reports the effective configuration and runs numerical self-checks
//! against known reference values.

use hydro_core::types::Tail;
use hydro_fao56::{reference_et0, DailyObservations, Site};
use hydro_stats::{dpearson3, ppearson3, qpearson3};
use serde::Serialize;
use std::io::Write;
use tracing::{info, warn};

use crate::config::HydroConfig;
use crate::output::{render, TableRow};
use crate::{CliError, Result};

#[derive(Debug, Serialize)]
struct CheckRow {
    check: &'static str,
    status: &'static str,
    detail: String,
}

impl CheckRow {
    fn new(check: &'static str, passed: bool, detail: String) -> Self {
        Self {
            check,
            status: if passed { "ok" } else { "FAILED" },
            detail,
        }
    }

    fn passed(&self) -> bool {
        self.status == "ok"
    }
}

impl TableRow for CheckRow {
    fn headers() -> &'static [&'static str] {
        &["check", "status", "detail"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.check.to_string(),
            self.status.to_string(),
            self.detail.clone(),
        ]
    }
}

/// dnorm(10, 10, 3)
const ZERO_SKEW_DENSITY: f64 = 0.1329807601338109;

fn zero_skew_density() -> Result<CheckRow> {
    let d = dpearson3(&[10.0], 10.0, 0.3, 0.0)?;
    let error = (d[0] - ZERO_SKEW_DENSITY).abs() / ZERO_SKEW_DENSITY;
    Ok(CheckRow::new(
        "pearson3_zero_skew",
        error < 1e-12,
        format!("relative error {:.1e}", error),
    ))
}

fn quantile_round_trip() -> Result<CheckRow> {
    let probabilities = [1e-6, 0.01, 0.5, 0.99];
    let mut worst: f64 = 0.0;
    for cs in [-1.5, 1.5] {
        for tail in [Tail::Lower, Tail::Upper] {
            let x = qpearson3(&probabilities, 10.0, 0.3, cs, tail)?;
            let back = ppearson3(&x, 10.0, 0.3, cs, tail)?;
            for (p, b) in probabilities.iter().zip(&back) {
                worst = worst.max((p - b).abs());
            }
        }
    }
    Ok(CheckRow::new(
        "pearson3_round_trip",
        worst < 1e-9,
        format!("max abs error {:.1e}", worst),
    ))
}

fn fao56_example_18() -> Result<CheckRow> {
    let site = Site::new(50.8, 100.0);
    let obs = DailyObservations::new(187, 12.3, 21.5)
        .with_relative_humidity(63.0, 84.0)
        .with_sunshine_hours(9.25)
        .with_wind(10.0 / 3.6, 10.0);
    let estimate = reference_et0(&obs, &site)?;
    Ok(CheckRow::new(
        "fao56_example_18",
        (estimate.et0 - 3.88).abs() < 0.01,
        format!("ET0 = {:.3} mm/day (published 3.9)", estimate.et0),
    ))
}

/// Run the check command
pub fn run<W: Write>(config: &HydroConfig, out: &mut W) -> Result<()> {
    info!("Running self-checks...");

    let seed = config
        .seed
        .map_or_else(|| "entropy".to_string(), |s| s.to_string());
    let rows = vec![
        CheckRow::new(
            "configuration",
            config.validate().is_ok(),
            format!(
                "log_level={} output={} seed={} longwave={} dew_point_offset={}",
                config.log_level, config.output, seed, config.longwave, config.dew_point_offset
            ),
        ),
        CheckRow::new(
            "version",
            true,
            format!("hydro {}", env!("CARGO_PKG_VERSION")),
        ),
        zero_skew_density()?,
        quantile_round_trip()?,
        fao56_example_18()?,
    ];

    render(config.output, &rows, out)?;

    let failed: Vec<&str> = rows
        .iter()
        .filter(|row| !row.passed())
        .map(|row| row.check)
        .collect();
    if failed.is_empty() {
        info!("All checks passed");
        Ok(())
    } else {
        warn!(?failed, "Self-checks failed");
        Err(CliError::CheckFailed(failed.join(", ")))
    }
}
