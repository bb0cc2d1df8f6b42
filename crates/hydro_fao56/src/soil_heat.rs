//! Soil heat flux G (FAO-56 chapter 3).

/// Part of the day for hourly calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DayPeriod {
    /// Net radiation positive, sun above the horizon
    Day,
    /// Night-time
    Night,
}

/// Soil heat flux estimate for the time step of the calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "step", rename_all = "snake_case"))]
pub enum SoilHeatFlux {
    /// Day and ten-day periods: G ≈ 0, Eq. 42.
    Daily,
    /// Monthly: `0.07 (T_{i+1} − T_{i−1})`, Eq. 43.
    Monthly {
        /// Mean air temperature of the previous month (°C)
        t_previous: f64,
        /// Mean air temperature of the next month (°C)
        t_next: f64,
    },
    /// Monthly without next month: `0.14 (T_i − T_{i−1})`, Eq. 44.
    MonthlyWithoutNext {
        /// Mean air temperature of the previous month (°C)
        t_previous: f64,
        /// Mean air temperature of the current month (°C)
        t_current: f64,
    },
    /// Hourly: `0.1 Rn` by day, `0.5 Rn` by night, Eqs. 45 and 46.
    Hourly {
        /// Part of the day
        period: DayPeriod,
    },
}

impl SoilHeatFlux {
    /// Soil heat flux G (MJ m⁻² per time step) for net radiation `rn`.
    pub fn flux(&self, rn: f64) -> f64 {
        match *self {
            SoilHeatFlux::Daily => 0.0,
            SoilHeatFlux::Monthly { t_previous, t_next } => 0.07 * (t_next - t_previous),
            SoilHeatFlux::MonthlyWithoutNext {
                t_previous,
                t_current,
            } => 0.14 * (t_current - t_previous),
            SoilHeatFlux::Hourly {
                period: DayPeriod::Day,
            } => 0.1 * rn,
            SoilHeatFlux::Hourly {
                period: DayPeriod::Night,
            } => 0.5 * rn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_example_13_monthly() {
        // March 14.1 °C, May 18.8 °C
        let g = SoilHeatFlux::Monthly {
            t_previous: 14.1,
            t_next: 18.8,
        };
        assert_abs_diff_eq!(g.flux(10.0), 0.329, epsilon = 1e-3);

        // March 14.1 °C, April 16.1 °C
        let g = SoilHeatFlux::MonthlyWithoutNext {
            t_previous: 14.1,
            t_current: 16.1,
        };
        assert_abs_diff_eq!(g.flux(10.0), 0.28, epsilon = 1e-12);
    }

    #[test]
    fn test_daily_and_hourly() {
        assert_eq!(SoilHeatFlux::Daily.flux(13.3), 0.0);
        let day = SoilHeatFlux::Hourly {
            period: DayPeriod::Day,
        };
        let night = SoilHeatFlux::Hourly {
            period: DayPeriod::Night,
        };
        assert_abs_diff_eq!(day.flux(2.0), 0.2, epsilon = 1e-15);
        assert_abs_diff_eq!(night.flux(-0.1), -0.05, epsilon = 1e-15);
    }
}
