use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::ModelError;

pub const LAUNCH_COST_MIN: f64 = 100.0;
pub const LAUNCH_COST_MAX: f64 = 10_000.0;
pub const PANEL_WEIGHT_MIN: f64 = 0.01;
pub const PANEL_WEIGHT_MAX: f64 = 10.0;

/// Which independent variable an axis sweeps
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AxisKind {
    /// USD/kg
    LaunchCost,
    /// kg/W
    PanelWeight,
}

impl AxisKind {
    pub fn unit(&self) -> &'static str {
        match self {
            AxisKind::LaunchCost => "USD/kg",
            AxisKind::PanelWeight => "kg/W",
        }
    }
}

/// A log-spaced sweep between two positive bounds
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepAxis {
    pub kind: AxisKind,
    pub min: f64,
    pub max: f64,
    pub sample_count: usize,
}

impl SweepAxis {
    pub fn new(kind: AxisKind, min: f64, max: f64, sample_count: usize) -> Result<Self, ModelError> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(ModelError::invalid_axis(format!("{kind} bounds must be finite")));
        }
        if min <= 0.0 {
            return Err(ModelError::invalid_axis(format!(
                "{kind} minimum must be positive for log spacing, got {min}"
            )));
        }
        if max <= min {
            return Err(ModelError::invalid_axis(format!(
                "{kind} maximum {max} must exceed minimum {min}"
            )));
        }
        if sample_count < 2 {
            return Err(ModelError::invalid_axis(format!(
                "{kind} needs at least 2 samples, got {sample_count}"
            )));
        }
        Ok(Self {
            kind,
            min,
            max,
            sample_count,
        })
    }

    /// Launch cost axis, 100 to 10,000 USD/kg
    pub fn launch_cost(sample_count: usize) -> Result<Self, ModelError> {
        Self::new(AxisKind::LaunchCost, LAUNCH_COST_MIN, LAUNCH_COST_MAX, sample_count)
    }

    /// Panel weight axis, 0.01 to 10 kg/W
    pub fn panel_weight(sample_count: usize) -> Result<Self, ModelError> {
        Self::new(AxisKind::PanelWeight, PANEL_WEIGHT_MIN, PANEL_WEIGHT_MAX, sample_count)
    }

    /// Sample values in ascending order, endpoints included.
    ///
    /// Each sample is `min * (max/min)^(i/(n-1))`, computed per index so the
    /// error does not accumulate along the axis.
    pub fn samples(&self) -> Vec<f64> {
        log_space(self.min, self.max, self.sample_count)
    }
}

fn log_space(min: f64, max: f64, n: usize) -> Vec<f64> {
    let ratio = max / min;
    let last = n - 1;
    (0..n)
        .map(|i| match i {
            0 => min,
            i if i == last => max,
            i => min * ratio.powf(i as f64 / last as f64),
        })
        .collect()
}
