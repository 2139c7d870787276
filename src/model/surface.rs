use std::time::Instant;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{levelized_cost, AxisKind, CostInputs, ModelError, SweepAxis};

/// LCOE evaluated over the cross product of two sweep axes.
///
/// `lcoe[i][j]` belongs to `launch_cost[i]` and `panel_weight[j]`.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LcoeGrid {
    pub inputs: CostInputs,
    pub launch_cost: Vec<f64>,
    pub panel_weight: Vec<f64>,
    pub lcoe: Vec<Vec<f64>>,
}

/// A grid cell picked by coordinate
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedPoint {
    pub launch_cost: f64,
    pub panel_weight: f64,
    pub lcoe: f64,
    pub launch_cost_index: usize,
    pub panel_weight_index: usize,
}

/// Evaluate the cost model on every (launch cost, panel weight) pair.
///
/// Any failing cell fails the whole surface.
pub fn generate_surface(
    inputs: &CostInputs,
    launch_axis: &SweepAxis,
    weight_axis: &SweepAxis,
) -> Result<LcoeGrid, ModelError> {
    if launch_axis.kind != AxisKind::LaunchCost {
        return Err(ModelError::invalid_axis(format!(
            "first axis must sweep launch_cost, got {}",
            launch_axis.kind
        )));
    }
    if weight_axis.kind != AxisKind::PanelWeight {
        return Err(ModelError::invalid_axis(format!(
            "second axis must sweep panel_weight, got {}",
            weight_axis.kind
        )));
    }

    let start = Instant::now();
    let launch_cost = launch_axis.samples();
    let panel_weight = weight_axis.samples();

    let lcoe = launch_cost
        .iter()
        .map(|&launch| {
            panel_weight
                .iter()
                .map(|&weight| levelized_cost(launch, weight, inputs))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        rows = launch_cost.len(),
        cols = panel_weight.len(),
        duration_us = start.elapsed().as_micros() as u64,
        "LCOE surface generated"
    );

    Ok(LcoeGrid {
        inputs: *inputs,
        launch_cost,
        panel_weight,
        lcoe,
    })
}

impl LcoeGrid {
    /// (launch cost samples, panel weight samples)
    pub fn shape(&self) -> (usize, usize) {
        (self.launch_cost.len(), self.panel_weight.len())
    }

    pub fn get(&self, launch_cost_index: usize, panel_weight_index: usize) -> Option<f64> {
        self.lcoe
            .get(launch_cost_index)
            .and_then(|row| row.get(panel_weight_index))
            .copied()
    }

    /// Smallest and largest LCOE on the surface
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.lcoe
            .iter()
            .flatten()
            .copied()
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()
    }

    /// Cell whose axis samples are closest to the requested coordinate
    pub fn nearest(&self, launch_cost: f64, panel_weight: f64) -> Option<SelectedPoint> {
        let i = nearest_index(&self.launch_cost, launch_cost)?;
        let j = nearest_index(&self.panel_weight, panel_weight)?;
        Some(SelectedPoint {
            launch_cost: self.launch_cost[i],
            panel_weight: self.panel_weight[j],
            lcoe: self.get(i, j)?,
            launch_cost_index: i,
            panel_weight_index: j,
        })
    }
}

fn nearest_index(samples: &[f64], target: f64) -> Option<usize> {
    if !target.is_finite() {
        return None;
    }
    samples
        .iter()
        .map(|s| (s - target).abs())
        .position_min_by(|a, b| a.total_cmp(b))
}
