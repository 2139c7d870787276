//! LCOE model endpoints

use std::time::Instant;

use axum::extract::{FromRequestParts, Query, State};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    config::SurfaceConfig,
    model::{
        generate_surface, levelized_cost, parse_project_lifetime, CostInputs, LcoeGrid, PanelType,
        PowerGenerationRate, SelectedPoint, SweepAxis, ARRAY_CAPITAL_COST_MAX,
        ARRAY_CAPITAL_COST_MIN, DISCOUNT_RATE_MAX, DISCOUNT_RATE_MIN,
    },
    state::AppState,
};

/// Query parameters shared by the model endpoints.
///
/// Omitted inputs fall back to the configured defaults. `project_lifetime`
/// arrives as text so malformed values get a model error instead of a
/// generic query rejection. Other malformed values are rejected as
/// [`ApiError::BadRequest`].
#[derive(Debug, Default, Deserialize, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct LcoeQuery {
    pub discount_rate: Option<f64>,
    pub project_lifetime: Option<String>,
    pub power_generation_rate: Option<PowerGenerationRate>,
    pub panel_type: Option<PanelType>,
    pub array_capital_cost: Option<f64>,
    pub launch_cost: Option<f64>,
    pub panel_weight: Option<f64>,
    pub resolution: Option<usize>,
}

impl LcoeQuery {
    pub fn cost_inputs(&self, defaults: &CostInputs) -> Result<CostInputs, ApiError> {
        let project_lifetime = match &self.project_lifetime {
            Some(text) => parse_project_lifetime(text)?,
            None => defaults.project_lifetime,
        };
        let inputs = CostInputs::new(
            self.discount_rate.unwrap_or(defaults.discount_rate),
            project_lifetime,
            self.power_generation_rate
                .unwrap_or(defaults.power_generation_rate),
            self.panel_type.unwrap_or(defaults.panel_type),
            self.array_capital_cost.unwrap_or(defaults.array_capital_cost),
        )?;
        Ok(inputs)
    }

    pub fn resolution(&self, surface: &SurfaceConfig) -> Result<usize, ApiError> {
        let n = self.resolution.unwrap_or(surface.resolution);
        if !(2..=surface.max_resolution).contains(&n) {
            return Err(ApiError::BadRequest(format!(
                "resolution must be between 2 and {}, got {n}",
                surface.max_resolution
            )));
        }
        Ok(n)
    }

    pub fn point(&self) -> Result<(f64, f64), ApiError> {
        match (self.launch_cost, self.panel_weight) {
            (Some(launch_cost), Some(panel_weight)) => Ok((launch_cost, panel_weight)),
            _ => Err(ApiError::BadRequest(
                "launch_cost and panel_weight are required".to_string(),
            )),
        }
    }
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct PointResponse {
    pub inputs: CostInputs,
    pub power_generation_kwh_per_m2_day: f64,
    pub launch_cost: f64,
    pub panel_weight: f64,
    pub lcoe: f64,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct SurfaceResponse {
    #[serde(flatten)]
    pub grid: LcoeGrid,
    pub lcoe_min: f64,
    pub lcoe_max: f64,
    pub power_generation_label: String,
    pub panel_type_label: String,
    pub power_generation_kwh_per_m2_day: f64,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub inputs: CostInputs,
    pub power_generation_kwh_per_m2_day: f64,
    pub selected: SelectedPoint,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct RateOption {
    pub value: PowerGenerationRate,
    pub label: String,
    pub irradiance_kwh_per_m2_day: f64,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct PanelOption {
    pub value: PanelType,
    pub label: String,
    pub efficiency: f64,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct DefaultsResponse {
    pub inputs: CostInputs,
    pub discount_rate_range: Bounds,
    pub array_capital_cost_range: Bounds,
    pub power_generation_rates: Vec<RateOption>,
    pub panel_types: Vec<PanelOption>,
    pub launch_cost_axis: SweepAxis,
    pub panel_weight_axis: SweepAxis,
    pub max_resolution: usize,
}

fn surface_for(
    inputs: &CostInputs,
    resolution: usize,
) -> Result<(LcoeGrid, u64), ApiError> {
    let start = Instant::now();
    let grid = generate_surface(
        inputs,
        &SweepAxis::launch_cost(resolution)?,
        &SweepAxis::panel_weight(resolution)?,
    )?;
    Ok((grid, start.elapsed().as_micros() as u64))
}

/// GET /api/v1/defaults - Default inputs and control bounds
#[cfg_attr(
    feature = "swagger",
    utoipa::path(get, path = "/api/v1/defaults", responses((status = 200, description = "Default inputs and bounds")))
)]
pub async fn get_defaults(
    State(st): State<AppState>,
) -> Result<ApiResponse<DefaultsResponse>, ApiError> {
    let surface = &st.cfg.surface;
    let response = DefaultsResponse {
        inputs: st.cfg.inputs,
        discount_rate_range: Bounds {
            min: DISCOUNT_RATE_MIN,
            max: DISCOUNT_RATE_MAX,
        },
        array_capital_cost_range: Bounds {
            min: ARRAY_CAPITAL_COST_MIN,
            max: ARRAY_CAPITAL_COST_MAX,
        },
        power_generation_rates: PowerGenerationRate::iter()
            .map(|rate| RateOption {
                value: rate,
                label: rate.label().to_string(),
                irradiance_kwh_per_m2_day: rate.irradiance_kwh_per_m2_day(),
            })
            .collect(),
        panel_types: PanelType::iter()
            .map(|panel| PanelOption {
                value: panel,
                label: panel.label().to_string(),
                efficiency: panel.efficiency(),
            })
            .collect(),
        launch_cost_axis: SweepAxis::launch_cost(surface.resolution)?,
        panel_weight_axis: SweepAxis::panel_weight(surface.resolution)?,
        max_resolution: surface.max_resolution,
    };
    Ok(ApiResponse::success(response))
}

/// GET /api/v1/lcoe - Evaluate the cost model at one point
#[cfg_attr(
    feature = "swagger",
    utoipa::path(
        get,
        path = "/api/v1/lcoe",
        responses(
            (status = 200, description = "LCOE at the requested point"),
            (status = 400, description = "Invalid input or zero denominator")
        )
    )
)]
pub async fn get_lcoe(
    State(st): State<AppState>,
    q: LcoeQuery,
) -> Result<ApiResponse<PointResponse>, ApiError> {
    let inputs = q.cost_inputs(&st.cfg.inputs)?;
    let (launch_cost, panel_weight) = q.point()?;
    let lcoe = levelized_cost(launch_cost, panel_weight, &inputs)?;

    Ok(ApiResponse::success(PointResponse {
        inputs,
        power_generation_kwh_per_m2_day: inputs.power_generation_kwh_per_m2_day(),
        launch_cost,
        panel_weight,
        lcoe,
    }))
}

/// GET /api/v1/surface - LCOE over launch cost and panel weight
#[cfg_attr(
    feature = "swagger",
    utoipa::path(
        get,
        path = "/api/v1/surface",
        responses(
            (status = 200, description = "LCOE surface"),
            (status = 400, description = "Invalid input or resolution")
        )
    )
)]
pub async fn get_surface(
    State(st): State<AppState>,
    q: LcoeQuery,
) -> Result<ApiResponse<SurfaceResponse>, ApiError> {
    let inputs = q.cost_inputs(&st.cfg.inputs)?;
    let resolution = q.resolution(&st.cfg.surface)?;
    let (grid, compute_time_us) = surface_for(&inputs, resolution)?;

    let (lcoe_min, lcoe_max) = grid
        .value_range()
        .ok_or_else(|| ApiError::ComputationError("surface has no cells".to_string()))?;
    let (rows, cols) = grid.shape();

    tracing::info!(
        discount_rate = inputs.discount_rate,
        project_lifetime = inputs.project_lifetime,
        power_generation_rate = %inputs.power_generation_rate,
        panel_type = %inputs.panel_type,
        array_capital_cost = inputs.array_capital_cost,
        resolution,
        compute_time_us,
        "surface computed"
    );

    Ok(ApiResponse::success(SurfaceResponse {
        grid,
        lcoe_min,
        lcoe_max,
        power_generation_label: inputs.power_generation_rate.label().to_string(),
        panel_type_label: inputs.panel_type.label().to_string(),
        power_generation_kwh_per_m2_day: inputs.power_generation_kwh_per_m2_day(),
    })
    .with_cell_count(rows * cols)
    .with_compute_time(compute_time_us))
}

/// GET /api/v1/surface/point - Grid cell nearest to a coordinate
#[cfg_attr(
    feature = "swagger",
    utoipa::path(
        get,
        path = "/api/v1/surface/point",
        responses(
            (status = 200, description = "Selected grid cell"),
            (status = 400, description = "Invalid input or coordinate")
        )
    )
)]
pub async fn get_surface_point(
    State(st): State<AppState>,
    q: LcoeQuery,
) -> Result<ApiResponse<SelectionResponse>, ApiError> {
    let inputs = q.cost_inputs(&st.cfg.inputs)?;
    let resolution = q.resolution(&st.cfg.surface)?;
    let (launch_cost, panel_weight) = q.point()?;
    let (grid, _) = surface_for(&inputs, resolution)?;

    let selected = grid.nearest(launch_cost, panel_weight).ok_or_else(|| {
        ApiError::BadRequest("launch_cost and panel_weight must be finite".to_string())
    })?;

    Ok(ApiResponse::success(SelectionResponse {
        inputs,
        power_generation_kwh_per_m2_day: inputs.power_generation_kwh_per_m2_day(),
        selected,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_inputs_fall_back_to_defaults() {
        let defaults = CostInputs::default();
        let inputs = LcoeQuery::default().cost_inputs(&defaults).unwrap();
        assert_eq!(inputs, defaults);
    }

    #[test]
    fn test_lifetime_text_is_parsed() {
        let q = LcoeQuery {
            project_lifetime: Some("35".to_string()),
            ..Default::default()
        };
        let inputs = q.cost_inputs(&CostInputs::default()).unwrap();
        assert_eq!(inputs.project_lifetime, 35);

        let q = LcoeQuery {
            project_lifetime: Some("-1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            q.cost_inputs(&CostInputs::default()),
            Err(ApiError::ValidationError(_))
        ));
    }

    #[test]
    fn test_resolution_bounds() {
        let surface = SurfaceConfig::default();
        assert_eq!(LcoeQuery::default().resolution(&surface).unwrap(), 50);

        for n in [0, 1, surface.max_resolution + 1] {
            let q = LcoeQuery {
                resolution: Some(n),
                ..Default::default()
            };
            assert!(matches!(q.resolution(&surface), Err(ApiError::BadRequest(_))));
        }
    }

    #[test]
    fn test_point_requires_both_coordinates() {
        let q = LcoeQuery {
            launch_cost: Some(1000.0),
            ..Default::default()
        };
        assert!(q.point().is_err());
    }

    #[test]
    fn test_surface_response_serializes_flat() {
        let (grid, _) = surface_for(&CostInputs::default(), 3).unwrap();
        let response = SurfaceResponse {
            grid,
            lcoe_min: 0.0,
            lcoe_max: 1.0,
            power_generation_label: PowerGenerationRate::Space.label().to_string(),
            panel_type_label: PanelType::MonocrystallineSi.label().to_string(),
            power_generation_kwh_per_m2_day: 0.21 * 32.6,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["launch_cost"].as_array().unwrap().len(), 3);
        assert_eq!(json["lcoe"].as_array().unwrap().len(), 3);
        assert_eq!(json["inputs"]["power_generation_rate"], "space");
        assert_eq!(json["inputs"]["panel_type"], "monocrystalline_si");
    }

    #[test]
    fn test_panel_type_falls_back_to_default() {
        let defaults = CostInputs {
            panel_type: PanelType::MultiJunctionGaas,
            ..CostInputs::default()
        };
        let inputs = LcoeQuery::default().cost_inputs(&defaults).unwrap();
        assert_eq!(inputs.panel_type, PanelType::MultiJunctionGaas);

        let q = LcoeQuery {
            panel_type: Some(PanelType::MonocrystallineSi),
            ..Default::default()
        };
        let inputs = q.cost_inputs(&defaults).unwrap();
        assert_eq!(inputs.panel_type, PanelType::MonocrystallineSi);
    }
}
