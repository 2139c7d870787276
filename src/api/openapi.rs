use utoipa::OpenApi;

use crate::api::lcoe::{
    Bounds, DefaultsResponse, PanelOption, PointResponse, RateOption, SelectionResponse,
    SurfaceResponse,
};
use crate::model::{
    AxisKind, CostInputs, LcoeGrid, PanelType, PowerGenerationRate, SelectedPoint, SweepAxis,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::lcoe::get_defaults,
        crate::api::lcoe::get_lcoe,
        crate::api::lcoe::get_surface,
        crate::api::lcoe::get_surface_point,
    ),
    components(
        schemas(
            CostInputs, PowerGenerationRate, PanelType, SweepAxis, AxisKind, LcoeGrid,
            SelectedPoint, PointResponse, SurfaceResponse, SelectionResponse, DefaultsResponse,
            RateOption, PanelOption, Bounds
        )
    ),
    tags((name = "lcoe", description = "Space solar LCOE API v1"))
)]
pub struct ApiDoc;
