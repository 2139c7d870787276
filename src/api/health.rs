use std::time::Instant;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::model::{levelized_cost, CostInputs, PanelType, PowerGenerationRate};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    model: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_us: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn healthy(latency_us: u64) -> Self {
        Self {
            status: "healthy".to_string(),
            latency_us: Some(latency_us),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            latency_us: None,
            error: Some(error),
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// GET /api/v1/healthz - Liveness check
pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /api/v1/health - Health check with a model self-test
pub async fn health_check() -> impl IntoResponse {
    let model = check_model();
    let healthy = model.is_healthy();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
        checks: HealthChecks { model },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

/// Evaluate a known scenario: 5 %, 20 years, 1.00 USD/W at (1000 USD/kg, 0.1 kg/W)
fn check_model() -> ComponentHealth {
    let start = Instant::now();
    let inputs = CostInputs {
        discount_rate: 5.0,
        project_lifetime: 20,
        power_generation_rate: PowerGenerationRate::Space,
        panel_type: PanelType::MonocrystallineSi,
        array_capital_cost: 1.00,
    };
    let expected = 101.0 / 20.05;

    match levelized_cost(1000.0, 0.1, &inputs) {
        Ok(lcoe) if (lcoe - expected).abs() < 1e-9 => {
            ComponentHealth::healthy(start.elapsed().as_micros() as u64)
        }
        Ok(lcoe) => {
            tracing::error!(lcoe, expected, "model self-check mismatch");
            ComponentHealth::unhealthy(format!("expected {expected}, got {lcoe}"))
        }
        Err(e) => {
            tracing::error!(error = %e, "model self-check failed");
            ComponentHealth::unhealthy(e.to_string())
        }
    }
}
