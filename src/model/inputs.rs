use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

use super::ModelError;

pub const DISCOUNT_RATE_MIN: f64 = 1.0;
pub const DISCOUNT_RATE_MAX: f64 = 15.0;
pub const ARRAY_CAPITAL_COST_MIN: f64 = 0.10;
pub const ARRAY_CAPITAL_COST_MAX: f64 = 10.00;

/// Solar resource category offered by the generation rate selector.
///
/// The selected category is carried alongside the other inputs and reported
/// back to the caller. It does not enter the LCOE formula.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PowerGenerationRate {
    /// Southwest US ground site, weather and day/night included
    Terrestrial,
    /// AM0 spectrum with continuous sunlight
    #[default]
    Space,
}

impl PowerGenerationRate {
    /// Annualized average solar irradiance in kWh/m²/day
    pub fn irradiance_kwh_per_m2_day(&self) -> f64 {
        match self {
            PowerGenerationRate::Terrestrial => 5.5,
            PowerGenerationRate::Space => 32.6,
        }
    }

    /// Human readable label as shown in the selector
    pub fn label(&self) -> &'static str {
        match self {
            PowerGenerationRate::Terrestrial => "5.5 kWh/m2/day (terrestrial)",
            PowerGenerationRate::Space => "32.6 kWh/m2/day (space)",
        }
    }
}

/// Photovoltaic panel technology offered by the panel type selector.
///
/// Like [`PowerGenerationRate`] it is reported back but not used by the LCOE formula.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PanelType {
    /// Commercial terrestrial monocrystalline Si
    #[default]
    MonocrystallineSi,
    /// Space-grade multi-junction GaAs
    MultiJunctionGaas,
}

impl PanelType {
    /// Cell conversion efficiency as a fraction
    pub fn efficiency(&self) -> f64 {
        match self {
            PanelType::MonocrystallineSi => 0.21,
            PanelType::MultiJunctionGaas => 0.32,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PanelType::MonocrystallineSi => "commercial terrestrial (monocrystalline Si)",
            PanelType::MultiJunctionGaas => "Space-based (multi-junction GaAs)",
        }
    }
}

/// The scalar inputs of the cost model.
///
/// Immutable value record; a new one is built for every recomputation.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct CostInputs {
    /// Discount rate in percent
    #[validate(range(min = 1.0, max = 15.0))]
    pub discount_rate: f64,
    /// Project lifetime in whole years
    #[validate(range(min = 1))]
    pub project_lifetime: u32,
    pub power_generation_rate: PowerGenerationRate,
    #[serde(default)]
    pub panel_type: PanelType,
    /// Array capital cost in USD/W
    #[validate(range(min = 0.10, max = 10.00))]
    pub array_capital_cost: f64,
}

impl Default for CostInputs {
    fn default() -> Self {
        Self {
            discount_rate: 7.7,
            project_lifetime: 10,
            power_generation_rate: PowerGenerationRate::Space,
            panel_type: PanelType::MonocrystallineSi,
            array_capital_cost: 1.00,
        }
    }
}

impl CostInputs {
    /// Build inputs and check them against the input control bounds
    pub fn new(
        discount_rate: f64,
        project_lifetime: u32,
        power_generation_rate: PowerGenerationRate,
        panel_type: PanelType,
        array_capital_cost: f64,
    ) -> Result<Self, ModelError> {
        let inputs = Self {
            discount_rate,
            project_lifetime,
            power_generation_rate,
            panel_type,
            array_capital_cost,
        };
        inputs.check_bounds()?;
        Ok(inputs)
    }

    /// Validate against the control bounds, including NaN which range checks let through
    pub fn check_bounds(&self) -> Result<(), ModelError> {
        if !self.discount_rate.is_finite() || !self.array_capital_cost.is_finite() {
            return Err(ModelError::invalid_input(
                "discount rate and array capital cost must be finite numbers",
            ));
        }
        self.validate()?;
        Ok(())
    }

    /// Daily energy yield in kWh/m²/day: panel efficiency times irradiance.
    ///
    /// Informational only; the LCOE formula does not use it.
    pub fn power_generation_kwh_per_m2_day(&self) -> f64 {
        self.panel_type.efficiency() * self.power_generation_rate.irradiance_kwh_per_m2_day()
    }

    /// Denominator of the LCOE formula: lifetime plus the discount rate as a fraction
    pub fn denominator(&self) -> f64 {
        self.project_lifetime as f64 + self.discount_rate / 100.0
    }
}

/// Parse project lifetime from free text; only positive integers are accepted
pub fn parse_project_lifetime(text: &str) -> Result<u32, ModelError> {
    let value: i64 = text.trim().parse().map_err(|_| {
        ModelError::invalid_input(format!(
            "project lifetime '{}' is not a valid positive integer",
            text.trim()
        ))
    })?;
    if value <= 0 {
        return Err(ModelError::invalid_input(
            "project lifetime must be a positive integer",
        ));
    }
    u32::try_from(value)
        .map_err(|_| ModelError::invalid_input(format!("project lifetime {value} is too large")))
}
