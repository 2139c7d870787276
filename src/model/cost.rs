use super::{CostInputs, ModelError};

/// Levelized cost of energy at one (launch cost, array weight) point.
///
/// `LCOE = (launch_cost * array_weight + array_capital_cost) / (project_lifetime + discount_rate / 100)`
///
/// `launch_cost` is in USD/kg and `array_weight` in kg/W. Only structural
/// validity is checked here; control bounds belong to [`CostInputs::check_bounds`].
pub fn levelized_cost(
    launch_cost: f64,
    array_weight: f64,
    inputs: &CostInputs,
) -> Result<f64, ModelError> {
    if !(launch_cost.is_finite() && launch_cost > 0.0) {
        return Err(ModelError::invalid_input(format!(
            "launch cost must be a positive number, got {launch_cost}"
        )));
    }
    if !(array_weight.is_finite() && array_weight > 0.0) {
        return Err(ModelError::invalid_input(format!(
            "array weight must be a positive number, got {array_weight}"
        )));
    }
    if inputs.project_lifetime == 0 {
        return Err(ModelError::invalid_input(
            "project lifetime must be a positive integer",
        ));
    }
    if !inputs.discount_rate.is_finite() {
        return Err(ModelError::invalid_input("discount rate must be finite"));
    }
    if !(inputs.array_capital_cost.is_finite() && inputs.array_capital_cost >= 0.0) {
        return Err(ModelError::invalid_input(
            "array capital cost must be a non-negative number",
        ));
    }

    let denominator = inputs.denominator();
    if denominator <= 0.0 {
        return Err(ModelError::DivisionByZero { denominator });
    }

    let lifetime_cost = launch_cost * array_weight + inputs.array_capital_cost;
    let lcoe = lifetime_cost / denominator;
    if !lcoe.is_finite() {
        return Err(ModelError::invalid_input(format!(
            "LCOE overflowed for launch cost {launch_cost} and array weight {array_weight}"
        )));
    }
    Ok(lcoe)
}
