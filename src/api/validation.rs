use std::ops::RangeInclusive;

use crate::core::FunctionParams;
use crate::error::{PlotError, PlotResult};

use super::PlotConfig;

pub const OFFSET_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const COUNT_RANGE: RangeInclusive<i32> = 10..=100;
pub const SCALE_RANGE: RangeInclusive<i32> = 1..=1000;
pub const PARAM_RANGE: RangeInclusive<f64> = 0.0..=10.0;

pub(super) fn validate_plot_config(config: &PlotConfig) -> PlotResult<()> {
    validate_offset(config.offset_x, config.offset_y)?;
    validate_domain(config.count, config.scale)?;
    validate_function_params(config.params)?;
    config.background.validate()?;
    config.grid.validate()?;
    config.foreground.validate()
}

pub(super) fn validate_offset(offset_x: f64, offset_y: f64) -> PlotResult<()> {
    for (axis, value) in [("offset_x", offset_x), ("offset_y", offset_y)] {
        if !value.is_finite() || !OFFSET_RANGE.contains(&value) {
            return Err(PlotError::InvalidData(format!(
                "{axis} must be finite and in [0, 1]"
            )));
        }
    }
    Ok(())
}

pub(super) fn validate_domain(count: i32, scale: i32) -> PlotResult<()> {
    if !COUNT_RANGE.contains(&count) {
        return Err(PlotError::InvalidData(format!(
            "count must be in [10, 100], got {count}"
        )));
    }
    if !SCALE_RANGE.contains(&scale) {
        return Err(PlotError::InvalidData(format!(
            "scale must be in [1, 1000], got {scale}"
        )));
    }
    Ok(())
}

pub(super) fn validate_function_params(params: FunctionParams) -> PlotResult<()> {
    for (name, value) in [
        ("mean", params.mean),
        ("variance", params.variance),
        ("balance", params.balance),
    ] {
        if !value.is_finite() || !PARAM_RANGE.contains(&value) {
            return Err(PlotError::InvalidData(format!(
                "{name} must be finite and in [0, 10]"
            )));
        }
    }
    if params.variance <= 0.0 {
        return Err(PlotError::InvalidData(
            "variance must be > 0".to_owned(),
        ));
    }
    Ok(())
}
