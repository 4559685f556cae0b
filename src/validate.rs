//! Input checks applied before a condition reaches the Nernst model
//!
//! The model itself never corrects its inputs. Callers collecting
//! user input run [`validate_condition`] first, which rejects values
//! outside the supported ranges and clamps the hydrogen fraction away
//! from 0 and 1.

use log::warn;

use crate::constants::{
    H2_FRACTION_CLAMP, H2_PERCENT_BOUNDS, PRESSURE_ATM_BOUNDS, TEMPERATURE_C_BOUNDS,
};
use crate::error::{OcvError, Result};
use crate::models::{GasFeed, OperatingCondition};

/// Clamp a hydrogen fraction into the open interval the model accepts
pub fn clamp_h2_fraction(x: f64) -> f64 {
    let (lo, hi) = H2_FRACTION_CLAMP;
    x.clamp(lo, hi)
}

/// Ensure `value` lies in the inclusive range `bounds`
pub fn check_range(name: &'static str, value: f64, bounds: (f64, f64)) -> Result<f64> {
    let (min, max) = bounds;
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(OcvError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Check a hydrogen percentage [%] and return the clamped fraction
pub fn h2_fraction_from_percent(percent: f64) -> Result<f64> {
    let percent = check_range("h2_percent", percent, H2_PERCENT_BOUNDS)?;
    Ok(clamp_h2_fraction(percent / 100.0))
}

/// Validate a user-supplied condition and return the one to evaluate
pub fn validate_condition(condition: &OperatingCondition) -> Result<OperatingCondition> {
    check_range("temperature_c", condition.temperature_c, TEMPERATURE_C_BOUNDS)?;

    let feed = match condition.feed {
        GasFeed::Partial { p_h2, p_h2o, p_o2 } => {
            check_range("p_h2", p_h2, PRESSURE_ATM_BOUNDS)?;
            check_range("p_h2o", p_h2o, PRESSURE_ATM_BOUNDS)?;
            check_range("p_o2", p_o2, PRESSURE_ATM_BOUNDS)?;
            condition.feed
        }
        GasFeed::Ratio {
            fuel_pressure_atm,
            air_pressure_atm,
            h2_fraction,
            oxidant_ratio,
        } => {
            check_range("fuel_pressure_atm", fuel_pressure_atm, PRESSURE_ATM_BOUNDS)?;
            check_range("air_pressure_atm", air_pressure_atm, PRESSURE_ATM_BOUNDS)?;
            check_range("oxidant_ratio", oxidant_ratio, (f64::MIN_POSITIVE, 1.0))?;
            if h2_fraction.is_nan() {
                return Err(OcvError::OutOfRange {
                    name: "h2_fraction",
                    value: h2_fraction,
                    min: H2_FRACTION_CLAMP.0,
                    max: H2_FRACTION_CLAMP.1,
                });
            }

            let clamped = clamp_h2_fraction(h2_fraction);
            if clamped != h2_fraction {
                warn!("hydrogen fraction {} clamped to {}", h2_fraction, clamped);
            }
            GasFeed::Ratio {
                fuel_pressure_atm,
                air_pressure_atm,
                h2_fraction: clamped,
                oxidant_ratio,
            }
        }
    };

    Ok(OperatingCondition {
        temperature_c: condition.temperature_c,
        feed,
    })
}

/// Check reference total pressures for comparison curves
///
/// Each pressure must lie in the supported range, and the condition it
/// produces from `template` must pass [`validate_condition`] (scaling
/// partial pressures can push p_O2 out of range).
pub fn validate_reference_pressures(
    template: &OperatingCondition,
    pressures_atm: &[f64],
) -> Result<()> {
    for &p in pressures_atm {
        check_range("reference", p, PRESSURE_ATM_BOUNDS)?;
        validate_condition(&template.with_total_pressure(p))?;
    }
    Ok(())
}
