//! Nernst equation for the H2/O2 solid-oxide cell

use log::trace;

use crate::constants::{
    ELECTRONS, F, GIBBS_DH, GIBBS_DS, LINEAR_E0_INTERCEPT, LINEAR_E0_SLOPE, R,
};
use crate::error::{OcvError, Result};
use crate::models::{E0Model, GasFeed, OcvReport, OperatingCondition, PartialPressures};

/// Standard potential E0 [V] at `temperature_k`
///
/// Defined for any positive temperature, physically meaningful over the
/// supported operating range only.
pub fn standard_potential(model: E0Model, temperature_k: f64) -> Result<f64> {
    check_temperature(temperature_k)?;

    let e0 = match model {
        E0Model::Gibbs => {
            let delta_g = GIBBS_DH + GIBBS_DS * temperature_k;
            -delta_g / (ELECTRONS * F)
        }
        E0Model::Linear => LINEAR_E0_INTERCEPT + LINEAR_E0_SLOPE * temperature_k,
    };
    Ok(e0)
}

/// Resolve the partial pressures of H2, H2O and O2 for a condition
pub fn partial_pressures(feed: &GasFeed) -> PartialPressures {
    match *feed {
        GasFeed::Partial { p_h2, p_h2o, p_o2 } => PartialPressures { p_h2, p_h2o, p_o2 },
        GasFeed::Ratio {
            fuel_pressure_atm,
            air_pressure_atm,
            h2_fraction,
            oxidant_ratio,
        } => PartialPressures {
            p_h2: h2_fraction * fuel_pressure_atm,
            p_h2o: (1.0 - h2_fraction) * fuel_pressure_atm,
            p_o2: oxidant_ratio * air_pressure_atm,
        },
    }
}

/// Open-circuit voltage [V] for a single operating condition
pub fn compute_ocv(condition: &OperatingCondition, model: E0Model) -> Result<f64> {
    Ok(evaluate(condition, model)?.ocv)
}

/// Evaluate the Nernst equation and keep every intermediate term
pub fn evaluate(condition: &OperatingCondition, model: E0Model) -> Result<OcvReport> {
    let temperature_k = condition.temperature_k();
    let e0 = standard_potential(model, temperature_k)?;

    let pressures = partial_pressures(&condition.feed);
    let nernst_term = nernst_term(temperature_k, &pressures)?;
    let ocv = e0 + nernst_term;

    trace!(
        "T={:.2}K p_H2={:.5} p_H2O={:.5} p_O2={:.5} -> E0={:.5} OCV={:.5}",
        temperature_k, pressures.p_h2, pressures.p_h2o, pressures.p_o2, e0, ocv
    );

    Ok(OcvReport {
        model,
        temperature_c: condition.temperature_c,
        temperature_k,
        pressures,
        e0,
        nernst_term,
        ocv,
    })
}

/// RT/2F * ln(p_H2 * sqrt(p_O2) / p_H2O)
fn nernst_term(temperature_k: f64, p: &PartialPressures) -> Result<f64> {
    if [p.p_h2, p.p_h2o, p.p_o2]
        .iter()
        .any(|v| v.is_nan() || *v <= 0.0)
    {
        return Err(domain_error(p));
    }

    let arg = p.log_argument();
    if !arg.is_finite() || arg <= 0.0 {
        return Err(domain_error(p));
    }

    let term = R * temperature_k / (ELECTRONS * F) * arg.ln();
    if !term.is_finite() {
        return Err(domain_error(p));
    }
    Ok(term)
}

fn check_temperature(temperature_k: f64) -> Result<()> {
    if temperature_k.is_finite() && temperature_k > 0.0 {
        Ok(())
    } else {
        Err(OcvError::NonPositiveTemperature(temperature_k))
    }
}

fn domain_error(p: &PartialPressures) -> OcvError {
    OcvError::Domain {
        p_h2: p.p_h2,
        p_h2o: p.p_h2o,
        p_o2: p.p_o2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use crate::constants::KELVIN_OFFSET;

    fn ratio_800(x: f64) -> OperatingCondition {
        OperatingCondition::ratio(800.0, 1.0, 1.0, x)
    }

    #[test]
    fn gibbs_reference_point() {
        // T=700 C, p_H2=0.97, p_H2O=0.03, p_O2=0.21
        let c = OperatingCondition::partial(700.0, 0.97, 0.03, 0.21);
        let report = evaluate(&c, E0Model::Gibbs).unwrap();

        assert_abs_diff_eq!(report.e0, 1.001183, epsilon = 1e-5);
        assert_abs_diff_eq!(report.ocv, 1.114210, epsilon = 1e-5);
        assert_eq!(format!("{:.4} V", report.ocv), "1.1142 V");
    }

    #[test]
    fn linear_fit_reference_point() {
        let c = OperatingCondition::partial(700.0, 0.97, 0.03, 0.21);
        let ocv = compute_ocv(&c, E0Model::Linear).unwrap();
        assert_abs_diff_eq!(ocv, 1.152096, epsilon = 1e-5);
    }

    #[test]
    fn standard_potential_formulas() {
        let t = 1073.15;
        assert_relative_eq!(
            standard_potential(E0Model::Linear, t).unwrap(),
            1.2844 - 0.0002521 * t,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            standard_potential(E0Model::Gibbs, t).unwrap(),
            (247_500.0 - 55.8 * t) / (2.0 * 96485.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn standard_potential_falls_with_temperature() {
        for model in [E0Model::Linear, E0Model::Gibbs] {
            let e0_700 = standard_potential(model, 700.0 + KELVIN_OFFSET).unwrap();
            let e0_1000 = standard_potential(model, 1000.0 + KELVIN_OFFSET).unwrap();
            assert!(e0_700 > e0_1000, "{model}: {e0_700} <= {e0_1000}");
        }
    }

    #[test]
    fn standard_potential_rejects_non_physical_temperature() {
        assert_eq!(
            standard_potential(E0Model::Linear, 0.0),
            Err(OcvError::NonPositiveTemperature(0.0))
        );
        assert!(standard_potential(E0Model::Gibbs, f64::NAN).is_err());
    }

    #[test]
    fn ratio_feed_partial_pressures() {
        let c = OperatingCondition::ratio(800.0, 2.0, 3.0, 0.25);
        let p = partial_pressures(&c.feed);
        assert_relative_eq!(p.p_h2, 0.5);
        assert_relative_eq!(p.p_h2o, 1.5);
        assert_relative_eq!(p.p_o2, 0.63, epsilon = 1e-12);
    }

    #[test]
    fn ocv_rises_with_hydrogen_fraction() {
        for model in [E0Model::Linear, E0Model::Gibbs] {
            let low = compute_ocv(&ratio_800(0.3), model).unwrap();
            let high = compute_ocv(&ratio_800(0.7), model).unwrap();
            assert!(high > low);

            let lower = compute_ocv(&ratio_800(0.05), model).unwrap();
            let higher = compute_ocv(&ratio_800(0.95), model).unwrap();
            assert!(higher > lower);
        }
    }

    #[test]
    fn clamp_bounds_are_finite() {
        for x in [0.0001, 0.9999] {
            let ocv = compute_ocv(&ratio_800(x), E0Model::Linear).unwrap();
            assert!(ocv.is_finite());
        }
    }

    #[test]
    fn unclamped_fraction_is_domain_error() {
        for x in [0.0, 1.0] {
            let err = compute_ocv(&ratio_800(x), E0Model::Linear).unwrap_err();
            assert!(matches!(err, OcvError::Domain { .. }), "x={x}: {err:?}");
            assert!(err.is_domain());
        }
    }

    #[test]
    fn non_positive_pressures_are_domain_errors() {
        let cases = [
            OperatingCondition::partial(800.0, 0.5, 0.0, 0.21),
            OperatingCondition::partial(800.0, -0.1, 0.5, 0.21),
            OperatingCondition::partial(800.0, 0.5, 0.5, -0.21),
            OperatingCondition::partial(800.0, 0.5, 0.5, 0.0),
            OperatingCondition::partial(800.0, f64::NAN, 0.5, 0.21),
        ];
        for c in cases {
            assert!(matches!(
                compute_ocv(&c, E0Model::Gibbs),
                Err(OcvError::Domain { .. })
            ));
        }
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let c = ratio_800(0.5);
        let first = compute_ocv(&c, E0Model::Linear).unwrap();
        for _ in 0..10 {
            assert_eq!(compute_ocv(&c, E0Model::Linear).unwrap(), first);
        }
        assert_abs_diff_eq!(first, 0.977780, epsilon = 1e-5);
    }

    #[test]
    fn plausible_envelope_over_typical_conditions() {
        for t in [600.0, 700.0, 800.0, 900.0, 1000.0] {
            for x in [0.1, 0.5, 0.9] {
                for p in [0.5, 1.0, 5.0] {
                    let c = OperatingCondition::ratio(t, p, p, x);
                    for model in [E0Model::Linear, E0Model::Gibbs] {
                        let ocv = compute_ocv(&c, model).unwrap();
                        assert!((0.5..=1.4).contains(&ocv), "T={t} x={x} p={p}: {ocv}");
                    }
                }
            }
        }
    }

    #[test]
    fn report_breaks_down_terms() {
        let report = evaluate(&ratio_800(0.5), E0Model::Gibbs).unwrap();
        assert_relative_eq!(report.e0 + report.nernst_term, report.ocv);
        assert_relative_eq!(report.temperature_k, 1073.15, epsilon = 1e-9);

        let text = report.to_string();
        assert!(text.contains("E0 (gibbs)"));
        assert!(text.contains(&format!("OCV: {:.4} V", report.ocv)));
    }
}
