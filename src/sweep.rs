//! OCV curves over a swept input

use log::debug;
use rayon::prelude::*;

use crate::error::{OcvError, Result};
use crate::models::{E0Model, OcvPoint, OcvSeries, OperatingCondition, SweepVariable};
use crate::nernst::compute_ocv;

/// `n` evenly spaced values from `start` to `stop`, both inclusive
pub fn linspace(start: f64, stop: f64, n: usize) -> Result<Vec<f64>> {
    if n < 2 {
        return Err(OcvError::InvalidGrid(format!(
            "need at least 2 points, got {}",
            n
        )));
    }
    if !start.is_finite() || !stop.is_finite() {
        return Err(OcvError::InvalidGrid(format!(
            "bounds must be finite, got {} to {}",
            start, stop
        )));
    }

    let step = (stop - start) / (n - 1) as f64;
    let mut grid: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    // Pin the end point against accumulated rounding
    grid[n - 1] = stop;
    Ok(grid)
}

/// Evaluate the OCV at every grid value, holding everything but `vary` fixed
///
/// Points come back in grid order. The first failing point aborts the sweep.
pub fn sweep(
    grid: &[f64],
    template: &OperatingCondition,
    vary: SweepVariable,
    model: E0Model,
) -> Result<OcvSeries> {
    sweep_labeled("current", grid, template, vary, model)
}

fn sweep_labeled(
    label: &str,
    grid: &[f64],
    template: &OperatingCondition,
    vary: SweepVariable,
    model: E0Model,
) -> Result<OcvSeries> {
    debug!(
        "sweeping {:?} over {} points with {} E0 ({})",
        vary,
        grid.len(),
        model,
        label
    );

    let points = grid
        .iter()
        .map(|&x| {
            let condition = vary.apply(*template, x);
            compute_ocv(&condition, model).map(|ocv| OcvPoint { x, ocv })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(OcvSeries {
        label: label.to_string(),
        vary,
        points,
    })
}

/// One curve per reference total pressure, in the order of `pressures_atm`
///
/// Each curve applies the pressure to both electrodes of `template` and is
/// otherwise identical to [`sweep`]. Curves are independent and evaluated in
/// parallel.
pub fn reference_curves(
    grid: &[f64],
    template: &OperatingCondition,
    vary: SweepVariable,
    pressures_atm: &[f64],
    model: E0Model,
) -> Result<Vec<OcvSeries>> {
    pressures_atm
        .par_iter()
        .map(|&p| {
            let reference = template.with_total_pressure(p);
            sweep_labeled(&format!("{} atm", p), grid, &reference, vary, model)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn template() -> OperatingCondition {
        OperatingCondition::ratio(800.0, 1.0, 1.0, 0.5)
    }

    #[test]
    fn linspace_includes_both_ends() {
        let grid = linspace(400.0, 1100.0, 8).unwrap();
        assert_eq!(grid.len(), 8);
        assert_eq!(grid[0], 400.0);
        assert_eq!(grid[7], 1100.0);
        assert_abs_diff_eq!(grid[1], 500.0, epsilon = 1e-9);
    }

    #[test]
    fn linspace_rejects_degenerate_grids() {
        assert!(matches!(linspace(0.0, 1.0, 1), Err(OcvError::InvalidGrid(_))));
        assert!(linspace(f64::NAN, 1.0, 10).is_err());
    }

    #[test]
    fn sweep_matches_pointwise_evaluation() {
        let grid = [1000.0, 450.0, 700.0, 875.5];
        let series = sweep(&grid, &template(), SweepVariable::Temperature, E0Model::Gibbs).unwrap();

        assert_eq!(series.len(), grid.len());
        for (point, &t) in series.points.iter().zip(grid.iter()) {
            assert_eq!(point.x, t);
            let direct = compute_ocv(&template().with_temperature_c(t), E0Model::Gibbs).unwrap();
            assert_abs_diff_eq!(point.ocv, direct, epsilon = 1e-9);
        }
    }

    #[test]
    fn hydrogen_sweep_is_increasing() {
        let grid = linspace(0.01, 0.99, 50).unwrap();
        let series = sweep(
            &grid,
            &template(),
            SweepVariable::HydrogenFraction,
            E0Model::Linear,
        )
        .unwrap();

        let ocvs: Vec<f64> = series.ocvs().collect();
        assert!(ocvs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn empty_grid_gives_empty_series() {
        let series = sweep(&[], &template(), SweepVariable::Temperature, E0Model::Linear).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn sweep_fails_on_singular_point() {
        let grid = [0.2, 0.5, 1.0];
        let err = sweep(
            &grid,
            &template(),
            SweepVariable::HydrogenFraction,
            E0Model::Linear,
        )
        .unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn reference_curves_keep_pressure_order() {
        let grid = linspace(600.0, 1000.0, 5).unwrap();
        let curves = reference_curves(
            &grid,
            &template(),
            SweepVariable::Temperature,
            &[1.0, 3.0, 5.0],
            E0Model::Linear,
        )
        .unwrap();

        let labels: Vec<&str> = curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["1 atm", "3 atm", "5 atm"]);

        // Higher total pressure raises p_O2 and with it the OCV
        for i in 0..grid.len() {
            assert!(curves[1].points[i].ocv > curves[0].points[i].ocv);
            assert!(curves[2].points[i].ocv > curves[1].points[i].ocv);
        }

        let one_atm = sweep(&grid, &template(), SweepVariable::Temperature, E0Model::Linear).unwrap();
        for (a, b) in curves[0].ocvs().zip(one_atm.ocvs()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }
}
