//! CSV export of OCV series

use std::io::Write;

use anyhow::{Result, bail};

use crate::models::OcvSeries;

const OCV_COLUMN: &str = "ocv_v";

fn format_ocv(ocv: f64) -> String {
    format!("{:.6}", ocv)
}

/// Independent variable at six decimals, trailing zeros dropped
fn format_x(x: f64) -> String {
    let s = format!("{:.6}", x);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Write one series as `<independent_variable>,ocv_v` with a header row
pub fn write_series<W: Write>(writer: W, series: &OcvSeries) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([series.vary.column_name(), OCV_COLUMN])?;

    for point in &series.points {
        wtr.write_record([
            format_x(series.vary.display_value(point.x)),
            format_ocv(point.ocv),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write several series sharing one grid as a wide table, one column per series
pub fn write_comparison<W: Write>(writer: W, curves: &[OcvSeries]) -> Result<()> {
    let Some(first) = curves.first() else {
        bail!("no curves to export");
    };

    for curve in &curves[1..] {
        if curve.vary != first.vary || !curve.xs().eq(first.xs()) {
            bail!(
                "curve '{}' does not share the grid of '{}'",
                curve.label,
                first.label
            );
        }
    }

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![first.vary.column_name().to_string()];
    header.extend(curves.iter().map(|c| c.label.clone()));
    wtr.write_record(&header)?;

    for (i, point) in first.points.iter().enumerate() {
        let mut row = vec![format_x(first.vary.display_value(point.x))];
        row.extend(curves.iter().map(|c| format_ocv(c.points[i].ocv)));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
