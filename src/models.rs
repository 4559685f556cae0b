//! Value records for operating conditions and OCV results

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::constants::{AIR_O2_FRACTION, KELVIN_OFFSET};

/// Formulation used for the standard potential E0(T)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum E0Model {
    /// E0 = -dG(T) / 2F with dG = -247500 + 55.8 T
    Gibbs,
    /// E0 = 1.2844 - 0.0002521 T
    #[default]
    Linear,
}

impl fmt::Display for E0Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            E0Model::Gibbs => write!(f, "gibbs"),
            E0Model::Linear => write!(f, "linear"),
        }
    }
}

impl FromStr for E0Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gibbs" => Ok(E0Model::Gibbs),
            "linear" | "linear-fit" => Ok(E0Model::Linear),
            other => Err(format!("unknown E0 model '{}' (expected gibbs or linear)", other)),
        }
    }
}

/// How the gas composition on each electrode is given
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GasFeed {
    /// Partial pressures given directly [atm]
    Partial { p_h2: f64, p_h2o: f64, p_o2: f64 },
    /// Total pressures plus hydrogen volume fraction of the fuel stream
    Ratio {
        fuel_pressure_atm: f64,
        air_pressure_atm: f64,
        h2_fraction: f64,
        oxidant_ratio: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingCondition {
    pub temperature_c: f64,
    pub feed: GasFeed,
}

impl OperatingCondition {
    pub fn partial(temperature_c: f64, p_h2: f64, p_h2o: f64, p_o2: f64) -> Self {
        Self {
            temperature_c,
            feed: GasFeed::Partial { p_h2, p_h2o, p_o2 },
        }
    }

    /// Ratio-based condition with air (21 % O2) on the cathode
    pub fn ratio(
        temperature_c: f64,
        fuel_pressure_atm: f64,
        air_pressure_atm: f64,
        h2_fraction: f64,
    ) -> Self {
        Self {
            temperature_c,
            feed: GasFeed::Ratio {
                fuel_pressure_atm,
                air_pressure_atm,
                h2_fraction,
                oxidant_ratio: AIR_O2_FRACTION,
            },
        }
    }

    pub fn with_oxidant_ratio(mut self, ratio: f64) -> Self {
        if let GasFeed::Ratio { oxidant_ratio, .. } = &mut self.feed {
            *oxidant_ratio = ratio;
        }
        self
    }

    pub fn temperature_k(&self) -> f64 {
        self.temperature_c + KELVIN_OFFSET
    }

    pub fn with_temperature_c(mut self, temperature_c: f64) -> Self {
        self.temperature_c = temperature_c;
        self
    }

    /// Replace the hydrogen fraction, keeping the fuel-side total pressure.
    pub fn with_h2_fraction(mut self, x: f64) -> Self {
        match &mut self.feed {
            GasFeed::Partial { p_h2, p_h2o, .. } => {
                let total = *p_h2 + *p_h2o;
                *p_h2 = x * total;
                *p_h2o = (1.0 - x) * total;
            }
            GasFeed::Ratio { h2_fraction, .. } => *h2_fraction = x,
        }
        self
    }

    /// Set both electrode total pressures to `pressure_atm`.
    ///
    /// In partial mode all three partial pressures are scaled by the same
    /// factor so that p_H2 + p_H2O equals `pressure_atm`.
    pub fn with_total_pressure(mut self, pressure_atm: f64) -> Self {
        match &mut self.feed {
            GasFeed::Partial { p_h2, p_h2o, p_o2 } => {
                let scale = pressure_atm / (*p_h2 + *p_h2o);
                *p_h2 *= scale;
                *p_h2o *= scale;
                *p_o2 *= scale;
            }
            GasFeed::Ratio {
                fuel_pressure_atm,
                air_pressure_atm,
                ..
            } => {
                *fuel_pressure_atm = pressure_atm;
                *air_pressure_atm = pressure_atm;
            }
        }
        self
    }
}

/// Resolved partial pressures [atm]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartialPressures {
    pub p_h2: f64,
    pub p_h2o: f64,
    pub p_o2: f64,
}

impl PartialPressures {
    /// p_H2 * sqrt(p_O2) / p_H2O
    pub fn log_argument(&self) -> f64 {
        self.p_h2 * self.p_o2.sqrt() / self.p_h2o
    }
}

/// Input varied across a sweep grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SweepVariable {
    /// Operating temperature [C]
    Temperature,
    /// Hydrogen volume fraction of the fuel stream (0..1)
    HydrogenFraction,
}

impl SweepVariable {
    pub fn apply(self, condition: OperatingCondition, x: f64) -> OperatingCondition {
        match self {
            SweepVariable::Temperature => condition.with_temperature_c(x),
            SweepVariable::HydrogenFraction => condition.with_h2_fraction(x),
        }
    }

    /// CSV column header of the independent variable
    pub fn column_name(self) -> &'static str {
        match self {
            SweepVariable::Temperature => "temperature_c",
            SweepVariable::HydrogenFraction => "h2_percent",
        }
    }

    /// Convert a grid value to the unit shown in exports
    pub fn display_value(self, x: f64) -> f64 {
        match self {
            SweepVariable::Temperature => x,
            SweepVariable::HydrogenFraction => x * 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OcvPoint {
    pub x: f64,
    pub ocv: f64,
}

/// Ordered (x, OCV) pairs from one sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcvSeries {
    pub label: String,
    pub vary: SweepVariable,
    pub points: Vec<OcvPoint>,
}

impl OcvSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.x)
    }

    pub fn ocvs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.ocv)
    }
}

/// Full breakdown of a single OCV evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OcvReport {
    pub model: E0Model,
    pub temperature_c: f64,
    pub temperature_k: f64,
    pub pressures: PartialPressures,
    pub e0: f64,
    pub nernst_term: f64,
    pub ocv: f64,
}

impl fmt::Display for OcvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Open-Circuit Voltage ===")?;
        writeln!(
            f,
            "Temperature: {:.2} C ({:.2} K)",
            self.temperature_c, self.temperature_k
        )?;
        writeln!(f)?;

        writeln!(f, "Partial pressures:")?;
        writeln!(f, "  p_H2:  {:.4} atm", self.pressures.p_h2)?;
        writeln!(f, "  p_H2O: {:.4} atm", self.pressures.p_h2o)?;
        writeln!(f, "  p_O2:  {:.4} atm", self.pressures.p_o2)?;
        writeln!(f)?;

        writeln!(f, "E0 ({}):     {:.4} V", self.model, self.e0)?;
        writeln!(f, "Nernst term:  {:+.4} V", self.nernst_term)?;
        writeln!(f, "OCV: {:.4} V", self.ocv)?;

        Ok(())
    }
}
