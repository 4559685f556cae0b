//! Error type for the OCV model

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OcvError {
    /// The Nernst logarithm argument p_H2 * sqrt(p_O2) / p_H2O is not finite and positive
    #[error(
        "domain error: Nernst log argument undefined for p_H2={p_h2} atm, p_H2O={p_h2o} atm, p_O2={p_o2} atm"
    )]
    Domain { p_h2: f64, p_h2o: f64, p_o2: f64 },

    #[error("domain error: temperature must be finite and above 0 K, got {0} K")]
    NonPositiveTemperature(f64),

    #[error("{name} = {value} is outside the supported range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid sweep grid: {0}")]
    InvalidGrid(String),
}

impl OcvError {
    /// True for failures of the model itself rather than of input validation
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            OcvError::Domain { .. } | OcvError::NonPositiveTemperature(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, OcvError>;
