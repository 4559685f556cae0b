//! SOFC open-circuit voltage model
//!
//! Computes the open-circuit voltage of a solid-oxide fuel cell from
//! temperature and gas partial pressures with the Nernst equation, and
//! builds comparison curves over a swept temperature or hydrogen fraction.

pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod nernst;
pub mod sweep;
pub mod validate;

pub use error::OcvError;
pub use models::{
    E0Model, GasFeed, OcvPoint, OcvReport, OcvSeries, OperatingCondition, PartialPressures,
    SweepVariable,
};
pub use nernst::{compute_ocv, evaluate, standard_potential};
pub use sweep::{linspace, reference_curves, sweep};
