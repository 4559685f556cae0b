//! Physical constants and operating bounds for the OCV model

/// Universal gas constant [J/(mol*K)]
pub const R: f64 = 8.314;

/// Faraday constant [C/mol]
pub const F: f64 = 96485.0;

/// Electrons transferred per H2 molecule oxidised
pub const ELECTRONS: f64 = 2.0;

/// Offset between Celsius and Kelvin
pub const KELVIN_OFFSET: f64 = 273.15;

/// O2 volume fraction of air
pub const AIR_O2_FRACTION: f64 = 0.21;

/// Linearised Gibbs free energy of H2 + 1/2 O2 -> H2O(g):
/// dG = GIBBS_DH + GIBBS_DS * T  [J/mol]
pub const GIBBS_DH: f64 = -247_500.0;
pub const GIBBS_DS: f64 = 55.8;

/// Direct linear fit: E0 = LINEAR_E0_INTERCEPT + LINEAR_E0_SLOPE * T  [V]
pub const LINEAR_E0_INTERCEPT: f64 = 1.2844;
pub const LINEAR_E0_SLOPE: f64 = -0.000_252_1;

/// Supported operating temperature range [C]
pub const TEMPERATURE_C_BOUNDS: (f64, f64) = (400.0, 1100.0);

/// Supported total / partial pressure range [atm]
pub const PRESSURE_ATM_BOUNDS: (f64, f64) = (0.01, 10.0);

/// Supported hydrogen percentage of the fuel stream [%]
pub const H2_PERCENT_BOUNDS: (f64, f64) = (1.0, 99.0);

/// Hydrogen fraction is clamped into this interval before evaluation
/// so that neither p_H2 nor p_H2O can reach zero.
pub const H2_FRACTION_CLAMP: (f64, f64) = (0.0001, 0.9999);

/// Reference total pressures for comparison curves [atm]
pub const REFERENCE_PRESSURES_ATM: &[f64] = &[1.0, 3.0, 5.0];

/// Default number of points in a sweep grid
pub const DEFAULT_GRID_POINTS: usize = 500;
