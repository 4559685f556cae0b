//! SOFC OCV Calculator
//!
//! Open-circuit voltage of a solid-oxide fuel cell from the Nernst equation.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, debug};

use sofc_ocv::constants::{
    AIR_O2_FRACTION, DEFAULT_GRID_POINTS, H2_PERCENT_BOUNDS, REFERENCE_PRESSURES_ATM,
    TEMPERATURE_C_BOUNDS,
};
use sofc_ocv::validate::{
    check_range, clamp_h2_fraction, h2_fraction_from_percent, validate_condition,
    validate_reference_pressures,
};
use sofc_ocv::{E0Model, OcvError, OperatingCondition, SweepVariable, export, nernst, sweep};

#[derive(Parser)]
#[command(name = "sofc-ocv")]
#[command(about = "Open-circuit voltage calculator for solid-oxide fuel cells")]
struct Cli {
    /// Standard potential formulation
    #[arg(short, long, value_enum, default_value_t = E0Model::Linear, global = true)]
    model: E0Model,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the OCV for one operating condition
    Ocv {
        #[command(flatten)]
        condition: ConditionArgs,

        /// Show E0, Nernst term and partial pressures
        #[arg(short, long)]
        detail: bool,

        /// Print the full evaluation as JSON
        #[arg(long, conflicts_with = "detail")]
        json: bool,
    },

    /// Sweep temperature or hydrogen fraction and write a CSV curve
    Sweep {
        #[command(flatten)]
        condition: ConditionArgs,

        /// Input to sweep
        #[arg(long, value_enum, default_value_t = SweepVariable::Temperature)]
        vary: SweepVariable,

        #[command(flatten)]
        grid: GridArgs,

        /// Write CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Temperature sweep of the current condition against reference pressures
    Compare {
        #[command(flatten)]
        condition: ConditionArgs,

        /// Reference total pressures in atm (applied to fuel and air)
        #[arg(short, long, value_delimiter = ',', default_values_t = REFERENCE_PRESSURES_ATM.to_vec())]
        reference: Vec<f64>,

        #[command(flatten)]
        grid: GridArgs,

        /// Write CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ConditionArgs {
    /// Operating temperature in C
    #[arg(short, long, default_value = "800.0")]
    temperature: f64,

    /// Fuel-side total pressure in atm
    #[arg(long, default_value = "1.0")]
    fuel_pressure: f64,

    /// Air-side total pressure in atm
    #[arg(long, default_value = "1.0")]
    air_pressure: f64,

    /// Hydrogen share of the fuel stream in %
    #[arg(long, default_value = "50.0")]
    h2_percent: f64,

    /// O2 fraction of the oxidant stream
    #[arg(long, default_value_t = AIR_O2_FRACTION)]
    oxidant_ratio: f64,

    /// H2 partial pressure in atm (direct mode, needs --p-h2o and --p-o2)
    #[arg(long, requires_all = ["p_h2o", "p_o2"])]
    p_h2: Option<f64>,

    /// H2O partial pressure in atm
    #[arg(long, requires_all = ["p_h2", "p_o2"])]
    p_h2o: Option<f64>,

    /// O2 partial pressure in atm
    #[arg(long, requires_all = ["p_h2", "p_h2o"])]
    p_o2: Option<f64>,

    /// Skip range checks and the hydrogen fraction clamp
    #[arg(long)]
    no_validate: bool,
}

impl ConditionArgs {
    fn to_condition(&self) -> Result<OperatingCondition> {
        let condition = match (self.p_h2, self.p_h2o, self.p_o2) {
            (Some(p_h2), Some(p_h2o), Some(p_o2)) => {
                OperatingCondition::partial(self.temperature, p_h2, p_h2o, p_o2)
            }
            _ => {
                let h2_fraction = if self.no_validate {
                    self.h2_percent / 100.0
                } else {
                    h2_fraction_from_percent(self.h2_percent)?
                };
                OperatingCondition::ratio(
                    self.temperature,
                    self.fuel_pressure,
                    self.air_pressure,
                    h2_fraction,
                )
                .with_oxidant_ratio(self.oxidant_ratio)
            }
        };

        if self.no_validate {
            Ok(condition)
        } else {
            Ok(validate_condition(&condition)?)
        }
    }
}

#[derive(Args)]
struct GridArgs {
    /// Start of the sweep (C, or % for hydrogen-fraction)
    #[arg(long)]
    from: Option<f64>,

    /// End of the sweep (C, or % for hydrogen-fraction)
    #[arg(long)]
    to: Option<f64>,

    /// Number of grid points
    #[arg(short, long, default_value_t = DEFAULT_GRID_POINTS)]
    points: usize,
}

impl GridArgs {
    /// Grid in model units: C for temperature, fraction for hydrogen
    fn to_grid(&self, vary: SweepVariable, validate: bool) -> Result<Vec<f64>> {
        let grid = match vary {
            SweepVariable::Temperature => {
                let (lo, hi) = TEMPERATURE_C_BOUNDS;
                let from = self.from.unwrap_or(lo);
                let to = self.to.unwrap_or(hi);
                if validate {
                    check_range("from", from, TEMPERATURE_C_BOUNDS)?;
                    check_range("to", to, TEMPERATURE_C_BOUNDS)?;
                }
                sweep::linspace(from, to, self.points)?
            }
            SweepVariable::HydrogenFraction => {
                let (lo, hi) = H2_PERCENT_BOUNDS;
                let from = self.from.unwrap_or(lo);
                let to = self.to.unwrap_or(hi);
                if validate {
                    check_range("from", from, H2_PERCENT_BOUNDS)?;
                    check_range("to", to, H2_PERCENT_BOUNDS)?;
                }
                let fractions = sweep::linspace(from / 100.0, to / 100.0, self.points)?;
                if validate {
                    fractions.into_iter().map(clamp_h2_fraction).collect()
                } else {
                    fractions
                }
            }
        };
        Ok(grid)
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Point domain failures back at the skipped input checks
fn model_error(err: OcvError) -> anyhow::Error {
    if err.is_domain() {
        anyhow!(err).context("input outside the model's domain (run without --no-validate to clamp it)")
    } else {
        anyhow!(err)
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("using {} E0 model", cli.model);

    match cli.command {
        Commands::Ocv {
            condition,
            detail,
            json,
        } => {
            let condition = condition.to_condition()?;
            let report = nernst::evaluate(&condition, cli.model).map_err(model_error)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if detail {
                print!("{}", report);
            } else {
                println!("OCV: {:.4} V", report.ocv);
            }
        }

        Commands::Sweep {
            condition,
            vary,
            grid,
            output,
        } => {
            let template = condition.to_condition()?;
            let grid = grid.to_grid(vary, !condition.no_validate)?;
            let series = sweep::sweep(&grid, &template, vary, cli.model).map_err(model_error)?;

            let writer = open_output(output.as_ref())?;
            export::write_series(writer, &series).context("Failed to write CSV")?;
            if let Some(path) = output {
                eprintln!("Wrote {} points to {}", series.len(), path.display());
            }
        }

        Commands::Compare {
            condition,
            reference,
            grid,
            output,
        } => {
            let template = condition.to_condition()?;
            if !condition.no_validate {
                validate_reference_pressures(&template, &reference)?;
            }
            let grid = grid.to_grid(SweepVariable::Temperature, !condition.no_validate)?;

            let mut curves = vec![
                sweep::sweep(&grid, &template, SweepVariable::Temperature, cli.model)
                    .map_err(model_error)?,
            ];
            curves.extend(
                sweep::reference_curves(
                    &grid,
                    &template,
                    SweepVariable::Temperature,
                    &reference,
                    cli.model,
                )
                .map_err(model_error)?,
            );

            let writer = open_output(output.as_ref())?;
            export::write_comparison(writer, &curves).context("Failed to write CSV")?;
            if let Some(path) = output {
                eprintln!(
                    "Wrote {} curves of {} points to {}",
                    curves.len(),
                    grid.len(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}
