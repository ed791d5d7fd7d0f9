mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::customs::{TaxesArgs, ValueArgs};
use commands::interest::InterestArgs;
use commands::landed_cost::LandedCostArgs;

/// Referential Peruvian customs and import-cost calculations
#[derive(Parser)]
#[command(
    name = "aduana",
    version,
    about = "Referential Peruvian customs and import-cost calculations",
    long_about = "Calculators for Peruvian importers with decimal precision: \
                  customs (CIF) value, the ad valorem / IGV / perception tax \
                  cascade, tier-based China landed-cost estimates, and \
                  moratorium interest on customs debt. All outputs are \
                  referential estimates, not tariff rulings."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the customs (CIF) value of a shipment
    Value(ValueArgs),
    /// Run the full ad valorem / IGV / perception tax cascade
    Taxes(TaxesArgs),
    /// Estimate the end-to-end landed cost of a China import
    LandedCost(LandedCostArgs),
    /// Accrue moratorium interest (TIM) on a customs debt
    Interest(InterestArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Value(args) => commands::customs::run_value(args),
        Commands::Taxes(args) => commands::customs::run_taxes(args),
        Commands::LandedCost(args) => commands::landed_cost::run_landed_cost(args),
        Commands::Interest(args) => commands::interest::run_interest(args),
        Commands::Version => {
            println!("aduana {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
