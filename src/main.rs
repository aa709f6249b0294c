use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Instant;

use port_tariff::tariff::{
    AirRequest, AirShipmentType, CalculationRequest, CargoClass, ContainerRequest, DateRange,
    LclRequest, Quotation, TariffError,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_OUTPUT: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Args, Debug)]
struct DateArgs {
    /// Date the cargo entered storage, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    carry_in: Option<NaiveDate>,

    /// Date the cargo left storage, YYYY-MM-DD (defaults to the carry-in date)
    #[arg(long)]
    carry_out: Option<NaiveDate>,
}

impl DateArgs {
    fn resolve(&self, today: NaiveDate) -> Result<DateRange, TariffError> {
        let carry_in = self.carry_in.unwrap_or(today);
        let carry_out = self.carry_out.unwrap_or(carry_in);
        DateRange::new(carry_in, carry_out)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer questions one at a time (default if no subcommand)
    Interactive,
    /// Air cargo charges
    Air {
        /// Chargeable weight in kg
        #[arg(long)]
        weight: Decimal,
        /// Cargo is declared dangerous goods
        #[arg(long)]
        dangerous: bool,
        /// MAWB for a direct master air waybill, CONSO for a consolidation
        #[arg(long, default_value = "MAWB")]
        shipment: AirShipmentType,
        #[command(flatten)]
        dates: DateArgs,
    },
    /// Loose (LCL) sea cargo charges, billed by volume
    Lcl {
        /// Volume in cubic meters
        #[arg(long)]
        cbm: Decimal,
        #[command(flatten)]
        dates: DateArgs,
    },
    /// 20ft container charges
    #[command(name = "20ft")]
    TwentyFoot {
        /// Number of containers
        #[arg(long, default_value_t = 1)]
        containers: u32,
        #[command(flatten)]
        dates: DateArgs,
    },
    /// 40ft container charges
    #[command(name = "40ft")]
    FortyFoot {
        /// Number of containers
        #[arg(long, default_value_t = 1)]
        containers: u32,
        #[command(flatten)]
        dates: DateArgs,
    },
    /// Write the published tariff to the config file for editing
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "port-tariff")]
#[command(about = "Port and airport storage and handling charge calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/port-tariff/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format for the charge breakdown
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Turn a calculation subcommand into a request.
/// Returns None for subcommands that do not describe a shipment.
fn build_request(
    command: Commands,
    today: NaiveDate,
) -> Result<Option<CalculationRequest>, TariffError> {
    let request = match command {
        Commands::Air {
            weight,
            dangerous,
            shipment,
            dates,
        } => CalculationRequest::Air(AirRequest {
            weight,
            cargo: if dangerous {
                CargoClass::Dangerous
            } else {
                CargoClass::General
            },
            shipment,
            dates: dates.resolve(today)?,
        }),
        Commands::Lcl { cbm, dates } => CalculationRequest::Lcl(LclRequest {
            cbm,
            dates: dates.resolve(today)?,
        }),
        Commands::TwentyFoot { containers, dates } => {
            CalculationRequest::TwentyFoot(ContainerRequest {
                containers,
                dates: dates.resolve(today)?,
            })
        }
        Commands::FortyFoot { containers, dates } => {
            CalculationRequest::FortyFoot(ContainerRequest {
                containers,
                dates: dates.resolve(today)?,
            })
        }
        Commands::Interactive | Commands::Init { .. } => return Ok(None),
    };
    Ok(Some(request))
}

fn render(
    quotation: &Quotation,
    format: OutputFormat,
    symbol: &str,
    use_colors: bool,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(port_tariff::output::format_breakdown_table(
            quotation, symbol, use_colors,
        )),
        OutputFormat::Tsv => Ok(port_tariff::output::format_tsv(quotation)),
        OutputFormat::Json => port_tariff::output::format_json(quotation),
    }
}

fn print_quotation(quotation: &Quotation, format: OutputFormat, symbol: &str) {
    let use_colors = port_tariff::output::should_use_colors();
    match render(quotation, format, symbol, use_colors) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Failed to render output: {}", e);
            std::process::exit(EXIT_OUTPUT);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Interactive);
    let config_path = cli.config.map(PathBuf::from);
    let start_time = Instant::now();

    if let Commands::Init { force } = command {
        let path = match config_path.map(Ok).unwrap_or_else(port_tariff::config::get_config_path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = port_tariff::config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match port_tariff::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate rates at startup
    let rates = config.effective_rates();
    if let Err(errors) = port_tariff::tariff::validate_rates(&rates) {
        eprintln!("Rate config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let today = Local::now().date_naive();

    let quotation = match build_request(command, today) {
        Ok(Some(request)) => match port_tariff::tariff::calculate(&request, &rates) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("Invalid input: {}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        Ok(None) => {
            let stdin = std::io::stdin();
            let mut session =
                port_tariff::interactive::Session::new(stdin.lock(), std::io::stdout(), today);
            match session.run(&rates) {
                Ok(q) => {
                    println!();
                    q
                }
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Err(e) => {
            eprintln!("Invalid input: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    print_quotation(&quotation, cli.format, config.currency_symbol());

    debug!(
        "{} charges calculated in {:?}",
        quotation.category,
        start_time.elapsed()
    );

    std::process::exit(EXIT_SUCCESS);
}
