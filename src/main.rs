use clap::{Args, Parser, Subcommand};

use fire_dashboard::api;
use fire_dashboard::core::{FireInput, calculate_fire};

#[derive(Parser, Debug)]
#[command(
    name = "fire-dashboard",
    about = "FI/RE dashboard API (FIRE timeline, investment and portfolio projections)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API server
    Serve {
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Compute FIRE metrics once and print them as JSON
    Fire(FireArgs),
}

#[derive(Args, Debug)]
struct FireArgs {
    #[arg(long)]
    current_age: u32,
    #[arg(long, default_value_t = 65, help = "Desired retirement age (informational)")]
    retirement_age: u32,
    #[arg(long)]
    current_savings: f64,
    #[arg(long)]
    annual_income: f64,
    #[arg(long)]
    annual_expenses: f64,
    #[arg(long, help = "Share of income saved, in percent")]
    savings_rate: f64,
    #[arg(long, default_value_t = 7.0, help = "Expected annual return in percent")]
    expected_return: f64,
    #[arg(long, default_value_t = 4.0, help = "Safe withdrawal rate in percent")]
    withdrawal_rate: f64,
}

impl From<FireArgs> for FireInput {
    fn from(args: FireArgs) -> Self {
        FireInput {
            current_age: args.current_age,
            retirement_age: args.retirement_age,
            current_savings: args.current_savings,
            annual_income: args.annual_income,
            annual_expenses: args.annual_expenses,
            savings_rate: args.savings_rate,
            expected_return: args.expected_return,
            withdrawal_rate: args.withdrawal_rate,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Fire(args) => match calculate_fire(&args.into()) {
            Ok(metrics) => {
                let json =
                    serde_json::to_string_pretty(&metrics).expect("metrics should serialize");
                println!("{json}");
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
    }
}
