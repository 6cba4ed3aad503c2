use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "elysium-cli", version, about = "Elysium daily fortune wheel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current day, spin availability and collection counts
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Spin the wheel for today's unlock
    Spin {
        /// Force the outcome category
        #[arg(long, value_enum)]
        kind: Option<commands::spin::KindArg>,
        /// Seed for a reproducible outcome
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the Memory Vault
    Vault {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Museum visit scheduling
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Attach a voice recording to an unlocked reason
    Record {
        /// Reason id
        reason_id: u32,
        /// Audio reference: base64 data URI or URL
        audio_ref: String,
    },
    /// Journey session flags and reset
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("ELYSIUM_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status { json } => commands::status::run(json),
        Commands::Spin { kind, seed } => commands::spin::run(kind, seed),
        Commands::Vault { json } => commands::vault::run(json),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Record {
            reason_id,
            audio_ref,
        } => commands::record::run(reason_id, &audio_ref),
        Commands::Session { action } => commands::session::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
