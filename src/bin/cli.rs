//! gearadmin CLI
//!
//! Command-line interface for administering a job server.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use gearadmin::{AdminSession, Config};

/// gearadmin CLI
#[derive(Parser, Debug)]
#[command(name = "gearadmin")]
#[command(about = "Administrative client for Gearman-compatible job servers")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:4730")]
    server: String,

    /// Response timeout in seconds
    #[arg(short, long, default_value = "5.0")]
    timeout: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show per-function queue and worker counts
    Status,

    /// Show the server version
    Version,

    /// List connected workers
    Workers,

    /// Cap the queue depth for a function
    Maxqueue {
        /// The function to cap
        task: String,

        /// Maximum queued jobs for the function
        size: u32,
    },

    /// Shut the server down
    Shutdown {
        /// Wait for running jobs to finish first
        #[arg(long)]
        graceful: bool,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,gearadmin=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if !(args.timeout > 0.0 && args.timeout.is_finite()) {
        tracing::error!("Timeout must be a positive number of seconds");
        std::process::exit(2);
    }

    let config = Config::builder()
        .server_addr(&args.server)
        .response_timeout(Duration::from_secs_f64(args.timeout))
        .build();

    tracing::debug!("gearadmin v{} connecting to {}", gearadmin::VERSION, args.server);

    let mut session = match AdminSession::connect(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    let result = match &args.command {
        Commands::Status => session.status(),
        Commands::Version => session.version(),
        Commands::Workers => session.workers(),
        Commands::Maxqueue { task, size } => session.max_queue(task, *size),
        Commands::Shutdown { graceful } => session.shutdown(*graceful),
    };

    match result {
        Ok(payload) => {
            if payload.ends_with('\n') {
                print!("{}", payload);
            } else {
                println!("{}", payload);
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            std::process::exit(1);
        }
    }
}
