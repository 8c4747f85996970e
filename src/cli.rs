//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;

/// flow-editor-api - REST API for a visual flow editor
#[derive(Parser, Debug)]
#[command(
    name = "flow-editor-api",
    version,
    about = "REST API for a visual flow editor",
    long_about = "Serves the editor's project and settings endpoints.\n\n\
                  Every request is forwarded to the flow runtime; this binary\n\
                  runs them against an in-memory runtime."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the editor API over HTTP
    Serve {
        /// Config file (defaults to the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match cli.command {
        Some(Command::Serve { config, host, port }) => {
            commands::serve(config.as_deref(), host, port)
        },
        Some(Command::Version) => {
            print_version(cli.json);
            Ok(())
        },
        None => {
            print_version(cli.json);
            if !cli.json {
                println!("\nRun 'flow-editor-api --help' for usage");
                println!("Run 'flow-editor-api serve' to start the API");
            }
            Ok(())
        },
    }
}

fn print_version(json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "version": env!("CARGO_PKG_VERSION")
            })
        );
    } else {
        println!("flow-editor-api v{}", env!("CARGO_PKG_VERSION"));
    }
}
