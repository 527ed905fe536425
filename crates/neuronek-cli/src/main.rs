//! CLI for neuronek: watch substance intensity decay on a terminal grid.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "neuronek")]
#[command(about = "neuronek: substance intensity monitor")]
#[command(version = neuronek_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live interactive intensity dashboard (TUI)
    Monitor {
        /// Refresh rate in seconds
        #[arg(long, default_value = "60")]
        refresh: f64,

        /// Lookback window in hours (overrides the config file)
        #[arg(long)]
        window: Option<f64>,

        /// JSON file with the substance table (default: built-in table)
        #[arg(long)]
        substances: Option<String>,

        /// JSON render config
        #[arg(long)]
        config: Option<String>,
    },

    /// Render a single frame as text and exit
    Render {
        /// Canvas width in columns
        #[arg(long, default_value = "80")]
        width: usize,

        /// Canvas height in rows
        #[arg(long, default_value = "20")]
        height: usize,

        /// Lookback window in hours (overrides the config file)
        #[arg(long)]
        window: Option<f64>,

        /// JSON file with the substance table (default: built-in table)
        #[arg(long)]
        substances: Option<String>,

        /// JSON render config
        #[arg(long)]
        config: Option<String>,

        /// Dose as SYMBOL:AMOUNT[:AGO], e.g. C:200:2h (repeatable)
        #[arg(long = "dose")]
        doses: Vec<String>,

        /// Print elapsed times as "2h 30m" instead of "2h"
        #[arg(long)]
        composite_elapsed: bool,

        /// Colour curves with ANSI escapes
        #[arg(long)]
        color: bool,
    },

    /// List the substance table
    Substances {
        /// JSON file with the substance table (default: built-in table)
        #[arg(long)]
        substances: Option<String>,

        /// Print as JSON (the substance file format)
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor {
            refresh,
            window,
            substances,
            config,
        } => commands::monitor::run(refresh, window, substances.as_deref(), config.as_deref()),
        Commands::Render {
            width,
            height,
            window,
            substances,
            config,
            doses,
            composite_elapsed,
            color,
        } => commands::render::run(commands::render::RenderCommandConfig {
            width,
            height,
            window_hours: window,
            substances_path: substances.as_deref(),
            config_path: config.as_deref(),
            doses: &doses,
            composite_elapsed,
            color,
        }),
        Commands::Substances { substances, json } => {
            commands::substances::run(substances.as_deref(), json)
        }
    }
}
