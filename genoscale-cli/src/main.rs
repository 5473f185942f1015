use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;
use error::CliError;

#[derive(Parser)]
#[command(name = "genoscale")]
#[command(about = "GenoScale - genomic coordinate and axis toolkit")]
#[command(version)]
#[command(long_about = "
GenoScale maps genomic loci onto a single continuous axis built from a
chromosome sizes table, and previews the ticks a genomic axis would show.

Examples:
  genoscale info --sizes hg38.chrom.sizes
  genoscale locate --sizes hg38.chrom.sizes chr2:1,000-2,000
  genoscale locate --sizes hg38.chrom.sizes 248956422
  genoscale split --sizes hg38.chrom.sizes chr1:248,000,000-chr3:1,000
  genoscale ticks --sizes hg38.chrom.sizes chr7 --count 5
  genoscale encode --sizes hg38.chrom.sizes chr1:12345
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Chromosome sizes file (overrides the configured one)
    #[arg(long, global = true)]
    pub sizes: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the chromosomes of an assembly with their continuous offsets
    Info,

    /// Convert between loci and continuous coordinates
    Locate {
        /// A continuous position (e.g. 1500000) or a locus or interval
        /// (e.g. chr2, chr2:100, chr2:100-200, chr1:100-chr2:50)
        query: String,
    },

    /// Split an interval into per-chromosome pieces
    Split {
        /// Interval, possibly spanning several chromosomes
        interval: String,
    },

    /// Preview the ticks and labels of a genomic axis
    Ticks {
        /// Visible interval (whole genome if omitted)
        interval: Option<String>,

        /// Approximate number of ticks
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Show the split-float vertex encoding of loci
    Encode {
        /// Loci or continuous positions
        #[arg(required = true)]
        positions: Vec<String>,
    },

    /// Print the effective configuration
    Config {
        /// Print an annotated template instead
        #[arg(long)]
        example: bool,
    },
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(sizes) = cli.sizes {
        config.general.sizes = Some(sizes);
    }
    if cli.json {
        config.general.json = true;
    }

    match cli.command {
        Commands::Info => commands::info::execute(&config)?,
        Commands::Locate { query } => commands::locate::execute(&config, &query)?,
        Commands::Split { interval } => commands::split::execute(&config, &interval)?,
        Commands::Ticks { interval, count } => {
            commands::ticks::execute(&config, interval.as_deref(), count)?
        }
        Commands::Encode { positions } => commands::encode::execute(&config, &positions)?,
        Commands::Config { example } => {
            if example {
                print!("{}", Config::example_toml());
            } else {
                print!("{}", config.to_toml()?);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            error::print_error_and_exit(cli_err);
        }
        return Err(err);
    }
    Ok(())
}
