use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    config::{self, ConfigArgs},
    smear::{self, SmearArgs},
    version::{self, VersionArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ffsim", about = "Far-forward fast simulation driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Smear a file of truth-level events through the far-forward stations.
    Smear(SmearArgs),
    /// Print or write the default configuration as YAML.
    Config(ConfigArgs),
    /// Print the tool version.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Smear(args) => smear::run(&args),
        Command::Config(args) => config::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
