use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use ffsim_fast::config::to_yaml_string;
use ffsim_fast::SmearingConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the YAML to this path instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ConfigArgs) -> Result<(), Box<dyn Error>> {
    let yaml = to_yaml_string(&SmearingConfig::default())?;
    match &args.out {
        Some(path) => fs::write(path, yaml)?,
        None => print!("{yaml}"),
    }
    Ok(())
}
