use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use ffsim_core::serde::{from_json_slice, sha256_hex, stable_hash_string, to_canonical_json_bytes};
use ffsim_core::{RunProvenance, SchemaVersion, TruthParticle};
use ffsim_fast::{load_config, process_events, BatchOpts, FarForwardSmearer, RunTotals};
use serde::{Deserialize, Serialize};

#[derive(Args, Debug)]
pub struct SmearArgs {
    /// YAML smearing configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// JSON file with truth-level events.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Output directory for particles, summary and manifest.
    #[arg(long)]
    pub out: PathBuf,
    /// Override the configured master seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Worker threads.
    #[arg(long, default_value_t = 1)]
    pub threads: usize,
}

#[derive(Debug, Deserialize)]
struct EventFile {
    events: Vec<Vec<TruthParticle>>,
}

#[derive(Debug, Serialize)]
struct SummaryFile<'a> {
    master_seed: u64,
    totals: &'a RunTotals,
    digest: &'a str,
}

pub fn run(args: &SmearArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let config = load_config(&args.config)?;
    let master_seed = args.seed.unwrap_or(config.seed_policy.master_seed);

    let input_bytes = fs::read(&args.input)?;
    let input: EventFile = from_json_slice(&input_bytes)?;
    log::info!(
        "loaded {} events from {}",
        input.events.len(),
        args.input.display()
    );

    let config_hash = stable_hash_string(&config)?;
    let smearer = FarForwardSmearer::new(config)?;
    let opts = BatchOpts {
        threads: args.threads,
    };
    let summary = process_events(&smearer, &input.events, master_seed, &opts)?;

    write_json(&args.out.join("particles.json"), &summary.events)?;
    write_json(
        &args.out.join("summary.json"),
        &SummaryFile {
            master_seed,
            totals: &summary.totals,
            digest: &summary.digest,
        },
    )?;

    let mut tool_versions = BTreeMap::new();
    tool_versions.insert("ffsim".to_string(), env!("CARGO_PKG_VERSION").to_string());
    let provenance = RunProvenance {
        schema: SchemaVersion::default(),
        config_hash,
        input_hash: sha256_hex(&input_bytes),
        seed: master_seed,
        created_at: chrono::Utc::now().to_rfc3339(),
        tool_versions,
    };
    write_json(&args.out.join("manifest.json"), &provenance)?;

    println!("{}", summary.digest);
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    fs::write(path, to_canonical_json_bytes(value)?)?;
    Ok(())
}
