use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::{json, Value};
use tempfile::tempdir;

fn write_inputs(dir: &Path) {
    fs::write(dir.join("config.yaml"), "ion_beam_energy: 100\ncrossing_angle: 0.0\n").unwrap();
    let neutron = json!({
        "generator_status": 1,
        "pdg": 2112,
        "charge": 0.0,
        "mass": 0.939565,
        "energy": 60.0,
        "momentum": {"x": 0.06, "y": 0.0, "z": 59.99},
        "vertex": {"x": 0.0, "y": 0.0, "z": 0.0}
    });
    let proton = json!({
        "generator_status": 1,
        "pdg": 2212,
        "charge": 1.0,
        "mass": 0.938272,
        "energy": 45.01,
        "momentum": {"x": 0.0, "y": 0.0, "z": 45.0}
    });
    let beam = json!({
        "generator_status": 4,
        "pdg": 2212,
        "charge": 1.0,
        "mass": 0.938272,
        "energy": 100.0,
        "momentum": {"x": 0.0, "y": 0.0, "z": 99.99}
    });
    let events = json!({ "events": [[beam, neutron, proton], []] });
    fs::write(dir.join("events.json"), events.to_string()).unwrap();
}

fn smear(dir: &Path, out: &str, threads: &str) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_ffsim"))
        .args([
            "smear",
            "--config",
            dir.join("config.yaml").to_str().unwrap(),
            "--in",
            dir.join("events.json").to_str().unwrap(),
            "--out",
            dir.join(out).to_str().unwrap(),
            "--seed",
            "17",
            "--threads",
            threads,
        ])
        .output()
        .expect("run ffsim smear");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn smear_writes_outputs_and_is_reproducible() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    let digest_a = smear(dir.path(), "run_a", "1");
    let digest_b = smear(dir.path(), "run_b", "2");
    assert_eq!(digest_a, digest_b);
    assert_eq!(
        fs::read(dir.path().join("run_a/particles.json")).unwrap(),
        fs::read(dir.path().join("run_b/particles.json")).unwrap()
    );

    let summary: Value =
        serde_json::from_slice(&fs::read(dir.path().join("run_a/summary.json")).unwrap()).unwrap();
    assert_eq!(summary["digest"], Value::String(digest_a));
    assert_eq!(summary["master_seed"], 17);
    assert_eq!(summary["totals"]["events"], 2);
    assert_eq!(summary["totals"]["accepted"]["zdc"], 1);
    assert_eq!(summary["totals"]["accepted"]["omd"], 1);

    let particles: Value =
        serde_json::from_slice(&fs::read(dir.path().join("run_a/particles.json")).unwrap())
            .unwrap();
    let first = &particles[0];
    assert_eq!(first["particles"][0]["type"], 4);
    assert_eq!(first["associations"][0]["sim_id"], 1);
    assert_eq!(first["particles"][1]["type"], 3);
    assert_eq!(first["associations"][1]["sim_id"], 2);
    assert_eq!(particles[1]["particles"].as_array().unwrap().len(), 0);

    let manifest: Value =
        serde_json::from_slice(&fs::read(dir.path().join("run_a/manifest.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["seed"], 17);
    assert_eq!(manifest["config_hash"].as_str().unwrap().len(), 64);
}

#[test]
fn config_command_emits_default_yaml() {
    let output = Command::new(env!("CARGO_BIN_EXE_ffsim"))
        .arg("config")
        .output()
        .expect("run ffsim config");
    assert!(output.status.success());
    let yaml = String::from_utf8(output.stdout).unwrap();
    assert!(yaml.contains("crossing_angle: -0.025"));
    assert!(yaml.contains("forward_neutral:"));
}
