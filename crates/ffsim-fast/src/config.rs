//! Run configuration: YAML schema, defaults and start-of-run validation.

use std::fs;
use std::path::Path;

use ffsim_core::errors::{ErrorInfo, FfsError};
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing a far-forward smearing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmearingConfig {
    /// Fixed ion beam energy in GeV. Zero means "infer per event".
    #[serde(default)]
    pub ion_beam_energy: f64,
    /// Beam crossing angle in radians.
    #[serde(default = "default_crossing_angle")]
    pub crossing_angle: f64,
    /// Forward neutral/photon calorimeter (ZDC).
    #[serde(default)]
    pub forward_neutral: ForwardNeutralConfig,
    /// Forward proton spectrometer (Roman pots).
    #[serde(default)]
    pub forward_proton: ForwardProtonConfig,
    /// Intermediate magnetic spectrometer (B0).
    #[serde(default)]
    pub intermediate: IntermediateConfig,
    /// Off-momentum detector.
    #[serde(default)]
    pub off_momentum: OffMomentumConfig,
    /// Relative resolutions shared by every momentum-smeared region.
    #[serde(default)]
    pub momentum_resolution: MomentumResolution,
    /// Master seed policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_crossing_angle() -> f64 {
    -0.025
}

fn default_enabled() -> bool {
    true
}

impl Default for SmearingConfig {
    fn default() -> Self {
        Self {
            ion_beam_energy: 0.0,
            crossing_angle: default_crossing_angle(),
            forward_neutral: ForwardNeutralConfig::default(),
            forward_proton: ForwardProtonConfig::default(),
            intermediate: IntermediateConfig::default(),
            off_momentum: OffMomentumConfig::default(),
            momentum_resolution: MomentumResolution::default(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

/// Energy and angle resolution of the forward calorimeter for one species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorimeterResolution {
    /// Constant term `c` of `σE/E`.
    pub constant: f64,
    /// Stochastic term `s` of `σE/E` (GeV^1/2).
    pub stochastic: f64,
    /// Angular term `a` of `σθ = a/√E` (rad·GeV^1/2).
    pub angular: f64,
}

impl CalorimeterResolution {
    /// Hadronic response used for neutrons.
    pub fn neutron() -> Self {
        Self {
            constant: 0.05,
            stochastic: 0.5,
            angular: 0.003,
        }
    }

    /// Electromagnetic response used for photons.
    pub fn photon() -> Self {
        Self {
            constant: 0.03,
            stochastic: 0.10,
            angular: 0.001,
        }
    }
}

/// Forward neutral/photon calorimeter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardNeutralConfig {
    /// Whether the region contributes to the output.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Inclusive upper bound on the ion-frame polar angle (rad).
    #[serde(default = "default_zdc_theta_max")]
    pub theta_max: f64,
    /// Response for neutrons.
    #[serde(default = "CalorimeterResolution::neutron")]
    pub neutron: CalorimeterResolution,
    /// Response for photons.
    #[serde(default = "CalorimeterResolution::photon")]
    pub photon: CalorimeterResolution,
}

fn default_zdc_theta_max() -> f64 {
    4.5e-3
}

impl Default for ForwardNeutralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theta_max: default_zdc_theta_max(),
            neutron: CalorimeterResolution::neutron(),
            photon: CalorimeterResolution::photon(),
        }
    }
}

/// Forward proton spectrometer settings. Defaults match the 10-on-100 setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardProtonConfig {
    /// Whether the region contributes to the output.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Lower polar-angle bound (rad).
    #[serde(default = "default_rp_theta_min")]
    pub theta_min: f64,
    /// Upper polar-angle bound (rad).
    #[serde(default = "default_rp_theta_max")]
    pub theta_max: f64,
    /// Minimum `pz / E_beam`.
    #[serde(default = "default_rp_min_rigidity")]
    pub min_rigidity: f64,
}

fn default_rp_theta_min() -> f64 {
    0.2e-3
}

fn default_rp_theta_max() -> f64 {
    5e-3
}

fn default_rp_min_rigidity() -> f64 {
    0.60
}

impl Default for ForwardProtonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theta_min: default_rp_theta_min(),
            theta_max: default_rp_theta_max(),
            min_rigidity: default_rp_min_rigidity(),
        }
    }
}

/// Intermediate spectrometer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntermediateConfig {
    /// Whether the region contributes to the output.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Lower polar-angle bound (rad).
    #[serde(default = "default_b0_theta_min")]
    pub theta_min: f64,
    /// Upper polar-angle bound (rad).
    #[serde(default = "default_b0_theta_max")]
    pub theta_max: f64,
}

fn default_b0_theta_min() -> f64 {
    6.0e-3
}

fn default_b0_theta_max() -> f64 {
    20.0e-3
}

impl Default for IntermediateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theta_min: default_b0_theta_min(),
            theta_max: default_b0_theta_max(),
        }
    }
}

/// Off-momentum detector settings. Defaults match the 10-on-100 setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffMomentumConfig {
    /// Whether the region contributes to the output.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Minimum `pz / E_beam`.
    #[serde(default = "default_omd_min_rigidity")]
    pub min_rigidity: f64,
    /// Maximum `pz / E_beam`.
    #[serde(default = "default_omd_max_rigidity")]
    pub max_rigidity: f64,
}

fn default_omd_min_rigidity() -> f64 {
    0.25
}

fn default_omd_max_rigidity() -> f64 {
    0.60
}

impl Default for OffMomentumConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_rigidity: default_omd_min_rigidity(),
            max_rigidity: default_omd_max_rigidity(),
        }
    }
}

/// Relative momentum resolutions used by the spectrometer-like regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumResolution {
    /// Relative smearing of the momentum magnitude.
    #[serde(default = "default_momentum_term")]
    pub momentum: f64,
    /// Relative smearing of each transverse component.
    #[serde(default = "default_transverse_term")]
    pub transverse: f64,
}

fn default_momentum_term() -> f64 {
    0.025
}

fn default_transverse_term() -> f64 {
    0.03
}

impl Default for MomentumResolution {
    fn default() -> Self {
        Self {
            momentum: default_momentum_term(),
            transverse: default_transverse_term(),
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed from which per-event streams are derived.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
}

fn default_master_seed() -> u64 {
    0x0FF5_1DE5_EED5_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
        }
    }
}

impl SmearingConfig {
    /// Start-of-run range sanity check. Not repeated per event.
    pub fn validate(&self) -> Result<(), FfsError> {
        non_negative("ion_beam_energy", self.ion_beam_energy)?;
        finite("crossing_angle", self.crossing_angle)?;
        if self.crossing_angle.abs() >= std::f64::consts::FRAC_PI_2 {
            return Err(FfsError::config_field(
                "crossing_angle",
                "crossing angle must be smaller than pi/2 in magnitude",
            ));
        }

        non_negative("forward_neutral.theta_max", self.forward_neutral.theta_max)?;
        resolution("forward_neutral.neutron", &self.forward_neutral.neutron)?;
        resolution("forward_neutral.photon", &self.forward_neutral.photon)?;

        window(
            "forward_proton.theta",
            self.forward_proton.theta_min,
            self.forward_proton.theta_max,
        )?;
        non_negative("forward_proton.min_rigidity", self.forward_proton.min_rigidity)?;

        window(
            "intermediate.theta",
            self.intermediate.theta_min,
            self.intermediate.theta_max,
        )?;

        window(
            "off_momentum.rigidity",
            self.off_momentum.min_rigidity,
            self.off_momentum.max_rigidity,
        )?;

        non_negative("momentum_resolution.momentum", self.momentum_resolution.momentum)?;
        non_negative(
            "momentum_resolution.transverse",
            self.momentum_resolution.transverse,
        )?;
        Ok(())
    }

    /// True when the beam energy is fixed for the whole run.
    pub fn has_fixed_beam_energy(&self) -> bool {
        self.ion_beam_energy > 0.0
    }
}

fn field_error(field: &str, message: &str, value: f64) -> FfsError {
    FfsError::Config(
        ErrorInfo::new("invalid-config", message)
            .with_context("field", field)
            .with_context("value", value.to_string()),
    )
}

fn finite(field: &str, value: f64) -> Result<(), FfsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(field_error(field, "value must be finite", value))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), FfsError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(field_error(field, "value must be non-negative", value));
    }
    Ok(())
}

fn window(field: &str, min: f64, max: f64) -> Result<(), FfsError> {
    non_negative(&format!("{field}_min"), min)?;
    non_negative(&format!("{field}_max"), max)?;
    if min > max {
        return Err(FfsError::Config(
            ErrorInfo::new("inverted-window", "window minimum exceeds maximum")
                .with_context("field", field)
                .with_context("min", min.to_string())
                .with_context("max", max.to_string()),
        ));
    }
    Ok(())
}

fn resolution(field: &str, res: &CalorimeterResolution) -> Result<(), FfsError> {
    non_negative(&format!("{field}.constant"), res.constant)?;
    non_negative(&format!("{field}.stochastic"), res.stochastic)?;
    non_negative(&format!("{field}.angular"), res.angular)
}

/// Reads and validates a YAML configuration file.
pub fn load_config(path: &Path) -> Result<SmearingConfig, FfsError> {
    let text = fs::read_to_string(path).map_err(|err| {
        FfsError::Io(
            ErrorInfo::new("config-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let config = from_yaml_str(&text)?;
    config.validate()?;
    Ok(config)
}

/// Parses a configuration from YAML text without validating it.
pub fn from_yaml_str(text: &str) -> Result<SmearingConfig, FfsError> {
    serde_yaml::from_str(text)
        .map_err(|err| FfsError::Serde(ErrorInfo::new("yaml_deserialize", err.to_string())))
}

/// Renders a configuration as YAML.
pub fn to_yaml_string(config: &SmearingConfig) -> Result<String, FfsError> {
    serde_yaml::to_string(config)
        .map_err(|err| FfsError::Serde(ErrorInfo::new("yaml_serialize", err.to_string())))
}
