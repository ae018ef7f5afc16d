//! Decay type identifiers, parameter whitelists and serde configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use nbreakup_core::{DecayError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::decay::Verbosity;
use crate::params::{Constraint, ParamSpec};

/// Singlet neutron-neutron scattering length (fm).
pub const NN_SCATTERING_LENGTH: f64 = -18.7;
/// Singlet neutron-neutron effective range (fm).
pub const NN_EFFECTIVE_RANGE: f64 = 2.75;
/// Default Gaussian source radius for the nn correlation function (fm).
pub const DEFAULT_SOURCE_SIZE: f64 = 3.0;
/// Default attempt budget of the rejection samplers.
pub const DEFAULT_MAX_TRIES: f64 = 1.0e6;

const ONE_NEUTRON_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("energy", 0.0, Constraint::Finite),
    ParamSpec::new("width", 0.0, Constraint::NonNegative),
];

const PHASE_SPACE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("scattering-length", NN_SCATTERING_LENGTH, Constraint::Finite),
    ParamSpec::new("effective-range", NN_EFFECTIVE_RANGE, Constraint::NonNegative),
    ParamSpec::new("source-size", DEFAULT_SOURCE_SIZE, Constraint::Positive),
    ParamSpec::new("max-tries", DEFAULT_MAX_TRIES, Constraint::AtLeastOne),
];

const DINEUTRON_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("scattering-length", NN_SCATTERING_LENGTH, Constraint::Finite),
    ParamSpec::new("effective-range", NN_EFFECTIVE_RANGE, Constraint::NonNegative),
    ParamSpec::new("max-tries", DEFAULT_MAX_TRIES, Constraint::AtLeastOne),
];

const SEQUENTIAL_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("intermediate-energy", 0.0, Constraint::Finite),
    ParamSpec::new("intermediate-width", 0.0, Constraint::NonNegative),
    ParamSpec::new("max-tries", DEFAULT_MAX_TRIES, Constraint::AtLeastOne),
];

/// Closed set of supported decay models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DecayKind {
    /// One neutron, Breit-Wigner decay energy.
    #[serde(rename = "1n")]
    OneNeutron,
    /// Two neutrons, three-body phase space.
    #[serde(rename = "2n-phase-space")]
    PhaseSpace,
    /// Two neutrons, phase space with nn final-state interaction.
    #[serde(rename = "2n-phase-space-fsi")]
    PhaseSpaceFsi,
    /// Two neutrons emitted as a correlated dineutron.
    #[serde(rename = "2n-dineutron")]
    Dineutron,
    /// Two neutrons emitted one after the other through an intermediate state.
    #[serde(rename = "2n-sequential")]
    Sequential,
}

impl DecayKind {
    /// Every supported kind.
    pub const ALL: [DecayKind; 5] = [
        DecayKind::OneNeutron,
        DecayKind::PhaseSpace,
        DecayKind::PhaseSpaceFsi,
        DecayKind::Dineutron,
        DecayKind::Sequential,
    ];

    /// Stable type identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            DecayKind::OneNeutron => "1n",
            DecayKind::PhaseSpace => "2n-phase-space",
            DecayKind::PhaseSpaceFsi => "2n-phase-space-fsi",
            DecayKind::Dineutron => "2n-dineutron",
            DecayKind::Sequential => "2n-sequential",
        }
    }

    /// Neutron multiplicity of the model.
    pub fn number_of_neutrons(self) -> usize {
        match self {
            DecayKind::OneNeutron => 1,
            _ => 2,
        }
    }

    /// Parameters accepted by generators of this kind.
    pub fn parameters(self) -> &'static [ParamSpec] {
        match self {
            DecayKind::OneNeutron => ONE_NEUTRON_PARAMS,
            DecayKind::PhaseSpace | DecayKind::PhaseSpaceFsi => PHASE_SPACE_PARAMS,
            DecayKind::Dineutron => DINEUTRON_PARAMS,
            DecayKind::Sequential => SEQUENTIAL_PARAMS,
        }
    }
}

impl fmt::Display for DecayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecayKind {
    type Err = DecayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DecayKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = DecayKind::ALL.iter().map(|kind| kind.as_str()).collect();
                DecayError::Config(
                    ErrorInfo::new("unknown-decay-type", "decay type not recognised")
                        .with_context("type", s)
                        .with_hint(format!("supported types: {}", known.join(", "))),
                )
            })
    }
}

/// Construction-time configuration of one decay generator.
///
/// ```yaml
/// type: 2n-sequential
/// options:
///   intermediate-energy: 0.8
/// verbosity: all
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Decay model to build.
    #[serde(rename = "type")]
    pub kind: DecayKind,
    /// Parameter values copied into the generator.
    #[serde(default)]
    pub options: BTreeMap<String, f64>,
    /// Diagnostic verbosity of the generator.
    #[serde(default)]
    pub verbosity: Verbosity,
}

impl DecayConfig {
    /// Configuration with no options and default verbosity.
    pub fn new(kind: DecayKind) -> Self {
        Self {
            kind,
            options: BTreeMap::new(),
            verbosity: Verbosity::default(),
        }
    }

    /// Adds an option.
    pub fn with_option(mut self, name: impl Into<String>, value: f64) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, DecayError> {
        serde_yaml::from_str(text).map_err(|err| document_error("yaml", err.to_string()))
    }

    /// Parses a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, DecayError> {
        serde_json::from_str(text).map_err(|err| document_error("json", err.to_string()))
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, DecayError> {
        serde_yaml::to_string(self).map_err(|err| document_error("yaml", err.to_string()))
    }
}

fn document_error(format: &str, reason: String) -> DecayError {
    DecayError::Serde(
        ErrorInfo::new("invalid-config-document", reason).with_context("format", format),
    )
}
