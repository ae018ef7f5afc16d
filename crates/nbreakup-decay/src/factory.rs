//! Construction of decay generators from a type identifier and options.

use std::collections::BTreeMap;

use log::debug;
use nbreakup_core::DecayError;

use crate::config::{DecayConfig, DecayKind};
use crate::decay::{NeutronDecay, Verbosity};
use crate::dineutron::TwoNeutronDineutron;
use crate::one_neutron::OneNeutronDecay;
use crate::phase_space::TwoNeutronPhaseSpace;
use crate::sequential::TwoNeutronSequential;

/// Builds a generator of the given kind with default parameters.
pub fn create_decay(kind: DecayKind) -> Box<dyn NeutronDecay> {
    match kind {
        DecayKind::OneNeutron => Box::new(OneNeutronDecay::new()),
        DecayKind::PhaseSpace => Box::new(TwoNeutronPhaseSpace::new(false)),
        DecayKind::PhaseSpaceFsi => Box::new(TwoNeutronPhaseSpace::new(true)),
        DecayKind::Dineutron => Box::new(TwoNeutronDineutron::new()),
        DecayKind::Sequential => Box::new(TwoNeutronSequential::new()),
    }
}

/// Collects a decay type and options, then creates configured generators.
///
/// The type identifier is only resolved by [`create`](Self::create), so a
/// misspelled type or option surfaces there as a `Config` error.
#[derive(Debug, Clone, Default)]
pub struct DecayFactory {
    decay_type: String,
    options: BTreeMap<String, f64>,
    verbosity: Verbosity,
}

impl DecayFactory {
    /// Empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory pre-filled from a configuration document.
    pub fn from_config(config: &DecayConfig) -> Self {
        Self {
            decay_type: config.kind.as_str().to_string(),
            options: config.options.clone(),
            verbosity: config.verbosity,
        }
    }

    /// Factory pre-filled from a YAML configuration document.
    pub fn from_yaml_str(text: &str) -> Result<Self, DecayError> {
        Ok(Self::from_config(&DecayConfig::from_yaml_str(text)?))
    }

    /// Sets the decay type identifier, e.g. `"2n-sequential"`.
    pub fn set_decay_type(&mut self, decay_type: impl Into<String>) {
        self.decay_type = decay_type.into();
    }

    /// Decay type identifier.
    pub fn decay_type(&self) -> &str {
        &self.decay_type
    }

    /// Sets an option copied into every created generator.
    pub fn set_decay_option(&mut self, option: impl Into<String>, value: f64) {
        self.options.insert(option.into(), value);
    }

    /// Option value, if it was set.
    pub fn decay_option(&self, option: &str) -> Option<f64> {
        self.options.get(option).copied()
    }

    /// Verbosity given to created generators.
    pub fn set_verbose_level(&mut self, level: Verbosity) {
        self.verbosity = level;
    }

    /// Creates a configured generator owned by the caller.
    pub fn create(&self) -> Result<Box<dyn NeutronDecay>, DecayError> {
        let kind: DecayKind = self.decay_type.parse()?;
        let mut decay = create_decay(kind);
        for (name, value) in &self.options {
            decay.set_decay_param(name, *value)?;
        }
        decay.set_verbose_level(self.verbosity);
        if self.verbosity >= Verbosity::All {
            debug!("created {kind} with {:?}", decay.base().params().effective());
        }
        Ok(decay)
    }
}
