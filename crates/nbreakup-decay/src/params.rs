//! Named decay parameters validated against a per-generator whitelist.

use std::collections::BTreeMap;

use nbreakup_core::{DecayError, ErrorInfo};

/// Admissible range of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Any finite value.
    Finite,
    /// Finite and `>= 0`.
    NonNegative,
    /// Finite and `> 0`.
    Positive,
    /// Finite and `>= 1`.
    AtLeastOne,
}

impl Constraint {
    fn admits(self, value: f64) -> bool {
        value.is_finite()
            && match self {
                Constraint::Finite => true,
                Constraint::NonNegative => value >= 0.0,
                Constraint::Positive => value > 0.0,
                Constraint::AtLeastOne => value >= 1.0,
            }
    }

    fn describe(self) -> &'static str {
        match self {
            Constraint::Finite => "a finite number",
            Constraint::NonNegative => "a finite number >= 0",
            Constraint::Positive => "a finite number > 0",
            Constraint::AtLeastOne => "a finite number >= 1",
        }
    }
}

/// Declaration of one accepted parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Parameter key, e.g. `"energy"`.
    pub name: &'static str,
    /// Value reported until the parameter is set.
    pub default: f64,
    /// Admissible values.
    pub constraint: Constraint,
}

impl ParamSpec {
    /// Declares a parameter.
    pub const fn new(name: &'static str, default: f64, constraint: Constraint) -> Self {
        Self {
            name,
            default,
            constraint,
        }
    }
}

/// String-keyed parameter store scoped to one decay generator.
///
/// Keys outside the whitelist are rejected on both set and get.
#[derive(Debug, Clone)]
pub struct DecayParams {
    specs: &'static [ParamSpec],
    values: BTreeMap<String, f64>,
}

impl DecayParams {
    /// Creates an empty store accepting the given parameters.
    pub fn new(specs: &'static [ParamSpec]) -> Self {
        Self {
            specs,
            values: BTreeMap::new(),
        }
    }

    /// Declared parameters, in declaration order.
    pub fn specs(&self) -> &'static [ParamSpec] {
        self.specs
    }

    /// Sets a parameter after validating its key and value.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), DecayError> {
        let spec = self.spec(name)?;
        if !spec.constraint.admits(value) {
            return Err(DecayError::Config(
                ErrorInfo::new("invalid-parameter-value", "parameter value out of range")
                    .with_context("name", name)
                    .with_context("value", value)
                    .with_hint(format!("`{name}` must be {}", spec.constraint.describe())),
            ));
        }
        self.values.insert(spec.name.to_string(), value);
        Ok(())
    }

    /// Returns the current value of a parameter, or its default.
    pub fn get(&self, name: &str) -> Result<f64, DecayError> {
        let spec = self.spec(name)?;
        Ok(self.values.get(name).copied().unwrap_or(spec.default))
    }

    /// Returns true once the parameter was explicitly set.
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Snapshot of every declared parameter with its effective value.
    pub fn effective(&self) -> BTreeMap<String, f64> {
        self.specs
            .iter()
            .map(|spec| {
                let value = self.values.get(spec.name).copied().unwrap_or(spec.default);
                (spec.name.to_string(), value)
            })
            .collect()
    }

    fn spec(&self, name: &str) -> Result<&'static ParamSpec, DecayError> {
        self.specs
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| {
                let known: Vec<&str> = self.specs.iter().map(|spec| spec.name).collect();
                DecayError::Config(
                    ErrorInfo::new("unknown-parameter", "parameter not accepted by this decay")
                        .with_context("name", name)
                        .with_hint(format!("accepted parameters: {}", known.join(", "))),
                )
            })
    }
}
