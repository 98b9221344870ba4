use crate::foundation::core::sanitize_secs;
use crate::scene::line::Arg;
use serde::{Deserialize, Serialize};

/// When a command makes the calling fragment wait for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suspension {
    Always,
    #[default]
    Never,
    /// Suspends only when the first argument is the literal `false` (an `isAsync` flag).
    WhenFirstArgFalse,
}

impl Suspension {
    pub fn suspends(self, args: &[Arg]) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::WhenFirstArgFalse => args.first().and_then(Arg::as_bool) == Some(false),
        }
    }
}

/// How long a command runs, computed from its textual arguments.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DurationRule {
    #[default]
    Zero,
    /// `args[index] + plus`; a missing or non-numeric argument counts as `0`.
    Arg {
        index: usize,
        #[serde(default)]
        plus: f64,
    },
    /// `args[index]`, or `default` when that argument is missing or non-numeric.
    ArgOr { index: usize, default: f64 },
    #[serde(skip)]
    Custom(fn(&[Arg]) -> f64),
}

impl DurationRule {
    pub fn secs(&self, args: &[Arg]) -> f64 {
        let numeric = |i: usize| args.get(i).and_then(Arg::as_f64);
        let raw = match *self {
            Self::Zero => 0.0,
            Self::Arg { index, plus } => numeric(index).unwrap_or(0.0) + plus,
            Self::ArgOr { index, default } => numeric(index).unwrap_or(default),
            Self::Custom(f) => f(args),
        };
        sanitize_secs(raw)
    }
}

/// One catalog entry: the classification and timing contract of a named operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    #[serde(default)]
    pub suspends: Suspension,
    #[serde(default)]
    pub duration: DurationRule,
    /// Ordered parameter names. Informational; arity is not enforced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suspends: Suspension::Never,
            duration: DurationRule::Zero,
            params: Vec::new(),
        }
    }

    pub fn suspending(mut self, suspends: Suspension) -> Self {
        self.suspends = suspends;
        self
    }

    pub fn timed(mut self, duration: DurationRule) -> Self {
        self.duration = duration;
        self
    }

    pub fn params<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_suspending(&self, args: &[Arg]) -> bool {
        self.suspends.suspends(args)
    }

    /// Declared duration in seconds, regardless of whether the call suspends.
    pub fn duration_of(&self, args: &[Arg]) -> f64 {
        self.duration.secs(args)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/spec.rs"]
mod tests;
