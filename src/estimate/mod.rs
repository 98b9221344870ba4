//! Static duration estimates.
//!
//! A fragment's estimate is the sum of the declared durations of its suspending commands. Nothing
//! is executed; non-suspending commands (including background fan-outs such as `fillfall`)
//! contribute zero, and argument values that are not numbers count as zero seconds.

use crate::catalog::CommandCatalog;
use crate::compile::program::CompiledFragment;
use crate::foundation::core::sanitize_secs;
use crate::scene::line::{CommandCall, parse_line};

/// Seconds a single call holds its fragment for.
pub fn estimate_call(catalog: &CommandCatalog, call: &CommandCall) -> f64 {
    match catalog.classify(call) {
        Some(spec) if spec.is_suspending(&call.args) => spec.duration_of(&call.args),
        _ => 0.0,
    }
}

pub fn estimate_fragment(fragment: &CompiledFragment) -> f64 {
    sanitize_secs(
        fragment
            .instructions()
            .iter()
            .map(|i| i.blocking_secs())
            .sum(),
    )
}

/// Estimate straight from command text, e.g. raw fragment lines or
/// [`CompiledFragment::source`] output.
///
/// Lines that do not parse are skipped, matching how the compiler treats them.
pub fn estimate_lines<S: AsRef<str>>(
    catalog: &CommandCatalog,
    lines: impl IntoIterator<Item = S>,
) -> f64 {
    let total: f64 = lines
        .into_iter()
        .filter_map(|l| parse_line(l.as_ref()).ok().flatten())
        .map(|call| estimate_call(catalog, &call))
        .sum();
    sanitize_secs(total)
}

/// Per-fragment estimates for the active scene.
///
/// Built when a scene is compiled and thrown away with it; never carried across scenes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DurationTable {
    scene: usize,
    per_fragment: Vec<f64>,
    total: f64,
}

impl DurationTable {
    pub fn for_scene(scene: usize, fragments: &[CompiledFragment]) -> Self {
        let per_fragment: Vec<f64> = fragments.iter().map(|f| f.estimated_secs()).collect();
        let total = sanitize_secs(per_fragment.iter().sum());
        Self {
            scene,
            per_fragment,
            total,
        }
    }

    pub fn scene(&self) -> usize {
        self.scene
    }

    pub fn get(&self, fragment: usize) -> Option<f64> {
        self.per_fragment.get(fragment).copied()
    }

    pub fn len(&self) -> usize {
        self.per_fragment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_fragment.is_empty()
    }

    pub fn total_secs(&self) -> f64 {
        self.total
    }

    /// Sum of the estimates strictly before `fragment`.
    pub fn offset_secs(&self, fragment: usize) -> f64 {
        sanitize_secs(self.per_fragment.iter().take(fragment).sum())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/estimate/estimate.rs"]
mod tests;
