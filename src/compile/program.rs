use crate::estimate::DurationTable;
use crate::scene::line::CommandCall;
use std::fmt::Write as _;

/// A command line classified against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOp {
    /// 0-based line number inside the source fragment.
    pub line: usize,
    pub call: CommandCall,
    pub suspends: bool,
    /// Declared duration. Only counts toward the estimate when `suspends` is set.
    pub duration_secs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Command(CommandOp),
    /// A line that names no catalog command (or is not a single call). Runs as a fire-and-forget
    /// statement with zero duration.
    Unclassified { line: usize, text: String },
}

impl Instruction {
    pub fn line(&self) -> usize {
        match self {
            Self::Command(op) => op.line,
            Self::Unclassified { line, .. } => *line,
        }
    }

    pub fn suspends(&self) -> bool {
        matches!(self, Self::Command(op) if op.suspends)
    }

    /// Seconds this instruction holds the fragment for.
    pub fn blocking_secs(&self) -> f64 {
        match self {
            Self::Command(op) if op.suspends => op.duration_secs,
            _ => 0.0,
        }
    }
}

/// The resumable unit derived from one fragment.
///
/// Immutable once built; execution progress lives in a separate instruction pointer so the same
/// compiled fragment can be restarted without recompiling.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFragment {
    pub(crate) index: usize,
    pub(crate) instructions: Vec<Instruction>,
    pub(crate) estimated_secs: f64,
}

impl CompiledFragment {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn estimated_secs(&self) -> f64 {
        self.estimated_secs
    }

    pub fn suspension_points(&self) -> usize {
        self.instructions.iter().filter(|i| i.suspends()).count()
    }

    /// Render the unit back to command text, one instruction per line.
    ///
    /// Suspending commands are prefixed with `yield`, which the line parser accepts, so the
    /// output can be fed straight back into [`crate::estimate::estimate_lines`].
    pub fn source(&self) -> String {
        let mut out = String::new();
        for ins in &self.instructions {
            match ins {
                Instruction::Command(op) if op.suspends => {
                    let _ = writeln!(out, "yield {}", op.call);
                }
                Instruction::Command(op) => {
                    let _ = writeln!(out, "{}", op.call);
                }
                Instruction::Unclassified { text, .. } => {
                    let _ = writeln!(out, "{text}");
                }
            }
        }
        out
    }
}

/// Every fragment of one scene, compiled together, plus their duration table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledScene {
    pub(crate) scene_index: usize,
    pub(crate) fragments: Vec<CompiledFragment>,
    pub(crate) durations: DurationTable,
}

impl CompiledScene {
    pub fn scene_index(&self) -> usize {
        self.scene_index
    }

    pub fn fragment(&self, index: usize) -> Option<&CompiledFragment> {
        self.fragments.get(index)
    }

    pub fn fragments(&self) -> &[CompiledFragment] {
        &self.fragments
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn durations(&self) -> &DurationTable {
        &self.durations
    }

    pub fn total_secs(&self) -> f64 {
        self.durations.total_secs()
    }
}
