use crate::playback::completion::Completion;
use crate::scene::line::CommandCall;

/// What the host reports back after being asked to run a command.
#[derive(Debug, Clone)]
pub enum Invocation {
    /// Finished synchronously (or the host has nothing to wait on).
    Done,
    /// Still running; settles later.
    Pending(Completion),
    /// Could not be started.
    Failed(String),
}

/// Context passed along with every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokeCtx {
    pub scene: usize,
    pub fragment: usize,
    /// Whether the scheduler will wait for this call before running the next line.
    pub suspends: bool,
    pub slow_mode: bool,
}

/// The renderer-side collaborator that actually executes commands.
///
/// The scheduler only classifies, times and orders calls; everything visible happens here.
pub trait CommandHost {
    fn invoke(&mut self, call: &CommandCall, ctx: InvokeCtx) -> Invocation;

    /// A line that names no catalog command. Hosts usually ignore these.
    fn run_unclassified(&mut self, text: &str, ctx: InvokeCtx) {
        let _ = ctx;
        tracing::trace!(text, "unclassified statement ignored");
    }

    /// Remove every object placed in the view.
    fn clear_area(&mut self);
}
