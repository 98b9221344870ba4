use crate::compile::program::{CompiledFragment, Instruction};
use crate::playback::cancel::{CancelHandle, Cancellable, Outcome};
use crate::playback::host::{CommandHost, Invocation, InvokeCtx};

/// Result of driving an execution as far as it can go right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Waiting on a suspending command; `CancelHandle` identifies the wait.
    Suspended(CancelHandle),
    /// Every instruction ran.
    Done,
    /// Stopped early: a suspending command was rejected, the wait was cancelled, or the fragment
    /// could not be found.
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Done,
    Halted,
}

/// Instruction pointer into one [`CompiledFragment`].
///
/// The fragment itself is never mutated; restarting means building a fresh `Execution`.
#[derive(Debug)]
pub struct Execution {
    fragment: usize,
    ip: usize,
    waiting: Option<Cancellable>,
    status: Status,
}

impl Execution {
    pub fn new(fragment: usize) -> Self {
        Self {
            fragment,
            ip: 0,
            waiting: None,
            status: Status::Running,
        }
    }

    pub fn fragment(&self) -> usize {
        self.fragment
    }

    /// Index of the next instruction to run.
    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn is_settled(&self) -> bool {
        self.status != Status::Running
    }

    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    /// Mark the execution halted without running anything further. Cancels the pending wait.
    pub fn abort(&mut self) {
        if let Some(w) = self.waiting.take() {
            w.cancel();
        }
        self.status = Status::Halted;
    }

    /// Run instructions until the next unresolved suspension or the end of the fragment.
    pub fn step(
        &mut self,
        fragment: &CompiledFragment,
        host: &mut dyn CommandHost,
        ctx: InvokeCtx,
    ) -> Step {
        match self.status {
            Status::Done => return Step::Done,
            Status::Halted => return Step::Halted,
            Status::Running => {}
        }

        loop {
            if let Some(w) = &self.waiting {
                match w.poll() {
                    Outcome::Pending => return Step::Suspended(w.handle()),
                    Outcome::Resolved => self.waiting = None,
                    Outcome::Rejected(reason) => {
                        tracing::warn!(
                            scene = ctx.scene,
                            fragment = self.fragment,
                            ip = self.ip,
                            reason = %reason,
                            "suspending command rejected; rest of fragment skipped"
                        );
                        self.waiting = None;
                        return self.halt();
                    }
                    Outcome::Cancelled => {
                        self.waiting = None;
                        return self.halt();
                    }
                }
            }

            let Some(ins) = fragment.instructions.get(self.ip) else {
                self.status = Status::Done;
                return Step::Done;
            };
            self.ip += 1;

            let op = match ins {
                Instruction::Unclassified { text, .. } => {
                    host.run_unclassified(text, InvokeCtx { suspends: false, ..ctx });
                    continue;
                }
                Instruction::Command(op) => op,
            };

            tracing::debug!(line = op.line, call = %op.call, suspends = op.suspends, "invoke");
            let inv = host.invoke(
                &op.call,
                InvokeCtx {
                    suspends: op.suspends,
                    ..ctx
                },
            );
            match inv {
                Invocation::Done => {}
                Invocation::Pending(c) if op.suspends => {
                    self.waiting = Some(Cancellable::new(c));
                }
                // Fire-and-forget: nobody waits on it.
                Invocation::Pending(_) => {}
                Invocation::Failed(reason) if op.suspends => {
                    tracing::warn!(
                        scene = ctx.scene,
                        fragment = self.fragment,
                        line = op.line,
                        reason = %reason,
                        "suspending command failed; rest of fragment skipped"
                    );
                    return self.halt();
                }
                Invocation::Failed(reason) => {
                    tracing::warn!(
                        line = op.line,
                        call = %op.call,
                        reason = %reason,
                        "command failed"
                    );
                }
            }
        }
    }

    fn halt(&mut self) -> Step {
        self.status = Status::Halted;
        Step::Halted
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/exec.rs"]
mod tests;
