//! Headless command host.
//!
//! Stands in for the renderer: it records every call it receives and settles suspending commands
//! once their declared duration has passed on a [`ManualClock`]. Drives the CLI `play` command and
//! the playback tests.

use crate::catalog::CommandCatalog;
use crate::playback::clock::{Clock, ManualClock};
use crate::playback::completion::{Completion, Resolver};
use crate::playback::host::{CommandHost, Invocation, InvokeCtx};
use crate::scene::line::CommandCall;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostRecord {
    pub at_secs: f64,
    pub scene: usize,
    pub fragment: usize,
    pub call: String,
    pub suspends: bool,
}

#[derive(Debug)]
struct Timer {
    due: Duration,
    resolver: Resolver,
    reject: bool,
}

#[derive(Debug)]
pub struct SimHost {
    clock: ManualClock,
    catalog: CommandCatalog,
    timers: Vec<Timer>,
    records: Vec<HostRecord>,
    unclassified: Vec<String>,
    clears: usize,
    rejecting: BTreeSet<String>,
    stalling: BTreeSet<String>,
}

impl SimHost {
    /// `catalog` supplies the durations; it should be the one the scheduler classifies with.
    pub fn new(clock: ManualClock, catalog: CommandCatalog) -> Self {
        Self {
            clock,
            catalog,
            timers: Vec::new(),
            records: Vec::new(),
            unclassified: Vec::new(),
            clears: 0,
            rejecting: BTreeSet::new(),
            stalling: BTreeSet::new(),
        }
    }

    /// Suspending calls to `name` reject when their duration elapses instead of resolving.
    pub fn reject_command(mut self, name: impl Into<String>) -> Self {
        self.rejecting.insert(name.into());
        self
    }

    /// Suspending calls to `name` never settle on their own.
    pub fn stall_command(mut self, name: impl Into<String>) -> Self {
        self.stalling.insert(name.into());
        self
    }

    /// Settle every timer that is due. Returns how many settled.
    pub fn pump(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.timers.len();
        self.timers.retain(|t| {
            if t.due > now {
                return true;
            }
            if t.reject {
                t.resolver.reject("simulated failure");
            } else {
                t.resolver.resolve();
            }
            false
        });
        before - self.timers.len()
    }

    /// Timers still waiting to fire (stalled calls are not counted).
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn records(&self) -> &[HostRecord] {
        &self.records
    }

    /// Rendered calls in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.records.iter().map(|r| r.call.clone()).collect()
    }

    pub fn unclassified(&self) -> &[String] {
        &self.unclassified
    }

    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl CommandHost for SimHost {
    fn invoke(&mut self, call: &CommandCall, ctx: InvokeCtx) -> Invocation {
        let now = self.clock.now();
        self.records.push(HostRecord {
            at_secs: now.as_secs_f64(),
            scene: ctx.scene,
            fragment: ctx.fragment,
            call: call.to_string(),
            suspends: ctx.suspends,
        });
        if !ctx.suspends {
            return Invocation::Done;
        }

        let (completion, resolver) = Completion::pending();
        if self.stalling.contains(&call.name) {
            // Nobody holds the resolver, so the completion stays pending.
            drop(resolver);
            return Invocation::Pending(completion);
        }

        let secs = self
            .catalog
            .classify(call)
            .map_or(0.0, |spec| spec.duration_of(&call.args));
        self.timers.push(Timer {
            due: now.saturating_add(crate::foundation::core::secs_to_duration(secs)),
            resolver,
            reject: self.rejecting.contains(&call.name),
        });
        self.pump();
        Invocation::Pending(completion)
    }

    fn run_unclassified(&mut self, text: &str, _ctx: InvokeCtx) {
        self.unclassified.push(text.to_owned());
    }

    fn clear_area(&mut self) {
        self.clears += 1;
    }
}

#[cfg(test)]
#[path = "../tests/unit/sim.rs"]
mod tests;
