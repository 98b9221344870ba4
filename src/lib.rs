//! Ponder plays scripted, step-by-step scene explanations.
//!
//! A script is an ordered list of scenes; each scene is an ordered list of fragments; each
//! fragment is a handful of command lines (`idle(2)`, `setblock('minecraft:stone', 0, 1, 0)`, …).
//! The crate does not draw anything. It:
//!
//! - Classifies command lines against a [`CommandCatalog`] and compiles fragments into
//!   resumable instruction lists
//! - Estimates how long each fragment and scene will take without running it
//! - Drives playback through a [`Scheduler`] that hands every command to a [`CommandHost`] and
//!   advances fragments and scenes as they finish
#![forbid(unsafe_code)]

pub mod catalog;
pub mod compile;
pub mod estimate;
mod foundation;
pub mod playback;
pub mod scene;
pub mod sim;

pub use crate::catalog::CommandCatalog;
pub use crate::catalog::spec::{CommandSpec, DurationRule, Suspension};
pub use crate::compile::compiler::{compile_fragment, compile_scene};
pub use crate::compile::program::{CommandOp, CompiledFragment, CompiledScene, Instruction};
pub use crate::estimate::{DurationTable, estimate_call, estimate_fragment, estimate_lines};
pub use crate::foundation::core::{Vec3, sanitize_secs};
pub use crate::foundation::error::{PonderError, PonderResult};
pub use crate::playback::{
    CancelHandle, Cancellable, Clock, CommandHost, Completion, Invocation, InvokeCtx, ManualClock,
    Outcome, PlaybackEvent, PlaybackOpts, PlaybackPhase, PlaybackState, Resolver, Scheduler,
    Settlement, SystemClock,
};
pub use crate::scene::base::{BaseCreate, BaseLayout};
pub use crate::scene::line::{Arg, CommandCall, LineError, parse_line};
pub use crate::scene::model::{Fragment, Scene, ScriptDocument};
pub use crate::sim::{HostRecord, SimHost};
