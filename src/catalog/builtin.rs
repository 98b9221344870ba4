use super::CommandCatalog;
use super::spec::{CommandSpec, DurationRule, Suspension};

fn arg(index: usize) -> DurationRule {
    DurationRule::Arg { index, plus: 0.0 }
}

impl CommandCatalog {
    /// The block-world command set: waits, block placement and removal, camera moves and
    /// callouts.
    ///
    /// Only `idle`, `tip`, `tiparea`, `moveCamera(false, ..)` and `cleanscene(false, ..)` suspend.
    /// Animated placements such as `setblockfall` and `fillfall` declare a duration but run in the
    /// background, so they add nothing to a fragment's estimate.
    pub fn builtin() -> Self {
        let specs = [
            CommandSpec::new("idle")
                .suspending(Suspension::Always)
                .timed(arg(0))
                .params(["duration"]),
            CommandSpec::new("tip")
                .suspending(Suspension::Always)
                .timed(DurationRule::Arg { index: 5, plus: 1.0 })
                .params(["x", "y", "z", "text", "color", "duration"]),
            CommandSpec::new("tiparea")
                .suspending(Suspension::Always)
                .timed(DurationRule::Arg { index: 8, plus: 1.0 })
                .params(["x1", "y1", "z1", "x2", "y2", "z2", "text", "color", "duration"]),
            CommandSpec::new("moveCamera")
                .suspending(Suspension::WhenFirstArgFalse)
                .timed(arg(4))
                .params(["isAsync", "x", "y", "z", "duration"]),
            CommandSpec::new("cleanscene")
                .suspending(Suspension::WhenFirstArgFalse)
                .timed(DurationRule::ArgOr {
                    index: 1,
                    default: 1.0,
                })
                .params(["isAsync", "duration"]),
            CommandSpec::new("setblock").params(["block", "x", "y", "z"]),
            CommandSpec::new("setblockfall")
                .timed(arg(4))
                .params(["block", "x", "y", "z", "duration"]),
            CommandSpec::new("fill").params(["block", "x1", "y1", "z1", "x2", "y2", "z2"]),
            CommandSpec::new("fillfall")
                .timed(arg(7))
                .params(["block", "x1", "y1", "z1", "x2", "y2", "z2", "duration"]),
            CommandSpec::new("removeblock").params(["x", "y", "z"]),
            CommandSpec::new("removeblockup")
                .timed(arg(3))
                .params(["x", "y", "z", "duration"]),
            CommandSpec::new("removearea").params(["x1", "y1", "z1", "x2", "y2", "z2"]),
            CommandSpec::new("removeareaup")
                .timed(arg(6))
                .params(["x1", "y1", "z1", "x2", "y2", "z2", "duration"]),
            CommandSpec::new("moveBlock")
                .timed(arg(6))
                .params(["startX", "startY", "startZ", "targetX", "targetY", "targetZ", "duration"]),
            CommandSpec::new("fadeBlock")
                .timed(arg(5))
                .params(["x", "y", "z", "startOpacity", "endOpacity", "duration"]),
            CommandSpec::new("CreateBase").params(["scene"]),
        ];

        specs.into_iter().fold(Self::new(), Self::with)
    }
}
