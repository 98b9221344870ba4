pub mod cancel;
pub mod clock;
pub mod completion;
pub mod event;
pub mod exec;
pub mod host;
pub mod scheduler;
pub mod state;

pub use cancel::{CancelHandle, Cancellable, Outcome};
pub use clock::{Clock, ManualClock, SystemClock};
pub use completion::{Completion, Resolver, Settlement};
pub use event::PlaybackEvent;
pub use exec::{Execution, Step};
pub use host::{CommandHost, Invocation, InvokeCtx};
pub use scheduler::{PlaybackOpts, Scheduler};
pub use state::{PlaybackPhase, PlaybackState};
