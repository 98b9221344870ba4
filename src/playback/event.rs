use serde::Serialize;

/// Notifications raised by the scheduler, drained by the host (progress bar, navigation arrows).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    SceneEntered { scene: usize },
    /// Snap the progress indicator back to zero.
    ProgressReset,
    /// Start one continuous progress animation lasting `total_secs`.
    ProgressStarted { scene: usize, total_secs: f64 },
    FragmentStarted { scene: usize, fragment: usize },
    FragmentComplete { scene: usize, fragment: usize },
    SceneComplete { scene: usize },
    Stopped { scene: usize },
    NavigationChanged {
        can_go_back: bool,
        can_go_forward: bool,
    },
}
