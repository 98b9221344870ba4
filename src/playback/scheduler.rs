use crate::catalog::CommandCatalog;
use crate::compile::compiler::compile_scene;
use crate::compile::program::CompiledScene;
use crate::foundation::error::{PonderError, PonderResult};
use crate::playback::clock::{Clock, SystemClock};
use crate::playback::event::PlaybackEvent;
use crate::playback::exec::{Execution, Step};
use crate::playback::host::{CommandHost, Invocation, InvokeCtx};
use crate::playback::state::{PlaybackPhase, PlaybackState};
use crate::scene::model::ScriptDocument;
use std::collections::VecDeque;
use std::time::Duration;

/// Runtime knobs for a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOpts {
    /// Pause between a scene switch and fragment 0 of the new scene.
    pub settle_delay: Duration,
    /// Hold a fragment until its execution has settled, even after its estimate elapsed.
    /// When off, the fragment advances on the estimate alone and the running unit is abandoned.
    pub wait_for_settle: bool,
    pub auto_play: bool,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            wait_for_settle: true,
            auto_play: false,
        }
    }
}

/// Owns "what is playing now" and drives one compiled fragment at a time.
///
/// The host calls [`Scheduler::tick`] once per frame; everything else (navigation, toggles) is
/// triggered by user input. All work happens on the caller's thread.
pub struct Scheduler<C: Clock = SystemClock> {
    doc: ScriptDocument,
    catalog: CommandCatalog,
    clock: C,
    opts: PlaybackOpts,
    state: PlaybackState,
    compiled: Option<CompiledScene>,
    exec: Option<Execution>,
    fragment_started_at: Option<Duration>,
    scene_started_at: Option<Duration>,
    /// Set while a scene switch settles; fragment 0 starts once the clock passes it.
    resume_at: Option<Duration>,
    events: VecDeque<PlaybackEvent>,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(
        doc: ScriptDocument,
        catalog: CommandCatalog,
        clock: C,
        opts: PlaybackOpts,
    ) -> PonderResult<Self> {
        doc.validate()?;
        let state = PlaybackState {
            auto_play: opts.auto_play,
            ..PlaybackState::default()
        };
        Ok(Self {
            doc,
            catalog,
            clock,
            opts,
            state,
            compiled: None,
            exec: None,
            fragment_started_at: None,
            scene_started_at: None,
            resume_at: None,
            events: VecDeque::new(),
        })
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase()
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn document(&self) -> &ScriptDocument {
        &self.doc
    }

    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn opts(&self) -> &PlaybackOpts {
        &self.opts
    }

    pub fn scene_count(&self) -> usize {
        self.doc.scene_count()
    }

    /// The compiled form of the current scene, once one has been entered.
    pub fn compiled(&self) -> Option<&CompiledScene> {
        self.compiled.as_ref()
    }

    /// Whether a scene switch is waiting out its settle delay.
    pub fn is_settling(&self) -> bool {
        self.resume_at.is_some()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.current_scene > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.current_scene + 1 < self.doc.scene_count()
    }

    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain(..).collect()
    }

    /// Enter `scene` and start fragment 0 right away.
    #[tracing::instrument(skip(self, host))]
    pub fn initialize(&mut self, scene: usize, host: &mut dyn CommandHost) -> PonderResult<()> {
        self.enter_scene(scene, host)
            .inspect_err(|e| tracing::error!(error = %e, "cannot start playback"))?;
        self.start_scene(host);
        Ok(())
    }

    /// Per-frame update: resumes after a settle delay, polls the running fragment, updates
    /// progress and performs at most one fragment transition.
    pub fn tick(&mut self, host: &mut dyn CommandHost) -> PonderResult<()> {
        let now = self.clock.now();
        if let Some(at) = self.resume_at
            && now >= at
        {
            self.start_scene(host);
        }
        if !self.state.is_playing {
            return Ok(());
        }

        self.drive(host);
        self.update_progress(now);

        let Some(started) = self.fragment_started_at else {
            return Ok(());
        };
        let estimate = self
            .compiled
            .as_ref()
            .and_then(|c| c.durations().get(self.state.current_fragment))
            .unwrap_or(0.0);
        if now.saturating_sub(started).as_secs_f64() < estimate {
            return Ok(());
        }

        let settled = self.exec.as_ref().is_none_or(Execution::is_settled);
        if settled || !self.opts.wait_for_settle {
            self.complete_fragment(host)?;
        }
        Ok(())
    }

    /// Jump to scene `n`: clears the area, abandons whatever is running, recompiles and resumes
    /// after the settle delay.
    #[tracing::instrument(skip(self, host))]
    pub fn switch_to_scene(&mut self, n: usize, host: &mut dyn CommandHost) -> PonderResult<()> {
        let count = self.doc.scene_count();
        if n >= count {
            tracing::error!(index = n, count, "scene index out of range; switch ignored");
            return Err(PonderError::SceneOutOfRange { index: n, count });
        }

        host.clear_area();
        self.enter_scene(n, host)?;

        let at = self.clock.now().saturating_add(self.opts.settle_delay);
        if self.opts.settle_delay.is_zero() {
            self.start_scene(host);
        } else {
            self.resume_at = Some(at);
        }
        Ok(())
    }

    pub fn replay_scene(&mut self, host: &mut dyn CommandHost) -> PonderResult<()> {
        self.switch_to_scene(self.state.current_scene, host)
    }

    /// Returns `false` (and does nothing) on the last scene.
    pub fn next_scene(&mut self, host: &mut dyn CommandHost) -> PonderResult<bool> {
        if !self.can_go_forward() {
            return Ok(false);
        }
        self.switch_to_scene(self.state.current_scene + 1, host)?;
        Ok(true)
    }

    /// Returns `false` (and does nothing) on the first scene.
    pub fn previous_scene(&mut self, host: &mut dyn CommandHost) -> PonderResult<bool> {
        if !self.can_go_back() {
            return Ok(false);
        }
        self.switch_to_scene(self.state.current_scene - 1, host)?;
        Ok(true)
    }

    pub fn toggle_auto_play(&mut self) -> bool {
        self.state.auto_play = !self.state.auto_play;
        tracing::info!(auto_play = self.state.auto_play, "auto-play toggled");
        self.state.auto_play
    }

    pub fn toggle_slow_mode(&mut self) -> bool {
        self.state.slow_mode = !self.state.slow_mode;
        tracing::info!(slow_mode = self.state.slow_mode, "slow mode toggled");
        self.state.slow_mode
    }

    /// Halt playback: cancel the awaited command and abandon the running fragment.
    pub fn stop(&mut self) {
        self.abandon();
        self.resume_at = None;
        self.halt();
    }

    /// Compile `n` and reset state to its start. Leaves the scheduler stopped; the caller starts
    /// fragment 0.
    fn enter_scene(&mut self, n: usize, host: &mut dyn CommandHost) -> PonderResult<()> {
        let compiled = compile_scene(&self.doc, n, &self.catalog)?;
        self.abandon();

        self.state.current_scene = n;
        self.state.current_fragment = 0;
        self.state.progress = 0.0;
        self.state.is_playing = false;
        self.state.is_stopped = true;
        self.fragment_started_at = None;
        self.scene_started_at = None;
        self.resume_at = None;

        if let Some(base) = self.doc.scene(n).and_then(|s| s.base.as_ref()) {
            let ctx = InvokeCtx {
                scene: n,
                fragment: 0,
                suspends: false,
                slow_mode: self.state.slow_mode,
            };
            for call in base.expand() {
                if let Invocation::Failed(reason) = host.invoke(&call, ctx) {
                    tracing::warn!(call = %call, reason = %reason, "base layout placement failed");
                }
            }
        }

        tracing::info!(
            scene = n,
            fragments = compiled.fragment_count(),
            total_secs = compiled.total_secs(),
            "scene entered"
        );
        self.compiled = Some(compiled);
        self.events.push_back(PlaybackEvent::SceneEntered { scene: n });
        self.events.push_back(PlaybackEvent::ProgressReset);
        self.events.push_back(PlaybackEvent::NavigationChanged {
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
        });
        Ok(())
    }

    fn start_scene(&mut self, host: &mut dyn CommandHost) {
        let now = self.clock.now();
        self.resume_at = None;
        self.scene_started_at = Some(now);
        self.state.is_playing = true;
        self.state.is_stopped = false;

        let total_secs = self.compiled.as_ref().map_or(0.0, CompiledScene::total_secs);
        self.events.push_back(PlaybackEvent::ProgressStarted {
            scene: self.state.current_scene,
            total_secs,
        });
        self.begin_fragment(0, host);
    }

    fn begin_fragment(&mut self, fragment: usize, host: &mut dyn CommandHost) {
        self.state.current_fragment = fragment;
        self.fragment_started_at = Some(self.clock.now());
        self.exec = Some(Execution::new(fragment));
        tracing::info!(scene = self.state.current_scene, fragment, "fragment started");
        self.events.push_back(PlaybackEvent::FragmentStarted {
            scene: self.state.current_scene,
            fragment,
        });
        self.drive(host);
    }

    /// Run the current execution as far as it goes and track the awaited command's handle.
    fn drive(&mut self, host: &mut dyn CommandHost) {
        let Some(exec) = self.exec.as_mut() else {
            return;
        };
        if exec.is_settled() {
            return;
        }

        let scene = self.state.current_scene;
        let Some(fragment) = self
            .compiled
            .as_ref()
            .and_then(|c| c.fragment(exec.fragment()))
        else {
            tracing::error!(
                scene,
                fragment = exec.fragment(),
                "no compiled fragment at this index; playback of it aborted"
            );
            exec.abort();
            return;
        };

        let ctx = InvokeCtx {
            scene,
            fragment: exec.fragment(),
            suspends: false,
            slow_mode: self.state.slow_mode,
        };
        match exec.step(fragment, host, ctx) {
            Step::Suspended(handle) => {
                if self.state.active.as_ref() != Some(&handle)
                    && let Some(prev) = self.state.active.replace(handle)
                {
                    prev.cancel();
                }
            }
            Step::Done | Step::Halted => self.state.active = None,
        }
    }

    fn complete_fragment(&mut self, host: &mut dyn CommandHost) -> PonderResult<()> {
        let scene = self.state.current_scene;
        let fragment = self.state.current_fragment;

        if self.exec.as_ref().is_some_and(|e| !e.is_settled()) {
            tracing::debug!(scene, fragment, "estimate elapsed before the fragment settled");
            self.abandon();
        }
        self.exec = None;

        tracing::info!(scene, fragment, "fragment complete");
        self.events
            .push_back(PlaybackEvent::FragmentComplete { scene, fragment });

        let count = self.compiled.as_ref().map_or(0, CompiledScene::fragment_count);
        if fragment + 1 < count {
            self.begin_fragment(fragment + 1, host);
            return Ok(());
        }
        self.complete_scene(host)
    }

    fn complete_scene(&mut self, host: &mut dyn CommandHost) -> PonderResult<()> {
        let scene = self.state.current_scene;
        self.state.progress = 1.0;
        self.fragment_started_at = None;
        tracing::info!(scene, "scene complete");
        self.events.push_back(PlaybackEvent::SceneComplete { scene });

        if self.state.auto_play && self.can_go_forward() {
            return self.switch_to_scene(scene + 1, host);
        }
        self.halt();
        Ok(())
    }

    fn update_progress(&mut self, now: Duration) {
        let (Some(start), Some(compiled)) = (self.scene_started_at, self.compiled.as_ref()) else {
            return;
        };
        let total = compiled.total_secs();
        let elapsed = now.saturating_sub(start).as_secs_f64();
        self.state.progress = if total > 0.0 {
            (elapsed / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Cancel the awaited command and drop the running execution.
    fn abandon(&mut self) {
        if let Some(handle) = self.state.active.take() {
            handle.cancel();
        }
        if let Some(mut exec) = self.exec.take() {
            exec.abort();
        }
    }

    fn halt(&mut self) {
        self.state.is_playing = false;
        self.state.is_stopped = true;
        self.fragment_started_at = None;
        tracing::info!(scene = self.state.current_scene, "playback stopped");
        self.events.push_back(PlaybackEvent::Stopped {
            scene: self.state.current_scene,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
