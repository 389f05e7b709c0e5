use crate::config::model::EngineSettings;
use crate::engine::scheduler::{Scheduler, TickReport};
use crate::foundation::core::{Canvas, Color, FrameHandle};
use crate::foundation::error::{PrimeWheelError, PrimeWheelResult};
use crate::surface::adapter::Surface;
use crate::wheel::model::{Wheel, WheelConfig};
use crate::wheel::registry::WheelRegistry;

/// Lifecycle state of an engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// Not animating; the surface is hidden and no frame is armed.
    #[default]
    Stopped,
    /// Animating: each fired frame ticks the scheduler and arms the next one.
    Running,
    /// Frames keep firing and re-arming, but ticks do nothing.
    Paused,
}

/// What happened when a frame was delivered to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No frame was due (only from [`PrimeWheels::pump`]).
    Idle,
    /// The handle was stale, cancelled, or arrived while stopped; nothing was drawn.
    Ignored,
    /// Paused: nothing was drawn, the next frame is armed.
    Paused,
    /// The scheduler ticked and the next frame is armed.
    Ticked(TickReport),
}

/// Multi-wheel prime animation engine.
///
/// Owns the wheel registry, the scheduler and the surface it draws to, plus the single
/// running/paused/stopped state. At most one frame is armed at any time.
///
/// ```
/// use primewheel::{Canvas, FrameOutcome, PrimeWheels, RecordingSurface, WheelConfig};
///
/// let surface = RecordingSurface::new(Canvas::new(320, 200)?);
/// let mut engine = PrimeWheels::with_surface(Default::default(), surface)?;
/// engine.add(WheelConfig { speed: 1, ..Default::default() })?;
/// engine.start()?;
/// assert!(matches!(engine.pump(), FrameOutcome::Ticked(_)));
/// # Ok::<(), primewheel::PrimeWheelError>(())
/// ```
pub struct PrimeWheels<S: Surface> {
    background: Color,
    registry: WheelRegistry,
    scheduler: Scheduler,
    surface: Option<S>,
    state: RunState,
    armed: Option<FrameHandle>,
    ever_started: bool,
}

impl<S: Surface> PrimeWheels<S> {
    /// Engine with no surface attached yet.
    pub fn new(settings: EngineSettings) -> PrimeWheelResult<Self> {
        settings.validate()?;
        Ok(Self {
            background: settings.background,
            registry: WheelRegistry::new(settings.max_wheels),
            scheduler: Scheduler::new(settings.base_bound, settings.seed),
            surface: None,
            state: RunState::Stopped,
            armed: None,
            ever_started: false,
        })
    }

    /// Engine with `surface` already attached.
    pub fn with_surface(settings: EngineSettings, surface: S) -> PrimeWheelResult<Self> {
        let mut engine = Self::new(settings)?;
        engine.attach_surface(surface)?;
        Ok(engine)
    }

    /// Attach the drawing surface. Clears and hides it.
    ///
    /// Wheels added before a surface existed get their random offsets rolled here.
    pub fn attach_surface(&mut self, mut surface: S) -> PrimeWheelResult<()> {
        if self.surface.is_some() {
            tracing::warn!("surface already attached");
            return Err(PrimeWheelError::AlreadyInitialized);
        }
        surface.clear(self.background);
        surface.hide();
        let canvas = surface.canvas();
        for wheel in self.registry.iter_mut() {
            self.scheduler.place(wheel, canvas);
        }
        self.surface = Some(surface);
        Ok(())
    }

    /// Stop and hand back the surface.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.stop();
        self.surface.take()
    }

    /// Attached surface, if any.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Attached surface, if any.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Register a wheel built from `config`; returns its index.
    ///
    /// A wheel added while others are animating starts at candidate 2 on the next tick.
    pub fn add(&mut self, config: WheelConfig) -> PrimeWheelResult<usize> {
        if self.registry.len() >= self.registry.max_wheels() {
            tracing::warn!(max = self.registry.max_wheels(), "max number of wheels reached");
            return Err(PrimeWheelError::CapacityExceeded {
                max: self.registry.max_wheels(),
            });
        }
        let mut wheel = Wheel::new(config)?;
        if let Some(surface) = self.surface.as_ref() {
            self.scheduler.place(&mut wheel, surface.canvas());
        }
        let index = self.registry.push(wheel)?;
        tracing::debug!(index, count = self.registry.len(), "wheel added");
        Ok(index)
    }

    /// Remove the wheel at `index`; later wheels shift down by one.
    pub fn remove(&mut self, index: usize) -> PrimeWheelResult<Wheel> {
        let removed = self.registry.remove(index).inspect_err(|e| {
            tracing::warn!(%e, "remove rejected");
        })?;
        tracing::debug!(index, count = self.registry.len(), "wheel removed");
        Ok(removed)
    }

    /// Drop every wheel. Glyphs already on the surface stay until the next clear.
    pub fn clear_wheels(&mut self) {
        self.registry.clear();
        tracing::debug!("all wheels removed");
    }

    /// Change the glyph color of the wheel at `index`. Already drawn glyphs keep their color.
    pub fn set_color(&mut self, index: usize, color: Color) -> PrimeWheelResult<()> {
        self.registry
            .set_color(index, color)
            .inspect_err(|e| tracing::warn!(%e, "set_color rejected"))
    }

    /// Change the registry capacity. Only allowed before the first [`PrimeWheels::start`].
    pub fn set_max_wheels(&mut self, max_wheels: usize) -> PrimeWheelResult<()> {
        if self.ever_started {
            tracing::warn!(max_wheels, "max_wheels is frozen after start");
            return Err(PrimeWheelError::ConfigFrozen);
        }
        self.registry.set_max_wheels(max_wheels);
        Ok(())
    }

    /// Background used by every clear from now on.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Current background color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Number of registered wheels.
    pub fn wheel_count(&self) -> usize {
        self.registry.len()
    }

    /// Registry capacity.
    pub fn max_wheels(&self) -> usize {
        self.registry.max_wheels()
    }

    /// Wheel at `index`, if any.
    pub fn wheel(&self, index: usize) -> Option<&Wheel> {
        self.registry.get(index)
    }

    /// All wheels in draw order.
    pub fn wheels(&self) -> &WheelRegistry {
        &self.registry
    }

    /// Scheduler counters.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Running or paused.
    pub fn is_running(&self) -> bool {
        self.state != RunState::Stopped
    }

    /// Paused.
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    /// Frame currently in flight, if any.
    pub fn armed_frame(&self) -> Option<FrameHandle> {
        self.armed
    }

    /// Show the surface and arm the first frame.
    pub fn start(&mut self) -> PrimeWheelResult<()> {
        if self.state != RunState::Stopped {
            tracing::warn!(state = ?self.state, "prime wheel effect already running");
            return Err(PrimeWheelError::AlreadyRunning);
        }
        let Some(surface) = self.surface.as_mut() else {
            tracing::warn!("start ignored: no surface attached");
            return Err(PrimeWheelError::not_ready("no surface attached"));
        };
        surface.show();
        self.state = RunState::Running;
        self.ever_started = true;
        self.arm();
        tracing::info!(wheels = self.registry.len(), "running prime wheel effect");
        Ok(())
    }

    /// Cancel the armed frame, hide the surface and stop. Idempotent.
    pub fn stop(&mut self) {
        let was = self.state;
        if let Some(surface) = self.surface.as_mut() {
            if let Some(handle) = self.armed.take() {
                surface.cancel_frame(handle);
            }
            surface.hide();
        }
        self.armed = None;
        self.state = RunState::Stopped;
        if was != RunState::Stopped {
            tracing::info!("prime wheel stopped");
        }
    }

    /// Flip between running and paused; the armed frame stays in flight. Returns the new state.
    pub fn pause(&mut self) -> PrimeWheelResult<RunState> {
        self.state = match self.state {
            RunState::Running => {
                tracing::info!("pausing prime wheel");
                RunState::Paused
            }
            RunState::Paused => {
                tracing::info!("resuming prime wheel");
                RunState::Running
            }
            RunState::Stopped => {
                tracing::warn!("pause ignored: not running");
                return Err(PrimeWheelError::NotRunning);
            }
        };
        Ok(self.state)
    }

    /// Stop if running or paused, otherwise start. Returns the new state.
    pub fn toggle(&mut self) -> PrimeWheelResult<RunState> {
        if self.is_running() {
            self.stop();
        } else {
            self.start()?;
        }
        Ok(self.state)
    }

    /// Clear the surface and restart every wheel at candidate 2. Keeps the run state.
    pub fn reset(&mut self) -> PrimeWheelResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            tracing::warn!("reset ignored: no surface attached");
            return Err(PrimeWheelError::not_ready("no surface attached"));
        };
        tracing::info!("resetting prime wheel effect");
        self.scheduler
            .reset_all(&mut self.registry, surface, self.background);
        Ok(())
    }

    /// Resize the surface, then [`PrimeWheels::reset`].
    pub fn resize(&mut self, canvas: Canvas) -> PrimeWheelResult<()> {
        canvas
            .validate()
            .inspect_err(|e| tracing::warn!(?canvas, %e, "resize rejected"))?;
        let Some(surface) = self.surface.as_mut() else {
            tracing::warn!("resize ignored: no surface attached");
            return Err(PrimeWheelError::not_ready("no surface attached"));
        };
        surface
            .resize(canvas)
            .inspect_err(|e| tracing::warn!(?canvas, %e, "surface refused resize"))?;
        self.reset()
    }

    /// Deliver a fired frame.
    ///
    /// Only the armed handle is honored; anything else (a cancelled frame firing late, a frame
    /// from before a stop) is ignored without drawing.
    pub fn on_frame(&mut self, handle: FrameHandle) -> FrameOutcome {
        if self.armed != Some(handle) || self.state == RunState::Stopped {
            tracing::trace!(?handle, armed = ?self.armed, "ignoring stale frame");
            return FrameOutcome::Ignored;
        }
        self.armed = None;

        let outcome = match (self.state, self.surface.as_mut()) {
            (RunState::Running, Some(surface)) => FrameOutcome::Ticked(self.scheduler.tick(
                &mut self.registry,
                surface,
                self.background,
            )),
            _ => FrameOutcome::Paused,
        };
        self.arm();
        outcome
    }

    /// Fire the surface's oldest due frame, if any.
    pub fn pump(&mut self) -> FrameOutcome {
        match self.surface.as_mut().and_then(|s| s.take_due_frame()) {
            Some(handle) => self.on_frame(handle),
            None => FrameOutcome::Idle,
        }
    }

    fn arm(&mut self) {
        if self.armed.is_some() {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            self.armed = Some(surface.schedule_frame());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/lifecycle.rs"]
mod tests;
