use crate::foundation::core::{Canvas, Color, Point};
use crate::foundation::math::SplitMix64;
use crate::oracle::prime::is_prime;
use crate::surface::adapter::{Glyph, Surface};
use crate::wheel::model::Wheel;
use crate::wheel::offset::random_offsets;
use crate::wheel::registry::WheelRegistry;

/// Summary of one scheduler tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// 1-based tick counter since the scheduler was created.
    pub tick: u64,
    /// Wheels that were not done when the tick began.
    pub active: usize,
    /// Wheels that tested a candidate this tick (the rest were throttled or done).
    pub stepped: usize,
    /// Glyphs drawn this tick.
    pub drawn: usize,
    /// Whether this tick ended in a collective reset.
    pub reset: bool,
}

/// Per-frame driver for a wheel registry.
///
/// Owns the pieces of per-run state that are not wheel data: the candidate bound, the offset
/// generator and tick counters. Registry and surface are passed in explicitly on every call.
#[derive(Clone, Debug)]
pub struct Scheduler {
    base_bound: u64,
    rng: SplitMix64,
    ticks: u64,
    resets: u64,
}

impl Scheduler {
    /// Scheduler visiting candidates up to `base_bound * scale` per wheel.
    pub fn new(base_bound: u64, seed: u64) -> Self {
        Self {
            base_bound,
            rng: SplitMix64::new(seed),
            ticks: 0,
            resets: 0,
        }
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Collective resets run so far (automatic and explicit).
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Roll fresh offsets for `wheel` if it asks for random placement.
    pub(crate) fn place(&mut self, wheel: &mut Wheel, canvas: Canvas) {
        if wheel.config.random_offset {
            let (x, y) = random_offsets(canvas, &mut self.rng);
            wheel.set_offsets(x, y);
        }
    }

    /// Advance every wheel once, in registry order, then reset the whole set if every wheel was
    /// already done when the tick began.
    ///
    /// An empty registry ticks without drawing or resetting.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        registry: &mut WheelRegistry,
        surface: &mut S,
        background: Color,
    ) -> TickReport {
        self.ticks += 1;
        let center = surface.canvas().center();
        let mut report = TickReport {
            tick: self.ticks,
            ..TickReport::default()
        };

        for wheel in registry.iter_mut() {
            if wheel.done {
                continue;
            }
            report.active += 1;
            match advance(wheel, center, self.base_bound, surface) {
                Step::Throttled => {}
                Step::Tested { drawn } => {
                    report.stepped += 1;
                    report.drawn += usize::from(drawn);
                }
            }
        }

        if !registry.is_empty() && report.active == 0 {
            tracing::debug!(tick = self.ticks, wheels = registry.len(), "all wheels done");
            self.reset_all(registry, surface, background);
            report.reset = true;
        }

        tracing::trace!(?report, "tick");
        report
    }

    /// Clear the surface and restart every wheel at candidate 2, re-rolling random offsets.
    pub fn reset_all<S: Surface + ?Sized>(
        &mut self,
        registry: &mut WheelRegistry,
        surface: &mut S,
        background: Color,
    ) {
        surface.clear(background);
        let canvas = surface.canvas();
        for wheel in registry.iter_mut() {
            self.place(wheel, canvas);
            wheel.rewind();
        }
        self.resets += 1;
    }
}

enum Step {
    Throttled,
    Tested { drawn: bool },
}

/// One frame of one wheel: every `speed`-th call tests and (maybe) draws the current candidate,
/// then moves the cursor forward.
fn advance<S: Surface + ?Sized>(
    wheel: &mut Wheel,
    center: Point,
    base_bound: u64,
    surface: &mut S,
) -> Step {
    wheel.frames += 1;
    if wheel.frames < wheel.config.speed {
        return Step::Throttled;
    }
    wheel.frames = 0;

    let candidate = wheel.last_prime;
    let drawn = is_prime(candidate);
    if drawn {
        surface.fill_text(&Glyph {
            text: candidate.to_string(),
            position: wheel.plot_point(center, candidate),
            color: wheel.config.color,
            font_size_px: wheel.font_size_px,
            font_family: wheel.config.font_family.clone(),
        });
    }

    wheel.last_prime += 1;
    if wheel.last_prime as f64 > wheel.max_candidate(base_bound) {
        wheel.done = true;
    }
    Step::Tested { drawn }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scheduler.rs"]
mod tests;
