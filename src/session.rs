//! Work/break session loop
//!
//! Fixed-rate redraw: sample the clock, render, poll a key, sleep, repeat.
//! Elapsed time is always measured from the phase start, so dropped frames
//! never skew the countdown.

use crate::animator;
use crate::config::{Phase, TimerConfig};
use crate::scene::Scene;
use crate::surface::RenderSurface;
use crossterm::event::{KeyCode, KeyModifiers};
use rand::Rng;
use std::io;
use std::time::{Duration, Instant};

/// Delay between redraws
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Time source for the loop
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Real monotonic clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, PartialEq)]
enum PhaseEnd {
    Elapsed,
    Quit,
}

pub struct Session<S, C, R> {
    surface: S,
    clock: C,
    rng: R,
    config: TimerConfig,
    scene: Scene,
}

impl<S: RenderSurface, C: Clock, R: Rng> Session<S, C, R> {
    pub fn new(surface: S, clock: C, rng: R, config: TimerConfig) -> Self {
        Self {
            surface,
            clock,
            rng,
            config,
            scene: Scene::default(),
        }
    }

    /// Alternate work and break until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        let mut phase = Phase::Work;

        loop {
            if phase == Phase::Work {
                self.regenerate()?;
            }

            if self.run_phase(phase)? == PhaseEnd::Quit {
                tracing::info!(phase = phase.label(), "quit requested");
                return Ok(());
            }

            self.surface.flash()?;
            phase = phase.next();
            tracing::info!(phase = phase.label(), "phase started");
        }
    }

    /// Replace the scene with a fresh tree sized to the current screen
    fn regenerate(&mut self) -> io::Result<()> {
        let (cols, rows) = self.surface.size()?;
        self.scene = Scene::generate(rows as i32, cols as i32, &mut self.rng);
        tracing::debug!(
            rows,
            cols,
            base = self.scene.base_end(),
            tree = self.scene.tree_len(),
            "scene generated"
        );
        Ok(())
    }

    fn run_phase(&mut self, phase: Phase) -> io::Result<PhaseEnd> {
        let start = self.clock.now();
        let total = self.config.duration_secs(phase);

        loop {
            let elapsed = self.clock.now().saturating_duration_since(start).as_secs();
            // remaining = total - elapsed has gone negative
            if elapsed > total {
                return Ok(PhaseEnd::Elapsed);
            }

            self.surface.erase();
            animator::render(
                &mut self.surface,
                &self.scene,
                elapsed,
                total,
                phase.label(),
                phase.growing(),
            )?;
            self.surface.refresh()?;

            if let Some((code, modifiers)) = self.surface.poll_key()? {
                if is_quit_key(code, modifiers) {
                    return Ok(PhaseEnd::Quit);
                }
            }

            self.clock.sleep(FRAME_INTERVAL);
        }
    }
}

/// `q`, Esc, or Ctrl-C (raw mode swallows SIGINT)
fn is_quit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
