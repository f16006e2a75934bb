//! Cosmetic upload progress. The bar is not wired to real transfer
//! progress: it climbs by random steps, holds at 90, and jumps to 100
//! when the ceiling elapses.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const PROGRESS_TICK: Duration = Duration::from_millis(500);
pub const PROGRESS_CEILING: Duration = Duration::from_secs(10);

/// Largest single step, exclusive.
const MAX_STEP: f64 = 15.0;
/// Where the value parks until completion is forced.
const HOLD_AT: f64 = 90.0;

#[derive(Debug, Default)]
pub struct ProgressSimulator {
    value: f64,
}

impl ProgressSimulator {
    pub fn new() -> Self {
        Self { value: 0.0 }
    }

    /// Advance by `step` percent (clamped to the step range), holding at 90.
    pub fn advance(&mut self, step: f64) -> u64 {
        self.value += step.clamp(0.0, MAX_STEP);
        if self.value > HOLD_AT {
            self.value = HOLD_AT;
        }
        self.value as u64
    }

    /// Jump straight to 100 once the ceiling has elapsed.
    pub fn force_complete(&mut self) -> u64 {
        self.value = 100.0;
        100
    }

    pub fn value(&self) -> u64 {
        self.value as u64
    }
}

/// Step in [0, 15) from the subsecond clock; plenty for a cosmetic bar.
fn clock_step() -> f64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    f64::from(nanos % 15_000) / 1_000.0
}

/// Bar shown while an upload is in flight.
pub fn upload_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}% {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar.set_message("Transcribing audio...");
    bar
}

/// Drive `bar` until the ceiling forces 100. Runs detached from the real
/// request and never blocks it.
pub async fn run_simulation(bar: ProgressBar, tick: Duration, ceiling: Duration) {
    let mut sim = ProgressSimulator::new();
    let started = tokio::time::Instant::now();

    loop {
        tokio::time::sleep(tick).await;
        if started.elapsed() >= ceiling {
            break;
        }
        bar.set_position(sim.advance(clock_step()));
    }

    bar.set_position(sim.force_complete());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parks_at_90_while_running() {
        let mut sim = ProgressSimulator::new();
        for _ in 0..50 {
            let value = sim.advance(14.999);
            assert!(value <= 90, "value {} escaped the hold", value);
        }
        assert_eq!(sim.value(), 90);
    }

    #[test]
    fn test_steps_accumulate_below_the_hold() {
        let mut sim = ProgressSimulator::new();
        assert_eq!(sim.advance(10.0), 10);
        assert_eq!(sim.advance(10.0), 20);
        assert_eq!(sim.advance(0.0), 20);
    }

    #[test]
    fn test_step_is_clamped_to_the_random_range() {
        let mut sim = ProgressSimulator::new();
        assert_eq!(sim.advance(500.0), 15);
        assert_eq!(sim.advance(-500.0), 15);
    }

    #[test]
    fn test_force_complete_reaches_100() {
        let mut sim = ProgressSimulator::new();
        sim.advance(14.0);
        assert_eq!(sim.force_complete(), 100);
        assert_eq!(sim.value(), 100);
    }

    #[test]
    fn test_clock_step_stays_in_range() {
        for _ in 0..100 {
            let step = clock_step();
            assert!((0.0..MAX_STEP).contains(&step), "step {} out of range", step);
        }
    }

    #[tokio::test]
    async fn test_simulation_ends_at_100() {
        let bar = ProgressBar::hidden();
        run_simulation(bar.clone(), Duration::from_millis(1), Duration::from_millis(25)).await;
        assert_eq!(bar.position(), 100);
    }
}
