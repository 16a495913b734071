//! Randomized local diffusion ("unsort").
//!
//! Repeatedly swaps values between nearby slots until the exact inversion
//! ratio reaches the target or the time budget runs out. Cells keep their
//! slot identity and position; only values move.
//!
//! A [`DiffusionRun`] is driven by its host: the host calls
//! [`DiffusionRun::tick`] from a repeating timer and the run returns its
//! [`DiffusionOutcome`] exactly once.

use std::fmt;

use rand::Rng;

use crate::config::{DiffusionConfig, DiffusionPlan, NEIGHBOR_RETRIES};
use crate::simulation::Grid;
use crate::sorting::inversion::{inversion_ratio_with, InversionScratch};

/// Why a diffusion run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffusionReason {
    /// The inversion ratio reached the target.
    Target,
    /// The time budget was exhausted first.
    Timeout,
    /// Nothing to do: the grid has fewer than two cells.
    Noop,
}

impl fmt::Display for DiffusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiffusionReason::Target => "target",
            DiffusionReason::Timeout => "timeout",
            DiffusionReason::Noop => "noop",
        })
    }
}

/// Completion record of one diffusion run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffusionOutcome {
    pub ratio: f64,
    pub reason: DiffusionReason,
    pub elapsed_ms: f64,
    pub max_ms: f64,
}

/// Result of [`DiffusionRun::start`].
#[derive(Debug)]
pub enum DiffusionStart {
    /// The run needs ticks; schedule them every `tick_ms`.
    Running(DiffusionRun),
    /// The run completed without scheduling anything.
    Done(DiffusionOutcome),
}

/// State of one in-flight diffusion run.
#[derive(Debug)]
pub struct DiffusionRun {
    plan: DiffusionPlan,
    token: u64,
    started_ms: f64,
    last_tick_ms: f64,
    last_check_ms: f64,
    finished: bool,
    swaps: u64,
}

impl DiffusionRun {
    /// Begin a run over `grid` at time `now_ms`.
    ///
    /// `token` is the generation captured by the caller; ticks presenting a
    /// different token are ignored.
    pub fn start(grid: &Grid, config: &DiffusionConfig, token: u64, now_ms: f64) -> DiffusionStart {
        let plan = config.resolve(grid.len());
        if grid.len() < 2 {
            return DiffusionStart::Done(DiffusionOutcome {
                ratio: 0.0,
                reason: DiffusionReason::Noop,
                elapsed_ms: 0.0,
                max_ms: plan.max_ms,
            });
        }

        DiffusionStart::Running(Self {
            plan,
            token,
            started_ms: now_ms,
            last_tick_ms: now_ms,
            last_check_ms: now_ms,
            finished: false,
            swaps: 0,
        })
    }

    pub fn plan(&self) -> &DiffusionPlan {
        &self.plan
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total value swaps performed so far.
    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    /// Advance the run to `now_ms`.
    ///
    /// Returns the outcome on the tick that ends the run and `None` on every
    /// other call, including calls after completion and calls carrying a
    /// stale `token`.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        token: u64,
        now_ms: f64,
        rng: &mut R,
        scratch: &mut InversionScratch,
    ) -> Option<DiffusionOutcome> {
        if self.finished || token != self.token {
            return None;
        }

        let elapsed_ms = now_ms - self.started_ms;
        if elapsed_ms >= self.plan.max_ms {
            return Some(self.finish(grid, DiffusionReason::Timeout, elapsed_ms, scratch));
        }

        let steps = self.catch_up_steps(now_ms);
        self.last_tick_ms = now_ms;
        for _ in 0..steps {
            self.swap_batch(grid, rng);
        }

        if now_ms - self.last_check_ms >= self.plan.check_every_ms {
            self.last_check_ms = now_ms;
            let ratio = inversion_ratio_with(grid.cells.iter().map(|c| c.value), scratch);
            if ratio >= self.plan.target_ratio {
                self.finished = true;
                return Some(DiffusionOutcome {
                    ratio,
                    reason: DiffusionReason::Target,
                    elapsed_ms,
                    max_ms: self.plan.max_ms,
                });
            }
        }

        None
    }

    /// Logical ticks elapsed since the previous callback, floored, at least
    /// one, at most `max_catch_up_steps`.
    fn catch_up_steps(&self, now_ms: f64) -> u32 {
        let behind = ((now_ms - self.last_tick_ms) / self.plan.tick_ms).floor();
        if behind.is_finite() && behind > 1.0 {
            (behind as u32).min(self.plan.max_catch_up_steps)
        } else {
            1
        }
    }

    fn swap_batch<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        let len = grid.len();
        for _ in 0..self.plan.swaps_per_tick {
            let i = rng.gen_range(0..len);
            if let Some(j) = pick_neighbor(grid, i, self.plan.radius, rng) {
                grid.swap_values(i, j);
                self.swaps += 1;
            }
        }
    }

    fn finish(
        &mut self,
        grid: &Grid,
        reason: DiffusionReason,
        elapsed_ms: f64,
        scratch: &mut InversionScratch,
    ) -> DiffusionOutcome {
        self.finished = true;
        DiffusionOutcome {
            ratio: inversion_ratio_with(grid.cells.iter().map(|c| c.value), scratch),
            reason,
            elapsed_ms,
            max_ms: self.plan.max_ms,
        }
    }
}

/// Pick a slot near `index`, or `None` when the grid has no other slot.
///
/// Rectangular grids use row/column adjacency: one of the four axis
/// neighbors at radius 1, a square window of `radius` otherwise. Random
/// draws are retried up to [`NEIGHBOR_RETRIES`] times before falling back to
/// the first in-bounds axis neighbor (right, left, down, up). Other grids
/// use a 1D offset in `[-radius, radius] \ {0}`.
pub fn pick_neighbor<R: Rng + ?Sized>(
    grid: &Grid,
    index: usize,
    radius: u32,
    rng: &mut R,
) -> Option<usize> {
    let len = grid.len();
    if len < 2 || index >= len {
        return None;
    }
    let radius = radius.max(1) as i64;

    if grid.is_rectangular() {
        let cols = grid.cols() as i64;
        let rows = (len / grid.cols()) as i64;
        let (row, col) = grid.coords(index);
        let (row, col) = (row as i64, col as i64);
        let in_bounds = |r: i64, c: i64| r >= 0 && r < rows && c >= 0 && c < cols;

        for _ in 0..NEIGHBOR_RETRIES {
            let (dr, dc) = if radius == 1 {
                [(0, 1), (0, -1), (1, 0), (-1, 0)][rng.gen_range(0..4)]
            } else {
                (rng.gen_range(-radius..=radius), rng.gen_range(-radius..=radius))
            };
            if (dr, dc) != (0, 0) && in_bounds(row + dr, col + dc) {
                return Some(((row + dr) * cols + col + dc) as usize);
            }
        }

        return [(0, 1), (0, -1), (1, 0), (-1, 0)]
            .into_iter()
            .find(|&(dr, dc)| in_bounds(row + dr, col + dc))
            .map(|(dr, dc)| ((row + dr) * cols + col + dc) as usize);
    }

    let index = index as i64;
    let len = len as i64;
    let magnitude = rng.gen_range(1..=radius);
    let offset = if rng.gen::<bool>() { magnitude } else { -magnitude };
    [index + offset, index - offset, index + 1, index - 1]
        .into_iter()
        .find(|&j| j >= 0 && j < len)
        .map(|j| j as usize)
}
