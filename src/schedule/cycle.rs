//! The sort/unsort cycle.
//!
//! `Idle -> Paused -> Diffusing -> Sorting -> Paused -> ...`, forever.
//!
//! [`CycleScheduler`] is the single owner of the grid, the cycle state and
//! every pending timer. Steppers and the diffusion engine only compute; all
//! mutation goes through the scheduler's transition methods. Every timer
//! event and motion ticket carries the generation it was issued under and is
//! dropped when that generation has been superseded.

use std::fmt;

use rand::Rng;

use crate::config::{sanitize_speed, CycleConfig};
use crate::motion::{JoinSlot, MotionRequest, MotionTicket, SwapJoin, TransformDriver};
use crate::schedule::clock::Clock;
use crate::schedule::timers::{TimerHandle, TimerQueue};
use crate::simulation::Grid;
use crate::sorting::{
    inversion_ratio_with, Algorithm, DiffusionOutcome, DiffusionReason, DiffusionRun,
    DiffusionStart, InversionScratch, SortStats, SortStepper, StepPlan, StepperCursor,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No grid yet.
    Idle,
    /// Waiting for the pause timer.
    Paused,
    /// Diffusion interval running.
    Diffusing,
    /// Stepper driven by frames.
    Sorting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Paused => "paused",
            Phase::Diffusing => "unsorting",
            Phase::Sorting => "sorting",
        })
    }
}

/// Events delivered by the scheduler's timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    PauseElapsed { generation: u64 },
    DiffusionTick { token: u64 },
}

/// Mutable state of the cycle. Read-only outside the scheduler.
#[derive(Clone, Debug, Default)]
pub struct CycleState {
    pub cursor: StepperCursor,
    /// A swap animation is in flight.
    pub moving: bool,
    /// The stepper runs on each frame.
    pub active: bool,
    pub sort_run_id: u64,
    pub diffuse_token: u64,
    /// Bumped on every grid install; stamps pause timers.
    pub generation: u64,
    /// Stepper of the current sort run.
    pub algorithm: Algorithm,
    pub stats: SortStats,
    pub sort_started_ms: Option<f64>,
    pub sort_ended_ms: Option<f64>,
}

pub struct CycleScheduler<C, R> {
    config: CycleConfig,
    clock: C,
    rng: R,
    grid: Option<Grid>,
    phase: Phase,
    state: CycleState,
    timers: TimerQueue<TimerEvent>,
    pause_timer: Option<TimerHandle>,
    diffusion_timer: Option<TimerHandle>,
    diffusion: Option<DiffusionRun>,
    pending_swap: Option<SwapJoin>,
    next_swap: u64,
    scratch: InversionScratch,
    last_diffusion: Option<DiffusionOutcome>,
    cycles_completed: u64,
}

impl<C: Clock, R: Rng> CycleScheduler<C, R> {
    pub fn new(config: CycleConfig, clock: C, rng: R) -> Self {
        let config = config.sanitized();
        let state = CycleState {
            algorithm: config.algorithm,
            ..Default::default()
        };
        Self {
            config,
            clock,
            rng,
            grid: None,
            phase: Phase::Idle,
            state,
            timers: TimerQueue::new(),
            pause_timer: None,
            diffusion_timer: None,
            diffusion: None,
            pending_swap: None,
            next_swap: 0,
            scratch: InversionScratch::default(),
            last_diffusion: None,
            cycles_completed: 0,
        }
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn pending_swap(&self) -> Option<&SwapJoin> {
        self.pending_swap.as_ref()
    }

    pub fn last_diffusion(&self) -> Option<&DiffusionOutcome> {
        self.last_diffusion.as_ref()
    }

    /// Number of sort runs that reached their stop condition.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_timer_due(&self) -> Option<f64> {
        self.timers.next_due()
    }

    /// Exact inversion ratio of the grid right now.
    pub fn current_ratio(&mut self) -> f64 {
        match &self.grid {
            Some(grid) => {
                inversion_ratio_with(grid.cells.iter().map(|c| c.value), &mut self.scratch)
            }
            None => 0.0,
        }
    }

    /// Select the stepper for the next sort run.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if self.config.algorithm != algorithm {
            log::info!("Algorithm set to {} (applies from the next sort)", algorithm);
            self.config.algorithm = algorithm;
        }
    }

    /// Change the swap animation rate; applies from the next swap.
    pub fn set_speed(&mut self, speed: f32) {
        self.config.speed = sanitize_speed(speed);
    }

    /// Build a fresh grid and start the cycle with a pause.
    pub fn build_grid(&mut self, cols: u32, rows: u32) {
        self.config.cols = cols.max(1);
        self.config.rows = rows.max(1);
        let grid = Grid::new(
            self.config.cols,
            self.config.rows,
            self.config.cell_scale,
            &mut self.rng,
        );
        self.install_grid(grid);
    }

    /// Replace the grid and restart the cycle with a pause. Everything
    /// scheduled for the previous grid is cancelled or invalidated.
    pub fn install_grid(&mut self, grid: Grid) {
        self.reset_session();
        log::info!(
            "Grid built: {} cells ({} columns)",
            grid.len(),
            grid.cols()
        );
        self.grid = Some(grid);
        self.schedule_pause();
    }

    /// Skip the remaining pause and start unsorting now.
    pub fn unsort_now(&mut self) {
        if self.phase == Phase::Paused {
            self.begin_diffusion();
        }
    }

    /// Fire every timer due at the current time. Returns how many fired,
    /// stale ones included.
    pub fn poll_timers(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut fired = 0;
        while let Some((handle, event)) = self.timers.pop_due(now) {
            fired += 1;
            match event {
                TimerEvent::PauseElapsed { generation } => self.on_pause_elapsed(handle, generation),
                TimerEvent::DiffusionTick { token } => self.on_diffusion_tick(token, now),
            }
        }
        fired
    }

    /// Per-frame entry point: runs one stepper step while sorting and no
    /// swap is in flight.
    pub fn on_frame<D: TransformDriver + ?Sized>(&mut self, driver: &mut D) {
        if !self.state.active || self.state.moving {
            return;
        }
        let Some(grid) = self.grid.as_ref() else {
            return;
        };

        let plan = self
            .state
            .algorithm
            .plan(grid, &self.state.cursor, &mut self.state.stats.comparisons);
        match plan {
            StepPlan::Advance => self.state.cursor.index += 1,
            StepPlan::Swap { a, b } => self.start_swap(a, b, driver),
            StepPlan::NewPass => {
                self.state.stats.passes += 1;
                self.state.cursor.reset();
            }
            StepPlan::Finished => {
                self.state.stats.passes += 1;
                self.finish_sort();
            }
        }
    }

    /// Report that one swap animation landed.
    pub fn complete_motion(&mut self, ticket: MotionTicket) {
        let both_done = match self.pending_swap.as_mut() {
            Some(join) if join.owns(&ticket) => {
                join.mark(ticket.slot);
                join.both_done()
            }
            _ => {
                log::trace!("Dropping stale motion ticket {:?}", ticket);
                return;
            }
        };

        if both_done {
            if let Some(join) = self.pending_swap.take() {
                self.commit_swap(join);
            }
        }
    }

    // ── transitions ────────────────────────────────────────────────

    fn reset_session(&mut self) {
        self.cancel_pause();
        self.cancel_diffusion();
        self.pending_swap = None;

        self.state.generation += 1;
        self.state.sort_run_id += 1;
        self.state.diffuse_token += 1;
        self.state.cursor.reset();
        self.state.active = false;
        self.state.moving = false;
        self.phase = Phase::Idle;
    }

    fn schedule_pause(&mut self) {
        self.cancel_pause();
        let event = TimerEvent::PauseElapsed {
            generation: self.state.generation,
        };
        let now = self.clock.now_ms();
        self.pause_timer = Some(self.timers.set_timeout(now, self.config.unsort_pause_ms, event));
        self.phase = Phase::Paused;
        log::debug!("Unsort scheduled in {} ms", self.config.unsort_pause_ms);
    }

    fn on_pause_elapsed(&mut self, handle: TimerHandle, generation: u64) {
        if generation != self.state.generation || self.pause_timer != Some(handle) {
            log::trace!("Dropping stale pause timer (generation {})", generation);
            return;
        }
        self.pause_timer = None;
        self.begin_diffusion();
    }

    fn begin_diffusion(&mut self) {
        self.cancel_pause();
        self.cancel_diffusion();
        self.state.diffuse_token += 1;
        let token = self.state.diffuse_token;

        let Some(grid) = self.grid.as_ref() else {
            self.phase = Phase::Idle;
            return;
        };

        let now = self.clock.now_ms();
        match DiffusionRun::start(grid, &self.config.diffusion, token, now) {
            DiffusionStart::Running(run) => {
                log::debug!(
                    "Unsort started: target {:.2}, budget {:.0} ms, {} swaps/tick",
                    run.plan().target_ratio,
                    run.plan().max_ms,
                    run.plan().swaps_per_tick
                );
                let tick_ms = run.plan().tick_ms;
                let event = TimerEvent::DiffusionTick { token };
                self.diffusion_timer = Some(self.timers.set_interval(now, tick_ms, event));
                self.diffusion = Some(run);
                self.phase = Phase::Diffusing;
            }
            DiffusionStart::Done(outcome) => self.finish_diffusion(outcome),
        }
    }

    fn on_diffusion_tick(&mut self, token: u64, now: f64) {
        if token != self.state.diffuse_token {
            log::trace!("Dropping stale diffusion tick (token {})", token);
            return;
        }
        let (Some(run), Some(grid)) = (self.diffusion.as_mut(), self.grid.as_mut()) else {
            return;
        };

        if let Some(outcome) = run.tick(grid, token, now, &mut self.rng, &mut self.scratch) {
            self.cancel_diffusion();
            self.finish_diffusion(outcome);
        }
    }

    fn finish_diffusion(&mut self, outcome: DiffusionOutcome) {
        match outcome.reason {
            DiffusionReason::Timeout => log::info!(
                "Unsort timed out after {:.0} ms (budget {:.0} ms) at ratio {:.3}",
                outcome.elapsed_ms,
                outcome.max_ms,
                outcome.ratio
            ),
            DiffusionReason::Target => log::info!(
                "Unsort reached ratio {:.3} in {:.0} ms",
                outcome.ratio,
                outcome.elapsed_ms
            ),
            DiffusionReason::Noop => log::debug!("Unsort skipped: grid too small"),
        }
        self.last_diffusion = Some(outcome);
        self.begin_sort();
    }

    fn begin_sort(&mut self) {
        self.state.cursor.reset();
        self.state.moving = false;
        self.state.active = true;
        self.state.sort_run_id += 1;
        self.state.algorithm = self.config.algorithm;
        self.state.stats = SortStats::default();
        self.state.sort_started_ms = Some(self.clock.now_ms());
        self.state.sort_ended_ms = None;
        self.pending_swap = None;
        self.next_swap = 0;
        self.phase = Phase::Sorting;
        log::info!(
            "Sort started: {} (run {})",
            self.state.algorithm,
            self.state.sort_run_id
        );
    }

    fn start_swap<D: TransformDriver + ?Sized>(&mut self, a: usize, b: usize, driver: &mut D) {
        let Some(grid) = self.grid.as_ref() else {
            return;
        };
        let (cell_a, cell_b) = (grid.cells[a], grid.cells[b]);

        self.state.cursor.pass_had_swap = true;
        self.state.moving = true;
        self.state.stats.swaps += 1;

        let join = SwapJoin::new(a, b, self.state.sort_run_id, self.next_swap);
        self.next_swap += 1;
        self.pending_swap = Some(join);

        let duration_secs = self.config.swap_duration_secs();
        driver.animate(MotionRequest {
            cell: cell_a.id,
            from: cell_a.position,
            to: cell_b.position,
            duration_secs,
            ticket: join.ticket(JoinSlot::First),
        });
        driver.animate(MotionRequest {
            cell: cell_b.id,
            from: cell_b.position,
            to: cell_a.position,
            duration_secs,
            ticket: join.ticket(JoinSlot::Second),
        });
    }

    /// Both animations landed: the cells now rest at each other's former
    /// positions, so exchanging slots keeps every slot's position fixed.
    fn commit_swap(&mut self, join: SwapJoin) {
        if let Some(grid) = self.grid.as_mut() {
            let position_a = grid.cells[join.a].position;
            grid.cells[join.a].position = grid.cells[join.b].position;
            grid.cells[join.b].position = position_a;
            grid.swap_slots(join.a, join.b);
        }
        self.state.cursor.index += 1;
        self.state.moving = false;
    }

    fn finish_sort(&mut self) {
        let now = self.clock.now_ms();
        let elapsed_ms = self.state.sort_started_ms.map_or(0.0, |started| now - started);
        self.state.active = false;
        self.state.cursor.reset();
        self.state.sort_ended_ms = Some(now);
        self.cycles_completed += 1;
        let stats = self.state.stats;
        log::info!(
            "Sort stopped: {} run {} in {:.0} ms ({} comparisons, {} swaps, {} passes)",
            self.state.algorithm,
            self.state.sort_run_id,
            elapsed_ms,
            stats.comparisons,
            stats.swaps,
            stats.passes
        );
        self.schedule_pause();
    }

    fn cancel_pause(&mut self) {
        if let Some(handle) = self.pause_timer.take() {
            self.timers.clear(handle);
        }
    }

    fn cancel_diffusion(&mut self) {
        if let Some(handle) = self.diffusion_timer.take() {
            self.timers.clear(handle);
        }
        self.diffusion = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiffusionConfig, UNSORT_PAUSE_MS};
    use crate::schedule::clock::ManualClock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Default)]
    struct RecordingDriver {
        requests: Vec<MotionRequest>,
    }

    impl TransformDriver for RecordingDriver {
        fn animate(&mut self, request: MotionRequest) {
            self.requests.push(request);
        }
    }

    fn new_scheduler(config: CycleConfig) -> (CycleScheduler<ManualClock, ChaCha8Rng>, ManualClock) {
        let clock = ManualClock::new(0.0);
        let scheduler = CycleScheduler::new(config, clock.clone(), ChaCha8Rng::seed_from_u64(42));
        (scheduler, clock)
    }

    fn with_values(
        values: &[u8],
        algorithm: Algorithm,
    ) -> (CycleScheduler<ManualClock, ChaCha8Rng>, ManualClock) {
        let config = CycleConfig {
            algorithm,
            ..Default::default()
        };
        let (mut scheduler, clock) = new_scheduler(config);
        scheduler.install_grid(Grid::from_values(values, values.len(), [1.0; 3]));
        (scheduler, clock)
    }

    /// Drive frames, landing every requested animation before the next one.
    fn sort_to_end(scheduler: &mut CycleScheduler<ManualClock, ChaCha8Rng>) {
        let mut driver = RecordingDriver::default();
        for _ in 0..10_000 {
            if !scheduler.state().active {
                return;
            }
            scheduler.on_frame(&mut driver);
            for request in driver.requests.drain(..) {
                scheduler.complete_motion(request.ticket);
            }
        }
        panic!("sort did not finish");
    }

    #[test]
    fn test_install_schedules_pause() {
        let (scheduler, _clock) = with_values(&[1, 2, 3], Algorithm::Bubble);
        assert_eq!(scheduler.phase(), Phase::Paused);
        assert_eq!(scheduler.pending_timers(), 1);
        assert_eq!(scheduler.next_timer_due(), Some(UNSORT_PAUSE_MS));
    }

    #[test]
    fn test_bubble_sorted_grid_stops_and_pauses() {
        let (mut scheduler, clock) = with_values(&[1, 2, 3], Algorithm::Bubble);
        clock.set(500.0);
        scheduler.begin_sort();
        let mut driver = RecordingDriver::default();

        scheduler.on_frame(&mut driver);
        scheduler.on_frame(&mut driver);
        assert!(scheduler.state().active);
        assert_eq!(scheduler.state().cursor.index, 2);

        scheduler.on_frame(&mut driver);
        assert!(!scheduler.state().active);
        assert_eq!(scheduler.state().cursor.index, 0);
        assert_eq!(scheduler.state().sort_ended_ms, Some(500.0));
        assert!(driver.requests.is_empty());
        assert_eq!(scheduler.phase(), Phase::Paused);
        // The pause from install was superseded, not stacked
        assert_eq!(scheduler.pending_timers(), 1);
        assert_eq!(scheduler.next_timer_due(), Some(500.0 + UNSORT_PAUSE_MS));
    }

    #[test]
    fn test_bubble_swap_then_new_pass() {
        let (mut scheduler, _clock) = with_values(&[2, 1, 3], Algorithm::Bubble);
        scheduler.begin_sort();
        let mut driver = RecordingDriver::default();

        scheduler.on_frame(&mut driver);
        assert!(scheduler.state().moving);
        assert!(scheduler.state().cursor.pass_had_swap);
        assert_eq!(driver.requests.len(), 2);

        // Re-entrant frames while moving are no-ops
        scheduler.on_frame(&mut driver);
        assert_eq!(driver.requests.len(), 2);

        scheduler.complete_motion(driver.requests[0].ticket);
        assert!(scheduler.state().moving);
        scheduler.complete_motion(driver.requests[1].ticket);
        assert!(!scheduler.state().moving);
        assert_eq!(scheduler.grid().map(|g| g.values()), Some(vec![1, 2, 3]));
        assert_eq!(scheduler.state().cursor.index, 1);

        scheduler.on_frame(&mut driver);
        scheduler.on_frame(&mut driver);
        assert!(scheduler.state().active, "a pass with swaps must not stop the sort");
        assert_eq!(scheduler.state().cursor, StepperCursor::default());
        assert_eq!(scheduler.state().stats.passes, 1);

        sort_to_end(&mut scheduler);
        assert_eq!(scheduler.state().stats.passes, 2);
        assert_eq!(scheduler.cycles_completed(), 1);
    }

    #[test]
    fn test_swap_keeps_slot_positions() {
        let (mut scheduler, _clock) = with_values(&[9, 4], Algorithm::Bubble);
        let before: Vec<_> = scheduler.grid().unwrap().cells.iter().map(|c| c.position).collect();
        scheduler.begin_sort();
        let mut driver = RecordingDriver::default();
        scheduler.on_frame(&mut driver);

        let first = driver.requests[0];
        assert_eq!(first.from, before[0]);
        assert_eq!(first.to, before[1]);
        assert!((first.duration_secs - scheduler.config().swap_duration_secs()).abs() < 1e-6);

        let second = driver.requests[1];
        for request in driver.requests.drain(..) {
            scheduler.complete_motion(request.ticket);
        }
        let grid = scheduler.grid().unwrap();
        let after: Vec<_> = grid.cells.iter().map(|c| c.position).collect();
        assert_eq!(after, before);
        assert_eq!(grid.cells[0].id, second.cell);
        assert_eq!(grid.cells[1].id, first.cell);
        assert_eq!(grid.values(), vec![4, 9]);
    }

    #[test]
    fn test_duplicate_and_stale_tickets_are_ignored() {
        let (mut scheduler, _clock) = with_values(&[3, 2, 1], Algorithm::Bubble);
        scheduler.begin_sort();
        let mut driver = RecordingDriver::default();
        scheduler.on_frame(&mut driver);

        let first = driver.requests[0].ticket;
        scheduler.complete_motion(first);
        scheduler.complete_motion(first);
        assert!(scheduler.state().moving);

        let stale = MotionTicket {
            run_id: first.run_id - 1,
            ..driver.requests[1].ticket
        };
        scheduler.complete_motion(stale);
        assert!(scheduler.state().moving);

        scheduler.complete_motion(driver.requests[1].ticket);
        assert!(!scheduler.state().moving);
    }

    #[test]
    fn test_selection_sorts_grid() {
        let (mut scheduler, _clock) = with_values(&[50, 3, 200, 3, 99, 0, 7], Algorithm::Selection);
        scheduler.begin_sort();
        sort_to_end(&mut scheduler);
        assert!(scheduler.grid().unwrap().is_sorted());
        assert_eq!(scheduler.state().stats.passes, 1);
        assert_eq!(scheduler.phase(), Phase::Paused);
    }

    #[test]
    fn test_stale_pause_after_rebuild() {
        let (mut scheduler, clock) = with_values(&[1, 2, 3, 4], Algorithm::Bubble);
        clock.set(5_000.0);
        scheduler.install_grid(Grid::from_values(&[1, 2, 3, 4], 2, [1.0; 3]));

        clock.set(UNSORT_PAUSE_MS);
        scheduler.poll_timers();
        assert_eq!(scheduler.phase(), Phase::Paused);

        clock.set(5_000.0 + UNSORT_PAUSE_MS);
        scheduler.poll_timers();
        assert_eq!(scheduler.phase(), Phase::Diffusing);
    }

    #[test]
    fn test_rebuild_invalidates_in_flight_swap() {
        let (mut scheduler, _clock) = with_values(&[2, 1], Algorithm::Bubble);
        scheduler.begin_sort();
        let mut driver = RecordingDriver::default();
        scheduler.on_frame(&mut driver);
        assert!(scheduler.state().moving);

        scheduler.install_grid(Grid::from_values(&[2, 1], 2, [1.0; 3]));
        assert!(!scheduler.state().moving);
        for request in driver.requests.drain(..) {
            scheduler.complete_motion(request.ticket);
        }
        assert_eq!(scheduler.grid().unwrap().values(), vec![2, 1]);
    }

    #[test]
    fn test_diffusion_restart_replaces_interval() {
        let (mut scheduler, _clock) = with_values(&[1, 2, 3, 4, 5, 6], Algorithm::Bubble);
        scheduler.unsort_now();
        let first_token = scheduler.state().diffuse_token;
        scheduler.begin_diffusion();
        assert_eq!(scheduler.pending_timers(), 1);
        assert_eq!(scheduler.state().diffuse_token, first_token + 1);
        assert_eq!(scheduler.phase(), Phase::Diffusing);
    }

    #[test]
    fn test_single_cell_cycle_skips_diffusion() {
        let (mut scheduler, clock) = with_values(&[42], Algorithm::Selection);
        clock.set(UNSORT_PAUSE_MS);
        scheduler.poll_timers();
        assert_eq!(scheduler.phase(), Phase::Sorting);
        assert_eq!(
            scheduler.last_diffusion().map(|o| o.reason),
            Some(DiffusionReason::Noop)
        );

        let mut driver = RecordingDriver::default();
        scheduler.on_frame(&mut driver);
        assert_eq!(scheduler.phase(), Phase::Paused);
        assert_eq!(scheduler.next_timer_due(), Some(2.0 * UNSORT_PAUSE_MS));
    }

    #[test]
    fn test_diffusion_timeout_hands_off_to_sort() {
        let config = CycleConfig {
            unsort_pause_ms: 0.0,
            diffusion: DiffusionConfig {
                target_ratio: 1.0,
                max_ms: Some(200.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let (mut scheduler, clock) = new_scheduler(config);
        scheduler.install_grid(Grid::from_values(&[5; 8], 4, [1.0; 3]));
        scheduler.poll_timers();
        assert_eq!(scheduler.phase(), Phase::Diffusing);

        while scheduler.phase() == Phase::Diffusing {
            clock.advance(16.0);
            scheduler.poll_timers();
        }
        let outcome = scheduler.last_diffusion().copied().unwrap();
        assert_eq!(outcome.reason, DiffusionReason::Timeout);
        assert!(outcome.elapsed_ms >= 200.0);
        assert!(scheduler.state().active);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn test_algorithm_change_applies_next_run() {
        let (mut scheduler, _clock) = with_values(&[3, 1, 2], Algorithm::Bubble);
        scheduler.begin_sort();
        scheduler.set_algorithm(Algorithm::Selection);
        assert_eq!(scheduler.state().algorithm, Algorithm::Bubble);
        sort_to_end(&mut scheduler);
        scheduler.begin_sort();
        assert_eq!(scheduler.state().algorithm, Algorithm::Selection);
    }
}
