//! Sorting algorithms expressed as one-step state machines.
//!
//! A stepper never mutates the grid or its cursor. Each call inspects the
//! current slot values and the cursor, and returns a [`StepPlan`] that the
//! cycle scheduler applies (advancing the cursor, starting a swap animation,
//! or ending the sort run). Comparisons are strict, so equal values are
//! never swapped.

use std::fmt;

use crate::simulation::Grid;

/// Algorithm-specific cursor owned by the cycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepperCursor {
    pub index: usize,
    /// Bubble only: a swap happened during the current pass.
    pub pass_had_swap: bool,
}

impl StepperCursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What the scheduler should do for this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPlan {
    /// Slots are in order; move the cursor forward without animating.
    Advance,
    /// Animate the two slots into each other's positions, then exchange
    /// them and advance the cursor.
    Swap { a: usize, b: usize },
    /// Bubble only: the pass ended with swaps; start over at slot 0.
    NewPass,
    /// The grid is sorted; end the sort run.
    Finished,
}

/// Running totals for one sort run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    pub comparisons: u64,
    pub swaps: u64,
    pub passes: u64,
}

/// An incremental comparison sort.
pub trait SortStepper {
    fn name(&self) -> &'static str;

    /// Plan the next step from `cursor`. `comparisons` receives the number of
    /// value comparisons the plan needed.
    fn plan(&self, grid: &Grid, cursor: &StepperCursor, comparisons: &mut u64) -> StepPlan;
}

/// Adjacent-pair bubble sort; repeats passes until one pass makes no swap.
#[derive(Clone, Copy, Debug, Default)]
pub struct BubbleStepper;

impl SortStepper for BubbleStepper {
    fn name(&self) -> &'static str {
        "bubble"
    }

    fn plan(&self, grid: &Grid, cursor: &StepperCursor, comparisons: &mut u64) -> StepPlan {
        let i = cursor.index;
        if i + 1 >= grid.len() {
            return if cursor.pass_had_swap {
                StepPlan::NewPass
            } else {
                StepPlan::Finished
            };
        }

        *comparisons += 1;
        if grid.value(i) > grid.value(i + 1) {
            StepPlan::Swap { a: i, b: i + 1 }
        } else {
            StepPlan::Advance
        }
    }
}

/// Selection sort; a single pass places the minimum of the unsorted suffix
/// at the cursor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionStepper;

impl SortStepper for SelectionStepper {
    fn name(&self) -> &'static str {
        "selection"
    }

    fn plan(&self, grid: &Grid, cursor: &StepperCursor, comparisons: &mut u64) -> StepPlan {
        let i = cursor.index;
        if i + 1 >= grid.len() {
            return StepPlan::Finished;
        }

        let mut min_index = i + 1;
        for j in i + 2..grid.len() {
            *comparisons += 1;
            if grid.value(j) < grid.value(min_index) {
                min_index = j;
            }
        }

        *comparisons += 1;
        if grid.value(i) > grid.value(min_index) {
            StepPlan::Swap { a: i, b: min_index }
        } else {
            StepPlan::Advance
        }
    }
}

/// Selector for the active stepper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
}

impl Algorithm {
    pub fn stepper(self) -> &'static dyn SortStepper {
        match self {
            Algorithm::Bubble => &BubbleStepper,
            Algorithm::Selection => &SelectionStepper,
        }
    }

    /// Parse `"bubble"` or `"selection"` (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bubble" => Some(Algorithm::Bubble),
            "selection" => Some(Algorithm::Selection),
            _ => None,
        }
    }
}

impl SortStepper for Algorithm {
    fn name(&self) -> &'static str {
        self.stepper().name()
    }

    fn plan(&self, grid: &Grid, cursor: &StepperCursor, comparisons: &mut u64) -> StepPlan {
        self.stepper().plan(grid, cursor, comparisons)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(values: &[u8]) -> Grid {
        Grid::from_values(values, values.len(), [1.0; 3])
    }

    /// Apply plans synchronously, as if every swap animation completed
    /// instantly.
    fn run_to_end(algorithm: Algorithm, grid: &mut Grid) -> SortStats {
        let mut cursor = StepperCursor::default();
        let mut stats = SortStats::default();
        loop {
            match algorithm.plan(grid, &cursor, &mut stats.comparisons) {
                StepPlan::Advance => cursor.index += 1,
                StepPlan::Swap { a, b } => {
                    cursor.pass_had_swap = true;
                    grid.swap_slots(a, b);
                    stats.swaps += 1;
                    cursor.index += 1;
                }
                StepPlan::NewPass => {
                    stats.passes += 1;
                    cursor.reset();
                }
                StepPlan::Finished => {
                    stats.passes += 1;
                    return stats;
                }
            }
        }
    }

    #[test]
    fn test_bubble_sorted_finishes_after_one_pass() {
        let g = grid(&[1, 2, 3]);
        let mut cursor = StepperCursor::default();
        let mut comparisons = 0;
        assert_eq!(BubbleStepper.plan(&g, &cursor, &mut comparisons), StepPlan::Advance);
        cursor.index = 1;
        assert_eq!(BubbleStepper.plan(&g, &cursor, &mut comparisons), StepPlan::Advance);
        cursor.index = 2;
        assert_eq!(BubbleStepper.plan(&g, &cursor, &mut comparisons), StepPlan::Finished);
        assert_eq!(comparisons, 2);
    }

    #[test]
    fn test_bubble_pass_with_swap_restarts() {
        let g = grid(&[2, 1]);
        let cursor = StepperCursor {
            index: 0,
            pass_had_swap: false,
        };
        let mut comparisons = 0;
        assert_eq!(
            BubbleStepper.plan(&g, &cursor, &mut comparisons),
            StepPlan::Swap { a: 0, b: 1 }
        );
        let end_of_pass = StepperCursor {
            index: 1,
            pass_had_swap: true,
        };
        assert_eq!(BubbleStepper.plan(&g, &end_of_pass, &mut comparisons), StepPlan::NewPass);
    }

    #[test]
    fn test_equal_values_are_not_swapped() {
        let g = grid(&[7, 7, 7]);
        let cursor = StepperCursor::default();
        let mut comparisons = 0;
        assert_eq!(BubbleStepper.plan(&g, &cursor, &mut comparisons), StepPlan::Advance);
        assert_eq!(SelectionStepper.plan(&g, &cursor, &mut comparisons), StepPlan::Advance);
    }

    #[test]
    fn test_selection_picks_first_minimum() {
        let g = grid(&[9, 4, 1, 1, 6]);
        let cursor = StepperCursor::default();
        let mut comparisons = 0;
        assert_eq!(
            SelectionStepper.plan(&g, &cursor, &mut comparisons),
            StepPlan::Swap { a: 0, b: 2 }
        );
        assert_eq!(comparisons, 4);
    }

    #[test]
    fn test_selection_finishes_at_last_but_one() {
        let g = grid(&[1, 2, 3]);
        let cursor = StepperCursor {
            index: 2,
            pass_had_swap: false,
        };
        let mut comparisons = 0;
        assert_eq!(SelectionStepper.plan(&g, &cursor, &mut comparisons), StepPlan::Finished);
    }

    #[test]
    fn test_tiny_grids_finish_immediately() {
        for algorithm in [Algorithm::Bubble, Algorithm::Selection] {
            let mut comparisons = 0;
            let cursor = StepperCursor::default();
            assert_eq!(algorithm.plan(&grid(&[]), &cursor, &mut comparisons), StepPlan::Finished);
            assert_eq!(algorithm.plan(&grid(&[3]), &cursor, &mut comparisons), StepPlan::Finished);
        }
    }

    #[test]
    fn test_both_algorithms_sort() {
        let values = [200, 3, 77, 77, 0, 255, 14, 9, 130, 3];
        for algorithm in [Algorithm::Bubble, Algorithm::Selection] {
            let mut g = grid(&values);
            run_to_end(algorithm, &mut g);
            assert!(g.is_sorted(), "{algorithm} left {:?}", g.values());
        }
    }

    #[test]
    fn test_selection_is_single_pass() {
        let mut g = grid(&[5, 4, 3, 2, 1]);
        let stats = run_to_end(Algorithm::Selection, &mut g);
        assert_eq!(stats.passes, 1);
        assert_eq!(stats.swaps, 2);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Algorithm::parse(" Selection "), Some(Algorithm::Selection));
        assert_eq!(Algorithm::parse("bubble"), Some(Algorithm::Bubble));
        assert_eq!(Algorithm::parse("quick"), None);
        assert_eq!(Algorithm::Selection.to_string(), "selection");
    }
}
