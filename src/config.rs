use crate::sorting::Algorithm;

/// Default grid dimensions (16x12 = 192 cells)
pub const DEFAULT_COLS: u32 = 16;
pub const DEFAULT_ROWS: u32 = 12;

/// Default spacing between cell centres, per axis
pub const DEFAULT_CELL_SCALE: [f32; 3] = [1.0, 1.0, 1.0];

/// Swap animations per second (duration of one swap = 1 / speed)
pub const DEFAULT_SPEED: f32 = 8.0;
pub const MIN_SPEED: f32 = 0.05;
pub const MAX_SPEED: f32 = 240.0;

/// Pause between a finished sort and the next unsort
pub const UNSORT_PAUSE_MS: f64 = 10_000.0;

// ============================================
// Diffusion ("unsort") Parameters
// ============================================

/// Inversion ratio at which diffusion stops
pub const TARGET_RATIO: f64 = 0.5;

/// Lower bound of the derived time budget
pub const MIN_MAX_MS: f64 = 5_000.0;

/// Time budget granted per cell when no explicit budget is set
pub const MS_PER_CUBE: f64 = 400.0;

/// Neighbor radius for local swaps
pub const NEIGHBOR_RADIUS: u32 = 1;
pub const MAX_NEIGHBOR_RADIUS: u32 = 10;

/// Interval between diffusion ticks
pub const TICK_MS: f64 = 16.0;

/// Interval between exact ratio checks
pub const CHECK_EVERY_MS: f64 = 100.0;

/// Upper bound on swaps per logical tick
pub const MAX_SWAPS_PER_TICK: usize = 2000;

/// Upper bound on logical ticks replayed after a late callback
pub const MAX_CATCH_UP_STEPS: u32 = 120;

/// Random neighbor draws before falling back to an axis neighbor
pub const NEIGHBOR_RETRIES: u32 = 8;

/// Diffusion configuration as supplied by the caller.
///
/// Every field is independently defaulted. Values are sanitized once by
/// [`DiffusionConfig::resolve`]; the running engine only ever reads the
/// resulting [`DiffusionPlan`].
#[derive(Clone, Debug, PartialEq)]
pub struct DiffusionConfig {
    /// Stop once the exact inversion ratio reaches this value, in `[0, 1]`.
    pub target_ratio: f64,
    /// Explicit time budget. `None` derives `max(min_max_ms, n * ms_per_cube)`.
    pub max_ms: Option<f64>,
    pub min_max_ms: f64,
    pub ms_per_cube: f64,
    /// Neighbor radius, clamped to `[1, MAX_NEIGHBOR_RADIUS]`.
    pub radius: u32,
    pub tick_ms: f64,
    pub check_every_ms: f64,
    /// Swaps per logical tick. `None` derives `max(1, n / 5)`.
    pub swaps_per_tick: Option<usize>,
    pub max_catch_up_steps: u32,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            target_ratio: TARGET_RATIO,
            max_ms: None,
            min_max_ms: MIN_MAX_MS,
            ms_per_cube: MS_PER_CUBE,
            radius: NEIGHBOR_RADIUS,
            tick_ms: TICK_MS,
            check_every_ms: CHECK_EVERY_MS,
            swaps_per_tick: None,
            max_catch_up_steps: MAX_CATCH_UP_STEPS,
        }
    }
}

/// Sanitized diffusion parameters for a grid of a known length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffusionPlan {
    pub target_ratio: f64,
    pub max_ms: f64,
    pub radius: u32,
    pub tick_ms: f64,
    pub check_every_ms: f64,
    pub swaps_per_tick: usize,
    pub max_catch_up_steps: u32,
}

impl DiffusionConfig {
    /// Apply defaults and clamps for a grid of `len` cells.
    ///
    /// Non-finite numbers fall back to their defaults; out-of-range numbers
    /// are clamped to the nearest valid value.
    pub fn resolve(&self, len: usize) -> DiffusionPlan {
        let target_ratio = finite_or(self.target_ratio, TARGET_RATIO).clamp(0.0, 1.0);
        let min_max_ms = finite_or(self.min_max_ms, MIN_MAX_MS).max(0.0);
        let ms_per_cube = finite_or(self.ms_per_cube, MS_PER_CUBE).max(0.0);
        let max_ms = match self.max_ms {
            Some(ms) if ms.is_finite() => ms.max(0.0),
            _ => min_max_ms.max(len as f64 * ms_per_cube),
        };
        let swaps_per_tick = self
            .swaps_per_tick
            .unwrap_or(len / 5)
            .clamp(1, MAX_SWAPS_PER_TICK);

        DiffusionPlan {
            target_ratio,
            max_ms,
            radius: self.radius.clamp(1, MAX_NEIGHBOR_RADIUS),
            tick_ms: finite_or(self.tick_ms, TICK_MS).max(1.0),
            check_every_ms: finite_or(self.check_every_ms, CHECK_EVERY_MS).max(0.0),
            swaps_per_tick,
            max_catch_up_steps: self.max_catch_up_steps.max(1),
        }
    }
}

/// Full cycle configuration: grid shape, sort animation and diffusion.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleConfig {
    pub algorithm: Algorithm,
    pub cols: u32,
    pub rows: u32,
    /// Inverse of the per-swap animation duration, in swaps per second.
    pub speed: f32,
    pub unsort_pause_ms: f64,
    /// Spacing between cell centres along x, y, z.
    pub cell_scale: [f32; 3],
    pub diffusion: DiffusionConfig,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            speed: DEFAULT_SPEED,
            unsort_pause_ms: UNSORT_PAUSE_MS,
            cell_scale: DEFAULT_CELL_SCALE,
            diffusion: DiffusionConfig::default(),
        }
    }
}

impl CycleConfig {
    /// Clamp every numeric field into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.cols = self.cols.max(1);
        self.rows = self.rows.max(1);
        self.speed = sanitize_speed(self.speed);
        self.unsort_pause_ms = finite_or(self.unsort_pause_ms, UNSORT_PAUSE_MS).max(0.0);
        for (axis, default) in self.cell_scale.iter_mut().zip(DEFAULT_CELL_SCALE) {
            if !axis.is_finite() || *axis <= 0.0 {
                *axis = default;
            }
        }
        self
    }

    /// Duration of a single swap animation, in seconds.
    pub fn swap_duration_secs(&self) -> f32 {
        1.0 / sanitize_speed(self.speed)
    }
}

pub fn sanitize_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        DEFAULT_SPEED
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_budget_uses_floor() {
        let plan = DiffusionConfig::default().resolve(4);
        assert_eq!(plan.max_ms, MIN_MAX_MS);
    }

    #[test]
    fn test_derived_budget_scales_with_cells() {
        let plan = DiffusionConfig::default().resolve(24);
        assert_eq!(plan.max_ms, 24.0 * MS_PER_CUBE);
        assert_eq!(plan.swaps_per_tick, 4);
    }

    #[test]
    fn test_swaps_per_tick_bounds() {
        assert_eq!(DiffusionConfig::default().resolve(3).swaps_per_tick, 1);
        assert_eq!(
            DiffusionConfig::default().resolve(1_000_000).swaps_per_tick,
            MAX_SWAPS_PER_TICK
        );
        let explicit = DiffusionConfig {
            swaps_per_tick: Some(0),
            ..Default::default()
        };
        assert_eq!(explicit.resolve(100).swaps_per_tick, 1);
    }

    #[test]
    fn test_invalid_values_are_clamped() {
        let config = DiffusionConfig {
            target_ratio: f64::NAN,
            max_ms: Some(f64::INFINITY),
            radius: 50,
            tick_ms: -3.0,
            ..Default::default()
        };
        let plan = config.resolve(10);
        assert_eq!(plan.target_ratio, TARGET_RATIO);
        assert_eq!(plan.max_ms, MIN_MAX_MS);
        assert_eq!(plan.radius, MAX_NEIGHBOR_RADIUS);
        assert_eq!(plan.tick_ms, 1.0);

        let over = DiffusionConfig {
            target_ratio: 3.0,
            radius: 0,
            ..Default::default()
        };
        let plan = over.resolve(10);
        assert_eq!(plan.target_ratio, 1.0);
        assert_eq!(plan.radius, 1);
    }

    #[test]
    fn test_cycle_config_sanitized() {
        let config = CycleConfig {
            cols: 0,
            rows: 0,
            speed: f32::NAN,
            unsort_pause_ms: -1.0,
            cell_scale: [0.0, f32::INFINITY, 2.0],
            ..Default::default()
        }
        .sanitized();
        assert_eq!((config.cols, config.rows), (1, 1));
        assert_eq!(config.speed, DEFAULT_SPEED);
        assert_eq!(config.unsort_pause_ms, 0.0);
        assert_eq!(config.cell_scale, [1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_swap_duration_is_inverse_speed() {
        let config = CycleConfig {
            speed: 4.0,
            ..Default::default()
        };
        assert!((config.swap_duration_secs() - 0.25).abs() < f32::EPSILON);
    }
}
