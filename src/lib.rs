//! Sort/unsort cycle engine.
//!
//! A grid of greyscale cells starts sorted, is locally diffused until its
//! inversion ratio reaches a target, then re-sorted one animated swap at a
//! time by a bubble or selection stepper, forever.
//!
//! The [`CycleScheduler`] owns the grid and every timer; a host drives it by
//! calling [`CycleScheduler::poll_timers`] and [`CycleScheduler::on_frame`]
//! once per frame and handing landed animations back through
//! [`CycleScheduler::complete_motion`].

pub mod config;
pub mod motion;
pub mod schedule;
pub mod simulation;
pub mod sorting;

pub use config::{CycleConfig, DiffusionConfig};
pub use motion::{MotionRequest, MotionTicket, TransformDriver, Tweener};
pub use schedule::{Clock, CycleScheduler, ManualClock, Phase, SystemClock};
pub use simulation::{Cell, CellId, Grid, Position};
pub use sorting::{Algorithm, DiffusionOutcome, DiffusionReason};
