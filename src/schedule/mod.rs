pub mod clock;
pub mod cycle;
pub mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cycle::{CycleScheduler, CycleState, Phase, TimerEvent};
pub use timers::{TimerHandle, TimerQueue};
