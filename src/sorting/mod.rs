pub mod diffusion;
pub mod inversion;
pub mod stepper;

pub use diffusion::{DiffusionOutcome, DiffusionReason, DiffusionRun, DiffusionStart};
pub use inversion::{inversion_ratio, inversion_ratio_with, InversionScratch};
pub use stepper::{
    Algorithm, BubbleStepper, SelectionStepper, SortStats, SortStepper, StepPlan, StepperCursor,
};
