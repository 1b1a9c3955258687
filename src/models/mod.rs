pub mod operation;
pub mod plan;

pub use operation::Operation;
pub use plan::{Day, DayContent, EnduranceSession, Plan, StrengthExercise, TrainingType, Week, Weekday};
