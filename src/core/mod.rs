pub mod calendar;
pub mod error;
pub mod goal;
pub mod state;

pub use error::GoalError;
pub use goal::{Goal, GoalIcon};
pub use state::GoalState;
