use chrono::NaiveDate;

use goal_tracker::core::GoalIcon;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Goal card
    SelectGoal(String),
    ToggleDay(String, NaiveDate),
    IncrementVideos(String),
    DecrementVideos(String),
    DeleteGoal(String),

    // Add / edit form
    OpenNewGoalForm,
    OpenEditGoalForm(String),
    FormNameChanged(String),
    FormIconChanged(GoalIcon),
    SubmitForm,
    CancelForm,
}
