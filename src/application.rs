use chrono::NaiveDate;

use goal_tracker::core::calendar::days_of_month;
use goal_tracker::core::GoalIcon;
use goal_tracker::storage::BlobStore;
use goal_tracker::store::{GoalStore, Outcome};

use crate::components::goal_card::goal_card;
use crate::components::goal_form::goal_form;
use crate::message::Message;

/// State of the add/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalForm {
    Closed,
    Adding { name: String, icon: GoalIcon },
    Editing { id: String, name: String, icon: GoalIcon },
}

impl GoalForm {
    pub fn new_goal() -> Self {
        Self::Adding {
            name: String::new(),
            icon: GoalIcon::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Feedback from the last message, shown under the goal list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Form input was rejected; the form is still open.
    Rejected(String),
    /// The change is in memory but was not written to disk.
    Unsaved(String),
}

pub struct GoalTracker<B: BlobStore> {
    store: GoalStore<B>,
    form: GoalForm,
    today: NaiveDate,
    status: Option<Status>,
}

impl<B: BlobStore> GoalTracker<B> {
    pub fn new(store: GoalStore<B>, today: NaiveDate) -> Self {
        Self {
            store,
            form: GoalForm::Closed,
            today,
            status: None,
        }
    }

    pub fn store(&self) -> &GoalStore<B> {
        &self.store
    }

    pub fn form(&self) -> &GoalForm {
        &self.form
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn month_days(&self) -> Vec<NaiveDate> {
        days_of_month(self.today)
    }

    pub fn update(&mut self, message: Message) {
        self.status = None;
        match message {
            Message::SelectGoal(id) => {
                self.store.select(&id);
            }

            Message::ToggleDay(id, day) => {
                let outcome = self.store.toggle_day(&id, day);
                self.report(outcome);
            }

            Message::IncrementVideos(id) => {
                let outcome = self.store.increment_video_count(&id);
                self.report(outcome);
            }

            Message::DecrementVideos(id) => {
                let outcome = self.store.decrement_video_count(&id);
                self.report(outcome);
            }

            Message::DeleteGoal(id) => {
                if matches!(&self.form, GoalForm::Editing { id: editing, .. } if *editing == id) {
                    self.form = GoalForm::Closed;
                }
                let outcome = self.store.delete_goal(&id);
                self.report(outcome);
            }

            Message::OpenNewGoalForm => {
                self.form = GoalForm::new_goal();
            }

            Message::OpenEditGoalForm(id) => {
                if let Some(goal) = self.store.state().get(&id) {
                    self.form = GoalForm::Editing {
                        id: goal.id.clone(),
                        name: goal.name.clone(),
                        icon: goal.icon(),
                    };
                } else {
                    log::debug!("Edit requested for unknown goal {}", id);
                }
            }

            Message::FormNameChanged(value) => match &mut self.form {
                GoalForm::Adding { name, .. } | GoalForm::Editing { name, .. } => *name = value,
                GoalForm::Closed => {}
            },

            Message::FormIconChanged(value) => match &mut self.form {
                GoalForm::Adding { icon, .. } | GoalForm::Editing { icon, .. } => *icon = value,
                GoalForm::Closed => {}
            },

            Message::SubmitForm => self.submit_form(),

            Message::CancelForm => {
                self.form = GoalForm::Closed;
            }
        }
    }

    fn submit_form(&mut self) {
        let result = match &self.form {
            GoalForm::Closed => return,
            GoalForm::Adding { name, icon } => self.store.add_goal(name, Some(*icon)),
            GoalForm::Editing { id, name, icon } => self.store.edit_goal(id, name, Some(*icon)),
        };

        match result {
            Ok(outcome) => {
                self.form = GoalForm::Closed;
                self.report(outcome);
            }
            Err(e) => {
                log::debug!("Form rejected: {}", e);
                self.status = Some(Status::Rejected(e.to_string()));
            }
        }
    }

    fn report(&mut self, outcome: Outcome) {
        if let Some(e) = outcome.save_error() {
            self.status = Some(Status::Unsaved(e.to_string()));
        }
    }

    /// Render the whole screen as text.
    pub fn view(&self) -> String {
        let mut out = String::from("Goal Tracker\nTrack your progress, achieve your dreams\n\n");

        let days = self.month_days();
        let state = self.store.state();
        if state.is_empty() {
            out.push_str("No goals yet. Add one to get started.\n");
        }
        for goal in &state.goals {
            let selected = self.store.selected() == Some(goal.id.as_str());
            out.push_str(&goal_card(goal, &days, self.today, selected));
            out.push('\n');
        }

        if self.form.is_open() {
            out.push_str(&goal_form(&self.form));
        }

        match &self.status {
            Some(Status::Rejected(reason)) => out.push_str(&format!("! {}\n", reason)),
            Some(Status::Unsaved(reason)) => {
                out.push_str(&format!("! Changes not saved: {}\n", reason))
            }
            None => {}
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goal_tracker::core::GoalState;
    use goal_tracker::storage::MemoryBlobStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn tracker() -> GoalTracker<MemoryBlobStore> {
        GoalTracker::new(GoalStore::open(MemoryBlobStore::new()), today())
    }

    fn add(app: &mut GoalTracker<MemoryBlobStore>, name: &str, icon: GoalIcon) {
        app.update(Message::OpenNewGoalForm);
        app.update(Message::FormNameChanged(name.into()));
        app.update(Message::FormIconChanged(icon));
        app.update(Message::SubmitForm);
    }

    #[test]
    fn add_through_form() {
        let mut app = tracker();
        add(&mut app, "Read books", GoalIcon::Book);
        assert_eq!(app.form(), &GoalForm::Closed);
        assert_eq!(app.status(), None);

        let goal = app.store().state().goals.last().unwrap();
        assert_eq!(goal.name, "Read books");
        assert_eq!(goal.icon(), GoalIcon::Book);

        app.update(Message::OpenNewGoalForm);
        assert_eq!(app.form(), &GoalForm::new_goal());
    }

    #[test]
    fn blank_name_keeps_form_open() {
        let mut app = tracker();
        add(&mut app, "   ", GoalIcon::Code);
        assert!(app.form().is_open());
        assert!(matches!(app.status(), Some(Status::Rejected(_))));
        assert_eq!(app.store().state(), &GoalState::initial());

        app.update(Message::FormNameChanged("Ship it".into()));
        app.update(Message::SubmitForm);
        assert!(!app.form().is_open());
        assert_eq!(app.store().state().len(), 4);
    }

    #[test]
    fn edit_prefills_and_saves() {
        let mut app = tracker();
        app.update(Message::OpenEditGoalForm("3".into()));
        assert_eq!(
            app.form(),
            &GoalForm::Editing {
                id: "3".into(),
                name: "Create Portfolio Website".into(),
                icon: GoalIcon::Briefcase,
            }
        );
        app.update(Message::FormNameChanged("Portfolio v2".into()));
        app.update(Message::SubmitForm);
        assert_eq!(app.store().state().goals[2].name, "Portfolio v2");
        assert_eq!(app.store().state().goals[2].icon(), GoalIcon::Briefcase);
    }

    #[test]
    fn edit_unknown_goal_keeps_form_closed() {
        let mut app = tracker();
        app.update(Message::OpenEditGoalForm("missing".into()));
        assert_eq!(app.form(), &GoalForm::Closed);
    }

    #[test]
    fn cancel_discards_input() {
        let mut app = tracker();
        app.update(Message::OpenNewGoalForm);
        app.update(Message::FormNameChanged("Half typed".into()));
        app.update(Message::CancelForm);
        app.update(Message::SubmitForm);
        assert_eq!(app.store().state().len(), 3);
    }

    #[test]
    fn deleting_edited_goal_closes_form() {
        let mut app = tracker();
        app.update(Message::SelectGoal("1".into()));
        app.update(Message::OpenEditGoalForm("1".into()));
        app.update(Message::DeleteGoal("1".into()));
        assert_eq!(app.form(), &GoalForm::Closed);
        assert_eq!(app.store().selected(), None);
        assert!(!app.store().state().contains("1"));
    }

    #[test]
    fn stale_ids_are_ignored() {
        let mut app = tracker();
        app.update(Message::DeleteGoal("2".into()));
        let before = app.store().state().clone();
        app.update(Message::ToggleDay("2".into(), today()));
        app.update(Message::IncrementVideos("2".into()));
        app.update(Message::DeleteGoal("2".into()));
        assert_eq!(app.store().state(), &before);
        assert_eq!(app.status(), None);
    }

    #[test]
    fn save_failures_are_reported() {
        let mut blob = MemoryBlobStore::new();
        blob.set_failing(true);
        let mut app = GoalTracker::new(GoalStore::open(blob), today());
        app.update(Message::ToggleDay("1".into(), today()));
        assert!(matches!(app.status(), Some(Status::Unsaved(_))));
        assert_eq!(app.store().state().get("1").unwrap().progress, 1);
        assert!(app.view().contains("Changes not saved"));
    }

    #[test]
    fn view_lists_goals_in_order() {
        let mut app = tracker();
        app.update(Message::ToggleDay("1".into(), today()));
        app.update(Message::SelectGoal("2".into()));
        let view = app.view();
        let channel = view.find("Start YouTube Channel").unwrap();
        let model = view.find("Create ML Model").unwrap();
        let site = view.find("Create Portfolio Website").unwrap();
        assert!(channel < model && model < site);
        assert!(view.contains("1 / 30 days"));
        assert!(view.contains(&format!("> {} Create ML Model", GoalIcon::Brain.glyph())));
    }
}
