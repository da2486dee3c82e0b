use goal_tracker::core::GoalIcon;

use crate::application::GoalForm;

/// Text rendition of the add/edit dialog. Empty when the form is closed.
pub fn goal_form(form: &GoalForm) -> String {
    let (title, submit, name, icon) = match form {
        GoalForm::Closed => return String::new(),
        GoalForm::Adding { name, icon } => ("Add New Goal", "Add Goal", name, *icon),
        GoalForm::Editing { name, icon, .. } => ("Edit Goal", "Save Changes", name, *icon),
    };

    let name_line = if name.is_empty() { "Enter your goal" } else { name.as_str() };
    let icons: Vec<String> = GoalIcon::ALL
        .iter()
        .map(|i| {
            if *i == icon {
                format!("[{} {}]", i.glyph(), i)
            } else {
                format!(" {} {} ", i.glyph(), i)
            }
        })
        .collect();

    format!(
        "{}\n  Goal Name: {}\n  Icon: {}\n  [Cancel] [{}]\n",
        title,
        name_line,
        icons.join(" "),
        submit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_form_renders_nothing() {
        assert!(goal_form(&GoalForm::Closed).is_empty());
    }

    #[test]
    fn edit_form_highlights_icon() {
        let form = GoalForm::Editing {
            id: "2".into(),
            name: "Create ML Model".into(),
            icon: GoalIcon::Brain,
        };
        let text = goal_form(&form);
        assert!(text.starts_with("Edit Goal"));
        assert!(text.contains("Goal Name: Create ML Model"));
        assert!(text.contains(&format!("[{} brain]", GoalIcon::Brain.glyph())));
        assert!(text.contains("[Save Changes]"));
    }

    #[test]
    fn add_form_placeholder() {
        let text = goal_form(&GoalForm::new_goal());
        assert!(text.contains("Goal Name: Enter your goal"));
        assert!(text.contains(&format!("[{} target]", GoalIcon::Target.glyph())));
    }
}
