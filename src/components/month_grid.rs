use chrono::{Datelike, NaiveDate};

use goal_tracker::core::Goal;

const DONE: &str = "\u{25CF}";
const OPEN: &str = "\u{25CB}";

/// Seven-column grid of the month's days for one goal. Completed days are
/// filled, today is bracketed.
pub fn month_grid(goal: &Goal, days: &[NaiveDate], today: NaiveDate) -> String {
    let cells: Vec<String> = days
        .iter()
        .map(|&date| {
            let mark = if goal.is_done_on(date) { DONE } else { OPEN };
            if date == today {
                format!("[{:>2}{}]", date.day(), mark)
            } else {
                format!(" {:>2}{} ", date.day(), mark)
            }
        })
        .collect();

    cells
        .chunks(7)
        .map(|week| week.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use goal_tracker::core::calendar::days_of_month;
    use goal_tracker::core::GoalIcon;

    #[test]
    fn marks_done_days_and_today() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let mut goal = Goal::new("g", "Run", GoalIcon::Target);
        goal.toggle_day(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());

        let grid = month_grid(&goal, &days_of_month(today), today);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains(&format!("  3{} ", DONE)));
        assert!(lines[1].contains(&format!("[10{}]", OPEN)));
        assert!(lines[3].contains("28"));
    }
}
