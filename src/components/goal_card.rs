use chrono::NaiveDate;

use goal_tracker::core::goal::MAX_VIDEO_COUNT;
use goal_tracker::core::Goal;

use super::month_grid::month_grid;
use super::progress_bar;

const BAR_WIDTH: usize = 30;
const TROPHY: &str = "\u{1F3C6}";

/// Text card for one goal: header, daily progress, optional video counter and
/// the month grid.
pub fn goal_card(goal: &Goal, days: &[NaiveDate], today: NaiveDate, selected: bool) -> String {
    let mut out = String::new();

    let cursor = if selected { ">" } else { " " };
    out.push_str(&format!(
        "{} {} {}  ({})\n",
        cursor,
        goal.icon().glyph(),
        goal.name,
        goal.id
    ));

    let trophy = if goal.is_achieved() { format!(" {}", TROPHY) } else { String::new() };
    out.push_str(&format!(
        "  Daily Progress  {} / {} days{}\n",
        goal.progress, goal.target, trophy
    ));
    out.push_str(&format!("  {}\n", progress_bar(goal.completion_ratio(), BAR_WIDTH)));

    if goal.has_video_counter() {
        // Buttons at a bound are shown disabled.
        let minus = if goal.can_decrement_videos() { "[-]" } else { " - " };
        let plus = if goal.can_increment_videos() { "[+]" } else { " + " };
        out.push_str(&format!(
            "  Videos Uploaded {} {} / {} {}  {}\n",
            minus,
            goal.videos(),
            MAX_VIDEO_COUNT,
            plus,
            progress_bar(goal.video_ratio(), MAX_VIDEO_COUNT as usize)
        ));
    }

    for line in month_grid(goal, days, today).lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }

    out
}
