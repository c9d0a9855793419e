use super::Reply;
use crate::ui::View;
use chrono::Local;

/// Local wall clock as (`HH:MM`, `YYYY-MM-DD`).
pub fn get_datetime() -> (String, String) {
    let now = Local::now();
    (
        now.format("%H:%M").to_string(),
        now.format("%Y-%m-%d").to_string(),
    )
}

pub fn handle_time() -> Reply {
    let (time, _) = get_datetime();
    Reply::with_view(format!("The current time is {time}"), View::Time(time))
}

pub fn handle_date() -> Reply {
    let (_, date) = get_datetime();
    Reply::with_view(format!("The current date is {date}"), View::Date(date))
}
