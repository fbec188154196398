use chrono::{Days, NaiveDateTime, NaiveTime};

use crate::ring::ClockTime;

/// Next local instant whose wall clock reads `wake`: later today if that is
/// still ahead of `now`, otherwise tomorrow.
pub fn next_alarm_at(now: NaiveDateTime, wake: ClockTime) -> NaiveDateTime {
    let wake_time = NaiveTime::from_hms_opt(wake.hour() as u32, wake.minute() as u32, 0)
        .unwrap_or(NaiveTime::MIN);
    let today = now.date().and_time(wake_time);
    if today > now {
        today
    } else {
        now.date()
            .checked_add_days(Days::new(1))
            .map_or(today, |tomorrow| tomorrow.and_time(wake_time))
    }
}
