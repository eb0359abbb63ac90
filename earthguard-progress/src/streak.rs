//! Consecutive-day streak calculation.

use chrono::NaiveDate;

/// Compute the streak value after a day rollover.
///
/// `last_active` is the day the state last rolled over, `today` the day the
/// rollover is happening, and `was_active_last_day` whether at least one
/// mission was completed on `last_active`. A one-day step with activity
/// extends the streak; any wider gap, an inactive day, or a clock that
/// moved backwards breaks the chain.
#[must_use]
pub fn next_streak(
    last_active: NaiveDate,
    today: NaiveDate,
    was_active_last_day: bool,
    previous_streak: u32,
) -> u32 {
    let gap = (today - last_active).num_days();
    if gap == 0 {
        return previous_streak;
    }
    if gap == 1 && was_active_last_day {
        return previous_streak.saturating_add(1);
    }
    0
}
