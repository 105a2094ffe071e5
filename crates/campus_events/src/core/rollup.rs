// Pure recomputation of every derived field on the Event aggregate.
//
// Purpose
// - Each derived field is one fold over its source collection, recomputed
//   from scratch after any mutation. Collections stay small (hundreds of
//   items at most), so recompute-from-scratch beats incremental maintenance
//   and its stale-delta bugs.
//
// Boundaries
// - No input or output. The store calls `refresh` after every nested-
//   collection mutation; nothing else should write the derived fields.

use crate::core::event::{BudgetItem, Event, Guest, GuestStatus, TimelineItem};

/// Paid-gated budget fold: only items marked paid count toward `spent`.
pub fn budget_spent(items: &[BudgetItem]) -> f64 {
    items
        .iter()
        .filter(|item| item.is_paid)
        .map(|item| item.actual_cost)
        .sum()
}

/// A guest is confirmed once registered, and stays confirmed after
/// attending. Invited and cancelled guests do not count.
pub fn confirmed_guests(guests: &[Guest]) -> u32 {
    guests
        .iter()
        .filter(|guest| matches!(guest.status, GuestStatus::Registered | GuestStatus::Attended))
        .count() as u32
}

/// Sort the day timeline ascending by time-of-day. Lexicographic order is
/// correct because every entry is validated as zero-padded `HH:MM`.
pub fn sort_timeline(items: &mut [TimelineItem]) {
    items.sort_by(|a, b| a.time.cmp(&b.time));
}

/// Validate a zero-padded 24-hour `HH:MM` time-of-day string.
pub fn is_valid_time_of_day(time: &str) -> bool {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let (Ok(hours), Ok(minutes)) = (time[0..2].parse::<u8>(), time[3..5].parse::<u8>()) else {
        return false;
    };
    bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
        && hours < 24
        && minutes < 60
}

/// Recompute all derived fields on the aggregate in one pass.
pub fn refresh(event: &mut Event) {
    event.budget.spent = budget_spent(&event.budget_items);
    event.guest_count.confirmed = confirmed_guests(&event.guests);
    sort_timeline(&mut event.timeline_items);
}
