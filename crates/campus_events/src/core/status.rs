// Event status transitions.
//
// Purpose
// - Pure decisions for the two ways a status changes: an explicit admin
//   approval action, and the date-driven reclassification pass the store
//   exposes as a callable operation (no background timer).
//
// Boundaries
// - No input or output, no clock access. Callers pass `today` in so the
//   reconcile pass stays deterministic under test.

use chrono::NaiveDate;

use crate::core::event::{Event, EventStatus};

/// Outcome of the admin review action on a pending event.
pub fn approval_status(approved: bool) -> EventStatus {
    if approved {
        EventStatus::Confirmed
    } else {
        EventStatus::Cancelled
    }
}

/// Date-driven status for an approved event, relative to `today`.
pub fn classify_by_date(date: NaiveDate, today: NaiveDate) -> EventStatus {
    if date < today {
        EventStatus::Completed
    } else if date > today {
        EventStatus::Upcoming
    } else {
        EventStatus::Ongoing
    }
}

/// Whether the reconcile pass may touch this event. Drafts and events still
/// pending review keep their explicit status; cancelled is terminal.
pub fn eligible_for_reclassification(event: &Event) -> bool {
    event.is_approved
        && !matches!(
            event.status,
            EventStatus::Draft | EventStatus::PendingApproval | EventStatus::Cancelled
        )
}

#[cfg(test)]
mod status_tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    use crate::core::event::EventCategory;

    fn event_with(status: EventStatus, is_approved: bool) -> Event {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let mut event = Event::new("evt-1", "Sports Meet", EventCategory::SportsMeet, date, Utc::now());
        event.status = status;
        event.is_approved = is_approved;
        event
    }

    #[rstest]
    fn it_should_confirm_on_approve_and_cancel_on_reject() {
        assert_eq!(approval_status(true), EventStatus::Confirmed);
        assert_eq!(approval_status(false), EventStatus::Cancelled);
    }

    #[rstest]
    #[case(2026, 3, 13, EventStatus::Completed)]
    #[case(2026, 3, 15, EventStatus::Upcoming)]
    #[case(2026, 3, 14, EventStatus::Ongoing)]
    fn it_should_classify_by_event_date(
        #[case] y: i32,
        #[case] m: u32,
        #[case] d: u32,
        #[case] expected: EventStatus,
    ) {
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(classify_by_date(date, today), expected);
    }

    #[rstest]
    fn it_should_not_reclassify_drafts_pending_or_cancelled_events() {
        assert!(!eligible_for_reclassification(&event_with(EventStatus::Draft, true)));
        assert!(!eligible_for_reclassification(&event_with(EventStatus::PendingApproval, true)));
        assert!(!eligible_for_reclassification(&event_with(EventStatus::Cancelled, true)));
        assert!(!eligible_for_reclassification(&event_with(EventStatus::Confirmed, false)));
        assert!(eligible_for_reclassification(&event_with(EventStatus::Confirmed, true)));
        assert!(eligible_for_reclassification(&event_with(EventStatus::Completed, true)));
    }
}
