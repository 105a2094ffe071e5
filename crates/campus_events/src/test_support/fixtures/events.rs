// Shared fixture builders for store and gateway tests.
//
// Purpose
// - One builder per aggregate or nested entity the tests reach for often,
//   with realistic defaults and chainable overrides. Exposed as a normal
//   module so the integration tests in `tests/` can use them too.

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::event::{
    BudgetItem, Event, EventCategory, EventStatus, Guest, GuestStatus, TimelineItem,
};

fn fixed_now() -> DateTime<Utc> {
    "2026-02-01T10:00:00Z".parse().expect("valid fixture timestamp")
}

pub struct EventBuilder {
    inner: Event,
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBuilder {
    pub fn new() -> Self {
        let mut inner = Event::new(
            "evt-fixed-0001",
            "TechXplore 2026: Annual Symposium",
            EventCategory::TechnicalSymposium,
            NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid fixture date"),
            fixed_now(),
        );
        inner.department = "CSE & IT".into();
        inner.time = "09:30".into();
        inner.location = "Main Auditorium".into();
        inner.faculty_coordinator = "Dr. Robert Miller".into();
        inner.budget.total = 150_000.0;
        inner.guest_count.estimated = 1200;
        Self { inner }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.inner.title = v.into();
        self
    }

    pub fn category(mut self, v: EventCategory) -> Self {
        self.inner.category = v;
        self
    }

    pub fn department(mut self, v: impl Into<String>) -> Self {
        self.inner.department = v.into();
        self
    }

    pub fn date(mut self, v: NaiveDate) -> Self {
        self.inner.date = v;
        self
    }

    pub fn status(mut self, v: EventStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn approved(mut self, v: bool) -> Self {
        self.inner.is_approved = v;
        if v && self.inner.status == EventStatus::PendingApproval {
            self.inner.status = EventStatus::Confirmed;
        }
        self
    }

    pub fn budget_total(mut self, v: f64) -> Self {
        self.inner.budget.total = v;
        self
    }

    pub fn build(self) -> Event {
        self.inner
    }
}

pub struct BudgetItemBuilder {
    inner: BudgetItem,
}

impl Default for BudgetItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetItemBuilder {
    pub fn new() -> Self {
        Self {
            inner: BudgetItem {
                id: "budget-fixed-0001".into(),
                category: "Logistics".into(),
                description: "Stage and sound".into(),
                estimated_cost: 500.0,
                actual_cost: 450.0,
                paid: 0.0,
                is_paid: false,
                due_date: None,
                proof_ref: None,
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn actual_cost(mut self, v: f64) -> Self {
        self.inner.actual_cost = v;
        self
    }

    pub fn paid(mut self, v: bool) -> Self {
        self.inner.is_paid = v;
        if v {
            self.inner.paid = self.inner.actual_cost;
        }
        self
    }

    pub fn build(self) -> BudgetItem {
        self.inner
    }
}

pub struct TimelineItemBuilder {
    inner: TimelineItem,
}

impl Default for TimelineItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineItemBuilder {
    pub fn new() -> Self {
        Self {
            inner: TimelineItem {
                id: "timeline-fixed-0001".into(),
                time: "09:00".into(),
                title: "Inauguration".into(),
                description: "Welcome address".into(),
                duration_minutes: 45,
                assignee: None,
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn time(mut self, v: impl Into<String>) -> Self {
        self.inner.time = v.into();
        self
    }

    pub fn build(self) -> TimelineItem {
        self.inner
    }
}

pub struct GuestBuilder {
    inner: Guest,
}

impl Default for GuestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestBuilder {
    pub fn new() -> Self {
        Self {
            inner: Guest {
                id: "guest-fixed-0001".into(),
                name: "Asha Nair".into(),
                email: "asha.nair@example.edu".into(),
                registration_id: "CAM-1001-CSE".into(),
                status: GuestStatus::Invited,
                plus_one: false,
                group: None,
                dietary_notes: None,
                department: Some("CSE".into()),
                year: Some("3".into()),
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn registration_id(mut self, v: impl Into<String>) -> Self {
        self.inner.registration_id = v.into();
        self
    }

    pub fn status(mut self, v: GuestStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn build(self) -> Guest {
        self.inner
    }
}
