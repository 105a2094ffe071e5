// Canonical domain model: the Event aggregate and its nested entities.
//
// Purpose
// - One Event plus its nested collections form a single consistency boundary.
//   Everything here is plain data; mutations happen only through the store.
//
// Boundaries
// - No input or output. Serde derives define the persisted blob shape
//   (camelCase field names, ISO-8601 timestamps, plain-number amounts), so
//   renaming a field here is a storage format change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of event categories used by the college console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    TechnicalSymposium,
    Workshop,
    Seminar,
    CulturalFest,
    SportsMeet,
    Hackathon,
    Conference,
    ClubActivity,
    Orientation,
    PlacementDrive,
    NssSocialService,
    AlumniMeet,
    FarewellFreshers,
    AcademicEvent,
    Other,
}

/// Event lifecycle. `draft` and `pending-approval` precede admin review;
/// `upcoming`/`ongoing`/`completed` are derived from the event date by the
/// reconcile pass; `cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    Draft,
    PendingApproval,
    Confirmed,
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total: f64,
    /// Derived: paid-gated sum over budget items. See `rollup::budget_spent`.
    pub spent: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCount {
    pub estimated: u32,
    /// Derived: guests with status registered or attended.
    /// See `rollup::confirmed_guests`.
    pub confirmed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: String,
    pub category: String,
    pub description: String,
    pub estimated_cost: f64,
    pub actual_cost: f64,
    pub paid: f64,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: String,
    /// Zero-padded 24-hour `HH:MM`. The store rejects anything else, which
    /// keeps the lexicographic sort in `rollup::sort_timeline` correct.
    pub time: String,
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VenueStatus {
    Potential,
    Contacted,
    Visited,
    Booked,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub capacity: u32,
    pub status: VenueStatus,
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VendorStatus {
    Potential,
    Contacted,
    Booked,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub category: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub status: VendorStatus,
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffStatus {
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub status: StaffStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuestStatus {
    Invited,
    Registered,
    Attended,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub registration_id: String,
    pub status: GuestStatus,
    #[serde(default)]
    pub plus_one: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskStatus {
    Open,
    Mitigated,
    Occurred,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub id: String,
    pub title: String,
    pub probability: RiskLevel,
    pub impact: RiskLevel,
    pub mitigation_plan: String,
    pub status: RiskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    pub is_completed: bool,
}

/// The root aggregate. `budget.spent`, `guest_count.confirmed` and the
/// timeline ordering are derived and must only be touched by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub category: EventCategory,
    pub department: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub description: String,
    pub objectives: String,
    pub outcomes: String,
    pub faculty_coordinator: String,
    pub status: EventStatus,
    pub is_approved: bool,
    pub budget: BudgetSummary,
    pub guest_count: GuestCount,
    #[serde(default)]
    pub budget_items: Vec<BudgetItem>,
    #[serde(default)]
    pub timeline_items: Vec<TimelineItem>,
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub staff: Vec<Staff>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub day_of_checklist: Vec<ChecklistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// A new aggregate starts with empty nested collections and awaits
    /// admin review.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: EventCategory,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category,
            department: String::new(),
            date,
            time: String::new(),
            location: String::new(),
            description: String::new(),
            objectives: String::new(),
            outcomes: String::new(),
            faculty_coordinator: String::new(),
            status: EventStatus::PendingApproval,
            is_approved: false,
            budget: BudgetSummary::default(),
            guest_count: GuestCount::default(),
            budget_items: Vec::new(),
            timeline_items: Vec::new(),
            venues: Vec::new(),
            vendors: Vec::new(),
            staff: Vec::new(),
            guests: Vec::new(),
            risks: Vec::new(),
            day_of_checklist: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
