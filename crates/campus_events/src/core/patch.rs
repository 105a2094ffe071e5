// Partial-update inputs for the store's update operations.
//
// Purpose
// - One patch type per entity: every field optional, absent fields leave the
//   target untouched. Derived fields (`budget.spent`, `guest_count.confirmed`,
//   timeline order) are deliberately not patchable; the store recomputes them.
//
// Boundaries
// - `apply` merges in place and enforces the few structural rules a merge
//   can break (identifier and title are required on the aggregate). No
//   input or output.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::core::event::{
    BudgetItem, ChecklistItem, Event, EventCategory, EventStatus, Guest, GuestStatus, Risk,
    RiskLevel, RiskStatus, Staff, StaffStatus, TimelineItem, Vendor, VendorStatus, Venue,
    VenueStatus,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("title is required and cannot be cleared")]
    EmptyTitle,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventPatch {
    pub title: Option<String>,
    pub category: Option<EventCategory>,
    pub department: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub objectives: Option<String>,
    pub outcomes: Option<String>,
    pub faculty_coordinator: Option<String>,
    pub status: Option<EventStatus>,
    pub is_approved: Option<bool>,
    /// Total planned budget. `spent` is derived and not patchable.
    pub budget_total: Option<f64>,
    /// Expected headcount. `confirmed` is derived and not patchable.
    pub estimated_guests: Option<u32>,
}

impl EventPatch {
    pub fn apply(self, event: &mut Event) -> Result<(), PatchError> {
        if let Some(title) = self.title {
            if title.trim().is_empty() {
                return Err(PatchError::EmptyTitle);
            }
            event.title = title;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(department) = self.department {
            event.department = department;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(time) = self.time {
            event.time = time;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(objectives) = self.objectives {
            event.objectives = objectives;
        }
        if let Some(outcomes) = self.outcomes {
            event.outcomes = outcomes;
        }
        if let Some(faculty_coordinator) = self.faculty_coordinator {
            event.faculty_coordinator = faculty_coordinator;
        }
        if let Some(status) = self.status {
            event.status = status;
        }
        if let Some(is_approved) = self.is_approved {
            event.is_approved = is_approved;
        }
        if let Some(budget_total) = self.budget_total {
            event.budget.total = budget_total;
        }
        if let Some(estimated_guests) = self.estimated_guests {
            event.guest_count.estimated = estimated_guests;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BudgetItemPatch {
    pub category: Option<String>,
    pub description: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub paid: Option<f64>,
    pub is_paid: Option<bool>,
    pub due_date: Option<NaiveDate>,
    pub proof_ref: Option<String>,
}

impl BudgetItemPatch {
    pub fn apply(self, item: &mut BudgetItem) {
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(estimated_cost) = self.estimated_cost {
            item.estimated_cost = estimated_cost;
        }
        if let Some(actual_cost) = self.actual_cost {
            item.actual_cost = actual_cost;
        }
        if let Some(paid) = self.paid {
            item.paid = paid;
        }
        if let Some(is_paid) = self.is_paid {
            item.is_paid = is_paid;
        }
        if let Some(due_date) = self.due_date {
            item.due_date = Some(due_date);
        }
        if let Some(proof_ref) = self.proof_ref {
            item.proof_ref = Some(proof_ref);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TimelineItemPatch {
    pub time: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<u32>,
    pub assignee: Option<String>,
}

impl TimelineItemPatch {
    pub fn apply(self, item: &mut TimelineItem) {
        if let Some(time) = self.time {
            item.time = time;
        }
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(duration_minutes) = self.duration_minutes {
            item.duration_minutes = duration_minutes;
        }
        if let Some(assignee) = self.assignee {
            item.assignee = Some(assignee);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VenuePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub capacity: Option<u32>,
    pub status: Option<VenueStatus>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

impl VenuePatch {
    pub fn apply(self, venue: &mut Venue) {
        if let Some(name) = self.name {
            venue.name = name;
        }
        if let Some(address) = self.address {
            venue.address = address;
        }
        if let Some(contact_person) = self.contact_person {
            venue.contact_person = contact_person;
        }
        if let Some(email) = self.email {
            venue.email = email;
        }
        if let Some(phone) = self.phone {
            venue.phone = phone;
        }
        if let Some(capacity) = self.capacity {
            venue.capacity = capacity;
        }
        if let Some(status) = self.status {
            venue.status = status;
        }
        if let Some(cost) = self.cost {
            venue.cost = cost;
        }
        if let Some(notes) = self.notes {
            venue.notes = Some(notes);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VendorPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<VendorStatus>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

impl VendorPatch {
    pub fn apply(self, vendor: &mut Vendor) {
        if let Some(name) = self.name {
            vendor.name = name;
        }
        if let Some(category) = self.category {
            vendor.category = category;
        }
        if let Some(contact_person) = self.contact_person {
            vendor.contact_person = contact_person;
        }
        if let Some(email) = self.email {
            vendor.email = email;
        }
        if let Some(phone) = self.phone {
            vendor.phone = phone;
        }
        if let Some(status) = self.status {
            vendor.status = status;
        }
        if let Some(cost) = self.cost {
            vendor.cost = cost;
        }
        if let Some(notes) = self.notes {
            vendor.notes = Some(notes);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StaffPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<StaffStatus>,
    pub notes: Option<String>,
}

impl StaffPatch {
    pub fn apply(self, staff: &mut Staff) {
        if let Some(name) = self.name {
            staff.name = name;
        }
        if let Some(role) = self.role {
            staff.role = role;
        }
        if let Some(email) = self.email {
            staff.email = email;
        }
        if let Some(phone) = self.phone {
            staff.phone = phone;
        }
        if let Some(status) = self.status {
            staff.status = status;
        }
        if let Some(notes) = self.notes {
            staff.notes = Some(notes);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GuestPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<GuestStatus>,
    pub plus_one: Option<bool>,
    pub group: Option<String>,
    pub dietary_notes: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
}

impl GuestPatch {
    pub fn apply(self, guest: &mut Guest) {
        if let Some(name) = self.name {
            guest.name = name;
        }
        if let Some(email) = self.email {
            guest.email = email;
        }
        if let Some(status) = self.status {
            guest.status = status;
        }
        if let Some(plus_one) = self.plus_one {
            guest.plus_one = plus_one;
        }
        if let Some(group) = self.group {
            guest.group = Some(group);
        }
        if let Some(dietary_notes) = self.dietary_notes {
            guest.dietary_notes = Some(dietary_notes);
        }
        if let Some(department) = self.department {
            guest.department = Some(department);
        }
        if let Some(year) = self.year {
            guest.year = Some(year);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RiskPatch {
    pub title: Option<String>,
    pub probability: Option<RiskLevel>,
    pub impact: Option<RiskLevel>,
    pub mitigation_plan: Option<String>,
    pub status: Option<RiskStatus>,
}

impl RiskPatch {
    pub fn apply(self, risk: &mut Risk) {
        if let Some(title) = self.title {
            risk.title = title;
        }
        if let Some(probability) = self.probability {
            risk.probability = probability;
        }
        if let Some(impact) = self.impact {
            risk.impact = impact;
        }
        if let Some(mitigation_plan) = self.mitigation_plan {
            risk.mitigation_plan = mitigation_plan;
        }
        if let Some(status) = self.status {
            risk.status = status;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChecklistItemPatch {
    pub task: Option<String>,
    pub time: Option<String>,
    pub assignee: Option<String>,
    pub is_completed: Option<bool>,
}

impl ChecklistItemPatch {
    pub fn apply(self, item: &mut ChecklistItem) {
        if let Some(task) = self.task {
            item.task = task;
        }
        if let Some(time) = self.time {
            item.time = Some(time);
        }
        if let Some(assignee) = self.assignee {
            item.assignee = Some(assignee);
        }
        if let Some(is_completed) = self.is_completed {
            item.is_completed = is_completed;
        }
    }
}

#[cfg(test)]
mod patch_tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn it_should_merge_only_present_fields_into_the_event() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let mut event = Event::new("evt-1", "Original", EventCategory::Workshop, date, Utc::now());
        event.location = "Seminar Hall 2".into();

        let patch = EventPatch {
            title: Some("Modern AI with PyTorch".into()),
            budget_total: Some(25_000.0),
            ..EventPatch::default()
        };
        patch.apply(&mut event).unwrap();

        assert_eq!(event.title, "Modern AI with PyTorch");
        assert_eq!(event.budget.total, 25_000.0);
        assert_eq!(event.location, "Seminar Hall 2");
        assert_eq!(event.category, EventCategory::Workshop);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn it_should_reject_a_patch_that_clears_the_title(#[case] title: &str) {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let mut event = Event::new("evt-1", "Original", EventCategory::Workshop, date, Utc::now());

        let patch = EventPatch {
            title: Some(title.into()),
            ..EventPatch::default()
        };
        assert_eq!(patch.apply(&mut event), Err(PatchError::EmptyTitle));
        assert_eq!(event.title, "Original");
    }

    #[rstest]
    fn it_should_flip_a_budget_item_to_paid_without_touching_costs() {
        let mut item = BudgetItem {
            id: "b-1".into(),
            category: "Catering".into(),
            description: "Lunch".into(),
            estimated_cost: 300.0,
            actual_cost: 280.0,
            paid: 0.0,
            is_paid: false,
            due_date: None,
            proof_ref: None,
        };
        BudgetItemPatch {
            is_paid: Some(true),
            paid: Some(280.0),
            ..BudgetItemPatch::default()
        }
        .apply(&mut item);

        assert!(item.is_paid);
        assert_eq!(item.paid, 280.0);
        assert_eq!(item.actual_cost, 280.0);
    }
}
