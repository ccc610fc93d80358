//! Offering (class section) and course input records.
//!
//! An [`Offering`] is one concrete section of a course component, e.g.
//! `LAB D26` of `CMPUT 174`, with its weekly time slots. Course records
//! arrive already normalized from the data-acquisition layer: each
//! [`CourseRecord`] lists its components in source order, each holding the
//! interchangeable offerings for that requirement.

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// One concrete, schedulable class section.
///
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    /// Unique offering identifier (registrar class number).
    pub id: String,
    /// Component kind (e.g. "LEC", "LAB", "SEM").
    pub component: String,
    /// Section label (e.g. "A1", "D26").
    pub section: String,
    /// Campus code.
    #[serde(default)]
    pub campus: String,
    /// Instructor name, if published.
    #[serde(default)]
    pub instructor: Option<String>,
    /// Weekly time slots, in source order.
    pub slots: Vec<TimeSlot>,
}

impl Offering {
    /// Creates an offering with no time slots.
    pub fn new(
        id: impl Into<String>,
        component: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            component: component.into(),
            section: section.into(),
            campus: String::new(),
            instructor: None,
            slots: Vec::new(),
        }
    }

    /// Sets the campus.
    pub fn with_campus(mut self, campus: impl Into<String>) -> Self {
        self.campus = campus.into();
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    /// Adds a time slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Whether any slot has unknown timing.
    pub fn has_tbd(&self) -> bool {
        self.slots.iter().any(TimeSlot::is_tbd)
    }

    /// Order-sensitive time signature of all slots.
    ///
    /// Two offerings with equal signatures look identical on a timetable.
    pub fn time_signature(&self) -> Vec<(super::Days, i32, i32)> {
        self.slots.iter().map(TimeSlot::signature).collect()
    }

    /// Display label, e.g. "LEC A1".
    pub fn label(&self) -> String {
        format!("{} {}", self.component, self.section)
    }
}

/// Offerings satisfying one requirement of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentOfferings {
    /// Component kind (e.g. "LAB").
    pub kind: String,
    /// Interchangeable offerings, in source order.
    pub offerings: Vec<Offering>,
}

impl ComponentOfferings {
    /// Creates an empty component group.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            offerings: Vec::new(),
        }
    }

    /// Adds an offering.
    pub fn with_offering(mut self, offering: Offering) -> Self {
        self.offerings.push(offering);
        self
    }
}

/// A requested course and its component groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course identifier, e.g. "CMPUT 174".
    pub id: String,
    /// Component groups in source order.
    pub components: Vec<ComponentOfferings>,
}

impl CourseRecord {
    /// Creates a course with no components.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            components: Vec::new(),
        }
    }

    /// Adds a component group.
    pub fn with_component(mut self, component: ComponentOfferings) -> Self {
        self.components.push(component);
        self
    }

    /// Total number of offerings across all components.
    pub fn offering_count(&self) -> usize {
        self.components.iter().map(|c| c.offerings.len()).sum()
    }
}
