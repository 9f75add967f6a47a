//! Staff identity and contract data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique staff identifier, assigned by the external staff directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct StaffId(pub u64);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a staff member within a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffCategory {
    Nurse,
    CareAssistant,
    /// Head nurses coordinate the department and are never scheduled.
    HeadNurse,
}

impl StaffCategory {
    /// Returns true if staff of this category receive shift assignments.
    pub const fn is_schedulable(&self) -> bool {
        !matches!(self, StaffCategory::HeadNurse)
    }
}

/// A staff member as supplied by the external staff directory.
///
/// Read-only to the engine; lifecycle (hiring, contract changes) is
/// owned by the staff-management collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub category: StaffCategory,
    pub department: String,
    pub part_time: bool,
    /// Working percentage for part-time contracts, e.g. 50 or 80.
    pub part_time_percentage: Option<u8>,
}

impl Staff {
    /// Creates a full-time staff member.
    pub fn full_time(
        id: StaffId,
        name: impl Into<String>,
        category: StaffCategory,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            department: department.into(),
            part_time: false,
            part_time_percentage: None,
        }
    }

    /// Creates a part-time staff member with the given working percentage.
    pub fn part_time(
        id: StaffId,
        name: impl Into<String>,
        category: StaffCategory,
        department: impl Into<String>,
        percentage: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            department: department.into(),
            part_time: true,
            part_time_percentage: Some(percentage),
        }
    }
}
