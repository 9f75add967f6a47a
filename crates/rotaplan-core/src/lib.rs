//! Rotaplan Core - domain types for the shift scheduling engine
//!
//! This crate provides the fundamental types shared by the rotaplan crates:
//! - The staff roster model (staff, categories, vacations)
//! - Shift types and their wire codes
//! - The scheduling window and the roster grid the solver operates on
//! - Quality metrics reported with a finished schedule

pub mod domain;
pub mod error;
pub mod metrics;

pub use domain::{
    ParseShiftTypeError, Roster, ScheduleWindow, ShiftAssignment, ShiftType, Staff, StaffCategory,
    StaffId, Vacation,
};
pub use error::{Result, ScheduleError};
pub use metrics::{LoadSummary, QualityMetrics};
