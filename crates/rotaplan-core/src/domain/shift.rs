//! Shift types and their wire codes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The closed set of shift types a staff member can hold on one day.
///
/// `Leave` is reserved for approved vacation days seeded before
/// optimization and is never assigned or overwritten by the solver.
/// `Rest` is a non-working day the solver itself assigns.
///
/// At the external boundary each type is a one-letter code, kept for
/// compatibility with existing consumers:
///
/// ```
/// use rotaplan_core::ShiftType;
///
/// assert_eq!(ShiftType::Afternoon.code(), 'P');
/// assert_eq!("N".parse::<ShiftType>().unwrap(), ShiftType::Night);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftType {
    Morning,
    Afternoon,
    Night,
    Rest,
    Leave,
}

impl ShiftType {
    /// The working shift types, in boundary-code order.
    pub const WORKING: [ShiftType; 3] = [ShiftType::Morning, ShiftType::Afternoon, ShiftType::Night];

    /// The types the solver may place on a non-vacation day.
    ///
    /// `Leave` is excluded: it only ever originates from a vacation record.
    pub const ASSIGNABLE: [ShiftType; 4] = [
        ShiftType::Morning,
        ShiftType::Afternoon,
        ShiftType::Night,
        ShiftType::Rest,
    ];

    /// Returns the one-letter boundary code.
    pub const fn code(&self) -> char {
        match self {
            ShiftType::Morning => 'M',
            ShiftType::Afternoon => 'P',
            ShiftType::Night => 'N',
            ShiftType::Rest => 'R',
            ShiftType::Leave => 'F',
        }
    }

    /// Returns true for Morning, Afternoon and Night.
    pub const fn is_working(&self) -> bool {
        matches!(
            self,
            ShiftType::Morning | ShiftType::Afternoon | ShiftType::Night
        )
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when parsing an unknown shift code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shift code {0:?} (expected one of M, P, N, R, F)")]
pub struct ParseShiftTypeError(pub String);

impl FromStr for ShiftType {
    type Err = ParseShiftTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(ShiftType::Morning),
            "P" => Ok(ShiftType::Afternoon),
            "N" => Ok(ShiftType::Night),
            "R" => Ok(ShiftType::Rest),
            "F" => Ok(ShiftType::Leave),
            other => Err(ParseShiftTypeError(other.to_string())),
        }
    }
}

impl serde::Serialize for ShiftType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ShiftType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = <String as serde::Deserialize>::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
