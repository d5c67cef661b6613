//! Recurrence rules for repeating todos.
//!
//! Rules are stored as plain names on the todo row. Completing a todo that
//! carries a rule rolls its due date forward and opens the next occurrence.

use chrono::{Datelike, Days, Months, NaiveDateTime, Weekday};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Weekdays,
    Weekends,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence rule: {0}")]
pub struct ParseRecurrenceError(String);

impl FromStr for Recurrence {
    type Err = ParseRecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            "yearly" => Ok(Recurrence::Yearly),
            "weekdays" => Ok(Recurrence::Weekdays),
            "weekends" => Ok(Recurrence::Weekends),
            _ => Err(ParseRecurrenceError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recurrence::Daily => write!(f, "daily"),
            Recurrence::Weekly => write!(f, "weekly"),
            Recurrence::Monthly => write!(f, "monthly"),
            Recurrence::Yearly => write!(f, "yearly"),
            Recurrence::Weekdays => write!(f, "weekdays"),
            Recurrence::Weekends => write!(f, "weekends"),
        }
    }
}

impl Recurrence {
    /// The next occurrence strictly after `after`. Month and year steps
    /// clamp to the end of shorter months.
    pub fn next_due(&self, after: NaiveDateTime) -> NaiveDateTime {
        match self {
            Recurrence::Daily => after + Days::new(1),
            Recurrence::Weekly => after + Days::new(7),
            Recurrence::Monthly => after.checked_add_months(Months::new(1)).unwrap_or(after),
            Recurrence::Yearly => after.checked_add_months(Months::new(12)).unwrap_or(after),
            Recurrence::Weekdays => {
                let mut next = after + Days::new(1);
                while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
                    next = next + Days::new(1);
                }
                next
            }
            Recurrence::Weekends => {
                let mut next = after + Days::new(1);
                while !matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
                    next = next + Days::new(1);
                }
                next
            }
        }
    }
}
