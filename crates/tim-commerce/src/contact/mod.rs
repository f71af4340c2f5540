//! Contact page: business hours and the open/closed indicator.

mod hours;

pub use hours::{format_hour, BusinessHours, HoursWindow, NextOpening, StoreStatus};
