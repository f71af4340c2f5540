use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::CommerceError;

/// Opening window for one day, in whole local hours. `close` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursWindow {
    #[serde(rename = "open")]
    pub open_hour: u32,
    #[serde(rename = "close")]
    pub close_hour: u32,
}

impl HoursWindow {
    /// Validated window; `open < close <= 24`.
    pub fn new(open_hour: u32, close_hour: u32) -> Result<Self, CommerceError> {
        let window = Self {
            open_hour,
            close_hour,
        };
        window.validate()?;
        Ok(window)
    }

    fn validate(&self) -> Result<(), CommerceError> {
        if self.open_hour >= self.close_hour || self.close_hour > 24 {
            return Err(CommerceError::ValidationError(format!(
                "invalid opening hours {}-{}",
                self.open_hour, self.close_hour
            )));
        }
        Ok(())
    }

    /// Whether `hour` falls inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.open_hour && hour < self.close_hour
    }
}

impl fmt::Display for HoursWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_hour(self.open_hour),
            format_hour(self.close_hour)
        )
    }
}

/// Weekly opening schedule. A `None` (or omitted) day is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub monday: Option<HoursWindow>,
    pub tuesday: Option<HoursWindow>,
    pub wednesday: Option<HoursWindow>,
    pub thursday: Option<HoursWindow>,
    pub friday: Option<HoursWindow>,
    pub saturday: Option<HoursWindow>,
    pub sunday: Option<HoursWindow>,
}

impl Default for BusinessHours {
    /// Weekdays 9-20, Saturday 10-19, Sunday 11-18.
    fn default() -> Self {
        let weekday = Some(HoursWindow {
            open_hour: 9,
            close_hour: 20,
        });
        Self {
            monday: weekday,
            tuesday: weekday,
            wednesday: weekday,
            thursday: weekday,
            friday: weekday,
            saturday: Some(HoursWindow {
                open_hour: 10,
                close_hour: 19,
            }),
            sunday: Some(HoursWindow {
                open_hour: 11,
                close_hour: 18,
            }),
        }
    }
}

/// When the store next opens, relative to the moment asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextOpening {
    /// 0 for later today, 1 for tomorrow, and so on.
    pub days_ahead: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

impl NextOpening {
    fn day_label(&self) -> &'static str {
        match self.days_ahead {
            0 => "today",
            1 => "tomorrow",
            _ => weekday_name(self.weekday),
        }
    }
}

/// Open/closed indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Open { closes_at_hour: u32 },
    /// `next_opening` is `None` only when every day is closed.
    Closed { next_opening: Option<NextOpening> },
}

impl StoreStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, StoreStatus::Open { .. })
    }

    /// Text for the status indicator.
    pub fn message(&self) -> String {
        match self {
            StoreStatus::Open { .. } => "We're currently open".to_string(),
            StoreStatus::Closed {
                next_opening: Some(next),
            } => format!(
                "We're currently closed - Opens {} at {}",
                next.day_label(),
                format_hour(next.hour)
            ),
            StoreStatus::Closed { next_opening: None } => "We're currently closed".to_string(),
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl BusinessHours {
    /// Check every configured window.
    pub fn validate(&self) -> Result<(), CommerceError> {
        for (_, window) in self.schedule() {
            if let Some(window) = window {
                window.validate()?;
            }
        }
        Ok(())
    }

    /// Window for `day`.
    pub fn window(&self, day: Weekday) -> Option<HoursWindow> {
        match day {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// The week from Monday to Sunday.
    pub fn schedule(&self) -> [(Weekday, Option<HoursWindow>); 7] {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .map(|day| (day, self.window(day)))
    }

    /// Status at local time `now`.
    pub fn status_at(&self, now: NaiveDateTime) -> StoreStatus {
        let today = now.weekday();
        let hour = now.hour();

        if let Some(window) = self.window(today) {
            if window.contains(hour) {
                return StoreStatus::Open {
                    closes_at_hour: window.close_hour,
                };
            }
            if hour < window.open_hour {
                return StoreStatus::Closed {
                    next_opening: Some(NextOpening {
                        days_ahead: 0,
                        weekday: today,
                        hour: window.open_hour,
                    }),
                };
            }
        }

        let mut day = today;
        for days_ahead in 1..=7 {
            day = day.succ();
            if let Some(window) = self.window(day) {
                return StoreStatus::Closed {
                    next_opening: Some(NextOpening {
                        days_ahead,
                        weekday: day,
                        hour: window.open_hour,
                    }),
                };
            }
        }

        StoreStatus::Closed { next_opening: None }
    }
}

/// `9` -> `9 AM`, `12` -> `12 PM`, `20` -> `8 PM`.
pub fn format_hour(hour: u32) -> String {
    let suffix = if hour % 24 >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", display, suffix)
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
