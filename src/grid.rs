// File: ./src/grid.rs
//! Maps grid coordinates (view, day, slot row) onto concrete time ranges.
use crate::model::Event;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    #[default]
    Week,
    Month,
}

impl CalendarView {
    pub fn label(self) -> &'static str {
        match self {
            CalendarView::Day => "Day",
            CalendarView::Week => "Week",
            CalendarView::Month => "Month",
        }
    }

    /// Dates shown for `anchor`. Weeks start on Monday.
    pub fn visible_dates(self, anchor: NaiveDate) -> Vec<NaiveDate> {
        match self {
            CalendarView::Day => vec![anchor],
            CalendarView::Week => {
                let monday = week_start(anchor);
                (0..7).map(|i| monday + Duration::days(i)).collect()
            }
            CalendarView::Month => {
                let first = anchor.with_day(1).unwrap_or(anchor);
                first
                    .iter_days()
                    .take_while(|d| d.month() == first.month())
                    .collect()
            }
        }
    }

    /// Anchor moved by one page of this view (`step` = +1 / -1).
    pub fn shift(self, anchor: NaiveDate, step: i32) -> NaiveDate {
        match self {
            CalendarView::Day => anchor + Duration::days(step as i64),
            CalendarView::Week => anchor + Duration::days(7 * step as i64),
            CalendarView::Month => {
                let months = chrono::Months::new(step.unsigned_abs());
                let shifted = if step >= 0 {
                    anchor.checked_add_months(months)
                } else {
                    anchor.checked_sub_months(months)
                };
                shifted.unwrap_or(anchor)
            }
        }
    }
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Rows of the day columns: `[day_start_hour, day_end_hour)` cut into slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotGrid {
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub slot_minutes: u32,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            day_start_hour: 8,
            day_end_hour: 20,
            slot_minutes: 30,
        }
    }
}

impl SlotGrid {
    pub fn slots_per_day(&self) -> usize {
        if self.slot_minutes == 0 || self.day_end_hour <= self.day_start_hour {
            return 0;
        }
        ((self.day_end_hour - self.day_start_hour) * 60 / self.slot_minutes) as usize
    }

    /// `[start, end)` of slot `index` on `date`, or `None` past the last row.
    pub fn slot_range(&self, date: NaiveDate, index: usize) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if index >= self.slots_per_day() {
            return None;
        }
        let day_start = date.and_hms_opt(self.day_start_hour, 0, 0)?;
        let start = day_start + Duration::minutes((index as u32 * self.slot_minutes) as i64);
        let end = start + Duration::minutes(self.slot_minutes as i64);
        Some((start, end))
    }

    /// Row containing `time`, if it falls inside the visible window.
    pub fn slot_index(&self, time: NaiveTime) -> Option<usize> {
        if self.slot_minutes == 0 {
            return None;
        }
        let minutes = time.hour() * 60 + time.minute();
        let first = self.day_start_hour * 60;
        let last = self.day_end_hour * 60;
        if minutes < first || minutes >= last {
            return None;
        }
        Some(((minutes - first) / self.slot_minutes) as usize)
    }
}

/// Events intersecting `[start, end)`, in store order.
pub fn events_overlapping(
    events: &[Event],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<&Event> {
    events.iter().filter(|e| e.overlaps(start, end)).collect()
}
