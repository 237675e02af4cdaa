//! Day-granularity bookkeeping for habit items.

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::item::{HabitFields, ItemDetails, ListItem};

/// A calendar day, stored as epoch milliseconds of local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayStamp(i64);

impl DayStamp {
    pub fn from_date(date: NaiveDate) -> Self {
        let midnight = date.and_time(NaiveTime::MIN);
        let millis = Local
            .from_local_datetime(&midnight)
            .earliest()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_else(|| midnight.and_utc().timestamp_millis());
        Self(millis)
    }

    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn date(self) -> Option<NaiveDate> {
        Local
            .timestamp_millis_opt(self.0)
            .earliest()
            .map(|dt| dt.date_naive())
    }
}

/// Add `day` to the completed set, or remove it if already present.
/// Returns whether the day is completed afterwards.
pub fn toggle_completion(dates: &mut BTreeSet<DayStamp>, day: DayStamp) -> bool {
    if dates.remove(&day) {
        false
    } else {
        dates.insert(day);
        true
    }
}

/// Consecutive completed days ending on `today`.
pub fn streak(dates: &BTreeSet<DayStamp>, today: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = Some(today);
    while let Some(current) = day {
        if !dates.contains(&DayStamp::from_date(current)) {
            break;
        }
        count += 1;
        day = current.pred_opt();
    }
    count
}

impl HabitFields {
    pub fn is_completed_on(&self, day: DayStamp) -> bool {
        self.completed_dates.contains(&day)
    }
}

impl ListItem {
    /// Habit fields, if this is a habit item.
    pub fn habit(&self) -> Option<&HabitFields> {
        match &self.details {
            ItemDetails::Habit(fields) => Some(fields),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stamp_round_trips_date() {
        let date = day(2024, 3, 10);
        assert_eq!(DayStamp::from_date(date).date(), Some(date));
    }

    #[test]
    fn test_toggle() {
        let mut dates = BTreeSet::new();
        let today = DayStamp::from_date(day(2024, 5, 1));
        assert!(toggle_completion(&mut dates, today));
        assert!(dates.contains(&today));
        assert!(!toggle_completion(&mut dates, today));
        assert!(dates.is_empty());
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let dates: BTreeSet<DayStamp> = [day(2024, 5, 1), day(2024, 5, 2), day(2024, 5, 3)]
            .into_iter()
            .map(DayStamp::from_date)
            .collect();

        assert_eq!(streak(&dates, day(2024, 5, 3)), 3);
        assert_eq!(streak(&dates, day(2024, 5, 2)), 2);
        assert_eq!(streak(&dates, day(2024, 5, 4)), 0);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        let dates: BTreeSet<DayStamp> = [day(2024, 5, 1), day(2024, 5, 3)]
            .into_iter()
            .map(DayStamp::from_date)
            .collect();
        assert_eq!(streak(&dates, day(2024, 5, 3)), 1);
    }
}
