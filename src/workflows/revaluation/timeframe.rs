use super::domain::Timeframe;
use chrono::NaiveDate;

pub fn bucket(planned_date: NaiveDate, today: NaiveDate) -> Timeframe {
    bucket_for_delta((planned_date - today).num_days())
}

/// Upper bounds are inclusive: 7, 30 and 90 days.
pub fn bucket_for_delta(delta_days: i64) -> Timeframe {
    match delta_days {
        i64::MIN..=-1 => Timeframe::Overdue,
        0..=7 => Timeframe::Week,
        8..=30 => Timeframe::Month,
        31..=90 => Timeframe::Quarter,
        _ => Timeframe::Later,
    }
}
