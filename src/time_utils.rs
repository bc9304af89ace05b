use chrono::{Datelike, NaiveDate, Weekday};

/// Axis label: abbreviated month and zero-padded day, e.g. `Nov 01`.
pub fn format_tick_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Tooltip date in the browser's default short form, e.g. `11/1/2023`.
pub fn format_tooltip_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        assert_eq!(format_tick_label(date), "Nov 01");
        assert_eq!(format_tooltip_date(date), "11/1/2023");
    }

    #[test]
    fn counts_days() {
        let a = NaiveDate::from_ymd_opt(2023, 10, 30).unwrap();
        let b = NaiveDate::from_ymd_opt(2023, 11, 2).unwrap();
        assert_eq!(days_between(a, b), 3);
        assert!(!is_sunday(a));
        assert!(is_sunday(NaiveDate::from_ymd_opt(2023, 11, 5).unwrap()));
    }
}
