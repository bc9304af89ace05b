use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - company offered by the control panel.
/// `as_ref()` gives the name used in the `Company` column of the dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum Company {
    #[default]
    Apple,
    Microsoft,
    Amazon,
    Google,
    Meta,
}

/// Value Object - calendar month, named in long English form
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

const CALENDAR: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// Month of a date. The year is discarded.
    pub fn of(date: &NaiveDate) -> Self {
        CALENDAR[date.month0() as usize]
    }
}

/// Value Object - the user-chosen (company, month) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub company: Company,
    pub month: Month,
}

impl Selection {
    pub fn new(company: Company, month: Month) -> Self {
        Self { company, month }
    }

    pub fn with_company(self, company: Company) -> Self {
        Self { company, ..self }
    }

    pub fn with_month(self, month: Month) -> Self {
        Self { month, ..self }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self { company: Company::Apple, month: Month::November }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    #[test]
    fn calendar_order_matches_enum_order() {
        assert!(CALENDAR.iter().copied().eq(Month::iter()));
        let jan = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let dec = NaiveDate::from_ymd_opt(1999, 12, 1).unwrap();
        assert_eq!(Month::of(&jan), Month::January);
        assert_eq!(Month::of(&dec), Month::December);
    }

    #[test]
    fn names_parse_back() {
        assert_eq!(Month::from_str("September").unwrap(), Month::September);
        assert_eq!(Company::from_str("Google").unwrap(), Company::Google);
        assert!(Company::from_str("Netflix").is_err());
        assert_eq!(Company::Microsoft.as_ref(), "Microsoft");
    }

    #[test]
    fn default_selection_is_apple_november() {
        let selection = Selection::default();
        assert_eq!(selection.company, Company::Apple);
        assert_eq!(selection.month, Month::November);
    }

    #[test]
    fn month_of_ignores_year() {
        let a = NaiveDate::from_ymd_opt(2022, 11, 3).unwrap();
        let b = NaiveDate::from_ymd_opt(2023, 11, 30).unwrap();
        assert_eq!(Month::of(&a), Month::of(&b));
    }
}
