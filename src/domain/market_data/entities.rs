use super::value_objects::{Month, Selection};
use crate::domain::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Domain entity - one daily observation. Field names match the upstream CSV columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "Close")]
    pub close: f64,
}

impl Record {
    pub fn new(company: impl Into<String>, date: NaiveDate, open: f64, close: f64) -> Self {
        Self { company: company.into(), date, open, close }
    }

    pub fn low(&self) -> f64 {
        self.open.min(self.close)
    }

    pub fn high(&self) -> f64 {
        self.open.max(self.close)
    }

    pub fn matches(&self, selection: &Selection) -> bool {
        self.company == selection.company.as_ref() && Month::of(&self.date) == selection.month
    }
}

/// Domain entity - immutable, cheaply cloneable sequence of records owned upstream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Rc<[Record]>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records: records.into() }
    }

    /// Decode a JSON array of `{Company, Date, Open, Close}` objects
    pub fn from_json(json: &str) -> AppResult<Self> {
        let records: Vec<Record> =
            serde_json::from_str(json).map_err(|e| AppError::InvalidData(e.to_string()))?;
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of the selected company whose date falls in the selected month of any year
    pub fn filter(&self, selection: &Selection) -> FilteredSet {
        let records = self.records.iter().filter(|r| r.matches(selection)).cloned().collect();
        FilteredSet::new(records)
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

/// Subset of a dataset matching one selection, ordered by date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredSet {
    records: Vec<Record>,
}

impl FilteredSet {
    pub fn new(mut records: Vec<Record>) -> Self {
        // stable: same-day records keep dataset order
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest date, `None` when empty
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.records.first()?.date, self.records.last()?.date))
    }

    /// `[min(open, close), max(open, close)]` over all records, `None` when empty
    pub fn price_extent(&self) -> Option<(f64, f64)> {
        let first = self.records.first()?;
        let extent = self
            .records
            .iter()
            .fold((first.low(), first.high()), |(lo, hi), r| (lo.min(r.low()), hi.max(r.high())));
        Some(extent)
    }
}
