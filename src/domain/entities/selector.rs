use chrono::{Datelike, NaiveDate};

use crate::domain::errors::FilterError;

/// Observed min/max production dates of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplicitRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ExplicitRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Every representable date; narrowed by [`ExplicitRange::clamped`].
    pub fn full() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn clamped(self, bounds: &DateBounds) -> Self {
        Self {
            start: bounds.clamp(self.start),
            end: bounds.clamp(self.end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickPeriod {
    Today,
    Last7Days,
    ThisMonth,
    ThisQuarter,
    ThisYear,
}

impl QuickPeriod {
    pub const ALL: [QuickPeriod; 5] = [
        QuickPeriod::Today,
        QuickPeriod::Last7Days,
        QuickPeriod::ThisMonth,
        QuickPeriod::ThisQuarter,
        QuickPeriod::ThisYear,
    ];

    pub fn key(self) -> &'static str {
        match self {
            QuickPeriod::Today => "today",
            QuickPeriod::Last7Days => "last7days",
            QuickPeriod::ThisMonth => "this_month",
            QuickPeriod::ThisQuarter => "this_quarter",
            QuickPeriod::ThisYear => "this_year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuickPeriod::Today => "Hoje",
            QuickPeriod::Last7Days => "Últimos 7 dias",
            QuickPeriod::ThisMonth => "Este mês",
            QuickPeriod::ThisQuarter => "Trimestre atual",
            QuickPeriod::ThisYear => "Este ano",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|period| period.key() == key)
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            QuickPeriod::Today => date == today,
            QuickPeriod::Last7Days => today
                .checked_sub_days(chrono::Days::new(7))
                .map_or(true, |from| date >= from),
            QuickPeriod::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            QuickPeriod::ThisQuarter => {
                date.year() == today.year() && quarter(date) == quarter(today)
            }
            QuickPeriod::ThisYear => date.year() == today.year(),
        }
    }
}

pub fn quarter(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeSelector {
    Explicit(ExplicitRange),
    Quick(QuickPeriod),
}
