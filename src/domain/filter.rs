use chrono::NaiveDate;

use crate::domain::entities::selector::{DateRangeSelector, ExplicitRange, QuickPeriod};
use crate::domain::entities::table::ProductionTable;

/// Records whose production date (day part) lies within the range.
/// Tables without a date column are returned unchanged.
pub fn filter_explicit(table: &ProductionTable, range: &ExplicitRange) -> ProductionTable {
    if table.schema().date.is_none() {
        return table.clone();
    }
    table.retain(|record| {
        record
            .production_date()
            .is_some_and(|date| range.contains(date.date()))
    })
}

pub fn filter_quick(
    table: &ProductionTable,
    period: QuickPeriod,
    today: NaiveDate,
) -> ProductionTable {
    if table.schema().date.is_none() {
        return table.clone();
    }
    table.retain(|record| {
        record
            .production_date()
            .is_some_and(|date| period.contains(date.date(), today))
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub table: ProductionTable,
    /// False when the table had no date column and was passed through.
    pub applied: bool,
}

pub fn apply_selector(
    table: &ProductionTable,
    selector: &DateRangeSelector,
    today: NaiveDate,
) -> FilterOutcome {
    if table.schema().date.is_none() {
        return FilterOutcome {
            table: table.clone(),
            applied: false,
        };
    }

    let filtered = match selector {
        DateRangeSelector::Explicit(range) => {
            let range = match table.date_bounds() {
                Some(bounds) => range.clamped(&bounds),
                None => *range,
            };
            filter_explicit(table, &range)
        }
        DateRangeSelector::Quick(period) => filter_quick(table, *period, today),
    };
    tracing::debug!(
        before = table.len(),
        after = filtered.len(),
        ?selector,
        "applied date filter"
    );
    FilterOutcome {
        table: filtered,
        applied: true,
    }
}
