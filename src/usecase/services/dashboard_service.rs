use std::fmt;

use chrono::NaiveDate;

use crate::domain::aggregate::group_by_dimension;
use crate::domain::date_column::resolve_dates;
use crate::domain::entities::selector::{DateBounds, DateRangeSelector};
use crate::domain::entities::summary::{AggregationResult, Dimension, GroupSum, MetricsSummary};
use crate::domain::entities::table::ProductionTable;
use crate::domain::filter::apply_selector;
use crate::domain::metrics::summarize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardWarning {
    NoDateColumn,
    DroppedUndatedRows { column: String, count: usize },
    EmptyResult,
}

impl fmt::Display for DashboardWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardWarning::NoDateColumn => write!(f, "Coluna de data não detectada"),
            DashboardWarning::DroppedUndatedRows { column, count } => {
                write!(f, "{count} linha(s) sem data válida em \"{column}\" foram ignoradas")
            }
            DashboardWarning::EmptyResult => write!(f, "Nenhum registro no período selecionado"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub dimension: Dimension,
    pub result: AggregationResult,
    /// Groups to chart: the top-N, or every group when the dimension is unlimited.
    pub chart: Vec<GroupSum>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub date_column: Option<String>,
    pub bounds: Option<DateBounds>,
    pub filtered: ProductionTable,
    pub metrics: MetricsSummary,
    pub breakdowns: Vec<Breakdown>,
    pub warnings: Vec<DashboardWarning>,
}

impl DashboardView {
    pub fn breakdown(&self, dimension: Dimension) -> Option<&Breakdown> {
        self.breakdowns
            .iter()
            .find(|breakdown| breakdown.dimension == dimension)
    }
}

/// Date detection, filtering, aggregation and metrics for one interaction.
pub fn build_view(
    table: &ProductionTable,
    selector: &DateRangeSelector,
    today: NaiveDate,
    top_n: usize,
) -> DashboardView {
    let mut warnings = Vec::new();

    let resolution = resolve_dates(table);
    match &resolution.column {
        None => warnings.push(DashboardWarning::NoDateColumn),
        Some(column) if resolution.dropped_rows > 0 => {
            warnings.push(DashboardWarning::DroppedUndatedRows {
                column: column.clone(),
                count: resolution.dropped_rows,
            });
        }
        Some(_) => {}
    }

    let bounds = resolution.table.date_bounds();
    let outcome = apply_selector(&resolution.table, selector, today);
    let filtered = outcome.table;
    if filtered.is_empty() {
        warnings.push(DashboardWarning::EmptyResult);
    }

    let metrics = summarize(&filtered);
    let breakdowns = Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let result = group_by_dimension(&filtered, dimension);
            let chart = match dimension.chart_limit(top_n) {
                Some(limit) => result.top_n(limit),
                None => result.groups.clone(),
            };
            Breakdown {
                dimension,
                result,
                chart,
            }
        })
        .collect();

    tracing::info!(
        rows = filtered.len(),
        distinct_orders = metrics.distinct_orders,
        total_printed = metrics.total_printed,
        warnings = warnings.len(),
        "built dashboard view"
    );

    DashboardView {
        date_column: resolution.column,
        bounds,
        filtered,
        metrics,
        breakdowns,
        warnings,
    }
}
