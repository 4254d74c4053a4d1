use std::collections::HashSet;

use crate::domain::aggregate::group_by_dimension;
use crate::domain::entities::summary::{Dimension, MetricsSummary};
use crate::domain::entities::table::ProductionTable;

pub fn summarize(table: &ProductionTable) -> MetricsSummary {
    let distinct_orders = table
        .records()
        .filter_map(|record| record.order_id())
        .collect::<HashSet<_>>()
        .len();
    let total_printed = table
        .records()
        .map(|record| record.printed_quantity())
        .sum();

    let by_label = group_by_dimension(table, Dimension::Label);
    let (top_label, top_label_quantity) = match by_label.max() {
        Some(group) => (Some(group.key.clone()), group.total),
        None => (None, 0.0),
    };

    MetricsSummary {
        distinct_orders,
        total_printed,
        top_label,
        top_label_quantity,
    }
}
