use std::collections::BTreeMap;

use crate::domain::entities::summary::{AggregationResult, Dimension, GroupSum};
use crate::domain::entities::table::{ProductionTable, QUANTITY_COLUMN};
use crate::domain::errors::QueryError;

/// Rounds to an integer (halves to even) and groups thousands with dots.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let rounded = format!("{:.0}", value.abs());
    let negative = value.is_sign_negative() && rounded.bytes().any(|b| b != b'0');

    let digits = rounded.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (idx, digit) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(*digit as char);
    }
    out
}

fn group_and_sum_at(
    table: &ProductionTable,
    group_idx: usize,
    value_idx: usize,
) -> Vec<GroupSum> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for record in table.records() {
        let key = record.cell(group_idx).as_key();
        let value = record.cell(value_idx).as_number().unwrap_or(0.0);
        *sums.entry(key).or_insert(0.0) += value;
    }
    sums.into_iter()
        .map(|(key, total)| GroupSum {
            key,
            formatted: format_number(total),
            total,
        })
        .collect()
}

pub fn group_and_sum(
    table: &ProductionTable,
    group_column: &str,
    value_column: &str,
) -> Result<AggregationResult, QueryError> {
    let group_idx = table
        .column_index(group_column)
        .ok_or_else(|| QueryError::UnknownColumn(group_column.to_string()))?;
    let value_idx = table
        .column_index(value_column)
        .ok_or_else(|| QueryError::UnknownColumn(value_column.to_string()))?;

    Ok(AggregationResult {
        group_column: group_column.to_string(),
        value_column: value_column.to_string(),
        groups: group_and_sum_at(table, group_idx, value_idx),
    })
}

/// Printed quantity per operator, printer or label.
pub fn group_by_dimension(table: &ProductionTable, dimension: Dimension) -> AggregationResult {
    let schema = table.schema();
    AggregationResult {
        group_column: dimension.column().to_string(),
        value_column: QUANTITY_COLUMN.to_string(),
        groups: group_and_sum_at(table, dimension.column_index(schema), schema.quantity),
    }
}

pub fn top_n(result: &AggregationResult, n: usize) -> Vec<GroupSum> {
    result.top_n(n)
}
