use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::config::{read_accounts_file, DashboardConfig, DEFAULT_TOP_N};
use crate::domain::aggregate::{group_and_sum, group_by_dimension, top_n};
use crate::domain::date_column::resolve_dates;
use crate::domain::entities::selector::{DateRangeSelector, ExplicitRange, QuickPeriod};
use crate::domain::entities::summary::Dimension;
use crate::domain::entities::table::{
    CellValue, ProductionTable, LABEL_COLUMN, OPERATOR_COLUMN, QUANTITY_COLUMN,
};
use crate::domain::errors::{ConfigError, ExportError, FilterError, LoadError, QueryError};
use crate::domain::filter::{apply_selector, filter_explicit, filter_quick};
use crate::domain::metrics::summarize;
use crate::infra::export::FileTableSink;
use crate::infra::import::FileTableSource;
use crate::ui::detail::{DetailRows, DETAIL_ROW_LIMIT};
use crate::ui::state::app_state::{current_selector, FilterMode};
use crate::usecase::ports::table_io::{TableSink, TableSource, TabularData};
use crate::usecase::services::dashboard_service::{build_view, DashboardWarning};
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::load_service::LoadService;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("producao-bureau-{prefix}-{nanos}"))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn datetime(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(0, 0, 0).expect("valid time")
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn headers() -> Vec<String> {
    [
        "Pedido",
        "Quantidade Impressa",
        "Usuário",
        "Impressora",
        "Etiqueta",
        "Data Produção",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

fn row(
    order: f64,
    qty: f64,
    operator: &str,
    printer: &str,
    label: &str,
    when: CellValue,
) -> Vec<CellValue> {
    vec![
        CellValue::Number(order),
        CellValue::Number(qty),
        text(operator),
        text(printer),
        text(label),
        when,
    ]
}

fn scenario_table() -> ProductionTable {
    let rows = vec![
        row(1.0, 10.0, "ana", "ZT410", "A", CellValue::DateTime(datetime(2024, 1, 5))),
        row(1.0, 5.0, "bia", "ZT230", "B", CellValue::DateTime(datetime(2024, 1, 6))),
        row(2.0, 20.0, "ana", "ZT410", "A", CellValue::DateTime(datetime(2024, 2, 1))),
    ];
    let table = ProductionTable::from_tabular(TabularData {
        columns: headers(),
        rows,
    })
    .expect("scenario table should be valid");
    resolve_dates(&table).table
}

fn mixed_year_table() -> ProductionTable {
    let rows = vec![
        row(1.0, 3.0, "ana", "ZT410", "A", text("2023-12-31")),
        row(2.0, 4.0, "bia", "ZT230", "B", text("01/01/2024")),
        row(3.0, 5.0, "ana", "ZT410", "C", text("2024-07-15 08:30:00")),
        row(4.0, 6.0, "caio", "ZT230", "A", text("2025-01-01")),
    ];
    let table = ProductionTable::from_tabular(TabularData {
        columns: headers(),
        rows,
    })
    .expect("mixed table should be valid");
    resolve_dates(&table).table
}

fn undated_table(rows: Vec<Vec<CellValue>>) -> ProductionTable {
    let columns = headers().into_iter().take(5).collect();
    let rows = rows
        .into_iter()
        .map(|mut row| {
            row.truncate(5);
            row
        })
        .collect();
    ProductionTable::from_tabular(TabularData { columns, rows }).expect("table should be valid")
}

#[test]
fn explicit_january_range_matches_scenario() {
    let table = scenario_table();
    let range = ExplicitRange::new(date(2024, 1, 1), date(2024, 1, 31)).expect("valid range");

    let filtered = filter_explicit(&table, &range);
    let metrics = summarize(&filtered);
    let by_label = group_and_sum(&filtered, LABEL_COLUMN, QUANTITY_COLUMN)
        .expect("label grouping should succeed");

    assert_eq!(filtered.len(), 2);
    assert_eq!(metrics.distinct_orders, 1);
    assert_eq!(metrics.total_printed, 15.0);
    assert_eq!(by_label.len(), 2);
    assert_eq!(by_label.get("A"), Some(10.0));
    assert_eq!(by_label.get("B"), Some(5.0));
}

#[test]
fn this_year_quick_period_matches_scenario() {
    let table = scenario_table();

    let filtered = filter_quick(&table, QuickPeriod::ThisYear, date(2024, 6, 1));
    let metrics = summarize(&filtered);

    assert_eq!(filtered.len(), 3);
    assert_eq!(metrics.total_printed, 35.0);
    assert_eq!(metrics.distinct_orders, 2);
    assert_eq!(metrics.top_label.as_deref(), Some("A"));
    assert_eq!(metrics.top_label_quantity, 30.0);
}

#[test]
fn this_year_keeps_only_records_of_that_year() {
    let table = mixed_year_table();

    let filtered = filter_quick(&table, QuickPeriod::ThisYear, date(2024, 3, 10));

    assert_eq!(filtered.len(), 2);
    assert!(filtered
        .records()
        .all(|record| record.production_date().map(|when| when.year()) == Some(2024)));
}

#[test]
fn quick_periods_select_expected_windows() {
    let table = mixed_year_table();
    let today = date(2024, 7, 20);

    assert_eq!(filter_quick(&table, QuickPeriod::Today, today).len(), 0);
    assert_eq!(filter_quick(&table, QuickPeriod::ThisMonth, today).len(), 1);
    assert_eq!(filter_quick(&table, QuickPeriod::ThisQuarter, today).len(), 1);
    // 2024-07-15 is within seven days and 2025-01-01 has no upper bound
    assert_eq!(filter_quick(&table, QuickPeriod::Last7Days, today).len(), 2);
    assert_eq!(
        filter_quick(&table, QuickPeriod::Today, date(2024, 7, 15)).len(),
        1,
        "time of day should be ignored"
    );
}

#[test]
fn explicit_filter_is_idempotent() {
    let table = mixed_year_table();
    let range = ExplicitRange::new(date(2023, 12, 31), date(2024, 7, 15)).expect("valid range");

    let once = filter_explicit(&table, &range);
    let twice = filter_explicit(&once, &range);

    assert_eq!(once.len(), 3);
    assert_eq!(once, twice);
}

#[test]
fn explicit_selector_is_clamped_to_observed_dates() {
    let table = scenario_table();
    let selector = DateRangeSelector::Explicit(ExplicitRange::full());

    let outcome = apply_selector(&table, &selector, date(2024, 6, 1));

    assert!(outcome.applied);
    assert_eq!(outcome.table.len(), 3);
}

#[test]
fn group_sums_partition_the_total() {
    let table = mixed_year_table();
    let total: f64 = table.records().map(|record| record.printed_quantity()).sum();

    for dimension in Dimension::ALL {
        let result = group_by_dimension(&table, dimension);
        assert_eq!(result.total(), total, "partition failed for {dimension:?}");
    }
}

#[test]
fn empty_group_keys_still_partition_the_total() {
    let table = undated_table(vec![
        row(1.0, 7.0, "", "ZT410", "A", CellValue::Empty),
        row(2.0, 3.0, "ana", "ZT410", "A", CellValue::Empty),
    ]);

    let by_operator = group_by_dimension(&table, Dimension::Operator);

    assert_eq!(by_operator.get(""), Some(7.0));
    assert_eq!(by_operator.total(), 10.0);
}

#[test]
fn top_n_is_sorted_descending_and_bounded() {
    let rows = (0..20)
        .map(|idx| {
            row(
                idx as f64,
                (idx % 7) as f64 * 100.0,
                &format!("op{idx:02}"),
                "ZT410",
                "A",
                CellValue::Empty,
            )
        })
        .collect();
    let table = undated_table(rows);
    let result = group_by_dimension(&table, Dimension::Operator);

    let top = top_n(&result, DEFAULT_TOP_N);

    assert_eq!(top.len(), DEFAULT_TOP_N);
    assert!(top.windows(2).all(|pair| pair[0].total >= pair[1].total));
    assert_eq!(top_n(&result, 50).len(), 20);
}

#[test]
fn ties_resolve_to_grouping_order() {
    let table = undated_table(vec![
        row(1.0, 5.0, "ana", "ZT410", "Zebra", CellValue::Empty),
        row(2.0, 5.0, "ana", "ZT410", "Alfa", CellValue::Empty),
        row(3.0, 1.0, "ana", "ZT410", "Beta", CellValue::Empty),
    ]);

    let by_label = group_by_dimension(&table, Dimension::Label);
    let top = by_label.top_n(2);
    let metrics = summarize(&table);

    assert_eq!(top[0].key, "Alfa");
    assert_eq!(top[1].key, "Zebra");
    assert_eq!(metrics.top_label.as_deref(), Some("Alfa"));
}

#[test]
fn grouping_is_case_sensitive_and_formats_sums() {
    let table = undated_table(vec![
        row(1.0, 1500.0, "Ana", "ZT410", "A", CellValue::Empty),
        row(2.0, 250.4, "ana", "ZT410", "A", CellValue::Empty),
        row(3.0, 1000.0, "Ana", "ZT410", "A", CellValue::Empty),
    ]);

    let result = group_and_sum(&table, OPERATOR_COLUMN, QUANTITY_COLUMN)
        .expect("operator grouping should succeed");

    assert_eq!(result.len(), 2);
    assert_eq!(result.groups[0].key, "Ana");
    assert_eq!(result.groups[0].formatted, "2.500");
    assert_eq!(result.groups[1].formatted, "250");
}

#[test]
fn group_and_sum_rejects_unknown_column() {
    let table = scenario_table();

    let result = group_and_sum(&table, "Cliente", QUANTITY_COLUMN);

    assert_eq!(result, Err(QueryError::UnknownColumn("Cliente".to_string())));
}

#[test]
fn empty_table_yields_zero_metrics() {
    let table = scenario_table();
    let range = ExplicitRange::new(date(2030, 1, 1), date(2030, 12, 31)).expect("valid range");
    let empty = filter_explicit(&table, &range);

    let metrics = summarize(&empty);
    let by_label = group_and_sum(&empty, LABEL_COLUMN, QUANTITY_COLUMN)
        .expect("grouping an empty table should succeed");

    assert!(empty.is_empty());
    assert_eq!(metrics.distinct_orders, 0);
    assert_eq!(metrics.total_printed, 0.0);
    assert_eq!(metrics.top_label, None);
    assert_eq!(metrics.top_label_quantity, 0.0);
    assert!(by_label.is_empty());
    assert!(by_label.max().is_none());
    assert!(by_label.top_n(15).is_empty());
}

#[test]
fn from_tabular_requires_production_columns() {
    let data = TabularData {
        columns: vec!["Pedido".to_string(), "Etiqueta".to_string()],
        rows: vec![vec![CellValue::Number(1.0), text("A")]],
    };

    let result = ProductionTable::from_tabular(data);

    assert!(
        matches!(result, Err(LoadError::MissingColumn(ref name)) if name == QUANTITY_COLUMN),
        "unexpected result: {result:?}"
    );
}

#[test]
fn from_tabular_rejects_negative_and_invalid_quantities() {
    let negative = TabularData {
        columns: headers(),
        rows: vec![row(1.0, -2.0, "ana", "ZT410", "A", CellValue::Empty)],
    };
    let invalid = TabularData {
        columns: headers(),
        rows: vec![vec![
            CellValue::Number(1.0),
            text("muitas"),
            text("ana"),
            text("ZT410"),
            text("A"),
            CellValue::Empty,
        ]],
    };

    assert!(matches!(
        ProductionTable::from_tabular(negative),
        Err(LoadError::NegativeQuantity { row: 2, .. })
    ));
    assert!(matches!(
        ProductionTable::from_tabular(invalid),
        Err(LoadError::InvalidQuantity { row: 2, .. })
    ));
}

#[test]
fn resolve_dates_drops_rows_without_valid_date() {
    let table = ProductionTable::from_tabular(TabularData {
        columns: headers(),
        rows: vec![
            row(1.0, 1.0, "ana", "ZT410", "A", text("2024-01-05")),
            row(2.0, 1.0, "ana", "ZT410", "A", CellValue::Empty),
            row(3.0, 1.0, "ana", "ZT410", "A", text("sem data")),
        ],
    })
    .expect("table should be valid");

    let resolution = resolve_dates(&table);

    assert_eq!(resolution.column.as_deref(), Some("Data Produção"));
    assert_eq!(resolution.dropped_rows, 2);
    assert_eq!(resolution.table.len(), 1);
    let bounds = resolution.table.date_bounds().expect("bounds should exist");
    assert_eq!(bounds.min, date(2024, 1, 5));
    assert_eq!(bounds.max, date(2024, 1, 5));
}

#[test]
fn build_view_without_date_column_uses_full_table() {
    let table = undated_table(vec![
        row(1.0, 4.0, "ana", "ZT410", "A", CellValue::Empty),
        row(2.0, 6.0, "bia", "ZT230", "B", CellValue::Empty),
    ]);
    let selector = DateRangeSelector::Quick(QuickPeriod::Today);

    let view = build_view(&table, &selector, date(2024, 6, 1), DEFAULT_TOP_N);

    assert_eq!(view.date_column, None);
    assert_eq!(view.bounds, None);
    assert_eq!(view.filtered.len(), 2);
    assert_eq!(view.warnings, vec![DashboardWarning::NoDateColumn]);
    assert_eq!(view.metrics.total_printed, 10.0);
}

#[test]
fn build_view_reports_empty_result_and_keeps_printers_unlimited() {
    let table = scenario_table();

    let empty = build_view(
        &table,
        &DateRangeSelector::Quick(QuickPeriod::Today),
        date(2024, 6, 1),
        DEFAULT_TOP_N,
    );
    assert!(empty.warnings.contains(&DashboardWarning::EmptyResult));
    assert_eq!(empty.metrics.top_label, None);
    assert!(empty.breakdowns.iter().all(|breakdown| breakdown.chart.is_empty()));

    let full = build_view(
        &table,
        &DateRangeSelector::Quick(QuickPeriod::ThisYear),
        date(2024, 6, 1),
        1,
    );
    let printers = full
        .breakdown(Dimension::Printer)
        .expect("printer breakdown should exist");
    let labels = full
        .breakdown(Dimension::Label)
        .expect("label breakdown should exist");
    assert_eq!(printers.chart.len(), 2);
    assert_eq!(labels.chart.len(), 1);
    assert_eq!(labels.chart[0].key, "A");
}

struct CountingSource {
    inner: FileTableSource,
    reads: Cell<usize>,
}

impl TableSource for CountingSource {
    fn read(&self, path: &Path) -> Result<TabularData, LoadError> {
        self.reads.set(self.reads.get() + 1);
        self.inner.read(path)
    }
}

#[test]
fn load_service_caches_tables_per_path() {
    let temp_dir = unique_test_dir("cache");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("pnb.csv");
    fs::write(
        &csv_path,
        "Pedido,Quantidade Impressa,Usuário,Impressora,Etiqueta\n1,10,ana,ZT410,A\n",
    )
    .expect("should write csv fixture");
    let missing_path = temp_dir.join("rchlo.csv");

    let source = Arc::new(CountingSource {
        inner: FileTableSource,
        reads: Cell::new(0),
    });
    let mut service = LoadService::new(source.clone());

    let first = service.load(&csv_path).expect("first load should succeed");
    let second = service.load(&csv_path).expect("second load should succeed");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.reads.get(), 1);

    assert!(matches!(service.load(&missing_path), Err(LoadError::NotFound(_))));
    assert!(!service.cache().contains(&missing_path));
    fs::write(
        &missing_path,
        "Pedido,Quantidade Impressa,Usuário,Impressora,Etiqueta\n2,5,bia,ZT230,B\n",
    )
    .expect("should write second fixture");
    service
        .load(&missing_path)
        .expect("load should succeed once the file exists");
    assert_eq!(service.cache().len(), 2);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_source_reads_semicolon_files_and_dates() {
    let temp_dir = unique_test_dir("csv-source");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("centauro.csv");
    fs::write(
        &csv_path,
        "Pedido;Quantidade Impressa;Usuário;Impressora;Etiqueta;Data\n\
         10;100;ana;ZT410;Camiseta;05/01/2024\n\
         11;50;bia;ZT230;Tênis;06/01/2024 14:30\n\
         ;;;;;\n",
    )
    .expect("should write csv fixture");

    let data = FileTableSource.read(&csv_path).expect("csv should be read");
    let table = ProductionTable::from_tabular(data).expect("table should be valid");
    let resolution = resolve_dates(&table);

    assert_eq!(table.len(), 2, "blank rows should be skipped");
    assert_eq!(resolution.column.as_deref(), Some("Data"));
    assert_eq!(resolution.dropped_rows, 0);
    assert_eq!(summarize(&resolution.table).total_printed, 150.0);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn file_source_rejects_unknown_extensions() {
    let temp_dir = unique_test_dir("unsupported");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("dados.txt");
    fs::write(&path, "Pedido\n1\n").expect("should write fixture");

    assert!(matches!(
        FileTableSource.read(&path),
        Err(LoadError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        FileTableSource.read(&temp_dir.join("ausente.xlsx")),
        Err(LoadError::NotFound(_))
    ));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn xlsx_export_can_be_read_back() {
    let temp_dir = unique_test_dir("xlsx-export");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("dados_filtrados.xlsx");
    let table = scenario_table();
    let service = ExportService::new(Arc::new(FileTableSink));

    service.export(&table, &path).expect("export should succeed");
    let data = FileTableSource.read(&path).expect("exported workbook should be readable");

    assert_eq!(data.columns, headers());
    assert_eq!(data.rows.len(), 3);
    assert_eq!(data.rows[0][0], CellValue::Number(1.0));
    assert_eq!(data.rows[0][4], text("A"));
    assert_eq!(data.rows[0][5], CellValue::DateTime(datetime(2024, 1, 5)));
    assert!(!temp_dir.join("dados_filtrados.xlsx.partial").exists());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_export_keeps_column_order_and_dates() {
    let temp_dir = unique_test_dir("csv-export");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("dados_filtrados.csv");
    let table = scenario_table();

    FileTableSink.write(&table, &path).expect("export should succeed");
    let written = fs::read_to_string(&path).expect("should read export");
    let mut lines = written.lines();

    assert_eq!(
        lines.next(),
        Some("Pedido,Quantidade Impressa,Usuário,Impressora,Etiqueta,Data Produção")
    );
    assert_eq!(lines.next(), Some("1,10,ana,ZT410,A,05/01/2024"));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn failed_export_leaves_no_file() {
    let temp_dir = unique_test_dir("export-failure");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let table = scenario_table();

    let unsupported = temp_dir.join("dados.pdf");
    assert!(matches!(
        FileTableSink.write(&table, &unsupported),
        Err(ExportError::UnsupportedFormat(_))
    ));
    assert!(!unsupported.exists());

    let unreachable = temp_dir.join("sem-pasta").join("dados.xlsx");
    assert!(matches!(
        FileTableSink.write(&table, &unreachable),
        Err(ExportError::Io { .. })
    ));
    assert!(!unreachable.exists());
    assert!(!temp_dir.join("sem-pasta").join("dados.xlsx.partial").exists());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn group_keys_keep_surrounding_whitespace() {
    let table = undated_table(vec![
        row(1.0, 7.0, "ana", "ZT410", "A", CellValue::Empty),
        row(2.0, 3.0, "ana", "ZT410", "A ", CellValue::Empty),
        row(3.0, 2.0, "ana", "ZT410", "a", CellValue::Empty),
    ]);

    let by_label = group_and_sum(&table, LABEL_COLUMN, QUANTITY_COLUMN)
        .expect("label grouping should succeed");

    assert_eq!(by_label.len(), 3);
    assert_eq!(by_label.get("A"), Some(7.0));
    assert_eq!(by_label.get("A "), Some(3.0));
    assert_eq!(by_label.get("a"), Some(2.0));
}

#[test]
fn order_ids_differing_by_whitespace_are_distinct() {
    let mut first = row(0.0, 1.0, "ana", "ZT410", "A", CellValue::Empty);
    first[0] = text("P-10");
    let mut second = row(0.0, 1.0, "ana", "ZT410", "A", CellValue::Empty);
    second[0] = text("P-10 ");
    let table = undated_table(vec![first, second]);

    assert_eq!(summarize(&table).distinct_orders, 2);
}

#[test]
fn numeric_and_text_cells_with_same_rendering_share_a_key() {
    let mut text_order = row(0.0, 4.0, "ana", "ZT410", "1", CellValue::Empty);
    text_order[0] = text("1");
    let table = undated_table(vec![
        row(1.0, 6.0, "ana", "ZT410", "1", CellValue::Empty),
        text_order,
    ]);

    let by_label = group_by_dimension(&table, Dimension::Label);

    assert_eq!(summarize(&table).distinct_orders, 1);
    assert_eq!(by_label.len(), 1);
    assert_eq!(by_label.get("1"), Some(10.0));
}

#[test]
fn xlsx_export_keeps_time_of_day_and_early_dates() {
    let temp_dir = unique_test_dir("xlsx-dates");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("datas.xlsx");
    let afternoon = date(2024, 1, 5).and_hms_opt(14, 30, 0).expect("valid time");
    let table = ProductionTable::from_tabular(TabularData {
        columns: headers(),
        rows: vec![
            row(1.0, 1.0, "ana", "ZT410", "A", CellValue::DateTime(afternoon)),
            row(2.0, 1.0, "ana", "ZT410", "A", CellValue::DateTime(datetime(1900, 1, 1))),
        ],
    })
    .expect("table should be valid");

    FileTableSink.write(&table, &path).expect("export should succeed");
    let data = FileTableSource.read(&path).expect("exported workbook should be readable");

    let expected = [afternoon, datetime(1900, 1, 1)];
    assert_eq!(data.rows.len(), expected.len());
    for (row, expected) in data.rows.iter().zip(expected) {
        let exported = row[5].as_datetime().expect("date cell should stay a date");
        let drift = (exported - expected).num_milliseconds().abs();
        assert!(drift <= 1, "exported {exported} for {expected}");
    }

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn detail_rows_are_capped_but_export_is_complete() {
    let temp_dir = unique_test_dir("detail-cap");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("dados_filtrados.csv");
    let rows = (0..12)
        .map(|idx| row(idx as f64, 1.0, "ana", "ZT410", "A", CellValue::Empty))
        .collect();
    let table = undated_table(rows);

    let detail = DetailRows::from_table(&table, 5);
    assert_eq!(detail.cells.len(), 5);
    assert_eq!(detail.total, 12);
    assert_eq!(detail.cells[0][0], "0");
    assert_eq!(detail.caption().as_deref(), Some("Mostrando 5 de 12 registros"));

    let full = DetailRows::from_table(&table, DETAIL_ROW_LIMIT);
    assert_eq!(full.cells.len(), 12);
    assert_eq!(full.caption(), None);

    FileTableSink.write(&table, &path).expect("export should succeed");
    let written = fs::read_to_string(&path).expect("should read export");
    assert_eq!(written.lines().count(), 13);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn default_config_lists_reference_accounts() {
    let config = DashboardConfig::with_data_dir("dados");

    assert_eq!(config.top_n, 15);
    assert_eq!(config.accounts.len(), 3);
    let riachuelo = config.account("Riachuelo").expect("account should exist");
    assert_eq!(riachuelo.file, Path::new("dados").join("Relatório_RCHLO.xlsx"));
}

#[test]
fn accounts_file_overrides_reference_accounts() {
    let temp_dir = unique_test_dir("accounts");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let accounts_path = temp_dir.join("contas.csv");
    let data_dir = temp_dir.join("dados");

    fs::write(
        &accounts_path,
        "conta,arquivo\nRenner, Relatorio_RENNER.xlsx \nC&A,/srv/relatorios/cea.xlsx\n",
    )
    .expect("should write accounts fixture");
    let accounts = read_accounts_file(&accounts_path, &data_dir).expect("should parse accounts");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].name, "Renner");
    assert_eq!(accounts[0].file, data_dir.join("Relatorio_RENNER.xlsx"));
    assert_eq!(accounts[1].file, PathBuf::from("/srv/relatorios/cea.xlsx"));

    fs::write(&accounts_path, "conta,arquivo\n").expect("should write empty fixture");
    assert!(matches!(
        read_accounts_file(&accounts_path, &data_dir),
        Err(ConfigError::NoAccounts(_))
    ));

    fs::write(&accounts_path, "conta,arquivo\nRenner,\n").expect("should write broken fixture");
    assert!(matches!(
        read_accounts_file(&accounts_path, &data_dir),
        Err(ConfigError::IncompleteAccount { row: 2 })
    ));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn current_selector_follows_filter_controls() {
    let unset = current_selector(FilterMode::Range, None, None, QuickPeriod::Today)
        .expect("unset pickers should be valid");
    assert_eq!(unset, DateRangeSelector::Explicit(ExplicitRange::full()));

    let quick = current_selector(
        FilterMode::Quick,
        Some(date(2024, 2, 1)),
        Some(date(2024, 1, 1)),
        QuickPeriod::ThisMonth,
    )
    .expect("quick mode ignores pickers");
    assert_eq!(quick, DateRangeSelector::Quick(QuickPeriod::ThisMonth));

    let inverted = current_selector(
        FilterMode::Range,
        Some(date(2024, 2, 1)),
        Some(date(2024, 1, 1)),
        QuickPeriod::Today,
    );
    assert!(matches!(inverted, Err(FilterError::InvertedRange { .. })));
}
