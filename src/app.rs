use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use dioxus::prelude::*;
use rfd::FileDialog;

use crate::config::DashboardConfig;
use crate::domain::aggregate::format_number;
use crate::domain::entities::selector::{DateRangeSelector, ExplicitRange, QuickPeriod};
use crate::domain::entities::summary::{Dimension, GroupSum};
use crate::infra::export::{FileTableSink, DEFAULT_EXPORT_NAME};
use crate::infra::import::FileTableSource;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::detail::{DetailRows, DETAIL_ROW_LIMIT};
use crate::ui::state::app_state::{current_selector, AppState, FilterMode};
use crate::usecase::services::dashboard_service::{build_view, DashboardView};
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::load_service::LoadService;

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
const EMPTY_KEY_LABEL: &str = "(vazio)";

fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, INPUT_DATE_FORMAT).ok()
}

fn display_key(key: &str) -> String {
    if key.is_empty() {
        EMPTY_KEY_LABEL.to_string()
    } else {
        key.to_string()
    }
}

#[component]
fn MetricCard(label: String, value: String, #[props(default)] detail: String) -> Element {
    rsx! {
        div {
            style: "flex: 1; border-left: 4px solid #4e8cff; padding: 12px 16px; border-radius: 4px; height: 135px; display: flex; flex-direction: column; justify-content: space-between; background: #f8faff;",
            div { style: "font-size: 0.95rem; color: #496157;", "{label}" }
            if !detail.is_empty() {
                div {
                    style: "font-size: 0.95rem; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                    title: "{detail}",
                    "{detail}"
                }
            }
            div { style: "font-size: 1.5rem; font-weight: bold;", "{value}" }
        }
    }
}

#[component]
fn BarChart(title: String, groups: Vec<GroupSum>) -> Element {
    let max_total = groups
        .iter()
        .map(|group| group.total)
        .fold(0.0_f64, f64::max);

    rsx! {
        div {
            style: "padding: 8px 0;",
            h4 { "{title}" }
            if groups.is_empty() {
                p { style: "color: #888;", "Sem dados para o período selecionado" }
            }
            {groups.iter().map(|group| {
                let width = if max_total > 0.0 { group.total / max_total * 100.0 } else { 0.0 };
                let key = display_key(&group.key);
                let formatted = group.formatted.clone();
                rsx!(
                    div {
                        style: "display: flex; align-items: center; gap: 8px; margin: 4px 0;",
                        title: "{key}\nQuantidade: {formatted}",
                        span {
                            style: "width: 220px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                            "{key}"
                        }
                        div {
                            style: "flex: 1; background: #eef2f7; border-radius: 3px;",
                            div {
                                style: "width: {width:.2}%; background: #4e8cff; height: 22px; border-radius: 3px;",
                            }
                        }
                        span { style: "width: 110px; text-align: right;", "{formatted}" }
                    }
                )
            })}
        }
    }
}

#[component]
fn DataTable(columns: Vec<String>, rows: Vec<Vec<String>>) -> Element {
    rsx! {
        div {
            style: "max-height: 400px; overflow: auto; border: 1px solid #ddd;",
            table {
                style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        {columns.iter().map(|header| rsx!(
                            th {
                                style: "position: sticky; top: 0; background: #f4f6f8; padding: 6px 10px; text-align: left; border-bottom: 1px solid #ccc; white-space: nowrap;",
                                "{header}"
                            }
                        ))}
                    }
                }
                tbody {
                    {rows.iter().map(|row| rsx!(
                        tr {
                            {row.iter().map(|value| rsx!(
                                td { style: "padding: 4px 10px; border-bottom: 1px solid #eee; white-space: nowrap;", "{value}" }
                            ))}
                        }
                    ))}
                }
            }
        }
    }
}


#[component]
pub fn App() -> Element {
    let config = use_hook(|| DashboardConfig::load().map_err(|err| err.to_string()));
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {err}");
            return rsx! {
                div {
                    p { "Erro de configuração: {err}" }
                }
            };
        }
    };

    let AppState {
        mut selected_account,
        mut filter_mode,
        mut range_start,
        mut range_end,
        mut quick_period,
        mut active_tab,
        mut busy,
        mut status,
    } = AppState::new();

    let load_service =
        use_hook(|| Rc::new(RefCell::new(LoadService::new(Arc::new(FileTableSource)))));
    let export_service = use_hook(|| Rc::new(ExportService::new(Arc::new(FileTableSink))));

    let Some(account) = config.accounts.get(selected_account()).cloned() else {
        return rsx! {
            div {
                p { "Nenhuma conta configurada" }
            }
        };
    };

    let load_result =
        run_blocking("load account", || load_service.borrow_mut().load(&account.file));
    let today = Local::now().date_naive();

    let mut filter_error = None::<String>;
    let view: Option<Rc<DashboardView>> = load_result.as_ref().ok().map(|table| {
        let selector = current_selector(filter_mode(), range_start(), range_end(), quick_period())
            .unwrap_or_else(|err| {
                filter_error = Some(err.to_string());
                DateRangeSelector::Explicit(ExplicitRange::full())
            });
        Rc::new(build_view(table, &selector, today, config.top_n))
    });
    let load_error = load_result.as_ref().err().map(|err| err.to_string());

    let account_options: Vec<(usize, String)> = config
        .accounts
        .iter()
        .enumerate()
        .map(|(idx, account)| (idx, account.name.clone()))
        .collect();
    let current_account = selected_account();
    let mode = filter_mode();
    let period = quick_period();
    let bounds = view.as_ref().and_then(|view| view.bounds);
    let has_date_column = view
        .as_ref()
        .is_some_and(|view| view.date_column.is_some());
    let start_value = range_start()
        .or(bounds.map(|b| b.min))
        .map(|date| date.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_default();
    let end_value = range_end()
        .or(bounds.map(|b| b.max))
        .map(|date| date.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_default();
    let min_value = bounds
        .map(|b| b.min.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_default();
    let max_value = bounds
        .map(|b| b.max.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_default();
    let tab = active_tab();
    let status_message = status();

    let detail_rows = view
        .as_ref()
        .map(|view| DetailRows::from_table(&view.filtered, DETAIL_ROW_LIMIT))
        .unwrap_or_default();
    let view_for_export = view.clone();
    let export_service_for_click = export_service.clone();

    rsx! {
        div {
            style: "font-family: sans-serif; display: flex; min-height: 100vh;",

            aside {
                style: "width: 280px; padding: 16px; background: #f4f6f8; display: flex; flex-direction: column; gap: 12px;",
                h3 { "Painel de Controle" }

                label { "Selecione a conta:" }
                select {
                    disabled: busy(),
                    onchange: move |evt: Event<FormData>| {
                        if let Ok(idx) = evt.value().parse::<usize>() {
                            selected_account.set(idx);
                            range_start.set(None);
                            range_end.set(None);
                            status.set(None);
                        }
                    },
                    for (idx, name) in account_options.iter() {
                        option {
                            value: "{idx}",
                            selected: *idx == current_account,
                            "{name}"
                        }
                    }
                }

                if has_date_column {
                    h4 { "Filtro Temporal" }
                    div {
                        style: "display: flex; gap: 15px;",
                        label {
                            input {
                                r#type: "radio",
                                name: "filtro",
                                checked: mode == FilterMode::Range,
                                onchange: move |_| filter_mode.set(FilterMode::Range),
                            }
                            " Intervalo"
                        }
                        label {
                            input {
                                r#type: "radio",
                                name: "filtro",
                                checked: mode == FilterMode::Quick,
                                onchange: move |_| filter_mode.set(FilterMode::Quick),
                            }
                            " Rápido"
                        }
                    }

                    if mode == FilterMode::Range {
                        label {
                            "Data inicial "
                            input {
                                r#type: "date",
                                value: "{start_value}",
                                min: "{min_value}",
                                max: "{max_value}",
                                onchange: move |evt: Event<FormData>| {
                                    range_start.set(parse_input_date(&evt.value()))
                                },
                            }
                        }
                        label {
                            "Data final "
                            input {
                                r#type: "date",
                                value: "{end_value}",
                                min: "{min_value}",
                                max: "{max_value}",
                                onchange: move |evt: Event<FormData>| {
                                    range_end.set(parse_input_date(&evt.value()))
                                },
                            }
                        }
                    } else {
                        label { "Período rápido:" }
                        select {
                            onchange: move |evt: Event<FormData>| {
                                if let Some(period) = QuickPeriod::from_key(&evt.value()) {
                                    quick_period.set(period);
                                }
                            },
                            for option_period in QuickPeriod::ALL {
                                option {
                                    value: "{option_period.key()}",
                                    selected: option_period == period,
                                    "{option_period.label()}"
                                }
                            }
                        }
                    }
                }

                if let Some(err) = filter_error {
                    p { style: "color: #b00020;", "{err}" }
                }
            }

            main {
                style: "flex: 1; padding: 16px 24px; overflow: auto;",
                h2 { style: "color: #2c3e50;", "PRODUÇÃO BUREAU | {account.name}" }
                hr {}

                if let Some(err) = load_error {
                    p { style: "color: #b00020;", "Erro ao carregar arquivo: {err}" }
                }

                if let Some(view) = view {
                    {view.warnings.iter().map(|warning| rsx!(
                        p { style: "color: #8a6d00;", "⚠️ {warning}" }
                    ))}

                    div {
                        style: "display: flex; gap: 16px;",
                        MetricCard {
                            label: "Pedidos Impressos".to_string(),
                            value: format_number(view.metrics.distinct_orders as f64),
                        }
                        MetricCard {
                            label: "Quantidade Impressa".to_string(),
                            value: format_number(view.metrics.total_printed),
                        }
                        MetricCard {
                            label: "Top Tag".to_string(),
                            value: format_number(view.metrics.top_label_quantity),
                            detail: view
                                .metrics
                                .top_label
                                .as_deref()
                                .map(display_key)
                                .unwrap_or_else(|| "Sem etiqueta".to_string()),
                        }
                    }
                    hr {}

                    div {
                        style: "display: flex; gap: 8px;",
                        for dimension in Dimension::ALL {
                            button {
                                style: if dimension == tab { "font-weight: bold; border-bottom: 2px solid #4e8cff;" } else { "" },
                                onclick: move |_| active_tab.set(dimension),
                                "{dimension.tab_title()}"
                            }
                        }
                    }
                    if let Some(breakdown) = view.breakdown(tab) {
                        BarChart {
                            title: breakdown.dimension.chart_title().to_string(),
                            groups: breakdown.chart.clone(),
                        }
                    }
                    hr {}

                    h3 { "Dados Detalhados" }
                    DataTable {
                        columns: detail_rows.columns.clone(),
                        rows: detail_rows.cells.clone(),
                    }
                    if let Some(caption) = detail_rows.caption() {
                        p { style: "color: #666; font-size: 0.9rem;", "{caption}" }
                    }

                    button {
                        style: "margin-top: 12px; width: 100%; padding: 8px; border-radius: 4px;",
                        disabled: busy(),
                        onclick: move |_| {
                            let Some(view) = view_for_export.clone() else {
                                return;
                            };
                            let Some(path) = FileDialog::new()
                                .set_file_name(DEFAULT_EXPORT_NAME)
                                .add_filter("Excel", &["xlsx"])
                                .add_filter("CSV", &["csv"])
                                .save_file() else {
                                status.set(Some("Exportação cancelada".to_string()));
                                return;
                            };
                            busy.set(true);
                            let result = run_blocking("export table", || {
                                export_service_for_click.export(&view.filtered, &path)
                            });
                            status.set(Some(match result {
                                Ok(()) => format!("Exportado para {}", path.display()),
                                Err(err) => format!("Falha na exportação: {err}"),
                            }));
                            busy.set(false);
                        },
                        "Exportar para Excel"
                    }
                }

                if let Some(message) = status_message {
                    p { "{message}" }
                }
            }
        }
    }
}
