use chrono::NaiveDate;
use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::selector::{DateRangeSelector, ExplicitRange, QuickPeriod};
use crate::domain::entities::summary::Dimension;
use crate::domain::errors::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Range,
    Quick,
}

pub struct AppState {
    pub selected_account: Signal<usize>,
    pub filter_mode: Signal<FilterMode>,
    pub range_start: Signal<Option<NaiveDate>>,
    pub range_end: Signal<Option<NaiveDate>>,
    pub quick_period: Signal<QuickPeriod>,
    pub active_tab: Signal<Dimension>,
    pub busy: Signal<bool>,
    pub status: Signal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            selected_account: use_signal(|| 0_usize),
            filter_mode: use_signal(|| FilterMode::Range),
            range_start: use_signal(|| None::<NaiveDate>),
            range_end: use_signal(|| None::<NaiveDate>),
            quick_period: use_signal(|| QuickPeriod::Today),
            active_tab: use_signal(|| Dimension::Operator),
            busy: use_signal(|| false),
            status: use_signal(|| None::<String>),
        }
    }
}

/// Selector for the current controls. An unset picker spans the whole
/// table; the filter clamps it to the observed dates.
pub fn current_selector(
    mode: FilterMode,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    period: QuickPeriod,
) -> Result<DateRangeSelector, FilterError> {
    match mode {
        FilterMode::Quick => Ok(DateRangeSelector::Quick(period)),
        FilterMode::Range => {
            let full = ExplicitRange::full();
            ExplicitRange::new(start.unwrap_or(full.start()), end.unwrap_or(full.end()))
                .map(DateRangeSelector::Explicit)
        }
    }
}
