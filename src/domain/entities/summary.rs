use crate::domain::entities::table::{
    ProductionSchema, LABEL_COLUMN, OPERATOR_COLUMN, PRINTER_COLUMN,
};

/// Chart breakdowns shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Operator,
    Printer,
    Label,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Operator, Dimension::Printer, Dimension::Label];

    pub fn column(self) -> &'static str {
        match self {
            Dimension::Operator => OPERATOR_COLUMN,
            Dimension::Printer => PRINTER_COLUMN,
            Dimension::Label => LABEL_COLUMN,
        }
    }

    pub fn column_index(self, schema: &ProductionSchema) -> usize {
        match self {
            Dimension::Operator => schema.operator,
            Dimension::Printer => schema.printer,
            Dimension::Label => schema.label,
        }
    }

    pub fn tab_title(self) -> &'static str {
        match self {
            Dimension::Operator => "Por Operador",
            Dimension::Printer => "Por Impressora",
            Dimension::Label => "Por Etiqueta",
        }
    }

    pub fn chart_title(self) -> &'static str {
        match self {
            Dimension::Operator => "Desempenho por Operador",
            Dimension::Printer => "Desempenho por Impressora",
            Dimension::Label => "Desempenho por Etiqueta",
        }
    }

    /// Printers are few enough to chart in full.
    pub fn chart_limit(self, top_n: usize) -> Option<usize> {
        match self {
            Dimension::Printer => None,
            Dimension::Operator | Dimension::Label => Some(top_n),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSum {
    pub key: String,
    pub total: f64,
    pub formatted: String,
}

/// Per-group sums in grouping order (ascending key).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationResult {
    pub group_column: String,
    pub value_column: String,
    pub groups: Vec<GroupSum>,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.groups
            .iter()
            .find(|group| group.key == key)
            .map(|group| group.total)
    }

    pub fn total(&self) -> f64 {
        self.groups.iter().map(|group| group.total).sum()
    }

    /// First group holding the largest sum, `None` when there are no groups.
    pub fn max(&self) -> Option<&GroupSum> {
        self.groups.iter().fold(None, |best, group| match best {
            Some(current) if current.total >= group.total => Some(current),
            _ => Some(group),
        })
    }

    /// The `n` largest groups, descending; equal sums keep grouping order.
    pub fn top_n(&self, n: usize) -> Vec<GroupSum> {
        let mut ranked = self.groups.clone();
        ranked.sort_by(|a, b| b.total.total_cmp(&a.total));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsSummary {
    pub distinct_orders: usize,
    pub total_printed: f64,
    pub top_label: Option<String>,
    pub top_label_quantity: f64,
}
