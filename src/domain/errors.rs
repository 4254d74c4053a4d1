use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("arquivo não encontrado: {}", .0.display())]
    NotFound(PathBuf),

    #[error("formato de arquivo não suportado: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("falha ao ler planilha {}: {message}", .path.display())]
    Workbook { path: PathBuf, message: String },

    #[error("falha ao ler csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("planilha sem cabeçalho")]
    EmptySheet,

    #[error("coluna obrigatória ausente: {0}")]
    MissingColumn(String),

    #[error("quantidade impressa inválida na linha {row}: {value}")]
    InvalidQuantity { row: usize, value: String },

    #[error("quantidade impressa negativa na linha {row}: {value}")]
    NegativeQuantity { row: usize, value: f64 },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("formato de exportação não suportado: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("falha ao gerar xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("falha ao gerar csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("tabela grande demais para exportar ({rows} linhas, {columns} colunas)")]
    TooLarge { rows: usize, columns: usize },

    #[error("falha ao gravar {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("data inicial {start} posterior à data final {end}")]
    InvertedRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("falha ao ler {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("arquivo de contas vazio: {}", .0.display())]
    NoAccounts(PathBuf),

    #[error("linha {row} do arquivo de contas incompleta")]
    IncompleteAccount { row: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("coluna desconhecida: {0}")]
    UnknownColumn(String),
}
