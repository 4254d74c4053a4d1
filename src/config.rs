use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::domain::errors::ConfigError;

pub const DEFAULT_TOP_N: usize = 15;
pub const DEFAULT_DATA_DIR: &str = "dados";
pub const DATA_DIR_ENV: &str = "PRODUCAO_BUREAU_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "PRODUCAO_BUREAU_LOG";
pub const ACCOUNTS_FILE: &str = "contas.csv";

const DEFAULT_ACCOUNTS: [(&str, &str); 3] = [
    ("Pernambucanas", "Relatório_PNB.xlsx"),
    ("Riachuelo", "Relatório_RCHLO.xlsx"),
    ("Centauro", "Relatório_CENTAURO.xlsx"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub accounts: Vec<Account>,
    pub top_n: usize,
}

impl DashboardConfig {
    /// Reference accounts under `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let accounts = DEFAULT_ACCOUNTS
            .iter()
            .map(|(name, file)| Account {
                name: name.to_string(),
                file: data_dir.join(file),
            })
            .collect();
        Self {
            data_dir,
            accounts,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        let data_dir = env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let mut config = Self::with_data_dir(data_dir);

        if let Some(accounts_path) = accounts_file_path().filter(|path| path.exists()) {
            config.accounts = read_accounts_file(&accounts_path, &config.data_dir)?;
            tracing::info!(
                path = %accounts_path.display(),
                accounts = config.accounts.len(),
                "loaded accounts file"
            );
        }
        Ok(config)
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name == name)
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("br", "bureau", "producao-bureau")
}

pub fn accounts_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(ACCOUNTS_FILE))
}

/// Reads `conta,arquivo` rows; relative files resolve against `data_dir`.
pub fn read_accounts_file(path: &Path, data_dir: &Path) -> Result<Vec<Account>, ConfigError> {
    let read_error = |source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_error)?;

    let mut accounts = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(read_error)?;
        let name = record.get(0).unwrap_or_default();
        let file = record.get(1).unwrap_or_default();
        if name.is_empty() || file.is_empty() {
            return Err(ConfigError::IncompleteAccount { row: idx + 2 });
        }
        accounts.push(Account {
            name: name.to_string(),
            file: data_dir.join(file),
        });
    }

    if accounts.is_empty() {
        return Err(ConfigError::NoAccounts(path.to_path_buf()));
    }
    Ok(accounts)
}

pub fn log_level() -> tracing::Level {
    env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| value.trim().parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO)
}
