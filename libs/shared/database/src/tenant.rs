use std::env;
use std::fmt;

use tracing::debug;

use shared_config::AppConfig;

pub const PREFIX_ENV_VAR: &str = "PROJECT_PREFIX";

/// Logical tables the portal reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Patients,
    Providers,
    Appointments,
    Prescriptions,
    MedicalRecords,
}

impl Table {
    pub fn logical_name(&self) -> &'static str {
        match self {
            Table::Patients => "patients",
            Table::Providers => "providers",
            Table::Appointments => "appointments",
            Table::Prescriptions => "prescriptions",
            Table::MedicalRecords => "medical_records",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.logical_name())
    }
}

/// Maps logical table names onto the tenant's physical tables.
///
/// The prefix is captured once, so every lookup made through the same
/// resolver yields the same physical name. A missing prefix resolves to the
/// bare logical name; tenancy is best-effort, not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableResolver {
    prefix: String,
}

impl TableResolver {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Prefers the injected prefix and falls back to `PROJECT_PREFIX`.
    /// For callers that build a resolver without an `AppConfig`.
    pub fn new(injected: Option<String>) -> Self {
        Self::from_sources(injected, env::var(PREFIX_ENV_VAR).ok())
    }

    /// `AppConfig::from_env` has already read `PROJECT_PREFIX`, so the config
    /// is the only source here; an unset prefix means no prefix.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::from_sources(config.project_prefix.clone(), None)
    }

    pub fn from_sources(injected: Option<String>, env_prefix: Option<String>) -> Self {
        let prefix = match injected {
            Some(prefix) => prefix,
            None => {
                debug!("No injected table prefix, falling back to {}", PREFIX_ENV_VAR);
                env_prefix.unwrap_or_default()
            }
        };

        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn resolve(&self, logical_name: &str) -> String {
        format!("{}{}", self.prefix, logical_name)
    }

    pub fn table(&self, table: Table) -> String {
        self.resolve(table.logical_name())
    }
}
