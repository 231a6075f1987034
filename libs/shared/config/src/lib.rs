use std::env;
use tracing::warn;

pub const DEFAULT_SESSION_PATIENT_ID: &str = "patient-001";
pub const DEFAULT_SESSION_PROVIDER_ID: &str = "provider-001";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Tenant prefix injected at process start, read from `PROJECT_PREFIX`.
    /// `None` resolves tables to their bare logical names.
    pub project_prefix: Option<String>,
    /// Stand-in identities used until the portal has real sessions.
    pub session_patient_id: String,
    pub session_provider_id: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            project_prefix: env::var("PROJECT_PREFIX").ok(),
            session_patient_id: env::var("PORTAL_PATIENT_ID")
                .unwrap_or_else(|_| DEFAULT_SESSION_PATIENT_ID.to_string()),
            session_provider_id: env::var("PORTAL_PROVIDER_ID")
                .unwrap_or_else(|_| DEFAULT_SESSION_PROVIDER_ID.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        if !config.is_configured() {
            warn!("Supabase credentials are missing - store calls will fail until SUPABASE_URL and SUPABASE_ANON_PUBLIC_KEY are set");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            project_prefix: None,
            session_patient_id: DEFAULT_SESSION_PATIENT_ID.to_string(),
            session_provider_id: DEFAULT_SESSION_PROVIDER_ID.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
