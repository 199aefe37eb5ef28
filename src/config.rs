//! Connection settings for a Supabase project.

use std::env;
use std::fmt;

use dotenv::dotenv;

use crate::error::{Result, SupabaseError};

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
/// Older deployments only set this one.
pub const LEGACY_KEY_VAR: &str = "SUPABASE_KEY";
pub const SCHEMA_VAR: &str = "SUPABASE_SCHEMA";

/// Endpoint and access key for a Supabase project.
///
/// Values are stored as given. Checking them is left to
/// [`SupabaseClient::new`](crate::SupabaseClient::new).
#[derive(Clone, Default)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    /// PostgREST schema. `None` means the server default (`public`).
    pub schema: Option<String>,
    /// Extra headers sent with every request. Names must be lowercase.
    pub headers: Vec<(&'static str, String)>,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            ..Default::default()
        }
    }

    /// Reads the project settings from the process environment, loading
    /// `.env` first when one is present.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let url = env::var(URL_VAR)
            .map_err(|_| SupabaseError::MissingEnvironmentVar(URL_VAR.to_string()))?;

        let anon_key = match env::var(ANON_KEY_VAR) {
            Ok(key) => key,
            Err(_) => {
                let key = env::var(LEGACY_KEY_VAR)
                    .map_err(|_| SupabaseError::MissingEnvironmentVar(ANON_KEY_VAR.to_string()))?;
                log::debug!("{} not set, using {}", ANON_KEY_VAR, LEGACY_KEY_VAR);
                key
            }
        };

        let schema = env::var(SCHEMA_VAR).ok().filter(|s| !s.is_empty());

        Ok(Self {
            url,
            anon_key,
            schema,
            headers: Vec::new(),
        })
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("schema", &self.schema)
            .field("headers", &self.headers.iter().map(|(name, _)| *name).collect::<Vec<_>>())
            .finish()
    }
}
