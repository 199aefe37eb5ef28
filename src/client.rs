use std::fmt;
use std::sync::Arc;

use postgrest::{Builder, Postgrest};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde::Serialize;

use crate::config::SupabaseConfig;
use crate::error::{Result, SupabaseError};

const REST_PATH: &str = "rest/v1";
const AUTH_PATH: &str = "auth/v1";
const STORAGE_PATH: &str = "storage/v1";
const FUNCTIONS_PATH: &str = "functions/v1";
const REALTIME_PATH: &str = "realtime/v1";

const CLIENT_INFO: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

struct ClientInner {
    config: SupabaseConfig,
    base_url: String,
    realtime_url: String,
    storage_key: String,
    rest: Postgrest,
    http: reqwest::Client,
}

/// Handle to a Supabase project.
///
/// Cloning is cheap and every clone refers to the same underlying client.
/// Building one performs no network I/O.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<ClientInner>,
}

impl SupabaseClient {
    /// Builds a client for the project described by `config`.
    ///
    /// # Errors
    ///
    /// Fails when the URL or key is empty, when the URL is not an absolute
    /// `http`/`https` URL, or when the key or an extra header cannot be sent
    /// as an HTTP header.
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let url = config.url.trim();
        if url.is_empty() {
            return Err(SupabaseError::UrlRequired);
        }

        let mut parsed = Url::parse(url).map_err(|e| SupabaseError::InvalidUrl(e.to_string()))?;
        let realtime_scheme = match parsed.scheme() {
            "http" => "ws",
            "https" => "wss",
            other => {
                return Err(SupabaseError::InvalidUrl(format!("unsupported scheme '{}'", other)));
            }
        };
        let host = parsed
            .host_str()
            .ok_or_else(|| SupabaseError::InvalidUrl("missing host".to_string()))?;
        let project_ref = host.split('.').next().unwrap_or(host);
        let storage_key = format!("sb-{}-auth-token", project_ref);

        if config.anon_key.is_empty() {
            return Err(SupabaseError::KeyRequired);
        }

        parsed.set_query(None);
        parsed.set_fragment(None);
        let base_url = parsed.as_str().trim_end_matches('/').to_string();

        parsed
            .set_scheme(realtime_scheme)
            .map_err(|_| SupabaseError::InvalidUrl("cannot derive realtime URL".to_string()))?;
        let realtime_url = format!("{}/{}", parsed.as_str().trim_end_matches('/'), REALTIME_PATH);

        let headers = default_headers(&config)?;

        let bearer = format!("Bearer {}", config.anon_key);
        let mut rest = Postgrest::new(format!("{}/{}", base_url, REST_PATH))
            .insert_header("apikey", &config.anon_key)
            .insert_header("authorization", &bearer)
            .insert_header("x-client-info", CLIENT_INFO);
        for (name, value) in &config.headers {
            rest = rest.insert_header(*name, value);
        }
        if let Some(schema) = &config.schema {
            rest = rest.schema(schema.clone());
        }

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        log::debug!("Supabase client created for {}", base_url);

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                base_url,
                realtime_url,
                storage_key,
                rest,
                http,
            }),
        })
    }

    /// PostgREST client with the project's key headers applied.
    pub fn rest(&self) -> &Postgrest {
        &self.inner.rest
    }

    /// Starts a query against `table`.
    pub fn from(&self, table: impl AsRef<str>) -> Builder {
        self.inner.rest.from(table)
    }

    /// Starts a call to the Postgres function `function`, sending `params`
    /// as its JSON body.
    pub fn rpc<P: Serialize>(&self, function: &str, params: &P) -> Result<Builder> {
        let body = serde_json::to_string(params)?;
        Ok(self.inner.rest.rpc(function, body))
    }

    /// HTTP client for the non-REST services. Sends the same key headers
    /// as [`rest`](Self::rest).
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.inner.config
    }

    /// Project URL without a trailing slash.
    pub fn url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn rest_url(&self) -> String {
        format!("{}/{}", self.inner.base_url, REST_PATH)
    }

    pub fn auth_url(&self) -> String {
        format!("{}/{}", self.inner.base_url, AUTH_PATH)
    }

    pub fn storage_url(&self) -> String {
        format!("{}/{}", self.inner.base_url, STORAGE_PATH)
    }

    pub fn functions_url(&self) -> String {
        format!("{}/{}", self.inner.base_url, FUNCTIONS_PATH)
    }

    pub fn realtime_url(&self) -> &str {
        &self.inner.realtime_url
    }

    /// Key under which an auth session for this project is persisted.
    pub fn storage_key(&self) -> &str {
        &self.inner.storage_key
    }

    /// True when both handles point at the same client.
    pub fn same_instance(&self, other: &SupabaseClient) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("url", &self.inner.base_url)
            .field("schema", &self.inner.config.schema)
            .finish_non_exhaustive()
    }
}

fn header_value(name: &str, value: &str, sensitive: bool) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(value).map_err(|_| SupabaseError::InvalidHeader(name.to_string()))?;
    value.set_sensitive(sensitive);
    Ok(value)
}

// Postgrest panics on header names and values it cannot parse, so everything
// is checked here first.
fn default_headers(config: &SupabaseConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert("apikey", header_value("apikey", &config.anon_key, true)?);
    headers.insert(
        "authorization",
        header_value("authorization", &format!("Bearer {}", config.anon_key), true)?,
    );
    headers.insert("x-client-info", HeaderValue::from_static(CLIENT_INFO));

    for (name, value) in &config.headers {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(SupabaseError::InvalidHeader(name.to_string()));
        }
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| SupabaseError::InvalidHeader(name.to_string()))?;
        headers.insert(header_name, header_value(name, value, false)?);
    }

    Ok(headers)
}
