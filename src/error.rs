use thiserror::Error;

pub type Result<T> = std::result::Result<T, SupabaseError>;

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVar(String),

    #[error("supabaseUrl is required.")]
    UrlRequired,

    #[error("supabaseKey is required.")]
    KeyRequired,

    #[error("Invalid supabaseUrl: Must be a valid HTTP or HTTPS URL. ({0})")]
    InvalidUrl(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to serialize rpc params: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Supabase client is already initialized")]
    AlreadyInitialized,
}
