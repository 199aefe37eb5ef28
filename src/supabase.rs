use once_cell::sync::OnceCell;

use crate::client::SupabaseClient;
use crate::config::SupabaseConfig;
use crate::error::{Result, SupabaseError};

static CLIENT: OnceCell<SupabaseClient> = OnceCell::new();

/// Returns the process-wide client, building it from the environment on
/// first use.
///
/// Every successful call returns the same instance. A failed build leaves
/// nothing behind, so the next call tries again.
pub fn get_client() -> Result<&'static SupabaseClient> {
    CLIENT.get_or_try_init(|| {
        let client = SupabaseClient::new(SupabaseConfig::from_env()?)?;
        log::info!("Supabase client initialized for {}", client.url());
        Ok(client)
    })
}

/// Installs the process-wide client from an explicit config.
pub fn init_client(config: SupabaseConfig) -> Result<&'static SupabaseClient> {
    let client = SupabaseClient::new(config)?;
    CLIENT
        .set(client)
        .map_err(|_| SupabaseError::AlreadyInitialized)?;
    log::info!("Supabase client installed");
    CLIENT.get().ok_or(SupabaseError::AlreadyInitialized)
}
