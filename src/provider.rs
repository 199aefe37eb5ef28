use crate::client::SupabaseClient;
use crate::config::SupabaseConfig;
use crate::error::Result;

/// Owns the one client an application builds at startup and hands it to
/// whatever needs it.
///
/// Build it once in the bootstrap code and pass it (or clones of the client)
/// to consumers instead of reaching for [`get_client`](crate::get_client).
#[derive(Clone, Debug)]
pub struct ClientProvider {
    client: SupabaseClient,
}

impl ClientProvider {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let client = SupabaseClient::new(config)?;
        Ok(Self { client })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(SupabaseConfig::from_env()?)
    }

    /// The shared client. Same instance on every call.
    pub fn client(&self) -> &SupabaseClient {
        &self.client
    }
}

impl From<SupabaseClient> for ClientProvider {
    fn from(client: SupabaseClient) -> Self {
        Self { client }
    }
}
