pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod supabase;

pub use client::SupabaseClient;
pub use config::SupabaseConfig;
pub use error::{Result, SupabaseError};
pub use provider::ClientProvider;
pub use supabase::{get_client, init_client};
