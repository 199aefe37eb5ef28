use env_logger::Env;
use supabase_provider::ClientProvider;

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let provider = match ClientProvider::from_env() {
        Ok(provider) => provider,
        Err(e) => {
            log::error!("Failed to create Supabase client: {}", e);
            return Err(e.into());
        }
    };

    let client = provider.client();
    log::info!("Supabase project: {}", client.url());
    log::info!("rest:      {}", client.rest_url());
    log::info!("auth:      {}", client.auth_url());
    log::info!("storage:   {}", client.storage_url());
    log::info!("functions: {}", client.functions_url());
    log::info!("realtime:  {}", client.realtime_url());
    log::info!("session storage key: {}", client.storage_key());

    Ok(())
}
