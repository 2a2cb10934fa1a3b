#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cronograma::{AppConfig, MemoryTaskStore, http_api::AppState};

    env_logger::Builder::default()
        .filter_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let config = AppConfig::from_env()?;

    let state = match &config.task_db {
        #[cfg(feature = "sqlite")]
        Some(path) => {
            log::info!("storing tasks in {}", path.display());
            AppState::new(cronograma::SqliteTaskStore::new(path)?)
        }
        #[cfg(not(feature = "sqlite"))]
        Some(path) => {
            log::warn!(
                "ignoring {}: built without the `sqlite` feature",
                path.display()
            );
            AppState::new(MemoryTaskStore::new())
        }
        None => AppState::new(MemoryTaskStore::new()),
    };

    println!("cronograma task API listening on http://{}", config.http_addr);
    cronograma::http_api::serve(config.http_addr, state).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
