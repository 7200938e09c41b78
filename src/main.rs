use tokio::net::TcpListener;

use quill::{AppState, CmsError, Config, logger::Logger, router};

#[tokio::main]
async fn main() -> Result<(), CmsError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env();
    std::fs::create_dir_all(&config.data_dir)?;

    let state = AppState::new(&config);
    let app = router(state);

    let addr = config.socket_addr();
    log::info!("quill listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(CmsError::from)
}
