use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studykit::config::Settings;
use studykit::state::AppState;
use studykit::{db, handlers};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "studykit=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = Settings::load();

  let pool = match db::init_db(&settings.database_path) {
    Ok(pool) => pool,
    Err(e) => {
      tracing::error!("Failed to initialize database at {}: {}", settings.database_path.display(), e);
      std::process::exit(1);
    }
  };

  let app = handlers::router(AppState::new(pool, settings.due_card_limit));

  let bind_addr = settings.bind_addr();
  let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
    Ok(listener) => listener,
    Err(e) => {
      tracing::error!("Failed to bind to {}: {}", bind_addr, e);
      std::process::exit(1);
    }
  };

  tracing::info!("Server running on http://{}", bind_addr);

  if let Err(e) = axum::serve(listener, app).await {
    tracing::error!("Server error: {}", e);
    std::process::exit(1);
  }
}
