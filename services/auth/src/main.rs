use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use cinenight_auth::config::AuthConfig;
use cinenight_auth::infra::mailer::HttpMailer;
use cinenight_auth::infra::sweeper::spawn_code_sweeper;
use cinenight_auth::router::build_router;
use cinenight_auth::state::AppState;
use cinenight_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AuthConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;
    let mailer = HttpMailer::new(&config.mail)?;

    let state = AppState {
        db,
        mailer,
        jwt_secret: config.jwt_secret,
        reset_code_ttl: config.reset_code_ttl,
    };

    spawn_code_sweeper(state.code_store(), config.sweep_interval);

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!(
        %addr,
        reset_code_ttl_secs = config.reset_code_ttl.num_seconds(),
        "auth service listening"
    );
    axum::serve(listener, router).await.context("server error")
}
