use wattwise::{ Config, Result };
use axum::{ Router, routing::{ delete, get, post, put } };
use migration::MigratorTrait;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "wattwise=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; missing credentials fail fast here, before any I/O.
    let config = Config::from_env().map_err(|e| wattwise::AppError::Config(e.to_string()))?;

    // Initialize database connection
    let db = sea_orm::Database
        ::connect(&config.database_url).await
        .map_err(wattwise::AppError::Database)?;

    tracing::info!("Database connected successfully");

    // Run migrations
    migration::Migrator::up(&db, None).await.map_err(wattwise::AppError::Database)?;

    tracing::info!("Migrations completed successfully");

    // Initialize mailer and identity lookup
    let mailer = Arc::new(wattwise::mailer::Mailer::new(&config.smtp_url, &config.alert_from_email)?);
    let identity = Arc::new(
        wattwise::identity::IdentityService::new(
            config.auth_api_url.clone(),
            config.auth_service_key.clone()
        )
    );

    // Initialize services
    let search_service = Arc::new(
        wattwise::services::PlanSearchService::new(
            db.clone(),
            config.upstream_api_base.clone(),
            config.drop_invalid_plans
        )
    );
    let profile_service = Arc::new(wattwise::services::ProfileService::new(db.clone()));
    let tracking_service = Arc::new(wattwise::services::TrackingService::new(db.clone()));

    let alert_checker = Arc::new(
        wattwise::alert_checker::AlertChecker::new(
            db.clone(),
            mailer.clone(),
            identity.clone(),
            config.alert_retention_days
        )
    );

    // Background loops: alert evaluation and retention sweep
    tokio::spawn(alert_checker.clone().run(config.alert_check_interval_secs));
    tokio::spawn(alert_checker.clone().run_sweeper(config.sweep_interval_secs));

    // Create app state
    let app_state = wattwise::api::AppState::new(
        search_service,
        profile_service,
        tracking_service,
        alert_checker,
        mailer,
        config.bug_report_email.clone()
    );

    // Build application router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/plans/search", post(wattwise::api::plans::search_plans))
        .route("/api/profile/{user_id}", get(wattwise::api::profile::get_profile))
        .route("/api/profile/{user_id}", put(wattwise::api::profile::save_profile))
        .route("/api/alerts", post(wattwise::api::alerts::create_alert))
        .route("/api/alerts/{user_id}", get(wattwise::api::alerts::list_alerts))
        .route("/api/alerts/{user_id}/history", get(wattwise::api::alerts::alert_history))
        .route("/api/alerts/{user_id}/{alert_id}", delete(wattwise::api::alerts::delete_alert))
        .route("/api/jobs/check-alerts", post(wattwise::api::jobs::check_alerts))
        .route("/api/jobs/sweep-alerts", post(wattwise::api::jobs::sweep_alerts))
        .route("/api/bug-report", post(wattwise::api::jobs::bug_report))
        .with_state(app_state)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| wattwise::AppError::Internal(e.to_string()))?;

    axum::serve(listener, app).await.map_err(|e| wattwise::AppError::Internal(e.to_string()))?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
