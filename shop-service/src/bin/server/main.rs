use std::sync::Arc;

use auth::Authenticator;
use shop_service::config::Config;
use shop_service::domain::auth::service::AuthService;
use shop_service::domain::business::service::BusinessService;
use shop_service::domain::product::service::ProductService;
use shop_service::domain::user::service::UserService;
use shop_service::domain::verification::ports::ConfirmationSender;
use shop_service::domain::verification::service::VerificationGate;
use shop_service::inbound::http::router::create_router;
use shop_service::inbound::http::router::AppState;
use shop_service::outbound::email::LoggingConfirmationSender;
use shop_service::outbound::email::SmtpConfirmationSender;
use shop_service::outbound::repositories::PostgresBusinessRepository;
use shop_service::outbound::repositories::PostgresProductRepository;
use shop_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "shop-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        jwt_expiration_minutes = config.jwt.expiration_minutes,
        enforce_expiry = config.jwt.enforce_expiry,
        verification_url = %config.verification.base_url,
        verification_expiration_minutes = config.verification.expiration_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::with_handler(config.jwt_handler()?));
    let link_authenticator = Arc::new(Authenticator::with_handler(config.verification_handler()?));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let business_repository = Arc::new(PostgresBusinessRepository::new(pg_pool.clone()));
    let product_repository = Arc::new(PostgresProductRepository::new(pg_pool));

    let confirmation_sender: Arc<dyn ConfirmationSender> = match &config.email.smtp_host {
        Some(host) => {
            tracing::info!(smtp_host = %host, smtp_port = config.email.smtp_port, "Mailing confirmation links");
            Arc::new(SmtpConfirmationSender::new(
                host,
                config.email.smtp_port,
                &config.email.username,
                &config.email.password,
                &config.email.from_address,
                &config.email.from_name,
            )?)
        }
        None => {
            tracing::warn!("No SMTP host configured; confirmation links will only be logged");
            Arc::new(LoggingConfirmationSender::new())
        }
    };

    let verification_gate = Arc::new(VerificationGate::new(
        Arc::clone(&user_repository),
        confirmation_sender,
        link_authenticator,
        config.confirmation_url()?,
    ));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&verification_gate),
        )),
        auth_service: Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        verification_gate,
        business_service: Arc::new(BusinessService::new(Arc::clone(&business_repository))),
        product_service: Arc::new(ProductService::new(
            product_repository,
            business_repository,
            user_repository,
        )),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    tracing::info!("Server exited");
    Ok(())
}
