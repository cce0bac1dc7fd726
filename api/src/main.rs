//! SAPBridge API Server
//!
//! A marketplace backend connecting enterprises with SAP consulting firms:
//! onboarding wizards, project postings, quotations, provider due diligence,
//! contract generation, and bidirectional reviews.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    BureauClient, PostgresClientProfileRepository, PostgresContractRepository,
    PostgresDueDiligenceRepository, PostgresProjectRepository, PostgresProviderProfileRepository,
    PostgresQuotationRepository, PostgresReviewRepository, PostgresSessionRepository,
    PostgresUserRepository,
};
use app::{
    AccountService, ContractService, DueDiligenceService, OnboardingService, ProjectService,
    QuotationService, ReviewService,
};
use config::Config;
use domain::ports::VerificationBureau;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<PostgresUserRepository, PostgresSessionRepository>>,
    pub onboarding_service:
        Arc<OnboardingService<PostgresClientProfileRepository, PostgresProviderProfileRepository>>,
    pub project_service:
        Arc<ProjectService<PostgresProjectRepository, PostgresClientProfileRepository>>,
    pub quotation_service: Arc<
        QuotationService<
            PostgresQuotationRepository,
            PostgresProjectRepository,
            PostgresProviderProfileRepository,
        >,
    >,
    pub due_diligence_service: Arc<
        DueDiligenceService<
            PostgresDueDiligenceRepository,
            PostgresQuotationRepository,
            PostgresProjectRepository,
            PostgresProviderProfileRepository,
        >,
    >,
    pub contract_service: Arc<
        ContractService<
            PostgresContractRepository,
            PostgresQuotationRepository,
            PostgresProjectRepository,
            PostgresDueDiligenceRepository,
        >,
    >,
    pub review_service: Arc<ReviewService<PostgresReviewRepository, PostgresContractRepository>>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Public router used by the health smoke test
#[cfg(test)]
pub fn health_router() -> Router {
    Router::new().route("/health", get(health))
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sapbridge_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SAPBridge API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connected");

    // Create adapters
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let session_repo = Arc::new(PostgresSessionRepository::new(db.clone()));
    let client_profile_repo = Arc::new(PostgresClientProfileRepository::new(db.clone()));
    let provider_profile_repo = Arc::new(PostgresProviderProfileRepository::new(db.clone()));
    let project_repo = Arc::new(PostgresProjectRepository::new(db.clone()));
    let quotation_repo = Arc::new(PostgresQuotationRepository::new(db.clone()));
    let report_repo = Arc::new(PostgresDueDiligenceRepository::new(db.clone()));
    let contract_repo = Arc::new(PostgresContractRepository::new(db.clone()));
    let review_repo = Arc::new(PostgresReviewRepository::new(db.clone()));

    // Live bureau only when an API key is configured; otherwise every
    // report uses simulated scores.
    let bureau: Option<Arc<dyn VerificationBureau>> = if config.verifier_enabled() {
        Some(Arc::new(BureauClient::new(
            config.verifier_url.clone(),
            config.verifier_api_key.clone(),
        )))
    } else {
        tracing::warn!("No verification bureau API key set, due diligence will be simulated");
        None
    };

    // Create application services
    let account_service = Arc::new(AccountService::new(
        user_repo.clone(),
        session_repo.clone(),
        config.session_ttl_hours,
    ));
    let onboarding_service = Arc::new(OnboardingService::new(
        client_profile_repo.clone(),
        provider_profile_repo.clone(),
    ));
    let project_service = Arc::new(ProjectService::new(
        project_repo.clone(),
        client_profile_repo.clone(),
    ));
    let quotation_service = Arc::new(QuotationService::new(
        quotation_repo.clone(),
        project_repo.clone(),
        provider_profile_repo.clone(),
    ));
    let due_diligence_service = Arc::new(DueDiligenceService::new(
        report_repo.clone(),
        quotation_repo.clone(),
        project_repo.clone(),
        provider_profile_repo.clone(),
        bureau,
    ));
    let contract_service = Arc::new(ContractService::new(
        contract_repo.clone(),
        quotation_repo.clone(),
        project_repo.clone(),
        report_repo.clone(),
    ));
    let review_service = Arc::new(ReviewService::new(review_repo.clone(), contract_repo.clone()));

    // Create app state
    let state = AppState {
        account_service,
        onboarding_service,
        project_service,
        quotation_service,
        due_diligence_service,
        contract_service,
        review_service,
        config: config.clone(),
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    // (SmartIpKeyExtractor requires X-Forwarded-For headers from reverse proxy)
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("Failed to build governor config"),
    );

    // Rate-limited routes (signup, login)
    let rate_limited_routes = Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public endpoints
        .route("/projects", get(handlers::list_open_projects))
        .route("/projects/:id", get(handlers::get_project))
        .route("/users/:id/reviews", get(handlers::list_user_reviews))
        .route("/users/:id/rating-card", get(handlers::get_rating_card))
        .route(
            "/users/:id/review-analytics",
            get(handlers::get_review_analytics),
        )
        // Merge rate-limited routes
        .merge(rate_limited_routes)
        // Protected routes
        .nest(
            "/",
            Router::new()
                .route("/auth/logout", post(handlers::logout))
                .route("/me", get(handlers::me))
                // Onboarding wizards
                .route("/onboarding/client/start", post(handlers::start_client))
                .route(
                    "/onboarding/client/step",
                    post(handlers::submit_client_step),
                )
                .route("/onboarding/client", get(handlers::client_status))
                .route(
                    "/onboarding/client/complete",
                    post(handlers::complete_client),
                )
                .route("/onboarding/provider/start", post(handlers::start_provider))
                .route(
                    "/onboarding/provider/step",
                    post(handlers::submit_provider_step),
                )
                .route("/onboarding/provider", get(handlers::provider_status))
                .route(
                    "/onboarding/provider/complete",
                    post(handlers::complete_provider),
                )
                // Projects
                .route("/projects", post(handlers::create_project))
                .route("/projects/my", get(handlers::list_my_projects))
                .route("/projects/:id/cancel", post(handlers::cancel_project))
                // Quotations
                .route(
                    "/projects/:id/quotations",
                    post(handlers::submit_quotation).get(handlers::list_project_quotations),
                )
                .route("/quotations/my", get(handlers::list_my_quotations))
                .route("/quotations/:id/accept", post(handlers::accept_quotation))
                .route("/quotations/:id/reject", post(handlers::reject_quotation))
                .route(
                    "/quotations/:id/withdraw",
                    post(handlers::withdraw_quotation),
                )
                // Due diligence
                .route("/due-diligence/run", post(handlers::run_due_diligence))
                .route(
                    "/quotations/:id/due-diligence",
                    get(handlers::get_due_diligence),
                )
                // Contracts
                .route("/contracts/create", post(handlers::create_contract))
                .route("/contracts/my", get(handlers::list_my_contracts))
                .route("/contracts/:id", get(handlers::get_contract))
                .route("/contracts/:id/sign", post(handlers::sign_contract))
                .route(
                    "/contracts/:id/milestones/:seq/pay",
                    post(handlers::pay_milestone),
                )
                .route("/contracts/:id/complete", post(handlers::complete_contract))
                .route(
                    "/contracts/:id/terminate",
                    post(handlers::terminate_contract),
                )
                // Reviews
                .route("/reviews", post(handlers::create_review))
                .route("/reviews/my-reviews", get(handlers::list_my_reviews))
                .route("/reviews/eligible", get(handlers::list_eligible_contracts))
                .route("/reviews/:id/vote", post(handlers::vote_on_review))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::session_middleware,
                )),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
