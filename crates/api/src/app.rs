use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::FeedbackAnalyzer;

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_api_key,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    branding, categories, feedback, health, moderation, notifications, questions, tags, track,
    webhooks,
};
use crate::services::{GeminiAnalyzer, Notifier, WebhookFanout};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub analyzer: Arc<dyn FeedbackAnalyzer>,
    pub notifier: Notifier,
    pub webhooks: Arc<WebhookFanout>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Rate limiting is active when rate_limit_per_minute > 0
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let analyzer: Arc<dyn FeedbackAnalyzer> = Arc::new(GeminiAnalyzer::new(&config.ai));
    let notifier = Notifier::new(pool.clone(), &config.portal.base_url);
    let webhooks = Arc::new(WebhookFanout::new(&config.security.api_key));

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
        analyzer,
        notifier,
        webhooks,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Gated routes (require the shared API key when one is configured)
    // Middleware order: auth runs first, then rate limiting
    let gated_routes = Router::new()
        // Feedback intake and dashboard reads
        .route(
            "/api/feedback",
            get(feedback::list_feedback).post(feedback::submit_feedback),
        )
        .route(
            "/api/feedback/:id",
            get(feedback::get_feedback).patch(feedback::patch_feedback),
        )
        .route("/api/feedback/:id/notes", post(feedback::add_admin_note))
        // Moderation queue
        .route("/api/moderation/queue", get(moderation::get_queue))
        .route("/api/moderation/stats", get(moderation::get_stats))
        .route("/api/moderation/bulk", post(moderation::bulk_moderate))
        .route(
            "/api/moderation/:id",
            patch(moderation::update_moderation_status),
        )
        // Reference data configuration
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/:id",
            patch(categories::update_category).delete(categories::delete_category),
        )
        .route("/api/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/api/tags/:id",
            patch(tags::update_tag).delete(tags::delete_tag),
        )
        .route(
            "/api/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/api/questions/:id",
            patch(questions::update_question).delete(questions::delete_question),
        )
        // Branding upsert (reads are public)
        .route("/api/branding", put(branding::update_branding))
        // Notification channel settings
        .route(
            "/api/settings/notifications",
            get(notifications::list_settings),
        )
        .route(
            "/api/settings/notifications/telegram/test",
            post(notifications::test_telegram),
        )
        .route(
            "/api/settings/notifications/:channel",
            put(notifications::upsert_setting),
        )
        // Advisory webhook registry
        .route(
            "/api/webhooks",
            get(webhooks::list_webhooks).post(webhooks::register_webhook),
        )
        // Rate limiting runs after auth
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    // Tracking portal routes: the access code is the credential
    let tracking_routes = Router::new()
        .route("/api/track", post(track::track_feedback))
        .route(
            "/api/track/clarifications/:id",
            post(track::respond_to_clarification),
        );

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/api/branding", get(branding::get_branding))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(tracking_routes)
        .merge(gated_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
