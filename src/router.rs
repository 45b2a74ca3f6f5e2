use crate::handlers::{
    categories::{create_category, get_categories, seed_default_categories},
    dashboard::{get_category_breakdown, get_dashboard_stats, get_spending_trend},
    expenses::{create_expense, delete_expense, get_expenses},
    health::health_check,
    recurring::{create_recurring_expense, delete_recurring_expense, get_recurring_expenses},
    reports::get_monthly_report,
    users::{create_user, delete_user, get_user, get_users},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User CRUD routes (seam for the external auth service)
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        // Category routes
        .route("/api/v1/categories", get(get_categories))
        .route("/api/v1/categories", post(create_category))
        .route("/api/v1/categories/defaults", post(seed_default_categories))
        // One-off expense routes
        .route("/api/v1/expenses", post(create_expense))
        .route("/api/v1/expenses", get(get_expenses))
        .route("/api/v1/expenses/:expense_id", delete(delete_expense))
        // Recurring expense routes
        .route("/api/v1/recurring-expenses", post(create_recurring_expense))
        .route("/api/v1/recurring-expenses", get(get_recurring_expenses))
        .route(
            "/api/v1/recurring-expenses/:recurring_id",
            delete(delete_recurring_expense),
        )
        // Dashboard aggregation routes
        .route("/api/v1/dashboard/stats", get(get_dashboard_stats))
        .route("/api/v1/dashboard/trend", get(get_spending_trend))
        .route("/api/v1/dashboard/breakdown", get(get_category_breakdown))
        // Monthly report routes
        .route("/api/v1/reports/monthly", get(get_monthly_report))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
