use axum::{extract::State, http::StatusCode, response::Json};
use sea_orm::{ActiveModelTrait, DbErr, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use model::entities::category::{self, CategoryKind};

use crate::auth::CurrentUser;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request structure for creating a user-defined category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// The name of the category (unique within the user's set)
    pub name: String,
    /// Category kind: FIXED or VARIABLE
    pub kind: String,
    /// Icon identifier rendered by the client
    pub icon: String,
    /// Optional display color used by charts
    pub color: Option<String>,
}

/// Response structure for category operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub kind: String,
    pub icon: String,
    pub color: Option<String>,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: model.kind.as_str().to_string(),
            icon: model.icon,
            color: model.color,
        }
    }
}

/// Response for the default-taxonomy seeding endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedDefaultsResponse {
    /// How many default categories were inserted by this call
    pub inserted: u64,
}

// Helper function to parse a kind string to the CategoryKind enum
fn parse_category_kind(kind_str: &str) -> Result<CategoryKind, String> {
    match kind_str {
        "FIXED" => Ok(CategoryKind::Fixed),
        "VARIABLE" => Ok(CategoryKind::Variable),
        _ => Err(format!(
            "Invalid category kind: {}. Valid kinds are: FIXED, VARIABLE",
            kind_str
        )),
    }
}

/// Seed the default category taxonomy for the current user
///
/// Invoked once at onboarding; safe to repeat. Names the user already
/// has are skipped, so calling this twice never creates duplicates.
#[utoipa::path(
    post,
    path = "/api/v1/categories/defaults",
    tag = "categories",
    responses(
        (status = 200, description = "Default categories seeded", body = ApiResponse<SeedDefaultsResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn seed_default_categories(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<SeedDefaultsResponse>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Seeding default categories for user {}", user.id);

    match compute::categories::ensure_defaults_seeded(&state.db, user.id).await {
        Ok(inserted) => {
            info!("Seeded {} default categories for user {}", inserted, user.id);
            Ok(Json(ApiResponse {
                data: SeedDefaultsResponse {
                    inserted: inserted as u64,
                },
                message: "Default categories seeded".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            error!("Failed to seed default categories for user {}: {}", user.id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to seed default categories".to_string(),
                    code: "ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get the current user's categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "List of the user's categories", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Fetching categories for user {}", user.id);

    match compute::categories::list_categories(&state.db, user.id).await {
        Ok(categories) => {
            info!("Retrieved {} categories for user {}", categories.len(), user.id);
            Ok(Json(ApiResponse {
                data: categories.into_iter().map(CategoryResponse::from).collect(),
                message: "Categories retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            error!("Failed to fetch categories for user {}: {}", user.id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch categories".to_string(),
                    code: "ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Create a user-defined category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Creating category '{}' for user {}", request.name, user.id);

    if request.name.trim().is_empty() {
        warn!("Rejecting category with empty name");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Category name must not be empty".to_string(),
                code: "INVALID_NAME".to_string(),
                success: false,
            }),
        ));
    }

    let kind = match parse_category_kind(&request.kind) {
        Ok(kind) => kind,
        Err(message) => {
            warn!("Rejecting category with invalid kind: {}", request.kind);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: message,
                    code: "INVALID_KIND".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let new_category = category::ActiveModel {
        user_id: Set(user.id),
        name: Set(request.name.clone()),
        kind: Set(kind),
        icon: Set(request.icon.clone()),
        color: Set(request.color.clone()),
        ..Default::default()
    };

    match new_category.insert(&state.db).await {
        Ok(category_model) => {
            info!(
                "Category created successfully with ID: {} for user {}",
                category_model.id, user.id
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: CategoryResponse::from(category_model),
                    message: "Category created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(DbErr::Exec(exec_err))
            if exec_err.to_string().to_lowercase().contains("unique") =>
        {
            warn!(
                "Category name '{}' already exists for user {}",
                request.name, user.id
            );
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Category with name '{}' already exists", request.name),
                    code: "DUPLICATE_CATEGORY".to_string(),
                    success: false,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create category: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create category".to_string(),
                    code: "ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
