use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

use model::entities::category;
use model::entities::recurring_expense::{self, RecurrenceFrequency};

use crate::auth::CurrentUser;
use crate::handlers::categories::CategoryResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a recurring expense
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateRecurringExpenseRequest {
    /// Name of the obligation (e.g. "Apartment rent")
    pub name: String,
    /// Amount of each occurrence (must be positive)
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Frequency: MONTHLY or YEARLY
    pub frequency: String,
    /// First day the obligation applies
    pub start_date: NaiveDate,
    /// Last day the obligation applies; open-ended if omitted
    pub end_date: Option<NaiveDate>,
    /// Category the obligation belongs to (must be owned by the caller)
    pub category_id: i32,
    /// Optional free-text note
    pub note: Option<String>,
}

/// Recurring expense response model, joined with its category
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecurringExpenseResponse {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub note: Option<String>,
    pub category: Option<CategoryResponse>,
}

impl RecurringExpenseResponse {
    fn from_joined(model: recurring_expense::Model, category: Option<category::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            amount: model.amount,
            frequency: model.frequency.as_str().to_string(),
            start_date: model.start_date,
            end_date: model.end_date,
            note: model.note,
            category: category.map(CategoryResponse::from),
        }
    }
}

// Helper function to parse a frequency string to the RecurrenceFrequency enum
fn parse_frequency(frequency_str: &str) -> Result<RecurrenceFrequency, String> {
    match frequency_str {
        "MONTHLY" => Ok(RecurrenceFrequency::Monthly),
        "YEARLY" => Ok(RecurrenceFrequency::Yearly),
        _ => Err(format!(
            "Invalid frequency: {}. Valid frequencies are: MONTHLY, YEARLY",
            frequency_str
        )),
    }
}

/// Create a recurring expense
#[utoipa::path(
    post,
    path = "/api/v1/recurring-expenses",
    tag = "recurring",
    request_body = CreateRecurringExpenseRequest,
    responses(
        (status = 201, description = "Recurring expense created successfully", body = ApiResponse<RecurringExpenseResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_recurring_expense(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateRecurringExpenseRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<RecurringExpenseResponse>>),
    (StatusCode, Json<ErrorResponse>),
> {
    trace!("Entering create_recurring_expense function");
    debug!(
        "Creating recurring expense '{}' of {} for user {}",
        request.name, request.amount, user.id
    );

    if request.name.trim().is_empty() {
        warn!("Rejecting recurring expense with empty name");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Name must not be empty".to_string(),
                code: "INVALID_NAME".to_string(),
                success: false,
            }),
        ));
    }

    if request.amount <= Decimal::ZERO {
        warn!(
            "Rejecting recurring expense with non-positive amount {}",
            request.amount
        );
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Amount must be positive".to_string(),
                code: "INVALID_AMOUNT".to_string(),
                success: false,
            }),
        ));
    }

    let frequency = match parse_frequency(&request.frequency) {
        Ok(frequency) => frequency,
        Err(message) => {
            warn!(
                "Rejecting recurring expense with invalid frequency: {}",
                request.frequency
            );
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: message,
                    code: "INVALID_FREQUENCY".to_string(),
                    success: false,
                }),
            ));
        }
    };

    if let Some(end_date) = request.end_date {
        if end_date < request.start_date {
            warn!("Rejecting recurring expense ending before it starts");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "End date must not be before start date".to_string(),
                    code: "INVALID_DATE_RANGE".to_string(),
                    success: false,
                }),
            ));
        }
    }

    // The category must exist and belong to the caller.
    let category = match category::Entity::find_by_id(request.category_id)
        .filter(category::Column::UserId.eq(user.id))
        .one(&state.db)
        .await
    {
        Ok(Some(category)) => category,
        Ok(None) => {
            warn!(
                "Category {} not found for user {}",
                request.category_id, user.id
            );
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Category not found".to_string(),
                    code: "CATEGORY_NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to validate category: {}", db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add recurring expense".to_string(),
                    code: "ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    // The owner id comes from the session, never from the client.
    let new_recurring = recurring_expense::ActiveModel {
        user_id: Set(user.id),
        category_id: Set(request.category_id),
        name: Set(request.name.clone()),
        amount: Set(request.amount),
        frequency: Set(frequency),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        note: Set(request.note.clone()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match new_recurring.insert(&state.db).await {
        Ok(recurring_model) => {
            info!(
                "Recurring expense created successfully with ID: {} for user {}",
                recurring_model.id, user.id
            );
            let response = ApiResponse {
                data: RecurringExpenseResponse::from_joined(recurring_model, Some(category)),
                message: "Recurring expense created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create recurring expense for user {}: {}",
                user.id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add recurring expense".to_string(),
                    code: "ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get the current user's recurring expenses
///
/// Ordered newest-created first, each joined with its category.
#[utoipa::path(
    get,
    path = "/api/v1/recurring-expenses",
    tag = "recurring",
    responses(
        (status = 200, description = "Recurring expenses retrieved successfully", body = ApiResponse<Vec<RecurringExpenseResponse>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_recurring_expenses(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<RecurringExpenseResponse>>>, StatusCode> {
    trace!(
        "Entering get_recurring_expenses function for user {}",
        user.id
    );

    match recurring_expense::Entity::find()
        .filter(recurring_expense::Column::UserId.eq(user.id))
        .order_by_desc(recurring_expense::Column::CreatedAt)
        .order_by_desc(recurring_expense::Column::Id)
        .find_also_related(category::Entity)
        .all(&state.db)
        .await
    {
        Ok(recurring) => {
            let count = recurring.len();
            debug!("Retrieved {} recurring expenses for user {}", count, user.id);

            let responses: Vec<RecurringExpenseResponse> = recurring
                .into_iter()
                .map(|(expense, category)| {
                    RecurringExpenseResponse::from_joined(expense, category)
                })
                .collect();

            info!("Successfully retrieved {} recurring expenses", count);
            let response = ApiResponse {
                data: responses,
                message: "Recurring expenses retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve recurring expenses for user {}: {}",
                user.id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a recurring expense
///
/// The record must belong to the caller; an id owned by another user is
/// reported as the same generic failure as a missing id.
#[utoipa::path(
    delete,
    path = "/api/v1/recurring-expenses/{recurring_id}",
    tag = "recurring",
    params(
        ("recurring_id" = i32, Path, description = "Recurring expense ID"),
    ),
    responses(
        (status = 200, description = "Recurring expense deleted successfully", body = ApiResponse<String>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recurring expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_recurring_expense(
    Path(recurring_id): Path<i32>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering delete_recurring_expense function for recurring_id: {}",
        recurring_id
    );

    match recurring_expense::Entity::delete_many()
        .filter(recurring_expense::Column::Id.eq(recurring_id))
        .filter(recurring_expense::Column::UserId.eq(user.id))
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            debug!(
                "Delete operation completed. Rows affected: {}",
                delete_result.rows_affected
            );
            if delete_result.rows_affected > 0 {
                info!(
                    "Recurring expense {} deleted successfully for user {}",
                    recurring_id, user.id
                );
                let response = ApiResponse {
                    data: format!("Recurring expense {} deleted", recurring_id),
                    message: "Recurring expense deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Recurring expense {} not deleted for user {} (no rows affected)",
                    recurring_id, user.id
                );
                Err((
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: "Failed to delete expense".to_string(),
                        code: "DELETE_FAILED".to_string(),
                        success: false,
                    }),
                ))
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete recurring expense {}: {}",
                recurring_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete expense".to_string(),
                    code: "ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
