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
use model::entities::daily_expense::{self, PaymentMode};

use crate::auth::CurrentUser;
use crate::handlers::categories::CategoryResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for recording a one-off expense
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateExpenseRequest {
    /// Amount spent (must be positive)
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Calendar day of the expense
    pub date: NaiveDate,
    /// Optional free-text note
    pub note: Option<String>,
    /// Category the expense belongs to (must be owned by the caller)
    pub category_id: i32,
    /// Payment mode: CASH, CARD or UPI (defaults to UPI)
    pub payment_mode: Option<String>,
}

/// One-off expense response model, joined with its category
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: i32,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub payment_mode: String,
    pub category: Option<CategoryResponse>,
}

impl ExpenseResponse {
    fn from_joined(model: daily_expense::Model, category: Option<category::Model>) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            date: model.date,
            note: model.note,
            payment_mode: model.payment_mode.as_str().to_string(),
            category: category.map(CategoryResponse::from),
        }
    }
}

// Helper function to parse a payment mode string to the PaymentMode enum
fn parse_payment_mode(mode_str: &str) -> Result<PaymentMode, String> {
    match mode_str {
        "CASH" => Ok(PaymentMode::Cash),
        "CARD" => Ok(PaymentMode::Card),
        "UPI" => Ok(PaymentMode::Upi),
        _ => Err(format!(
            "Invalid payment mode: {}. Valid modes are: CASH, CARD, UPI",
            mode_str
        )),
    }
}

/// Record a one-off expense
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    tag = "expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense recorded successfully", body = ApiResponse<ExpenseResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_expense(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_expense function");
    debug!(
        "Creating expense of {} on {} for user {}",
        request.amount, request.date, user.id
    );

    if request.amount <= Decimal::ZERO {
        warn!("Rejecting expense with non-positive amount {}", request.amount);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Amount must be positive".to_string(),
                code: "INVALID_AMOUNT".to_string(),
                success: false,
            }),
        ));
    }

    let payment_mode = match request.payment_mode.as_deref() {
        None => PaymentMode::Upi,
        Some(raw) => match parse_payment_mode(raw) {
            Ok(mode) => mode,
            Err(message) => {
                warn!("Rejecting expense with invalid payment mode: {}", raw);
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: message,
                        code: "INVALID_PAYMENT_MODE".to_string(),
                        success: false,
                    }),
                ));
            }
        },
    };

    // The category must exist and belong to the caller. An id owned by
    // someone else gets the same answer as one that does not exist.
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
                    error: "Failed to add expense".to_string(),
                    code: "ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    // The owner id comes from the session, never from the client.
    let new_expense = daily_expense::ActiveModel {
        user_id: Set(user.id),
        category_id: Set(request.category_id),
        amount: Set(request.amount),
        date: Set(request.date),
        note: Set(request.note.clone()),
        payment_mode: Set(payment_mode),
        ..Default::default()
    };

    match new_expense.insert(&state.db).await {
        Ok(expense_model) => {
            info!(
                "Expense created successfully with ID: {} for user {}",
                expense_model.id, user.id
            );
            let response = ApiResponse {
                data: ExpenseResponse::from_joined(expense_model, Some(category)),
                message: "Expense recorded successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create expense for user {}: {}", user.id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add expense".to_string(),
                    code: "ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get the current user's one-off expenses
///
/// Ordered newest date first, each joined with its category.
#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    tag = "expenses",
    responses(
        (status = 200, description = "Expenses retrieved successfully", body = ApiResponse<Vec<ExpenseResponse>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expenses(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<ExpenseResponse>>>, StatusCode> {
    trace!("Entering get_expenses function for user {}", user.id);

    match daily_expense::Entity::find()
        .filter(daily_expense::Column::UserId.eq(user.id))
        .order_by_desc(daily_expense::Column::Date)
        .find_also_related(category::Entity)
        .all(&state.db)
        .await
    {
        Ok(expenses) => {
            let expense_count = expenses.len();
            debug!("Retrieved {} expenses for user {}", expense_count, user.id);

            let expense_responses: Vec<ExpenseResponse> = expenses
                .into_iter()
                .map(|(expense, category)| ExpenseResponse::from_joined(expense, category))
                .collect();

            info!("Successfully retrieved {} expenses", expense_count);
            let response = ApiResponse {
                data: expense_responses,
                message: "Expenses retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve expenses for user {}: {}",
                user.id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a one-off expense
///
/// The expense must belong to the caller; an id owned by another user
/// is reported as the same generic failure as a missing id.
#[utoipa::path(
    delete,
    path = "/api/v1/expenses/{expense_id}",
    tag = "expenses",
    params(
        ("expense_id" = i32, Path, description = "Expense ID"),
    ),
    responses(
        (status = 200, description = "Expense deleted successfully", body = ApiResponse<String>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_expense(
    Path(expense_id): Path<i32>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering delete_expense function for expense_id: {}",
        expense_id
    );

    // Deleting by id alone would let a caller remove another user's
    // record by guessing ids; the owner match is part of the key.
    match daily_expense::Entity::delete_many()
        .filter(daily_expense::Column::Id.eq(expense_id))
        .filter(daily_expense::Column::UserId.eq(user.id))
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
                    "Expense {} deleted successfully for user {}",
                    expense_id, user.id
                );
                let response = ApiResponse {
                    data: format!("Expense {} deleted", expense_id),
                    message: "Expense deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Expense {} not deleted for user {} (no rows affected)",
                    expense_id, user.id
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
            error!("Failed to delete expense {}: {}", expense_id, db_error);
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
