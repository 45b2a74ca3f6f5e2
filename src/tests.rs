#[cfg(test)]
mod integration_tests {
    use crate::handlers::categories::{CategoryResponse, CreateCategoryRequest, SeedDefaultsResponse};
    use crate::handlers::expenses::{CreateExpenseRequest, ExpenseResponse};
    use crate::handlers::recurring::{CreateRecurringExpenseRequest, RecurringExpenseResponse};
    use crate::handlers::users::CreateUserRequest;
    use crate::schemas::{ApiResponse, ErrorResponse};
    use crate::test_utils::test_utils::{
        create_test_category, create_test_expense, create_test_recurring, create_test_user,
        setup_test_app,
    };
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use chrono::{Datelike, Utc};
    use common::{CategorySlice, DashboardStats, MonthlyReport, TrendPoint};
    use model::entities::recurring_expense::RecurrenceFrequency;
    use rust_decimal::Decimal;

    fn identity(user_id: i32) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_str(&user_id.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_user() {
        let (app, _state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let create_request = CreateUserRequest {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password_hash: "hashed-credential".to_string(),
        };

        let response = server.post("/api/v1/users").json(&create_request).await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "User created successfully");
        assert_eq!(body.data["email"], "alice@example.com");
        assert!(body.data["id"].as_i64().unwrap() > 0);
        // The credential hash is never echoed back
        assert!(body.data.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_conflicts() {
        let (app, _state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let create_request = CreateUserRequest {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password_hash: "hashed-credential".to_string(),
        };

        server
            .post("/api/v1/users")
            .json(&create_request)
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.post("/api/v1/users").json(&create_request).await;

        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "EMAIL_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_create_user_rejects_malformed_email() {
        let (app, _state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let create_request = CreateUserRequest {
            email: "not-an-email".to_string(),
            name: "Alice".to_string(),
            password_hash: "hashed-credential".to_string(),
        };

        let response = server.post("/api/v1/users").json(&create_request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_EMAIL");
    }

    #[tokio::test]
    async fn test_requests_without_identity_are_unauthorized() {
        let (app, _state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        for path in [
            "/api/v1/categories",
            "/api/v1/expenses",
            "/api/v1/recurring-expenses",
            "/api/v1/dashboard/stats",
            "/api/v1/dashboard/trend",
            "/api/v1/dashboard/breakdown",
        ] {
            let response = server.get(path).await;
            response.assert_status(StatusCode::UNAUTHORIZED);
            let body: ErrorResponse = response.json();
            assert_eq!(body.code, "UNAUTHORIZED");
        }
    }

    #[tokio::test]
    async fn test_unknown_identity_is_unauthorized() {
        let (app, _state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let (name, value) = identity(4242);
        let response = server.get("/api/v1/expenses").add_header(name, value).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_seed_default_categories_is_idempotent() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;

        let (name, value) = identity(user.id);
        let first = server
            .post("/api/v1/categories/defaults")
            .add_header(name.clone(), value.clone())
            .await;
        first.assert_status(StatusCode::OK);
        let first_body: ApiResponse<SeedDefaultsResponse> = first.json();
        assert!(first_body.data.inserted > 0);

        let second = server
            .post("/api/v1/categories/defaults")
            .add_header(name.clone(), value.clone())
            .await;
        second.assert_status(StatusCode::OK);
        let second_body: ApiResponse<SeedDefaultsResponse> = second.json();
        assert_eq!(second_body.data.inserted, 0);

        let list = server
            .get("/api/v1/categories")
            .add_header(name, value)
            .await;
        list.assert_status(StatusCode::OK);
        let list_body: ApiResponse<Vec<CategoryResponse>> = list.json();
        assert_eq!(list_body.data.len() as u64, first_body.data.inserted);

        // Ordered by name ascending
        let names: Vec<&str> = list_body.data.iter().map(|c| c.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_create_category() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;

        let create_request = CreateCategoryRequest {
            name: "Pet Care".to_string(),
            kind: "VARIABLE".to_string(),
            icon: "PawPrint".to_string(),
            color: Some("#a855f7".to_string()),
        };

        let (name, value) = identity(user.id);
        let response = server
            .post("/api/v1/categories")
            .add_header(name, value)
            .json(&create_request)
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<CategoryResponse> = response.json();
        assert_eq!(body.data.name, "Pet Care");
        assert_eq!(body.data.kind, "VARIABLE");
        assert_eq!(body.data.color.as_deref(), Some("#a855f7"));
    }

    #[tokio::test]
    async fn test_create_category_duplicate_name_conflicts() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let alice = create_test_user(&state.db, "alice@example.com").await;
        let bob = create_test_user(&state.db, "bob@example.com").await;

        let create_request = CreateCategoryRequest {
            name: "Pet Care".to_string(),
            kind: "VARIABLE".to_string(),
            icon: "PawPrint".to_string(),
            color: None,
        };

        let (name, value) = identity(alice.id);
        server
            .post("/api/v1/categories")
            .add_header(name.clone(), value.clone())
            .json(&create_request)
            .await
            .assert_status(StatusCode::CREATED);

        let duplicate = server
            .post("/api/v1/categories")
            .add_header(name, value)
            .json(&create_request)
            .await;
        duplicate.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = duplicate.json();
        assert_eq!(body.code, "DUPLICATE_CATEGORY");

        // Uniqueness is per user, so the same name works for someone else
        let (bob_name, bob_value) = identity(bob.id);
        server
            .post("/api/v1/categories")
            .add_header(bob_name, bob_value)
            .json(&create_request)
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_category_rejects_invalid_kind() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;

        let create_request = CreateCategoryRequest {
            name: "Pet Care".to_string(),
            kind: "SOMETIMES".to_string(),
            icon: "PawPrint".to_string(),
            color: None,
        };

        let (name, value) = identity(user.id);
        let response = server
            .post("/api/v1/categories")
            .add_header(name, value)
            .json(&create_request)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_KIND");
    }

    #[tokio::test]
    async fn test_create_expense() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let groceries = create_test_category(&state.db, user.id, "Groceries").await;

        let create_request = CreateExpenseRequest {
            amount: Decimal::new(4550, 2), // 45.50
            date: Utc::now().date_naive(),
            note: Some("Weekly shop".to_string()),
            category_id: groceries.id,
            payment_mode: Some("CARD".to_string()),
        };

        let (name, value) = identity(user.id);
        let response = server
            .post("/api/v1/expenses")
            .add_header(name, value)
            .json(&create_request)
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<ExpenseResponse> = response.json();
        assert!(body.success);
        assert_eq!(body.data.amount, Decimal::new(4550, 2));
        assert_eq!(body.data.payment_mode, "CARD");
        assert_eq!(body.data.category.as_ref().unwrap().name, "Groceries");
    }

    #[tokio::test]
    async fn test_create_expense_defaults_to_upi() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let groceries = create_test_category(&state.db, user.id, "Groceries").await;

        let create_request = CreateExpenseRequest {
            amount: Decimal::from(20),
            date: Utc::now().date_naive(),
            note: None,
            category_id: groceries.id,
            payment_mode: None,
        };

        let (name, value) = identity(user.id);
        let response = server
            .post("/api/v1/expenses")
            .add_header(name, value)
            .json(&create_request)
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<ExpenseResponse> = response.json();
        assert_eq!(body.data.payment_mode, "UPI");
    }

    #[tokio::test]
    async fn test_create_expense_rejects_nonpositive_amount() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let groceries = create_test_category(&state.db, user.id, "Groceries").await;

        let create_request = CreateExpenseRequest {
            amount: Decimal::ZERO,
            date: Utc::now().date_naive(),
            note: None,
            category_id: groceries.id,
            payment_mode: None,
        };

        let (name, value) = identity(user.id);
        let response = server
            .post("/api/v1/expenses")
            .add_header(name, value)
            .json(&create_request)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_AMOUNT");
    }

    #[tokio::test]
    async fn test_create_expense_rejects_unknown_payment_mode() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let groceries = create_test_category(&state.db, user.id, "Groceries").await;

        let create_request = CreateExpenseRequest {
            amount: Decimal::from(20),
            date: Utc::now().date_naive(),
            note: None,
            category_id: groceries.id,
            payment_mode: Some("CHEQUE".to_string()),
        };

        let (name, value) = identity(user.id);
        let response = server
            .post("/api/v1/expenses")
            .add_header(name, value)
            .json(&create_request)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_PAYMENT_MODE");
    }

    #[tokio::test]
    async fn test_create_expense_rejects_foreign_category() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let alice = create_test_user(&state.db, "alice@example.com").await;
        let bob = create_test_user(&state.db, "bob@example.com").await;
        let bobs_category = create_test_category(&state.db, bob.id, "Groceries").await;

        // Alice tries to attach her expense to Bob's category
        let create_request = CreateExpenseRequest {
            amount: Decimal::from(20),
            date: Utc::now().date_naive(),
            note: None,
            category_id: bobs_category.id,
            payment_mode: None,
        };

        let (name, value) = identity(alice.id);
        let response = server
            .post("/api/v1/expenses")
            .add_header(name, value)
            .json(&create_request)
            .await;

        // Same answer as a category that does not exist at all
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "CATEGORY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_expenses_newest_first_and_scoped() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let alice = create_test_user(&state.db, "alice@example.com").await;
        let bob = create_test_user(&state.db, "bob@example.com").await;
        let alice_cat = create_test_category(&state.db, alice.id, "Groceries").await;
        let bob_cat = create_test_category(&state.db, bob.id, "Groceries").await;

        let today = Utc::now().date_naive();
        let yesterday = today.pred_opt().unwrap();

        create_test_expense(&state.db, alice.id, alice_cat.id, Decimal::from(10), yesterday).await;
        create_test_expense(&state.db, alice.id, alice_cat.id, Decimal::from(20), today).await;
        create_test_expense(&state.db, bob.id, bob_cat.id, Decimal::from(999), today).await;

        let (name, value) = identity(alice.id);
        let response = server.get("/api/v1/expenses").add_header(name, value).await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<ExpenseResponse>> = response.json();
        assert_eq!(body.data.len(), 2);
        // Newest date first
        assert_eq!(body.data[0].amount, Decimal::from(20));
        assert_eq!(body.data[1].amount, Decimal::from(10));
        // Joined with the category
        assert_eq!(body.data[0].category.as_ref().unwrap().name, "Groceries");
        // Bob's 999 never shows up
        assert!(body.data.iter().all(|e| e.amount != Decimal::from(999)));
    }

    #[tokio::test]
    async fn test_delete_expense_requires_ownership() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let alice = create_test_user(&state.db, "alice@example.com").await;
        let bob = create_test_user(&state.db, "bob@example.com").await;
        let alice_cat = create_test_category(&state.db, alice.id, "Groceries").await;

        let today = Utc::now().date_naive();
        let expense =
            create_test_expense(&state.db, alice.id, alice_cat.id, Decimal::from(10), today).await;

        // Bob guesses Alice's expense id
        let (bob_name, bob_value) = identity(bob.id);
        let forbidden = server
            .delete(&format!("/api/v1/expenses/{}", expense.id))
            .add_header(bob_name, bob_value)
            .await;
        forbidden.assert_status(StatusCode::NOT_FOUND);

        // Alice still has her record
        let (name, value) = identity(alice.id);
        let list = server
            .get("/api/v1/expenses")
            .add_header(name.clone(), value.clone())
            .await;
        let list_body: ApiResponse<Vec<ExpenseResponse>> = list.json();
        assert_eq!(list_body.data.len(), 1);

        // The owner can delete it
        let allowed = server
            .delete(&format!("/api/v1/expenses/{}", expense.id))
            .add_header(name.clone(), value.clone())
            .await;
        allowed.assert_status(StatusCode::OK);

        let after = server.get("/api/v1/expenses").add_header(name, value).await;
        let after_body: ApiResponse<Vec<ExpenseResponse>> = after.json();
        assert!(after_body.data.is_empty());
    }

    #[tokio::test]
    async fn test_create_recurring_expense() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let rent = create_test_category(&state.db, user.id, "Rent").await;

        let create_request = CreateRecurringExpenseRequest {
            name: "Apartment rent".to_string(),
            amount: Decimal::from(1200),
            frequency: "MONTHLY".to_string(),
            start_date: Utc::now().date_naive(),
            end_date: None,
            category_id: rent.id,
            note: None,
        };

        let (name, value) = identity(user.id);
        let response = server
            .post("/api/v1/recurring-expenses")
            .add_header(name, value)
            .json(&create_request)
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<RecurringExpenseResponse> = response.json();
        assert_eq!(body.data.name, "Apartment rent");
        assert_eq!(body.data.frequency, "MONTHLY");
        assert_eq!(body.data.end_date, None);
        assert_eq!(body.data.category.as_ref().unwrap().name, "Rent");
    }

    #[tokio::test]
    async fn test_create_recurring_expense_rejects_invalid_frequency() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let rent = create_test_category(&state.db, user.id, "Rent").await;

        let create_request = CreateRecurringExpenseRequest {
            name: "Apartment rent".to_string(),
            amount: Decimal::from(1200),
            frequency: "WEEKLY".to_string(),
            start_date: Utc::now().date_naive(),
            end_date: None,
            category_id: rent.id,
            note: None,
        };

        let (name, value) = identity(user.id);
        let response = server
            .post("/api/v1/recurring-expenses")
            .add_header(name, value)
            .json(&create_request)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_FREQUENCY");
    }

    #[tokio::test]
    async fn test_create_recurring_expense_rejects_end_before_start() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let rent = create_test_category(&state.db, user.id, "Rent").await;

        let start = Utc::now().date_naive();
        let create_request = CreateRecurringExpenseRequest {
            name: "Apartment rent".to_string(),
            amount: Decimal::from(1200),
            frequency: "MONTHLY".to_string(),
            start_date: start,
            end_date: Some(start.pred_opt().unwrap()),
            category_id: rent.id,
            note: None,
        };

        let (name, value) = identity(user.id);
        let response = server
            .post("/api/v1/recurring-expenses")
            .add_header(name, value)
            .json(&create_request)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_DATE_RANGE");
    }

    #[tokio::test]
    async fn test_get_recurring_expenses_newest_created_first() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let rent = create_test_category(&state.db, user.id, "Rent").await;
        let start = Utc::now().date_naive();

        create_test_recurring(
            &state.db,
            user.id,
            rent.id,
            Decimal::from(900),
            RecurrenceFrequency::Monthly,
            start,
        )
        .await;
        create_test_recurring(
            &state.db,
            user.id,
            rent.id,
            Decimal::from(1100),
            RecurrenceFrequency::Monthly,
            start,
        )
        .await;

        let (name, value) = identity(user.id);
        let response = server
            .get("/api/v1/recurring-expenses")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<RecurringExpenseResponse>> = response.json();
        assert_eq!(body.data.len(), 2);
        // The later insert comes back first
        assert_eq!(body.data[0].amount, Decimal::from(1100));
        assert_eq!(body.data[1].amount, Decimal::from(900));
    }

    #[tokio::test]
    async fn test_dashboard_stats_with_no_records_are_zero() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;

        let (name, value) = identity(user.id);
        let response = server
            .get("/api/v1/dashboard/stats")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<DashboardStats> = response.json();
        assert_eq!(body.data, DashboardStats::empty());
    }

    #[tokio::test]
    async fn test_dashboard_stats_amortizes_recurring() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let rent = create_test_category(&state.db, user.id, "Rent").await;
        let groceries = create_test_category(&state.db, user.id, "Groceries").await;
        let today = Utc::now().date_naive();

        create_test_recurring(
            &state.db,
            user.id,
            rent.id,
            Decimal::from(300),
            RecurrenceFrequency::Monthly,
            today.with_day(1).unwrap(),
        )
        .await;
        create_test_expense(&state.db, user.id, groceries.id, Decimal::from(50), today).await;

        let (name, value) = identity(user.id);
        let response = server
            .get("/api/v1/dashboard/stats")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<DashboardStats> = response.json();
        assert_eq!(body.data.fixed_daily_cost, Decimal::from(10));
        assert_eq!(body.data.todays_variable, Decimal::from(50));
        assert_eq!(body.data.total_daily_spend, Decimal::from(60));
        assert_eq!(body.data.recurring_count, 1);
    }

    #[tokio::test]
    async fn test_spending_trend_merges_same_day() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let groceries = create_test_category(&state.db, user.id, "Groceries").await;
        let today = Utc::now().date_naive();

        create_test_expense(&state.db, user.id, groceries.id, Decimal::from(50), today).await;
        create_test_expense(&state.db, user.id, groceries.id, Decimal::from(30), today).await;

        let (name, value) = identity(user.id);
        let response = server
            .get("/api/v1/dashboard/trend")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<TrendPoint>> = response.json();
        // Two same-day expenses collapse into one point; zero days are
        // not synthesized.
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0].amount, Decimal::from(80));
    }

    #[tokio::test]
    async fn test_category_breakdown_sorted_descending() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let groceries = create_test_category(&state.db, user.id, "Groceries").await;
        let fuel = create_test_category(&state.db, user.id, "Fuel").await;
        let today = Utc::now().date_naive();

        create_test_expense(&state.db, user.id, groceries.id, Decimal::from(40), today).await;
        create_test_expense(&state.db, user.id, fuel.id, Decimal::from(120), today).await;

        let (name, value) = identity(user.id);
        let response = server
            .get("/api/v1/dashboard/breakdown")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<CategorySlice>> = response.json();
        assert_eq!(body.data.len(), 2);
        assert_eq!(body.data[0].name, "Fuel");
        assert_eq!(body.data[0].value, Decimal::from(120));
        assert_eq!(body.data[1].name, "Groceries");
        for pair in body.data.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
    }

    #[tokio::test]
    async fn test_monthly_report_consolidates_categories() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;
        let dining = create_test_category(&state.db, user.id, "Dining Out").await;
        let insurance = create_test_category(&state.db, user.id, "Insurance").await;

        // Fixed, past month so the assertions are independent of "now"
        create_test_expense(
            &state.db,
            user.id,
            dining.id,
            Decimal::from(40),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
        )
        .await;
        create_test_recurring(
            &state.db,
            user.id,
            insurance.id,
            Decimal::from(1200),
            RecurrenceFrequency::Yearly,
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .await;

        let (name, value) = identity(user.id);
        let response = server
            .get("/api/v1/reports/monthly?year=2025&month=3")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<MonthlyReport> = response.json();
        // 40 one-off plus 1200/12 recurring
        assert_eq!(body.data.total_spend, Decimal::from(140));
        assert_eq!(body.data.pie_data.len(), 2);
        // Sorted by value descending; "Dining Out" consolidates to "Food"
        assert_eq!(body.data.pie_data[0].name, "Insurance");
        assert_eq!(body.data.pie_data[0].value, Decimal::from(100));
        assert_eq!(body.data.pie_data[1].name, "Food");
        assert_eq!(body.data.pie_data[1].value, Decimal::from(40));
    }

    #[tokio::test]
    async fn test_monthly_report_rejects_invalid_month() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let user = create_test_user(&state.db, "alice@example.com").await;

        let (name, value) = identity(user.id);
        let response = server
            .get("/api/v1/reports/monthly?year=2025&month=13")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_MONTH");
    }

    #[tokio::test]
    async fn test_monthly_report_excludes_other_users() {
        let (app, state) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let alice = create_test_user(&state.db, "alice@example.com").await;
        let bob = create_test_user(&state.db, "bob@example.com").await;
        let bob_cat = create_test_category(&state.db, bob.id, "Rent").await;

        create_test_expense(
            &state.db,
            bob.id,
            bob_cat.id,
            Decimal::from(500),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        )
        .await;

        let (name, value) = identity(alice.id);
        let response = server
            .get("/api/v1/reports/monthly?year=2025&month=3")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<MonthlyReport> = response.json();
        assert_eq!(body.data.total_spend, Decimal::ZERO);
        assert!(body.data.pie_data.is_empty());
    }
}
