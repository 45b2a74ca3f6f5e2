#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use model::entities::{category, daily_expense, recurring_expense, user};

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;
        AppState { db }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> (Router, AppState) {
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        let router = create_router(state.clone());
        (router, state)
    }

    /// Insert a user directly, bypassing the HTTP layer
    pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> user::Model {
        user::ActiveModel {
            email: Set(email.to_string()),
            name: Set(email.split('@').next().unwrap_or(email).to_string()),
            password_hash: Set("hashed".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create test user")
    }

    /// Insert a category directly, bypassing the HTTP layer
    pub async fn create_test_category(
        db: &DatabaseConnection,
        user_id: i32,
        name: &str,
    ) -> category::Model {
        category::ActiveModel {
            user_id: Set(user_id),
            name: Set(name.to_string()),
            kind: Set(category::CategoryKind::Variable),
            icon: Set("HelpCircle".to_string()),
            color: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create test category")
    }

    /// Insert a one-off expense directly, bypassing the HTTP layer
    pub async fn create_test_expense(
        db: &DatabaseConnection,
        user_id: i32,
        category_id: i32,
        amount: Decimal,
        date: NaiveDate,
    ) -> daily_expense::Model {
        daily_expense::ActiveModel {
            user_id: Set(user_id),
            category_id: Set(category_id),
            amount: Set(amount),
            date: Set(date),
            note: Set(None),
            payment_mode: Set(daily_expense::PaymentMode::Upi),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create test expense")
    }

    /// Insert a recurring expense directly, bypassing the HTTP layer
    pub async fn create_test_recurring(
        db: &DatabaseConnection,
        user_id: i32,
        category_id: i32,
        amount: Decimal,
        frequency: recurring_expense::RecurrenceFrequency,
        start_date: NaiveDate,
    ) -> recurring_expense::Model {
        recurring_expense::ActiveModel {
            user_id: Set(user_id),
            category_id: Set(category_id),
            name: Set("Test recurring".to_string()),
            amount: Set(amount),
            frequency: Set(frequency),
            start_date: Set(start_date),
            end_date: Set(None),
            note: Set(None),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create test recurring expense")
    }
}
