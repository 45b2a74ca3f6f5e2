//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the expense tracking application here.
//! Every expense-like record belongs to exactly one user and one
//! category; ownership is enforced at the query level by the callers.

pub mod category;
pub mod daily_expense;
pub mod recurring_expense;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::category::Entity as Category;
    pub use super::daily_expense::Entity as DailyExpense;
    pub use super::recurring_expense::Entity as RecurringExpense;
    pub use super::user::Entity as User;
}
