use sea_orm::entity::prelude::*;

/// Represents a registered user of the tracker.
///
/// Credential hashing and session issuance live in the upstream auth
/// service; this service only stores the resulting opaque hash.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    /// Opaque credential hash supplied by the auth service.
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A user owns their categories and expenses.
    #[sea_orm(has_many = "super::category::Entity")]
    Category,
    #[sea_orm(has_many = "super::daily_expense::Entity")]
    DailyExpense,
    #[sea_orm(has_many = "super::recurring_expense::Entity")]
    RecurringExpense,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::daily_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyExpense.def()
    }
}

impl Related<super::recurring_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringExpense.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
