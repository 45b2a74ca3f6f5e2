use sea_orm::entity::prelude::*;

/// Whether a category describes a fixed obligation or variable spending.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum CategoryKind {
    #[sea_orm(string_value = "FIXED")]
    Fixed,
    #[sea_orm(string_value = "VARIABLE")]
    Variable,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Fixed => "FIXED",
            CategoryKind::Variable => "VARIABLE",
        }
    }
}

/// A spending category owned by a single user.
///
/// Category names are unique per user; the default taxonomy is copied
/// into a user's set on seeding, skipping names that already exist.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The owning user. Unique together with `name`.
    pub user_id: i32,
    pub name: String,
    pub kind: CategoryKind,
    /// Icon identifier rendered by the client.
    pub icon: String,
    /// Optional display color used by charts.
    pub color: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::daily_expense::Entity")]
    DailyExpense,
    #[sea_orm(has_many = "super::recurring_expense::Entity")]
    RecurringExpense,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
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
