use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::Name))
                    .col(string(Users::PasswordHash))
                    .to_owned(),
            )
            .await?;

        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(integer(Categories::UserId))
                    .col(string(Categories::Name))
                    .col(string(Categories::Kind))
                    .col(string(Categories::Icon))
                    .col(string_null(Categories::Color))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_user")
                            .from(Categories::Table, Categories::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Category names are unique within a user's set, not globally.
        manager
            .create_index(
                Index::create()
                    .name("idx_categories_user_name")
                    .table(Categories::Table)
                    .col(Categories::UserId)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create daily_expenses table
        manager
            .create_table(
                Table::create()
                    .table(DailyExpenses::Table)
                    .if_not_exists()
                    .col(pk_auto(DailyExpenses::Id))
                    .col(integer(DailyExpenses::UserId))
                    .col(integer(DailyExpenses::CategoryId))
                    .col(decimal_len(DailyExpenses::Amount, 16, 4))
                    .col(date(DailyExpenses::Date))
                    .col(string_null(DailyExpenses::Note))
                    .col(string(DailyExpenses::PaymentMode))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_expense_user")
                            .from(DailyExpenses::Table, DailyExpenses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_expense_category")
                            .from(DailyExpenses::Table, DailyExpenses::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index the columns the aggregation queries filter on.
        manager
            .create_index(
                Index::create()
                    .name("idx_daily_expenses_user_date")
                    .table(DailyExpenses::Table)
                    .col(DailyExpenses::UserId)
                    .col(DailyExpenses::Date)
                    .to_owned(),
            )
            .await?;

        // Create recurring_expenses table
        manager
            .create_table(
                Table::create()
                    .table(RecurringExpenses::Table)
                    .if_not_exists()
                    .col(pk_auto(RecurringExpenses::Id))
                    .col(integer(RecurringExpenses::UserId))
                    .col(integer(RecurringExpenses::CategoryId))
                    .col(string(RecurringExpenses::Name))
                    .col(decimal_len(RecurringExpenses::Amount, 16, 4))
                    .col(string(RecurringExpenses::Frequency))
                    .col(date(RecurringExpenses::StartDate))
                    .col(date_null(RecurringExpenses::EndDate))
                    .col(string_null(RecurringExpenses::Note))
                    .col(timestamp_with_time_zone(RecurringExpenses::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recurring_expense_user")
                            .from(RecurringExpenses::Table, RecurringExpenses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recurring_expense_category")
                            .from(RecurringExpenses::Table, RecurringExpenses::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recurring_expenses_user")
                    .table(RecurringExpenses::Table)
                    .col(RecurringExpenses::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecurringExpenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyExpenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    UserId,
    Name,
    Kind,
    Icon,
    Color,
}

#[derive(DeriveIden)]
enum DailyExpenses {
    Table,
    Id,
    UserId,
    CategoryId,
    Amount,
    Date,
    Note,
    PaymentMode,
}

#[derive(DeriveIden)]
enum RecurringExpenses {
    Table,
    Id,
    UserId,
    CategoryId,
    Name,
    Amount,
    Frequency,
    StartDate,
    EndDate,
    Note,
    CreatedAt,
}
