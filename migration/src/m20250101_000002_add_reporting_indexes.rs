use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_finance_tables::{Donations, Expenses, Pledges};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Indexes backing the list ordering and the dashboard/report aggregates.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donations_donation_date")
                    .table(Donations::Table)
                    .col(Donations::DonationDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_donations_member_id")
                    .table(Donations::Table)
                    .col(Donations::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_expenses_status_expense_date")
                    .table(Expenses::Table)
                    .col(Expenses::Status)
                    .col(Expenses::ExpenseDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pledges_member_id")
                    .table(Pledges::Table)
                    .col(Pledges::MemberId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_pledges_member_id")
                    .table(Pledges::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_expenses_status_expense_date")
                    .table(Expenses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_donations_member_id")
                    .table(Donations::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_donations_donation_date")
                    .table(Donations::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
