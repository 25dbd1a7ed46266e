use sea_orm_migration::prelude::*;

/// Staff accounts (login identities)
#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    IsActive,
    Phone,
    Address,
    CreatedAt,
    UpdatedAt,
}

/// Congregation members (donors)
#[derive(DeriveIden)]
pub enum Members {
    Table,
    Id,
    MemberNumber,
    FullName,
    Phone,
    Email,
    Address,
    DateOfBirth,
    Gender,
    MaritalStatus,
    Occupation,
    JoinDate,
    IsActive,
    Notes,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum OfferingTypes {
    Table,
    Id,
    Name,
    Code,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Donations {
    Table,
    Id,
    MemberId,
    AmountCents,
    DonationType,
    OfferingTypeId,
    Description,
    DonationDate,
    ReferenceNumber,
    PaymentMethod,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum Pledges {
    Table,
    Id,
    MemberId,
    PledgeType,
    AmountPledgedCents,
    AmountPaidCents,
    PledgeDate,
    DueDate,
    Status,
    Description,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum Expenses {
    Table,
    Id,
    Category,
    Description,
    AmountCents,
    ExpenseDate,
    Vendor,
    ReferenceNumber,
    ApprovedBy,
    Status,
    ReceiptPath,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum Budgets {
    Table,
    Id,
    Category,
    AllocatedAmountCents,
    StartDate,
    EndDate,
    Description,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub enum FinancialReports {
    Table,
    Id,
    ReportName,
    ReportType,
    StartDate,
    EndDate,
    TotalDonationsCents,
    TotalExpensesCents,
    NetBalanceCents,
    GeneratedBy,
    Data,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

fn pk<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// Money is kept in cents so sums stay exact on every backend.
fn cents<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name).big_integer().not_null().to_owned()
}

fn timestamp<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

fn deleted_at<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name).timestamp_with_time_zone().null().to_owned()
}

fn restrict<T, C, R, K>(
    name: &str,
    table: T,
    column: C,
    ref_table: R,
    ref_column: K,
) -> ForeignKeyCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIden,
    R: IntoIden + 'static,
    K: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(ref_table, ref_column)
        .on_delete(ForeignKeyAction::Restrict)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(&mut pk(Users::Id))
                    .col(ColumnDef::new(Users::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(20)
                            .not_null()
                            .default("member"),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::Phone).string_len(50).null())
                    .col(ColumnDef::new(Users::Address).text().null())
                    .col(&mut timestamp(Users::CreatedAt))
                    .col(&mut timestamp(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(&mut pk(Members::Id))
                    .col(
                        ColumnDef::new(Members::MemberNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Members::FullName).string_len(255).not_null())
                    .col(ColumnDef::new(Members::Phone).string_len(50).null())
                    .col(ColumnDef::new(Members::Email).string_len(255).null())
                    .col(ColumnDef::new(Members::Address).text().null())
                    .col(ColumnDef::new(Members::DateOfBirth).date().null())
                    .col(ColumnDef::new(Members::Gender).string_len(10).null())
                    .col(ColumnDef::new(Members::MaritalStatus).string_len(20).null())
                    .col(ColumnDef::new(Members::Occupation).string_len(255).null())
                    .col(ColumnDef::new(Members::JoinDate).date().not_null())
                    .col(
                        ColumnDef::new(Members::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Members::Notes).text().null())
                    .col(&mut timestamp(Members::CreatedAt))
                    .col(&mut timestamp(Members::UpdatedAt))
                    .col(&mut deleted_at(Members::DeletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OfferingTypes::Table)
                    .if_not_exists()
                    .col(&mut pk(OfferingTypes::Id))
                    .col(
                        ColumnDef::new(OfferingTypes::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(OfferingTypes::Code)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(OfferingTypes::Description).text().null())
                    .col(
                        ColumnDef::new(OfferingTypes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(&mut timestamp(OfferingTypes::CreatedAt))
                    .col(&mut timestamp(OfferingTypes::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(&mut pk(Donations::Id))
                    .col(ColumnDef::new(Donations::MemberId).big_integer().not_null())
                    .col(&mut cents(Donations::AmountCents))
                    .col(
                        ColumnDef::new(Donations::DonationType)
                            .string_len(20)
                            .not_null()
                            .default("other"),
                    )
                    .col(ColumnDef::new(Donations::OfferingTypeId).big_integer().null())
                    .col(ColumnDef::new(Donations::Description).text().null())
                    .col(ColumnDef::new(Donations::DonationDate).date().not_null())
                    .col(
                        ColumnDef::new(Donations::ReferenceNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Donations::PaymentMethod)
                            .string_len(20)
                            .not_null()
                            .default("cash"),
                    )
                    .col(ColumnDef::new(Donations::RecordedBy).big_integer().not_null())
                    .col(&mut timestamp(Donations::CreatedAt))
                    .col(&mut timestamp(Donations::UpdatedAt))
                    .col(&mut deleted_at(Donations::DeletedAt))
                    .foreign_key(&mut restrict(
                        "fk_donations_member_id",
                        Donations::Table,
                        Donations::MemberId,
                        Members::Table,
                        Members::Id,
                    ))
                    .foreign_key(&mut restrict(
                        "fk_donations_offering_type_id",
                        Donations::Table,
                        Donations::OfferingTypeId,
                        OfferingTypes::Table,
                        OfferingTypes::Id,
                    ))
                    .foreign_key(&mut restrict(
                        "fk_donations_recorded_by",
                        Donations::Table,
                        Donations::RecordedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pledges::Table)
                    .if_not_exists()
                    .col(&mut pk(Pledges::Id))
                    .col(ColumnDef::new(Pledges::MemberId).big_integer().not_null())
                    .col(ColumnDef::new(Pledges::PledgeType).string_len(100).not_null())
                    .col(&mut cents(Pledges::AmountPledgedCents))
                    .col(cents(Pledges::AmountPaidCents).default(0))
                    .col(ColumnDef::new(Pledges::PledgeDate).date().not_null())
                    .col(ColumnDef::new(Pledges::DueDate).date().null())
                    .col(
                        ColumnDef::new(Pledges::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Pledges::Description).text().null())
                    .col(ColumnDef::new(Pledges::RecordedBy).big_integer().not_null())
                    .col(&mut timestamp(Pledges::CreatedAt))
                    .col(&mut timestamp(Pledges::UpdatedAt))
                    .col(&mut deleted_at(Pledges::DeletedAt))
                    .foreign_key(&mut restrict(
                        "fk_pledges_member_id",
                        Pledges::Table,
                        Pledges::MemberId,
                        Members::Table,
                        Members::Id,
                    ))
                    .foreign_key(&mut restrict(
                        "fk_pledges_recorded_by",
                        Pledges::Table,
                        Pledges::RecordedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(&mut pk(Expenses::Id))
                    .col(ColumnDef::new(Expenses::Category).string_len(100).not_null())
                    .col(ColumnDef::new(Expenses::Description).text().not_null())
                    .col(&mut cents(Expenses::AmountCents))
                    .col(ColumnDef::new(Expenses::ExpenseDate).date().not_null())
                    .col(ColumnDef::new(Expenses::Vendor).string_len(255).null())
                    .col(
                        ColumnDef::new(Expenses::ReferenceNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Expenses::ApprovedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Expenses::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Expenses::ReceiptPath).string_len(255).null())
                    .col(&mut timestamp(Expenses::CreatedAt))
                    .col(&mut timestamp(Expenses::UpdatedAt))
                    .col(&mut deleted_at(Expenses::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_approved_by")
                            .from(Expenses::Table, Expenses::ApprovedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(&mut pk(Budgets::Id))
                    .col(ColumnDef::new(Budgets::Category).string_len(100).not_null())
                    .col(&mut cents(Budgets::AllocatedAmountCents))
                    .col(ColumnDef::new(Budgets::StartDate).date().not_null())
                    .col(ColumnDef::new(Budgets::EndDate).date().not_null())
                    .col(ColumnDef::new(Budgets::Description).text().null())
                    .col(ColumnDef::new(Budgets::CreatedBy).big_integer().not_null())
                    .col(&mut timestamp(Budgets::CreatedAt))
                    .col(&mut timestamp(Budgets::UpdatedAt))
                    .col(&mut deleted_at(Budgets::DeletedAt))
                    .foreign_key(&mut restrict(
                        "fk_budgets_created_by",
                        Budgets::Table,
                        Budgets::CreatedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FinancialReports::Table)
                    .if_not_exists()
                    .col(&mut pk(FinancialReports::Id))
                    .col(
                        ColumnDef::new(FinancialReports::ReportName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialReports::ReportType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinancialReports::StartDate).date().not_null())
                    .col(ColumnDef::new(FinancialReports::EndDate).date().not_null())
                    .col(cents(FinancialReports::TotalDonationsCents).default(0))
                    .col(cents(FinancialReports::TotalExpensesCents).default(0))
                    .col(cents(FinancialReports::NetBalanceCents).default(0))
                    .col(
                        ColumnDef::new(FinancialReports::GeneratedBy)
                            .big_integer()
                            .not_null(),
                    )
                    // JSON snapshot of the breakdowns, stored as text
                    .col(ColumnDef::new(FinancialReports::Data).text().null())
                    .col(&mut timestamp(FinancialReports::CreatedAt))
                    .col(&mut timestamp(FinancialReports::UpdatedAt))
                    .foreign_key(&mut restrict(
                        "fk_financial_reports_generated_by",
                        FinancialReports::Table,
                        FinancialReports::GeneratedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse foreign-key order
        manager
            .drop_table(Table::drop().table(FinancialReports::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pledges::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Donations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OfferingTypes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Members::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
