use crate::entities::{
    ExpenseStatus, donation_entity as donations, expense_entity as expenses,
    financial_report_entity as reports,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::query_support::{BucketRow, breakdown, sum_cents, users_by_id};
use crate::utils::{from_cents, month_bounds, parse_date, required, today};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

/// Inclusive date window; `None` means all time.
type Window = Option<(NaiveDate, NaiveDate)>;

fn live_donations(window: Window) -> Select<donations::Entity> {
    let query = donations::Entity::find().filter(donations::Column::DeletedAt.is_null());
    match window {
        Some((start, end)) => query.filter(donations::Column::DonationDate.between(start, end)),
        None => query,
    }
}

fn live_expenses(window: Window, status: ExpenseStatus) -> Select<expenses::Entity> {
    let query = expenses::Entity::find()
        .filter(expenses::Column::DeletedAt.is_null())
        .filter(expenses::Column::Status.eq(status));
    match window {
        Some((start, end)) => query.filter(expenses::Column::ExpenseDate.between(start, end)),
        None => query,
    }
}

fn entry(row: &BucketRow) -> BreakdownEntry {
    BreakdownEntry {
        count: row.count,
        total: from_cents(row.total),
    }
}

pub fn report_name(report_type: crate::entities::ReportType, start: NaiveDate) -> String {
    format!("{} Report - {}", report_type.label(), start.format("%Y-%m-%d"))
}

#[derive(Clone)]
pub struct ReportService {
    pool: DatabaseConnection,
}

impl ReportService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Current-month and all-time totals. Only approved expenses are netted;
    /// pending ones are reported on their own.
    pub async fn dashboard(&self) -> AppResult<DashboardResponse> {
        let this_month = Some(month_bounds(today()));

        let month_donations = self.donation_total(this_month).await?;
        let month_expenses = self.expense_total(this_month, ExpenseStatus::Approved).await?;
        let all_donations = self.donation_total(None).await?;
        let all_expenses = self.expense_total(None, ExpenseStatus::Approved).await?;
        let pending = self.expense_total(None, ExpenseStatus::Pending).await?;

        let data = self.breakdowns(None).await?;

        Ok(DashboardResponse {
            this_month: PeriodTotals::from_cents(month_donations, month_expenses),
            all_time: PeriodTotals::from_cents(all_donations, all_expenses),
            pending: PendingTotals {
                expenses: from_cents(pending),
            },
            donations_by_type: data.donations_by_type,
            expenses_by_category: data.expenses_by_category,
        })
    }

    /// Computes totals over `[startDate, endDate]` and stores them as a new report row.
    pub async fn generate(
        &self,
        generated_by: i64,
        request: GenerateReportRequest,
    ) -> AppResult<ReportResponse> {
        let report_type = required(request.report_type, "reportType")?;
        let start = parse_date(&required(request.start_date, "startDate")?, "startDate")?;
        let end = parse_date(&required(request.end_date, "endDate")?, "endDate")?;
        if end < start {
            return Err(AppError::ValidationError(
                "endDate must not be before startDate".to_string(),
            ));
        }
        let window = Some((start, end));

        let total_donations = self.donation_total(window).await?;
        let total_expenses = self.expense_total(window, ExpenseStatus::Approved).await?;
        let data = self.breakdowns(window).await?;

        let now = Utc::now();
        let report = reports::ActiveModel {
            report_name: Set(report_name(report_type, start)),
            report_type: Set(report_type),
            start_date: Set(start),
            end_date: Set(end),
            total_donations_cents: Set(total_donations),
            total_expenses_cents: Set(total_expenses),
            net_balance_cents: Set(total_donations - total_expenses),
            generated_by: Set(generated_by),
            data: Set(Some(serde_json::to_string(&data)?)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Report {} generated by user {generated_by} for {start}..{end}",
            report.id
        );
        self.get(report.id).await
    }

    pub async fn list(&self, query: &ReportQuery) -> AppResult<PaginatedResponse<ReportResponse>> {
        let params = PaginationParams::new(query.page, query.limit, RECORD_PAGE_SIZE);

        let mut base_query = reports::Entity::find();
        if let Some(report_type) = query.report_type {
            base_query = base_query.filter(reports::Column::ReportType.eq(report_type));
        }

        let total = base_query.clone().count(&self.pool).await?;

        let rows = base_query
            .order_by_desc(reports::Column::CreatedAt)
            .order_by_desc(reports::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let data = self.with_generator(rows).await?;
        Ok(PaginatedResponse::new(data, &params, total))
    }

    pub async fn get(&self, id: i64) -> AppResult<ReportResponse> {
        let report = reports::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;
        self.with_generator(vec![report])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))
    }

    async fn donation_total(&self, window: Window) -> AppResult<i64> {
        sum_cents(&self.pool, live_donations(window), donations::Column::AmountCents).await
    }

    async fn expense_total(&self, window: Window, status: ExpenseStatus) -> AppResult<i64> {
        sum_cents(
            &self.pool,
            live_expenses(window, status),
            expenses::Column::AmountCents,
        )
        .await
    }

    async fn breakdowns(&self, window: Window) -> AppResult<ReportData> {
        let by_type = breakdown(
            &self.pool,
            live_donations(window),
            donations::Column::DonationType,
            donations::Column::AmountCents,
        )
        .await?;
        let by_category = breakdown(
            &self.pool,
            live_expenses(window, ExpenseStatus::Approved),
            expenses::Column::Category,
            expenses::Column::AmountCents,
        )
        .await?;

        Ok(ReportData {
            donations_by_type: by_type
                .iter()
                .map(|row| DonationTypeBreakdown {
                    donation_type: row.bucket.clone(),
                    entry: entry(row),
                })
                .collect(),
            expenses_by_category: by_category
                .iter()
                .map(|row| ExpenseCategoryBreakdown {
                    category: row.bucket.clone(),
                    entry: entry(row),
                })
                .collect(),
        })
    }

    async fn with_generator(&self, rows: Vec<reports::Model>) -> AppResult<Vec<ReportResponse>> {
        let users = users_by_id(&self.pool, rows.iter().map(|r| r.generated_by)).await?;
        rows.into_iter()
            .map(|r| -> AppResult<ReportResponse> {
                let generator = users.get(&r.generated_by).cloned().map(Into::into);
                let response = ReportResponse::try_from(r)?;
                Ok(ReportResponse {
                    generator,
                    ..response
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ReportType;

    #[test]
    fn test_report_name() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(report_name(ReportType::Monthly, start), "Monthly Report - 2024-01-01");
        assert_eq!(report_name(ReportType::Custom, start), "Custom Report - 2024-01-01");
    }
}
