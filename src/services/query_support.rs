//! Shared query pieces: soft-delete aware lookups, grouped sums and text search.

use crate::entities::{member_entity as members, offering_type_entity as offering_types, user_entity as users};
use crate::error::AppResult;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use std::collections::{HashMap, HashSet};

#[derive(Debug, FromQueryResult)]
struct SumRow {
    total: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct BucketRow {
    pub bucket: String,
    pub count: i64,
    pub total: i64,
}

/// `CAST(COALESCE(SUM(col), 0) AS BIGINT)`, so empty groups read back as 0 on every backend.
fn sum_expr<C: ColumnTrait>(column: C) -> SimpleExpr {
    Func::cast_as(
        Func::coalesce([
            SimpleExpr::from(Func::sum(Expr::col(column))),
            SimpleExpr::from(Expr::val(0i64)),
        ]),
        Alias::new("BIGINT"),
    )
    .into()
}

pub async fn sum_cents<E, C>(db: &C, query: Select<E>, column: E::Column) -> AppResult<i64>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let row = query
        .select_only()
        .column_as(sum_expr(column), "total")
        .into_model::<SumRow>()
        .one(db)
        .await?;
    Ok(row.map(|r| r.total).unwrap_or(0))
}

/// Count and sum of `amount` per distinct `bucket`, ordered by bucket.
pub async fn breakdown<E, C>(
    db: &C,
    query: Select<E>,
    bucket: E::Column,
    amount: E::Column,
) -> AppResult<Vec<BucketRow>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let rows = query
        .select_only()
        .column_as(bucket, "bucket")
        .column_as(Expr::val(1).count(), "count")
        .column_as(sum_expr(amount), "total")
        .group_by(bucket)
        .order_by_asc(bucket)
        .into_model::<BucketRow>()
        .all(db)
        .await?;
    Ok(rows)
}

/// Case-insensitive substring match.
pub fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", needle.to_lowercase()))
}

fn unique_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    ids.into_iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

/// Live members keyed by id.
pub async fn members_by_id<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> AppResult<HashMap<i64, members::Model>> {
    let ids = unique_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = members::Entity::find()
        .filter(members::Column::Id.is_in(ids))
        .filter(members::Column::DeletedAt.is_null())
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, m)).collect())
}

pub async fn users_by_id<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> AppResult<HashMap<i64, users::Model>> {
    let ids = unique_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|u| (u.id, u)).collect())
}

pub async fn offering_types_by_id<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> AppResult<HashMap<i64, offering_types::Model>> {
    let ids = unique_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = offering_types::Entity::find()
        .filter(offering_types::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|t| (t.id, t)).collect())
}
