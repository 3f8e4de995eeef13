//! Admin dashboard figures.
//!
//! "Today" starts at local midnight; "yesterday" is the 24 hours before that.

use crate::service::ServiceResult;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use db::models::{enquiry, order, order_item, user};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;

/// Length of the best-seller and most-enquired lists.
pub const TOP_N: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub total: u64,
    pub today: u64,
    pub yesterday: u64,
    /// Day-over-day change in percent.
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct EnquiryCount {
    pub name: String,
    #[serde(rename = "count")]
    pub enquiry_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub orders: MetricSummary,
    pub customers: MetricSummary,
    pub enquiries: MetricSummary,
    pub total_revenue: f64,
    pub top_products: Vec<ProductSales>,
    pub top_enquired_products: Vec<EnquiryCount>,
}

/// `(current - previous) / previous * 100`, two decimals; `0` when `previous` is zero.
pub fn growth_percentage(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    let pct = (current as f64 - previous as f64) / previous as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Start of today and of yesterday in UTC, measured from local midnight.
pub fn day_bounds(now: DateTime<Local>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .unwrap_or(now)
        .with_timezone(&Utc);
    (today, today - Duration::days(1))
}

async fn summarize<E>(
    db: &DatabaseConnection,
    created_at: E::Column,
    today: DateTime<Utc>,
    yesterday: DateTime<Utc>,
) -> Result<MetricSummary, DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let total = E::find().count(db).await?;
    let today_count = E::find().filter(created_at.gte(today)).count(db).await?;
    let yesterday_count = E::find()
        .filter(created_at.gte(yesterday))
        .filter(created_at.lt(today))
        .count(db)
        .await?;

    Ok(MetricSummary {
        total,
        today: today_count,
        yesterday: yesterday_count,
        growth: growth_percentage(today_count, yesterday_count),
    })
}

pub struct DashboardService;

impl DashboardService {
    pub async fn stats(db: &DatabaseConnection) -> ServiceResult<DashboardStats> {
        Self::stats_at(db, Local::now()).await
    }

    pub async fn stats_at(
        db: &DatabaseConnection,
        now: DateTime<Local>,
    ) -> ServiceResult<DashboardStats> {
        let (today, yesterday) = day_bounds(now);

        let orders = summarize::<order::Entity>(db, order::Column::CreatedAt, today, yesterday).await?;
        let customers = summarize::<user::Entity>(db, user::Column::CreatedAt, today, yesterday).await?;
        let enquiries =
            summarize::<enquiry::Entity>(db, enquiry::Column::CreatedAt, today, yesterday).await?;

        Ok(DashboardStats {
            orders,
            customers,
            enquiries,
            total_revenue: Self::total_revenue(db).await?,
            top_products: Self::top_products(db).await?,
            top_enquired_products: Self::top_enquired(db).await?,
        })
    }

    pub async fn total_revenue(db: &DatabaseConnection) -> ServiceResult<f64> {
        let sum = order::Entity::find()
            .select_only()
            .column_as(order::Column::Amount.sum(), "revenue")
            .into_tuple::<Option<f64>>()
            .one(db)
            .await?;
        let revenue = sum.flatten().unwrap_or(0.0);
        Ok((revenue * 100.0).round() / 100.0)
    }

    /// Order lines grouped by product name, by summed quantity, descending.
    pub async fn top_products(db: &DatabaseConnection) -> ServiceResult<Vec<ProductSales>> {
        Ok(order_item::Entity::find()
            .select_only()
            .column(order_item::Column::Name)
            .column_as(order_item::Column::Quantity.sum(), "total_quantity")
            .group_by(order_item::Column::Name)
            .order_by_desc(Expr::cust("total_quantity"))
            .order_by_asc(order_item::Column::Name)
            .limit(TOP_N)
            .into_model::<ProductSales>()
            .all(db)
            .await?)
    }

    /// Enquiries grouped by product name, by count, descending.
    pub async fn top_enquired(db: &DatabaseConnection) -> ServiceResult<Vec<EnquiryCount>> {
        Ok(enquiry::Entity::find()
            .select_only()
            .column_as(enquiry::Column::ProductName, "name")
            .column_as(enquiry::Column::Id.count(), "enquiry_count")
            .group_by(enquiry::Column::ProductName)
            .order_by_desc(Expr::cust("enquiry_count"))
            .order_by_asc(enquiry::Column::ProductName)
            .limit(TOP_N)
            .into_model::<EnquiryCount>()
            .all(db)
            .await?)
    }
}
