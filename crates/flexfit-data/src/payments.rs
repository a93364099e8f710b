use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PaymentFilter {
    pub id: Option<u32>,
    pub member_id: Option<u32>,
    pub date: Option<NaiveDate>,
    pub date_before: Option<NaiveDate>,
    pub date_after: Option<NaiveDate>,
}

/// A single payment event. Payments are written once and
/// never updated or deleted afterwards.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: u32,
    pub member_id: u32,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A payment joined with the owning member's name, for the
/// payment history view.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct PaymentLogEntry {
    pub id: u32,
    pub member_id: u32,
    pub member_name: String,
    pub amount: f64,
    pub date: NaiveDate,
}
