use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Payment, PaymentFilter, Query};

/// Membership status as stored in the `status` column.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberStatus::Active => write!(f, "active"),
            MemberStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl FromStr for MemberStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            other => Err(anyhow::anyhow!("unknown member status: {}", other)),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub status: Option<MemberStatus>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub name: String,
    pub mobile: String,
    pub join_date: NaiveDate,
    pub last_billed_date: NaiveDate,
    pub photo_path: Option<String>,
    pub status: MemberStatus,
}

impl Member {
    /// Create a new member record: active, with the billing
    /// anchor initialized to the join date.
    pub fn new(
        name: String,
        mobile: String,
        join_date: NaiveDate,
        photo_path: Option<String>,
    ) -> Self {
        Member {
            name,
            mobile,
            join_date,
            last_billed_date: join_date,
            photo_path,
            status: MemberStatus::Active,
            ..Default::default()
        }
    }

    /// Get the recorded payments for this member.
    pub async fn get_payments<DB>(&self, db: &DB) -> Result<Vec<Payment>>
    where
        DB: Query<Payment, Filter = PaymentFilter>,
    {
        let payments = db
            .query(&PaymentFilter {
                member_id: Some(self.id),
                ..Default::default()
            })
            .await?;
        Ok(payments)
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
