use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error as ThisError;

use flexfit_data::{Insert, Member, Payment, Update};

#[derive(ThisError, Debug)]
pub enum PaymentError {
    #[error("payment amount must be a positive number, got {0}")]
    InvalidAmount(f64),
}

#[async_trait]
pub trait RecordPayment {
    /// Record a payment for a member: append one payment row
    /// and advance the billing anchor to the payment date.
    async fn record_payment<DB>(
        self,
        db: &DB,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Member>
    where
        DB: Insert<Payment> + Update<Member> + Send + Sync;
}

#[async_trait]
impl RecordPayment for Member {
    async fn record_payment<DB>(
        self,
        db: &DB,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Member>
    where
        DB: Insert<Payment> + Update<Member> + Send + Sync,
    {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PaymentError::InvalidAmount(amount).into());
        }

        let mut member = self;
        let payment = Payment {
            member_id: member.id,
            amount,
            date,
            ..Default::default()
        };
        let payment = db.insert(payment).await?;
        log::debug!(
            "payment of {} recorded for member {}",
            payment.amount,
            member.id
        );

        member.last_billed_date = date;
        let member = db.update(member).await?;

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use flexfit_data::{PaymentFilter, PaymentLogEntry, Query};
    use flexfit_db::Connection;

    use crate::due::BillingCycle;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_record_payment() {
        let db = Connection::open_test().await;
        let member = db
            .insert(Member::new(
                "Test Member".to_string(),
                "0171".to_string(),
                date(2024, 1, 10),
                None,
            ))
            .await
            .unwrap();

        let today = date(2024, 2, 12);
        let member = member.record_payment(&db, 50.0, today).await.unwrap();
        assert_eq!(member.last_billed_date, today);

        // Exactly one payment was appended, listed first
        let entries: Vec<PaymentLogEntry> =
            db.query(&PaymentFilter::default()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 50.0);
        assert_eq!(entries[0].date, today);
        assert_eq!(entries[0].member_name, "Test Member");
    }

    #[tokio::test]
    async fn test_record_payment_clears_due() {
        let db = Connection::open_test().await;
        let member = db
            .insert(Member::new(
                "Test Member".to_string(),
                "0171".to_string(),
                date(2024, 1, 10),
                None,
            ))
            .await
            .unwrap();

        // One month in, payment is due
        let today = date(2024, 2, 12);
        assert!(member.is_due(today));

        let member = member.record_payment(&db, 50.0, today).await.unwrap();

        // Not due the day after, due again a month later
        assert!(!member.is_due(date(2024, 2, 13)));
        assert_eq!(member.next_due_date(), date(2024, 3, 10));
        assert!(member.is_due(date(2024, 3, 10)));
    }

    #[tokio::test]
    async fn test_record_payment_invalid_amount() {
        let db = Connection::open_test().await;
        let member = db
            .insert(Member::new(
                "Test Member".to_string(),
                "0171".to_string(),
                date(2024, 1, 10),
                None,
            ))
            .await
            .unwrap();

        for amount in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            let result = member
                .clone()
                .record_payment(&db, amount, date(2024, 2, 12))
                .await;
            assert!(result.is_err());
        }

        // Nothing was written, the billing anchor is untouched
        let payments = member.get_payments(&db).await.unwrap();
        assert_eq!(payments.len(), 0);
        assert_eq!(member.last_billed_date, date(2024, 1, 10));
    }
}
