use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use flexfit_data::{Insert, Payment, PaymentFilter, PaymentLogEntry, Query, Retrieve};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Payment> for Connection {
    type Filter = PaymentFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Payment>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                member_id,
                ROUND(amount, 10) AS amount,
                date
            FROM payment_history
            WHERE 1
            "#,
        );
        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(date) = filter.date {
            qry.push(" AND date = ").push_bind(date);
        }
        if let Some(date_before) = filter.date_before {
            qry.push(" AND date <= ").push_bind(date_before);
        }
        if let Some(date_after) = filter.date_after {
            qry.push(" AND date >= ").push_bind(date_after);
        }
        qry.push(" ORDER BY date DESC, id DESC ");

        let payments: Vec<Payment> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(payments)
    }
}

#[async_trait]
impl Retrieve<Payment> for Connection {
    type Key = u32;
    async fn retrieve(&self, payment_id: Self::Key) -> Result<Payment> {
        let filter = PaymentFilter {
            id: Some(payment_id),
            ..Default::default()
        };
        let payment = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(payment)
    }
}

#[async_trait]
impl Insert<Payment> for Connection {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO payment_history (
                    member_id,
                    amount,
                    date
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(payment.member_id)
                .push_bind(payment.amount)
                .push_bind(payment.date);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        log::debug!("recorded payment {}", insert.id);
        self.retrieve(insert.id).await
    }
}

/// The payment history view: payments joined with the member
/// name, most recent first. Orphaned payments (member deleted)
/// do not show up here, only in the plain payment query.
#[async_trait]
impl Query<PaymentLogEntry> for Connection {
    type Filter = PaymentFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<PaymentLogEntry>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                p.id AS id,
                p.member_id AS member_id,
                m.name AS member_name,
                ROUND(p.amount, 10) AS amount,
                p.date AS date
            FROM payment_history p
            JOIN members m ON p.member_id = m.id
            WHERE 1
            "#,
        );
        if let Some(id) = filter.id {
            qry.push(" AND p.id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND p.member_id = ").push_bind(member_id);
        }
        if let Some(date) = filter.date {
            qry.push(" AND p.date = ").push_bind(date);
        }
        if let Some(date_before) = filter.date_before {
            qry.push(" AND p.date <= ").push_bind(date_before);
        }
        if let Some(date_after) = filter.date_after {
            qry.push(" AND p.date >= ").push_bind(date_after);
        }
        qry.push(" ORDER BY p.date DESC, p.id DESC ");

        let entries: Vec<PaymentLogEntry> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    use flexfit_data::{Delete, Member};

    #[tokio::test]
    async fn test_payment_insert() {
        let db = Connection::open_test().await;

        // Create test member
        let m = Member {
            name: "Testmember".to_string(),
            mobile: "0171".to_string(),
            ..Default::default()
        };
        let m = db.insert(m).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        // Create payment for member
        let payment = Payment {
            member_id: m.id,
            amount: 50.0,
            date,
            ..Default::default()
        };

        let payment = db.insert(payment).await.unwrap();
        assert!(payment.id > 0);
        assert_eq!(payment.member_id, m.id);
        assert_eq!(payment.date, date);
        assert_eq!(payment.amount, 50.0);
    }

    #[tokio::test]
    async fn test_payment_history_order() {
        let db = Connection::open_test().await;
        let m = db
            .insert(Member {
                name: "Testmember".to_string(),
                mobile: "0171".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        for (amount, date) in [
            (50.0, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            (55.0, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            (52.5, NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()),
        ] {
            db.insert(Payment {
                member_id: m.id,
                amount,
                date,
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let entries: Vec<PaymentLogEntry> =
            db.query(&PaymentFilter::default()).await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].amount, 55.0);
        assert_eq!(entries[1].amount, 52.5);
        assert_eq!(entries[2].amount, 50.0);
        assert_eq!(entries[0].member_name, "Testmember");
    }

    #[tokio::test]
    async fn test_payment_history_same_date_most_recent_first() {
        let db = Connection::open_test().await;
        let m = db
            .insert(Member {
                name: "Testmember".to_string(),
                mobile: "0171".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        db.insert(Payment {
            member_id: m.id,
            amount: 10.0,
            date,
            ..Default::default()
        })
        .await
        .unwrap();
        db.insert(Payment {
            member_id: m.id,
            amount: 20.0,
            date,
            ..Default::default()
        })
        .await
        .unwrap();

        let entries: Vec<PaymentLogEntry> =
            db.query(&PaymentFilter::default()).await.unwrap();
        assert_eq!(entries[0].amount, 20.0);
        assert_eq!(entries[1].amount, 10.0);
    }

    #[tokio::test]
    async fn test_payments_survive_member_delete() {
        let db = Connection::open_test().await;
        let m = db
            .insert(Member {
                name: "Leaving Member".to_string(),
                mobile: "0171".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let member_id = m.id;

        db.insert(Payment {
            member_id,
            amount: 50.0,
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            ..Default::default()
        })
        .await
        .unwrap();

        db.delete(m).await.unwrap();

        // The raw payment rows are still there
        let payments: Vec<Payment> = db
            .query(&PaymentFilter {
                member_id: Some(member_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(payments.len(), 1);

        // But the joined history view no longer lists them
        let entries: Vec<PaymentLogEntry> = db
            .query(&PaymentFilter {
                member_id: Some(member_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 0);
    }

    #[tokio::test]
    async fn test_payment_date_filter() {
        let db = Connection::open_test().await;
        let m = db
            .insert(Member {
                name: "Testmember".to_string(),
                mobile: "0171".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        for month in 1..=4 {
            db.insert(Payment {
                member_id: m.id,
                amount: 50.0,
                date: NaiveDate::from_ymd_opt(2024, month, 10).unwrap(),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let payments: Vec<Payment> = db
            .query(&PaymentFilter {
                date_after: Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
                date_before: Some(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(payments.len(), 2);
    }
}
