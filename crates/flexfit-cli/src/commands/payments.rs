use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use flexfit_billing::{datetime, RecordPayment as RecordPaymentFlow};
use flexfit_data::{
    Member, MemberFilter, PaymentFilter, PaymentLogEntry, Query, Retrieve,
};
use flexfit_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Payments {
    /// Record a payment for a member
    #[clap(name = "record")]
    Record(RecordPayment),
    /// List the payment history
    #[clap(name = "list")]
    List(ListPayments),
}

impl Payments {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Payments::Record(cmd) => cmd.run(db).await,
            Payments::List(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct RecordPayment {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub amount: f64,
}

impl RecordPayment {
    /// Run the command and record a payment dated today
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        let today = datetime::today();

        println!();
        member.print_formatted();
        println!();

        let prompt = format!(
            "Record payment of {:.2} dated {}?",
            self.amount, today
        );
        let confirm = Confirm::new(&prompt).with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let member = member.record_payment(db, self.amount, today).await?;
        println!(
            "Payment recorded. Next due date: {}.",
            flexfit_billing::next_due_date(member.join_date, member.last_billed_date)
        );

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListPayments {
    #[clap(long)]
    pub member_id: Option<u32>,
    #[clap(long)]
    pub member_name: Option<String>,
    #[clap(short, long)]
    pub after_date: Option<NaiveDate>,
    #[clap(short, long)]
    pub before_date: Option<NaiveDate>,
}

impl ListPayments {
    pub async fn run(self, db: &Connection) -> Result<()> {
        // Build filter
        let mut filter = PaymentFilter::default();

        if let Some(id) = self.member_id {
            filter.member_id = Some(id);
        }
        if let Some(name) = self.member_name {
            let members: Vec<Member> = db
                .query(&MemberFilter {
                    name: Some(name),
                    ..Default::default()
                })
                .await?;
            let member = members.first().ok_or(anyhow!("member not found"))?;
            filter.member_id = Some(member.id);
        }

        if let Some(date) = self.after_date {
            filter.date_after = Some(date);
        }
        if let Some(date) = self.before_date {
            filter.date_before = Some(date);
        }

        // Query and print the payment history
        let entries: Vec<PaymentLogEntry> = db.query(&filter).await?;
        entries.print_formatted();

        Ok(())
    }
}
