use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use flexfit_billing::{datetime, BillingCycle};
use flexfit_data::{Member, MemberFilter, Query, Retrieve};
use flexfit_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Billing {
    /// List members with an outstanding payment
    #[clap(name = "due")]
    Due(ListDue),
    /// Show the next due date for a member
    #[clap(name = "next")]
    Next(NextDue),
}

impl Billing {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Billing::Due(cmd) => cmd.run(db).await,
            Billing::Next(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListDue {
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
}

impl ListDue {
    /// Run the command and list all members whose payment is due
    pub async fn run(self, db: &Connection) -> Result<()> {
        let date = self.date.unwrap_or(datetime::today());

        let members: Vec<Member> = db.query(&MemberFilter::default()).await?;
        let due: Vec<(Member, NaiveDate)> = members
            .into_iter()
            .filter(|m| m.is_due(date))
            .map(|m| {
                let due_date = m.next_due_date();
                (m, due_date)
            })
            .collect();

        println!("{} members due on {}.", due.len(), date);
        due.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct NextDue {
    #[clap(short, long)]
    pub id: u32,
}

impl NextDue {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        let due_date = member.next_due_date();
        let state = if member.is_due(datetime::today()) {
            "due"
        } else {
            "paid up"
        };
        println!("{}: next due date {} ({})", member.name, due_date, state);
        Ok(())
    }
}
