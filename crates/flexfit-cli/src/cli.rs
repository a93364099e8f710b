use clap::{Parser, Subcommand};

use crate::commands::{Billing, Members, Payments};

#[derive(Parser, Debug)]
#[clap(name = "flexfit", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(long, default_value = "gym_members.sqlite3")]
    pub members_db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage members
    #[clap(subcommand)]
    Members(Members),

    /// Record payments and show the payment history
    #[clap(subcommand)]
    Payments(Payments),

    /// Billing cycle queries
    #[clap(subcommand)]
    Billing(Billing),
}
