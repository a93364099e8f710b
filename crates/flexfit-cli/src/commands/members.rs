use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use flexfit_billing::datetime;
use flexfit_data::{
    Delete, Insert, Member, MemberFilter, MemberStatus, Query, Retrieve, Update,
};
use flexfit_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member
    #[clap(name = "show")]
    Show(ShowMember),
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Update a member
    #[clap(name = "set")]
    Update(UpdateMember),
    /// Mark a member as active
    #[clap(name = "activate")]
    Activate(SetStatus),
    /// Mark a member as inactive
    #[clap(name = "deactivate")]
    Deactivate(SetStatus),
    /// Delete a member
    #[clap(name = "delete")]
    Delete(DeleteMember),
}

impl Members {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db).await,
            Members::List(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db).await,
            Members::Update(cmd) => cmd.run(db).await,
            Members::Activate(cmd) => cmd.run(db, MemberStatus::Active).await,
            Members::Deactivate(cmd) => cmd.run(db, MemberStatus::Inactive).await,
            Members::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    #[clap(short, long)]
    pub id: Option<u32>,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub status: Option<MemberStatus>,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, db: &Connection) -> Result<()> {
        // Create member filter
        let filter = MemberFilter {
            id: self.id,
            name: self.name,
            status: self.status,
        };

        let members: Vec<Member> = db.query(&filter).await?;
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long)]
    pub mobile: String,
    #[clap(long)]
    pub join_date: Option<NaiveDate>,
    #[clap(short, long)]
    pub photo: Option<String>,
}

impl AddMember {
    /// Run the command and add a member to the database
    pub async fn run(self, db: &Connection) -> Result<()> {
        let join_date = self.join_date.unwrap_or(datetime::today());
        let member = Member::new(self.name, self.mobile, join_date, self.photo);

        println!();
        member.print_formatted();
        println!();

        // Confirm adding member
        let confirm = Confirm::new("Add member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let member = db.insert(member).await?;
        println!("Member added with id {}.", member.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub mobile: Option<String>,
    #[clap(short, long)]
    pub photo: Option<String>,
}

impl UpdateMember {
    /// Run command and update a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        let mut update = member.clone();

        if let Some(name) = self.name {
            update.name = name;
        }
        if let Some(mobile) = self.mobile {
            update.mobile = mobile;
        }
        if let Some(photo) = self.photo {
            update.photo_path = Some(photo);
        }

        println!();
        (member, update.clone()).print_formatted();
        println!();
        let confirm = Confirm::new("Update member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        db.update(update).await?;

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SetStatus {
    #[clap(short, long)]
    pub id: u32,
}

impl SetStatus {
    /// Run the command and change the membership status
    pub async fn run(self, db: &Connection, status: MemberStatus) -> Result<()> {
        let member = db.set_status(self.id, status).await?;
        println!("Member {} is now {}.", member.id, member.status);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: u32,
}

impl DeleteMember {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        println!("Note: recorded payments for this member are kept.");
        let confirm = Confirm::new("Delete member from database?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(member).await?;
        Ok(())
    }
}
