use chrono::NaiveDate;

use flexfit_data::{Member, PaymentLogEntry};

macro_rules! next_attr {
    ($old:ident, $new:ident) => {
        if $old != $new {
            format!(" -> {}", $new)
        } else {
            "".to_string()
        }
    };
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        let photo = match self.photo_path.clone() {
            Some(path) => path,
            None => "None".to_string(),
        };

        println!("Name:\t\t\t{}", self.name);
        println!("Mobile:\t\t\t{}", self.mobile);
        println!("Joined:\t\t\t{}", self.join_date);
        println!("Last Billed:\t\t{}", self.last_billed_date);
        println!("Photo:\t\t\t{}", photo);
        println!("Status:\t\t\t{}", self.status);
    }
}

impl PrintFormatted for (Member, Member) {
    fn print_formatted(&self) {
        let (old, new) = self;
        let photo_old = match old.photo_path.clone() {
            Some(path) => path,
            None => "None".to_string(),
        };
        let photo_new = match new.photo_path.clone() {
            Some(path) => path,
            None => "None".to_string(),
        };

        let next_name = next_attr!(old, new, name);
        println!("Name:\t\t\t{}{}", old.name, next_name);
        let next_mobile = next_attr!(old, new, mobile);
        println!("Mobile:\t\t\t{}{}", old.mobile, next_mobile);
        let next_join_date = next_attr!(old, new, join_date);
        println!("Joined:\t\t\t{}{}", old.join_date, next_join_date);
        let next_last_billed = next_attr!(old, new, last_billed_date);
        println!("Last Billed:\t\t{}{}", old.last_billed_date, next_last_billed);
        let next_photo = next_attr!(photo_old, photo_new);
        println!("Photo:\t\t\t{}{}", photo_old, next_photo);
        let next_status = next_attr!(old, new, status);
        println!("Status:\t\t\t{}{}", old.status, next_status);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<24}\t{:<16}\t{:<12}\t{:<12}\t{}",
            "ID", "Name", "Mobile", "Joined", "Last Billed", "Inactive"
        );
        println!("{:-<100}", "-");

        for member in self {
            let inactive = if member.is_active() { "" } else { "*" };
            println!(
                "{:>4}\t{:<24}\t{:<16}\t{:<12}\t{:<12}\t{}",
                member.id,
                member.name,
                member.mobile,
                member.join_date,
                member.last_billed_date,
                inactive
            );
        }
    }
}

impl PrintFormatted for Vec<PaymentLogEntry> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<12}\t{:<24}\t{:>12}",
            "ID", "Date", "Member", "Amount"
        );
        println!("{:-<70}", "-");
        for entry in self {
            println!(
                "{:>4}\t{:<12}\t{:<24}\t{:>12.2}",
                entry.id, entry.date, entry.member_name, entry.amount
            );
        }
    }
}

impl PrintFormatted for Vec<(Member, NaiveDate)> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<24}\t{:<16}\t{:<12}\t{}",
            "ID", "Name", "Mobile", "Due", "Status"
        );
        println!("{:-<80}", "-");
        for (member, due_date) in self {
            println!(
                "{:>4}\t{:<24}\t{:<16}\t{:<12}\t{}",
                member.id, member.name, member.mobile, due_date, member.status
            );
        }
    }
}
