use chrono::{Datelike, Months, NaiveDate};

use flexfit_data::Member;

use crate::datetime::last_day_of_month;

/// Compute the next billing due date: one calendar month after
/// the last billed date, re-anchored to the join day-of-month.
/// When the join day does not exist in the target month (day 31
/// in a 30 day month, day 29..31 in February) the due date is
/// the last day of that month.
pub fn next_due_date(join_date: NaiveDate, last_billed_date: NaiveDate) -> NaiveDate {
    // Safe everywhere except the very end of representable time.
    let next = last_billed_date
        .checked_add_months(Months::new(1))
        .unwrap();
    match next.with_day(join_date.day()) {
        Some(anchored) => anchored,
        None => last_day_of_month(next.year(), next.month()),
    }
}

/// Is the payment due? True once the calendar reaches the
/// computed next due date.
pub fn is_due(today: NaiveDate, join_date: NaiveDate, last_billed_date: NaiveDate) -> bool {
    today >= next_due_date(join_date, last_billed_date)
}

pub trait BillingCycle {
    /// The next date a payment becomes due.
    fn next_due_date(&self) -> NaiveDate;
    /// Whether a payment is outstanding on the given date.
    fn is_due(&self, today: NaiveDate) -> bool;
}

impl BillingCycle for Member {
    fn next_due_date(&self) -> NaiveDate {
        next_due_date(self.join_date, self.last_billed_date)
    }

    fn is_due(&self, today: NaiveDate) -> bool {
        is_due(today, self.join_date, self.last_billed_date)
    }
}
