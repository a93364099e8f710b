pub mod datetime;
pub mod due;
pub mod payments;

pub use due::{is_due, next_due_date, BillingCycle};
pub use payments::{PaymentError, RecordPayment};
