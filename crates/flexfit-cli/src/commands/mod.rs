mod members;
pub use members::*;

mod payments;
pub use payments::*;

mod billing;
pub use billing::*;
