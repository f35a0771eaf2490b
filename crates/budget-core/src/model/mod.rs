//! Domain records persisted by the store.

pub mod account;
pub mod entry;
pub mod recurring;
pub mod wish;

pub use account::{Account, AccountResolver};
pub use entry::{Earning, Entry, EntryKind, Expense};
pub use recurring::{Recurrence, Recurring};
pub use wish::Wish;
