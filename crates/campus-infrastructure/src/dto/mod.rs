//! On-disk document layouts of the local credential service.

mod account;

pub use account::{AccountRecord, AccountsDocument, SessionDocument};
