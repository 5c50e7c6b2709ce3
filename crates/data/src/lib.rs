//! Persistence for deployment records.
//!
//! Deployment tooling writes the addresses of the pool and its tokens to a
//! small JSON file; this crate reads and writes that record.

/// Deployed contract address record.
pub mod address_book;
/// Error types.
pub mod error;

pub use address_book::AddressBook;
pub use error::AddressBookError;
