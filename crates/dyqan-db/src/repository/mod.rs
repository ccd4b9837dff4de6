//! # Repository Implementations
//!
//! One repository per aggregate:
//!
//! - [`catalog`] - product CRUD and lookup
//! - [`ledger`] - the transactional unit sale and read-side sale queries
//! - [`investment`] - append-only investment log

pub mod catalog;
pub mod investment;
pub mod ledger;
