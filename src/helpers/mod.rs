//! Helper functions shared by the schema and the commands

mod date;
mod slugs;

pub use date::*;
pub use slugs::*;
