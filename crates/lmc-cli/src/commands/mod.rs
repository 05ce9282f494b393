//! Command implementations for the lmc CLI
//!
//! Each command lives in its own submodule.

mod convert;
mod group;
mod metadata;

pub use convert::execute as convert;
pub use group::execute as show_group;
pub use metadata::execute as list_metadata_jobs;
