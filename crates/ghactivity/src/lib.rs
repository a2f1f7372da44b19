pub mod aggregator;
pub mod branch_selector;
pub mod cancel;
pub mod coordinator;
pub mod error;
pub mod github;
pub mod model;
pub mod processor;
pub mod provider;
pub mod report;

#[cfg(test)]
mod test_provider;

pub use error::{Error, Result};
pub use report::generate_report;
