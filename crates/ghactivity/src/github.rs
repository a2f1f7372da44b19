mod client;
mod client_builder;
mod error;
pub mod models;
mod provider;
mod repo_enumerator;
mod result;

pub use client::Client;
pub use client_builder::{Auth, ClientBuilder};
pub use error::Error;
pub use repo_enumerator::RepoEnumerator;
pub use result::Result;
