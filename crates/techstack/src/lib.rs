// ABOUTME: Main library entry point for techstack, the handbook tech-stack table mapper.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, TechStack, Area, Row, ScrapeError, run().

//! techstack - maps the tables of a handbook page into JSON, grouped by area.
//!
//! Every unclassed `h2` on the page starts an area. The rows of the tables
//! that follow it, keyed by their column headings, become that area's
//! technologies.
//!
//! # Example
//!
//! ```no_run
//! use techstack::{run, ScrapeError, DEFAULT_URL};
//!
//! fn main() -> Result<(), ScrapeError> {
//!     let stack = run(DEFAULT_URL)?;
//!     println!("{}", stack.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dom;
pub mod error;
pub mod mapper;
pub mod options;
pub mod resource;
pub mod result;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::mapper::{map_document, map_elements};
pub use crate::options::{ClientBuilder, Options, DEFAULT_URL};
pub use crate::result::{Area, Row, TechStack};

/// Fetch `url` with default options and map it.
pub fn run(url: &str) -> Result<TechStack, ScrapeError> {
    Client::builder().build()?.scrape(url)
}
