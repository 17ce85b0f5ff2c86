//!# Tableau Server REST API Client
//!
//! A Rust client library for the Tableau Server REST API. Manage sites, projects, users,
//! groups, workbooks, datasources, views, schedules and extract refreshes through
//! strongly-typed items.
//!
//! ## Features
//!
//! - Sign in and out, resume a session from a `tabcmd-session.json` file
//! - Typed items parsed from the server's XML, with validated setters
//! - Lazy fields (connections, views, images) that fail loudly until populated
//! - Filtering, sorting and paging of every listing, plus a [`Pager`] over all pages
//! - Partial updates, including tag additions and removals
//! - Human-readable datasource, workbook and storage quota sizes
//!
//! ## Usage example
//!
//! ```rust,no_run
//! use anyhow::Result;
//! use std::env;
//! use tableau_server_client::endpoints::{Listable, TableauAuth};
//! use tableau_server_client::request_options::{Direction, Field, Filter, RequestOptions, Sort};
//! use tableau_server_client::{Pager, Server};
//!
//! fn main() -> Result<()> {
//!     let mut server = Server::builder()
//!         .address(env::var("TABLEAU_SERVER")?)
//!         .build()?;
//!
//!     let auth = TableauAuth::new(
//!         env::var("TABLEAU_USERNAME")?,
//!         env::var("TABLEAU_PASSWORD")?,
//!         "",
//!     );
//!     server.sign_in(&auth)?;
//!
//!     let mut options = RequestOptions::with_page(1, 100)?;
//!     options
//!         .add_filter(Filter::equals(Field::Tags, "finance"))
//!         .add_sort(Sort::new(Field::UpdatedAt, Direction::Desc));
//!     let (datasources, pagination) = server.datasources().list(Some(&options))?;
//!     println!("{} of {} datasources", datasources.len(), pagination.total_available);
//!
//!     for workbook in Pager::new(server.workbooks(), None) {
//!         let workbook = workbook?;
//!         println!("workbook: {:?}, size: {}", workbook.name(), workbook.calculate_size());
//!     }
//!
//!     server.sign_out()?;
//!     Ok(())
//! }
//! ```

mod macros;

pub mod client;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod pager;
mod request_factory;
pub mod request_options;
pub mod session;
pub mod transport;
pub mod utils;
pub mod validators;

pub use client::{Server, SessionContext};
pub use error::{TscError, ValidationError};
pub use pager::Pager;

/// XML namespace of every request and response document
pub const NAMESPACE: &str = "http://tableau.com/api";
