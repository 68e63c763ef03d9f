//! # dsnkit
//!
//! Parse data source names and bind them into typed configuration structs.
//!
//! A DSN has the shape
//!
//! ```text
//! scheme://[username[:password]@]host[:port][/path][?query][#fragment]
//! ```
//!
//! [`Dsn::parse`] splits it into components, and [`Dsn::bind`] copies those
//! components into any struct deriving [`Bind`], guided by `#[dsn("...")]`
//! field annotations.
//!
//! ## Quick Start
//!
//! ```rust
//! use dsnkit::{Bind, Dsn};
//!
//! #[derive(Debug, Default, Bind)]
//! struct Options {
//!     #[dsn("timeout")]
//!     timeout: String,
//! }
//!
//! #[derive(Debug, Default, Bind)]
//! struct Config {
//!     #[dsn("scheme")]
//!     scheme: String,
//!     #[dsn("address")]
//!     address: String,
//!     #[dsn("query")]
//!     options: Options,
//!     #[dsn("query.tag")]
//!     tags: Vec<String>,
//!     #[dsn("query.timeout")]
//!     timeout: i32,
//! }
//!
//! let dsn = Dsn::parse("unix:///var/run/mysql.sock?timeout=3&tag=a&tag=b").unwrap();
//! let mut config = Config::default();
//! dsn.bind(&mut config).unwrap();
//!
//! assert_eq!(config.scheme, "unix");
//! assert_eq!(config.address, "/var/run/mysql.sock");
//! assert_eq!(config.options.timeout, "3");
//! assert_eq!(config.tags, ["a", "b"]);
//! assert_eq!(config.timeout, 3);
//! ```
//!
//! ## Binding Rules
//!
//! Binding is strict about the target and lenient about the data. See the
//! [`bind`] module for the full key table.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

// Lets generated `::dsnkit::...` paths resolve inside this crate's own tests.
extern crate self as dsnkit;

pub mod bind;
pub mod dsn;
pub mod error;
pub mod field;
pub mod logging;
pub mod query;

pub use bind::{Target, from_str};
pub use dsn::{Dsn, LOCAL_SOCKET_SCHEMES};
pub use error::{BindError, Error, ParseError, Result};
pub use field::{Field, Integer, Record, Slot, Visitor};
pub use query::Query;

/// Derive macro for [`Record`]; see the [`bind`] module for binding keys.
#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub use dsnkit_codegen::Bind;

/// Parse a DSN. Equivalent to [`Dsn::parse`].
pub fn parse(raw: &str) -> std::result::Result<Dsn, ParseError> {
    Dsn::parse(raw)
}

/// Prelude module for convenient imports.
pub mod prelude {
    #[cfg(feature = "derive")]
    pub use crate::Bind;
    pub use crate::{BindError, Dsn, Field, Query, Record, Slot, Target};
}
