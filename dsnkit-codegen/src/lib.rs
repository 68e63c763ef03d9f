//! Procedural macros for dsnkit.
//!
//! This crate turns `#[dsn("...")]` field annotations into the field-walking
//! code the dsnkit binder drives at runtime.
//!
//! # Macros
//!
//! - [`Bind`] - Derive macro implementing `dsnkit::Record` and `dsnkit::Field`
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Debug, Default, dsnkit::Bind)]
//! struct Config {
//!     #[dsn("scheme")]
//!     scheme: String,
//!     #[dsn("address")]
//!     address: String,
//!     #[dsn("query.limit")]
//!     limit: i32,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro binding DSN components into a struct.
///
/// Every field carrying a `#[dsn("<key>")]` attribute is reported to the
/// binder in declaration order together with its key. Fields without the
/// attribute are never touched.
///
/// # Keys
///
/// - `scheme`, `address`, `username`, `password`, `host`, `port` - DSN components
/// - `query` - the field is a nested `#[derive(Bind)]` struct filled from
///   query parameters, matched by the nested struct's own keys
/// - `query.<name>` - the field is filled from the query parameter `<name>`
///
/// Keys are matched verbatim. Unknown keys compile and are ignored.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default, dsnkit::Bind)]
/// struct Options {
///     #[dsn("timeout")]
///     timeout: u32,
///     #[dsn("tag")]
///     tags: Vec<String>,
/// }
///
/// #[derive(Default, dsnkit::Bind)]
/// struct Config {
///     #[dsn("address")]
///     address: String,
///     #[dsn("query")]
///     options: Options,
/// }
/// ```
#[proc_macro_derive(Bind, attributes(dsn))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive::derive_bind_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
