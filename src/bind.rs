//! Binding DSN components into records.
//!
//! Binding walks a [`Record`]'s annotated fields in declaration order and
//! resolves each binding key:
//!
//! | Key             | Source                                   |
//! |-----------------|------------------------------------------|
//! | `scheme`        | [`Dsn::scheme`]                          |
//! | `address`       | [`Dsn::address`]                         |
//! | `username`      | [`Dsn::username`]                        |
//! | `password`      | [`Dsn::password`], empty if absent       |
//! | `host`          | [`Dsn::host`]                            |
//! | `port`          | [`Dsn::port`], zero if absent or invalid |
//! | `query`         | nested record, keys resolved as query parameter names |
//! | `query.<name>`  | query parameter `<name>`                 |
//!
//! The target's shape is a programming contract and is checked strictly.
//! The DSN's content is external input and is applied leniently: fields of
//! a shape a key cannot fill, read-only fields, and unknown keys are skipped
//! without error. The one exception is an integer field keyed
//! `query.<name>`, which must receive a well-formed integer.

use std::any::type_name;

use tracing::{debug, trace};

use crate::dsn::Dsn;
use crate::error::{BindError, Error};
use crate::field::{Field, Record, Slot};
use crate::query::Query;

const QUERY_KEY: &str = "query";
const QUERY_PREFIX: &str = "query.";

/// A possibly ill-formed binding target, checked at runtime.
///
/// [`Dsn::bind`] only accepts records, so its target is always well-formed.
/// `Target` carries the cases the type system would otherwise rule out, for
/// callers that assemble targets dynamically.
///
/// ```rust
/// use dsnkit::{BindError, Dsn, Target};
///
/// let dsn = Dsn::parse("tcp://localhost:3306").unwrap();
///
/// let mut port = 0u16;
/// let err = dsn.bind_target(Target::from(&mut port)).unwrap_err();
/// assert!(matches!(err, BindError::InvalidTarget { .. }));
///
/// let err = dsn.bind_target(Target::by_value(port)).unwrap_err();
/// assert!(matches!(err, BindError::NonPointerTarget { .. }));
/// ```
#[derive(Debug)]
pub enum Target<'a> {
    /// No target.
    Nil,
    /// A value handed over by move; binding into it would be lost.
    Owned(&'static str),
    /// A mutable reference to a value.
    Ref(Slot<'a>),
}

impl<'a> Target<'a> {
    /// Target a value that was moved rather than borrowed.
    pub fn by_value<T>(value: T) -> Self {
        drop(value);
        Self::Owned(type_name::<T>())
    }

    /// Target a mutably borrowed field or record.
    pub fn from_field<T: Field + ?Sized>(field: &'a mut T) -> Self {
        Self::Ref(field.slot())
    }
}

impl<'a, T: Field + ?Sized> From<&'a mut T> for Target<'a> {
    fn from(field: &'a mut T) -> Self {
        Self::from_field(field)
    }
}

impl<'a, T: Field + ?Sized> From<Option<&'a mut T>> for Target<'a> {
    fn from(field: Option<&'a mut T>) -> Self {
        field.map_or(Self::Nil, Self::from_field)
    }
}

impl Dsn {
    /// Bind this DSN into `target`.
    ///
    /// Fields bound before a failing `query.<name>` integer keep their new
    /// values. Binding the same DSN twice yields the same record.
    ///
    /// ```rust
    /// use dsnkit::{Bind, Dsn};
    ///
    /// #[derive(Debug, Default, Bind)]
    /// struct Config {
    ///     #[dsn("address")]
    ///     address: String,
    ///     #[dsn("port")]
    ///     port: u16,
    ///     #[dsn("query.timeout")]
    ///     timeout: u32,
    /// }
    ///
    /// let dsn = Dsn::parse("tcp://db.internal:3306?timeout=5").unwrap();
    /// let mut config = Config::default();
    /// dsn.bind(&mut config).unwrap();
    ///
    /// assert_eq!(config.address, "db.internal:3306");
    /// assert_eq!(config.port, 3306);
    /// assert_eq!(config.timeout, 5);
    /// ```
    pub fn bind<T: Record + ?Sized>(&self, target: &mut T) -> Result<(), BindError> {
        debug!(record = target.record_name(), scheme = %self.scheme(), "Dsn::bind()");
        let binder = Binder::new(self);
        binder.bind_record(target)?;
        debug!(record = target.record_name(), "DSN bound");
        Ok(())
    }

    /// Bind this DSN into a target whose shape is checked at runtime.
    ///
    /// # Errors
    ///
    /// - [`BindError::NilTarget`] for [`Target::Nil`]
    /// - [`BindError::NonPointerTarget`] for [`Target::Owned`]
    /// - [`BindError::InvalidTarget`] when the reference is not to a record
    /// - any error of [`Dsn::bind`]
    pub fn bind_target(&self, target: Target<'_>) -> Result<(), BindError> {
        match target {
            Target::Nil => Err(BindError::NilTarget),
            Target::Owned(type_name) => Err(BindError::NonPointerTarget { type_name }),
            Target::Ref(Slot::Group(record)) => self.bind(record),
            Target::Ref(slot) => Err(BindError::InvalidTarget { kind: slot.kind() }),
        }
    }
}

/// Parse `raw` and bind it into a fresh `T::default()`.
///
/// ```rust
/// use dsnkit::Bind;
///
/// #[derive(Default, Bind)]
/// struct Config {
///     #[dsn("host")]
///     host: String,
/// }
///
/// let config: Config = dsnkit::from_str("redis://cache.internal:6379/0").unwrap();
/// assert_eq!(config.host, "cache.internal");
/// ```
pub fn from_str<T: Record + Default>(raw: &str) -> Result<T, Error> {
    let dsn = Dsn::parse(raw)?;
    let mut target = T::default();
    dsn.bind(&mut target)?;
    Ok(target)
}

/// Resolves binding keys against one DSN.
struct Binder<'d> {
    dsn: &'d Dsn,
    address: String,
    port: i64,
}

impl<'d> Binder<'d> {
    fn new(dsn: &'d Dsn) -> Self {
        Self {
            dsn,
            address: dsn.address(),
            port: dsn.port().and_then(|p| p.parse().ok()).unwrap_or(0),
        }
    }

    fn bind_record<T: Record + ?Sized>(&self, record: &mut T) -> Result<(), BindError> {
        record.visit_fields(&mut |key: &'static str, slot: Slot<'_>| self.bind_field(key, slot))
    }

    fn bind_field(&self, key: &'static str, slot: Slot<'_>) -> Result<(), BindError> {
        trace!(key, kind = slot.kind(), "binding field");
        match key {
            "scheme" => assign_str(slot, self.dsn.scheme()),
            "address" => assign_str(slot, &self.address),
            "username" => assign_str(slot, self.dsn.username()),
            "password" => assign_str(slot, self.dsn.password().unwrap_or_default()),
            "host" => assign_str(slot, self.dsn.host()),
            "port" => match slot {
                Slot::Int(field) => field.set_lenient(self.port),
                Slot::Str(field) => self.dsn.port().unwrap_or_default().clone_into(field),
                _ => {}
            },
            QUERY_KEY => return self.bind_query_group(key, slot),
            _ => {
                if let Some(name) = key.strip_prefix(QUERY_PREFIX) {
                    return bind_query_value(self.dsn.query(), name, slot);
                }
            }
        }
        Ok(())
    }

    fn bind_query_group(&self, key: &'static str, slot: Slot<'_>) -> Result<(), BindError> {
        let query = self.dsn.query();
        match slot {
            Slot::Group(group) => {
                trace!(group = group.record_name(), "binding query group");
                group.visit_fields(&mut |name: &'static str, slot: Slot<'_>| {
                    bind_query_value(query, name, slot)
                })
            }
            Slot::Shared(_) => Err(BindError::UnaddressableQueryGroup { key }),
            // A plain field keyed `query` reads the parameter named "query".
            slot => bind_query_value(query, QUERY_KEY, slot),
        }
    }
}

fn assign_str(slot: Slot<'_>, value: &str) {
    if let Slot::Str(field) = slot {
        value.clone_into(field);
    }
}

fn bind_query_value(query: &Query, name: &str, slot: Slot<'_>) -> Result<(), BindError> {
    match slot {
        Slot::Str(field) => query.get(name).unwrap_or_default().clone_into(field),
        Slot::Int(field) => {
            field
                .parse_set(query.get(name).unwrap_or_default())
                .map_err(|source| BindError::QueryInteger {
                    key: name.to_string(),
                    source,
                })?;
        }
        Slot::StrList(field) => {
            if let Some(values) = query.get_all(name) {
                *field = values.to_vec();
            }
        }
        Slot::Group(_) | Slot::Shared(_) | Slot::Unsupported(_) => {}
    }
    Ok(())
}
