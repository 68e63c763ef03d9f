//! Runtime view of bindable fields.
//!
//! `#[derive(Bind)]` reports every annotated field to the binder as a
//! [`Slot`], a mutable view tagged with the field's shape. The binder
//! dispatches on that shape instead of on the concrete Rust type, so the
//! leniency rules live in one place:
//!
//! - string components go to [`Slot::Str`] only
//! - integers go to [`Slot::Int`], parsed at the field's own width
//! - repeated query values go to [`Slot::StrList`]
//! - [`Slot::Shared`] and [`Slot::Unsupported`] fields are skipped
//!
//! Types outside this set opt into silent skipping with a one-line
//! [`Field`] impl:
//!
//! ```rust
//! use dsnkit::{Field, Slot};
//!
//! struct Level(u8);
//!
//! impl Field for Level {
//!     fn slot(&mut self) -> Slot<'_> {
//!         Slot::Unsupported("Level")
//!     }
//! }
//! ```

use std::num::ParseIntError;
use std::sync::Arc;

use crate::error::BindError;

/// Callback receiving each annotated field of a [`Record`].
pub type Visitor<'v> = dyn FnMut(&'static str, Slot<'_>) -> Result<(), BindError> + 'v;

/// A struct whose fields can be bound from a DSN.
///
/// Normally implemented with `#[derive(Bind)]`.
pub trait Record {
    /// Name of the record type, for diagnostics.
    fn record_name(&self) -> &'static str;

    /// Report every annotated field, in declaration order, with its binding key.
    ///
    /// Stops at the first error returned by `visitor`.
    fn visit_fields(&mut self, visitor: &mut Visitor<'_>) -> Result<(), BindError>;
}

/// A value that can appear as a bound field.
pub trait Field {
    /// Mutable view of this value.
    fn slot(&mut self) -> Slot<'_>;
}

/// Integer fields, assigned at their own width.
pub trait Integer {
    /// Assign `value`, or zero when it does not fit.
    fn set_lenient(&mut self, value: i64);

    /// Parse `text` as a base-10 integer of this width and assign it.
    fn parse_set(&mut self, text: &str) -> Result<(), ParseIntError>;
}

/// Mutable view of a bound field, by shape.
pub enum Slot<'a> {
    /// A string.
    Str(&'a mut String),
    /// An integer of any width.
    Int(&'a mut dyn Integer),
    /// A sequence of strings.
    StrList(&'a mut Vec<String>),
    /// A nested record.
    Group(&'a mut dyn Record),
    /// A value that exists but cannot be written, such as a shared `Arc`.
    Shared(&'static str),
    /// A value of a type the binder does not fill.
    Unsupported(&'static str),
}

impl Slot<'_> {
    /// Short description of the slot's shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::StrList(_) => "string list",
            Self::Group(_) => "record",
            Self::Shared(type_name) | Self::Unsupported(type_name) => *type_name,
        }
    }
}

impl std::fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shared(type_name) => write!(f, "Shared({})", type_name),
            Self::Unsupported(type_name) => write!(f, "Unsupported({})", type_name),
            Self::Group(record) => write!(f, "Group({})", record.record_name()),
            other => f.write_str(other.kind()),
        }
    }
}

impl Field for String {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Str(self)
    }
}

impl Field for Vec<String> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::StrList(self)
    }
}

impl<T: Field + ?Sized> Field for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        (**self).slot()
    }
}

impl<T: Field> Field for Arc<T> {
    fn slot(&mut self) -> Slot<'_> {
        match Arc::get_mut(self) {
            Some(inner) => inner.slot(),
            None => Slot::Shared(std::any::type_name::<T>()),
        }
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Integer for $ty {
                fn set_lenient(&mut self, value: i64) {
                    *self = <$ty>::try_from(value).unwrap_or(0);
                }

                fn parse_set(&mut self, text: &str) -> Result<(), ParseIntError> {
                    *self = text.parse::<$ty>()?;
                    Ok(())
                }
            }

            impl Field for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Int(self)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_unsupported {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Field for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Unsupported(stringify!($ty))
                }
            }
        )*
    };
}

impl_unsupported!(bool, char, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_kinds() {
        assert_eq!(String::new().slot().kind(), "string");
        assert_eq!(0u16.slot().kind(), "integer");
        assert_eq!(Vec::<String>::new().slot().kind(), "string list");
        assert_eq!(true.slot().kind(), "bool");
        assert_eq!(1.5f64.slot().kind(), "f64");
    }

    #[test]
    fn test_set_lenient_out_of_range_is_zero() {
        let mut port: u16 = 7;
        port.set_lenient(70000);
        assert_eq!(port, 0);

        port.set_lenient(8080);
        assert_eq!(port, 8080);

        let mut small: u8 = 1;
        small.set_lenient(-1);
        assert_eq!(small, 0);
    }

    #[test]
    fn test_parse_set_uses_field_width() {
        let mut n: i8 = 0;
        assert!(n.parse_set("127").is_ok());
        assert_eq!(n, 127);
        assert!(n.parse_set("128").is_err());
        assert_eq!(n, 127);

        let mut u: u32 = 5;
        assert!(u.parse_set("-1").is_err());
        assert!(u.parse_set("").is_err());
        assert_eq!(u, 5);
    }

    #[test]
    fn test_arc_is_writable_only_when_unique() {
        let mut unique = Arc::new(String::from("a"));
        assert!(matches!(unique.slot(), Slot::Str(_)));

        let mut shared = Arc::new(String::from("a"));
        let _other = Arc::clone(&shared);
        assert!(matches!(shared.slot(), Slot::Shared(_)));
    }

    #[test]
    fn test_box_delegates() {
        let mut boxed = Box::new(3i64);
        match boxed.slot() {
            Slot::Int(n) => n.set_lenient(9),
            other => panic!("unexpected slot {:?}", other),
        }
        assert_eq!(*boxed, 9);
    }
}
