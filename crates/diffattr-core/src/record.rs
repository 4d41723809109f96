use std::fmt;

use crate::Value;

/// A named type with an ordered list of named fields.
///
/// The field list is the record's only field-discovery strategy: the differ
/// visits exactly these fields, in declaration order.
///
/// ```
/// # use diffattr_core::{Record, Value};
/// let point = Record::new("Point")
///     .with_field("x", Value::Int(1))
///     .with_field("y", Value::Int(2));
/// assert_eq!(point.field_names().collect::<Vec<_>>(), ["x", "y"]);
/// assert_eq!(point.get("y"), Some(&Value::Int(2)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates a record without fields.
    #[must_use]
    pub fn new<S>(type_name: S) -> Self
    where
        S: Into<String>,
    {
        Self { type_name: type_name.into(), fields: Vec::new() }
    }

    /// Appends a field. A repeated name replaces the earlier value in place.
    #[must_use]
    pub fn with_field<S>(mut self, name: S, value: Value) -> Self
    where
        S: Into<String>,
    {
        self.insert(name, value);
        self
    }

    /// Sets a field in place, see [`Record::with_field`].
    pub fn insert<S>(&mut self, name: S, value: Value)
    where
        S: Into<String>,
    {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the type name used for type identity.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Looks a field up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(existing, _)| existing == name).map(|(_, value)| value)
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterates over field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Indicates whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)?;
        if self.fields.is_empty() {
            return Ok(());
        }
        f.write_str(" { ")?;
        for (idx, (name, value)) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str(" }")
    }
}

/// A host value whose fields cannot be discovered.
///
/// Opaque values take part in type and equality checks, but the differ
/// refuses to descend into them and fails with
/// [`crate::DiffError::UnsupportedType`].
///
/// ```
/// # use diffattr_core::Opaque;
/// let handle = Opaque::of(&std::time::Duration::from_secs(1));
/// assert!(handle.type_name().ends_with("Duration"));
/// assert_eq!(handle.repr(), "1s");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opaque {
    type_name: String,
    repr: String,
}

impl Opaque {
    /// Creates an opaque value from a type name and a textual representation.
    #[must_use]
    pub fn new<N, R>(type_name: N, repr: R) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Self { type_name: type_name.into(), repr: repr.into() }
    }

    /// Captures any `Debug` value, named after its Rust type.
    #[must_use]
    pub fn of<T>(value: &T) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        Self::new(std::any::type_name::<T>(), format!("{value:?}"))
    }

    /// Returns the type name used for type identity.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the textual representation used for equality.
    #[must_use]
    pub fn repr(&self) -> &str {
        &self.repr
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repr.is_empty() {
            write!(f, "<{}>", self.type_name)
        } else {
            write!(f, "<{} {}>", self.type_name, self.repr)
        }
    }
}

/// Implements [`crate::Diffable`] for a struct by listing its fields.
///
/// The listed fields, in the listed order, become the fields of a
/// [`Record`] named after the struct. Every listed field must itself be
/// [`crate::Diffable`].
///
/// ```
/// use diffattr_core::{diffable_record, Diffable, Value};
///
/// struct Example {
///     attr1: i32,
///     attr2: String,
/// }
///
/// diffable_record!(Example { attr1, attr2 });
///
/// let value = Example { attr1: 1, attr2: "value1".into() }.to_value();
/// let Value::Record(record) = value else { unreachable!() };
/// assert_eq!(record.type_name(), "Example");
/// assert_eq!(record.get("attr1"), Some(&Value::Int(1)));
/// ```
#[macro_export]
macro_rules! diffable_record {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::Diffable for $ty {
            fn to_value(&self) -> $crate::Value {
                $crate::Value::Record(
                    $crate::Record::new(stringify!($ty))
                        $(.with_field(
                            stringify!($field),
                            $crate::Diffable::to_value(&self.$field),
                        ))*
                )
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_field_replaces_in_place() {
        let record = Record::new("Pair")
            .with_field("a", Value::Int(1))
            .with_field("b", Value::Int(2))
            .with_field("a", Value::Int(3));
        let fields: Vec<_> = record.fields().collect();
        assert_eq!(fields, [("a", &Value::Int(3)), ("b", &Value::Int(2))]);
    }

    #[test]
    fn display_lists_fields() {
        let record = Record::new("Example")
            .with_field("attr1", Value::Int(1))
            .with_field("attr2", Value::from("value1"));
        assert_eq!(record.to_string(), "Example { attr1: 1, attr2: \"value1\" }");
        assert_eq!(Record::new("Unit").to_string(), "Unit");
    }

    #[test]
    fn opaque_display_includes_repr() {
        assert_eq!(Opaque::new("Socket", "").to_string(), "<Socket>");
        assert_eq!(Opaque::new("Socket", "fd=3").to_string(), "<Socket fd=3>");
    }
}
