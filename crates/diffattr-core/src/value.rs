use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::{Differences, Number, Opaque, ParseError, Record};

/// The value model understood by the differ.
///
/// Every shape the traversal can descend into is a variant of this enum, so
/// classification is an exhaustive match. Host types that cannot describe
/// themselves end up as [`Value::Opaque`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent value, also used for keys or fields missing on the test side.
    None,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(Number),
    /// UTF-8 string.
    Str(String),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Fixed-arity ordered sequence.
    Tuple(Vec<Value>),
    /// Unordered collection of unique values.
    Set(ValueSet),
    /// String-keyed mapping with deterministic key ordering.
    Map(BTreeMap<String, Value>),
    /// Named type with named fields.
    Record(Record),
    /// Host value without a discoverable field set.
    Opaque(Opaque),
}

/// Type identity of a [`Value`].
///
/// Two values are of the same type only when their kinds are equal. Records
/// and opaque values carry their type name.
///
/// ```
/// # use diffattr_core::{Kind, Value};
/// assert_eq!(Value::Int(1).kind(), Kind::Int);
/// assert_ne!(Value::Int(1).kind(), Value::from(1.0).kind());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind<'a> {
    /// See [`Value::None`].
    None,
    /// See [`Value::Bool`].
    Bool,
    /// See [`Value::Int`].
    Int,
    /// See [`Value::Float`].
    Float,
    /// See [`Value::Str`].
    Str,
    /// See [`Value::List`].
    List,
    /// See [`Value::Tuple`].
    Tuple,
    /// See [`Value::Set`].
    Set,
    /// See [`Value::Map`].
    Map,
    /// A record of the named type.
    Record(&'a str),
    /// An opaque value of the named type.
    Opaque(&'a str),
}

impl fmt::Display for Kind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::None => f.write_str("none"),
            Kind::Bool => f.write_str("bool"),
            Kind::Int => f.write_str("int"),
            Kind::Float => f.write_str("float"),
            Kind::Str => f.write_str("str"),
            Kind::List => f.write_str("list"),
            Kind::Tuple => f.write_str("tuple"),
            Kind::Set => f.write_str("set"),
            Kind::Map => f.write_str("map"),
            Kind::Record(name) | Kind::Opaque(name) => f.write_str(name),
        }
    }
}

/// Set contents kept in canonical order with duplicates removed.
///
/// Iteration order is deterministic: equal sets always iterate identically.
///
/// ```
/// # use diffattr_core::{Value, ValueSet};
/// let set: ValueSet = [Value::Int(3), Value::Int(1), Value::Int(3)].into_iter().collect();
/// assert_eq!(set.as_slice(), &[Value::Int(1), Value::Int(3)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueSet(Vec<Value>);

impl ValueSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the members in canonical order.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the members in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Indicates whether `value` is a member.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.0.binary_search_by(|member| member.canonical_cmp(value)).is_ok()
    }
}

impl From<Vec<Value>> for ValueSet {
    fn from(mut values: Vec<Value>) -> Self {
        values.sort_by(Value::canonical_cmp);
        values.dedup_by(|a, b| a.canonical_cmp(b) == Ordering::Equal);
        Self(values)
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Value {
    /// Builds a [`Value::Tuple`].
    #[must_use]
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::Tuple(items.into_iter().collect())
    }

    /// Builds a [`Value::Set`], sorting and deduplicating the members.
    #[must_use]
    pub fn set<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::Set(items.into_iter().collect())
    }

    /// Builds a [`Value::Map`] from key/value pairs. Later duplicates win.
    #[must_use]
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::Map(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }

    /// Returns the type identity used by the differ's type check.
    #[must_use]
    pub fn kind(&self) -> Kind<'_> {
        match self {
            Self::None => Kind::None,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::Str(_) => Kind::Str,
            Self::List(_) => Kind::List,
            Self::Tuple(_) => Kind::Tuple,
            Self::Set(_) => Kind::Set,
            Self::Map(_) => Kind::Map,
            Self::Record(record) => Kind::Record(record.type_name()),
            Self::Opaque(opaque) => Kind::Opaque(opaque.type_name()),
        }
    }

    /// Indicates whether this is the absent marker.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Lazily yields every difference between `self` (the reference) and `test`.
    ///
    /// ```
    /// # use diffattr_core::Value;
    /// let reference = Value::from(42);
    /// let test = Value::from(43);
    /// let differences: Vec<_> = reference.compare(&test).collect::<Result<_, _>>()?;
    /// assert_eq!(differences.len(), 1);
    /// assert_eq!(differences[0].path, "");
    /// # Ok::<(), diffattr_core::DiffError>(())
    /// ```
    pub fn compare<'a>(&'a self, test: &'a Value) -> Differences<'a> {
        crate::diff::compare(self, test)
    }

    /// Parses a JSON document.
    ///
    /// Blank input yields [`Value::None`]. Integers become [`Value::Int`] and
    /// every other number becomes [`Value::Float`].
    ///
    /// ```
    /// # use diffattr_core::Value;
    /// let value = Value::from_json_str("{\"count\": 1, \"ratio\": 1.0}")?;
    /// assert!(matches!(value, Value::Map(_)));
    /// # Ok::<(), diffattr_core::ParseError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, ParseError> {
        if input.trim().is_empty() {
            return Ok(Self::None);
        }
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Parses a YAML document.
    ///
    /// ```
    /// # use diffattr_core::Value;
    /// let value = Value::from_yaml_str("---\nanswer: 42\n")?;
    /// assert!(matches!(value, Value::Map(_)));
    /// # Ok::<(), diffattr_core::ParseError>(())
    /// ```
    pub fn from_yaml_str(input: &str) -> Result<Self, ParseError> {
        if input.trim().is_empty() {
            return Ok(Self::None);
        }
        let value: YamlValue = serde_yaml::from_str(input)?;
        Self::from_yaml_value(value)
    }

    /// Converts a serde JSON value.
    pub fn from_json_value(value: JsonValue) -> Result<Self, ParseError> {
        match value {
            JsonValue::Null => Ok(Self::None),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => {
                if let Some(int) = num.as_i64() {
                    return Ok(Self::Int(int));
                }
                if num.is_u64() {
                    return Err(ParseError::NumberOutOfRange { value: num.to_string() });
                }
                match num.as_f64() {
                    Some(float) => Ok(Self::Float(Number::new(float))),
                    None => Err(ParseError::NumberOutOfRange { value: num.to_string() }),
                }
            }
            JsonValue::String(s) => Ok(Self::Str(s)),
            JsonValue::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(Self::from_json_value(value)?);
                }
                Ok(Self::List(items))
            }
            JsonValue::Object(map) => {
                let mut object = BTreeMap::new();
                for (key, value) in map {
                    object.insert(key, Self::from_json_value(value)?);
                }
                Ok(Self::Map(object))
            }
        }
    }

    fn from_yaml_value(value: YamlValue) -> Result<Self, ParseError> {
        match value {
            YamlValue::Null => Ok(Self::None),
            YamlValue::Bool(v) => Ok(Self::Bool(v)),
            YamlValue::Number(num) => {
                if let Some(int) = num.as_i64() {
                    return Ok(Self::Int(int));
                }
                if num.is_u64() {
                    return Err(ParseError::NumberOutOfRange { value: num.to_string() });
                }
                match num.as_f64() {
                    Some(float) => Ok(Self::Float(Number::new(float))),
                    None => Err(ParseError::NumberOutOfRange { value: num.to_string() }),
                }
            }
            YamlValue::String(s) => Ok(Self::Str(s)),
            YamlValue::Sequence(seq) => {
                let mut items = Vec::with_capacity(seq.len());
                for value in seq {
                    items.push(Self::from_yaml_value(value)?);
                }
                Ok(Self::List(items))
            }
            YamlValue::Mapping(map) => {
                let mut object = BTreeMap::new();
                for (key, value) in map {
                    let key = match key {
                        YamlValue::String(s) => s,
                        YamlValue::Number(n) => n.to_string(),
                        YamlValue::Bool(b) => b.to_string(),
                        other => {
                            return Err(ParseError::UnsupportedYamlKey {
                                found: format!("{other:?}"),
                            });
                        }
                    };
                    object.insert(key, Self::from_yaml_value(value)?);
                }
                Ok(Self::Map(object))
            }
            YamlValue::Tagged(tagged) => {
                Err(ParseError::UnsupportedYamlTag { tag: tagged.tag.to_string() })
            }
        }
    }

    /// Total order over values: kinds first, then contents.
    pub(crate) fn canonical_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::None, Self::None) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(*b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => {
                cmp_sequences(a, b)
            }
            (Self::Set(a), Self::Set(b)) => cmp_sequences(a.as_slice(), b.as_slice()),
            (Self::Map(a), Self::Map(b)) => {
                for ((key_a, value_a), (key_b, value_b)) in a.iter().zip(b.iter()) {
                    let ordering = key_a.cmp(key_b).then_with(|| value_a.canonical_cmp(value_b));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Self::Record(a), Self::Record(b)) => {
                a.type_name().cmp(b.type_name()).then_with(|| {
                    for ((name_a, value_a), (name_b, value_b)) in a.fields().zip(b.fields()) {
                        let ordering =
                            name_a.cmp(name_b).then_with(|| value_a.canonical_cmp(value_b));
                        if ordering != Ordering::Equal {
                            return ordering;
                        }
                    }
                    a.len().cmp(&b.len())
                })
            }
            (Self::Opaque(a), Self::Opaque(b)) => {
                a.type_name().cmp(b.type_name()).then_with(|| a.repr().cmp(b.repr()))
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::Str(_) => 4,
            Self::List(_) => 5,
            Self::Tuple(_) => 6,
            Self::Set(_) => 7,
            Self::Map(_) => 8,
            Self::Record(_) => 9,
            Self::Opaque(_) => 10,
        }
    }
}

fn cmp_sequences(lhs: &[Value], rhs: &[Value]) -> Ordering {
    for (a, b) in lhs.iter().zip(rhs.iter()) {
        let ordering = a.canonical_cmp(b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    lhs.len().cmp(&rhs.len())
}

impl TryFrom<JsonValue> for Value {
    type Error = ParseError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(Number::new(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<ValueSet> for Value {
    fn from(value: ValueSet) -> Self {
        Self::Set(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self::Map(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Self::Opaque(value)
    }
}

fn write_joined<'v, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'v Value>,
{
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::Set(items) => {
                f.write_str("{")?;
                write_joined(f, items)?;
                f.write_str("}")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (idx, (key, value)) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Record(record) => write!(f, "{record}"),
            Self::Opaque(opaque) => write!(f, "{opaque}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::None => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(v.get()),
            Self::Str(v) => serializer.serialize_str(v),
            Self::List(items) | Self::Tuple(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Record(record) => {
                let mut out = serializer.serialize_map(Some(record.len()))?;
                for (name, value) in record.fields() {
                    out.serialize_entry(name, value)?;
                }
                out.end()
            }
            Self::Opaque(opaque) => serializer.collect_str(opaque),
        }
    }
}
