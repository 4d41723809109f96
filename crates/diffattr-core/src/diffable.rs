use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Display;
use std::hash::BuildHasher;

use crate::{Number, Opaque, Record, Value};

/// Capability of converting a host value into the [`Value`] model.
///
/// Structs usually implement it through [`crate::diffable_record!`].
///
/// ```
/// # use diffattr_core::{Diffable, Value};
/// assert_eq!(Some(3).to_value(), Value::Int(3));
/// assert_eq!(None::<i32>.to_value(), Value::None);
/// assert!(matches!((1, "a").to_value(), Value::Tuple(_)));
/// ```
pub trait Diffable {
    /// Converts `self` into a [`Value`].
    fn to_value(&self) -> Value;
}

impl Diffable for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Diffable for Record {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl Diffable for Opaque {
    fn to_value(&self) -> Value {
        Value::Opaque(self.clone())
    }
}

impl Diffable for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! int_impls {
    ($($ty:ty),*) => {
        $(impl Diffable for $ty {
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }
        })*
    };
}

int_impls!(i8, i16, i32, i64, u8, u16, u32);

impl Diffable for f32 {
    fn to_value(&self) -> Value {
        Value::Float(Number::from(*self))
    }
}

impl Diffable for f64 {
    fn to_value(&self) -> Value {
        Value::Float(Number::new(*self))
    }
}

impl Diffable for Number {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Diffable for char {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl Diffable for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl Diffable for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl<T: Diffable + ?Sized> Diffable for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Diffable + ?Sized> Diffable for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Diffable> Diffable for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::None,
        }
    }
}

impl<T: Diffable> Diffable for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Diffable::to_value).collect())
    }
}

impl<T: Diffable, const N: usize> Diffable for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: Diffable> Diffable for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

macro_rules! tuple_impls {
    ($(($($name:ident : $idx:tt),+))+) => {
        $(impl<$($name: Diffable),+> Diffable for ($($name,)+) {
            fn to_value(&self) -> Value {
                Value::Tuple(vec![$(self.$idx.to_value()),+])
            }
        })+
    };
}

tuple_impls! {
    (A: 0)
    (A: 0, B: 1)
    (A: 0, B: 1, C: 2)
    (A: 0, B: 1, C: 2, D: 3)
}

impl<T: Diffable> Diffable for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::set(self.iter().map(Diffable::to_value))
    }
}

impl<T: Diffable, S: BuildHasher> Diffable for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::set(self.iter().map(Diffable::to_value))
    }
}

/// Keys are converted with `Display`. Distinct keys that render to the same
/// string collapse into one entry, the last one in iteration order winning;
/// debug builds panic on such a collision.
impl<K: Display, V: Diffable> Diffable for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        display_keyed(self.iter(), self.len())
    }
}

/// See the `BTreeMap` impl for how keys are converted.
impl<K: Display, V: Diffable, S: BuildHasher> Diffable for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        display_keyed(self.iter(), self.len())
    }
}

fn display_keyed<'a, K, V, I>(entries: I, len: usize) -> Value
where
    K: Display + 'a,
    V: Diffable + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let map: BTreeMap<String, Value> =
        entries.map(|(key, value)| (key.to_string(), value.to_value())).collect();
    debug_assert_eq!(map.len(), len, "map keys collide once rendered with Display");
    Value::Map(map)
}
