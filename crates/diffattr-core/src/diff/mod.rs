//! Difference records and the traversal that produces them.
//!
//! [`compare`] walks the reference and test values together, depth first
//! and pre-order, and lazily yields a [`Difference`] for every pair that
//! disagrees by type or by equality. A composite's own record is yielded
//! before the records of its children.
//!
//! Pending pairs wait on an explicit stack, so a consumer may stop pulling
//! at any point. The equality check on each pair is the recursive
//! `PartialEq` of [`Value`], so very deep nesting can still exhaust the
//! call stack.

mod fields;
mod mapping;
mod path;
mod sequence;

pub use path::{Path, PathSegment};

use std::iter::FusedIterator;

use serde::Serialize;
use tracing::{debug, trace};

use crate::{DiffError, Value};

/// Stand-in for keys and fields missing on the test side.
static ABSENT: Value = Value::None;

/// A single point where the reference and test values disagree.
///
/// ```
/// # use diffattr_core::{compare, Value};
/// let reference = Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
/// let test = Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(4)]);
/// let differences: Vec<_> = compare(&reference, &test).collect::<Result<_, _>>()?;
/// assert_eq!(differences.len(), 2);
/// assert_eq!(differences[1].path, "[2]");
/// assert_eq!(differences[1].reference, &Value::Int(3));
/// assert_eq!(differences[1].test, &Value::Int(4));
/// # Ok::<(), diffattr_core::DiffError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Difference<'a> {
    /// Location relative to the comparison root.
    pub path: Path,
    /// Reference-side value at `path`.
    #[serde(rename = "ref")]
    pub reference: &'a Value,
    /// Test-side value at `path`.
    pub test: &'a Value,
}

impl<'a> Difference<'a> {
    /// Creates a difference record.
    #[must_use]
    pub fn new(path: Path, reference: &'a Value, test: &'a Value) -> Self {
        Self { path, reference, test }
    }

    /// Indicates whether the two sides disagree by type rather than by value.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        self.reference.kind() != self.test.kind()
    }
}

/// Pending pair of values to inspect.
pub(super) struct Frame<'a> {
    path: Path,
    reference: &'a Value,
    test: &'a Value,
}

impl<'a> Frame<'a> {
    pub(super) fn new(path: Path, reference: &'a Value, test: &'a Value) -> Self {
        Self { path, reference, test }
    }
}

/// Lazy, single-pass sequence of differences returned by [`compare`].
///
/// Items are `Err` only once: when an unsupported value is reached the
/// iterator yields the error and is exhausted afterwards.
pub struct Differences<'a> {
    stack: Vec<Frame<'a>>,
    pending: Option<DiffError>,
    emitted: usize,
    finished: bool,
}

/// Lazily yields every difference between `reference` and `test`.
///
/// ```
/// # use diffattr_core::{compare, Value};
/// let reference = Value::map([("key1", Value::from("value1")), ("key2", Value::from("value2"))]);
/// let test = Value::map([("key1", Value::from("value1")), ("key2", Value::from("value3"))]);
/// let paths: Vec<String> = compare(&reference, &test)
///     .map(|item| item.map(|difference| difference.path.to_string()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(paths, ["", "[key2]"]);
/// # Ok::<(), diffattr_core::DiffError>(())
/// ```
pub fn compare<'a>(reference: &'a Value, test: &'a Value) -> Differences<'a> {
    debug!(reference = %reference.kind(), test = %test.kind(), "comparing values");
    Differences {
        stack: vec![Frame::new(Path::new(), reference, test)],
        pending: None,
        emitted: 0,
        finished: false,
    }
}

impl<'a> Differences<'a> {
    fn visit(&mut self, frame: Frame<'a>) -> Option<Result<Difference<'a>, DiffError>> {
        let Frame { path, reference, test } = frame;

        if reference.kind() != test.kind() {
            trace!(path = %path, reference = %reference.kind(), test = %test.kind(), "type mismatch");
            return Some(Ok(self.emit(path, reference, test)));
        }

        let mismatch = if reference != test {
            trace!(path = %path, "value mismatch");
            Some(self.emit(path.clone(), reference, test))
        } else {
            None
        };

        match self.descend(&path, reference, test) {
            Ok(()) => mismatch.map(Ok),
            Err(err) => {
                self.stack.clear();
                self.finished = true;
                match mismatch {
                    Some(difference) => {
                        self.pending = Some(err);
                        Some(Ok(difference))
                    }
                    None => Some(Err(err)),
                }
            }
        }
    }

    fn descend(
        &mut self,
        path: &Path,
        reference: &'a Value,
        test: &'a Value,
    ) -> Result<(), DiffError> {
        let frames = match (reference, test) {
            (Value::List(lhs), Value::List(rhs)) | (Value::Tuple(lhs), Value::Tuple(rhs)) => {
                sequence::element_frames(path, lhs, rhs)
            }
            (Value::Set(lhs), Value::Set(rhs)) => {
                sequence::element_frames(path, lhs.as_slice(), rhs.as_slice())
            }
            (Value::Map(lhs), Value::Map(rhs)) => mapping::entry_frames(path, lhs, rhs),
            (Value::Record(lhs), Value::Record(rhs)) => fields::field_frames(path, lhs, rhs),
            (Value::Opaque(opaque), _) => {
                debug!(path = %path, type_name = opaque.type_name(), "unsupported type");
                return Err(DiffError::UnsupportedType {
                    type_name: opaque.type_name().to_owned(),
                    path: path.to_string(),
                });
            }
            // Primitives: equality already decided the pair.
            _ => return Ok(()),
        };
        self.stack.extend(frames.into_iter().rev());
        Ok(())
    }

    fn emit(&mut self, path: Path, reference: &'a Value, test: &'a Value) -> Difference<'a> {
        self.emitted += 1;
        Difference::new(path, reference, test)
    }
}

impl<'a> Iterator for Differences<'a> {
    type Item = Result<Difference<'a>, DiffError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }
        while let Some(frame) = self.stack.pop() {
            if let Some(item) = self.visit(frame) {
                return Some(item);
            }
        }
        if !self.finished {
            self.finished = true;
            debug!(differences = self.emitted, "comparison finished");
        }
        None
    }
}

impl FusedIterator for Differences<'_> {}
