use super::{Frame, Path, PathSegment, ABSENT};
use crate::Record;

/// Visits the reference record's fields in declaration order, reading the
/// same field from the test record or [`crate::Value::None`] when missing.
pub(super) fn field_frames<'a>(
    path: &Path,
    reference: &'a Record,
    test: &'a Record,
) -> Vec<Frame<'a>> {
    reference
        .fields()
        .map(|(name, lhs)| {
            let rhs = test.get(name).unwrap_or(&ABSENT);
            Frame::new(path.child(PathSegment::field(name)), lhs, rhs)
        })
        .collect()
}
