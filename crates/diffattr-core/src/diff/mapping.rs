use std::collections::BTreeMap;

use super::{Frame, Path, PathSegment, ABSENT};
use crate::Value;

/// Visits every reference key. Keys missing from the test side read as
/// [`Value::None`]; keys only present on the test side are never visited.
pub(super) fn entry_frames<'a>(
    path: &Path,
    reference: &'a BTreeMap<String, Value>,
    test: &'a BTreeMap<String, Value>,
) -> Vec<Frame<'a>> {
    reference
        .iter()
        .map(|(key, lhs)| {
            let rhs = test.get(key).unwrap_or(&ABSENT);
            Frame::new(path.child(PathSegment::key(key.as_str())), lhs, rhs)
        })
        .collect()
}
