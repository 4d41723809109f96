use super::{Frame, Path, PathSegment};
use crate::Value;

/// Pairs elements by position. Trailing elements of the longer side are
/// left to the parent's equality record.
pub(super) fn element_frames<'a>(
    path: &Path,
    reference: &'a [Value],
    test: &'a [Value],
) -> Vec<Frame<'a>> {
    reference
        .iter()
        .zip(test.iter())
        .enumerate()
        .map(|(index, (lhs, rhs))| Frame::new(path.child(PathSegment::index(index)), lhs, rhs))
        .collect()
}
