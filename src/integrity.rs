use crate::{DataNode, ErrorCode, NodeId, TsError};

/// Call `f(id, pos)` for every node whose id repeats an earlier node's id.
///
/// Quadratic, allocation-free. A duplicate seen three times is reported for the second and
/// third occurrence.
pub(crate) fn for_each_duplicate(nodes: &[DataNode<'_>], mut f: impl FnMut(NodeId, usize)) {
    for (pos, node) in nodes.iter().enumerate() {
        if nodes[..pos].iter().any(|earlier| earlier.id() == node.id()) {
            f(node.id(), pos);
        }
    }
}

/// Check that every node id in `nodes` is unique.
///
/// [`Context::new`](crate::Context::new) only logs duplicates and keeps going; use this to
/// reject a table up front.
///
/// # Errors
///
/// Returns `DuplicateId` with the position of the first node whose id was declared before.
pub fn check_ids(nodes: &[DataNode<'_>]) -> Result<(), TsError> {
    let mut first = None;
    for_each_duplicate(nodes, |_, pos| {
        if first.is_none() {
            first = Some(pos);
        }
    });
    match first {
        Some(pos) => Err(TsError::integrity(ErrorCode::DuplicateId, pos)),
        None => Ok(()),
    }
}
