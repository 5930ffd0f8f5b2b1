use alloc::vec::Vec;
use core::alloc::Layout;

use crate::{DataNode, NodeId};

/// Sorted `(id, position)` pairs, one per distinct id.
///
/// Where ids repeat, only the first-declared position is kept, so indexed lookups agree with
/// a linear scan.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    entries: Vec<(NodeId, usize)>,
}

#[inline]
fn try_vec_with_capacity<T>(cap: usize) -> Option<Vec<T>> {
    Layout::array::<T>(cap).ok()?;
    let mut v = Vec::new();
    v.try_reserve_exact(cap).ok()?;
    Some(v)
}

impl IdIndex {
    /// Build the index, calling `on_duplicate(id, pos)` for every node whose id was already
    /// declared at an earlier position.
    ///
    /// Returns `None` if the index cannot be allocated.
    pub fn build(
        nodes: &[DataNode<'_>],
        mut on_duplicate: impl FnMut(NodeId, usize),
    ) -> Option<Self> {
        let mut entries = try_vec_with_capacity(nodes.len())?;
        entries.extend(nodes.iter().enumerate().map(|(pos, node)| (node.id(), pos)));
        entries.sort_unstable();

        for pair in entries.windows(2) {
            if pair[0].0 == pair[1].0 {
                on_duplicate(pair[1].0, pair[1].1);
            }
        }
        entries.dedup_by_key(|entry| entry.0);

        Some(Self { entries })
    }

    /// Table position of the first node declared with `id`.
    #[inline]
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.entries
            .binary_search_by_key(&id, |entry| entry.0)
            .ok()
            .map(|i| self.entries[i].1)
    }
}
