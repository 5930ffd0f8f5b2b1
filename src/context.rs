use crate::access::Operation;
use crate::integrity::for_each_duplicate;
use crate::{Access, DataNode, ErrorCode, NodeId, Subsets, TsError, UpdateCallback};

#[cfg(feature = "alloc")]
use crate::index::IdIndex;

/// Engine state for one session over one node table.
///
/// The table is borrowed for the lifetime of the context and never changes shape; only the
/// values its nodes reference do. The context additionally holds the granted role mask and
/// the update subscription.
///
/// A context serves one request at a time. Applications with concurrent sessions create one
/// context per session over the same table.
#[derive(Debug)]
pub struct Context<'a> {
    pub(crate) nodes: &'a [DataNode<'a>],
    #[cfg(feature = "alloc")]
    index: Option<IdIndex>,
    auth: Access,
    pub(crate) subscribed: Subsets,
    pub(crate) on_update: Option<UpdateCallback>,
}

fn report_duplicate(id: NodeId, pos: usize) {
    log::error!("duplicate data node id 0x{id:X} at position {pos}");
}

impl<'a> Context<'a> {
    /// Create a context over `nodes`.
    ///
    /// Duplicate ids are logged and otherwise tolerated: lookups by id return the
    /// first-declared node. Use [`check_ids`](crate::check_ids) to reject such tables.
    /// The session starts with the user role.
    #[must_use]
    pub fn new(nodes: &'a [DataNode<'a>]) -> Self {
        #[cfg(feature = "alloc")]
        let index = IdIndex::build(nodes, report_duplicate);
        #[cfg(feature = "alloc")]
        if index.is_none() {
            log::warn!("id index allocation failed, using linear lookups");
            for_each_duplicate(nodes, report_duplicate);
        }
        #[cfg(not(feature = "alloc"))]
        for_each_duplicate(nodes, report_duplicate);

        Self {
            nodes,
            #[cfg(feature = "alloc")]
            index,
            auth: Access::USR_MASK,
            subscribed: Subsets::empty(),
            on_update: None,
        }
    }

    /// The node table.
    #[inline]
    #[must_use]
    pub const fn nodes(&self) -> &'a [DataNode<'a>] {
        self.nodes
    }

    /// Number of nodes in the table.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` iff the table has no nodes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replace the granted role mask.
    ///
    /// The new mask is taken as is; no bits of the previous grant survive.
    #[inline]
    pub fn set_authentication(&mut self, auth: Access) {
        log::debug!("authentication set to {:#06x}", auth.bits());
        self.auth = auth;
    }

    /// The granted role mask.
    #[inline]
    #[must_use]
    pub const fn auth(&self) -> Access {
        self.auth
    }

    /// Returns true iff the current session may read `node`.
    #[inline]
    #[must_use]
    pub const fn can_read(&self, node: &DataNode<'_>) -> bool {
        node.access().readable_by(self.auth)
    }

    /// Returns true iff the current session may write `node`.
    #[inline]
    #[must_use]
    pub const fn can_write(&self, node: &DataNode<'_>) -> bool {
        node.access().writable_by(self.auth)
    }

    /// Check whether the current session may perform `op` on `node`.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if another role could perform the operation, and `Forbidden`
    /// if no role can.
    pub const fn authorize(&self, node: &DataNode<'_>, op: Operation) -> Result<(), TsError> {
        let access = node.access();
        if access.allows(op, self.auth) {
            Ok(())
        } else if access.permits_any(op) {
            Err(TsError::access(ErrorCode::Unauthorized))
        } else {
            Err(TsError::access(ErrorCode::Forbidden))
        }
    }

    /// Table position of the first node declared with `id`.
    pub(crate) fn position(&self, id: NodeId) -> Option<usize> {
        #[cfg(feature = "alloc")]
        if let Some(index) = &self.index {
            return index.position(id);
        }
        self.nodes.iter().position(|node| node.id() == id)
    }
}
