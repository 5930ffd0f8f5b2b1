//! Publish/subscribe subset tagging.
//!
//! Each node carries a static [`Subsets`] mask naming the publish groups it belongs to. The
//! context holds the currently subscribed mask and one global update hook. Deciding when to
//! publish is left to the publisher; this module only classifies nodes and fires the hook.

use bitflags::bitflags;

use crate::{Context, DataNode, UpdateCallback};

bitflags! {
    /// Publish groups a node belongs to.
    ///
    /// The meaning of each bit is defined by the embedding application, for example:
    ///
    /// ```
    /// use thingset_core::Subsets;
    ///
    /// const REPORT: Subsets = Subsets::from_bits_retain(1 << 0);
    /// const CAN: Subsets = Subsets::from_bits_retain(1 << 1);
    ///
    /// assert!((REPORT | CAN).intersects(CAN));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct Subsets: u16 {
        const _ = !0;
    }
}

impl<'a> Context<'a> {
    /// Register the update hook and the subsets it listens to.
    ///
    /// Replaces any earlier registration. Pass `None` to unregister.
    pub fn set_update_callback(&mut self, subsets: Subsets, callback: Option<UpdateCallback>) {
        self.subscribed = subsets;
        self.on_update = callback;
    }

    /// The subsets the update hook listens to.
    #[inline]
    #[must_use]
    pub const fn subscribed_subsets(&self) -> Subsets {
        self.subscribed
    }

    /// Fire the update hook for a node that was just written.
    ///
    /// The hook runs iff one is registered and the node's subsets intersect the subscribed
    /// set. Returns whether it ran.
    pub fn notify_update(&self, node: &DataNode<'_>) -> bool {
        match self.on_update {
            Some(cb) if node.subsets().intersects(self.subscribed) => {
                cb();
                true
            }
            _ => false,
        }
    }

    /// Iterate the nodes tagged with any of `subsets`, in declaration order.
    pub fn subset_nodes(&self, subsets: Subsets) -> impl Iterator<Item = &'a DataNode<'a>> + 'a {
        self.nodes
            .iter()
            .filter(move |node| node.subsets().intersects(subsets))
    }
}
