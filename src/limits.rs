use crate::NodeId;

/// Maximum number of segments a path may have.
///
/// Deeper paths fail resolution even if every segment would resolve. A trailing
/// slash does not count as a segment.
pub const MAX_PATH_DEPTH: usize = 10;

/// Parent id of top-level nodes.
///
/// No node may use this id itself; it is the implicit root of every tree.
pub const ID_ROOT: NodeId = 0;
