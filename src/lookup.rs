//! Node resolution by id, name and path.
//!
//! The node table is flat: a node refers to its parent only by id. Paths are resolved by
//! descending one segment at a time, each segment looked up by name among the children of the
//! node found for the previous one. Top-level nodes are the children of
//! [`ID_ROOT`](crate::ID_ROOT).
//!
//! ```text
//! conf/BatCharging_V    -> node "BatCharging_V" under "conf"
//! conf/                 -> node "conf"
//! log/3                 -> record 3 of the records node "log" (endpoint lookups only)
//! ```

use crate::{Context, DataNode, ErrorCode, NodeId, NodeType, TsError, ID_ROOT, MAX_PATH_DEPTH};

/// A resolved node plus an optional record selector.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    /// The resolved node. For indexed paths this is the records node.
    pub node: &'a DataNode<'a>,
    /// Record index, present iff the path ended in a numeric segment below a records node.
    pub index: Option<usize>,
}

impl<'a> Endpoint<'a> {
    #[inline]
    const fn plain(node: &'a DataNode<'a>) -> Self {
        Self { node, index: None }
    }
}

/// Parse a record selector, detecting the base from its prefix.
///
/// `0x`/`0X` selects hex, a leading `0` octal, anything else decimal. Parsing stops at the
/// first character that is not a digit of the base, so `3a` selects record 3. The segment
/// always starts with a decimal digit.
fn parse_index(segment: &str, offset: usize) -> Result<usize, TsError> {
    let bytes = segment.as_bytes();
    let (radix, digits) = match bytes {
        [b'0', b'x' | b'X', next, ..] if next.is_ascii_hexdigit() => (16, &bytes[2..]),
        [b'0', ..] => (8, bytes),
        _ => (10, bytes),
    };

    let mut value: usize = 0;
    for &b in digits {
        let Some(digit) = char::from(b).to_digit(radix) else {
            break;
        };
        value = value
            .checked_mul(radix as usize)
            .and_then(|v| v.checked_add(digit as usize))
            .ok_or_else(|| TsError::lookup(ErrorCode::InvalidIndex, offset))?;
    }
    Ok(value)
}

impl<'a> Context<'a> {
    /// Find the first node declared with `id`.
    #[must_use]
    pub fn find_by_id(&self, id: NodeId) -> Option<&'a DataNode<'a>> {
        let nodes = self.nodes;
        self.position(id).and_then(|pos| nodes.get(pos))
    }

    /// Find the first node named exactly `name`.
    ///
    /// With `parent` set, only children of that node are considered; with `None`, nodes under
    /// any parent match. Names must match in full: `"foo"` never matches `"fooBar"`.
    #[must_use]
    pub fn find_by_name(&self, name: &str, parent: Option<NodeId>) -> Option<&'a DataNode<'a>> {
        self.nodes.iter().find(|node| {
            !matches!(parent, Some(p) if node.parent() != p) && node.name() == name
        })
    }

    /// Iterate the nodes declared with `parent` as parent, in declaration order.
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = &'a DataNode<'a>> + 'a {
        self.nodes.iter().filter(move |node| node.parent() == parent)
    }

    /// Find a node by its slash-separated path.
    ///
    /// Shorthand for [`resolve_path`](Self::resolve_path) that drops the failure reason.
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<&'a DataNode<'a>> {
        self.resolve_path(path).ok()
    }

    /// Resolve a slash-separated path to a node.
    ///
    /// A trailing slash is ignored: `"conf/"` resolves like `"conf"`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path is empty or any segment does not name a child of the
    /// node before it, and `DepthLimitExceeded` if the path has more than
    /// [`MAX_PATH_DEPTH`] segments. The offset is the start of the failing segment.
    pub fn resolve_path(&self, path: &str) -> Result<&'a DataNode<'a>, TsError> {
        self.descend(path, false).map(|endpoint| endpoint.node)
    }

    /// Find the endpoint a path addresses.
    ///
    /// Shorthand for [`resolve_endpoint`](Self::resolve_endpoint) that drops the failure
    /// reason.
    #[must_use]
    pub fn find_endpoint(&self, path: &str) -> Option<Endpoint<'a>> {
        self.resolve_endpoint(path).ok()
    }

    /// Resolve a path that may end in a record index.
    ///
    /// Resolves like [`resolve_path`](Self::resolve_path), except that a final segment
    /// starting with an ASCII digit directly below a records node selects a record: the
    /// records node is returned together with the index. A trailing slash does not change
    /// this, so `log/3/` selects the same record as `log/3`. Below any other node a numeric
    /// segment is looked up as a name.
    ///
    /// The selector accepts decimal, `0x` hex and leading-zero octal, and ends at the first
    /// character that is not a digit of its base.
    ///
    /// # Errors
    ///
    /// As [`resolve_path`](Self::resolve_path), plus `InvalidIndex` if the record selector
    /// does not fit `usize`.
    pub fn resolve_endpoint(&self, path: &str) -> Result<Endpoint<'a>, TsError> {
        self.descend(path, true)
    }

    fn child(
        &self,
        name: &str,
        parent: NodeId,
        offset: usize,
    ) -> Result<&'a DataNode<'a>, TsError> {
        self.find_by_name(name, Some(parent)).ok_or_else(|| {
            log::trace!("no node {name:?} under 0x{parent:X}");
            TsError::lookup(ErrorCode::NotFound, offset)
        })
    }

    fn descend(&self, path: &str, records_index: bool) -> Result<Endpoint<'a>, TsError> {
        if path.is_empty() {
            return Err(TsError::lookup(ErrorCode::NotFound, 0));
        }

        let mut parent = ID_ROOT;
        let mut current: Option<&'a DataNode<'a>> = None;
        let mut start = 0;

        for _ in 0..MAX_PATH_DEPTH {
            let rest = &path[start..];
            let (segment, last) = match rest.find('/') {
                None => (rest, true),
                Some(end) => (&rest[..end], start + end + 1 == path.len()),
            };

            if last {
                if let Some(node) = current {
                    let numeric = segment.as_bytes().first().is_some_and(u8::is_ascii_digit);
                    if records_index && numeric && node.node_type() == NodeType::Records {
                        let index = parse_index(segment, start)?;
                        return Ok(Endpoint {
                            node,
                            index: Some(index),
                        });
                    }
                }
                return self.child(segment, parent, start).map(Endpoint::plain);
            }

            let node = self.child(segment, parent, start)?;
            parent = node.id();
            current = Some(node);
            start += segment.len() + 1;
        }

        log::trace!("path {path:?} deeper than {MAX_PATH_DEPTH} segments");
        Err(TsError::lookup(ErrorCode::DepthLimitExceeded, start))
    }

    /// Write the path of `node` into `buf` and return its length.
    ///
    /// The path is `"parent/name"` for a child node and just `"name"` for a top-level node.
    /// Nothing is written unless the whole path fits.
    ///
    /// # Errors
    ///
    /// Returns `BufferTooSmall` if the path does not fit `buf`, and `NotFound` if the node's
    /// parent id is not in the table.
    pub fn get_path(&self, node: &DataNode<'_>, buf: &mut [u8]) -> Result<usize, TsError> {
        let prefix = if node.is_top_level() {
            None
        } else {
            let parent = self
                .find_by_id(node.parent())
                .ok_or_else(|| TsError::lookup(ErrorCode::NotFound, 0))?;
            Some(parent.name())
        };

        let name = node.name().as_bytes();
        let len = prefix.map_or(0, |p| p.len() + 1) + name.len();
        let out = buf
            .get_mut(..len)
            .ok_or_else(|| TsError::storage(ErrorCode::BufferTooSmall))?;

        let mut pos = 0;
        if let Some(p) = prefix {
            out[..p.len()].copy_from_slice(p.as_bytes());
            out[p.len()] = b'/';
            pos = p.len() + 1;
        }
        out[pos..].copy_from_slice(name);
        Ok(len)
    }
}
