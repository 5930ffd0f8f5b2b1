//! Node descriptors.

use core::cell::Cell;
use core::fmt;

use crate::storage::{Array, Buffer, Records};
use crate::{Access, Context, ErrorCode, Subsets, TsError};

/// Identifier of a node, unique within a table.
pub type NodeId = u16;

/// Hook invoked after a change, without arguments.
pub type UpdateCallback = fn();

/// The procedure behind an executable node.
///
/// Executables take no protocol arguments: a codec writes their parameters into the child
/// nodes first and then invokes the procedure. The context is passed so that a procedure can
/// look up its parameters and, for a login procedure, call
/// [`Context::set_authentication`].
#[derive(Clone, Copy)]
pub struct Procedure(for<'c, 'n> fn(&'c mut Context<'n>));

impl Procedure {
    /// Wrap a function.
    #[inline]
    #[must_use]
    pub const fn new(f: for<'c, 'n> fn(&'c mut Context<'n>)) -> Self {
        Self(f)
    }

    /// Run the procedure against `ctx`.
    #[inline]
    pub fn call(self, ctx: &mut Context<'_>) {
        (self.0)(ctx);
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Procedure")
    }
}

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeType {
    /// Boolean.
    Bool,
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 64-bit integer.
    U64,
    /// Signed 64-bit integer.
    I64,
    /// 32-bit float with a decimal places hint.
    F32,
    /// Fixed-capacity UTF-8 string.
    String,
    /// Fixed-capacity byte buffer.
    Bytes,
    /// Homogeneous array of scalars.
    Array,
    /// Repeating record addressed by index.
    Records,
    /// Path anchor without a value.
    Group,
    /// Node standing for a publish group.
    Subset,
    /// Executable procedure.
    Exec,
}

impl NodeType {
    /// Returns true iff nodes of this type carry a value.
    #[must_use]
    pub const fn has_value(self) -> bool {
        !matches!(self, Self::Group | Self::Subset | Self::Exec)
    }
}

/// Typed reference to the storage behind a node.
#[derive(Debug, Clone, Copy)]
pub enum NodeData<'a> {
    /// Boolean value.
    Bool(&'a Cell<bool>),
    /// `u8` value.
    U8(&'a Cell<u8>),
    /// `i8` value.
    I8(&'a Cell<i8>),
    /// `u16` value.
    U16(&'a Cell<u16>),
    /// `i16` value.
    I16(&'a Cell<i16>),
    /// `u32` value.
    U32(&'a Cell<u32>),
    /// `i32` value.
    I32(&'a Cell<i32>),
    /// `u64` value.
    U64(&'a Cell<u64>),
    /// `i64` value.
    I64(&'a Cell<i64>),
    /// `f32` value rendered with `decimals` decimal places.
    F32 {
        /// The value.
        value: &'a Cell<f32>,
        /// Decimal places hint.
        decimals: i16,
    },
    /// String buffer.
    String(Buffer<'a>),
    /// Byte buffer.
    Bytes(Buffer<'a>),
    /// Scalar array.
    Array(Array<'a>),
    /// Record array.
    Records(Records<'a>),
    /// Path anchor, with an optional hook run after its children were changed.
    Group(Option<UpdateCallback>),
    /// Publish group; fetching it lists the nodes tagged with these subsets.
    Subset(Subsets),
    /// Executable.
    Exec(Procedure),
}

impl NodeData<'_> {
    /// The type tag of this value.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Bool(_) => NodeType::Bool,
            Self::U8(_) => NodeType::U8,
            Self::I8(_) => NodeType::I8,
            Self::U16(_) => NodeType::U16,
            Self::I16(_) => NodeType::I16,
            Self::U32(_) => NodeType::U32,
            Self::I32(_) => NodeType::I32,
            Self::U64(_) => NodeType::U64,
            Self::I64(_) => NodeType::I64,
            Self::F32 { .. } => NodeType::F32,
            Self::String(_) => NodeType::String,
            Self::Bytes(_) => NodeType::Bytes,
            Self::Array(_) => NodeType::Array,
            Self::Records(_) => NodeType::Records,
            Self::Group(_) => NodeType::Group,
            Self::Subset(_) => NodeType::Subset,
            Self::Exec(_) => NodeType::Exec,
        }
    }
}

/// One addressable entry of a node table.
#[derive(Debug, Clone, Copy)]
pub struct DataNode<'a> {
    id: NodeId,
    parent: NodeId,
    name: &'a str,
    data: NodeData<'a>,
    access: Access,
    subsets: Subsets,
}

impl<'a> DataNode<'a> {
    /// Describe a node.
    ///
    /// `parent` is the id of the enclosing node, or [`ID_ROOT`](crate::ID_ROOT) for a
    /// top-level node.
    #[inline]
    #[must_use]
    pub const fn new(
        id: NodeId,
        name: &'a str,
        parent: NodeId,
        data: NodeData<'a>,
        access: Access,
        subsets: Subsets,
    ) -> Self {
        Self {
            id,
            parent,
            name,
            data,
            access,
            subsets,
        }
    }

    /// Describe a path anchor readable by anyone.
    #[inline]
    #[must_use]
    pub const fn group(id: NodeId, name: &'a str, parent: NodeId) -> Self {
        Self::new(
            id,
            name,
            parent,
            NodeData::Group(None),
            Access::ANY_R,
            Subsets::empty(),
        )
    }

    /// Describe an executable.
    #[inline]
    #[must_use]
    pub const fn exec(
        id: NodeId,
        name: &'a str,
        parent: NodeId,
        procedure: Procedure,
        access: Access,
    ) -> Self {
        Self::new(
            id,
            name,
            parent,
            NodeData::Exec(procedure),
            access,
            Subsets::empty(),
        )
    }

    /// Unique id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Id of the enclosing node.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> NodeId {
        self.parent
    }

    /// Name, unique among siblings by convention.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// The borrowed storage.
    #[inline]
    #[must_use]
    pub const fn data(&self) -> NodeData<'a> {
        self.data
    }

    /// The type tag.
    #[inline]
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.data.node_type()
    }

    /// Access mask.
    #[inline]
    #[must_use]
    pub const fn access(&self) -> Access {
        self.access
    }

    /// Publish groups this node belongs to.
    #[inline]
    #[must_use]
    pub const fn subsets(&self) -> Subsets {
        self.subsets
    }

    /// Returns true iff the node sits directly under the root.
    #[inline]
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent == crate::ID_ROOT
    }

    /// The change hook of a group node.
    #[inline]
    #[must_use]
    pub const fn callback(&self) -> Option<UpdateCallback> {
        match self.data {
            NodeData::Group(cb) => cb,
            _ => None,
        }
    }

    /// The buffer behind a string or bytes node.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for any other node type.
    pub const fn buffer(&self) -> Result<Buffer<'a>, TsError> {
        match self.data {
            NodeData::String(buf) | NodeData::Bytes(buf) => Ok(buf),
            _ => Err(TsError::storage(ErrorCode::TypeMismatch)),
        }
    }

    /// The array behind an array node.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for any other node type.
    pub const fn array(&self) -> Result<Array<'a>, TsError> {
        match self.data {
            NodeData::Array(array) => Ok(array),
            _ => Err(TsError::storage(ErrorCode::TypeMismatch)),
        }
    }

    /// The records behind a records node.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for any other node type.
    pub const fn records(&self) -> Result<Records<'a>, TsError> {
        match self.data {
            NodeData::Records(records) => Ok(records),
            _ => Err(TsError::storage(ErrorCode::TypeMismatch)),
        }
    }

    /// The procedure behind an executable node.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for any other node type.
    pub const fn procedure(&self) -> Result<Procedure, TsError> {
        match self.data {
            NodeData::Exec(procedure) => Ok(procedure),
            _ => Err(TsError::storage(ErrorCode::TypeMismatch)),
        }
    }

    /// Plain metadata view, for schema export.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[must_use]
    pub const fn meta(&self) -> NodeMeta<'a> {
        NodeMeta {
            id: self.id,
            parent: self.parent,
            name: self.name,
            node_type: self.node_type(),
            access: self.access,
            subsets: self.subsets,
        }
    }
}

/// Serializable description of a node without its value.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct NodeMeta<'a> {
    /// Unique id.
    pub id: NodeId,
    /// Id of the enclosing node.
    pub parent: NodeId,
    /// Name.
    pub name: &'a str,
    /// Type tag.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Access mask.
    pub access: Access,
    /// Publish groups.
    pub subsets: Subsets,
}
