use core::fmt;

/// The high-level class of an error.
///
/// The engine distinguishes:
/// - **Lookup** errors: a path, name or index did not resolve.
/// - **Integrity** errors: the node table violates a structural rule.
/// - **Storage** errors: a value does not fit the borrowed storage of a node.
/// - **Access** errors: the current role may not perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsErrorKind {
    /// Resolution failure.
    Lookup,
    /// Node table integrity failure.
    Integrity,
    /// Value storage failure.
    Storage,
    /// Access control failure.
    Access,
}

/// A structured error code identifying why an operation was rejected.
///
/// String-free so it stays usable in `no_std` builds and on the request hot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// No node matches the requested id, name or path segment.
    NotFound,
    /// The path has more segments than [`MAX_PATH_DEPTH`](crate::MAX_PATH_DEPTH).
    DepthLimitExceeded,
    /// A numeric record selector is not a valid unsigned integer.
    InvalidIndex,

    /// Two nodes in the table share the same id.
    DuplicateId,

    /// The destination buffer cannot hold the result.
    BufferTooSmall,
    /// The value exceeds the capacity of the node storage.
    CapacityExceeded,
    /// The node does not hold a value of the requested type.
    TypeMismatch,

    /// The operation is permitted for some role, but not the current one.
    Unauthorized,
    /// The operation is not permitted for any role.
    Forbidden,
}

/// An engine error with a classification, a stable code and a position.
///
/// `offset` is the byte offset of the failing segment for lookup errors and the
/// table position of the offending node for integrity errors. It is `0` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TsError {
    /// The error kind.
    pub kind: TsErrorKind,
    /// The error code.
    pub code: ErrorCode,
    /// Position where the error was detected.
    pub offset: usize,
}

impl TsError {
    /// Construct a lookup error at `offset`.
    #[inline]
    #[must_use]
    pub const fn lookup(code: ErrorCode, offset: usize) -> Self {
        Self {
            kind: TsErrorKind::Lookup,
            code,
            offset,
        }
    }

    /// Construct an integrity error for the node at table position `pos`.
    #[inline]
    #[must_use]
    pub const fn integrity(code: ErrorCode, pos: usize) -> Self {
        Self {
            kind: TsErrorKind::Integrity,
            code,
            offset: pos,
        }
    }

    /// Construct a storage error.
    #[inline]
    #[must_use]
    pub const fn storage(code: ErrorCode) -> Self {
        Self {
            kind: TsErrorKind::Storage,
            code,
            offset: 0,
        }
    }

    /// Construct an access error.
    #[inline]
    #[must_use]
    pub const fn access(code: ErrorCode) -> Self {
        Self {
            kind: TsErrorKind::Access,
            code,
            offset: 0,
        }
    }

    /// Returns true iff this error means "no such node".
    ///
    /// Depth-exceeded and malformed record selectors count as not-found: callers
    /// see a single failure class for anything that did not resolve.
    #[inline]
    #[must_use]
    pub const fn is_not_found(self) -> bool {
        matches!(self.kind, TsErrorKind::Lookup)
    }
}

impl fmt::Display for TsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.code {
            ErrorCode::NotFound => "no such node",
            ErrorCode::DepthLimitExceeded => "path depth limit exceeded",
            ErrorCode::InvalidIndex => "invalid record index",

            ErrorCode::DuplicateId => "duplicate node id",

            ErrorCode::BufferTooSmall => "destination buffer too small",
            ErrorCode::CapacityExceeded => "value exceeds node capacity",
            ErrorCode::TypeMismatch => "node type mismatch",

            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::Forbidden => "forbidden",
        };

        match self.kind {
            TsErrorKind::Lookup => write!(f, "lookup failed at {}: {msg}", self.offset),
            TsErrorKind::Integrity => {
                write!(f, "node table invalid at position {}: {msg}", self.offset)
            }
            TsErrorKind::Storage => write!(f, "storage access failed: {msg}"),
            TsErrorKind::Access => write!(f, "access denied: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TsError {}
