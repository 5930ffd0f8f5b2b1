//! Protocol response codes.
//!
//! Both syntaxes report outcomes with the same one-byte codes: the binary syntax sends the
//! byte itself, the text syntax renders it as two hex digits (`:A4 Not Found.`). Codecs map
//! engine errors through `From<ErrorCode>` so both report failures alike.

use crate::ErrorCode;

/// One-byte response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StatusCode {
    /// A node or element was created.
    Created = 0x81,
    /// A node or element was deleted.
    Deleted = 0x82,
    /// The request was valid.
    Valid = 0x83,
    /// Values were changed.
    Changed = 0x84,
    /// The response carries content.
    Content = 0x85,

    /// The request is malformed.
    BadRequest = 0xA0,
    /// The current role is not allowed to do this.
    Unauthorized = 0xA1,
    /// No role is allowed to do this.
    Forbidden = 0xA3,
    /// The addressed node does not exist.
    NotFound = 0xA4,
    /// The method is not supported for this node.
    MethodNotAllowed = 0xA5,
    /// The request ended early.
    RequestIncomplete = 0xA8,
    /// The request conflicts with the node's state.
    Conflict = 0xA9,
    /// The request is larger than the device accepts.
    RequestTooLarge = 0xAD,
    /// The value has the wrong type or format.
    UnsupportedFormat = 0xAF,

    /// The device failed to process a valid request.
    InternalServerError = 0xC0,
    /// The request is valid but not implemented.
    NotImplemented = 0xC1,

    /// The response does not fit the response buffer.
    ResponseTooLarge = 0xE1,
}

impl StatusCode {
    /// The status byte.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parse a status byte.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x81 => Self::Created,
            0x82 => Self::Deleted,
            0x83 => Self::Valid,
            0x84 => Self::Changed,
            0x85 => Self::Content,
            0xA0 => Self::BadRequest,
            0xA1 => Self::Unauthorized,
            0xA3 => Self::Forbidden,
            0xA4 => Self::NotFound,
            0xA5 => Self::MethodNotAllowed,
            0xA8 => Self::RequestIncomplete,
            0xA9 => Self::Conflict,
            0xAD => Self::RequestTooLarge,
            0xAF => Self::UnsupportedFormat,
            0xC0 => Self::InternalServerError,
            0xC1 => Self::NotImplemented,
            0xE1 => Self::ResponseTooLarge,
            _ => return None,
        })
    }

    /// Returns true iff this status reports success.
    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        (self as u8) < 0xA0
    }

    /// Human-readable description used by the text syntax.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Created => "Created.",
            Self::Deleted => "Deleted.",
            Self::Valid => "Valid.",
            Self::Changed => "Changed.",
            Self::Content => "Content.",
            Self::BadRequest => "Bad Request.",
            Self::Unauthorized => "Unauthorized.",
            Self::Forbidden => "Forbidden.",
            Self::NotFound => "Not Found.",
            Self::MethodNotAllowed => "Method Not Allowed.",
            Self::RequestIncomplete => "Request Incomplete.",
            Self::Conflict => "Conflict.",
            Self::RequestTooLarge => "Request Too Large.",
            Self::UnsupportedFormat => "Unsupported Format.",
            Self::InternalServerError => "Internal Server Error.",
            Self::NotImplemented => "Not Implemented.",
            Self::ResponseTooLarge => "Response Too Large.",
        }
    }
}

impl From<ErrorCode> for StatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::NotFound | ErrorCode::DepthLimitExceeded | ErrorCode::InvalidIndex => {
                Self::NotFound
            }
            ErrorCode::DuplicateId => Self::InternalServerError,
            ErrorCode::BufferTooSmall => Self::ResponseTooLarge,
            ErrorCode::CapacityExceeded => Self::RequestTooLarge,
            ErrorCode::TypeMismatch => Self::UnsupportedFormat,
            ErrorCode::Unauthorized => Self::Unauthorized,
            ErrorCode::Forbidden => Self::Forbidden,
        }
    }
}

impl From<crate::TsError> for StatusCode {
    #[inline]
    fn from(err: crate::TsError) -> Self {
        err.code.into()
    }
}
