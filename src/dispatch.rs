//! Request classification and dispatch.
//!
//! Both wire syntaxes share one node table and one session. The first byte of a request
//! selects the syntax:
//!
//! | first byte            | syntax | meaning                 |
//! |-----------------------|--------|-------------------------|
//! | `0x00..=0x1F`         | binary | function code           |
//! | `?`                   | text   | fetch                   |
//! | `=`                   | text   | update (patch)          |
//! | `+`                   | text   | create (post)           |
//! | `-`                   | text   | delete                  |
//! | `!`                   | text   | execute                 |
//!
//! Anything else is not a request and is answered with an empty response.

use crate::Context;

/// Method of a text-mode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMethod {
    /// `?`: read values.
    Fetch,
    /// `=`: change values.
    Update,
    /// `+`: add an element.
    Create,
    /// `-`: remove an element.
    Delete,
    /// `!`: run an executable.
    Exec,
}

impl TextMethod {
    /// The request character of this method.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Fetch => b'?',
            Self::Update => b'=',
            Self::Create => b'+',
            Self::Delete => b'-',
            Self::Exec => b'!',
        }
    }
}

/// The syntax a request is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Compact binary framing.
    Binary,
    /// Human-readable text framing.
    Text(TextMethod),
}

impl RequestKind {
    /// First byte values below this select the binary syntax.
    pub const BINARY_LIMIT: u8 = 0x20;

    /// Classify a request by its first byte. Returns `None` if it starts no request.
    #[must_use]
    pub const fn classify(first: u8) -> Option<Self> {
        if first < Self::BINARY_LIMIT {
            return Some(Self::Binary);
        }
        let method = match first {
            b'?' => TextMethod::Fetch,
            b'=' => TextMethod::Update,
            b'+' => TextMethod::Create,
            b'-' => TextMethod::Delete,
            b'!' => TextMethod::Exec,
            _ => return None,
        };
        Some(Self::Text(method))
    }
}

/// A wire syntax implementation.
///
/// A codec gets the full request, resolves the nodes it addresses through the context,
/// checks access against the session's grant and writes its response. It returns the number
/// of response bytes written, or zero if there is no response.
pub trait Codec {
    /// Handle one request.
    fn process(&mut self, ctx: &mut Context<'_>, request: &[u8], response: &mut [u8]) -> usize;
}

impl<F> Codec for F
where
    F: FnMut(&mut Context<'_>, &[u8], &mut [u8]) -> usize,
{
    #[inline]
    fn process(&mut self, ctx: &mut Context<'_>, request: &[u8], response: &mut [u8]) -> usize {
        self(ctx, request, response)
    }
}

/// Routes requests to the binary or text codec.
///
/// Holds no request state: each call is independent and all session state lives in the
/// [`Context`].
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<B, T> {
    binary: B,
    text: T,
}

impl<B: Codec, T: Codec> Dispatcher<B, T> {
    /// Create a dispatcher from the two codecs.
    #[inline]
    #[must_use]
    pub const fn new(binary: B, text: T) -> Self {
        Self { binary, text }
    }

    /// Handle one request and return the codec's status.
    ///
    /// An empty request is ignored and `response` is left untouched. A request that starts
    /// with neither a binary function code nor a text method gets an empty response: the
    /// first response byte is set to zero, if there is one. Both cases return zero.
    pub fn process(
        &mut self,
        ctx: &mut Context<'_>,
        request: &[u8],
        response: &mut [u8],
    ) -> usize {
        let Some(&first) = request.first() else {
            return 0;
        };

        match RequestKind::classify(first) {
            Some(RequestKind::Binary) => {
                log::debug!("binary request, {} bytes", request.len());
                self.binary.process(ctx, request, response)
            }
            Some(RequestKind::Text(method)) => {
                log::debug!("text request {method:?}, {} bytes", request.len());
                self.text.process(ctx, request, response)
            }
            None => {
                log::debug!("ignoring non-request starting with 0x{first:02X}");
                if let Some(b) = response.first_mut() {
                    *b = 0;
                }
                0
            }
        }
    }

    /// The binary codec.
    #[inline]
    #[must_use]
    pub const fn binary(&self) -> &B {
        &self.binary
    }

    /// The text codec.
    #[inline]
    #[must_use]
    pub const fn text(&self) -> &T {
        &self.text
    }

    /// Take the two codecs back.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (B, T) {
        (self.binary, self.text)
    }
}
