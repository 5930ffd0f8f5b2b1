//! Borrowed value storage.
//!
//! Node values live in storage owned by the embedding application. The engine only holds
//! shared references to [`Cell`]s, so codecs can update values through an immutable node
//! table while the application keeps ownership for the whole run.

use core::cell::Cell;

use crate::{ErrorCode, NodeType, TsError};

/// A fixed-capacity byte buffer with a separate used length.
///
/// Backs both string and byte-buffer nodes. Strings are stored without a terminator; the
/// used length is authoritative.
#[derive(Debug, Clone, Copy)]
pub struct Buffer<'a> {
    bytes: &'a [Cell<u8>],
    len: &'a Cell<usize>,
}

impl<'a> Buffer<'a> {
    /// Wrap application storage. `len` holds the number of used bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: &'a [Cell<u8>], len: &'a Cell<usize>) -> Self {
        Self { bytes, len }
    }

    /// Maximum number of bytes the buffer can hold.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Number of used bytes, clamped to the capacity.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.get().min(self.bytes.len())
    }

    /// Returns `true` iff no bytes are used.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the used bytes into `out` and return how many were copied.
    ///
    /// # Errors
    ///
    /// Returns `BufferTooSmall` if `out` is shorter than the used length.
    pub fn read(&self, out: &mut [u8]) -> Result<usize, TsError> {
        let len = self.len();
        let dst = out
            .get_mut(..len)
            .ok_or_else(|| TsError::storage(ErrorCode::BufferTooSmall))?;
        for (d, s) in dst.iter_mut().zip(self.bytes) {
            *d = s.get();
        }
        Ok(len)
    }

    /// Replace the contents with `src`.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if `src` is longer than the capacity; the stored value is
    /// left unchanged in that case.
    pub fn write(&self, src: &[u8]) -> Result<(), TsError> {
        let dst = self
            .bytes
            .get(..src.len())
            .ok_or_else(|| TsError::storage(ErrorCode::CapacityExceeded))?;
        for (d, s) in dst.iter().zip(src) {
            d.set(*s);
        }
        self.len.set(src.len());
        Ok(())
    }

    /// Mark the buffer as empty.
    #[inline]
    pub fn clear(&self) {
        self.len.set(0);
    }

    /// Returns true iff the used bytes equal `other`.
    #[must_use]
    pub fn eq_bytes(&self, other: &[u8]) -> bool {
        self.len() == other.len() && self.bytes.iter().zip(other).all(|(a, b)| a.get() == *b)
    }

    /// Copy the used bytes into a new vector.
    #[cfg(feature = "alloc")]
    #[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
    #[must_use]
    pub fn to_vec(&self) -> alloc::vec::Vec<u8> {
        self.bytes[..self.len()].iter().map(Cell::get).collect()
    }
}

/// Element storage of an array node.
#[derive(Debug, Clone, Copy)]
pub enum ArrayElems<'a> {
    /// Boolean elements.
    Bool(&'a [Cell<bool>]),
    /// `u8` elements.
    U8(&'a [Cell<u8>]),
    /// `i8` elements.
    I8(&'a [Cell<i8>]),
    /// `u16` elements.
    U16(&'a [Cell<u16>]),
    /// `i16` elements.
    I16(&'a [Cell<i16>]),
    /// `u32` elements.
    U32(&'a [Cell<u32>]),
    /// `i32` elements.
    I32(&'a [Cell<i32>]),
    /// `u64` elements.
    U64(&'a [Cell<u64>]),
    /// `i64` elements.
    I64(&'a [Cell<i64>]),
    /// `f32` elements.
    F32(&'a [Cell<f32>]),
}

impl ArrayElems<'_> {
    /// Number of element slots.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        match self {
            Self::Bool(s) => s.len(),
            Self::U8(s) => s.len(),
            Self::I8(s) => s.len(),
            Self::U16(s) => s.len(),
            Self::I16(s) => s.len(),
            Self::U32(s) => s.len(),
            Self::I32(s) => s.len(),
            Self::U64(s) => s.len(),
            Self::I64(s) => s.len(),
            Self::F32(s) => s.len(),
        }
    }

    /// Scalar type of the elements.
    #[must_use]
    pub const fn elem_type(&self) -> NodeType {
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
            Self::F32(_) => NodeType::F32,
        }
    }
}

/// A homogeneous fixed-capacity array with a used element count.
#[derive(Debug, Clone, Copy)]
pub struct Array<'a> {
    elems: ArrayElems<'a>,
    len: &'a Cell<usize>,
    decimals: i16,
}

impl<'a> Array<'a> {
    /// Wrap application storage. `decimals` is the number of decimal places used when
    /// rendering float elements.
    #[inline]
    #[must_use]
    pub const fn new(elems: ArrayElems<'a>, len: &'a Cell<usize>, decimals: i16) -> Self {
        Self {
            elems,
            len,
            decimals,
        }
    }

    /// The element storage.
    #[inline]
    #[must_use]
    pub const fn elems(&self) -> ArrayElems<'a> {
        self.elems
    }

    /// Scalar type of the elements.
    #[inline]
    #[must_use]
    pub const fn elem_type(&self) -> NodeType {
        self.elems.elem_type()
    }

    /// Number of element slots.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.elems.capacity()
    }

    /// Number of used elements, clamped to the capacity.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.get().min(self.capacity())
    }

    /// Returns `true` iff no elements are used.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the number of used elements.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if `len` is larger than the capacity.
    pub fn set_len(&self, len: usize) -> Result<(), TsError> {
        if len > self.capacity() {
            return Err(TsError::storage(ErrorCode::CapacityExceeded));
        }
        self.len.set(len);
        Ok(())
    }

    /// Decimal places hint for float elements.
    #[inline]
    #[must_use]
    pub const fn decimals(&self) -> i16 {
        self.decimals
    }
}

/// A repeating structured record addressed by integer index.
///
/// The record fields are declared as child nodes of the records node.
#[derive(Debug, Clone, Copy)]
pub struct Records<'a> {
    count: &'a Cell<usize>,
    capacity: usize,
}

impl<'a> Records<'a> {
    /// Wrap application storage holding up to `capacity` records, `count` of them in use.
    #[inline]
    #[must_use]
    pub const fn new(count: &'a Cell<usize>, capacity: usize) -> Self {
        Self { count, capacity }
    }

    /// Number of records in use, clamped to the capacity.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.count.get().min(self.capacity)
    }

    /// Returns `true` iff no records are in use.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of records.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true iff `index` selects a record in use.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len()
    }

    /// Set the number of records in use.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if `count` is larger than the capacity.
    pub fn set_len(&self, count: usize) -> Result<(), TsError> {
        if count > self.capacity {
            return Err(TsError::storage(ErrorCode::CapacityExceeded));
        }
        self.count.set(count);
        Ok(())
    }
}
