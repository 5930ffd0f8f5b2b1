//! Role-based access masks.
//!
//! Every node carries an [`Access`] mask and every [`Context`](crate::Context) carries the
//! granted mask of the current session. Both use the same bit layout:
//!
//! - low byte: read permission per role (`USR_R`, `EXP_R`, `MKR_R`)
//! - high byte: write permission per role (`USR_W`, `EXP_W`, `MKR_W`)
//!
//! An operation is allowed iff the node's bits for that operation intersect the granted mask.
//!
//! Reading is cumulative across roles (user ⊆ maker ⊆ expert), writing is not: maker and expert
//! writes are separate bits, so a node may be writable by a maker session but not by an expert
//! one. [`Role::grant`] encodes this.

use bitflags::bitflags;

bitflags! {
    /// Access mask of a node, or the granted mask of a session.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct Access: u16 {
        /// Readable by a normal user.
        const USR_R = 1 << 0;
        /// Readable by an expert.
        const EXP_R = 1 << 1;
        /// Readable by the maker.
        const MKR_R = 1 << 2;

        /// Writable by a normal user.
        const USR_W = 1 << 8;
        /// Writable by an expert.
        const EXP_W = 1 << 9;
        /// Writable by the maker.
        const MKR_W = 1 << 10;

        /// Readable by any role.
        const ANY_R = Self::USR_R.bits() | Self::EXP_R.bits() | Self::MKR_R.bits();
        /// Writable by any role.
        const ANY_W = Self::USR_W.bits() | Self::EXP_W.bits() | Self::MKR_W.bits();
        /// Readable and writable by any role.
        const ANY_RW = Self::ANY_R.bits() | Self::ANY_W.bits();

        /// Read and write bits of the user role.
        const USR_MASK = Self::USR_R.bits() | Self::USR_W.bits();
        /// Read and write bits of the expert role.
        const EXP_MASK = Self::EXP_R.bits() | Self::EXP_W.bits();
        /// Read and write bits of the maker role.
        const MKR_MASK = Self::MKR_R.bits() | Self::MKR_W.bits();
    }
}

impl Access {
    /// All read bits.
    pub const READ_MASK: Self = Self::ANY_R;
    /// All write bits.
    pub const WRITE_MASK: Self = Self::ANY_W;

    /// Returns true iff a session granted `auth` may read a node with this mask.
    #[inline]
    #[must_use]
    pub const fn readable_by(self, auth: Self) -> bool {
        self.bits() & Self::READ_MASK.bits() & auth.bits() != 0
    }

    /// Returns true iff a session granted `auth` may write a node with this mask.
    #[inline]
    #[must_use]
    pub const fn writable_by(self, auth: Self) -> bool {
        self.bits() & Self::WRITE_MASK.bits() & auth.bits() != 0
    }

    /// Returns true iff a session granted `auth` may perform `op` on a node with this mask.
    #[inline]
    #[must_use]
    pub const fn allows(self, op: Operation, auth: Self) -> bool {
        match op {
            Operation::Read => self.readable_by(auth),
            Operation::Write => self.writable_by(auth),
        }
    }

    /// Returns true iff any role at all may perform `op` on a node with this mask.
    #[inline]
    #[must_use]
    pub const fn permits_any(self, op: Operation) -> bool {
        let mask = match op {
            Operation::Read => Self::READ_MASK,
            Operation::Write => Self::WRITE_MASK,
        };
        self.bits() & mask.bits() != 0
    }
}

/// An operation gated by an access mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch the value of a node.
    Read,
    /// Change the value of a node, or execute it.
    Write,
}

/// A trust level a session can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Any user; the level every context starts at.
    User,
    /// The device maker.
    Maker,
    /// An expert user.
    Expert,
}

impl Role {
    /// The read and write bits owned by this role alone.
    #[must_use]
    pub const fn mask(self) -> Access {
        match self {
            Self::User => Access::USR_MASK,
            Self::Maker => Access::MKR_MASK,
            Self::Expert => Access::EXP_MASK,
        }
    }

    /// The granted mask for a session logged in with this role.
    ///
    /// Read bits accumulate along user, maker, expert. Write bits are the user bit
    /// plus the role's own bit only.
    #[must_use]
    pub const fn grant(self) -> Access {
        match self {
            Self::User => Access::USR_MASK,
            Self::Maker => Access::USR_MASK.union(Access::MKR_MASK),
            Self::Expert => Access::USR_MASK
                .union(Access::MKR_R)
                .union(Access::EXP_MASK),
        }
    }
}
