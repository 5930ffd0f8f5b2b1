//! # thingset-core
//!
//! Object registry, addressing and access control for the **ThingSet** data-exchange protocol.
//!
//! A device exposes its internal state (measurements, configuration, records) and remote
//! procedures as a tree of typed *data nodes*. Hosts read and write the tree over one of two
//! request syntaxes sharing the same semantic model: a compact binary framing and a
//! human-readable text framing. This crate is the core both syntaxes stand on:
//!
//! - the **node table** ([`DataNode`]), a flat, statically declared array in which every node
//!   names its parent by id;
//! - **lookup** by id, by name within a parent, by slash-separated path, and by path with a
//!   trailing record index ([`Context::find_endpoint`]);
//! - the **access model** ([`Access`], [`Role`]) that every read and write is checked against;
//! - **subset tagging** ([`Subsets`]) for publish groups and the update hook;
//! - the **dispatcher** ([`Dispatcher`]) that classifies a request by its first byte and hands
//!   it to the matching [`Codec`].
//!
//! The wire codecs themselves plug in through [`Codec`].
//!
//! ## Example
//!
//! ```
//! use core::cell::Cell;
//! use thingset_core::{Access, Context, DataNode, NodeData, Subsets, ID_ROOT};
//!
//! let voltage = Cell::new(14.1_f32);
//! let nodes = [
//!     DataNode::group(0x70, "meas", ID_ROOT),
//!     DataNode::new(
//!         0x71,
//!         "Bat_V",
//!         0x70,
//!         NodeData::F32 { value: &voltage, decimals: 2 },
//!         Access::ANY_R,
//!         Subsets::empty(),
//!     ),
//! ];
//!
//! let ctx = Context::new(&nodes);
//! let node = ctx.find_by_path("meas/Bat_V").unwrap();
//! assert_eq!(node.id(), 0x71);
//! assert!(ctx.can_read(node));
//! assert!(!ctx.can_write(node));
//! ```
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`TsError`].
//! - `alloc` *(default)*: builds an id index at init, making id lookups and the duplicate-id
//!   check `O(log n)` per node instead of linear scans. Results are identical either way.
//! - `serde`: serializes node metadata ([`NodeMeta`]) for schema export.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible and works without an allocator when `alloc` is disabled.
//! Diagnostics go through the `log` facade; no logger is installed by the crate.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod access;
mod context;
mod dispatch;
mod error;
#[cfg(feature = "alloc")]
mod index;
mod integrity;
mod limits;
mod lookup;
mod node;
mod status;
mod storage;
mod subset;

pub use crate::access::{Access, Operation, Role};
pub use crate::context::Context;
pub use crate::dispatch::{Codec, Dispatcher, RequestKind, TextMethod};
pub use crate::error::{ErrorCode, TsError, TsErrorKind};
pub use crate::integrity::check_ids;
pub use crate::limits::{ID_ROOT, MAX_PATH_DEPTH};
pub use crate::lookup::Endpoint;
pub use crate::node::{DataNode, NodeData, NodeId, NodeType, Procedure, UpdateCallback};
pub use crate::status::StatusCode;
pub use crate::storage::{Array, ArrayElems, Buffer, Records};
pub use crate::subset::Subsets;

#[cfg(feature = "serde")]
pub use crate::node::NodeMeta;
