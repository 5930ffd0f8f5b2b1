#![no_main]

use libfuzzer_sys::fuzz_target;
use std::cell::Cell;

use thingset_core::{Access, Context, DataNode, NodeData, Records, Subsets, ID_ROOT};

fuzz_target!(|data: &[u8]| {
    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };

    let value = Cell::new(0u32);
    let count = Cell::new(3usize);
    let nodes = [
        DataNode::group(0x10, "conf", ID_ROOT),
        DataNode::new(
            0x11,
            "Interval_s",
            0x10,
            NodeData::U32(&value),
            Access::ANY_RW,
            Subsets::empty(),
        ),
        DataNode::new(
            0x20,
            "log",
            ID_ROOT,
            NodeData::Records(Records::new(&count, 8)),
            Access::ANY_R,
            Subsets::empty(),
        ),
        DataNode::group(0x21, "t_s", 0x20),
    ];
    let ctx = Context::new(&nodes);

    let _ = ctx.find_by_path(path);
    if let Ok(endpoint) = ctx.resolve_endpoint(path) {
        if let Some(index) = endpoint.index {
            assert_eq!(endpoint.node.id(), 0x20);
            let selector = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
            if selector.bytes().all(|b| b.is_ascii_digit()) && !selector.starts_with('0') {
                assert_eq!(selector.parse::<usize>().ok(), Some(index));
            }
        }
        let mut buf = [0u8; 32];
        if let Ok(len) = ctx.get_path(endpoint.node, &mut buf) {
            assert!(std::str::from_utf8(&buf[..len]).is_ok());
        }
    }
});
