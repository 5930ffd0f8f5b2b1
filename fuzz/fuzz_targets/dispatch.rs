#![no_main]

use libfuzzer_sys::fuzz_target;
use std::cell::Cell;

use thingset_core::{Access, Context, DataNode, Dispatcher, NodeData, Subsets, ID_ROOT};

fn echo(_ctx: &mut Context<'_>, request: &[u8], response: &mut [u8]) -> usize {
    let len = request.len().min(response.len());
    response[..len].copy_from_slice(&request[..len]);
    len
}

fuzz_target!(|data: &[u8]| {
    let value = Cell::new(0.0f32);
    let nodes = [
        DataNode::group(0x70, "meas", ID_ROOT),
        DataNode::new(
            0x71,
            "Bat_V",
            0x70,
            NodeData::F32 {
                value: &value,
                decimals: 2,
            },
            Access::ANY_R,
            Subsets::empty(),
        ),
    ];
    let mut ctx = Context::new(&nodes);
    let mut dispatcher = Dispatcher::new(echo, echo);

    let mut response = [0xAAu8; 64];
    let len = dispatcher.process(&mut ctx, data, &mut response);
    assert!(len <= response.len());
    if data.is_empty() {
        assert_eq!(len, 0);
        assert!(response.iter().all(|&b| b == 0xAA));
    }
});
