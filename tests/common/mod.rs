// Shared device table for the integration tests.
#![allow(dead_code)]

use std::array;
use std::cell::Cell;

use thingset_core::{
    Access, Array, ArrayElems, Buffer, Context, DataNode, NodeData, Procedure, Records, Role,
    Subsets, ID_ROOT,
};

pub const REPORT: Subsets = Subsets::from_bits_retain(1 << 0);
pub const CAN: Subsets = Subsets::from_bits_retain(1 << 1);

pub const ID_INFO: u16 = 0x18;
pub const ID_CONF: u16 = 0x30;
pub const ID_INPUT: u16 = 0x60;
pub const ID_MEAS: u16 = 0x70;
pub const ID_LOG: u16 = 0x90;
pub const ID_REC: u16 = 0xA0;
pub const ID_RPC: u16 = 0xE0;
pub const ID_AUTH: u16 = 0xE2;
pub const ID_PUB: u16 = 0xF0;

pub const EXPERT_PASSWORD: &[u8] = b"expert123";
pub const MAKER_PASSWORD: &[u8] = b"maker456";

fn cells<const N: usize, T: Copy + Default>() -> [Cell<T>; N] {
    array::from_fn(|_| Cell::new(T::default()))
}

/// Application-owned storage behind the test table.
pub struct Store {
    pub manufacturer: [Cell<u8>; 16],
    pub manufacturer_len: Cell<usize>,
    pub timestamp: Cell<u32>,
    pub device_id: [Cell<u8>; 9],
    pub device_id_len: Cell<usize>,

    pub bat_charging_v: Cell<f32>,
    pub load_disconnect_v: Cell<f32>,
    pub ui32: Cell<u32>,
    pub i32: Cell<i32>,
    pub arrayi32: [Cell<i32>; 100],
    pub arrayi32_len: Cell<usize>,
    pub bytes: [Cell<u8>; 32],
    pub bytes_len: Cell<usize>,

    pub enable_charging: Cell<bool>,

    pub bat_v: Cell<f32>,
    pub bat_a: Cell<f32>,
    pub ambient_degc: Cell<i16>,

    pub log_count: Cell<usize>,
    pub log_time: Cell<u32>,
    pub log_error: Cell<u32>,

    pub bat_day_kwh: Cell<f32>,

    pub password: [Cell<u8>; 11],
    pub password_len: Cell<usize>,

    pub report_enable: Cell<bool>,
    pub report_interval: Cell<u16>,
}

impl Store {
    pub fn new() -> Self {
        let store = Self {
            manufacturer: cells(),
            manufacturer_len: Cell::new(0),
            timestamp: Cell::new(12_345_678),
            device_id: cells(),
            device_id_len: Cell::new(0),

            bat_charging_v: Cell::new(14.4),
            load_disconnect_v: Cell::new(10.8),
            ui32: Cell::new(0),
            i32: Cell::new(0),
            arrayi32: cells(),
            arrayi32_len: Cell::new(0),
            bytes: cells(),
            bytes_len: Cell::new(0),

            enable_charging: Cell::new(false),

            bat_v: Cell::new(14.1),
            bat_a: Cell::new(5.13),
            ambient_degc: Cell::new(22),

            log_count: Cell::new(4),
            log_time: Cell::new(0),
            log_error: Cell::new(0),

            bat_day_kwh: Cell::new(123.0),

            password: cells(),
            password_len: Cell::new(0),

            report_enable: Cell::new(false),
            report_interval: Cell::new(1000),
        };
        Buffer::new(&store.manufacturer, &store.manufacturer_len)
            .write(b"Libre Solar")
            .unwrap();
        Buffer::new(&store.device_id, &store.device_id_len)
            .write(b"ABCD1234")
            .unwrap();
        for (cell, v) in store.arrayi32.iter().zip([4, 2, 8, 4]) {
            cell.set(v);
        }
        store.arrayi32_len.set(4);
        store
    }

    pub fn nodes(&self) -> Vec<DataNode<'_>> {
        vec![
            // device information
            DataNode::group(ID_INFO, "info", ID_ROOT),
            DataNode::new(
                0x19,
                "Manufacturer",
                ID_INFO,
                NodeData::String(Buffer::new(&self.manufacturer, &self.manufacturer_len)),
                Access::ANY_R,
                Subsets::empty(),
            ),
            DataNode::new(
                0x1A,
                "Timestamp_s",
                ID_INFO,
                NodeData::U32(&self.timestamp),
                Access::ANY_RW,
                REPORT,
            ),
            DataNode::new(
                0x1B,
                "DeviceID",
                ID_INFO,
                NodeData::String(Buffer::new(&self.device_id, &self.device_id_len)),
                Access::ANY_R.union(Access::MKR_W),
                Subsets::empty(),
            ),
            // configuration
            DataNode::new(
                ID_CONF,
                "conf",
                ID_ROOT,
                NodeData::Group(Some(conf_changed as fn())),
                Access::ANY_R,
                Subsets::empty(),
            ),
            DataNode::new(
                0x31,
                "BatCharging_V",
                ID_CONF,
                NodeData::F32 {
                    value: &self.bat_charging_v,
                    decimals: 2,
                },
                Access::ANY_RW,
                Subsets::empty(),
            ),
            DataNode::new(
                0x32,
                "LoadDisconnect_V",
                ID_CONF,
                NodeData::F32 {
                    value: &self.load_disconnect_v,
                    decimals: 2,
                },
                Access::ANY_RW,
                Subsets::empty(),
            ),
            DataNode::new(
                0x7001,
                "secret_expert",
                ID_CONF,
                NodeData::U32(&self.ui32),
                Access::ANY_R.union(Access::EXP_W).union(Access::MKR_W),
                Subsets::empty(),
            ),
            DataNode::new(
                0x7002,
                "secret_maker",
                ID_CONF,
                NodeData::U32(&self.ui32),
                Access::ANY_R.union(Access::MKR_W),
                Subsets::empty(),
            ),
            DataNode::new(
                0x7003,
                "arrayi32",
                ID_CONF,
                NodeData::Array(Array::new(
                    ArrayElems::I32(&self.arrayi32),
                    &self.arrayi32_len,
                    0,
                )),
                Access::ANY_RW,
                Subsets::empty(),
            ),
            DataNode::new(
                0x8000,
                "bytesbuf",
                ID_CONF,
                NodeData::Bytes(Buffer::new(&self.bytes, &self.bytes_len)),
                Access::ANY_RW,
                Subsets::empty(),
            ),
            // input data
            DataNode::group(ID_INPUT, "input", ID_ROOT),
            DataNode::new(
                0x61,
                "EnableCharging",
                ID_INPUT,
                NodeData::Bool(&self.enable_charging),
                Access::ANY_RW,
                Subsets::empty(),
            ),
            // measurement data
            DataNode::group(ID_MEAS, "meas", ID_ROOT),
            DataNode::new(
                0x71,
                "Bat_V",
                ID_MEAS,
                NodeData::F32 {
                    value: &self.bat_v,
                    decimals: 2,
                },
                Access::ANY_R,
                REPORT.union(CAN),
            ),
            DataNode::new(
                0x72,
                "Bat_A",
                ID_MEAS,
                NodeData::F32 {
                    value: &self.bat_a,
                    decimals: 2,
                },
                Access::ANY_R,
                REPORT.union(CAN),
            ),
            DataNode::new(
                0x73,
                "Ambient_degC",
                ID_MEAS,
                NodeData::I16(&self.ambient_degc),
                Access::ANY_R,
                REPORT,
            ),
            // event log
            DataNode::new(
                ID_LOG,
                "log",
                ID_ROOT,
                NodeData::Records(Records::new(&self.log_count, 8)),
                Access::ANY_R,
                Subsets::empty(),
            ),
            DataNode::new(
                0x91,
                "t_s",
                ID_LOG,
                NodeData::U32(&self.log_time),
                Access::ANY_R,
                Subsets::empty(),
            ),
            DataNode::new(
                0x92,
                "Error",
                ID_LOG,
                NodeData::U32(&self.log_error),
                Access::ANY_R,
                Subsets::empty(),
            ),
            // recorded data
            DataNode::group(ID_REC, "rec", ID_ROOT),
            DataNode::new(
                0xA2,
                "BatDay_kWh",
                ID_REC,
                NodeData::F32 {
                    value: &self.bat_day_kwh,
                    decimals: 2,
                },
                Access::ANY_R,
                Subsets::empty(),
            ),
            // remote procedure calls
            DataNode::group(ID_RPC, "rpc", ID_ROOT),
            DataNode::exec(0xE1, "x-reset", ID_RPC, Procedure::new(reset), Access::ANY_RW),
            DataNode::exec(ID_AUTH, "x-auth", ID_RPC, Procedure::new(login), Access::ANY_RW),
            DataNode::new(
                0xE3,
                "Password",
                ID_AUTH,
                NodeData::String(Buffer::new(&self.password, &self.password_len)),
                Access::ANY_RW,
                Subsets::empty(),
            ),
            // reports
            DataNode::new(
                0xF4,
                "report",
                ID_ROOT,
                NodeData::Subset(REPORT),
                Access::ANY_R,
                Subsets::empty(),
            ),
            // publication settings
            DataNode::group(ID_PUB, ".pub", ID_ROOT),
            DataNode::group(0xF1, "report", ID_PUB),
            DataNode::new(
                0xF2,
                "Enable",
                0xF1,
                NodeData::Bool(&self.report_enable),
                Access::ANY_RW,
                Subsets::empty(),
            ),
            DataNode::new(
                0xF3,
                "Interval_ms",
                0xF1,
                NodeData::U16(&self.report_interval),
                Access::ANY_RW,
                Subsets::empty(),
            ),
        ]
    }
}

fn conf_changed() {}

fn reset(_ctx: &mut Context<'_>) {}

/// Grants a role depending on the password written to `rpc/x-auth/Password`.
pub fn login(ctx: &mut Context<'_>) {
    let Some(node) = ctx.find_by_path("rpc/x-auth/Password") else {
        return;
    };
    let Ok(password) = node.buffer() else {
        return;
    };
    let role = if password.eq_bytes(EXPERT_PASSWORD) {
        Role::Expert
    } else if password.eq_bytes(MAKER_PASSWORD) {
        Role::Maker
    } else {
        Role::User
    };
    ctx.set_authentication(role.grant());
}

/// A chain of nested groups `n1/n2/.../n<depth>` with ids `0x100 + level`.
pub fn chain(depth: u16) -> Vec<DataNode<'static>> {
    (1..=depth)
        .map(|level| {
            let parent = if level == 1 { ID_ROOT } else { 0x100 + level - 1 };
            let name: &'static str = Box::leak(format!("n{level}").into_boxed_str());
            DataNode::group(0x100 + level, name, parent)
        })
        .collect()
}

/// The path addressing the deepest node of [`chain`].
pub fn chain_path(depth: u16) -> String {
    (1..=depth)
        .map(|level| format!("n{level}"))
        .collect::<Vec<_>>()
        .join("/")
}
