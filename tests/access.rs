mod common;

use common::{Store, EXPERT_PASSWORD, MAKER_PASSWORD};
use thingset_core::{Access, Context, ErrorCode, Operation, Role, StatusCode, TsErrorKind};

#[test]
fn masks_split_read_and_write_bytes() {
    assert_eq!(Access::ANY_R.bits(), 0x0007);
    assert_eq!(Access::ANY_W.bits(), 0x0700);
    assert_eq!(Access::USR_MASK, Access::USR_R | Access::USR_W);
    assert_eq!(Access::READ_MASK | Access::WRITE_MASK, Access::ANY_RW);
}

#[test]
fn read_is_cumulative_across_roles() {
    let user = Role::User.grant();
    let maker = Role::Maker.grant();
    let expert = Role::Expert.grant();

    assert!(maker.contains(user & Access::READ_MASK));
    assert!(expert.contains(maker & Access::READ_MASK));

    assert!(Access::MKR_R.readable_by(maker));
    assert!(Access::MKR_R.readable_by(expert));
    assert!(!Access::MKR_R.readable_by(user));
    assert!(!Access::EXP_R.readable_by(maker));
}

#[test]
fn write_is_gated_per_role() {
    let maker = Role::Maker.grant();
    let expert = Role::Expert.grant();

    // maker-only writable: an expert does not inherit it
    let maker_only = Access::ANY_R | Access::MKR_W;
    assert!(maker_only.writable_by(maker));
    assert!(!maker_only.writable_by(expert));

    let expert_only = Access::ANY_R | Access::EXP_W;
    assert!(expert_only.writable_by(expert));
    assert!(!expert_only.writable_by(maker));

    assert!(Access::ANY_RW.writable_by(Role::User.grant()));
    assert_eq!(Role::Maker.mask(), Access::MKR_MASK);
}

#[test]
fn set_authentication_replaces_the_grant() {
    let store = Store::new();
    let nodes = store.nodes();
    let mut ctx = Context::new(&nodes);
    let secret = ctx.find_by_path("conf/secret_maker").unwrap();

    assert!(!ctx.can_write(secret));

    ctx.set_authentication(Access::MKR_MASK | Access::USR_MASK);
    assert!(ctx.can_write(secret));

    ctx.set_authentication(Access::EXP_MASK);
    assert_eq!(ctx.auth(), Access::EXP_MASK);
    assert!(!ctx.can_write(secret));
    // no user bits survive either
    assert!(!Access::USR_R.readable_by(ctx.auth()));
    assert!(!Access::USR_W.writable_by(ctx.auth()));

    ctx.set_authentication(Access::empty());
    assert!(!ctx.can_read(secret));
}

#[test]
fn authorize_distinguishes_unauthorized_from_forbidden() {
    let store = Store::new();
    let nodes = store.nodes();
    let ctx = Context::new(&nodes);

    let device_id = ctx.find_by_path("info/DeviceID").unwrap();
    assert!(ctx.authorize(device_id, Operation::Read).is_ok());

    let err = ctx.authorize(device_id, Operation::Write).unwrap_err();
    assert_eq!(err.kind, TsErrorKind::Access);
    assert_eq!(err.code, ErrorCode::Unauthorized);
    assert_eq!(StatusCode::from(err), StatusCode::Unauthorized);

    let voltage = ctx.find_by_path("meas/Bat_V").unwrap();
    let err = ctx.authorize(voltage, Operation::Write).unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);
    assert_eq!(StatusCode::from(err).code(), 0xA3);
}

#[test]
fn login_procedure_escalates_the_session() {
    let store = Store::new();
    let nodes = store.nodes();
    let mut ctx = Context::new(&nodes);

    let auth = ctx.find_by_path("rpc/x-auth").unwrap();
    let password = ctx.find_by_path("rpc/x-auth/Password").unwrap().buffer().unwrap();
    let procedure = auth.procedure().unwrap();
    assert!(ctx.can_write(auth));

    password.write(MAKER_PASSWORD).unwrap();
    procedure.call(&mut ctx);
    assert_eq!(ctx.auth(), Role::Maker.grant());

    password.write(EXPERT_PASSWORD).unwrap();
    procedure.call(&mut ctx);
    assert_eq!(ctx.auth(), Role::Expert.grant());
    assert!(!ctx.auth().contains(Access::MKR_W));

    password.write(b"wrong").unwrap();
    procedure.call(&mut ctx);
    assert_eq!(ctx.auth(), Access::USR_MASK);
}

#[test]
fn typed_accessors_reject_other_node_types() {
    let store = Store::new();
    let nodes = store.nodes();
    let ctx = Context::new(&nodes);

    let voltage = ctx.find_by_path("meas/Bat_V").unwrap();
    assert_eq!(voltage.procedure().unwrap_err().code, ErrorCode::TypeMismatch);
    assert_eq!(voltage.buffer().unwrap_err().code, ErrorCode::TypeMismatch);
    assert!(voltage.array().is_err());
    assert!(voltage.records().is_err());
}
