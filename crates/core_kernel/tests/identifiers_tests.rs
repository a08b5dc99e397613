//! Tests for the ledger identifier types

use core_kernel::{GroupId, MemberId, TransactionId};
use uuid::Uuid;

#[test]
fn test_new_generates_unique_ids() {
    assert_ne!(MemberId::new(), MemberId::new());
}

#[test]
fn test_prefixes() {
    assert_eq!(GroupId::prefix(), "GRP");
    assert_eq!(MemberId::prefix(), "MBR");
    assert_eq!(TransactionId::prefix(), "TXN");
}

#[test]
fn test_from_str_with_and_without_prefix() {
    let uuid = Uuid::new_v4();
    let with_prefix: MemberId = format!("MBR-{}", uuid).parse().unwrap();
    let bare: MemberId = uuid.to_string().parse().unwrap();
    assert_eq!(with_prefix, bare);
}

#[test]
fn test_v7_ids_sort_in_creation_order() {
    let first = MemberId::new_v7();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = MemberId::new_v7();
    assert!(first < second);
}

#[test]
fn test_json_is_bare_uuid() {
    let uuid = Uuid::from_u128(7);
    let id = GroupId::from_uuid(uuid);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", uuid));
}
