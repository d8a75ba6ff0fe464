use concierge_ledger::{
    EmergencyContact, GeneralPayload, JsonFileStore, StoreError, TicketKind, TicketLedger,
    TicketPayload, TicketStore,
};

#[test]
fn test_snapshot_file_is_named_after_storage_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(dir.path());
    assert!(store.path().ends_with("salon_tickets.json"));
}

#[test]
fn test_missing_snapshot_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(dir.path());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_tickets_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut ledger = TicketLedger::with_store(Box::new(JsonFileStore::in_dir(dir.path()))).unwrap();
    let first = ledger.append(TicketKind::General, GeneralPayload::new(&["A", "1"], "A.1"));
    let second = ledger.append(
        TicketKind::Emergency,
        EmergencyContact {
            name: "Sato".into(),
            email: "sato@example.com".into(),
            store: "Shibuya".into(),
            situation: "late".into(),
            ..EmergencyContact::default()
        },
    );
    drop(ledger);

    let reopened =
        TicketLedger::with_store(Box::new(JsonFileStore::in_dir(dir.path()))).unwrap();
    assert_eq!(reopened.all(), &[first.clone(), second]);
    assert_eq!(first.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
    assert_eq!(reopened.count(TicketKind::Emergency), 1);
}

#[test]
fn test_legacy_snapshot_loads_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(dir.path());
    std::fs::write(
        store.path(),
        r#"[
            {"id":"TICKET-1714555800000","type":"general","createdAt":"2024-05-01T09:30:00.000Z",
             "status":"open","data":{"path":"A > 1 > ①","nodeId":"A.1.①"}},
            {"id":"TICKET-1714555900000","type":"emergency","createdAt":"2024-05-01T09:31:40.000Z",
             "status":"open","data":{"name":"Sato","email":"s@example.com","store":"Shibuya","situation":"late"}}
        ]"#,
    )
    .unwrap();

    let mut ledger = TicketLedger::with_store(Box::new(store.clone())).unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.all()[0].id.as_str(), "TICKET-1714555800000");
    assert!(matches!(
        &ledger.all()[0].payload,
        TicketPayload::General(p) if p.node_id == "A.1.①"
    ));

    ledger.append(TicketKind::General, GeneralPayload::new(&["B"], "B"));

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
    let records = raw.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["createdAt"], "2024-05-01T09:30:00.000Z");
    assert_eq!(records[1]["data"]["store"], "Shibuya");
    assert_eq!(records[2]["type"], "general");
}

#[test]
fn test_legacy_extra_keys_survive_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(dir.path());
    std::fs::write(
        store.path(),
        r#"[{"id":"TICKET-1714555800000","type":"general","createdAt":"2024-05-01T09:30:00.000Z",
             "status":"open","data":{"path":"A > 1","nodeId":"A.1","note":"keep me"}}]"#,
    )
    .unwrap();

    let mut ledger = TicketLedger::with_store(Box::new(store.clone())).unwrap();
    let appended = ledger.append(TicketKind::General, GeneralPayload::new(&["B"], "B"));
    assert!(ledger.all()[0].id < appended.id);

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
    assert_eq!(
        raw[0]["data"],
        serde_json::json!({ "path": "A > 1", "nodeId": "A.1", "note": "keep me" })
    );
    assert_eq!(raw[1]["data"], serde_json::json!({ "path": "B", "nodeId": "B" }));
}

#[test]
fn test_corrupt_snapshot_is_reported_and_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(dir.path());
    std::fs::write(store.path(), "not json").unwrap();

    let result = TicketLedger::with_store(Box::new(store.clone()));
    assert!(matches!(result, Err(StoreError::Serde { .. })));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "not json");
}
