// ═══════════════════════════════════════════════════════════════════
// Storage Tests: snapshot format, MemoryStore, FileStore, StorageManager
// ═══════════════════════════════════════════════════════════════════

use chrono::{TimeZone, Utc};

use finance_ledger_core::errors::CoreError;
use finance_ledger_core::models::ledger::LedgerState;
use finance_ledger_core::models::line_item::{ItemKind, LineItem};
use finance_ledger_core::models::month::{MonthKey, MonthlyRecord};
use finance_ledger_core::storage::file::FileStore;
use finance_ledger_core::storage::format::{self, LedgerSnapshot, CURRENT_VERSION};
use finance_ledger_core::storage::manager::StorageManager;
use finance_ledger_core::storage::memory::MemoryStore;
use finance_ledger_core::storage::traits::KeyValueStore;

const KEY: &str = "financialData";

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn sample_state() -> LedgerState {
    let ts = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
    let mut state = LedgerState::default();
    state.push_item(
        ItemKind::Income,
        LineItem {
            id: "inc-1".into(),
            amount: 1500.5,
            description: "Paycheck".into(),
            category: "Salary".into(),
            timestamp: ts,
        },
    );
    state.push_item(
        ItemKind::Liability,
        LineItem {
            id: "lia-1".into(),
            amount: 12000.0,
            description: "Car loan".into(),
            category: "Long-term Debts".into(),
            timestamp: ts,
        },
    );
    state.replace_history(vec![
        MonthlyRecord::new(month("2024-12"), 5000.0, 300.0),
        MonthlyRecord::new(month("2025-01"), 5200.0, -50.25),
    ]);
    state
}

// ═══════════════════════════════════════════════════════════════════
// Snapshot format
// ═══════════════════════════════════════════════════════════════════

mod snapshot_format {
    use super::*;

    #[test]
    fn encode_then_decode_preserves_state() {
        let state = sample_state();
        let json = format::encode(&state, false).unwrap();
        let back = format::decode(&json).unwrap();
        assert_eq!(back, state);
        assert!(!back.is_loading);
    }

    #[test]
    fn wire_layout() {
        let json = format::encode(&sample_state(), false).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(v["version"], CURRENT_VERSION);
        assert_eq!(v["incomeItems"][0]["description"], "Paycheck");
        assert_eq!(v["incomeItems"][0]["amount"], 1500.5);
        assert_eq!(v["expenseItems"].as_array().unwrap().len(), 0);
        assert_eq!(v["assetItems"].as_array().unwrap().len(), 0);
        assert_eq!(v["liabilityItems"][0]["category"], "Long-term Debts");
        assert_eq!(v["monthlyHistoricalData"]["2025-01"]["netAsset"], 5200.0);
        assert_eq!(v["monthlyHistoricalData"]["2025-01"]["cashflow"], -50.25);
        assert!(v.get("isLoading").is_none());
    }

    #[test]
    fn every_collection_has_its_wire_field() {
        let json = format::encode(&sample_state(), false).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        for kind in ItemKind::ALL {
            assert!(v[kind.wire_field()].is_array(), "missing {}", kind.wire_field());
        }
    }

    #[test]
    fn pretty_output_is_indented() {
        let json = format::encode(&sample_state(), true).unwrap();
        assert!(json.contains("\n  \"version\""));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let state = format::decode("{}").unwrap();
        assert_eq!(state, LedgerState::default());
    }

    #[test]
    fn unversioned_blob_is_read_as_current() {
        let json = r#"{
            "incomeItems": [{
                "id": "1", "amount": 10, "description": "Tip",
                "category": "Business", "timestamp": "2024-05-01T00:00:00Z"
            }],
            "monthlyHistoricalData": {"2024-05": {"netAsset": 1}}
        }"#;
        let state = format::decode(json).unwrap();
        assert_eq!(state.income_items.len(), 1);
        assert_eq!(state.income_items[0].amount, 10.0);
        let snap = state.monthly_history[&month("2024-05")];
        assert_eq!(snap.net_asset, 1.0);
        assert_eq!(snap.cashflow, 0.0);
    }

    #[test]
    fn malformed_json_is_deserialization_error() {
        let err = format::decode("{\"incomeItems\": [").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn wrong_shape_is_deserialization_error() {
        let err = format::decode(r#"{"incomeItems": 42}"#).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn future_version_is_rejected() {
        let err = format::decode(r#"{"version": 2}"#).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVersion(2)));
    }

    #[test]
    fn version_zero_is_rejected() {
        let err = format::decode(r#"{"version": 0}"#).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVersion(0)));
    }

    #[test]
    fn invalid_month_keys_are_dropped() {
        let json = r#"{
            "monthlyHistoricalData": {
                "2025-01": {"netAsset": 1, "cashflow": 2},
                "January": {"netAsset": 9, "cashflow": 9},
                "2025-13": {"netAsset": 9, "cashflow": 9}
            }
        }"#;
        let state = format::decode(json).unwrap();
        assert_eq!(state.monthly_history.len(), 1);
        assert!(state.monthly_history.contains_key(&month("2025-01")));
    }

    #[test]
    fn snapshot_from_state_uses_string_keys() {
        let snap = LedgerSnapshot::from_state(&sample_state());
        let keys: Vec<&str> = snap.monthly_historical_data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2024-12", "2025-01"]);
        assert_eq!(snap.version, CURRENT_VERSION);
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[tokio::test]
    async fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(KEY).await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn set_then_get() {
        let store = MemoryStore::new();
        store.set(KEY, "a".into()).await.unwrap();
        store.set(KEY, "b".into()).await.unwrap();
        assert_eq!(store.get(KEY).await.unwrap().as_deref(), Some("b"));
        assert_eq!(store.peek(KEY).as_deref(), Some("b"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn with_entry_is_prepopulated() {
        let store = MemoryStore::with_entry(KEY, "{}");
        assert_eq!(store.peek(KEY).as_deref(), Some("{}"));
        assert_eq!(store.name(), "memory");
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get(KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn writes_key_as_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        store.set(KEY, "{\"version\":1}".into()).await.unwrap();

        let path = dir.path().join("nested").join("financialData.json");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"version\":1}");
        assert!(!dir.path().join("nested").join("financialData.json.tmp").exists());
        assert_eq!(store.get(KEY).await.unwrap().as_deref(), Some("{\"version\":1}"));
    }

    #[tokio::test]
    async fn overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set(KEY, "first".into()).await.unwrap();
        store.set(KEY, "second".into()).await.unwrap();
        assert_eq!(store.get(KEY).await.unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn rejects_path_like_keys() {
        let store = FileStore::new("/tmp/unused");
        for key in ["", ".hidden", "../escape", "a/b", "a\\b"] {
            assert!(
                matches!(store.path_for(key), Err(CoreError::Storage(_))),
                "key {key:?} should be rejected"
            );
        }
        assert!(store.path_for("financialData").is_ok());
    }

    #[tokio::test]
    async fn invalid_key_fails_get_and_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("../x").await.is_err());
        assert!(store.set("../x", "v".into()).await.is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod storage_manager {
    use super::*;

    #[tokio::test]
    async fn load_empty_store_is_none() {
        let store = MemoryStore::new();
        assert!(StorageManager::load(&store, KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = MemoryStore::new();
        let state = sample_state();
        StorageManager::save(&store, KEY, &state, false).await.unwrap();
        let loaded = StorageManager::load(&store, KEY).await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn save_then_load_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let state = sample_state();
        StorageManager::save(&store, KEY, &state, true).await.unwrap();
        let loaded = StorageManager::load(&store, KEY).await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn corrupt_value_is_an_error() {
        let store = MemoryStore::with_entry(KEY, "not json");
        let err = StorageManager::load(&store, KEY).await.unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}
