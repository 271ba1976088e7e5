//! Public API surface tests.
//!
//! Exercises the reference/snapshot surface end to end against a real
//! backing file in a temp directory.

use docketdb::prelude::*;
use tempfile::TempDir;

fn open_temp() -> (TempDir, Docket) {
    let dir = TempDir::new().unwrap();
    let db = Docket::open(dir.path()).unwrap();
    (dir, db)
}

// ============================================================================
// Document Reference Tests
// ============================================================================

mod documents {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_set_then_get_returns_exact_data() {
        let (_dir, db) = open_temp();
        db.collection("users").doc("u1").set(json!({"name": "A"})).unwrap();

        let snap = db.collection("users").doc("u1").get();
        assert!(snap.exists());
        assert_eq!(snap.data().cloned().map(Value::Object), Some(json!({"name": "A"})));
    }

    #[test]
    fn test_update_merges_top_level_fields() {
        let (_dir, db) = open_temp();
        let doc = db.collection("users").doc("u1");
        doc.set(json!({"name": "A"})).unwrap();
        doc.update(json!({"age": 5})).unwrap();

        let snap = doc.get();
        assert_eq!(snap.field("name"), Some(&json!("A")));
        assert_eq!(snap.field("age"), Some(&json!(5)));
    }

    #[test]
    fn test_update_replaces_nested_objects_wholesale() {
        let (_dir, db) = open_temp();
        let doc = db.collection("users").doc("u1");
        doc.set(json!({"address": {"city": "X", "zip": "1"}})).unwrap();
        doc.update(json!({"address": {"city": "Y"}})).unwrap();

        assert_eq!(
            doc.get().field("address"),
            Some(&json!({"city": "Y"})),
            "update must not deep-merge nested objects"
        );
    }

    #[test]
    fn test_update_on_missing_document_creates_it() {
        let (_dir, db) = open_temp();
        db.collection("users").doc("u1").update(json!({"age": 5})).unwrap();

        let snap = db.collection("users").doc("u1").get();
        assert!(snap.exists());
        assert_eq!(snap.field("age"), Some(&json!(5)));
    }

    #[test]
    fn test_set_discards_prior_fields() {
        let (_dir, db) = open_temp();
        let doc = db.collection("users").doc("u1");
        doc.set(json!({"name": "A"})).unwrap();
        doc.set(json!({"age": 5})).unwrap();

        let snap = doc.get();
        assert_eq!(snap.field("name"), None, "overwrite must discard the name field");
        assert_eq!(snap.field("age"), Some(&json!(5)));
    }

    #[test]
    fn test_delete_then_get_does_not_exist() {
        let (_dir, db) = open_temp();
        let doc = db.collection("users").doc("u1");
        doc.set(json!({"name": "A"})).unwrap();
        doc.delete().unwrap();

        let snap = doc.get();
        assert!(!snap.exists());
        assert_eq!(snap.data(), None);
    }

    #[test]
    fn test_delete_absent_document_is_noop() {
        let (_dir, db) = open_temp();
        db.collection("users").doc("ghost").delete().unwrap();
    }

    #[test]
    fn test_set_is_idempotent() {
        let (_dir, db) = open_temp();
        let doc = db.collection("users").doc("u1");
        for _ in 0..3 {
            doc.set(json!({"name": "A"})).unwrap();
        }

        let all = db.collection("users").get();
        assert_eq!(all.len(), 1);
        assert_eq!(all.docs()[0].field("name"), Some(&json!("A")));
    }

    #[test]
    fn test_empty_document_exists() {
        let (_dir, db) = open_temp();
        let doc = db.collection("users").doc("u1");
        doc.set(json!({})).unwrap();

        let snap = doc.get();
        assert!(snap.exists(), "an empty field mapping is still an existing document");
        assert_eq!(snap.data().map(|f| f.len()), Some(0));
    }

    #[test]
    fn test_get_absent_document() {
        let (_dir, db) = open_temp();
        let snap = db.collection("users").doc("u1").get();
        assert!(!snap.exists());
        assert_eq!(snap.id(), "u1");
    }

    #[test]
    fn test_set_accepts_serializable_structs() {
        use serde::Serialize;

        #[derive(Serialize)]
        struct User {
            name: String,
            age: u32,
        }

        let (_dir, db) = open_temp();
        let doc = db.collection("users").doc("u1");
        doc.set(User { name: "A".to_string(), age: 5 }).unwrap();

        assert_eq!(doc.get().field("name"), Some(&json!("A")));
    }
}

// ============================================================================
// Collection Reference Tests
// ============================================================================

mod collections {
    use super::*;

    #[test]
    fn test_add_twice_creates_distinct_documents() {
        let (_dir, db) = open_temp();
        let posts = db.collection("p");
        let a = posts.add(json!({"x": 1})).unwrap();
        let b = posts.add(json!({"x": 1})).unwrap();

        assert_ne!(a.id(), b.id(), "each add must generate a fresh id");

        let all = posts.get();
        assert_eq!(all.len(), 2);
        for snap in &all {
            assert_eq!(snap.field("x"), Some(&json!(1)));
        }
    }

    #[test]
    fn test_add_returns_live_reference() {
        let (_dir, db) = open_temp();
        let doc = db.collection("p").add(json!({"x": 1})).unwrap();

        assert!(doc.get().exists());
        doc.update(json!({"y": 2})).unwrap();
        assert_eq!(doc.get().field("y"), Some(&json!(2)));
    }

    #[test]
    fn test_get_returns_all_documents_in_id_order() {
        let (_dir, db) = open_temp();
        let users = db.collection("users");
        users.doc("b").set(json!({"n": 2})).unwrap();
        users.doc("a").set(json!({"n": 1})).unwrap();
        users.doc("c").set(json!({"n": 3})).unwrap();

        let snapshot = users.get();
        let ids: Vec<&str> = snapshot.docs().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_get_on_absent_collection_is_empty() {
        let (_dir, db) = open_temp();
        assert!(db.collection("nope").get().is_empty());
    }

    #[test]
    fn test_deleting_last_document_removes_collection() {
        let (_dir, db) = open_temp();
        db.collection("users").doc("u1").set(json!({"n": 1})).unwrap();
        assert_eq!(db.collection_names(), vec!["users".to_string()]);

        db.collection("users").doc("u1").delete().unwrap();
        assert!(db.collection_names().is_empty());
        assert!(db.collection("users").get().is_empty());
    }

    #[test]
    fn test_references_are_stateless() {
        let (_dir, db) = open_temp();
        // Two independently derived references address the same document.
        db.collection("users").doc("u1").set(json!({"n": 1})).unwrap();
        let snap = db.collection("users").doc("u1").get();
        assert!(snap.exists());
    }
}

// ============================================================================
// Snapshot Tests
// ============================================================================

mod snapshots {
    use super::*;

    #[test]
    fn test_document_snapshot_is_not_live() {
        let (_dir, db) = open_temp();
        let doc = db.collection("users").doc("u1");
        doc.set(json!({"n": 1})).unwrap();

        let before = doc.get();
        doc.set(json!({"n": 2})).unwrap();

        assert_eq!(
            before.field("n"),
            Some(&json!(1)),
            "a snapshot must not follow later writes"
        );
    }

    #[test]
    fn test_query_snapshot_is_not_live() {
        let (_dir, db) = open_temp();
        let users = db.collection("users");
        users.doc("u1").set(json!({"n": 1})).unwrap();

        let before = users.get();
        users.doc("u2").set(json!({"n": 2})).unwrap();

        assert_eq!(before.len(), 1);
    }

    #[test]
    fn test_query_snapshot_iteration() {
        let (_dir, db) = open_temp();
        let users = db.collection("users");
        users.doc("u1").set(json!({"n": 1})).unwrap();
        users.doc("u2").set(json!({"n": 2})).unwrap();

        let owned: Vec<String> = users.get().into_iter().map(|s| s.id().to_string()).collect();
        assert_eq!(owned, vec!["u1", "u2"]);
    }
}

// ============================================================================
// Write Boundary Tests
// ============================================================================

mod write_boundary {
    use super::*;

    #[test]
    fn test_set_rejects_non_objects() {
        let (_dir, db) = open_temp();
        let doc = db.collection("users").doc("u1");

        for value in [json!(null), json!(1), json!("s"), json!([1, 2])] {
            let err = doc.set(value).unwrap_err();
            assert!(err.is_invalid_document());
        }
        assert!(!doc.get().exists(), "rejected writes must leave no trace");
    }

    #[test]
    fn test_update_rejects_non_objects() {
        let (_dir, db) = open_temp();
        assert!(db
            .collection("users")
            .doc("u1")
            .update(json!([1]))
            .unwrap_err()
            .is_invalid_document());
    }

    #[test]
    fn test_add_rejects_non_objects() {
        let (_dir, db) = open_temp();
        assert!(db
            .collection("users")
            .add(json!("nope"))
            .unwrap_err()
            .is_invalid_document());
        assert!(db.collection("users").get().is_empty());
    }
}

// ============================================================================
// Default Store Tests
// ============================================================================

mod default_store {
    use super::*;

    // The default store is process-global, so everything about it lives in
    // one test function.
    #[test]
    fn test_init_once_then_shared() {
        let dir = TempDir::new().unwrap();

        // Racing first callers must all land on the same instance.
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let path = dir.path().to_path_buf();
                std::thread::spawn(move || docketdb::default_store::init(path).unwrap())
            })
            .collect();
        let shared: Vec<&'static Docket> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(shared.windows(2).all(|w| std::ptr::eq(w[0], w[1])));

        let first = docketdb::default_store::init(dir.path()).unwrap();
        // A later init with a different directory still yields the first.
        let other_dir = TempDir::new().unwrap();
        let second = docketdb::default_store::init(other_dir.path()).unwrap();
        assert!(std::ptr::eq(first, second));

        first
            .collection("users")
            .doc("u1")
            .set(json!({"n": 1}))
            .unwrap();
        let via_get = docketdb::default_store::get().unwrap();
        assert!(via_get.collection("users").doc("u1").get().exists());
    }
}
