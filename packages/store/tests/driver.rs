use std::fs;
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};

use docfs_store::{Driver, Error, LogFacade, Options};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
struct User {
    name: String,
    age: String,
}

fn user(name: &str, age: &str) -> User {
    User {
        name: name.to_string(),
        age: age.to_string(),
    }
}

fn open(dir: &tempfile::TempDir) -> Driver {
    Driver::open(dir.path(), Options::new().logger(Arc::new(LogFacade))).unwrap()
}

/// Snapshot of every path under `root`, for asserting nothing changed.
fn tree(root: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut paths = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path.clone());
            }
            paths.push(path);
        }
    }
    paths.sort();
    paths
}

#[test]
fn users_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);

    db.write("users", "alice", &user("Alice", "30")).unwrap();
    db.write("users", "bob", &user("Bob", "25")).unwrap();

    let records = db.read_all("users").unwrap();
    assert_eq!(records.len(), 2);
    let mut decoded: Vec<User> = records
        .iter()
        .map(|raw| serde_json::from_str(raw).unwrap())
        .collect();
    decoded.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(decoded, vec![user("Alice", "30"), user("Bob", "25")]);

    db.delete("users", "alice").unwrap();
    let err = db.read::<User>("users", "alice").unwrap_err();
    assert!(err.is_not_found());

    let bob: User = db.read("users", "bob").unwrap();
    assert_eq!(bob, user("Bob", "25"));
}

#[test]
fn rewrite_with_same_value_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);

    db.write("users", "carol", &user("Carol", "41")).unwrap();
    let once = fs::read(dir.path().join("users/carol.json")).unwrap();
    db.write("users", "carol", &user("Carol", "41")).unwrap();
    let twice = fs::read(dir.path().join("users/carol.json")).unwrap();

    assert_eq!(once, twice);
    assert_eq!(db.read::<User>("users", "carol").unwrap(), user("Carol", "41"));
}

#[test]
fn write_replaces_previous_record() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);

    db.write("users", "dan", &user("Dan", "19")).unwrap();
    db.write("users", "dan", &user("Dan", "20")).unwrap();
    assert_eq!(db.read::<User>("users", "dan").unwrap().age, "20");
}

#[test]
fn missing_targets_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);

    assert!(db.read::<User>("ghosts", "casper").unwrap_err().is_not_found());
    assert!(db.read_all("ghosts").unwrap_err().is_not_found());
    assert!(db.delete("ghosts", "casper").unwrap_err().is_not_found());
    assert!(db.delete("ghosts", "").unwrap_err().is_not_found());

    db.write("users", "erin", &user("Erin", "33")).unwrap();
    assert!(db.read::<User>("users", "casper").unwrap_err().is_not_found());
    match db.delete("users", "casper").unwrap_err() {
        Error::NotFound { path } => assert_eq!(path, "users/casper"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn empty_names_are_rejected_without_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);
    db.write("users", "frank", &user("Frank", "50")).unwrap();
    let before = tree(dir.path());

    assert!(db.write("", "frank", &user("x", "1")).unwrap_err().is_invalid_argument());
    assert!(db.write("users", "", &user("x", "1")).unwrap_err().is_invalid_argument());
    assert!(db.read::<User>("", "frank").unwrap_err().is_invalid_argument());
    assert!(db.read::<User>("users", "").unwrap_err().is_invalid_argument());
    assert!(db.read_all("").unwrap_err().is_invalid_argument());
    assert!(db.delete("", "frank").unwrap_err().is_invalid_argument());

    assert_eq!(tree(dir.path()), before);
    assert_eq!(db.read::<User>("users", "frank").unwrap(), user("Frank", "50"));
}

#[test]
fn deleting_a_collection_removes_all_resources() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);

    for name in ["a", "b", "c"] {
        db.write("users", name, &user(name, "1")).unwrap();
    }
    db.write("orders", "o1", &serde_json::json!({"total": 3})).unwrap();

    db.delete("users", "").unwrap();
    assert!(db.read_all("users").unwrap_err().is_not_found());
    assert!(db.read::<User>("users", "a").unwrap_err().is_not_found());
    assert_eq!(db.read_all("orders").unwrap().len(), 1);
}

#[test]
fn records_are_newline_terminated_and_staging_is_gone() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);

    db.write("users", "gina", &user("Gina", "28")).unwrap();

    let path = dir.path().join("users/gina.json");
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["name"], "Gina");
    assert!(!dir.path().join("users/gina.json.tmp").exists());
}

#[test]
fn reopening_sees_existing_records() {
    let dir = tempfile::tempdir().unwrap();
    {
        let db = open(&dir);
        db.write("users", "hank", &user("Hank", "60")).unwrap();
    }
    let db = open(&dir);
    assert_eq!(db.read::<User>("users", "hank").unwrap(), user("Hank", "60"));
}

#[test]
fn concurrent_writes_to_different_collections() {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(open(&dir));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                let collection = format!("collection{}", i);
                for j in 0..10 {
                    db.write(&collection, &format!("r{}", j), &user(&collection, &j.to_string()))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..8 {
        let collection = format!("collection{}", i);
        assert_eq!(db.read_all(&collection).unwrap().len(), 10);
        for j in 0..10 {
            let record: User = db.read(&collection, &format!("r{}", j)).unwrap();
            assert_eq!(record, user(&collection, &j.to_string()));
        }
    }
    assert_eq!(db.locked_collections(), 8);
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Payload {
    writer: usize,
    body: String,
}

#[test]
fn concurrent_writes_to_one_resource_leave_one_complete_payload() {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(open(&dir));
    let writers = 16;

    let payload = |writer: usize| Payload {
        writer,
        // Large and distinct per writer, so interleaving would be visible.
        body: format!("{}", writer).repeat(4096 + writer * 97),
    };

    let handles: Vec<_> = (0..writers)
        .map(|writer| {
            let db = Arc::clone(&db);
            let value = payload(writer);
            thread::spawn(move || {
                for _ in 0..5 {
                    db.write("shared", "doc", &value).unwrap();
                }
            })
        })
        .collect();

    // Readers race the writers; every successful read must be a whole payload.
    let reader = {
        let db = Arc::clone(&db);
        thread::spawn(move || {
            for _ in 0..200 {
                match db.read::<Payload>("shared", "doc") {
                    Ok(found) => assert_eq!(found, payload(found.writer)),
                    Err(err) => assert!(err.is_not_found(), "unexpected error: {:?}", err),
                }
            }
        })
    };

    for handle in handles {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    let text = fs::read_to_string(dir.path().join("shared/doc.json")).unwrap();
    let found: Payload = serde_json::from_str(&text).unwrap();
    assert!(found.writer < writers);
    assert_eq!(found, payload(found.writer));
    assert_eq!(db.read_all("shared").unwrap().len(), 1);
}

#[test]
fn independent_stores_do_not_share_locks() {
    let dir = tempfile::tempdir().unwrap();
    let first = open(&dir);
    let second = open(&dir);

    first.write("users", "ivy", &user("Ivy", "22")).unwrap();
    assert_eq!(first.locked_collections(), 1);
    assert_eq!(second.locked_collections(), 0);
    assert_eq!(second.read::<User>("users", "ivy").unwrap(), user("Ivy", "22"));
}
