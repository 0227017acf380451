//! End-to-end tests for the catalog store.

use cardex::{CardexConfig, CatalogStore, Error, ListFilter, RecordDraft, RecordId};
use std::sync::Arc;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> CardexConfig {
    CardexConfig::default().with_data_file(dir.path().join("catalog.json"))
}

fn pizza(title: &str, category: &str, status: &str, value: f64) -> RecordDraft {
    RecordDraft::new()
        .with_title(title)
        .with_category(category)
        .with_status(status)
        .with_value(value)
}

#[test]
fn test_full_lifecycle_scenario() {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::open(&config_in(&dir)).unwrap();

    // Two identical creates get distinct sequential ids.
    let first = store
        .create(pizza("Margherita", "tradicional", "disponivel", 30.0))
        .unwrap();
    assert_eq!(first.id, RecordId::new(1));

    let second = store
        .create(pizza("Margherita", "tradicional", "disponivel", 30.0))
        .unwrap();
    assert_eq!(second.id, RecordId::new(2));

    // Status patch changes only the status.
    let patched = store.patch_status(first.id, "promocao").unwrap();
    assert_eq!(patched.status, "promocao");
    assert_eq!(patched.title, first.title);
    assert_eq!(patched.category, first.category);
    assert_eq!(patched.value, first.value);

    // Delete the first; only the second remains.
    store.delete(first.id).unwrap();
    let remaining = store.list(&ListFilter::new()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);

    // A further create never reuses id 1.
    let third = store
        .create(pizza("Calabresa", "tradicional", "disponivel", 35.0))
        .unwrap();
    assert_eq!(third.id, RecordId::new(3));
}

#[test]
fn test_filter_composition() {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::open(&config_in(&dir)).unwrap();

    store
        .create(pizza("Margherita", "tradicional", "disponivel", 30.0))
        .unwrap();
    store
        .create(pizza("Calabresa", "tradicional", "promocao", 35.0))
        .unwrap();
    store
        .create(pizza("Romeu e Julieta", "doce", "promocao", 42.0))
        .unwrap();
    store
        .create(pizza("Quatro Queijos", "tradicional", "promocao", 45.0))
        .unwrap();

    // Category AND status, in insertion order.
    let filter = ListFilter::new()
        .with_category("tradicional")
        .with_status("promocao");
    let hits = store.list(&filter).unwrap();
    let titles: Vec<_> = hits.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Calabresa", "Quatro Queijos"]);

    // Adding the substring predicate narrows further.
    let filter = filter.with_title_contains("QUEIJO");
    let hits = store.list(&filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Quatro Queijos");
}

#[test]
fn test_ids_are_strictly_monotonic_across_deletes() {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::open(&config_in(&dir)).unwrap();

    let mut assigned = Vec::new();
    for round in 0..5 {
        let record = store
            .create(pizza("Portuguesa", "tradicional", "disponivel", 38.0))
            .unwrap();
        assigned.push(record.id);

        // Delete every other record as we go.
        if round % 2 == 0 {
            store.delete(record.id).unwrap();
        }
    }

    for pair in assigned.windows(2) {
        assert!(pair[1] > pair[0], "ids must strictly increase");
    }
}

#[test]
fn test_catalog_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    {
        let store = CatalogStore::open(&config).unwrap();
        store
            .create(pizza("Margherita", "tradicional", "disponivel", 30.0))
            .unwrap();
        store
            .create(pizza("Romeu e Julieta", "doce", "promocao", 42.0))
            .unwrap();
    }

    let reopened = CatalogStore::open(&config).unwrap();
    let records = reopened.list(&ListFilter::new()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Margherita");
    assert_eq!(records[1].title, "Romeu e Julieta");

    // Allocation continues from the persisted maximum.
    let next = reopened
        .create(pizza("Calabresa", "tradicional", "disponivel", 35.0))
        .unwrap();
    assert_eq!(next.id, RecordId::new(3));
}

#[test]
fn test_concurrent_creates_get_distinct_contiguous_ids() {
    const WRITERS: usize = 16;

    let dir = TempDir::new().unwrap();
    let store = Arc::new(CatalogStore::open(&config_in(&dir)).unwrap());

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                store
                    .create(pizza(
                        &format!("Pizza {i}"),
                        "tradicional",
                        "disponivel",
                        30.0,
                    ))
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .map(|h| h.join().unwrap().get())
        .collect();
    ids.sort_unstable();

    let expected: Vec<u64> = (1..=WRITERS as u64).collect();
    assert_eq!(ids, expected, "ids must be {{1..N}} with no duplicates");

    // Memory and disk agree.
    assert_eq!(store.count().unwrap(), WRITERS);
    let reopened = CatalogStore::open(&config_in(&dir)).unwrap();
    assert_eq!(reopened.count().unwrap(), WRITERS);
}

#[test]
fn test_concurrent_readers_and_writers() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(CatalogStore::open(&config_in(&dir)).unwrap());

    let writer = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            for i in 0..20 {
                store
                    .create(pizza(
                        &format!("Pizza {i}"),
                        "tradicional",
                        "disponivel",
                        30.0,
                    ))
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let records = store.list(&ListFilter::new()).unwrap();
                    // Every observed snapshot has unique ids.
                    let mut ids: Vec<_> = records.iter().map(|r| r.id).collect();
                    ids.sort_unstable();
                    ids.dedup();
                    assert_eq!(ids.len(), records.len());
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(store.count().unwrap(), 20);
}

#[test]
fn test_corrupt_snapshot_refuses_to_open() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    std::fs::write(&config.data_file, "][ definitely not json").unwrap();

    let result = CatalogStore::open(&config);
    assert!(matches!(result, Err(Error::CorruptStore { .. })));
}

#[test]
fn test_validation_errors_reach_the_caller_typed() {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::open(&config_in(&dir)).unwrap();

    let result = store.create(pizza("ab", "tradicional", "disponivel", 30.0));
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = store.create(pizza("Margherita", "frita", "disponivel", 30.0));
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = store.create(pizza("Margherita", "tradicional", "esgotado", 30.0));
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = store.patch_status(RecordId::new(1), "esgotado");
    assert!(matches!(result, Err(Error::Validation(_))));

    // Nothing was persisted along the way.
    assert_eq!(store.count().unwrap(), 0);
    assert!(!config_in(&dir).data_file.exists());
}
