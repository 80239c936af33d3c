//! Durability tests: the cart survives reloads, recovers from corruption,
//! and never loses the previously persisted state to a partial write.

use leafcart_core::{Price, VariantId};
use leafcart_store::{CartStore, Catalog, FileStorage, LineItem, StorageBackend};

use leafcart_integration_tests::init_tracing;

const KEY: &str = "cart";

fn id(s: &str) -> VariantId {
    VariantId::parse(s).expect("valid id")
}

#[test]
fn test_cart_survives_reload() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut store = CartStore::open(Catalog::moringa(), FileStorage::new(dir.path()), KEY);
        store.add_item(&id("moringa-100g"), 2).expect("add");
        store.add_item(&id("moringa-200g"), 1).expect("add");
        store.increment_item(&id("moringa-200g")).expect("inc");
    }

    // A fresh instance over the same slot reproduces the identical cart:
    // same identifiers, quantities, and first-added order.
    let reopened = CartStore::open(Catalog::moringa(), FileStorage::new(dir.path()), KEY);
    let items: Vec<(&str, u32)> = reopened
        .items()
        .iter()
        .map(|item| (item.id.as_str(), item.quantity))
        .collect();
    assert_eq!(items, [("moringa-100g", 2), ("moringa-200g", 2)]);
    assert_eq!(reopened.subtotal(), Price::from_whole_units(796));
}

#[test]
fn test_entry_missing_price_is_dropped_and_resaved() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path());

    storage
        .write(
            KEY,
            r#"[
                {"id": "moringa-100g", "name": "Organic Moringa Leaf Powder (100g)",
                 "price": 149, "image": "images/moringa-pouch.jpg", "quantity": 1},
                {"id": "moringa-200g", "name": "Organic Moringa Leaf Powder (200g)",
                 "image": "images/moringa-pouch.jpg", "quantity": 2}
            ]"#,
        )
        .expect("seed slot");

    let store = CartStore::open(Catalog::moringa(), storage, KEY);
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.items()[0].id.as_str(), "moringa-100g");

    // The re-save removed the malformed entry permanently: loading again
    // from the raw payload finds only clean entries.
    let payload = FileStorage::new(dir.path())
        .read(KEY)
        .expect("read")
        .expect("slot populated");
    let raw: Vec<LineItem> = serde_json::from_str(&payload).expect("clean payload");
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].id.as_str(), "moringa-100g");
}

#[test]
fn test_unparseable_slot_starts_empty_without_error() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path());
    storage.write(KEY, "{{{ not json").expect("seed slot");

    let store = CartStore::open(Catalog::moringa(), storage, KEY);
    assert!(store.is_empty());
    assert_eq!(store.item_count(), 0);
}

#[test]
fn test_absent_slot_starts_empty() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    let store = CartStore::open(Catalog::moringa(), FileStorage::new(dir.path()), KEY);
    assert!(store.is_empty());
    assert_eq!(store.subtotal(), Price::ZERO);
}

#[test]
fn test_persisted_layout_matches_contract() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    let mut store = CartStore::open(Catalog::moringa(), FileStorage::new(dir.path()), KEY);
    store.add_item(&id("moringa-100g"), 2).expect("add");

    let payload = FileStorage::new(dir.path())
        .read(KEY)
        .expect("read")
        .expect("slot populated");
    let entries: Vec<serde_json::Value> = serde_json::from_str(&payload).expect("array payload");
    assert_eq!(entries.len(), 1);

    // One object per line item with the reserved field set.
    let entry = &entries[0];
    assert_eq!(entry["id"], "moringa-100g");
    assert_eq!(entry["name"], "Organic Moringa Leaf Powder (100g)");
    assert_eq!(entry["quantity"], 2);
    assert!(entry["price"].is_number());
    assert!(entry["image"].is_string());
}

#[test]
fn test_last_write_wins_across_instances() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    let mut first = CartStore::open(Catalog::moringa(), FileStorage::new(dir.path()), KEY);
    let mut second = CartStore::open(Catalog::moringa(), FileStorage::new(dir.path()), KEY);

    first.add_item(&id("moringa-100g"), 1).expect("add");
    second.add_item(&id("moringa-200g"), 3).expect("add");

    // The slot holds whatever instance persisted last; no merge protocol.
    let reopened = CartStore::open(Catalog::moringa(), FileStorage::new(dir.path()), KEY);
    assert_eq!(reopened.items().len(), 1);
    assert_eq!(reopened.items()[0].id.as_str(), "moringa-200g");
    assert_eq!(reopened.items()[0].quantity, 3);
}
