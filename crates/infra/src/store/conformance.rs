//! Behavioural checks shared by every `ItemStore` implementation.

use stockroom_core::{ItemFields, ItemFilter, ItemId, Page};

use super::ItemStore;

pub fn fields(name: &str, description: &str, price: f64, quantity: i64) -> ItemFields {
    ItemFields {
        name: name.to_string(),
        description: description.to_string(),
        price,
        quantity,
    }
}

/// Checks share one store. Each creates its own records and only asserts on
/// identifiers it owns, so they tolerate rows left behind by earlier checks.
pub async fn run_all<S: ItemStore>(store: &S) {
    create_then_get_round_trips(store).await;
    get_missing_is_none(store).await;
    update_overwrites_every_field(store).await;
    update_missing_does_not_insert(store).await;
    delete_returns_snapshot_and_removes(store).await;
    list_respects_skip_and_limit(store).await;
    search_filters_are_and_combined(store).await;
}

async fn create_then_get_round_trips<S: ItemStore>(store: &S) {
    let created = store
        .create(fields("Widget", "A useful widget", 9.99, 10))
        .await
        .unwrap();
    let fetched = store.get(created.id).await.unwrap().unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.fields(), fields("Widget", "A useful widget", 9.99, 10));
}

async fn get_missing_is_none<S: ItemStore>(store: &S) {
    assert!(store.get(ItemId(i64::MAX)).await.unwrap().is_none());
}

async fn update_overwrites_every_field<S: ItemStore>(store: &S) {
    let created = store.create(fields("Old", "old", 1.0, 1)).await.unwrap();
    let updated = store
        .update(created.id, fields("New", "", 2.5, 0))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fields(), fields("New", "", 2.5, 0));
    assert_eq!(store.get(created.id).await.unwrap(), Some(updated));
}

async fn update_missing_does_not_insert<S: ItemStore>(store: &S) {
    let missing = ItemId(i64::MAX - 1);
    let result = store.update(missing, fields("Ghost", "", 1.0, 1)).await.unwrap();

    assert!(result.is_none());
    assert!(store.get(missing).await.unwrap().is_none());
}

async fn delete_returns_snapshot_and_removes<S: ItemStore>(store: &S) {
    let created = store.create(fields("Doomed", "bye", 3.0, 2)).await.unwrap();

    let deleted = store.delete(created.id).await.unwrap();
    assert_eq!(deleted, Some(created.clone()));
    assert!(store.get(created.id).await.unwrap().is_none());
    assert!(store.delete(created.id).await.unwrap().is_none());
}

async fn list_respects_skip_and_limit<S: ItemStore>(store: &S) {
    let before = store.list(Page::new(0, u64::MAX)).await.unwrap().len();

    let a = store.create(fields("List A", "", 1.0, 1)).await.unwrap();
    let b = store.create(fields("List B", "", 1.0, 1)).await.unwrap();
    let c = store.create(fields("List C", "", 1.0, 1)).await.unwrap();

    let all = store.list(Page::new(0, u64::MAX)).await.unwrap();
    assert_eq!(all.len(), before + 3);
    assert_eq!(&all[before..], &[a.clone(), b.clone(), c.clone()]);

    let window = store.list(Page::new(before as u64, 2)).await.unwrap();
    assert_eq!(window, vec![a, b]);

    let tail = store.list(Page::new(before as u64 + 2, 100)).await.unwrap();
    assert_eq!(tail, vec![c]);

    assert!(store.list(Page::new(0, 0)).await.unwrap().is_empty());
    assert!(store.list(Page::new(u64::MAX, 10)).await.unwrap().is_empty());
}

async fn search_filters_are_and_combined<S: ItemStore>(store: &S) {
    let blue = store
        .create(fields("Blue Widget", "round", 15.0, 5))
        .await
        .unwrap();
    let red = store
        .create(fields("Red Widget", "square", 25.0, 5))
        .await
        .unwrap();
    let gadget = store
        .create(fields("Gadget", "round", 12.0, 7))
        .await
        .unwrap();
    let lower = store
        .create(fields("green widget", "round", 11.0, 5))
        .await
        .unwrap();
    let ours = [blue.id, red.id, gadget.id, lower.id];

    let search = move |filter: ItemFilter| async move {
        store
            .search(&filter)
            .await
            .unwrap()
            .into_iter()
            .filter(|i| ours.contains(&i.id))
            .map(|i| i.id)
            .collect::<Vec<_>>()
    };

    let by_name = search(ItemFilter {
        name: Some("Widget".to_string()),
        ..Default::default()
    })
    .await;
    assert_eq!(by_name, vec![blue.id, red.id]);

    let by_price = search(ItemFilter {
        min_price: Some(10.0),
        max_price: Some(20.0),
        ..Default::default()
    })
    .await;
    assert_eq!(by_price, vec![blue.id, gadget.id, lower.id]);

    let boundaries = search(ItemFilter {
        min_price: Some(12.0),
        max_price: Some(15.0),
        ..Default::default()
    })
    .await;
    assert_eq!(boundaries, vec![blue.id, gadget.id]);

    let combined = search(ItemFilter {
        description: Some("round".to_string()),
        quantity: Some(5),
        max_price: Some(14.0),
        ..Default::default()
    })
    .await;
    assert_eq!(combined, vec![lower.id]);

    let everything = search(ItemFilter::default()).await;
    assert_eq!(everything, ours.to_vec());
}
