use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use axum_pos_api::models::{InventoryItem, InventoryRecord};
use axum_pos_api::services::inventory_service::latest_per_item;

fn item(id: Uuid, name: &str) -> InventoryItem {
    InventoryItem {
        id,
        tenant_id: Uuid::new_v4(),
        name: name.into(),
        category: "ingredients".into(),
        unit: "kg".into(),
        min_stock: None,
        created_at: Utc::now(),
    }
}

fn record(item_id: Uuid, quantity: i64, recorded_on: NaiveDate) -> InventoryRecord {
    InventoryRecord {
        id: Uuid::new_v4(),
        tenant_id: Uuid::new_v4(),
        inventory_item_id: item_id,
        user_id: Uuid::new_v4(),
        quantity,
        recorded_on,
        created_at: Utc::now(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn query_date_picks_last_record_on_or_before() {
    let item_id = Uuid::new_v4();
    let records = vec![
        record(item_id, 10, date(2024, 1, 1)),
        record(item_id, 7, date(2024, 1, 5)),
    ];

    let view = latest_per_item(vec![item(item_id, "beans")], &records, Some(date(2024, 1, 3)));
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].latest_quantity, Some(10));
    assert_eq!(view[0].latest_recorded_on, Some(date(2024, 1, 1)));
}

#[test]
fn without_query_date_the_newest_record_wins() {
    let item_id = Uuid::new_v4();
    let records = vec![
        record(item_id, 10, date(2024, 1, 1)),
        record(item_id, 7, date(2024, 1, 5)),
    ];

    let view = latest_per_item(vec![item(item_id, "beans")], &records, None);
    assert_eq!(view[0].latest_quantity, Some(7));
}

#[test]
fn items_without_records_still_appear() {
    let with_records = Uuid::new_v4();
    let without_records = Uuid::new_v4();
    let records = vec![record(with_records, 3, date(2024, 2, 1))];

    let view = latest_per_item(
        vec![item(with_records, "beans"), item(without_records, "milk")],
        &records,
        None,
    );
    assert_eq!(view.len(), 2);

    let milk = view
        .iter()
        .find(|row| row.item.id == without_records)
        .expect("milk row");
    assert_eq!(milk.latest_quantity, None);
    assert_eq!(milk.latest_recorded_on, None);
}

#[test]
fn same_day_ties_break_by_created_at() {
    let item_id = Uuid::new_v4();
    let day = date(2024, 3, 1);

    let mut earlier = record(item_id, 5, day);
    earlier.created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let mut later = record(item_id, 2, day);
    later.created_at = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();

    let view = latest_per_item(vec![item(item_id, "beans")], &[earlier, later], None);
    assert_eq!(view[0].latest_quantity, Some(2));
}

#[test]
fn records_after_query_date_are_ignored_entirely() {
    let item_id = Uuid::new_v4();
    let records = vec![record(item_id, 7, date(2024, 1, 5))];

    let view = latest_per_item(vec![item(item_id, "beans")], &records, Some(date(2024, 1, 3)));
    assert_eq!(view[0].latest_quantity, None);
}
