use super::*;
use std::collections::HashSet;

#[test]
fn default_catalog_has_ten_records() {
    assert_eq!(default_catalog().len(), 10);
}

#[test]
fn default_catalog_ids_are_unique_and_ordered() {
    let ids: Vec<u32> = default_catalog().iter().map(|item| item.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    let unique: HashSet<u32> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn default_catalog_first_and_last_records() {
    let catalog = default_catalog();
    assert_eq!(catalog[0].name, "Angular Material");
    assert_eq!(catalog[0].description, "UI component library for Angular applications");
    assert_eq!(catalog[9].name, "Git");
    assert_eq!(catalog[9].description, "Distributed version control system");
}

#[test]
fn item_serializes_with_wire_field_names() {
    let item = Item { id: 7, name: "Docker".into(), description: "Containerization platform".into() };
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json, serde_json::json!({"id": 7, "name": "Docker", "description": "Containerization platform"}));
}
