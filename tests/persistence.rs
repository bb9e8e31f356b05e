//! Catalog persistence across process restarts using a file-backed slot.

use std::fs;

use jiff::Timestamp;
use rust_decimal::Decimal;
use testresult::TestResult;

use katalog::prelude::*;

fn clock() -> TestResult<ManualClock> {
    Ok(ManualClock::new("2026-10-18T09:00:00Z".parse::<Timestamp>()?))
}

#[test]
fn reopened_catalog_has_same_records_in_same_order() -> TestResult {
    let dir = tempfile::tempdir()?;
    let clock = clock()?;

    let saved: Vec<Product> = {
        let mut catalog = Catalog::open(FileStorage::new(dir.path(), "products"), &clock);

        for (name, category, release_date, active) in [
            ("Kopi Arabika", "Makanan", "2025-12-01", true),
            ("Jaket Hujan", "Pakaian", "", false),
            ("Headphone", "Elektronik", "2026-10-18", true),
        ] {
            let draft = catalog.draft_mut();
            draft.name = name.to_string();
            draft.price = "99000".to_string();
            draft.category = category.to_string();
            draft.release_date = release_date.to_string();
            draft.stock = "10".to_string();
            draft.active = active;

            catalog.submit()?;
        }

        assert!(!catalog.is_dirty());

        catalog.products().to_vec()
    };

    let reopened = Catalog::open(FileStorage::new(dir.path(), "products"), &clock);

    assert_eq!(reopened.products(), saved.as_slice());

    let names: Vec<&str> = reopened.products().iter().map(Product::name).collect();

    assert_eq!(names, ["Headphone", "Jaket Hujan", "Kopi Arabika"]);

    Ok(())
}

#[test]
fn corrupt_slot_opens_as_empty_catalog() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path(), "products");

    fs::write(storage.path(), "[{\"id\": 1, \"name\": ")?;

    let catalog = Catalog::open(&storage, clock()?);

    assert!(catalog.products().is_empty());
    assert!(storage.corrupt_path().exists(), "corrupt slot must be preserved");

    Ok(())
}

#[test]
fn unreadable_record_does_not_cost_the_others() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path(), "products");
    let raw = r#"[
        {"id":1792310000000,"name":"Laptop","description":"","price":8500000,"category":"Elektronik","releaseDate":"","stock":4,"active":true},
        {"id":1792300000000,"name":"Beras","description":"","price":65000,"category":"Makanan","releaseDate":"","stock":2.5,"active":true}
    ]"#;

    fs::write(storage.path(), raw)?;

    let mut catalog = Catalog::open(&storage, clock()?);

    assert_eq!(catalog.products().len(), 1);

    let draft = catalog.draft_mut();
    draft.name = "Gula".to_string();
    draft.price = "18000".to_string();
    draft.category = "Makanan".to_string();

    catalog.submit()?;

    let names: Vec<String> = storage
        .load()?
        .iter()
        .map(|product| product.name().to_string())
        .collect();

    assert_eq!(names, ["Gula", "Laptop"]);
    assert_eq!(fs::read_to_string(storage.corrupt_path())?, raw);

    Ok(())
}

#[test]
fn browser_export_loads_unchanged() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path(), "products");

    fs::write(
        storage.path(),
        r#"[
            {"id":1729230000000,"name":"Laptop","description":"Laptop ringan untuk kerja harian","price":8500000,"category":"Elektronik","releaseDate":"2024-06-01","stock":4,"active":true},
            {"id":1729220000000,"name":"Batik","description":"","price":175000.5,"category":"Pakaian","releaseDate":"","stock":0,"active":false}
        ]"#,
    )?;

    let catalog = Catalog::open(storage, clock()?);
    let products = catalog.products();

    assert_eq!(products.len(), 2);

    let laptop = products.first().ok_or("missing first product")?;
    let batik = products.last().ok_or("missing last product")?;

    assert_eq!(laptop.id(), ProductId::new(1_729_230_000_000));
    assert_eq!(laptop.price(), Decimal::new(8_500_000, 0));
    assert_eq!(laptop.release_date().map(|date| date.to_string()).as_deref(), Some("2024-06-01"));
    assert_eq!(batik.price(), Decimal::new(1_750_005, 1));
    assert_eq!(batik.category(), Category::Pakaian);
    assert_eq!(batik.release_date(), None);
    assert!(!batik.is_active());

    Ok(())
}

#[test]
fn edits_of_loaded_records_are_written_back() -> TestResult {
    let dir = tempfile::tempdir()?;
    let clock = clock()?;

    let id = {
        let mut catalog = Catalog::open(FileStorage::new(dir.path(), "products"), &clock);

        let draft = catalog.draft_mut();
        draft.name = "Sepatu".to_string();
        draft.price = "450000".to_string();
        draft.category = "Pakaian".to_string();

        match catalog.submit()? {
            Submitted::Created(id) => id,
            Submitted::Updated(_) => return Err("expected a new product".into()),
        }
    };

    {
        let mut catalog = Catalog::open(FileStorage::new(dir.path(), "products"), &clock);

        assert!(catalog.begin_edit(id));

        catalog.draft_mut().stock = "25".to_string();
        catalog.submit()?;
    }

    let catalog = Catalog::open(FileStorage::new(dir.path(), "products"), &clock);

    assert_eq!(catalog.product(id).map(Product::stock), Some(25));

    Ok(())
}
