//! End-to-end checks over the bundled datasets: every record must parse,
//! and the search and category plumbing must hold up on the real data.

use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;

use medshelf::data::{load_articles, load_contacts, load_medicines};
use medshelf::models::ALL_CATEGORIES;
use medshelf::{ArticlesController, ContactsController, MedicinesController};

fn wait_until(mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !done() {
        assert!(Instant::now() < deadline, "background load never finished");
        thread::sleep(Duration::from_millis(5));
    }
}

/// Serialize each loaded record back to JSON and compare it, in order,
/// against the raw bundled array. Count equality catches dropped records;
/// value equality catches renamed, defaulted, or lost fields.
fn assert_matches_source<T: Serialize>(records: &[T], raw: &str) {
    let source: Vec<Value> = serde_json::from_str(raw).unwrap();
    assert_eq!(records.len(), source.len());
    for (record, expected) in records.iter().zip(&source) {
        assert_eq!(serde_json::to_value(record).unwrap(), *expected);
    }
}

#[test]
fn loading_preserves_source_order_and_full_field_set() {
    assert_matches_source(
        &load_contacts().unwrap(),
        include_str!("../assets/emergency.json"),
    );
    assert_matches_source(
        &load_articles().unwrap(),
        include_str!("../assets/article.json"),
    );
    assert_matches_source(
        &load_medicines().unwrap(),
        include_str!("../assets/medicine.json"),
    );
}

#[test]
fn every_bundled_dataset_parses() {
    let contacts = load_contacts().unwrap();
    let articles = load_articles().unwrap();
    let medicines = load_medicines().unwrap();

    assert!(!contacts.is_empty());
    assert!(!articles.is_empty());
    assert!(!medicines.is_empty());

    assert_eq!(contacts[0].name, "Ambulance");
    assert_eq!(contacts[0].phone_number, "102");
}

#[test]
fn medicine_controller_searches_the_bundled_data() {
    let mut controller = MedicinesController::new();
    wait_until(|| {
        controller.poll().unwrap();
        controller.is_loaded()
    });

    controller.set_query("fever");
    let names: Vec<&str> = controller
        .filtered()
        .get()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert!(names.contains(&"Paracetamol"));

    let categories = controller.categories().get();
    assert_eq!(categories[0], ALL_CATEGORIES);
    assert!(categories.iter().any(|c| c == "Pain Relief"));
    assert!(categories.iter().any(|c| c == "Antibiotic"));
}

#[test]
fn category_and_query_filters_combine() {
    let mut controller = MedicinesController::new();
    wait_until(|| {
        controller.poll().unwrap();
        controller.is_loaded()
    });

    controller.select_category("Antibiotic");
    controller.set_query("fever");
    for medicine in controller.filtered().get() {
        assert!(medicine.in_category("Antibiotic"));
        assert!(medicine.matches_query("fever"));
    }

    controller.select_category(ALL_CATEGORIES);
    controller.set_query("");
    let total = controller.medicines().get().len();
    assert_eq!(controller.filtered().get().len(), total);
}

#[test]
fn article_search_reaches_symptom_fields() {
    let mut controller = ArticlesController::new();
    wait_until(|| {
        controller.poll().unwrap();
        controller.is_loaded()
    });

    controller.set_query("wheezing");
    let filtered = controller.filtered().get();
    assert!(filtered.iter().any(|a| a.name == "Asthma"));

    controller.select("Asthma");
    assert_eq!(controller.selected().unwrap().name, "Asthma");
    controller.clear_selection();
    assert!(controller.selected().is_none());
}

#[test]
fn contact_search_matches_name_only() {
    let mut controller = ContactsController::new();
    wait_until(|| {
        controller.poll().unwrap();
        controller.is_loaded()
    });

    controller.set_query("ambulance");
    let filtered = controller.filtered().get();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].phone_number, "102");

    // Phone numbers are display-only and never participate in search.
    controller.set_query("102");
    assert!(controller.filtered().get().is_empty());
}
