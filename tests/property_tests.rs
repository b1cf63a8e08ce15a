//! Property-based tests for store ordering, search, and import defaulting.

#![allow(clippy::unwrap_used)]

use notecore::io::{Format, ImportService};
use notecore::rendering::preview;
use notecore::storage::MemoryStore;
use notecore::NoteStore;
use proptest::prelude::*;
use std::io::Cursor;

/// Titles that pass store validation: at least one non-whitespace char.
fn title_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}"
}

proptest! {
    #[test]
    fn creation_order_is_reverse_of_list_order(titles in prop::collection::vec(title_strategy(), 1..20)) {
        let mut store = NoteStore::new(Box::new(MemoryStore::new()));
        let mut created = Vec::new();
        for title in &titles {
            created.push(store.create(title, "").unwrap().id.clone());
        }

        let listed: Vec<_> = store.list().unwrap().into_iter().map(|n| n.id).collect();
        created.reverse();
        prop_assert_eq!(listed, created);
    }

    #[test]
    fn search_returns_a_subset_in_list_order(
        titles in prop::collection::vec(title_strategy(), 1..15),
        query in "[a-zA-Z0-9]{0,5}",
    ) {
        let mut store = NoteStore::new(Box::new(MemoryStore::new()));
        for title in &titles {
            store.create(title, "").unwrap();
        }

        let all: Vec<_> = store.list().unwrap().into_iter().map(|n| n.id).collect();
        let hits: Vec<_> = store.search(&query).unwrap().into_iter().map(|n| n.id).collect();

        // Every hit is a stored note, and hits keep the list's relative order
        let mut cursor = 0;
        for hit in &hits {
            let pos = all[cursor..].iter().position(|id| id == hit);
            prop_assert!(pos.is_some());
            cursor += pos.unwrap() + 1;
        }
    }

    #[test]
    fn search_finds_every_title_substring_match(
        titles in prop::collection::vec(title_strategy(), 1..15),
        query in "[a-zA-Z]{1,4}",
    ) {
        let mut store = NoteStore::new(Box::new(MemoryStore::new()));
        for title in &titles {
            store.create(title, "").unwrap();
        }

        let expected = store
            .list()
            .unwrap()
            .into_iter()
            .filter(|n| n.title.to_lowercase().contains(&query.to_lowercase()))
            .count();
        prop_assert_eq!(store.search(&query).unwrap().len(), expected);
    }

    #[test]
    fn updates_strictly_increase_updated_at(count in 1usize..10) {
        let mut store = NoteStore::new(Box::new(MemoryStore::new()));
        let note = store.create("Note", "v0").unwrap();

        let mut last = note.updated_at;
        for i in 0..count {
            let updated = store.update(&note.id, "Note", &format!("v{i}")).unwrap();
            prop_assert!(updated.updated_at > last);
            prop_assert_eq!(updated.created_at, note.created_at);
            last = updated.updated_at;
        }
    }

    #[test]
    fn preview_never_exceeds_bound(content in ".{0,400}") {
        let p = preview(&content);
        prop_assert!(p.chars().count() <= 103);
        prop_assert!(!p.contains('\n'));
    }

    #[test]
    fn import_defaults_keep_timestamps_ordered(
        created in proptest::option::of(0i64..1_000_000),
        updated in proptest::option::of(0i64..1_000_000),
    ) {
        let doc = format!(
            r#"{{"data": [{{"id": "z1", "title": "X", "content": "y"{}{}}}], "timestamp": 500, "version": "1.0"}}"#,
            created.map_or_else(String::new, |c| format!(r#", "createdAt": {c}"#)),
            updated.map_or_else(String::new, |u| format!(r#", "updatedAt": {u}"#)),
        );

        let (notes, _) = ImportService::new()
            .import_from_reader(Format::Json, Box::new(Cursor::new(doc)))
            .unwrap();
        prop_assert_eq!(notes.len(), 1);
        prop_assert!(notes[0].created_at <= notes[0].updated_at);
    }
}
