//! Property tests for the naming policy, the tabular codec and the merge

use std::collections::BTreeSet;

use decapta_content::YamlDocument;
use decapta_core::codec::tabular::{decode_records, encode_table};
use decapta_core::{Collection, Field, Naming, Table, Widget, synchronize};
use decapta_fs::NormalizedPath;
use proptest::prelude::*;

fn table() -> impl Strategy<Value = Table> {
    prop::collection::btree_set("[a-z]{1,6}", 1..5).prop_flat_map(|headers: BTreeSet<String>| {
        let headers: Vec<String> = headers.into_iter().collect();
        let width = headers.len();
        prop::collection::vec(prop::collection::vec("[ -~]{0,8}|[a-z]{1,4}\n[a-z]{1,4}", width), 0..5)
            .prop_map(move |rows| Table {
                headers: headers.clone(),
                rows,
            })
    })
}

fn collection() -> impl Strategy<Value = Collection> {
    ("[a-z]{1,5}", prop::collection::vec("[a-z]{1,5}", 0..4)).prop_map(|(name, fields)| {
        let mut collection = Collection::new(name.clone(), name.to_uppercase());
        collection.folder = Some(format!("content/{name}"));
        collection.fields = fields
            .iter()
            .map(|field| Field::new(field.as_str(), field.as_str(), Widget::String))
            .collect();
        collection
    })
}

proptest! {
    #[test]
    fn prop_alias_is_a_bijection(name in "(decapta_)?[a-z]{0,6}") {
        let naming = Naming::default();
        prop_assume!(!naming.is_alias(&name));
        let stored = naming.prefix(&name);
        prop_assert_eq!(naming.unprefix(&stored), name.as_str());
    }

    #[test]
    fn prop_table_round_trips(table in table(), slug in prop::collection::vec("[a-z]{1,6}", 0..3)) {
        let naming = Naming::default();
        let path = NormalizedPath::new("t.csv");
        let encoded = encode_table(&table, &path, &naming, &slug).unwrap();

        let records: Vec<_> = encoded
            .records
            .into_iter()
            .enumerate()
            .map(|(i, record)| (NormalizedPath::new(format!("{}.yaml", i + 1)), record))
            .collect();
        let decoded = decode_records(&encoded.order, &records, &naming).unwrap();
        prop_assert_eq!(decoded, table);
    }

    #[test]
    fn prop_merge_is_idempotent_and_keeps_existing(
        first in prop::collection::vec(collection(), 0..4),
        second in prop::collection::vec(collection(), 0..4),
    ) {
        let origin = NormalizedPath::new("config.yml");
        let mut doc = YamlDocument::parse("# top\nbackend:\n  name: git-gateway\n").unwrap();

        synchronize(&mut doc, &first, &origin).unwrap();
        let after_first = doc.to_yaml_string();
        synchronize(&mut doc, &second, &origin).unwrap();
        let after_second = doc.to_yaml_string();

        // Nothing from the first pass is lost.
        for line in after_first.lines() {
            prop_assert!(after_second.contains(line));
        }

        let summary = synchronize(&mut doc, &second, &origin).unwrap();
        prop_assert!(summary.is_noop());
        prop_assert_eq!(doc.to_yaml_string(), after_second.clone());

        let reparsed = YamlDocument::parse(&after_second).unwrap();
        prop_assert_eq!(reparsed.to_yaml_string(), after_second);
    }
}
