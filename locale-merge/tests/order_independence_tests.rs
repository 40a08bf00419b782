use locale_merge::{Issue, LocaleSet, MergedLocaleTree, TranslationFragment, merge_fragments};
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn segment_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,7}").expect("valid segment regex")
}

fn content_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(
        segment_strategy(),
        proptest::string::string_regex("[A-Za-z0-9 ,.!?]{0,20}").expect("valid value regex"),
        0..5,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect()
    })
}

/// Distinct two-segment namespaces (`<group>.<component>`) with content.
///
/// Components live one level below their group and groups never hold a
/// fragment themselves, so no namespace is a prefix of another.
fn dataset_strategy() -> impl Strategy<Value = BTreeMap<(String, String), Map<String, Value>>> {
    prop::collection::btree_map(
        (segment_strategy(), segment_strategy()),
        content_strategy(),
        1..12,
    )
}

fn fragments(dataset: &BTreeMap<(String, String), Map<String, Value>>) -> Vec<TranslationFragment> {
    dataset
        .iter()
        .map(|((group, component), content)| TranslationFragment {
            path: PathBuf::from(format!("{group}/{component}/locale/en.json")),
            locale: "en".to_string(),
            namespace: format!("{group}.{component}"),
            content: content.clone(),
        })
        .collect()
}

/// Inserts in exactly the given order, bypassing the path sort done by
/// `merge_fragments`.
fn insert_in_order(fragments: Vec<TranslationFragment>) -> Result<MergedLocaleTree, Issue> {
    let mut tree = MergedLocaleTree::new("en");
    for fragment in fragments {
        tree.insert(fragment)?;
    }
    Ok(tree)
}

proptest! {
    #[test]
    fn prop_merge_is_order_independent(
        dataset in dataset_strategy(),
        seed in any::<u64>(),
    ) {
        let locales = LocaleSet::new(["en"]).unwrap();
        let in_order = fragments(&dataset);

        // Deterministic shuffle driven by the seed.
        let mut shuffled = in_order.clone();
        let len = shuffled.len();
        let mut state = seed;
        for i in (1..len).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }
        let mut reversed = in_order.clone();
        reversed.reverse();

        let merged = merge_fragments(in_order.clone(), &locales);
        prop_assert!(merged.is_clean());
        let expected = serde_json::to_string(merged.tree("en").unwrap()).unwrap();

        for order in [in_order, shuffled, reversed] {
            let tree = insert_in_order(order);
            prop_assert!(tree.is_ok());
            prop_assert_eq!(&expected, &serde_json::to_string(&tree.unwrap()).unwrap());
        }
    }

    #[test]
    fn prop_each_fragment_lands_at_its_namespace(dataset in dataset_strategy()) {
        let locales = LocaleSet::new(["en"]).unwrap();
        let merged = merge_fragments(fragments(&dataset), &locales);
        let output = merged.tree("en").unwrap().to_value();

        for ((group, component), content) in &dataset {
            prop_assert_eq!(&output[group][component], &Value::Object(content.clone()));
        }
    }

    #[test]
    fn prop_unrelated_component_does_not_change_output(
        dataset in dataset_strategy(),
        extra_content in content_strategy(),
    ) {
        let locales = LocaleSet::new(["en"]).unwrap();
        let base = merge_fragments(fragments(&dataset), &locales);

        // `zz-extra` cannot be generated by the segment strategy.
        let mut with_extra = fragments(&dataset);
        with_extra.push(TranslationFragment {
            path: PathBuf::from("zz-extra/locale/en.json"),
            locale: "en".to_string(),
            namespace: "zz-extra".to_string(),
            content: extra_content,
        });
        let extended = merge_fragments(with_extra, &locales);

        prop_assert!(extended.is_clean());
        let mut extended_json = extended.tree("en").unwrap().to_value();
        extended_json.as_object_mut().unwrap().remove("zz-extra");
        prop_assert_eq!(base.tree("en").unwrap().to_value(), extended_json);
    }
}
