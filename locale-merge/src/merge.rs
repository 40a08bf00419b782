//! Merging accepted fragments into one tree per supported locale.

use tracing::{debug, info, warn};

use crate::{
    fragment::TranslationFragment, issue::Issue, locale::LocaleSet, tree::MergedLocaleTree,
};

/// One tree per supported locale, in locale-set order, plus merge issues.
#[derive(Debug)]
pub struct Merged {
    pub trees: Vec<MergedLocaleTree>,
    pub issues: Vec<Issue>,
}

impl Merged {
    pub fn tree(&self, locale: &str) -> Option<&MergedLocaleTree> {
        self.trees.iter().find(|t| t.locale() == locale)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Merges fragments into per-locale trees.
///
/// Every supported locale gets a tree even when no fragment targets it.
/// Fragments are processed in path order, so when two files collide the one
/// sorting first is reported as the original owner.
pub fn merge_fragments(
    mut fragments: Vec<TranslationFragment>,
    locales: &LocaleSet,
) -> Merged {
    fragments.sort_by(|a, b| a.path.cmp(&b.path));

    let mut trees: Vec<MergedLocaleTree> = locales.iter().map(MergedLocaleTree::new).collect();
    let mut issues = Vec::new();

    for fragment in fragments {
        let Some(tree) = trees.iter_mut().find(|t| t.locale() == fragment.locale) else {
            warn!(
                path = %fragment.path.display(),
                locale = %fragment.locale,
                "skipping fragment for unsupported locale"
            );
            continue;
        };

        debug!(
            path = %fragment.path.display(),
            locale = %fragment.locale,
            namespace = %fragment.namespace,
            "merging fragment"
        );
        if let Err(issue) = tree.insert(fragment) {
            issues.push(issue);
        }
    }

    info!(
        locales = trees.len(),
        issues = issues.len(),
        "merged locale trees"
    );
    Merged { trees, issues }
}
