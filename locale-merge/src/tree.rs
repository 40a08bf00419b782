//! Per-locale merged namespace trees.

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{fragment::TranslationFragment, issue::Issue, namespace};

/// A position in a merged tree: either a fragment's content or a level of
/// further namespace segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(Value),
    Branch(BTreeMap<String, Node>),
}

impl Node {
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(children) => Some(children),
        }
    }

    /// Converts to a plain JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Leaf(value) => value.clone(),
            Node::Branch(children) => Value::Object(
                children
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }
}

/// All fragments of one locale, nested by namespace.
///
/// Branch children are kept sorted, so the serialized form does not depend on
/// the order fragments were inserted in.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedLocaleTree {
    locale: String,
    root: BTreeMap<String, Node>,
    /// Namespace -> file that claimed it, for conflict messages.
    owners: BTreeMap<String, PathBuf>,
}

impl MergedLocaleTree {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            root: BTreeMap::new(),
            owners: BTreeMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of fragments merged into this tree.
    pub fn fragment_count(&self) -> usize {
        self.owners.len()
    }

    /// Looks up the node at a dotted namespace.
    pub fn get(&self, namespace: &str) -> Option<&Node> {
        let mut segments = namespace::segments(namespace).into_iter();
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = node.as_branch()?.get(segment)?;
        }
        Some(node)
    }

    /// Inserts a fragment's content at its namespace.
    ///
    /// Never overwrites: an occupied final segment is a key conflict, and a
    /// leaf on the way down is a prefix collision. In both cases the tree is
    /// left unchanged.
    pub fn insert(&mut self, fragment: TranslationFragment) -> Result<(), Issue> {
        let TranslationFragment {
            path,
            namespace,
            content,
            ..
        } = fragment;

        let segments = namespace::segments(&namespace);
        let Some((last, parents)) = segments.split_last() else {
            return Err(Issue::EmptyNamespace { path });
        };
        if last.is_empty() {
            return Err(Issue::EmptyNamespace { path });
        }

        let mut level = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            let node = level
                .entry(segment.to_string())
                .or_insert_with(|| Node::Branch(BTreeMap::new()));
            match node {
                Node::Branch(children) => level = children,
                Node::Leaf(_) => {
                    let prefix = segments[..=depth].join(&namespace::SEPARATOR.to_string());
                    let owner = self.owners.get(&prefix).cloned().unwrap_or_default();
                    return Err(Issue::PrefixCollision {
                        locale: self.locale.clone(),
                        namespace,
                        prefix,
                        path,
                        owner,
                    });
                }
            }
        }

        if level.contains_key(*last) {
            let first = self.first_owner_under(&namespace).unwrap_or_default();
            return Err(Issue::KeyConflict {
                locale: self.locale.clone(),
                namespace,
                first,
                second: path,
            });
        }

        level.insert(last.to_string(), Node::Leaf(Value::Object(content)));
        self.owners.insert(namespace, path);
        Ok(())
    }

    /// Owner of `namespace` itself, or of the first namespace nested below it
    /// when the slot is a branch.
    fn first_owner_under(&self, namespace: &str) -> Option<PathBuf> {
        if let Some(owner) = self.owners.get(namespace) {
            return Some(owner.clone());
        }
        let nested = format!("{}{}", namespace, namespace::SEPARATOR);
        self.owners
            .range(nested.clone()..)
            .find(|(key, _)| key.starts_with(&nested))
            .map(|(_, owner)| owner.clone())
    }

    /// The whole tree as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.root
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl Serialize for MergedLocaleTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
