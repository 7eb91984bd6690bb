//! Annotation group primitives.
//!
//! An annotation group is one distinct combination of annotation names seen on
//! a test method, rendered as a sorted list so that insertion order never
//! affects identity.

use std::collections::BTreeSet;

/// A sorted, duplicate-free list of annotation names.
pub type AnnotationGroup = Vec<String>;

/// Normalize an unordered collection of annotation names into its group key.
pub fn to_group<'a, I>(names: I) -> AnnotationGroup
where
    I: IntoIterator<Item = &'a String>,
{
    names
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

/// Distinct, lexicographically sorted annotation names.
pub fn distinct_sorted<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    names.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Collector of the distinct annotation groups covered by one hierarchy node.
///
/// Empty groups are never recorded: a test without annotations contributes
/// nothing to the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationGroups {
    groups: BTreeSet<AnnotationGroup>,
}

impl AnnotationGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: &AnnotationGroup) {
        if !group.is_empty() {
            self.groups.insert(group.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// `None` when no annotations apply, otherwise the groups in sorted order.
    pub fn into_option(self) -> Option<Vec<AnnotationGroup>> {
        if self.groups.is_empty() {
            None
        } else {
            Some(self.groups.into_iter().collect())
        }
    }
}
