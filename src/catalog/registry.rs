use std::collections::BTreeMap;

use crate::assets::source::AssetSource;

/// One framework badge known to the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameworkEntry {
    /// Stable lowercase identifier, e.g. `terraform`.
    pub id: String,
    /// Human-readable name.
    pub label: String,
    /// Badge icon drawn into the framework slot.
    pub icon: AssetSource,
}

impl FrameworkEntry {
    /// Build an entry whose icon lives at an assets-root-relative path.
    pub fn new(id: &str, label: &str, icon_path: &str) -> Self {
        Self {
            id: normalize_id(id),
            label: label.to_owned(),
            icon: AssetSource::path(icon_path),
        }
    }
}

/// Closed mapping from framework identifier to its badge icon.
///
/// Lookups outside the catalog yield `None`; callers treat that as "no badge".
#[derive(Clone, Debug, Default)]
pub struct FrameworkRegistry {
    entries: BTreeMap<String, FrameworkEntry>,
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("kubernetes", "Kubernetes", "overlay/kubernetes.svg"),
    ("terraform", "Terraform", "overlay/terraform.svg"),
];

impl FrameworkRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped catalog.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .fold(Self::new(), |reg, (id, label, icon)| {
                reg.with_entry(FrameworkEntry::new(id, label, icon))
            })
    }

    /// Add or replace an entry.
    pub fn with_entry(mut self, entry: FrameworkEntry) -> Self {
        self.insert(entry);
        self
    }

    /// Add or replace an entry in place.
    pub fn insert(&mut self, mut entry: FrameworkEntry) {
        entry.id = normalize_id(&entry.id);
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Icon for `id`, if the catalog knows it. Matching ignores case and surrounding whitespace.
    pub fn resolve_icon(&self, id: &str) -> Option<&AssetSource> {
        self.get(id).map(|e| &e.icon)
    }

    /// Full entry for `id`.
    pub fn get(&self, id: &str) -> Option<&FrameworkEntry> {
        self.entries.get(&normalize_id(id))
    }

    /// Identifiers in stable (sorted) order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in stable (sorted) order.
    pub fn entries(&self) -> impl Iterator<Item = &FrameworkEntry> {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/registry.rs"]
mod tests;
