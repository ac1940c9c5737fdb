//! Per-file import tracking: which local names refer to regulated components.
//!
//! Bindings are built from the file's import declarations before any rule
//! runs and are discarded with the file.

use crate::registry::{ImportOrigin, Registries};
use std::collections::BTreeMap;
use tokenguard_syntax::{ElementName, ImportDecl};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegulatedBinding {
    pub local: String,
    pub canonical: &'static str,
    pub origin: ImportOrigin,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileBindings {
    components: BTreeMap<String, RegulatedBinding>,
    namespaces: BTreeMap<String, ImportOrigin>,
}

impl FileBindings {
    pub fn from_imports<'a>(
        imports: impl IntoIterator<Item = &'a ImportDecl>,
        registries: &Registries,
    ) -> Self {
        let mut bindings = FileBindings::default();
        for import in imports {
            bindings.add_import(import, registries);
        }
        bindings
    }

    fn add_import(&mut self, import: &ImportDecl, registries: &Registries) {
        if import.type_only {
            return;
        }
        let Some(origin) = classify_source(&import.source, registries) else {
            return;
        };

        for spec in &import.named {
            if let Some(canonical) = registries.canonical_component(&spec.imported) {
                self.bind(&spec.local, canonical, origin);
            }
        }
        if let Some(local) = &import.default
            && let Some(canonical) = infer_default_component(&import.source, registries)
        {
            self.bind(local, canonical, origin);
        }
        if let Some(namespace) = &import.namespace {
            self.namespaces.insert(namespace.clone(), origin);
        }
    }

    fn bind(&mut self, local: &str, canonical: &'static str, origin: ImportOrigin) {
        self.components.insert(
            local.to_string(),
            RegulatedBinding {
                local: local.to_string(),
                canonical,
                origin,
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.namespaces.is_empty()
    }

    pub fn get(&self, local: &str) -> Option<&RegulatedBinding> {
        self.components.get(local)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &RegulatedBinding> {
        self.components.values()
    }

    /// Canonical regulated name of an element, if its tag refers to one.
    ///
    /// `<UI.Text>` resolves through a namespace import of a regulated source.
    pub fn resolve_element(
        &self,
        name: &ElementName,
        registries: &Registries,
    ) -> Option<&'static str> {
        match name {
            ElementName::Simple(local) => self.components.get(local).map(|b| b.canonical),
            ElementName::Member(segments) => match segments.as_slice() {
                [namespace, component] if self.namespaces.contains_key(namespace) => {
                    registries.canonical_component(component)
                }
                _ => None,
            },
        }
    }

    /// True when some local name is bound to `canonical`.
    pub fn is_bound(&self, canonical: &str) -> bool {
        self.components.values().any(|b| b.canonical == canonical)
    }
}

/// Classifies an import source as public surface, internal privileged, or
/// unregulated (`None`).
pub fn classify_source(source: &str, registries: &Registries) -> Option<ImportOrigin> {
    if registries
        .public_packages
        .iter()
        .any(|package| is_path_or_subpath(source, package))
    {
        return Some(ImportOrigin::PublicSurface);
    }
    if registries
        .internal_prefixes
        .iter()
        .any(|prefix| is_path_or_subpath(source, prefix))
    {
        return Some(ImportOrigin::InternalPrivileged);
    }
    None
}

/// `source` is `base` itself or lies below it (`base/...`).
fn is_path_or_subpath(source: &str, base: &str) -> bool {
    source
        .strip_prefix(base)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Infers the component behind a default import from its source path: the
/// last segment first, then earlier ones.
pub fn infer_default_component(source: &str, registries: &Registries) -> Option<&'static str> {
    source.rsplit('/').find_map(|segment| {
        let stem = segment.split('.').next().unwrap_or(segment);
        let pascal = to_pascal(stem);
        if pascal.is_empty() {
            return None;
        }
        registries
            .regulated
            .iter()
            .copied()
            .find(|name| name.eq_ignore_ascii_case(&pascal))
    })
}

/// `icon-button` / `icon_button` -> `IconButton`.
fn to_pascal(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
