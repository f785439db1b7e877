use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;

use crate::el::class::AClass;
use crate::el::element::AElement;
use crate::error::CloneCheckError;
use crate::visitor::ElementRef;
use crate::vivify::{Vacuous, VivifyingMap};

/// Root of the element tree: all annotated packages and classes of one compilation scene.
///
/// Equality compares packages and classes only; `imports` are writer bookkeeping.
#[derive(Debug, Clone)]
pub struct AScene {
    pub packages: VivifyingMap<String, AElement>,
    pub classes: VivifyingMap<String, AClass>,
    /// Annotation binary name -> packages it has to be imported from when written
    /// with its simple name.
    pub imports: IndexMap<String, BTreeSet<String>>,
}

impl Default for AScene {
    fn default() -> Self {
        Self::new()
    }
}

impl AScene {
    pub fn new() -> Self {
        Self {
            packages: VivifyingMap::new(|name| AElement::new(format!("package {name}"))),
            classes: VivifyingMap::new(|name| AClass::new(name.clone())),
            imports: IndexMap::new(),
        }
    }

    pub fn add_import(&mut self, annotation: impl Into<String>, package: impl Into<String>) {
        self.imports
            .entry(annotation.into())
            .or_default()
            .insert(package.into());
    }

    /// True if no package or class carries any annotation.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.classes.is_empty()
    }

    /// Drop every vacuous element in the scene.
    ///
    /// Call this before comparing scenes: equality is sensitive to the presence of
    /// placeholder entries left behind by vivification.
    pub fn prune(&mut self) {
        let before = self.classes.len();
        self.packages.prune();
        self.classes.prune();
        tracing::debug!(
            classes_before = before,
            classes_after = self.classes.len(),
            "pruned scene"
        );
    }

    /// Check that `clone` is a deep, independent copy of `original`.
    pub fn check_clone(original: &AScene, clone: &AScene) -> Result<(), CloneCheckError> {
        crate::clone_check::check_clone(original, clone)
    }

    /// Deep-copy this scene and verify the copy.
    pub fn clone_checked(&self) -> Result<AScene, CloneCheckError> {
        let copy = self.clone();
        Self::check_clone(self, &copy)?;
        Ok(copy)
    }
}

impl PartialEq for AScene {
    fn eq(&self, other: &Self) -> bool {
        self.packages == other.packages && self.classes == other.classes
    }
}

impl Eq for AScene {}

impl Vacuous for AScene {
    fn is_vacuous(&self) -> bool {
        self.is_empty()
    }

    fn prune(&mut self) {
        AScene::prune(self);
    }
}

/// Indented dump of every non-vacuous element and its annotations.
impl fmt::Display for AScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, set) in &self.imports {
            let packages: Vec<&str> = set.iter().map(String::as_str).collect();
            writeln!(f, "import {name} from {}", packages.join(", "))?;
        }
        for package in self.packages.values() {
            write_element(f, ElementRef::Element(package), 0)?;
        }
        for class in self.classes.values() {
            write_element(f, ElementRef::Class(class), 0)?;
        }
        Ok(())
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, el: ElementRef<'_>, depth: usize) -> fmt::Result {
    if el.is_vacuous() {
        return Ok(());
    }
    write!(f, "{:indent$}{}:", "", el.description(), indent = depth * 2)?;
    for annotation in el.annotations() {
        write!(f, " {annotation}")?;
    }
    if let ElementRef::Method(method) = el {
        for contract in &method.contracts {
            write!(f, " {contract}")?;
        }
    }
    writeln!(f)?;
    for child in el.children() {
        write_element(f, child, depth + 1)?;
    }
    Ok(())
}
