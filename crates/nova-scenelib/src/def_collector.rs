//! Collection of every annotation definition a scene refers to.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::annotation::{Annotation, AnnotationDef};
use crate::config::CollectorConfig;
use crate::el::AScene;
use crate::error::DefError;
use crate::visitor::ElementRef;

/// Receives definitions from [`DefCollector::visit`].
pub trait DefVisitor {
    fn visit_annotation_def(&mut self, def: &Arc<AnnotationDef>);
}

impl<F> DefVisitor for F
where
    F: FnMut(&Arc<AnnotationDef>),
{
    fn visit_annotation_def(&mut self, def: &Arc<AnnotationDef>) {
        self(def)
    }
}

/// All annotation definitions reachable from a scene, merged by name.
///
/// Construction walks every element of the scene, including annotations nested in
/// element values and the element types of each definition. Two definitions with the
/// same name are unified; if they cannot be, construction fails with
/// [`DefError::Conflict`]. With [`CollectorConfig::verify_unification`] set, every
/// annotation in the scene is then checked against the merged definition of its type, so
/// that values recorded under a partial definition cannot contradict the final one.
///
/// [`visit`](Self::visit) then reports each definition once, after every definition it
/// uses as an element type, so writers can emit definitions before their uses.
#[derive(Debug, Clone)]
pub struct DefCollector {
    config: CollectorConfig,
    defs: IndexMap<String, Arc<AnnotationDef>>,
}

impl DefCollector {
    pub fn new(scene: &AScene) -> Result<Self, DefError> {
        Self::with_config(scene, CollectorConfig::default())
    }

    pub fn with_config(scene: &AScene, config: CollectorConfig) -> Result<Self, DefError> {
        let mut collector = Self {
            config,
            defs: IndexMap::new(),
        };
        for_each_scene_annotation(scene, &mut |annotation| {
            collector.collect_annotation(annotation)
        })?;
        if collector.config.verify_unification {
            for_each_scene_annotation(scene, &mut |annotation| {
                collector.check_values(annotation)
            })?;
        }
        tracing::debug!(
            defs = collector.defs.len(),
            classes = scene.classes.len(),
            "collected annotation definitions"
        );
        Ok(collector)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<AnnotationDef>> {
        self.defs.get(name)
    }

    /// Report every collected definition to `visitor`, dependencies first.
    pub fn visit<V>(&self, visitor: &mut V)
    where
        V: DefVisitor + ?Sized,
    {
        let mut done = HashSet::new();
        for name in self.defs.keys() {
            self.visit_named(name, &mut done, visitor);
        }
    }

    /// The definitions in the order [`visit`](Self::visit) reports them.
    pub fn ordered(&self) -> Vec<Arc<AnnotationDef>> {
        let mut out = Vec::with_capacity(self.defs.len());
        self.visit(&mut |def: &Arc<AnnotationDef>| out.push(Arc::clone(def)));
        out
    }

    fn visit_named<'a, V>(&'a self, name: &'a str, done: &mut HashSet<&'a str>, visitor: &mut V)
    where
        V: DefVisitor + ?Sized,
    {
        if !done.insert(name) {
            return;
        }
        let Some(def) = self.defs.get(name) else {
            return;
        };
        for dep in def.field_type_dependencies() {
            self.visit_named(&dep.name, done, visitor);
        }
        if self.config.include_meta_annotations {
            for meta in &def.meta_annotations {
                self.visit_named(meta.name(), done, visitor);
            }
        }
        tracing::trace!(name = %def.name, "visiting annotation definition");
        visitor.visit_annotation_def(def);
    }

    fn collect_annotation(&mut self, annotation: &Annotation) -> Result<(), DefError> {
        self.collect_def(annotation.def())?;
        for nested in annotation.nested_annotations() {
            self.collect_def(nested.def())?;
        }
        Ok(())
    }

    fn collect_def(&mut self, def: &Arc<AnnotationDef>) -> Result<(), DefError> {
        if let Some(existing) = self.defs.get(&def.name) {
            if Arc::ptr_eq(existing, def) || existing == def {
                return Ok(());
            }
        }
        for dep in def.field_type_dependencies() {
            self.collect_def(dep)?;
        }
        if self.config.include_meta_annotations {
            for meta in &def.meta_annotations {
                self.collect_annotation(meta)?;
            }
        }
        self.add_to_defs(def)
    }

    fn add_to_defs(&mut self, def: &Arc<AnnotationDef>) -> Result<(), DefError> {
        let Some(old) = self.defs.get(&def.name) else {
            self.defs.insert(def.name.clone(), Arc::clone(def));
            return Ok(());
        };
        let conflict = || DefError::Conflict {
            name: def.name.clone(),
            def1: old.to_string(),
            def2: def.to_string(),
            source1: old.source.clone(),
            source2: def.source.clone(),
        };
        let unified = AnnotationDef::unify(old, def).ok_or_else(conflict)?;
        tracing::debug!(name = %def.name, "unified annotation definitions");
        // Replacing an existing key keeps its position in the map.
        self.defs.insert(def.name.clone(), unified);
        Ok(())
    }

    /// Every element value of `annotation` (and of the annotations nested in it) must fit
    /// the merged definition of its type.
    fn check_values(&self, annotation: &Annotation) -> Result<(), DefError> {
        self.check_own_values(annotation)?;
        for nested in annotation.nested_annotations() {
            self.check_own_values(nested)?;
        }
        Ok(())
    }

    fn check_own_values(&self, annotation: &Annotation) -> Result<(), DefError> {
        let Some(def) = self.defs.get(annotation.name()) else {
            return Ok(());
        };
        if !def.has_fields() {
            return Ok(());
        }
        for (field, value) in annotation.field_values() {
            let Some(ty) = def.field_type(field) else {
                return Err(DefError::UnknownField {
                    annotation: def.name.clone(),
                    field: field.clone(),
                    def_source: def.source.clone(),
                });
            };
            if !ty.accepts(value) {
                return Err(DefError::ValueMismatch {
                    annotation: def.name.clone(),
                    field: field.clone(),
                    value: value.to_string(),
                    expected: ty.to_string(),
                    def_source: def.source.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Call `f` on every annotation attached to an element of `scene`, including method
/// contracts.
fn for_each_scene_annotation<'a, F>(scene: &'a AScene, f: &mut F) -> Result<(), DefError>
where
    F: FnMut(&'a Annotation) -> Result<(), DefError>,
{
    for package in scene.packages.values() {
        for_each_annotation(ElementRef::Element(package), f)?;
    }
    for class in scene.classes.values() {
        for_each_annotation(ElementRef::Class(class), f)?;
    }
    Ok(())
}

fn for_each_annotation<'a, F>(el: ElementRef<'a>, f: &mut F) -> Result<(), DefError>
where
    F: FnMut(&'a Annotation) -> Result<(), DefError>,
{
    for annotation in el.annotations() {
        f(annotation)?;
    }
    if let ElementRef::Method(method) = el {
        for contract in &method.contracts {
            f(contract)?;
        }
    }
    for child in el.children() {
        for_each_annotation(child, f)?;
    }
    Ok(())
}
