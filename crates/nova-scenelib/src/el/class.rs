use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use crate::el::declaration::ADeclaration;
use crate::el::element::ATypeElement;
use crate::el::expression::{ABlock, AExpression};
use crate::el::field::AField;
use crate::el::method::AMethod;
use crate::error::{set_once, Result};
use crate::location::{BoundLocation, TypeIndexLocation};
use crate::vivify::{Vacuous, VivifyingMap};

/// Kinds of class a scene may need to know about when writing annotations back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassKind {
    Enum,
    Interface,
    Annotation,
    Record,
}

/// A class, interface, enum, record or annotation type, keyed by binary name.
#[derive(Debug, Clone)]
pub struct AClass {
    pub decl: ADeclaration,
    class_name: String,
    pub bounds: VivifyingMap<BoundLocation, ATypeElement>,
    /// `-1` is the superclass, `0..` the implemented interfaces.
    pub extends_implements: VivifyingMap<TypeIndexLocation, ATypeElement>,
    pub methods: VivifyingMap<String, AMethod>,
    pub static_inits: VivifyingMap<i32, ABlock>,
    pub instance_inits: VivifyingMap<i32, ABlock>,
    pub fields: VivifyingMap<String, AField>,
    pub field_inits: VivifyingMap<String, AExpression>,
    enum_constants: Option<Vec<String>>,
    // Keyed by simple name: outer classes may only be known by name, without an element.
    kinds: BTreeMap<ClassKind, BTreeSet<String>>,
}

impl AClass {
    pub fn new(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        Self {
            decl: ADeclaration::new(format!("class {class_name}")),
            bounds: VivifyingMap::new(|loc| ATypeElement::new(format!("{loc}"))),
            extends_implements: VivifyingMap::new(|loc| {
                ATypeElement::new(format!("extends/implements {loc}"))
            }),
            methods: VivifyingMap::new(|sig| AMethod::new(sig.clone())),
            static_inits: VivifyingMap::new(|i| ABlock::new(format!("static init {i}"))),
            instance_inits: VivifyingMap::new(|i| ABlock::new(format!("instance init {i}"))),
            fields: VivifyingMap::new(|name| AField::new(name.clone())),
            field_inits: VivifyingMap::new(|name| AExpression::new(format!("init of {name}"))),
            enum_constants: None,
            kinds: BTreeMap::new(),
            class_name,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The name after the last package or nesting separator.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.class_name)
    }

    pub fn mark_as(&mut self, kind: ClassKind, class_name: &str) {
        self.kinds
            .entry(kind)
            .or_default()
            .insert(simple_name(class_name).to_string());
    }

    /// Whether `class_name` (this class or one of its outer classes) was marked as `kind`.
    pub fn is_kind(&self, kind: ClassKind, class_name: &str) -> bool {
        self.kinds
            .get(&kind)
            .is_some_and(|names| names.contains(simple_name(class_name)))
    }

    pub fn mark_as_enum(&mut self, class_name: &str) {
        self.mark_as(ClassKind::Enum, class_name);
    }

    pub fn mark_as_interface(&mut self, class_name: &str) {
        self.mark_as(ClassKind::Interface, class_name);
    }

    pub fn mark_as_annotation(&mut self, class_name: &str) {
        self.mark_as(ClassKind::Annotation, class_name);
    }

    pub fn mark_as_record(&mut self, class_name: &str) {
        self.mark_as(ClassKind::Record, class_name);
    }

    pub fn is_enum(&self) -> bool {
        self.is_kind(ClassKind::Enum, &self.class_name)
    }

    pub fn is_interface(&self) -> bool {
        self.is_kind(ClassKind::Interface, &self.class_name)
    }

    pub fn is_annotation(&self) -> bool {
        self.is_kind(ClassKind::Annotation, &self.class_name)
    }

    pub fn is_record(&self) -> bool {
        self.is_kind(ClassKind::Record, &self.class_name)
    }

    pub(crate) fn kinds(&self) -> &BTreeMap<ClassKind, BTreeSet<String>> {
        &self.kinds
    }

    pub fn enum_constants(&self) -> Option<&[String]> {
        self.enum_constants.as_deref()
    }

    /// Record the constants of this enum. A later call must supply the same list.
    pub fn set_enum_constants(&mut self, constants: Vec<String>) -> Result<()> {
        set_once(&mut self.enum_constants, Some(constants), "enum constants")?;
        let own = self.class_name.clone();
        self.mark_as_enum(&own);
        Ok(())
    }

    pub fn methods_snapshot(&self) -> IndexMap<String, AMethod> {
        self.methods.snapshot()
    }

    pub fn fields_snapshot(&self) -> IndexMap<String, AField> {
        self.fields.snapshot()
    }
}

fn simple_name(class_name: &str) -> &str {
    class_name
        .rsplit(['.', '$'])
        .next()
        .unwrap_or(class_name)
}

impl PartialEq for AClass {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
            && self.decl == other.decl
            && self.bounds == other.bounds
            && self.extends_implements == other.extends_implements
            && self.methods == other.methods
            && self.static_inits == other.static_inits
            && self.instance_inits == other.instance_inits
            && self.fields == other.fields
            && self.field_inits == other.field_inits
    }
}

impl Eq for AClass {}

impl Vacuous for AClass {
    fn is_vacuous(&self) -> bool {
        self.decl.is_vacuous()
            && self.bounds.is_empty()
            && self.extends_implements.is_empty()
            && self.methods.is_empty()
            && self.static_inits.is_empty()
            && self.instance_inits.is_empty()
            && self.fields.is_empty()
            && self.field_inits.is_empty()
    }

    fn prune(&mut self) {
        self.decl.prune();
        self.bounds.prune();
        self.extends_implements.prune();
        self.methods.prune();
        self.static_inits.prune();
        self.instance_inits.prune();
        self.fields.prune();
        self.field_inits.prune();
    }
}
