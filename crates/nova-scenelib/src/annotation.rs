//! Annotation instances and annotation type definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexSet;

use crate::error::{set_once, Result, SceneError};

/// Annotations attached to one element. Equality ignores insertion order.
pub type AnnotationSet = IndexSet<Annotation>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BasicType {
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    String,
}

impl BasicType {
    pub fn java_name(self) -> &'static str {
        match self {
            BasicType::Byte => "byte",
            BasicType::Short => "short",
            BasicType::Char => "char",
            BasicType::Int => "int",
            BasicType::Long => "long",
            BasicType::Float => "float",
            BasicType::Double => "double",
            BasicType::Boolean => "boolean",
            BasicType::String => "String",
        }
    }
}

/// Declared type of an annotation element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationFieldType {
    Basic(BasicType),
    ClassToken,
    /// An enum element; carries the enum's binary name.
    Enum(String),
    Annotation(Arc<AnnotationDef>),
    /// `None` when only an empty array was ever seen, so the element type is unknown.
    Array(Option<Box<AnnotationFieldType>>),
}

impl AnnotationFieldType {
    pub fn array_of(element: AnnotationFieldType) -> Self {
        AnnotationFieldType::Array(Some(Box::new(element)))
    }

    /// Combine two partial views of the same element type.
    ///
    /// An array of unknown element type unifies with any array; everything else must
    /// agree exactly (nested annotation definitions are unified recursively).
    pub fn unify(&self, other: &AnnotationFieldType) -> Option<AnnotationFieldType> {
        if self == other {
            return Some(self.clone());
        }
        match (self, other) {
            (AnnotationFieldType::Array(None), AnnotationFieldType::Array(Some(_))) => {
                Some(other.clone())
            }
            (AnnotationFieldType::Array(Some(_)), AnnotationFieldType::Array(None)) => {
                Some(self.clone())
            }
            (AnnotationFieldType::Array(Some(a)), AnnotationFieldType::Array(Some(b))) => {
                a.unify(b).map(AnnotationFieldType::array_of)
            }
            (AnnotationFieldType::Annotation(a), AnnotationFieldType::Annotation(b)) => {
                AnnotationDef::unify(a, b).map(AnnotationFieldType::Annotation)
            }
            _ => None,
        }
    }

    /// The annotation definition this type mentions, looking through arrays.
    pub fn annotation_def(&self) -> Option<&Arc<AnnotationDef>> {
        match self {
            AnnotationFieldType::Annotation(def) => Some(def),
            AnnotationFieldType::Array(Some(element)) => element.annotation_def(),
            _ => None,
        }
    }

    pub fn accepts(&self, value: &AnnotationValue) -> bool {
        match (self, value) {
            (AnnotationFieldType::Basic(basic), value) => value.basic_type() == Some(*basic),
            (AnnotationFieldType::ClassToken, AnnotationValue::Class(_)) => true,
            (AnnotationFieldType::Enum(type_name), AnnotationValue::Enum { type_name: t, .. }) => {
                type_name == t
            }
            (AnnotationFieldType::Annotation(def), AnnotationValue::Annotation(a)) => {
                def.name == a.def.name
            }
            (AnnotationFieldType::Array(element), AnnotationValue::Array(values)) => {
                match element {
                    Some(element) => values.iter().all(|v| element.accepts(v)),
                    None => values.is_empty(),
                }
            }
            _ => false,
        }
    }
}

impl fmt::Display for AnnotationFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationFieldType::Basic(basic) => f.write_str(basic.java_name()),
            AnnotationFieldType::ClassToken => f.write_str("Class"),
            AnnotationFieldType::Enum(name) => write!(f, "enum {name}"),
            AnnotationFieldType::Annotation(def) => write!(f, "annotation-field {}", def.name),
            AnnotationFieldType::Array(Some(element)) => write!(f, "{element}[]"),
            AnnotationFieldType::Array(None) => f.write_str("unknown[]"),
        }
    }
}

/// Definition of an annotation type: its name, meta-annotations and element types.
///
/// Definitions are shared through `Arc` once built and are never deep-copied; the
/// element types may be filled in at most once while the definition is still owned.
#[derive(Debug)]
pub struct AnnotationDef {
    pub name: String,
    pub meta_annotations: AnnotationSet,
    field_types: Option<BTreeMap<String, AnnotationFieldType>>,
    /// Where this definition came from (a class file, an index file, ...).
    pub source: String,
}

impl AnnotationDef {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meta_annotations: AnnotationSet::new(),
            field_types: None,
            source: source.into(),
        }
    }

    pub fn with_field_types(
        name: impl Into<String>,
        field_types: BTreeMap<String, AnnotationFieldType>,
        source: impl Into<String>,
    ) -> Self {
        let mut def = Self::new(name, source);
        def.field_types = Some(field_types);
        def
    }

    pub fn with_meta_annotation(mut self, meta: Annotation) -> Self {
        self.meta_annotations.insert(meta);
        self
    }

    pub fn set_field_types(
        &mut self,
        field_types: BTreeMap<String, AnnotationFieldType>,
    ) -> Result<()> {
        set_once(&mut self.field_types, Some(field_types), "annotation field types")
    }

    pub fn field_types(&self) -> impl Iterator<Item = (&String, &AnnotationFieldType)> {
        self.field_types.iter().flatten()
    }

    pub fn field_type(&self, field: &str) -> Option<&AnnotationFieldType> {
        self.field_types.as_ref()?.get(field)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.field_types().map(|(name, _)| name.as_str()).collect()
    }

    pub fn has_fields(&self) -> bool {
        self.field_types.as_ref().is_some_and(|types| !types.is_empty())
    }

    /// Annotation definitions this one refers to through its element types.
    pub fn field_type_dependencies(&self) -> impl Iterator<Item = &Arc<AnnotationDef>> {
        self.field_types().filter_map(|(_, ty)| ty.annotation_def())
    }

    /// Merge two descriptions of the same annotation type.
    ///
    /// Returns `None` when the names differ, when both carry non-empty but different
    /// element name sets, or when some shared element type fails to unify.
    pub fn unify(a: &Arc<AnnotationDef>, b: &Arc<AnnotationDef>) -> Option<Arc<AnnotationDef>> {
        if Arc::ptr_eq(a, b) || a == b {
            return Some(Arc::clone(a));
        }
        if a.name != b.name {
            return None;
        }

        let meta_annotations = if a.meta_annotations == b.meta_annotations
            || b.meta_annotations.is_empty()
        {
            a.meta_annotations.clone()
        } else if a.meta_annotations.is_empty() {
            b.meta_annotations.clone()
        } else {
            return None;
        };

        let field_types = if !a.has_fields() {
            b.field_types.clone()
        } else if !b.has_fields() {
            a.field_types.clone()
        } else {
            let a_types = a.field_types.as_ref()?;
            let b_types = b.field_types.as_ref()?;
            if !a_types.keys().eq(b_types.keys()) {
                return None;
            }
            let mut unified = BTreeMap::new();
            for (name, a_ty) in a_types {
                let b_ty = b_types.get(name)?;
                unified.insert(name.clone(), a_ty.unify(b_ty)?);
            }
            Some(unified)
        };

        Some(Arc::new(AnnotationDef {
            name: a.name.clone(),
            meta_annotations,
            field_types,
            source: format!("unify({}, {})", a.source, b.source),
        }))
    }

    fn normalized_field_types(&self) -> Option<&BTreeMap<String, AnnotationFieldType>> {
        self.field_types.as_ref().filter(|types| !types.is_empty())
    }
}

impl PartialEq for AnnotationDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.meta_annotations == other.meta_annotations
            && self.normalized_field_types() == other.normalized_field_types()
    }
}

impl Eq for AnnotationDef {}

impl Hash for AnnotationDef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for AnnotationDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "annotation @{}", self.name)?;
        for meta in &self.meta_annotations {
            write!(f, " {meta}")?;
        }
        f.write_str(":")?;
        let mut first = true;
        for (name, ty) in self.field_types() {
            f.write_str(if first { " " } else { ", " })?;
            first = false;
            write!(f, "{ty} {name}")?;
        }
        Ok(())
    }
}

/// Value of one annotation element.
#[derive(Debug, Clone)]
pub enum AnnotationValue {
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
    /// A class literal, as a binary name.
    Class(String),
    Enum {
        type_name: String,
        constant: String,
    },
    Annotation(Annotation),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    fn basic_type(&self) -> Option<BasicType> {
        Some(match self {
            AnnotationValue::Byte(_) => BasicType::Byte,
            AnnotationValue::Short(_) => BasicType::Short,
            AnnotationValue::Char(_) => BasicType::Char,
            AnnotationValue::Int(_) => BasicType::Int,
            AnnotationValue::Long(_) => BasicType::Long,
            AnnotationValue::Float(_) => BasicType::Float,
            AnnotationValue::Double(_) => BasicType::Double,
            AnnotationValue::Boolean(_) => BasicType::Boolean,
            AnnotationValue::String(_) => BasicType::String,
            _ => return None,
        })
    }

    fn visit_annotations<'a>(&'a self, out: &mut Vec<&'a Annotation>) {
        match self {
            AnnotationValue::Annotation(a) => {
                out.push(a);
                a.visit_nested(out);
            }
            AnnotationValue::Array(values) => {
                for value in values {
                    value.visit_annotations(out);
                }
            }
            _ => {}
        }
    }
}

// Floats compare by bit pattern so that values can live in hash sets.
impl PartialEq for AnnotationValue {
    fn eq(&self, other: &Self) -> bool {
        use AnnotationValue as V;
        match (self, other) {
            (V::Byte(a), V::Byte(b)) => a == b,
            (V::Short(a), V::Short(b)) => a == b,
            (V::Char(a), V::Char(b)) => a == b,
            (V::Int(a), V::Int(b)) => a == b,
            (V::Long(a), V::Long(b)) => a == b,
            (V::Float(a), V::Float(b)) => a.to_bits() == b.to_bits(),
            (V::Double(a), V::Double(b)) => a.to_bits() == b.to_bits(),
            (V::Boolean(a), V::Boolean(b)) => a == b,
            (V::String(a), V::String(b)) | (V::Class(a), V::Class(b)) => a == b,
            (
                V::Enum {
                    type_name: t1,
                    constant: c1,
                },
                V::Enum {
                    type_name: t2,
                    constant: c2,
                },
            ) => t1 == t2 && c1 == c2,
            (V::Annotation(a), V::Annotation(b)) => a == b,
            (V::Array(a), V::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for AnnotationValue {}

impl Hash for AnnotationValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use AnnotationValue as V;
        std::mem::discriminant(self).hash(state);
        match self {
            V::Byte(v) => v.hash(state),
            V::Short(v) => v.hash(state),
            V::Char(v) => v.hash(state),
            V::Int(v) => v.hash(state),
            V::Long(v) => v.hash(state),
            V::Float(v) => v.to_bits().hash(state),
            V::Double(v) => v.to_bits().hash(state),
            V::Boolean(v) => v.hash(state),
            V::String(v) | V::Class(v) => v.hash(state),
            V::Enum {
                type_name,
                constant,
            } => {
                type_name.hash(state);
                constant.hash(state);
            }
            V::Annotation(a) => a.hash(state),
            V::Array(values) => values.hash(state),
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::Byte(v) => write!(f, "{v}"),
            AnnotationValue::Short(v) => write!(f, "{v}"),
            AnnotationValue::Char(v) => write!(f, "{v:?}"),
            AnnotationValue::Int(v) => write!(f, "{v}"),
            AnnotationValue::Long(v) => write!(f, "{v}L"),
            AnnotationValue::Float(v) => write!(f, "{v}f"),
            AnnotationValue::Double(v) => write!(f, "{v}"),
            AnnotationValue::Boolean(v) => write!(f, "{v}"),
            AnnotationValue::String(v) => write!(f, "{v:?}"),
            AnnotationValue::Class(v) => write!(f, "{v}.class"),
            AnnotationValue::Enum {
                type_name,
                constant,
            } => write!(f, "{type_name}.{constant}"),
            AnnotationValue::Annotation(a) => write!(f, "{a}"),
            AnnotationValue::Array(values) => {
                f.write_str("{")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// An annotation instance: a definition plus element values.
#[derive(Debug, Clone)]
pub struct Annotation {
    def: Arc<AnnotationDef>,
    field_values: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    /// A marker annotation (no element values).
    pub fn marker(def: Arc<AnnotationDef>) -> Self {
        Self {
            def,
            field_values: BTreeMap::new(),
        }
    }

    pub fn builder(def: Arc<AnnotationDef>) -> AnnotationBuilder {
        AnnotationBuilder {
            annotation: Self::marker(def),
        }
    }

    pub fn def(&self) -> &Arc<AnnotationDef> {
        &self.def
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn field_value(&self, field: &str) -> Option<&AnnotationValue> {
        self.field_values.get(field)
    }

    pub fn field_values(&self) -> impl Iterator<Item = (&String, &AnnotationValue)> {
        self.field_values.iter()
    }

    /// Annotations appearing (transitively) inside this annotation's element values.
    pub fn nested_annotations(&self) -> Vec<&Annotation> {
        let mut out = Vec::new();
        self.visit_nested(&mut out);
        out
    }

    fn visit_nested<'a>(&'a self, out: &mut Vec<&'a Annotation>) {
        for value in self.field_values.values() {
            value.visit_annotations(out);
        }
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.def, &other.def) || self.def == other.def)
            && self.field_values == other.field_values
    }
}

impl Eq for Annotation {}

impl Hash for Annotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.def.hash(state);
        self.field_values.hash(state);
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.def.name)?;
        if self.field_values.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (name, value)) in self.field_values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

/// Builds an [`Annotation`], checking element names and values against the definition
/// when the definition declares its element types.
#[derive(Debug)]
pub struct AnnotationBuilder {
    annotation: Annotation,
}

impl AnnotationBuilder {
    pub fn value(mut self, field: impl Into<String>, value: AnnotationValue) -> Result<Self> {
        let field = field.into();
        let def = &self.annotation.def;
        if def.has_fields() {
            let Some(ty) = def.field_type(&field) else {
                return Err(SceneError::UnknownAnnotationField {
                    annotation: def.name.clone(),
                    field,
                });
            };
            if !ty.accepts(&value) {
                return Err(SceneError::AnnotationValueMismatch {
                    annotation: def.name.clone(),
                    field,
                    expected: ty.to_string(),
                });
            }
        }
        self.annotation.field_values.insert(field, value);
        Ok(self)
    }

    pub fn build(self) -> Annotation {
        self.annotation
    }
}
