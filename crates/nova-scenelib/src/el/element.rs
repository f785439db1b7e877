use crate::annotation::AnnotationSet;
use crate::type_path::{display_path, TypePath, TypePathEntry};
use crate::vivify::{Vacuous, VivifyingMap};

/// Base of every element: top-level annotations plus, for fields and parameters, the
/// annotated type of the element.
#[derive(Debug, Clone)]
pub struct AElement {
    pub tlannotations: AnnotationSet,
    ty: Option<Box<ATypeElement>>,
    description: String,
}

impl AElement {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            tlannotations: AnnotationSet::new(),
            ty: None,
            description: description.into(),
        }
    }

    pub(crate) fn with_type(description: impl Into<String>) -> Self {
        let description = description.into();
        let ty = ATypeElement::new(format!("type of {description}"));
        Self {
            tlannotations: AnnotationSet::new(),
            ty: Some(Box::new(ty)),
            description,
        }
    }

    pub fn ty(&self) -> Option<&ATypeElement> {
        self.ty.as_deref()
    }

    pub(crate) fn ty_vivify(&mut self) -> &mut ATypeElement {
        let description = &self.description;
        self.ty
            .get_or_insert_with(|| Box::new(ATypeElement::new(format!("type of {description}"))))
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for AElement {
    fn eq(&self, other: &Self) -> bool {
        self.tlannotations == other.tlannotations && self.ty == other.ty
    }
}

impl Eq for AElement {}

impl Vacuous for AElement {
    fn is_vacuous(&self) -> bool {
        self.tlannotations.is_empty() && self.ty.as_ref().map_or(true, |ty| ty.is_vacuous())
    }

    fn prune(&mut self) {
        if let Some(ty) = &mut self.ty {
            ty.prune();
        }
    }
}

/// An annotated type, plus annotations on its components keyed by [`TypePath`].
///
/// The empty path denotes this element itself and is never stored in `inner_types`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ATypeElement {
    pub element: AElement,
    pub inner_types: VivifyingMap<TypePath, ATypeElement>,
}

impl ATypeElement {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            element: AElement::new(description),
            inner_types: VivifyingMap::new(|path| {
                ATypeElement::new(format!("inner type {}", display_path(path)))
            }),
        }
    }

    /// The element at `path`, vivifying it if needed.
    pub fn at_path_vivify(&mut self, path: &[TypePathEntry]) -> &mut ATypeElement {
        if path.is_empty() {
            self
        } else {
            self.inner_types.get_vivify(path.to_vec())
        }
    }

    pub fn at_path(&self, path: &[TypePathEntry]) -> Option<&ATypeElement> {
        if path.is_empty() {
            Some(self)
        } else {
            self.inner_types.get(&path.to_vec())
        }
    }
}

impl Vacuous for ATypeElement {
    fn is_vacuous(&self) -> bool {
        self.element.is_vacuous() && self.inner_types.is_empty()
    }

    fn prune(&mut self) {
        self.element.prune();
        self.inner_types.prune();
    }
}

/// A type element that also records the unannotated type it annotates, as needed to
/// insert a cast or receiver into source.
///
/// The recorded type is payload in its own right, so these are never vacuous and never
/// pruned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ATypeElementWithType {
    pub element: ATypeElement,
    ty: Option<String>,
}

impl ATypeElementWithType {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            element: ATypeElement::new(description),
            ty: None,
        }
    }

    pub fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    pub fn set_ty(&mut self, ty: impl Into<String>) {
        self.ty = Some(ty.into());
    }
}

impl Vacuous for ATypeElementWithType {
    fn is_vacuous(&self) -> bool {
        false
    }
}
