//! The annotation scene element tree.
//!
//! Every element except [`AScene`] is reached through the vivifying map of the element that
//! owns it, so each position in the tree has exactly one owner. Elements compare by
//! content (annotations and children), never by their debug description.

mod class;
mod declaration;
mod element;
mod expression;
mod field;
mod method;
mod scene;

pub use self::class::{AClass, ClassKind};
pub use self::declaration::ADeclaration;
pub use self::element::{AElement, ATypeElement, ATypeElementWithType};
pub use self::expression::{ABlock, AExpression};
pub use self::field::AField;
pub use self::method::AMethod;
pub use self::scene::AScene;

use crate::annotation::{Annotation, AnnotationSet};

/// Anything that carries a set of top-level annotations.
pub trait Annotated {
    fn element(&self) -> &AElement;
    fn element_mut(&mut self) -> &mut AElement;

    fn annotations(&self) -> &AnnotationSet {
        &self.element().tlannotations
    }

    /// Returns `false` if an equal annotation was already present.
    fn add_annotation(&mut self, annotation: Annotation) -> bool {
        self.element_mut().tlannotations.insert(annotation)
    }

    fn remove_annotation(&mut self, annotation: &Annotation) -> bool {
        self.element_mut().tlannotations.shift_remove(annotation)
    }

    fn description(&self) -> &str {
        self.element().description()
    }
}

macro_rules! impl_annotated {
    ($ty:ty => $($field:ident).+) => {
        impl Annotated for $ty {
            fn element(&self) -> &AElement {
                &self.$($field).+
            }

            fn element_mut(&mut self) -> &mut AElement {
                &mut self.$($field).+
            }
        }
    };
}

impl_annotated!(ATypeElement => element);
impl_annotated!(ATypeElementWithType => element.element);
impl_annotated!(ADeclaration => element);
impl_annotated!(AExpression => element);
impl_annotated!(ABlock => expression.element);
impl_annotated!(AField => decl.element);
impl_annotated!(AMethod => decl.element);
impl_annotated!(AClass => decl.element);

impl Annotated for AElement {
    fn element(&self) -> &AElement {
        self
    }

    fn element_mut(&mut self) -> &mut AElement {
        self
    }
}
