use crate::el::element::{AElement, ATypeElement, ATypeElementWithType};
use crate::location::AstPath;
use crate::vivify::{Vacuous, VivifyingMap};

/// Shared part of classes, methods and fields: source positions where an annotation or a
/// cast has to be materialized, keyed by the path from the declaration's AST node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ADeclaration {
    pub element: AElement,
    pub insert_annotations: VivifyingMap<AstPath, ATypeElement>,
    pub insert_typecasts: VivifyingMap<AstPath, ATypeElementWithType>,
}

impl ADeclaration {
    pub fn new(description: impl Into<String>) -> Self {
        Self::from_element(AElement::new(description))
    }

    pub(crate) fn with_type(description: impl Into<String>) -> Self {
        Self::from_element(AElement::with_type(description))
    }

    fn from_element(element: AElement) -> Self {
        Self {
            element,
            insert_annotations: VivifyingMap::new(|path| {
                ATypeElement::new(format!("insert annotation at {path}"))
            }),
            insert_typecasts: VivifyingMap::new(|path| {
                ATypeElementWithType::new(format!("insert typecast at {path}"))
            }),
        }
    }
}

impl Vacuous for ADeclaration {
    fn is_vacuous(&self) -> bool {
        self.element.is_vacuous()
            && self.insert_annotations.is_empty()
            && self.insert_typecasts.is_empty()
    }

    fn prune(&mut self) {
        self.element.prune();
        self.insert_annotations.prune();
        self.insert_typecasts.prune();
    }
}
