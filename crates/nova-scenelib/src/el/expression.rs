use crate::el::element::{AElement, ATypeElement};
use crate::el::field::AField;
use crate::el::method::AMethod;
use crate::location::{LocalLocation, RelativeLocation};
use crate::vivify::{Vacuous, VivifyingMap};

/// Annotations inside executable code, keyed by [`RelativeLocation`].
#[derive(Debug, Clone)]
pub struct AExpression {
    pub element: AElement,
    /// Name of the member this code belongs to; diagnostic only.
    pub id: String,
    pub typecasts: VivifyingMap<RelativeLocation, ATypeElement>,
    pub instanceofs: VivifyingMap<RelativeLocation, ATypeElement>,
    pub news: VivifyingMap<RelativeLocation, ATypeElement>,
    /// Explicit type arguments of method invocations.
    pub calls: VivifyingMap<RelativeLocation, ATypeElement>,
    /// Explicit type arguments of member references.
    pub refs: VivifyingMap<RelativeLocation, ATypeElement>,
    /// Lambda bodies.
    pub funs: VivifyingMap<RelativeLocation, AMethod>,
}

impl AExpression {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            element: AElement::new(format!("expression {id}")),
            id,
            typecasts: VivifyingMap::new(|loc| ATypeElement::new(format!("typecast {loc}"))),
            instanceofs: VivifyingMap::new(|loc| ATypeElement::new(format!("instanceof {loc}"))),
            news: VivifyingMap::new(|loc| ATypeElement::new(format!("new {loc}"))),
            calls: VivifyingMap::new(|loc| ATypeElement::new(format!("call {loc}"))),
            refs: VivifyingMap::new(|loc| ATypeElement::new(format!("reference {loc}"))),
            funs: VivifyingMap::new(|loc| AMethod::new(format!("lambda{loc}"))),
        }
    }
}

impl PartialEq for AExpression {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
            && self.typecasts == other.typecasts
            && self.instanceofs == other.instanceofs
            && self.news == other.news
            && self.calls == other.calls
            && self.refs == other.refs
            && self.funs == other.funs
    }
}

impl Eq for AExpression {}

impl Vacuous for AExpression {
    fn is_vacuous(&self) -> bool {
        self.element.is_vacuous()
            && self.typecasts.is_empty()
            && self.instanceofs.is_empty()
            && self.news.is_empty()
            && self.calls.is_empty()
            && self.refs.is_empty()
            && self.funs.is_empty()
    }

    fn prune(&mut self) {
        self.element.prune();
        self.typecasts.prune();
        self.instanceofs.prune();
        self.news.prune();
        self.calls.prune();
        self.refs.prune();
        self.funs.prune();
    }
}

/// A method body or initializer block: expression annotations plus local variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ABlock {
    pub expression: AExpression,
    pub locals: VivifyingMap<LocalLocation, AField>,
}

impl ABlock {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            expression: AExpression::new(id),
            locals: VivifyingMap::new(AField::local),
        }
    }
}

impl Vacuous for ABlock {
    fn is_vacuous(&self) -> bool {
        self.expression.is_vacuous() && self.locals.is_empty()
    }

    fn prune(&mut self) {
        self.expression.prune();
        self.locals.prune();
    }
}
