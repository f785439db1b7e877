use indexmap::IndexMap;

use crate::annotation::AnnotationSet;
use crate::el::declaration::ADeclaration;
use crate::el::element::ATypeElement;
use crate::el::expression::ABlock;
use crate::el::field::AField;
use crate::error::{set_once, Result};
use crate::location::{BoundLocation, TypeIndexLocation};
use crate::vivify::{Vacuous, VivifyingMap};

/// A method, constructor or lambda, keyed in its class by JVML signature (`bar(I)V`).
#[derive(Debug, Clone)]
pub struct AMethod {
    pub decl: ADeclaration,
    method_signature: String,
    pub bounds: VivifyingMap<BoundLocation, ATypeElement>,
    /// Present even for `void` or unknown return types.
    pub return_type: ATypeElement,
    pub receiver: AField,
    pub parameters: VivifyingMap<i32, AField>,
    pub throws: VivifyingMap<TypeIndexLocation, ATypeElement>,
    /// Keyed by the Java expression the condition is about.
    pub preconds: VivifyingMap<String, AField>,
    pub postconds: VivifyingMap<String, AField>,
    /// Contract annotations (`@EnsuresNonNullIf`, ...) attached to the method as a whole.
    pub contracts: AnnotationSet,
    pub body: ABlock,
    return_type_mirror: Option<String>,
    type_parameters: Option<Vec<String>>,
}

impl AMethod {
    pub fn new(method_signature: impl Into<String>) -> Self {
        let method_signature = method_signature.into();
        Self {
            decl: ADeclaration::new(format!("method {method_signature}")),
            bounds: VivifyingMap::new(|loc| ATypeElement::new(format!("{loc}"))),
            return_type: ATypeElement::new(format!("return type of {method_signature}")),
            receiver: AField::new("this"),
            parameters: VivifyingMap::new(AField::parameter),
            throws: VivifyingMap::new(|loc| ATypeElement::new(format!("throws {loc}"))),
            preconds: VivifyingMap::new(|expr| AField::new(expr.clone())),
            postconds: VivifyingMap::new(|expr| AField::new(expr.clone())),
            contracts: AnnotationSet::new(),
            body: ABlock::new(method_signature.clone()),
            return_type_mirror: None,
            type_parameters: None,
            method_signature,
        }
    }

    pub fn method_signature(&self) -> &str {
        &self.method_signature
    }

    /// The method name, without its descriptor.
    pub fn name(&self) -> &str {
        self.method_signature
            .split_once('(')
            .map_or(self.method_signature.as_str(), |(name, _)| name)
    }

    pub fn return_type_mirror(&self) -> Option<&str> {
        self.return_type_mirror.as_deref()
    }

    pub fn set_return_type_mirror(&mut self, mirror: Option<String>) -> Result<()> {
        set_once(&mut self.return_type_mirror, mirror, "return type mirror")
    }

    pub fn type_parameters(&self) -> Option<&[String]> {
        self.type_parameters.as_deref()
    }

    pub fn set_type_parameters(&mut self, type_parameters: Option<Vec<String>>) -> Result<()> {
        set_once(&mut self.type_parameters, type_parameters, "type parameters")
    }

    pub fn parameters_snapshot(&self) -> IndexMap<i32, AField> {
        self.parameters.snapshot()
    }

    pub fn preconds_snapshot(&self) -> IndexMap<String, AField> {
        self.preconds.snapshot()
    }

    pub fn postconds_snapshot(&self) -> IndexMap<String, AField> {
        self.postconds.snapshot()
    }
}

impl PartialEq for AMethod {
    fn eq(&self, other: &Self) -> bool {
        self.method_signature == other.method_signature
            && self.decl == other.decl
            && self.bounds == other.bounds
            && self.return_type == other.return_type
            && self.receiver == other.receiver
            && self.parameters == other.parameters
            && self.throws == other.throws
            && self.preconds == other.preconds
            && self.postconds == other.postconds
            && self.contracts == other.contracts
            && self.body == other.body
    }
}

impl Eq for AMethod {}

impl Vacuous for AMethod {
    fn is_vacuous(&self) -> bool {
        self.decl.is_vacuous()
            && self.bounds.is_empty()
            && self.return_type.is_vacuous()
            && self.receiver.is_vacuous()
            && self.parameters.is_empty()
            && self.throws.is_empty()
            && self.preconds.is_empty()
            && self.postconds.is_empty()
            && self.contracts.is_empty()
            && self.body.is_vacuous()
    }

    fn prune(&mut self) {
        self.decl.prune();
        self.bounds.prune();
        self.return_type.prune();
        self.receiver.prune();
        self.parameters.prune();
        self.throws.prune();
        self.preconds.prune();
        self.postconds.prune();
        self.body.prune();
    }
}
