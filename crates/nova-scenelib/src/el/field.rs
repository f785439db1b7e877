use crate::el::declaration::ADeclaration;
use crate::el::element::ATypeElement;
use crate::el::expression::AExpression;
use crate::error::{set_once, Result, SceneError};
use crate::location::LocalLocation;
use crate::vivify::Vacuous;

/// A field, parameter, receiver or local variable.
///
/// Parameters and bytecode locals are vivified under a numeric placeholder name which may
/// later be replaced by the real name exactly once.
#[derive(Debug, Clone)]
pub struct AField {
    pub decl: ADeclaration,
    name: String,
    type_mirror: Option<String>,
    pub init: Option<AExpression>,
}

impl AField {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            decl: ADeclaration::with_type(format!("field {name}")),
            name,
            type_mirror: None,
            init: None,
        }
    }

    pub(crate) fn parameter(index: &i32) -> Self {
        let mut field = Self::new(index.to_string());
        field.decl = ADeclaration::with_type(format!("parameter {index}"));
        field
    }

    pub(crate) fn local(loc: &LocalLocation) -> Self {
        let name = match &loc.var_name {
            Some(name) => name.clone(),
            None => loc.slot().unwrap_or(-1).to_string(),
        };
        let mut field = Self::new(name);
        field.decl = ADeclaration::with_type(format!("local {loc}"));
        field
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the name is still the numeric default assigned at vivification.
    pub fn has_placeholder_name(&self) -> bool {
        self.name.parse::<i64>().is_ok()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name == self.name {
            return Ok(());
        }
        if !self.has_placeholder_name() {
            return Err(SceneError::Rename {
                old: self.name.clone(),
                new: name,
            });
        }
        self.name = name;
        Ok(())
    }

    /// The annotated type of this variable.
    pub fn ty(&self) -> Option<&ATypeElement> {
        self.decl.element.ty()
    }

    pub fn ty_mut(&mut self) -> &mut ATypeElement {
        self.decl.element.ty_vivify()
    }

    /// The unannotated type as reported by the host compiler, if known.
    pub fn type_mirror(&self) -> Option<&str> {
        self.type_mirror.as_deref()
    }

    pub fn set_type_mirror(&mut self, type_mirror: Option<String>) -> Result<()> {
        set_once(&mut self.type_mirror, type_mirror, "field type mirror")
    }

    pub fn init_vivify(&mut self) -> &mut AExpression {
        let name = &self.name;
        self.init
            .get_or_insert_with(|| AExpression::new(format!("initializer of {name}")))
    }
}

impl PartialEq for AField {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.decl == other.decl && self.init == other.init
    }
}

impl Eq for AField {}

impl Vacuous for AField {
    fn is_vacuous(&self) -> bool {
        self.decl.is_vacuous() && self.init.as_ref().map_or(true, Vacuous::is_vacuous)
    }

    fn prune(&mut self) {
        self.decl.prune();
        if let Some(init) = &mut self.init {
            init.prune();
        }
        if self.init.as_ref().is_some_and(|init| init.is_vacuous()) {
            self.init = None;
        }
    }
}
