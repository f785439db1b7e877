//! Double dispatch over the element tree.
//!
//! [`ElementRef`] is a borrowed view of any element. [`ElementRef::accept`] picks the
//! visitor method for the element's kind, and [`ElementRef::children`] lists the owned
//! subelements in a fixed order.

use crate::annotation::{AnnotationDef, AnnotationSet};
use crate::el::{
    ABlock, AClass, ADeclaration, AElement, AExpression, AField, AMethod, ATypeElement,
    ATypeElementWithType, Annotated,
};
use crate::vivify::Vacuous;

#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Block(&'a ABlock),
    Class(&'a AClass),
    Declaration(&'a ADeclaration),
    Expression(&'a AExpression),
    Field(&'a AField),
    Method(&'a AMethod),
    TypeElement(&'a ATypeElement),
    TypeElementWithType(&'a ATypeElementWithType),
    AnnotationDef(&'a AnnotationDef),
    Element(&'a AElement),
}

/// One method per element kind; `T` is an extra argument threaded through the walk.
pub trait ElementVisitor<'a, T> {
    type Output;

    fn visit_block(&mut self, el: &'a ABlock, arg: T) -> Self::Output;
    fn visit_class(&mut self, el: &'a AClass, arg: T) -> Self::Output;
    fn visit_declaration(&mut self, el: &'a ADeclaration, arg: T) -> Self::Output;
    fn visit_expression(&mut self, el: &'a AExpression, arg: T) -> Self::Output;
    fn visit_field(&mut self, el: &'a AField, arg: T) -> Self::Output;
    fn visit_method(&mut self, el: &'a AMethod, arg: T) -> Self::Output;
    fn visit_type_element(&mut self, el: &'a ATypeElement, arg: T) -> Self::Output;
    fn visit_type_element_with_type(
        &mut self,
        el: &'a ATypeElementWithType,
        arg: T,
    ) -> Self::Output;
    fn visit_annotation_def(&mut self, el: &'a AnnotationDef, arg: T) -> Self::Output;
    fn visit_element(&mut self, el: &'a AElement, arg: T) -> Self::Output;
}

impl<'a> ElementRef<'a> {
    pub fn accept<T, V>(self, visitor: &mut V, arg: T) -> V::Output
    where
        V: ElementVisitor<'a, T> + ?Sized,
    {
        match self {
            ElementRef::Block(el) => visitor.visit_block(el, arg),
            ElementRef::Class(el) => visitor.visit_class(el, arg),
            ElementRef::Declaration(el) => visitor.visit_declaration(el, arg),
            ElementRef::Expression(el) => visitor.visit_expression(el, arg),
            ElementRef::Field(el) => visitor.visit_field(el, arg),
            ElementRef::Method(el) => visitor.visit_method(el, arg),
            ElementRef::TypeElement(el) => visitor.visit_type_element(el, arg),
            ElementRef::TypeElementWithType(el) => visitor.visit_type_element_with_type(el, arg),
            ElementRef::AnnotationDef(el) => visitor.visit_annotation_def(el, arg),
            ElementRef::Element(el) => visitor.visit_element(el, arg),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ElementRef::Block(_) => "block",
            ElementRef::Class(_) => "class",
            ElementRef::Declaration(_) => "declaration",
            ElementRef::Expression(_) => "expression",
            ElementRef::Field(_) => "field",
            ElementRef::Method(_) => "method",
            ElementRef::TypeElement(_) => "type element",
            ElementRef::TypeElementWithType(_) => "type element with type",
            ElementRef::AnnotationDef(_) => "annotation definition",
            ElementRef::Element(_) => "element",
        }
    }

    fn annotated(self) -> Result<&'a dyn Annotated, &'a AnnotationDef> {
        let el: &'a dyn Annotated = match self {
            ElementRef::Block(el) => el,
            ElementRef::Class(el) => el,
            ElementRef::Declaration(el) => el,
            ElementRef::Expression(el) => el,
            ElementRef::Field(el) => el,
            ElementRef::Method(el) => el,
            ElementRef::TypeElement(el) => el,
            ElementRef::TypeElementWithType(el) => el,
            ElementRef::Element(el) => el,
            ElementRef::AnnotationDef(def) => return Err(def),
        };
        Ok(el)
    }

    /// Top-level annotations; for a definition, its meta-annotations.
    pub fn annotations(&self) -> &'a AnnotationSet {
        match self.annotated() {
            Ok(el) => el.annotations(),
            Err(def) => &def.meta_annotations,
        }
    }

    pub fn description(&self) -> &'a str {
        match self.annotated() {
            Ok(el) => el.description(),
            Err(def) => &def.name,
        }
    }

    pub fn is_vacuous(&self) -> bool {
        match *self {
            ElementRef::Block(el) => el.is_vacuous(),
            ElementRef::Class(el) => el.is_vacuous(),
            ElementRef::Declaration(el) => el.is_vacuous(),
            ElementRef::Expression(el) => el.is_vacuous(),
            ElementRef::Field(el) => el.is_vacuous(),
            ElementRef::Method(el) => el.is_vacuous(),
            ElementRef::TypeElement(el) => el.is_vacuous(),
            ElementRef::TypeElementWithType(el) => el.is_vacuous(),
            ElementRef::AnnotationDef(_) => false,
            ElementRef::Element(el) => el.is_vacuous(),
        }
    }

    /// Owned subelements, in traversal order.
    pub fn children(&self) -> Vec<ElementRef<'a>> {
        let mut out = Vec::new();
        match *self {
            ElementRef::Element(el) => push_type(&mut out, el),
            ElementRef::TypeElement(el) => {
                out.extend(el.inner_types.values().map(ElementRef::TypeElement));
            }
            ElementRef::TypeElementWithType(el) => {
                out.extend(el.element.inner_types.values().map(ElementRef::TypeElement));
            }
            ElementRef::Declaration(el) => push_declaration(&mut out, el),
            ElementRef::Expression(el) => push_expression(&mut out, el),
            ElementRef::Block(el) => {
                push_expression(&mut out, &el.expression);
                out.extend(el.locals.values().map(ElementRef::Field));
            }
            ElementRef::Field(el) => {
                push_declaration(&mut out, &el.decl);
                out.extend(el.init.as_ref().map(ElementRef::Expression));
            }
            ElementRef::Method(el) => {
                push_declaration(&mut out, &el.decl);
                out.extend(el.bounds.values().map(ElementRef::TypeElement));
                out.push(ElementRef::TypeElement(&el.return_type));
                out.push(ElementRef::Field(&el.receiver));
                out.extend(el.parameters.values().map(ElementRef::Field));
                out.extend(el.throws.values().map(ElementRef::TypeElement));
                out.extend(el.preconds.values().map(ElementRef::Field));
                out.extend(el.postconds.values().map(ElementRef::Field));
                out.push(ElementRef::Block(&el.body));
            }
            ElementRef::Class(el) => {
                push_declaration(&mut out, &el.decl);
                out.extend(el.bounds.values().map(ElementRef::TypeElement));
                out.extend(el.extends_implements.values().map(ElementRef::TypeElement));
                out.extend(el.methods.values().map(ElementRef::Method));
                out.extend(el.fields.values().map(ElementRef::Field));
                out.extend(el.field_inits.values().map(ElementRef::Expression));
                out.extend(el.static_inits.values().map(ElementRef::Block));
                out.extend(el.instance_inits.values().map(ElementRef::Block));
            }
            ElementRef::AnnotationDef(_) => {}
        }
        out
    }
}

fn push_type<'a>(out: &mut Vec<ElementRef<'a>>, el: &'a AElement) {
    out.extend(el.ty().map(ElementRef::TypeElement));
}

fn push_declaration<'a>(out: &mut Vec<ElementRef<'a>>, decl: &'a ADeclaration) {
    push_type(out, &decl.element);
    out.extend(decl.insert_annotations.values().map(ElementRef::TypeElement));
    out.extend(
        decl.insert_typecasts
            .values()
            .map(ElementRef::TypeElementWithType),
    );
}

fn push_expression<'a>(out: &mut Vec<ElementRef<'a>>, expr: &'a AExpression) {
    push_type(out, &expr.element);
    for map in [
        &expr.typecasts,
        &expr.instanceofs,
        &expr.news,
        &expr.calls,
        &expr.refs,
    ] {
        out.extend(map.values().map(ElementRef::TypeElement));
    }
    out.extend(expr.funs.values().map(ElementRef::Method));
}

/// Pre-order walk of `root` and all of its descendants.
pub fn walk<'a>(root: ElementRef<'a>, f: &mut impl FnMut(ElementRef<'a>)) {
    f(root);
    for child in root.children() {
        walk(child, f);
    }
}

impl<'a> From<&'a AClass> for ElementRef<'a> {
    fn from(el: &'a AClass) -> Self {
        ElementRef::Class(el)
    }
}

impl<'a> From<&'a AMethod> for ElementRef<'a> {
    fn from(el: &'a AMethod) -> Self {
        ElementRef::Method(el)
    }
}

impl<'a> From<&'a AField> for ElementRef<'a> {
    fn from(el: &'a AField) -> Self {
        ElementRef::Field(el)
    }
}

impl<'a> From<&'a ATypeElement> for ElementRef<'a> {
    fn from(el: &'a ATypeElement) -> Self {
        ElementRef::TypeElement(el)
    }
}

impl<'a> From<&'a AElement> for ElementRef<'a> {
    fn from(el: &'a AElement) -> Self {
        ElementRef::Element(el)
    }
}
