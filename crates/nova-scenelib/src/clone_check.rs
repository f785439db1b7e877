//! Verification that two scenes are independent deep copies of each other.

use std::fmt::Display;
use std::hash::Hash;

use crate::annotation::{AnnotationDef, AnnotationSet};
use crate::el::{
    ABlock, AClass, ADeclaration, AElement, AExpression, AField, AMethod, AScene, ATypeElement,
    ATypeElementWithType,
};
use crate::error::{CloneCheckError, CloneCheckErrorKind};
use crate::visitor::{ElementRef, ElementVisitor};
use crate::vivify::VivifyingMap;

pub(crate) fn check_clone(original: &AScene, clone: &AScene) -> Result<(), CloneCheckError> {
    let mut checker = CloneChecker { path: Vec::new() };
    checker.distinct(original, clone, "scene")?;
    checker.map(&original.packages, &clone.packages, "packages", ElementRef::Element)?;
    checker.map(&original.classes, &clone.classes, "classes", ElementRef::Class)?;
    checker.distinct(&original.imports, &clone.imports, "import table")?;
    if original.imports != clone.imports {
        return Err(checker.error(CloneCheckErrorKind::Unequal("import tables")));
    }
    tracing::debug!(
        classes = original.classes.len(),
        packages = original.packages.len(),
        "clone check passed"
    );
    Ok(())
}

/// Walks two trees in lockstep; the visitor argument is the corresponding element of the
/// second tree.
struct CloneChecker {
    path: Vec<String>,
}

type Check = Result<(), CloneCheckError>;

impl CloneChecker {
    fn error(&self, kind: CloneCheckErrorKind) -> CloneCheckError {
        CloneCheckError {
            path: self.path.join("/"),
            kind,
        }
    }

    fn distinct<T>(&self, a: &T, b: &T, what: &'static str) -> Check {
        if std::ptr::eq(a, b) {
            return Err(self.error(CloneCheckErrorKind::Aliased(what)));
        }
        Ok(())
    }

    fn same<T: PartialEq + ?Sized>(&self, a: &T, b: &T, what: &'static str) -> Check {
        if a != b {
            return Err(self.error(CloneCheckErrorKind::Unequal(what)));
        }
        Ok(())
    }

    fn mismatch(&self, left: &'static str, right: ElementRef<'_>) -> CloneCheckError {
        self.error(CloneCheckErrorKind::KindMismatch {
            left,
            right: right.kind_name(),
        })
    }

    fn annotations(&self, a: &AnnotationSet, b: &AnnotationSet) -> Check {
        self.distinct(a, b, "annotation set")?;
        self.same(a, b, "annotation sets")
    }

    fn map<'a, K, V>(
        &mut self,
        a: &'a VivifyingMap<K, V>,
        b: &'a VivifyingMap<K, V>,
        name: &str,
        wrap: fn(&'a V) -> ElementRef<'a>,
    ) -> Check
    where
        K: Hash + Eq + Display,
    {
        self.path.push(name.to_string());
        let result = self.map_entries(a, b, wrap);
        self.path.pop();
        result
    }

    fn map_entries<'a, K, V>(
        &mut self,
        a: &'a VivifyingMap<K, V>,
        b: &'a VivifyingMap<K, V>,
        wrap: fn(&'a V) -> ElementRef<'a>,
    ) -> Check
    where
        K: Hash + Eq + Display,
    {
        self.distinct(a, b, "map")?;
        if a.len() != b.len() || a.keys().any(|key| !b.contains_key(key)) {
            return Err(self.error(CloneCheckErrorKind::KeysDiffer));
        }
        for (key, left) in a.iter() {
            let Some(right) = b.get(key) else {
                return Err(self.error(CloneCheckErrorKind::KeysDiffer));
            };
            self.path.push(key.to_string());
            let result = wrap(left).accept(self, wrap(right));
            self.path.pop();
            result?;
        }
        Ok(())
    }

    fn element<'a>(&mut self, a: &'a AElement, b: &'a AElement) -> Check {
        self.distinct(a, b, "element")?;
        self.annotations(&a.tlannotations, &b.tlannotations)?;
        match (a.ty(), b.ty()) {
            (None, None) => Ok(()),
            (Some(left), Some(right)) => {
                self.path.push("type".to_string());
                let result = self.visit_type_element(left, ElementRef::TypeElement(right));
                self.path.pop();
                result
            }
            _ => Err(self.error(CloneCheckErrorKind::Unequal("element types"))),
        }
    }

    fn declaration<'a>(&mut self, a: &'a ADeclaration, b: &'a ADeclaration) -> Check {
        self.distinct(a, b, "declaration")?;
        self.element(&a.element, &b.element)?;
        self.map(
            &a.insert_annotations,
            &b.insert_annotations,
            "insert-annotation",
            ElementRef::TypeElement,
        )?;
        self.map(
            &a.insert_typecasts,
            &b.insert_typecasts,
            "insert-typecast",
            ElementRef::TypeElementWithType,
        )
    }

    fn expression<'a>(&mut self, a: &'a AExpression, b: &'a AExpression) -> Check {
        self.distinct(a, b, "expression")?;
        self.element(&a.element, &b.element)?;
        self.map(&a.typecasts, &b.typecasts, "typecast", ElementRef::TypeElement)?;
        self.map(&a.instanceofs, &b.instanceofs, "instanceof", ElementRef::TypeElement)?;
        self.map(&a.news, &b.news, "new", ElementRef::TypeElement)?;
        self.map(&a.calls, &b.calls, "call", ElementRef::TypeElement)?;
        self.map(&a.refs, &b.refs, "reference", ElementRef::TypeElement)?;
        self.map(&a.funs, &b.funs, "lambda", ElementRef::Method)
    }

    fn nested<'a>(&mut self, name: &str, a: ElementRef<'a>, b: ElementRef<'a>) -> Check {
        self.path.push(name.to_string());
        let result = a.accept(self, b);
        self.path.pop();
        result
    }
}

impl<'a> ElementVisitor<'a, ElementRef<'a>> for CloneChecker {
    type Output = Check;

    fn visit_block(&mut self, el: &'a ABlock, arg: ElementRef<'a>) -> Check {
        let ElementRef::Block(other) = arg else {
            return Err(self.mismatch("block", arg));
        };
        self.distinct(el, other, "block")?;
        self.expression(&el.expression, &other.expression)?;
        self.map(&el.locals, &other.locals, "local", ElementRef::Field)
    }

    fn visit_class(&mut self, el: &'a AClass, arg: ElementRef<'a>) -> Check {
        let ElementRef::Class(other) = arg else {
            return Err(self.mismatch("class", arg));
        };
        self.distinct(el, other, "class")?;
        self.same(el.class_name(), other.class_name(), "class names")?;
        self.same(&el.enum_constants(), &other.enum_constants(), "enum constants")?;
        self.same(el.kinds(), other.kinds(), "class kinds")?;
        self.declaration(&el.decl, &other.decl)?;
        self.map(&el.bounds, &other.bounds, "bound", ElementRef::TypeElement)?;
        self.map(
            &el.extends_implements,
            &other.extends_implements,
            "extends",
            ElementRef::TypeElement,
        )?;
        self.map(&el.methods, &other.methods, "method", ElementRef::Method)?;
        self.map(&el.static_inits, &other.static_inits, "static-init", ElementRef::Block)?;
        self.map(
            &el.instance_inits,
            &other.instance_inits,
            "instance-init",
            ElementRef::Block,
        )?;
        self.map(&el.fields, &other.fields, "field", ElementRef::Field)?;
        self.map(
            &el.field_inits,
            &other.field_inits,
            "field-init",
            ElementRef::Expression,
        )
    }

    fn visit_declaration(&mut self, el: &'a ADeclaration, arg: ElementRef<'a>) -> Check {
        let ElementRef::Declaration(other) = arg else {
            return Err(self.mismatch("declaration", arg));
        };
        self.declaration(el, other)
    }

    fn visit_expression(&mut self, el: &'a AExpression, arg: ElementRef<'a>) -> Check {
        let ElementRef::Expression(other) = arg else {
            return Err(self.mismatch("expression", arg));
        };
        self.expression(el, other)
    }

    fn visit_field(&mut self, el: &'a AField, arg: ElementRef<'a>) -> Check {
        let ElementRef::Field(other) = arg else {
            return Err(self.mismatch("field", arg));
        };
        self.distinct(el, other, "field")?;
        self.same(el.name(), other.name(), "field names")?;
        self.same(&el.type_mirror(), &other.type_mirror(), "type mirrors")?;
        self.declaration(&el.decl, &other.decl)?;
        match (&el.init, &other.init) {
            (None, None) => Ok(()),
            (Some(left), Some(right)) => self.nested(
                "init",
                ElementRef::Expression(left),
                ElementRef::Expression(right),
            ),
            _ => Err(self.error(CloneCheckErrorKind::Unequal("initializers"))),
        }
    }

    fn visit_method(&mut self, el: &'a AMethod, arg: ElementRef<'a>) -> Check {
        let ElementRef::Method(other) = arg else {
            return Err(self.mismatch("method", arg));
        };
        self.distinct(el, other, "method")?;
        self.same(el.method_signature(), other.method_signature(), "signatures")?;
        self.same(
            &el.return_type_mirror(),
            &other.return_type_mirror(),
            "return type mirrors",
        )?;
        self.same(&el.type_parameters(), &other.type_parameters(), "type parameters")?;
        self.declaration(&el.decl, &other.decl)?;
        self.map(&el.bounds, &other.bounds, "bound", ElementRef::TypeElement)?;
        self.nested(
            "return",
            ElementRef::TypeElement(&el.return_type),
            ElementRef::TypeElement(&other.return_type),
        )?;
        self.nested(
            "receiver",
            ElementRef::Field(&el.receiver),
            ElementRef::Field(&other.receiver),
        )?;
        self.map(&el.parameters, &other.parameters, "parameter", ElementRef::Field)?;
        self.map(&el.throws, &other.throws, "throws", ElementRef::TypeElement)?;
        self.map(&el.preconds, &other.preconds, "precondition", ElementRef::Field)?;
        self.map(&el.postconds, &other.postconds, "postcondition", ElementRef::Field)?;
        self.annotations(&el.contracts, &other.contracts)?;
        self.nested(
            "body",
            ElementRef::Block(&el.body),
            ElementRef::Block(&other.body),
        )
    }

    fn visit_type_element(&mut self, el: &'a ATypeElement, arg: ElementRef<'a>) -> Check {
        let ElementRef::TypeElement(other) = arg else {
            return Err(self.mismatch("type element", arg));
        };
        self.distinct(el, other, "type element")?;
        self.element(&el.element, &other.element)?;
        self.path.push("inner-type".to_string());
        let result = self.inner_types(el, other);
        self.path.pop();
        result
    }

    fn visit_type_element_with_type(
        &mut self,
        el: &'a ATypeElementWithType,
        arg: ElementRef<'a>,
    ) -> Check {
        let ElementRef::TypeElementWithType(other) = arg else {
            return Err(self.mismatch("type element with type", arg));
        };
        self.same(&el.ty(), &other.ty(), "unannotated types")?;
        self.visit_type_element(&el.element, ElementRef::TypeElement(&other.element))
    }

    fn visit_annotation_def(&mut self, el: &'a AnnotationDef, arg: ElementRef<'a>) -> Check {
        let ElementRef::AnnotationDef(other) = arg else {
            return Err(self.mismatch("annotation definition", arg));
        };
        // Definitions are shared, never copied, so aliasing is expected here.
        self.same(el, other, "annotation definitions")
    }

    fn visit_element(&mut self, el: &'a AElement, arg: ElementRef<'a>) -> Check {
        let ElementRef::Element(other) = arg else {
            return Err(self.mismatch("element", arg));
        };
        self.element(el, other)
    }
}

impl CloneChecker {
    // Type path keys have no `Display`; render them through the path printer.
    fn inner_types(&mut self, a: &ATypeElement, b: &ATypeElement) -> Check {
        let (a, b) = (&a.inner_types, &b.inner_types);
        self.distinct(a, b, "map")?;
        if a.len() != b.len() || a.keys().any(|key| !b.contains_key(key)) {
            return Err(self.error(CloneCheckErrorKind::KeysDiffer));
        }
        for (key, left) in a.iter() {
            let Some(right) = b.get(key) else {
                return Err(self.error(CloneCheckErrorKind::KeysDiffer));
            };
            self.path.push(crate::type_path::display_path(key));
            let result = self.visit_type_element(left, ElementRef::TypeElement(right));
            self.path.pop();
            result?;
        }
        Ok(())
    }
}
