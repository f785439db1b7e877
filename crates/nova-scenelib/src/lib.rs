//! In-memory scene of Java annotations keyed by program location.
//!
//! An [`AScene`] holds every annotation recorded for a set of classes: on declarations,
//! on types (addressed by [`TypePath`]), and on expressions inside method bodies
//! (addressed by bytecode offset or source index). Elements are created on first access
//! through [`VivifyingMap`] and removed again with [`AScene::prune`].

#![forbid(unsafe_code)]

mod annotation;
mod clone_check;
mod config;
mod def_collector;
mod el;
mod error;
mod location;
mod type_ast_mapper;
mod type_path;
mod visitor;
mod vivify;

pub use crate::annotation::{
    Annotation, AnnotationBuilder, AnnotationDef, AnnotationFieldType, AnnotationSet,
    AnnotationValue, BasicType,
};
pub use crate::config::CollectorConfig;
pub use crate::def_collector::{DefCollector, DefVisitor};
pub use crate::el::{
    ABlock, AClass, ADeclaration, AElement, AExpression, AField, AMethod, AScene, ATypeElement,
    ATypeElementWithType, Annotated, ClassKind,
};
pub use crate::error::{
    set_once, CloneCheckError, CloneCheckErrorKind, DefError, Result, SceneError,
};
pub use crate::location::{
    AstEntry, AstPath, BoundLocation, LocalLocation, LocalRange, RelativeLocation,
    TypeIndexLocation,
};
pub use crate::type_ast_mapper::TypeAstMapper;
pub use crate::type_path::{display_path, TypePath, TypePathEntry};
pub use crate::visitor::{walk, ElementRef, ElementVisitor};
pub use crate::vivify::{Vacuous, VivifyingMap};
