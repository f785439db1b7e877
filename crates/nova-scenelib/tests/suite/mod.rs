mod clone_check;
mod config;
mod locations;
mod scene;
mod type_ast_mapper;
mod vivify;

use std::collections::BTreeMap;
use std::sync::Arc;

use nova_scenelib::{AnnotationDef, AnnotationFieldType};

pub(crate) fn def(name: &str, fields: &[(&str, AnnotationFieldType)]) -> Arc<AnnotationDef> {
    let types: BTreeMap<String, AnnotationFieldType> = fields
        .iter()
        .map(|(field, ty)| (field.to_string(), ty.clone()))
        .collect();
    Arc::new(AnnotationDef::with_field_types(name, types, "test"))
}

pub(crate) fn marker(name: &str) -> Arc<AnnotationDef> {
    Arc::new(AnnotationDef::new(name, "test"))
}
