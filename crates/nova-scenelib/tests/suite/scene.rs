use nova_scenelib::{
    AScene, Annotated, Annotation, ClassKind, LocalLocation, TypePathEntry, Vacuous,
};
use pretty_assertions::assert_eq;

use super::marker;

#[test]
fn removing_the_only_annotation_empties_the_scene() {
    let non_null = Annotation::marker(marker("org.checkerframework.checker.nullness.qual.NonNull"));
    let mut scene = AScene::new();
    scene
        .classes
        .get_vivify("com.example.Foo".to_string())
        .methods
        .get_vivify("bar(I)V".to_string())
        .parameters
        .get_vivify(0)
        .add_annotation(non_null.clone());

    scene.prune();
    assert!(!scene.is_empty());

    let param = scene
        .classes
        .get_vivify("com.example.Foo".to_string())
        .methods
        .get_vivify("bar(I)V".to_string())
        .parameters
        .get_vivify(0);
    assert!(param.remove_annotation(&non_null));

    scene.prune();
    assert!(scene.is_empty());
    assert_eq!(scene.classes.len(), 0);
}

#[test]
fn inner_type_annotations_keep_the_field_alive() {
    let mut scene = AScene::new();
    let field = scene
        .classes
        .get_vivify("a.B".to_string())
        .fields
        .get_vivify("names".to_string());
    field
        .ty_mut()
        .at_path_vivify(&[TypePathEntry::TypeArgument(0)])
        .add_annotation(Annotation::marker(marker("a.Nullable")));

    scene.prune();
    let field = scene
        .classes
        .get(&"a.B".to_string())
        .and_then(|class| class.fields.get(&"names".to_string()))
        .unwrap();
    let ty = field.ty().unwrap();
    assert!(ty.annotations().is_empty());
    assert_eq!(
        ty.at_path(&[TypePathEntry::TypeArgument(0)])
            .map(|inner| inner.annotations().len()),
        Some(1)
    );
}

#[test]
fn snapshots_are_detached_from_the_scene() {
    let mut scene = AScene::new();
    let class = scene.classes.get_vivify("a.B".to_string());
    class
        .fields
        .get_vivify("f".to_string())
        .add_annotation(Annotation::marker(marker("a.F")));

    let mut snapshot = class.fields_snapshot();
    snapshot.clear();
    assert_eq!(class.fields.len(), 1);
    assert!(class.methods_snapshot().is_empty());
}

#[test]
fn outer_class_kinds_are_known_by_simple_name() {
    let mut scene = AScene::new();
    let inner = scene.classes.get_vivify("a.Outer$Inner".to_string());
    inner.mark_as_enum("a.Outer");
    assert!(inner.is_kind(ClassKind::Enum, "Outer"));
    assert!(!inner.is_enum());
    // Classification is not annotation data.
    assert!(inner.is_vacuous());
}

#[test]
fn locals_are_named_from_their_location() {
    let mut scene = AScene::new();
    let body = &mut scene
        .classes
        .get_vivify("a.B".to_string())
        .methods
        .get_vivify("m()V".to_string())
        .body;
    let by_slot = body.locals.get_vivify(LocalLocation::new(2, 0, 8));
    assert_eq!(by_slot.name(), "2");
    assert!(by_slot.has_placeholder_name());
    by_slot.set_name("count").unwrap();

    let by_name = body.locals.get_vivify(LocalLocation::from_source("it", 0));
    assert_eq!(by_name.name(), "it");
    assert!(by_name.set_name("other").is_err());
}
