use nova_scenelib::{
    AScene, Annotated, Annotation, AnnotationValue, AstEntry, AstPath, CloneCheckErrorKind,
    LocalLocation, RelativeLocation, TypePathEntry,
};

use pretty_assertions::assert_eq;

use super::{def, marker};

fn populated_scene() -> AScene {
    let non_null = marker("a.NonNull");
    let range = def(
        "a.Range",
        &[(
            "from",
            nova_scenelib::AnnotationFieldType::Basic(nova_scenelib::BasicType::Long),
        )],
    );

    let mut scene = AScene::new();
    scene
        .packages
        .get_vivify("p".to_string())
        .add_annotation(Annotation::marker(marker("a.PackageInfo")));
    scene.add_import("a.NonNull", "a");

    let class = scene.classes.get_vivify("p.C".to_string());
    class.add_annotation(Annotation::marker(marker("a.Entity")));
    let method = class.methods.get_vivify("m(I)V".to_string());
    method
        .parameters
        .get_vivify(0)
        .add_annotation(Annotation::marker(non_null.clone()));
    method
        .body
        .locals
        .get_vivify(LocalLocation::new(1, 0, 12))
        .ty_mut()
        .at_path_vivify(&[TypePathEntry::ArrayElement])
        .add_annotation(Annotation::marker(non_null.clone()));
    method
        .body
        .expression
        .typecasts
        .get_vivify(RelativeLocation::from_offset(7, -1))
        .add_annotation(
            Annotation::builder(range)
                .value("from", AnnotationValue::Long(0))
                .unwrap()
                .build(),
        );
    method
        .body
        .expression
        .funs
        .get_vivify(RelativeLocation::from_offset(20, -1))
        .return_type
        .add_annotation(Annotation::marker(non_null.clone()));

    let field = class.fields.get_vivify("f".to_string());
    field.init_vivify().news.get_vivify(RelativeLocation::from_index(0, -1));
    field
        .decl
        .insert_typecasts
        .get_vivify(AstPath::new().extend(AstEntry::new("Variable", "initializer")))
        .set_ty("java.lang.Object");
    scene
}

#[test]
fn deep_clone_passes() {
    let scene = populated_scene();
    let copy = scene.clone_checked().unwrap();
    assert_eq!(copy, scene);
}

#[test]
fn mutating_the_clone_breaks_equality() {
    let scene = populated_scene();
    let mut copy = scene.clone();
    AScene::check_clone(&scene, &copy).unwrap();

    copy.classes
        .get_vivify("p.C".to_string())
        .methods
        .get_vivify("m(I)V".to_string())
        .parameters
        .get_vivify(0)
        .add_annotation(Annotation::marker(marker("a.Extra")));
    assert_ne!(copy, scene);

    let err = AScene::check_clone(&scene, &copy).unwrap_err();
    assert_eq!(err.kind, CloneCheckErrorKind::Unequal("annotation sets"));
    assert_eq!(err.path, "classes/p.C/method/m(I)V/parameter/0");
}

#[test]
fn missing_entries_are_reported_as_differing_keys() {
    let scene = populated_scene();
    let mut copy = scene.clone();
    copy.classes
        .get_vivify("p.C".to_string())
        .fields
        .get_vivify("g".to_string());

    let err = AScene::check_clone(&scene, &copy).unwrap_err();
    assert_eq!(err.kind, CloneCheckErrorKind::KeysDiffer);
    assert_eq!(err.path, "classes/p.C/field");
}

#[test]
fn mirrors_and_class_marks_are_compared_outside_equality() {
    let scene = populated_scene();

    let mut copy = scene.clone();
    copy.classes
        .get_vivify("p.C".to_string())
        .fields
        .get_vivify("f".to_string())
        .set_type_mirror(Some("int".into()))
        .unwrap();
    assert_eq!(copy, scene);
    let err = AScene::check_clone(&scene, &copy).unwrap_err();
    assert_eq!(err.kind, CloneCheckErrorKind::Unequal("type mirrors"));
    assert_eq!(err.path, "classes/p.C/field/f");

    let mut copy = scene.clone();
    let method = copy
        .classes
        .get_vivify("p.C".to_string())
        .methods
        .get_vivify("m(I)V".to_string());
    method.set_type_parameters(Some(vec!["T".to_string()])).unwrap();
    assert_eq!(copy, scene);
    let err = AScene::check_clone(&scene, &copy).unwrap_err();
    assert_eq!(err.kind, CloneCheckErrorKind::Unequal("type parameters"));
    assert_eq!(err.path, "classes/p.C/method/m(I)V");

    let mut copy = scene.clone();
    copy.classes
        .get_vivify("p.C".to_string())
        .mark_as_interface("p.C");
    assert_eq!(copy, scene);
    let err = AScene::check_clone(&scene, &copy).unwrap_err();
    assert_eq!(err.kind, CloneCheckErrorKind::Unequal("class kinds"));
    assert_eq!(err.path, "classes/p.C");

    let mut copy = scene.clone();
    copy.classes
        .get_vivify("p.C".to_string())
        .set_enum_constants(vec!["A".to_string()])
        .unwrap();
    let err = AScene::check_clone(&scene, &copy).unwrap_err();
    assert_eq!(err.kind, CloneCheckErrorKind::Unequal("enum constants"));
}
