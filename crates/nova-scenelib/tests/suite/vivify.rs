use nova_scenelib::{
    AElement, AMethod, AScene, Annotated, Annotation, AstPath, RelativeLocation, Vacuous,
};
use pretty_assertions::assert_eq;

use super::marker;

#[test]
fn get_vivify_returns_the_same_entry() {
    let mut scene = AScene::new();
    let non_null = Annotation::marker(marker("org.example.NonNull"));
    scene
        .classes
        .get_vivify("a.B".to_string())
        .add_annotation(non_null.clone());

    let class = scene.classes.get_vivify("a.B".to_string());
    assert_eq!(class.annotations().len(), 1);
    assert!(class.annotations().contains(&non_null));
    assert_eq!(scene.classes.len(), 1);
}

#[test]
fn vivified_placeholders_keep_the_map_empty() {
    let mut scene = AScene::new();
    let class = scene.classes.get_vivify("a.B".to_string());
    class.methods.get_vivify("m()V".to_string()).parameters.get_vivify(0);
    class.fields.get_vivify("f".to_string()).ty_mut();
    class
        .field_inits
        .get_vivify("f".to_string())
        .typecasts
        .get_vivify(RelativeLocation::from_offset(4, -1));

    assert!(scene.is_empty());
    assert_eq!(scene.classes.len(), 1);

    scene.prune();
    assert_eq!(scene.classes.len(), 0);
    assert!(scene.is_vacuous());
}

#[test]
fn prune_keeps_annotated_leaves_and_their_ancestors() {
    let mut scene = AScene::new();
    let class = scene.classes.get_vivify("a.B".to_string());
    class.methods.get_vivify("unused()V".to_string());
    class
        .methods
        .get_vivify("m()V".to_string())
        .return_type
        .add_annotation(Annotation::marker(marker("a.Ret")));

    scene.prune();
    let class = scene.classes.get(&"a.B".to_string()).unwrap();
    assert_eq!(
        class.methods.keys().cloned().collect::<Vec<_>>(),
        vec!["m()V".to_string()]
    );
}

#[test]
fn equality_ignores_insertion_order() {
    let a_ann = Annotation::marker(marker("a.A"));
    let b_ann = Annotation::marker(marker("a.B"));

    let mut left = AScene::new();
    left.classes.get_vivify("x.One".to_string()).add_annotation(a_ann.clone());
    left.classes.get_vivify("x.Two".to_string()).add_annotation(b_ann.clone());

    let mut right = AScene::new();
    right.classes.get_vivify("x.Two".to_string()).add_annotation(b_ann);
    right.classes.get_vivify("x.One".to_string()).add_annotation(a_ann);

    assert_eq!(left, right);
}

#[test]
fn equality_sees_unpruned_placeholders() {
    let mut left = AScene::new();
    left.classes.get_vivify("x.One".to_string());
    let right = AScene::new();
    assert_ne!(left, right);

    left.prune();
    assert_eq!(left, right);
}

#[test]
fn get_returns_the_vivified_instance() {
    let mut scene = AScene::new();
    let first: *const AElement = scene.packages.get_vivify("a.b".to_string());
    let second: *const AElement = scene.packages.get_vivify("a.b".to_string());
    assert!(std::ptr::eq(first, second));
    let looked_up = scene.packages.get(&"a.b".to_string()).unwrap();
    assert!(std::ptr::eq(first, looked_up));
}

#[test]
fn extra_parameter_entry_breaks_method_equality_until_pruned() {
    let mut with_param = AMethod::new("m(I)V");
    with_param.parameters.get_vivify(0);
    let mut without = AMethod::new("m(I)V");
    assert_ne!(with_param, without);

    with_param.prune();
    without.prune();
    assert_eq!(with_param, without);
}

#[test]
fn bare_insert_typecast_survives_prune() {
    let mut scene = AScene::new();
    let class = scene.classes.get_vivify("p.C".to_string());
    let typecast = class.decl.insert_typecasts.get_vivify(AstPath::new());
    assert!(typecast.element.annotations().is_empty());
    assert_eq!(typecast.ty(), None);

    scene.prune();

    assert!(!scene.is_empty());
    assert_eq!(scene.classes.len(), 1);
    let class = scene.classes.get(&"p.C".to_string()).unwrap();
    assert!(class.decl.insert_typecasts.contains_key(&AstPath::new()));
}
