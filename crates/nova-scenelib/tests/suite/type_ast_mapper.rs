use nova_scenelib::{
    display_path, ATypeElement, Annotated, Annotation, TypeAstMapper, TypePathEntry,
};
use pretty_assertions::assert_eq;

use super::marker;

/// Minimal type syntax: `Name<args>` and `T[]`.
#[derive(Debug)]
enum TypeNode {
    Named(&'static str, Vec<TypeNode>),
    Array(Box<TypeNode>),
}

fn named(name: &'static str, args: Vec<TypeNode>) -> TypeNode {
    TypeNode::Named(name, args)
}

fn array(element: TypeNode) -> TypeNode {
    TypeNode::Array(Box::new(element))
}

fn render(node: &TypeNode) -> String {
    match node {
        TypeNode::Named(name, args) if args.is_empty() => name.to_string(),
        TypeNode::Named(name, args) => {
            let args: Vec<String> = args.iter().map(render).collect();
            format!("{name}<{}>", args.join(", "))
        }
        TypeNode::Array(element) => format!("{}[]", render(element)),
    }
}

/// Records every (node, element) pair and annotates nodes named in `annotate`.
struct Recorder {
    seen: Vec<(String, String)>,
    annotate: &'static str,
}

impl TypeAstMapper for Recorder {
    type Node = TypeNode;

    fn element_type<'n>(&self, node: &'n TypeNode) -> Option<&'n TypeNode> {
        match node {
            TypeNode::Array(element) => Some(&**element),
            TypeNode::Named(..) => None,
        }
    }

    fn num_type_arguments(&self, node: &TypeNode) -> usize {
        match node {
            TypeNode::Named(_, args) => args.len(),
            TypeNode::Array(_) => 0,
        }
    }

    fn type_argument<'n>(&self, node: &'n TypeNode, index: usize) -> &'n TypeNode {
        match node {
            TypeNode::Named(_, args) => &args[index],
            TypeNode::Array(_) => unreachable!("arrays have no type arguments"),
        }
    }

    fn map(&mut self, node: &TypeNode, element: &mut ATypeElement) {
        let rendered = render(node);
        if rendered == self.annotate {
            element.add_annotation(Annotation::marker(marker("a.Nullable")));
        }
        self.seen.push((rendered, element.description().to_string()));
    }
}

fn recorder(annotate: &'static str) -> Recorder {
    Recorder {
        seen: Vec::new(),
        annotate,
    }
}

#[test]
fn simple_type_maps_to_the_root() {
    let mut root = ATypeElement::new("root");
    let mut mapper = recorder("");
    mapper.traverse(&named("String", vec![]), &mut root);
    assert_eq!(mapper.seen, vec![("String".to_string(), "root".to_string())]);
    assert_eq!(root.inner_types.len(), 0);
}

#[test]
fn generic_arguments_get_type_argument_steps() {
    let ty = named(
        "Map",
        vec![named("String", vec![]), named("List", vec![named("Integer", vec![])])],
    );
    let mut root = ATypeElement::new("root");
    let mut mapper = recorder("Integer");
    mapper.traverse(&ty, &mut root);

    let rendered: Vec<&str> = mapper.seen.iter().map(|(node, _)| node.as_str()).collect();
    assert_eq!(
        rendered,
        vec!["Map<String, List<Integer>>", "String", "List<Integer>", "Integer"]
    );
    let paths: Vec<String> = root.inner_types.keys().map(|path| display_path(path)).collect();
    assert_eq!(
        paths,
        vec![
            "[TYPE_ARGUMENT(0)]",
            "[TYPE_ARGUMENT(1)]",
            "[TYPE_ARGUMENT(1), TYPE_ARGUMENT(0)]",
        ]
    );
    let integer = root
        .at_path(&[TypePathEntry::TypeArgument(1), TypePathEntry::TypeArgument(0)])
        .unwrap();
    assert_eq!(integer.annotations().len(), 1);
}

#[test]
fn arrays_descend_layer_by_layer_before_type_arguments() {
    // List<String>[][]
    let ty = array(array(named("List", vec![named("String", vec![])])));
    let mut root = ATypeElement::new("root");
    let mut mapper = recorder("List<String>");
    mapper.traverse(&ty, &mut root);

    let rendered: Vec<&str> = mapper.seen.iter().map(|(node, _)| node.as_str()).collect();
    assert_eq!(
        rendered,
        vec!["List<String>[][]", "List<String>[]", "List<String>", "String"]
    );
    let paths: Vec<String> = root.inner_types.keys().map(|path| display_path(path)).collect();
    assert_eq!(
        paths,
        vec![
            "[ARRAY]",
            "[ARRAY, ARRAY]",
            "[ARRAY, ARRAY, TYPE_ARGUMENT(0)]",
        ]
    );
    let list = root
        .at_path(&[TypePathEntry::ArrayElement, TypePathEntry::ArrayElement])
        .unwrap();
    assert_eq!(list.annotations().len(), 1);
}

#[test]
fn sibling_arguments_do_not_share_path_state() {
    // Pair<String[], Integer>
    let ty = named(
        "Pair",
        vec![array(named("String", vec![])), named("Integer", vec![])],
    );
    let mut root = ATypeElement::new("root");
    let mut mapper = recorder("");
    mapper.traverse(&ty, &mut root);

    let paths: Vec<String> = root.inner_types.keys().map(|path| display_path(path)).collect();
    assert_eq!(
        paths,
        vec![
            "[TYPE_ARGUMENT(0)]",
            "[TYPE_ARGUMENT(0), ARRAY]",
            "[TYPE_ARGUMENT(1)]",
        ]
    );
}

#[test]
fn existing_annotations_are_handed_to_the_callback() {
    let mut root = ATypeElement::new("root");
    root.at_path_vivify(&[TypePathEntry::TypeArgument(0)])
        .add_annotation(Annotation::marker(marker("a.Existing")));

    let mut mapper = recorder("");
    mapper.traverse(&named("List", vec![named("String", vec![])]), &mut root);

    assert_eq!(root.inner_types.len(), 1);
    assert_eq!(
        mapper.seen[1],
        ("String".to_string(), "inner type [TYPE_ARGUMENT(0)]".to_string())
    );
}
