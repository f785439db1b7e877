//! Lockstep traversal of a client type AST and an [`ATypeElement`] tree.

use crate::el::ATypeElement;
use crate::type_path::{TypePath, TypePathEntry};

/// Pairs each node of a type's syntax tree with the [`ATypeElement`] for that position.
///
/// Implementors describe their AST through three primitives and receive one
/// [`map`](Self::map) call per node. Positions with no recorded annotations are vivified
/// first, so `map` can always attach annotations to the element it is given.
///
/// For `List<String>[]` the calls are, in order: the array node at `[]`, `List<String>`
/// at `[ARRAY]`, and `String` at `[ARRAY, TYPE_ARGUMENT(0)]`.
pub trait TypeAstMapper {
    type Node;

    /// The component type if `node` is an array type.
    fn element_type<'n>(&self, node: &'n Self::Node) -> Option<&'n Self::Node>;

    fn num_type_arguments(&self, node: &Self::Node) -> usize;

    fn type_argument<'n>(&self, node: &'n Self::Node, index: usize) -> &'n Self::Node;

    /// Called once for every node; `element` is the type element at the node's position.
    fn map(&mut self, node: &Self::Node, element: &mut ATypeElement);

    fn traverse(&mut self, root: &Self::Node, element: &mut ATypeElement) {
        let mut path = TypePath::new();
        traverse_node(self, root, element, &mut path);
        debug_assert!(path.is_empty());
    }
}

fn traverse_node<M>(mapper: &mut M, node: &M::Node, root: &mut ATypeElement, path: &mut TypePath)
where
    M: TypeAstMapper + ?Sized,
{
    mapper.map(node, root.at_path_vivify(path.as_slice()));

    let mut current = node;
    let mut depth = 0;
    while let Some(element_type) = mapper.element_type(current) {
        path.push(TypePathEntry::ArrayElement);
        depth += 1;
        mapper.map(element_type, root.at_path_vivify(path.as_slice()));
        current = element_type;
    }

    for index in 0..mapper.num_type_arguments(current) {
        let Ok(argument_index) = u8::try_from(index) else {
            tracing::debug!(index, "type argument index does not fit a type path");
            break;
        };
        let argument = mapper.type_argument(current, index);
        path.push(TypePathEntry::TypeArgument(argument_index));
        traverse_node(mapper, argument, root, path);
        path.pop();
    }

    path.truncate(path.len() - depth);
}
