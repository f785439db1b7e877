//! Keys that say *where* inside a declaration an annotation sits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A bound of a type parameter.
///
/// `bound_index == -1` addresses the type parameter itself rather than one of its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoundLocation {
    pub param_index: i32,
    pub bound_index: i32,
}

impl BoundLocation {
    pub const fn new(param_index: i32, bound_index: i32) -> Self {
        Self {
            param_index,
            bound_index,
        }
    }

    pub const fn type_parameter(param_index: i32) -> Self {
        Self::new(param_index, -1)
    }
}

impl fmt::Display for BoundLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bound {} &{}", self.param_index, self.bound_index)
    }
}

/// A location inside a method body.
///
/// Exactly one of `offset` (bytecode form) and `index` (source form) is non-negative.
/// `type_index` selects a member of an intersection or union type and is otherwise `-1`.
///
/// The derived ordering compares `offset`, then `index`, then `type_index`, which groups
/// entries by syntactic site and agrees with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelativeLocation {
    pub offset: i32,
    pub index: i32,
    pub type_index: i32,
}

impl RelativeLocation {
    pub const fn from_offset(offset: i32, type_index: i32) -> Self {
        Self {
            offset,
            index: -1,
            type_index,
        }
    }

    pub const fn from_index(index: i32, type_index: i32) -> Self {
        Self {
            offset: -1,
            index,
            type_index,
        }
    }

    pub const fn is_bytecode(&self) -> bool {
        self.offset > -1
    }

    /// Same site, with the intersection/union member cleared.
    pub const fn site(&self) -> Self {
        Self {
            offset: self.offset,
            index: self.index,
            type_index: -1,
        }
    }
}

impl fmt::Display for RelativeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bytecode() {
            write!(f, "#{}", self.offset)?;
        } else {
            write!(f, "*{}", self.index)?;
        }
        if self.type_index >= 0 {
            write!(f, ",{}", self.type_index)?;
        }
        Ok(())
    }
}

/// A supertype, implemented interface or thrown exception.
///
/// For `extends`/`implements`, `-1` is the superclass and `0..` the interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeIndexLocation {
    pub type_index: i32,
}

impl TypeIndexLocation {
    pub const SUPERCLASS: Self = Self::new(-1);

    pub const fn new(type_index: i32) -> Self {
        Self { type_index }
    }
}

impl fmt::Display for TypeIndexLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "typeindex {}", self.type_index)
    }
}

/// One live range of a local variable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalRange {
    pub start: i32,
    pub length: i32,
    pub index: i32,
}

/// A local variable, identified either by its bytecode live ranges or by source name.
///
/// A variable may occupy several disjoint ranges; they are kept in the order the class
/// file lists them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalLocation {
    pub ranges: Vec<LocalRange>,
    pub var_name: Option<String>,
    pub var_index: i32,
}

impl LocalLocation {
    pub fn new(index: i32, start: i32, length: i32) -> Self {
        Self::with_ranges(vec![LocalRange {
            start,
            length,
            index,
        }])
    }

    pub fn with_ranges(ranges: Vec<LocalRange>) -> Self {
        Self {
            ranges,
            var_name: None,
            var_index: -1,
        }
    }

    /// Source form: the `var_index`-th declaration named `var_name` in the body.
    pub fn from_source(var_name: impl Into<String>, var_index: i32) -> Self {
        Self {
            ranges: Vec::new(),
            var_name: Some(var_name.into()),
            var_index,
        }
    }

    /// Local variable table slot of the first range, if any.
    pub fn slot(&self) -> Option<i32> {
        self.ranges.first().map(|range| range.index)
    }
}

impl fmt::Display for LocalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.var_name {
            return write!(f, "{name}*{}", self.var_index);
        }
        let mut first = true;
        for range in &self.ranges {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "#{} #{}+{}", range.index, range.start, range.length)?;
        }
        Ok(())
    }
}

/// One step of an [`AstPath`]: the kind of tree node, which child to descend into and,
/// for list-valued children, the position in that list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AstEntry {
    pub tree_kind: String,
    pub child_selector: String,
    pub argument: Option<u32>,
}

impl AstEntry {
    pub fn new(tree_kind: impl Into<String>, child_selector: impl Into<String>) -> Self {
        Self {
            tree_kind: tree_kind.into(),
            child_selector: child_selector.into(),
            argument: None,
        }
    }

    pub fn with_argument(mut self, argument: u32) -> Self {
        self.argument = Some(argument);
        self
    }
}

impl fmt::Display for AstEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tree_kind, self.child_selector)?;
        if let Some(argument) = self.argument {
            write!(f, " {argument}")?;
        }
        Ok(())
    }
}

/// Path from a declaration's AST node down to a source position that needs an
/// annotation or cast inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AstPath(pub Vec<AstEntry>);

impl AstPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&self, entry: AstEntry) -> Self {
        let mut entries = self.0.clone();
        entries.push(entry);
        Self(entries)
    }

    pub fn entries(&self) -> &[AstEntry] {
        &self.0
    }
}

impl fmt::Display for AstPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&entries.join(", "))
    }
}
