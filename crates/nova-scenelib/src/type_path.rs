//! Type paths: locations of an annotation inside a compound type.
//!
//! A path is read outermost-first. `List<String[]>` annotated on the `String`
//! component is `[TYPE_ARGUMENT(0), ARRAY]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};

pub type TypePath = Vec<TypePathEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypePathEntry {
    /// Descend into the component type of an array.
    ArrayElement,
    /// Descend into a nested type of a parameterized type.
    InnerType,
    /// Descend into the bound of a wildcard.
    Wildcard,
    /// Descend into the type argument at the given index.
    TypeArgument(u8),
}

impl TypePathEntry {
    pub const ARRAY_KIND: i32 = 0;
    pub const INNER_TYPE_KIND: i32 = 1;
    pub const WILDCARD_KIND: i32 = 2;
    pub const TYPE_ARGUMENT_KIND: i32 = 3;

    /// `(type_path_kind, type_argument_index)` as stored in class files.
    pub fn to_pair(self) -> (i32, i32) {
        match self {
            TypePathEntry::ArrayElement => (Self::ARRAY_KIND, 0),
            TypePathEntry::InnerType => (Self::INNER_TYPE_KIND, 0),
            TypePathEntry::Wildcard => (Self::WILDCARD_KIND, 0),
            TypePathEntry::TypeArgument(index) => (Self::TYPE_ARGUMENT_KIND, i32::from(index)),
        }
    }

    pub fn from_pair(kind: i32, argument: i32) -> Option<Self> {
        match (kind, argument) {
            (Self::ARRAY_KIND, 0) => Some(TypePathEntry::ArrayElement),
            (Self::INNER_TYPE_KIND, 0) => Some(TypePathEntry::InnerType),
            (Self::WILDCARD_KIND, 0) => Some(TypePathEntry::Wildcard),
            (Self::TYPE_ARGUMENT_KIND, index) => u8::try_from(index)
                .ok()
                .map(TypePathEntry::TypeArgument),
            _ => None,
        }
    }

    /// Decode a flat `[kind, arg, kind, arg, ...]` list.
    pub fn from_binary(encoding: &[i32]) -> Result<TypePath> {
        if encoding.len() % 2 != 0 {
            return Err(SceneError::MalformedTypePath {
                encoding: encoding.to_vec(),
                reason: "odd number of integers",
            });
        }
        encoding
            .chunks_exact(2)
            .map(|pair| {
                Self::from_pair(pair[0], pair[1]).ok_or_else(|| SceneError::MalformedTypePath {
                    encoding: encoding.to_vec(),
                    reason: "invalid step",
                })
            })
            .collect()
    }

    pub fn to_binary(path: &[TypePathEntry]) -> Vec<i32> {
        let mut out = Vec::with_capacity(path.len() * 2);
        for entry in path {
            let (kind, argument) = entry.to_pair();
            out.push(kind);
            out.push(argument);
        }
        out
    }

    /// Parse a comma separated list of steps, e.g. `ARRAY, TYPE_ARGUMENT(1)`.
    pub fn parse_path(text: &str) -> Result<TypePath> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        text.split(',').map(str::parse).collect()
    }
}

impl fmt::Display for TypePathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePathEntry::ArrayElement => f.write_str("ARRAY"),
            TypePathEntry::InnerType => f.write_str("INNER_TYPE"),
            TypePathEntry::Wildcard => f.write_str("WILDCARD"),
            TypePathEntry::TypeArgument(index) => write!(f, "TYPE_ARGUMENT({index})"),
        }
    }
}

impl FromStr for TypePathEntry {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        let step = s.trim();
        match step {
            "ARRAY" => return Ok(TypePathEntry::ArrayElement),
            "INNER_TYPE" => return Ok(TypePathEntry::InnerType),
            "WILDCARD" => return Ok(TypePathEntry::Wildcard),
            _ => {}
        }
        step.strip_prefix("TYPE_ARGUMENT(")
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|index| index.trim().parse::<u8>().ok())
            .map(TypePathEntry::TypeArgument)
            .ok_or_else(|| SceneError::InvalidTypePathStep(step.to_string()))
    }
}

/// Render a whole path as `[ARRAY, TYPE_ARGUMENT(0)]`.
pub fn display_path(path: &[TypePathEntry]) -> String {
    let steps: Vec<String> = path.iter().map(ToString::to_string).collect();
    format!("[{}]", steps.join(", "))
}
