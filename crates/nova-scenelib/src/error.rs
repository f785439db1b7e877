use std::fmt;

use thiserror::Error;

pub type Result<T, E = SceneError> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A set-once slot already holds a different value.
    #[error("{what} already set to {old}, cannot change it to {new}")]
    ConflictingValue {
        what: &'static str,
        old: String,
        new: String,
    },
    #[error("cannot rename {old} to {new}: only placeholder names may change")]
    Rename { old: String, new: String },
    #[error("malformed type path {encoding:?}: {reason}")]
    MalformedTypePath {
        encoding: Vec<i32>,
        reason: &'static str,
    },
    #[error("invalid type path step `{0}`")]
    InvalidTypePathStep(String),
    #[error("annotation @{annotation} has no field `{field}`")]
    UnknownAnnotationField { annotation: String, field: String },
    #[error("value for @{annotation}.{field} does not match declared type {expected}")]
    AnnotationValueMismatch {
        annotation: String,
        field: String,
        expected: String,
    },
    #[error("invalid collector config: {0}")]
    Config(String),
}

/// Annotation definitions could not be reconciled with each other or with their uses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefError {
    #[error("conflicting definitions of annotation type {name}: {def1} (from {source1}) vs {def2} (from {source2})")]
    Conflict {
        name: String,
        def1: String,
        def2: String,
        source1: String,
        source2: String,
    },
    /// An annotation uses an element its merged definition does not declare.
    #[error("annotation @{annotation} has no element `{field}` (definition from {def_source})")]
    UnknownField {
        annotation: String,
        field: String,
        def_source: String,
    },
    #[error("value {value} of @{annotation}.{field} does not fit merged type {expected} (definition from {def_source})")]
    ValueMismatch {
        annotation: String,
        field: String,
        value: String,
        expected: String,
        def_source: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("clone check failed at {path}: {kind}")]
pub struct CloneCheckError {
    /// Slash separated description of where the two trees diverged.
    pub path: String,
    pub kind: CloneCheckErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneCheckErrorKind {
    Aliased(&'static str),
    KindMismatch { left: &'static str, right: &'static str },
    KeysDiffer,
    Unequal(&'static str),
}

impl fmt::Display for CloneCheckErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloneCheckErrorKind::Aliased(what) => {
                write!(f, "{what} is shared between original and clone")
            }
            CloneCheckErrorKind::KindMismatch { left, right } => {
                write!(f, "element kinds differ ({left} vs {right})")
            }
            CloneCheckErrorKind::KeysDiffer => f.write_str("map keys differ"),
            CloneCheckErrorKind::Unequal(what) => write!(f, "{what} differ"),
        }
    }
}

/// Store `value` into a monotonic slot.
///
/// `None` and a repeat of the current value are no-ops; a different value is an error.
pub fn set_once<T>(slot: &mut Option<T>, value: Option<T>, what: &'static str) -> Result<()>
where
    T: PartialEq + fmt::Debug,
{
    let Some(value) = value else {
        return Ok(());
    };
    match slot {
        None => {
            *slot = Some(value);
            Ok(())
        }
        Some(old) if *old == value => Ok(()),
        Some(old) => Err(SceneError::ConflictingValue {
            what,
            old: format!("{old:?}"),
            new: format!("{value:?}"),
        }),
    }
}
