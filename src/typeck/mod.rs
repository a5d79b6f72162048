//! The type model and the runtime type rules: subtyping, implicit coercion,
//! explicit casts and generic compatibility.

pub mod check;
pub mod types;

use thiserror::Error;

pub use check::{
    are_types_compatible, can_explicitly_convert, can_implicitly_convert, convert_value, is_subtype,
    is_valid_instantiation, type_of, validate_assignment, validate_type_cast,
};
pub use types::{ConstraintKind, TypeAnnotation, TypeArg, TypeConstraint, TypeKind, TypeParameter};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{msg}")]
pub struct TypeError {
    pub msg: String,
}

impl TypeError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
