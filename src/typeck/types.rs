use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::check::is_subtype;
use super::TypeError;

pub const INT: &str = "Int";
pub const FLOAT: &str = "Float";
pub const DOUBLE: &str = "Double";
pub const STRING: &str = "String";
pub const CHAR: &str = "Char";
pub const BOOL: &str = "Bool";
pub const ARRAY: &str = "Array";
pub const LIST: &str = "List";
pub const SET: &str = "Set";
pub const OSET: &str = "OSet";
pub const DICT: &str = "Dict";
/// Element type of a collection whose elements disagree.
pub const ANY: &str = "Any";
pub const UNIT: &str = "Unit";
pub const FUNCTION: &str = "Function";

pub fn is_numeric_name(name: &str) -> bool {
    matches!(name, INT | FLOAT | DOUBLE)
}

pub fn is_collection_name(name: &str) -> bool {
    matches!(name, ARRAY | LIST | SET | OSET | DICT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    /// `Int`, `Float`, `String`, user names without parameters.
    Primitive,
    /// Has at least one unresolved type parameter: `Set<T>`.
    Generic,
    /// A single upper-case letter standing for a type: `T`.
    Parameter,
    /// All parameters concrete: `Set<Int>`.
    Instantiated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintKind {
    Subtype,
    Supertype,
    Equals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeConstraint {
    pub kind: ConstraintKind,
    pub target: TypeAnnotation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeParameter {
    pub name: String,
    pub constraints: Vec<TypeConstraint>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), constraints: Vec::new() }
    }

    pub fn with_constraint(mut self, kind: ConstraintKind, target: TypeAnnotation) -> Self {
        self.constraints.push(TypeConstraint { kind, target });
        self
    }

    pub fn is_satisfied_by(&self, ty: &TypeAnnotation) -> bool {
        self.constraints.iter().all(|c| match c.kind {
            ConstraintKind::Subtype => is_subtype(ty, &c.target),
            ConstraintKind::Supertype => is_subtype(&c.target, ty),
            ConstraintKind::Equals => ty.name == c.target.name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeArg {
    Type(TypeAnnotation),
    Param(TypeParameter),
}

impl TypeArg {
    /// A bare parameter annotation (`T`) becomes an unresolved parameter.
    pub fn from_annotation(ty: TypeAnnotation) -> Self {
        if ty.kind == TypeKind::Parameter {
            TypeArg::Param(TypeParameter::new(ty.name))
        } else {
            TypeArg::Type(ty)
        }
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArg::Type(t) => write!(f, "{t}"),
            TypeArg::Param(p) => write!(f, "{}", p.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAnnotation {
    pub name: String,
    pub parameters: Vec<TypeArg>,
    pub kind: TypeKind,
}

impl TypeAnnotation {
    /// Builds an annotation, deriving its kind from the name and parameters.
    pub fn new(name: impl Into<String>, parameters: Vec<TypeArg>) -> Self {
        let name = name.into();
        let kind = if parameters.iter().any(|p| matches!(p, TypeArg::Param(_))) {
            TypeKind::Generic
        } else if !parameters.is_empty() {
            TypeKind::Instantiated
        } else if is_parameter_name(&name) {
            TypeKind::Parameter
        } else {
            TypeKind::Primitive
        };
        Self { name, parameters, kind }
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn array(element: TypeAnnotation) -> Self {
        Self::new(ARRAY, vec![TypeArg::from_annotation(element)])
    }

    pub fn dict(key: TypeAnnotation, value: TypeAnnotation) -> Self {
        Self::new(DICT, vec![TypeArg::from_annotation(key), TypeArg::from_annotation(value)])
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == TypeKind::Primitive
    }

    pub fn is_generic(&self) -> bool {
        self.kind == TypeKind::Generic
    }

    pub fn is_parameter(&self) -> bool {
        self.kind == TypeKind::Parameter
    }

    pub fn is_instantiated(&self) -> bool {
        self.kind == TypeKind::Instantiated
    }

    /// Generic or instantiated.
    pub fn is_parameterized(&self) -> bool {
        matches!(self.kind, TypeKind::Generic | TypeKind::Instantiated)
    }

    pub fn instantiate(&self, args: Vec<TypeAnnotation>) -> Result<TypeAnnotation, TypeError> {
        if !self.is_generic() {
            return Err(TypeError::new(format!("cannot instantiate non-generic type {self}")));
        }
        if args.len() != self.parameters.len() {
            return Err(TypeError::new(format!(
                "wrong number of type arguments for {}: expected {}, found {}",
                self.name,
                self.parameters.len(),
                args.len()
            )));
        }
        Ok(TypeAnnotation {
            name: self.name.clone(),
            parameters: args.into_iter().map(TypeArg::Type).collect(),
            kind: TypeKind::Instantiated,
        })
    }

    /// Replace parameters named in `map` with concrete types.
    pub fn substitute(&self, map: &HashMap<String, TypeAnnotation>) -> TypeAnnotation {
        if self.is_parameter() {
            return map.get(&self.name).cloned().unwrap_or_else(|| self.clone());
        }
        if self.parameters.is_empty() {
            return self.clone();
        }
        let parameters = self
            .parameters
            .iter()
            .map(|p| match p {
                TypeArg::Type(t) => TypeArg::Type(t.substitute(map)),
                TypeArg::Param(param) => match map.get(&param.name) {
                    Some(t) => TypeArg::Type(t.clone()),
                    None => TypeArg::Param(param.clone()),
                },
            })
            .collect();
        TypeAnnotation::new(self.name.clone(), parameters)
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.parameters.is_empty() {
            write!(f, "<")?;
            for (i, p) in self.parameters.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{p}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

fn is_parameter_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}

/// Built-in generic definitions: `List<T>`, `Array<T>`, `Set<T>`, `OSet<T>`, `Dict<K, V>`.
pub fn generic_definition(name: &str) -> Option<TypeAnnotation> {
    let params: &[&str] = match name {
        LIST | ARRAY | SET | OSET => &["T"],
        DICT => &["K", "V"],
        _ => return None,
    };
    Some(TypeAnnotation::new(
        name,
        params.iter().map(|p| TypeArg::Param(TypeParameter::new(*p))).collect(),
    ))
}
