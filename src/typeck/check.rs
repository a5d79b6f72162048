use crate::value::Value;

use super::types::{
    self, is_collection_name, is_numeric_name, TypeAnnotation, TypeArg, TypeParameter, ANY, ARRAY,
    BOOL, CHAR, DICT, DOUBLE, FLOAT, INT, LIST, OSET, SET, STRING,
};
use super::TypeError;

/// Int < Float < Double, Char < String, and every type is a subtype of itself.
pub fn is_subtype(sub: &TypeAnnotation, sup: &TypeAnnotation) -> bool {
    if sub == sup {
        return true;
    }
    if !sub.parameters.is_empty() || !sup.parameters.is_empty() {
        return false;
    }
    subtype_names(&sub.name, &sup.name)
}

fn subtype_names(sub: &str, sup: &str) -> bool {
    sub == sup
        || matches!(
            (sub, sup),
            (INT, FLOAT) | (INT, DOUBLE) | (FLOAT, DOUBLE) | (CHAR, STRING)
        )
}

pub fn can_implicitly_convert(from: &str, to: &str) -> bool {
    matches!((from, to), (INT, FLOAT) | (INT, DOUBLE) | (CHAR, STRING))
}

/// Whether `value` of type `from` may be cast to `to` with `as`. String sources
/// depend on their contents.
pub fn can_explicitly_convert(from: &str, to: &str, value: &Value) -> bool {
    if from == to || can_implicitly_convert(from, to) {
        return true;
    }
    match (from, to) {
        (FLOAT | DOUBLE, FLOAT | DOUBLE | INT) => true,
        (INT | FLOAT | DOUBLE, BOOL) => true,
        (INT | FLOAT | DOUBLE | BOOL, STRING) => true,
        (STRING, INT) => match value {
            Value::Str(s) => {
                let digits = s.strip_prefix('-').unwrap_or(s);
                !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
            }
            _ => false,
        },
        (STRING, FLOAT | DOUBLE) => matches!(value, Value::Str(s) if s.trim().parse::<f64>().is_ok()),
        (STRING, CHAR) => matches!(value, Value::Str(s) if s.chars().count() == 1),
        (STRING, BOOL) => matches!(value, Value::Str(_)),
        _ => false,
    }
}

/// Change the representation of a scalar once a coercion or cast is allowed.
pub fn convert_value(value: Value, to: &str) -> Result<Value, TypeError> {
    let fail = |value: &Value| {
        TypeError::new(format!("cannot convert {value} from {} to {to}", value.type_name()))
    };
    let converted = match to {
        INT => match &value {
            Value::Int(n) => Value::Int(*n),
            Value::Float(f) | Value::Double(f) => Value::Int(truncate(*f).ok_or_else(|| fail(&value))?),
            Value::Str(s) => match s.trim().parse::<i64>() {
                Ok(n) => Value::Int(n),
                Err(_) => {
                    let f = s.trim().parse::<f64>().map_err(|_| fail(&value))?;
                    Value::Int(truncate(f).ok_or_else(|| fail(&value))?)
                }
            },
            _ => return Err(fail(&value)),
        },
        FLOAT | DOUBLE => {
            let f = match &value {
                Value::Str(s) => s.trim().parse::<f64>().map_err(|_| fail(&value))?,
                other => other.as_f64().ok_or_else(|| fail(&value))?,
            };
            if to == FLOAT { Value::Float(f) } else { Value::Double(f) }
        }
        STRING => match value {
            Value::Str(s) => Value::Str(s),
            other => Value::Str(other.to_string()),
        },
        CHAR => match &value {
            Value::Char(c) => Value::Char(*c),
            Value::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Value::Char(c),
                    _ => {
                        return Err(TypeError::new(format!(
                            "cannot convert string of length {} to Char",
                            s.chars().count()
                        )));
                    }
                }
            }
            _ => return Err(fail(&value)),
        },
        BOOL => match &value {
            Value::Bool(b) => Value::Bool(*b),
            Value::Str(s) => Value::Bool(matches!(s.to_lowercase().as_str(), "true" | "1" | "yes")),
            other => match other.as_f64() {
                Some(f) => Value::Bool(f != 0.0),
                None => return Err(fail(&value)),
            },
        },
        _ => {
            return Err(TypeError::new(format!(
                "unsupported type conversion from {} to {to}",
                value.type_name()
            )));
        }
    };
    Ok(converted)
}

fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

/// The runtime type of a value. Empty collections keep an unresolved element parameter.
pub fn type_of(value: &Value) -> TypeAnnotation {
    match value {
        Value::Array(items) => collection_type(ARRAY, items.iter()),
        Value::Set { items, ordered } => collection_type(if *ordered { OSET } else { SET }, items.iter()),
        Value::Dict(entries) if entries.is_empty() => types::generic_definition(DICT)
            .unwrap_or_else(|| TypeAnnotation::primitive(DICT)),
        Value::Dict(entries) => TypeAnnotation::new(
            DICT,
            vec![
                TypeArg::Type(join(entries.iter().map(|(k, _)| type_of(k)))),
                TypeArg::Type(join(entries.iter().map(|(_, v)| type_of(v)))),
            ],
        ),
        other => TypeAnnotation::primitive(other.type_name()),
    }
}

fn collection_type<'a>(name: &str, mut items: impl Iterator<Item = &'a Value>) -> TypeAnnotation {
    match items.next() {
        None => TypeAnnotation::new(name, vec![TypeArg::Param(TypeParameter::new("T"))]),
        Some(first) => {
            let element = join(std::iter::once(type_of(first)).chain(items.map(type_of)));
            TypeAnnotation::new(name, vec![TypeArg::Type(element)])
        }
    }
}

/// Least common type of a non-empty sequence under subtyping, or `Any`.
fn join(mut types: impl Iterator<Item = TypeAnnotation>) -> TypeAnnotation {
    let Some(mut acc) = types.next() else {
        return TypeAnnotation::primitive(ANY);
    };
    for ty in types {
        acc = if is_subtype(&ty, &acc) || (are_types_compatible(&acc, &ty) && !acc.is_generic()) {
            acc
        } else if is_subtype(&acc, &ty) || are_types_compatible(&ty, &acc) {
            ty
        } else {
            return TypeAnnotation::primitive(ANY);
        };
    }
    acc
}

fn same_base(a: &str, b: &str) -> bool {
    fn canon(n: &str) -> &str {
        if n == LIST { ARRAY } else { n }
    }
    canon(a) == canon(b)
}

/// Whether a value of `value_type` may be stored under `target`.
pub fn are_types_compatible(target: &TypeAnnotation, value_type: &TypeAnnotation) -> bool {
    if target.is_parameter() || target.name == ANY {
        return true;
    }
    if !same_base(&target.name, &value_type.name) {
        return target.is_primitive()
            && value_type.is_primitive()
            && (can_implicitly_convert(&value_type.name, &target.name)
                || subtype_names(&value_type.name, &target.name));
    }
    if !target.is_parameterized() {
        return !value_type.is_parameterized();
    }
    if !value_type.is_parameterized() || target.parameters.len() != value_type.parameters.len() {
        return false;
    }
    target
        .parameters
        .iter()
        .zip(&value_type.parameters)
        .all(|(t, v)| args_compatible(t, v))
}

fn args_compatible(target: &TypeArg, value: &TypeArg) -> bool {
    match (target, value) {
        // Unresolved on the value side: an element of an empty collection.
        (_, TypeArg::Param(_)) => true,
        (TypeArg::Param(p), TypeArg::Type(v)) => p.is_satisfied_by(v),
        (TypeArg::Type(t), TypeArg::Type(v)) => {
            if t.is_parameterized() || t.is_parameter() {
                are_types_compatible(t, v)
            } else {
                t.name == ANY || (v.is_primitive() && subtype_names(&v.name, &t.name))
            }
        }
    }
}

/// Whether `instance` is a valid instantiation of the generic definition `generic`.
pub fn is_valid_instantiation(generic: &TypeAnnotation, instance: &TypeAnnotation) -> bool {
    if !generic.is_generic() || !instance.is_instantiated() {
        return false;
    }
    if generic.name != instance.name || generic.parameters.len() != instance.parameters.len() {
        return false;
    }
    generic.parameters.iter().zip(&instance.parameters).all(|pair| match pair {
        (TypeArg::Param(p), TypeArg::Type(arg)) => p.is_satisfied_by(arg),
        (TypeArg::Type(g), TypeArg::Type(arg)) if g.is_generic() => is_valid_instantiation(g, arg),
        (TypeArg::Type(g), TypeArg::Type(arg)) => are_types_compatible(g, arg),
        (_, TypeArg::Param(_)) => false,
    })
}

/// Check `value` (of runtime type `value_type`) against a declared type and
/// return it in the declared type's representation.
pub fn validate_assignment(
    target: &TypeAnnotation,
    value: Value,
    value_type: &TypeAnnotation,
) -> Result<Value, TypeError> {
    if target.is_parameter() {
        return Ok(value);
    }
    if target.is_parameterized() {
        if value.is_empty_collection() && is_collection_name(&target.name) {
            return Ok(empty_of(target));
        }
        if !value_type.is_parameterized() {
            return Err(TypeError::new(format!(
                "cannot assign non-generic type {value_type} to generic type {target}"
            )));
        }
        if !are_types_compatible(target, value_type) {
            return Err(mismatch(target, value_type));
        }
        return conform(value, target);
    }
    if target.is_primitive() && value_type.is_primitive() {
        if target.name == value_type.name || target.name == ANY {
            return Ok(value);
        }
        if can_implicitly_convert(&value_type.name, &target.name)
            || subtype_names(&value_type.name, &target.name)
            || (target.name == BOOL && is_numeric_name(&value_type.name))
        {
            return convert_value(value, &target.name);
        }
        return Err(mismatch(target, value_type));
    }
    Err(TypeError::new(format!(
        "invalid type annotations: cannot assign value of type {value_type} to variable of type {target}"
    )))
}

fn mismatch(target: &TypeAnnotation, value_type: &TypeAnnotation) -> TypeError {
    TypeError::new(format!(
        "cannot assign value of type {value_type} to variable of type {target}"
    ))
}

/// Perform an explicit `as` cast.
pub fn validate_type_cast(
    value: Value,
    from: &TypeAnnotation,
    to: &TypeAnnotation,
) -> Result<Value, TypeError> {
    if from.is_parameterized() || to.is_parameterized() {
        if value.is_empty_collection() && is_collection_name(&to.name) {
            return Ok(empty_of(to));
        }
        if same_base(&from.name, &to.name) && are_types_compatible(to, from) {
            return conform(value, to);
        }
        if is_valid_instantiation(from, to) {
            return Ok(value);
        }
        return recollect(value, from, to);
    }
    if from.is_primitive() && (to.is_primitive() || to.is_parameter()) {
        if to.is_parameter() {
            return Ok(value);
        }
        if !can_explicitly_convert(&from.name, &to.name, &value) {
            return Err(TypeError::new(format!("cannot cast value {value} from {from} to {to}")));
        }
        return convert_value(value, &to.name);
    }
    Err(TypeError::new(format!("unsupported type cast from {from} to {to}")))
}

/// Array/Set/OSet conversions between collection kinds.
fn recollect(value: Value, from: &TypeAnnotation, to: &TypeAnnotation) -> Result<Value, TypeError> {
    let items = match value {
        Value::Array(items) | Value::Set { items, .. } => items,
        other => {
            return Err(TypeError::new(format!(
                "cannot cast value {other} from {from} to {to}"
            )));
        }
    };
    let as_array = TypeAnnotation::new(ARRAY, to.parameters.clone());
    if to.parameters.len() != 1 || !are_types_compatible(&as_array, &collection_type(ARRAY, items.iter())) {
        return Err(TypeError::new(format!("cannot cast from {from} to {to}")));
    }
    let element = element_type(to, 0);
    let mut converted = Vec::with_capacity(items.len());
    for item in items {
        converted.push(conform_element(item, element)?);
    }
    match to.name.as_str() {
        ARRAY | LIST => Ok(Value::Array(converted)),
        SET | OSET => {
            let mut unique: Vec<Value> = Vec::new();
            for item in converted {
                if !unique.contains(&item) {
                    unique.push(item);
                }
            }
            Ok(Value::Set { items: unique, ordered: to.name == OSET })
        }
        _ => Err(TypeError::new(format!("cannot cast from {from} to {to}"))),
    }
}

fn empty_of(target: &TypeAnnotation) -> Value {
    match target.name.as_str() {
        SET => Value::Set { items: Vec::new(), ordered: false },
        OSET => Value::Set { items: Vec::new(), ordered: true },
        DICT => Value::Dict(Vec::new()),
        _ => Value::Array(Vec::new()),
    }
}

fn element_type(target: &TypeAnnotation, index: usize) -> Option<&TypeAnnotation> {
    match target.parameters.get(index) {
        Some(TypeArg::Type(t)) => Some(t),
        _ => None,
    }
}

fn conform_element(value: Value, element: Option<&TypeAnnotation>) -> Result<Value, TypeError> {
    match element {
        Some(t) => conform(value, t),
        None => Ok(value),
    }
}

/// Convert an already-compatible value into the exact representation of `target`,
/// widening collection elements where needed.
fn conform(value: Value, target: &TypeAnnotation) -> Result<Value, TypeError> {
    if target.is_parameter() || target.name == ANY {
        return Ok(value);
    }
    if !target.is_parameterized() {
        if value.type_name() == target.name {
            return Ok(value);
        }
        return convert_value(value, &target.name);
    }
    if value.is_empty_collection() && is_collection_name(&target.name) {
        return Ok(empty_of(target));
    }
    match value {
        Value::Array(items) => Ok(Value::Array(
            items
                .into_iter()
                .map(|v| conform_element(v, element_type(target, 0)))
                .collect::<Result<_, _>>()?,
        )),
        Value::Set { items, ordered } => Ok(Value::Set {
            items: items
                .into_iter()
                .map(|v| conform_element(v, element_type(target, 0)))
                .collect::<Result<_, _>>()?,
            ordered,
        }),
        Value::Dict(entries) => {
            let mut converted = Vec::with_capacity(entries.len());
            for (k, v) in entries {
                converted.push((
                    conform_element(k, element_type(target, 0))?,
                    conform_element(v, element_type(target, 1))?,
                ));
            }
            Ok(Value::Dict(converted))
        }
        other => Ok(other),
    }
}
