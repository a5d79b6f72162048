use std::collections::HashMap;
use std::io::Write;

use crate::diagnostics::NoirError;
use crate::value::Value;

pub type IntrinsicFn = fn(&mut dyn Write, &[Value]) -> Result<Value, NoirError>;

/// Host functions callable from Noir code, bound by name in the global frame.
pub struct Intrinsics {
    table: HashMap<&'static str, IntrinsicFn>,
}

impl Intrinsics {
    pub fn standard() -> Self {
        let mut table: HashMap<&'static str, IntrinsicFn> = HashMap::new();
        table.insert("print", print);
        Self { table }
    }

    pub fn get(&self, name: &str) -> Option<IntrinsicFn> {
        self.table.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}

fn print(out: &mut dyn Write, args: &[Value]) -> Result<Value, NoirError> {
    let line = args.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
    writeln!(out, "{line}").map_err(|e| NoirError::runtime(format!("print failed: {e}"), None))?;
    Ok(Value::Unit)
}
