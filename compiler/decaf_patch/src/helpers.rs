//! Runtime helpers injected once per program.

use rustc_hash::FxHashMap;

/// `%%`: modulo with the sign of the divisor.
pub const MOD_HELPER: (&str, &str) = (
    "__mod__",
    "function __mod__(a, b) {\n  a = +a;\n  b = +b;\n  return (a % b + b) % b;\n}",
);

/// `in`: array membership.
pub const IN_HELPER: (&str, &str) = (
    "__in__",
    "function __in__(needle, haystack) {\n  return Array.from(haystack).indexOf(needle) >= 0;\n}",
);

/// A helper registered twice with different code.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("helper `{name}` registered with conflicting definitions")]
pub struct HelperConflict {
    pub name: String,
}

/// Append-only helper table, rendered in registration order.
#[derive(Clone, Debug, Default)]
pub struct Helpers {
    order: Vec<String>,
    code: FxHashMap<String, String>,
}

impl Helpers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, returning the name to call it by.
    pub fn register(&mut self, name: &str, code: &str) -> Result<String, HelperConflict> {
        match self.code.get(name) {
            Some(existing) if existing == code => {}
            Some(_) => {
                return Err(HelperConflict {
                    name: name.to_owned(),
                })
            }
            None => {
                self.order.push(name.to_owned());
                self.code.insert(name.to_owned(), code.to_owned());
            }
        }
        Ok(name.to_owned())
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Helper source in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter_map(|name| self.code.get(name).map(String::as_str))
    }
}
