//! Hoist requests: code a patcher needs placed at an ancestor's boundary.
//!
//! Patch calls return the requests they could not satisfy. Each ancestor
//! takes the kinds it handles and passes the rest up; whatever reaches the
//! stage runner is an error.

/// One request for code at an enclosing boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Hoist {
    /// Declare `name` at the top of the enclosing function or program.
    Declaration(String),
    /// `this.x = x` statement for an `@x` parameter.
    ThisAssignment(String),
    /// Null-check assignment for a parameter default.
    DefaultParam(String),
}

impl Hoist {
    pub fn describe(&self) -> &'static str {
        match self {
            Hoist::Declaration(_) => "a variable declaration",
            Hoist::ThisAssignment(_) => "a this-assignment",
            Hoist::DefaultParam(_) => "a default parameter assignment",
        }
    }
}

/// Unhandled requests returned from a patch call.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[must_use = "hoist requests must be handled or passed to the caller"]
pub struct Hoists(Vec<Hoist>);

impl Hoists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn one(hoist: Hoist) -> Self {
        Hoists(vec![hoist])
    }

    pub fn push(&mut self, hoist: Hoist) {
        self.0.push(hoist);
    }

    pub fn append(&mut self, other: Hoists) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hoist> {
        self.0.iter()
    }

    /// Remove the declarations, deduplicated in first-seen order.
    pub fn take_declarations(&mut self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        self.0.retain(|hoist| match hoist {
            Hoist::Declaration(name) => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
                false
            }
            _ => true,
        });
        names
    }

    /// Remove the parameter prologue: default checks first, then
    /// this-assignments, each in source order.
    pub fn take_prologue(&mut self) -> Vec<String> {
        let mut defaults = Vec::new();
        let mut this_assignments = Vec::new();
        self.0.retain(|hoist| match hoist {
            Hoist::DefaultParam(code) => {
                defaults.push(code.clone());
                false
            }
            Hoist::ThisAssignment(code) => {
                this_assignments.push(code.clone());
                false
            }
            Hoist::Declaration(_) => true,
        });
        defaults.extend(this_assignments);
        defaults
    }

    pub fn first(&self) -> Option<&Hoist> {
        self.0.first()
    }
}

impl From<Option<Hoist>> for Hoists {
    fn from(hoist: Option<Hoist>) -> Self {
        Hoists(hoist.into_iter().collect())
    }
}
