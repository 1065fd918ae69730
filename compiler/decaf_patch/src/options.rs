//! Pipeline options.

use std::fmt;

/// How top-level `require` and `module.exports` are emitted.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ModuleFormat {
    /// Leave them as written.
    #[default]
    CommonJs,
    /// Rewrite them to `import` and `export default`.
    Esm,
}

/// A pipeline stage, for stopping early and for error reports.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StageName {
    Normalize,
    Main,
}

impl StageName {
    pub fn as_str(self) -> &'static str {
        match self {
            StageName::Normalize => "normalize",
            StageName::Main => "main",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normalize" => Some(StageName::Normalize),
            "main" => Some(StageName::Main),
            _ => None,
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// Keep `x = d` parameter defaults as JavaScript defaults instead of
    /// synthesizing `if (x == null)` checks.
    pub loose_default_params: bool,
    pub module_format: ModuleFormat,
    /// Stop after this stage. `None` runs the whole pipeline.
    pub run_to_stage: Option<StageName>,
}

impl Options {
    #[must_use]
    pub fn with_loose_default_params(mut self, loose: bool) -> Self {
        self.loose_default_params = loose;
        self
    }

    #[must_use]
    pub fn with_module_format(mut self, format: ModuleFormat) -> Self {
        self.module_format = format;
        self
    }

    #[must_use]
    pub fn with_run_to_stage(mut self, stage: StageName) -> Self {
        self.run_to_stage = Some(stage);
        self
    }
}

#[cfg(test)]
mod tests;
