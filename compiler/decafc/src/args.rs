//! Command-line arguments.

use decaf_diagnostic::emitter::ColorMode;
use decaf_patch::{ModuleFormat, Options, StageName};

pub const USAGE: &str = "\
Usage: decafc [options] [<file>...]

Transpiles each file to JavaScript on stdout. Reads stdin when no file
is given or the file is `-`.

Options:
  --loose-default-params     Keep `a = 1` parameter defaults as written
  --use-js-modules           Rewrite `require`/`module.exports` to `import`/`export`
  --run-to-stage=<stage>     Stop after `normalize` or `main`
  --color=<when>             Color diagnostics: auto, always, never
  --suggestions              Print cleanup suggestions to stderr
  -h, --help                 Show this message";

/// Where a program is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(String),
}

impl Input {
    pub fn name(&self) -> &str {
        match self {
            Input::Stdin => "<stdin>",
            Input::File(path) => path,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliArgs {
    pub options: Options,
    pub color: ColorMode,
    pub suggestions: bool,
    pub help: bool,
    pub inputs: Vec<Input>,
}

impl Default for CliArgs {
    fn default() -> Self {
        CliArgs {
            options: Options::default(),
            color: ColorMode::Auto,
            suggestions: false,
            help: false,
            inputs: Vec::new(),
        }
    }
}

/// Parse everything after the program name.
pub fn parse_args<I, S>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cli = CliArgs::default();
    for arg in args {
        let arg = arg.as_ref();
        match arg {
            "--loose-default-params" => {
                cli.options = cli.options.with_loose_default_params(true);
            }
            "--use-js-modules" => {
                cli.options = cli.options.with_module_format(ModuleFormat::Esm);
            }
            "--suggestions" => cli.suggestions = true,
            "-h" | "--help" => cli.help = true,
            "-" => cli.inputs.push(Input::Stdin),
            _ => {
                if let Some(value) = arg.strip_prefix("--run-to-stage=") {
                    let stage = StageName::parse(value)
                        .ok_or_else(|| format!("unknown stage `{value}`"))?;
                    cli.options = cli.options.with_run_to_stage(stage);
                } else if let Some(value) = arg.strip_prefix("--color=") {
                    cli.color = ColorMode::parse(value)
                        .ok_or_else(|| format!("invalid --color value `{value}`"))?;
                } else if arg.starts_with('-') {
                    return Err(format!("unknown option `{arg}`"));
                } else {
                    cli.inputs.push(Input::File(arg.to_owned()));
                }
            }
        }
    }
    if cli.inputs.is_empty() {
        cli.inputs.push(Input::Stdin);
    }
    Ok(cli)
}
