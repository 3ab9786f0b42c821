//! Command-line arguments for the `runtime-localization` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::resolver::FormatArg;

/// Resolve translations from a workspace's language files.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "runtime-localization", version)]
#[command(about = "Resolve translations from key=value language files")]
pub struct CliArgs {
    /// Workspace holding `.localization.json` and the language directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub workspace: PathBuf,

    /// Language key or display name to switch to after startup
    #[arg(short = 'l', long = "lang", value_name = "KEY|NAME")]
    pub language: Option<String>,

    /// Print every available language as `key<TAB>name`
    #[arg(long)]
    pub list: bool,

    /// Keys to resolve, optionally with arguments: `greet=Ann,3`
    #[arg(value_name = "KEY[=ARG,...]", value_parser = Lookup::parse)]
    pub lookups: Vec<Lookup>,
}

/// One requested lookup: a key plus optional format arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub key: String,
    pub args: Vec<FormatArg>,
}

impl Lookup {
    /// Parses `key` or `key=arg1,arg2`.
    ///
    /// # Errors
    /// The key part is empty.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (key, args) = match raw.split_once('=') {
            Some((key, args)) => (key, args.split(',').map(infer_arg).collect()),
            None => (raw, Vec::new()),
        };
        if key.trim().is_empty() {
            return Err(format!("missing key in '{raw}'"));
        }
        Ok(Self { key: key.to_string(), args })
    }
}

/// Interprets a command-line argument as an integer, float, boolean or text.
#[must_use]
pub fn infer_arg(raw: &str) -> FormatArg {
    if let Ok(n) = raw.parse::<i64>() {
        return FormatArg::Int(n);
    }
    if let Ok(n) = raw.parse::<u64>() {
        return FormatArg::UInt(n);
    }
    if raw.contains('.')
        && let Ok(n) = raw.parse::<f64>()
    {
        return FormatArg::Float(n);
    }
    match raw {
        "true" => FormatArg::Bool(true),
        "false" => FormatArg::Bool(false),
        _ => FormatArg::Str(raw.to_string()),
    }
}
