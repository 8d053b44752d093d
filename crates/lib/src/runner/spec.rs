use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// An external command: program, arguments, working directory and extra environment.
///
/// Built with chained setters, the same way as `std::process::Command`:
///
/// ```
/// use bouncer_lib::runner::CommandSpec;
///
/// let cmd = CommandSpec::new("deno")
///   .args(["cache", "main.ts"])
///   .current_dir("dist")
///   .env("DENO_DIR", ".deno_dir");
///
/// assert_eq!(cmd.to_string(), "DENO_DIR=.deno_dir deno cache main.ts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
  /// Working directory; `None` inherits the caller's.
  pub cwd: Option<PathBuf>,
  /// Added on top of the inherited environment.
  pub env: BTreeMap<String, String>,
}

impl CommandSpec {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
      env: BTreeMap::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Append a path argument.
  pub fn path_arg(self, path: &Path) -> Self {
    self.arg(path.to_string_lossy())
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  /// Position of `flag` among the arguments.
  pub fn flag_position(&self, flag: &str) -> Option<usize> {
    self.args.iter().position(|a| a == flag)
  }

  /// The value following `flag`, if both are present.
  pub fn flag_value(&self, flag: &str) -> Option<&str> {
    self
      .flag_position(flag)
      .and_then(|i| self.args.get(i + 1))
      .map(String::as_str)
  }
}

impl fmt::Display for CommandSpec {
  /// Shell-like rendering: env assignments, program, then arguments, quoting any word that
  /// is empty or contains whitespace or quotes.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (key, value) in &self.env {
      write!(f, "{}={} ", key, quote(value))?;
    }
    write!(f, "{}", quote(&self.program))?;
    for arg in &self.args {
      write!(f, " {}", quote(arg))?;
    }
    Ok(())
  }
}

fn quote(word: &str) -> String {
  let needs_quotes = word.is_empty() || word.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'');
  if needs_quotes {
    format!("'{}'", word.replace('\'', r"'\''"))
  } else {
    word.to_string()
  }
}

/// How an external command exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
  /// Exit code; `None` if the process was terminated by a signal.
  pub code: Option<i32>,
}

impl RunStatus {
  pub fn success() -> Self {
    Self { code: Some(0) }
  }

  pub fn exited(code: i32) -> Self {
    Self { code: Some(code) }
  }

  pub fn is_success(&self) -> bool {
    self.code == Some(0)
  }
}
