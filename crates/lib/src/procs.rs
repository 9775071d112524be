//! Procedure and test lookup over compiled Fift scripts.
//!
//! `func` emits one `DECLPROC <name>` (or `<id> DECLMETHOD <name>` for get
//! methods) line per function. Tests are functions whose names carry the
//! `__test` prefix; callers can request them by bare name (`balance` finds
//! `__test_balance`) and with `*` wildcards (`get_*`).

use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{error, warn};

/// Prefix that marks a procedure as a test.
pub const TEST_PREFIX: &str = "__test";

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?mR)(\d*)\s?(?:DECLMETHOD|DECLPROC)\s(\S+)$").expect("declaration pattern is valid")
});

/// A `DECLPROC` / `DECLMETHOD` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
  /// Numeric method id preceding `DECLMETHOD`, when present.
  pub method_id: Option<String>,
  pub name: String,
}

/// Outcome of resolving requested test names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookup {
  /// Matched declaration names, per request and then in text order.
  pub found: Vec<String>,
  /// Requests that matched nothing.
  pub missing: Vec<String>,
}

/// All declarations in `text`, in order of appearance. Duplicates are kept.
pub fn list_declarations(text: &str) -> Vec<Declaration> {
  DECLARATION_RE
    .captures_iter(text)
    .map(|caps| Declaration {
      method_id: caps
        .get(1)
        .map(|m| m.as_str())
        .filter(|id| !id.is_empty())
        .map(str::to_string),
      name: caps[2].to_string(),
    })
    .collect()
}

/// Translate a requested test name into a pattern for the declared name.
///
/// Literal segments are escaped and each `*` becomes `\S+`. Names that don't
/// already start with `__test` only match test declarations, where `-` and `_`
/// may follow the prefix.
pub fn test_pattern(requested: &str) -> String {
  let pattern = requested
    .split('*')
    .map(regex::escape)
    .collect::<Vec<_>>()
    .join(r"\S+");

  if requested.starts_with(TEST_PREFIX) {
    pattern
  } else {
    format!("{}[-_]*{}", TEST_PREFIX, pattern)
  }
}

/// Resolve `names` against the declarations in `text`.
///
/// A name without `*` yields its first match; a name with `*` yields every
/// match. Names that match nothing are logged and collected in
/// [`Lookup::missing`]; the remaining names are still processed.
pub fn lookup<S: AsRef<str>>(text: &str, names: &[S]) -> Lookup {
  let mut result = Lookup::default();

  for name in names {
    let name = name.as_ref();
    let source = format!(r"(?mR)(?:DECLMETHOD|DECLPROC)\s({})$", test_pattern(name));
    let re = match Regex::new(&source) {
      Ok(re) => re,
      Err(e) => {
        error!(name, error = %e, "can't build test pattern");
        result.missing.push(name.to_string());
        continue;
      }
    };

    let before = result.found.len();
    if name.contains('*') {
      result
        .found
        .extend(re.captures_iter(text).map(|caps| caps[1].to_string()));
    } else if let Some(caps) = re.captures(text) {
      result.found.push(caps[1].to_string());
    }

    if result.found.len() == before {
      warn!(name, "no tests matching {} found", name);
      result.missing.push(name.to_string());
    }
  }

  result
}

/// A compiled Fift script loaded for inspection.
#[derive(Debug, Clone)]
pub struct Script {
  path: PathBuf,
  code: String,
}

impl Script {
  pub fn load(path: &Path) -> io::Result<Self> {
    let code = std::fs::read_to_string(path)?;
    Ok(Self {
      path: path.to_path_buf(),
      code,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn declarations(&self) -> Vec<Declaration> {
    list_declarations(&self.code)
  }

  pub fn lookup_tests<S: AsRef<str>>(&self, names: &[S]) -> Lookup {
    lookup(&self.code, names)
  }
}
