//! Implementation of the `toncli procs` command.
//!
//! Without test names, lists every `DECLPROC`/`DECLMETHOD` of a compiled
//! script. With names, resolves them against the `__test` procedures the
//! way the test runner does.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use toncli_lib::procs::Script;

use crate::output::{OutputFormat, print_json, print_warning};

#[derive(Serialize)]
struct ProcEntry<'a> {
  method_id: Option<&'a str>,
  name: &'a str,
}

#[derive(Serialize)]
struct TestReport<'a> {
  found: &'a [String],
  missing: &'a [String],
}

pub fn cmd_procs(file: &Path, tests: &[String], format: OutputFormat) -> Result<()> {
  let script = Script::load(file).with_context(|| format!("Failed to read script: {}", file.display()))?;

  if tests.is_empty() {
    let declarations = script.declarations();
    if format.is_json() {
      let entries: Vec<_> = declarations
        .iter()
        .map(|d| ProcEntry {
          method_id: d.method_id.as_deref(),
          name: &d.name,
        })
        .collect();
      return print_json(&entries);
    }
    if declarations.is_empty() {
      print_warning(&format!("no procedures declared in {}", script.path().display()));
    }
    for declaration in &declarations {
      match &declaration.method_id {
        Some(id) => println!("{:>8} {}", id, declaration.name),
        None => println!("{:>8} {}", "", declaration.name),
      }
    }
    return Ok(());
  }

  let lookup = script.lookup_tests(tests);
  if format.is_json() {
    return print_json(&TestReport {
      found: &lookup.found,
      missing: &lookup.missing,
    });
  }

  for name in &lookup.found {
    println!("{}", name);
  }
  Ok(())
}
