pub mod paths;

/// Returns the `os-arch` pair of the running system (e.g. "linux-x86_64").
pub fn host_triple() -> String {
  format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

/// Appends the platform executable suffix to a tool name (`func` -> `func.exe` on Windows).
pub fn executable_name(tool: &str) -> String {
  format!("{}{}", tool, std::env::consts::EXE_SUFFIX)
}
