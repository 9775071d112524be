/// Application name, used for per-user directories.
pub const APP_NAME: &str = "toncli";

/// Name of the project configuration file at a project root.
pub const PROJECT_FILE: &str = "project.yaml";

/// Directory (relative to a project root) that holds build artifacts.
pub const BUILD_DIR: &str = "build";

/// Directory (relative to the build directory) that holds BOC files.
pub const BOC_DIR: &str = "boc";

/// Extension of compiled Fift scripts.
pub const SCRIPT_EXT: &str = "fif";

/// Extension of serialized bag-of-cells files.
pub const BOC_EXT: &str = "boc";

/// File name of the generated glue script inside the build directory.
pub const GLUE_FILE: &str = "cli.fif";

/// Directory (relative to the config directory) with the Fift standard library.
pub const FIFT_LIBS_DIR: &str = "fift-libs";

/// Directive a Fift script must contain to produce a BOC for submission.
pub const SAVEBOC_DIRECTIVE: &str = "saveboc";

/// Default number of `lite-client` attempts per submission.
pub const DEFAULT_LITE_CLIENT_TRIES: u32 = 2;
