//! Default configuration values

/// Indentation of a spec declaration line (`    rake (10.0)`)
///
/// The lock format nests with a fixed two spaces per level: sections at 0,
/// section entries at 2, specs at 4 and their dependencies at 6.
pub const SPEC_INDENT: usize = 4;

/// Indentation of a dependency nested under the most recent spec
pub const DEPENDENCY_INDENT: usize = 6;

/// Indentation of entries and list items directly under a section header
pub const ENTRY_INDENT: usize = 2;

/// Name of the generic (platform-independent) platform
pub const GENERIC_PLATFORM: &str = "ruby";

/// Extension appended to the declaration file name to get the lock file name
pub const LOCKFILE_EXTENSION: &str = "lock";

/// Default dependency declaration file
pub const DEFAULT_GEMFILE: &str = "Gemfile";

/// Length of a version-control conflict marker (`<<<<<<<`, `=======`, ...)
pub const CONFLICT_MARKER_LEN: usize = 7;

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
