/// Constants used throughout the evalrig codebase
// Environment variable names
pub const EVALRIG_LOG_VAR: &str = "EVALRIG_LOG";
pub const EVALRIG_WORKERS_VAR: &str = "EVALRIG_WORKERS";

// Model names can contain '/' (hub ids like `org/model`); path components
// cannot, so slashes are encoded with this marker in result paths.
pub const MODEL_NAME_SLASH_ENCODING: &str = "--";

// Thread names
pub const TERMINATION_WATCHER_THREAD: &str = "evalrig-termination-watcher";
