//! Well-known names shared by the pipeline stages.

/// Candidate config files, in merge order. Later files override earlier ones.
pub const CONFIG_FILES: [&str; 2] = ["config.json", "config.local.json"];

/// Capability tokens acknowledged on every deploy.
pub const CAPABILITIES: [&str; 2] = ["CAPABILITY_IAM", "CAPABILITY_AUTO_EXPAND"];

/// Template parameter that carries the redirect target into the deployed function.
pub const REDIRECT_PARAMETER: &str = "RedirectUri";

/// Staging directory for the packaged function.
pub const DIST_DIR: &str = "dist";

/// Handler entry point, relative to the project root.
pub const ENTRY_POINT: &str = "main.ts";

/// Dependency cache directory, relative to the staging directory.
pub const CACHE_DIR: &str = ".deno_dir";

/// Directory inside the cache where the function runtime looks up compiled sources.
pub const TASK_ROOT_DIR: &str = "LAMBDA_TASK_ROOT";
