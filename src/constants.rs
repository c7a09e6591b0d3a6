//! Common constants used throughout glfast.

/// Supported configuration file names, looked up in the working directory
pub const CONFIG_FILES: [&str; 3] = ["glfast.yaml", "glfast.yml", "glfast.json"];

/// Group holding the template projects on the repository host
pub const DEFAULT_TEMPLATE_GROUP: &str = "template";

/// Extensions rendered as templates unless configured otherwise
pub const DEFAULT_TEMPLATE_EXTENSIONS: [&str; 15] = [
    ".go", ".java", ".py", ".vue", // source code
    ".md", // documentation
    ".html", ".css", ".js", ".scss", // web
    ".json", ".xml", ".yml", ".yaml", // data
    ".kt", ".gradle", // android
];

/// Extensions stored as base64 unless configured otherwise
pub const DEFAULT_BASE64_EXTENSIONS: [&str; 4] = [".png", ".jar", ".jpg", ".jks"];

/// File names rendered as templates regardless of extension
pub const DEFAULT_TEMPLATE_FILES: [&str; 2] = ["Dockerfile", "Makefile"];

/// Name of the pseudo-entry some archive producers prepend to a tarball
pub const PAX_GLOBAL_HEADER: &str = "pax_global_header";

/// Port value meaning "this template has no port" (frontend projects)
pub const NO_PORT: i64 = -1;

/// Branch receiving the initial commit
pub const MAIN_BRANCH: &str = "master";

/// Branch created from [`MAIN_BRANCH`] and made the default
pub const DEV_BRANCH: &str = "dev";

/// Message of the initial commit
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";
