// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Citrus Console";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "citrus_console";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".citrus-console";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "citrus-console.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "CITRUS_CONSOLE_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "CITRUS_CONSOLE_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "CITRUS_CONSOLE_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "CITRUS_CONSOLE_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "CITRUS_CONSOLE_LOG";

// =============================================================================
// Environment Variables - Filters
// =============================================================================

/// Environment variable for the maximum header filter expression length
pub const ENV_MAX_EXPRESSION_LENGTH: &str = "CITRUS_CONSOLE_MAX_EXPRESSION_LENGTH";

/// Environment variable for the maximum number of clauses per expression
pub const ENV_MAX_CLAUSES: &str = "CITRUS_CONSOLE_MAX_CLAUSES";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8089;

// =============================================================================
// Filter Defaults
// =============================================================================

/// Default maximum header filter expression length in bytes
pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 4096;

/// Default maximum number of clauses accepted by the encode endpoint
pub const DEFAULT_MAX_CLAUSES: usize = 50;

// =============================================================================
// HTTP Limits
// =============================================================================

/// Default body limit for API requests (256 KB)
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;
