//! Default configuration values

/// Release matrix configuration, relative to the project directory
pub const DEFAULT_CONFIG_PATH: &str = "scripts/burner_release_config.json";

/// File holding the project version declaration
pub const DEFAULT_VERSION_FILE: &str = "CMakeLists.txt";

/// Line prefix of the project version declaration
pub const VERSION_MARKER: &str = "set(PROJECT_VER";

/// Directory receiving published firmware images
pub const DEFAULT_RELEASES_DIR: &str = "releases";

/// Merged image left behind by `merge-bin`
pub const DEFAULT_MERGED_BINARY: &str = "build/merged-binary.bin";

/// Toolchain's mutable configuration file
pub const DEFAULT_SDKCONFIG: &str = "sdkconfig";

/// Toolchain front-end command
pub const DEFAULT_TOOLCHAIN: &str = "idf.py";

/// Environment variable that pins the toolchain target
pub const DEFAULT_TARGET_ENV: &str = "IDF_TARGET";

/// Build-time define carrying the build variant name
pub const DEFAULT_BOARD_DEFINE: &str = "BOARD_NAME";

/// Optional settings file looked up in the project directory
pub const SETTINGS_FILE: &str = "burner.toml";

/// Selection keyword matching every target
pub const SELECT_ALL: &str = "all";

/// Flash offset encoded in release file names
pub const FLASH_OFFSET_SUFFIX: &str = "0x0";

/// Width of the separator printed after each build variant
pub const SEPARATOR_WIDTH: usize = 80;

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
