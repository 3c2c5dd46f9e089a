//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests: a
//! temporary firmware project and a fake `idf.py` that logs its calls.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Log written by the fake toolchain, one invocation per line
pub const TOOL_LOG: &str = "tool.log";

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Project with a version file and a release matrix
    pub fn with_matrix(version: &str, matrix: &str) -> Self {
        let project = Self::new();
        project.create_file("CMakeLists.txt", &cmake_lists(version));
        project.create_file("scripts/burner_release_config.json", matrix);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Invocations recorded by the fake toolchain
    pub fn tool_calls(&self) -> Vec<String> {
        if !self.file_exists(TOOL_LOG) {
            return Vec::new();
        }
        self.read_file(TOOL_LOG).lines().map(str::to_string).collect()
    }

    /// Install the fake toolchain; `fail_verb` makes that verb exit 1
    #[cfg(unix)]
    pub fn install_fake_idf(&self, fail_verb: Option<&str>) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = fake_idf_script(fail_verb.unwrap_or(""));
        let path = self.dir.path().join("fake-idf.sh");
        std::fs::write(&path, script).expect("Failed to write fake toolchain");
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat fake toolchain")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to chmod fake toolchain");
        path
    }

    /// Run burner-release in the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_burner-release"));
        cmd.current_dir(self.path());
        cmd.env_remove("BURNER_TOOLCHAIN");
        cmd.env_remove("BURNER_CONFIG");
        cmd.env_remove("RUST_LOG");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute burner-release")
    }

    /// Run burner-release against the fake toolchain
    pub fn run_with_tool(&self, tool: &std::path::Path, args: &[&str]) -> Output {
        let tool = tool.to_string_lossy().into_owned();
        let mut full = vec!["--toolchain", tool.as_str()];
        full.extend_from_slice(args);
        self.run(&full)
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// CMakeLists.txt declaring a project version
pub fn cmake_lists(version: &str) -> String {
    format!(
        "cmake_minimum_required(VERSION 3.16)\n\
         set(PROJECT_VER \"{version}\")\n\
         include($ENV{{IDF_PATH}}/tools/cmake/project.cmake)\n\
         project(firmware)\n"
    )
}

/// Shell script standing in for `idf.py`
///
/// Every call is echoed to stdout and appended to `tool.log` together
/// with the value of `IDF_TARGET`. `merge-bin` writes
/// `build/merged-binary.bin` containing the last `-DBOARD_NAME=` seen, so
/// tests can tell variants apart.
fn fake_idf_script(fail_verb: &str) -> String {
    format!(
        r#"#!/bin/sh
echo "$* [IDF_TARGET=${{IDF_TARGET:-}}]" >> {log}
echo "fake-idf: $*"
for arg in "$@"; do
  if [ "$arg" = "{fail_verb}" ]; then
    exit 1
  fi
done
case "$*" in
  *-DBOARD_NAME=*)
    for arg in "$@"; do
      case "$arg" in
        -DBOARD_NAME=*) echo "${{arg#-DBOARD_NAME=}}" > .last-build ;;
      esac
    done
    ;;
esac
if [ "$1" = "merge-bin" ]; then
  mkdir -p build
  cat .last-build > build/merged-binary.bin
fi
exit 0
"#,
        log = TOOL_LOG,
    )
}

/// Release matrix with two targets
pub const SAMPLE_MATRIX: &str = r#"{
  "targets": [
    {
      "board_type": "esp32s3",
      "board_config": "CONFIG_BOARD_ESP32S3",
      "target": "esp32s3",
      "binName": "stackchan-s3",
      "builds": [
        { "name": "esp32s3", "sdkconfig_append": ["CONFIG_LCD=y"] },
        { "name": "esp32s3-lite" }
      ]
    },
    {
      "board_type": "esp32c3",
      "board_config": "CONFIG_BOARD_ESP32C3",
      "target": "esp32c3",
      "binName": "stackchan-c3",
      "builds": [
        { "name": "esp32c3" }
      ]
    }
  ]
}"#;
