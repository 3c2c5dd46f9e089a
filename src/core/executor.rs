//! Build execution
//!
//! Runs the toolchain steps for one build variant: select the chip target,
//! apply the sdkconfig overlay, build with the variant's board define and
//! merge the image.

use std::path::{Path, PathBuf};

use super::matrix::{BuildVariant, TargetDefinition};
use super::settings::OverlayMode;
use crate::infra::console::{print_detail, print_info};
use crate::error::{ReleaseError, ToolPhase};
use crate::infra::filesystem;
use crate::infra::process::ProcessRunner;
use crate::infra::toolchain::{run_step, IdfToolchain};

/// Executes toolchain steps for build variants
pub struct BuildExecutor<'a, R: ProcessRunner + ?Sized> {
    runner: &'a mut R,
    toolchain: &'a IdfToolchain,
    sdkconfig: PathBuf,
    overlay: OverlayMode,
}

impl<'a, R: ProcessRunner + ?Sized> BuildExecutor<'a, R> {
    /// Create an executor writing overlays to `sdkconfig`
    pub fn new(
        runner: &'a mut R,
        toolchain: &'a IdfToolchain,
        sdkconfig: &Path,
        overlay: OverlayMode,
    ) -> Self {
        Self {
            runner,
            toolchain,
            sdkconfig: sdkconfig.to_path_buf(),
            overlay,
        }
    }

    /// Build one variant of a target
    ///
    /// Steps run strictly in order and the first failure aborts: reset the
    /// overlay (if configured), `set-target`, append the overlay, `build`,
    /// `merge-bin`.
    pub fn execute(
        &mut self,
        target: &TargetDefinition,
        build: &BuildVariant,
    ) -> Result<(), ReleaseError> {
        let overlay = target.sdkconfig_lines(build);

        print_info(&format!("name: {}", build.name));
        print_detail(&format!("target: {}", target.target));
        for line in &overlay {
            print_detail(&format!("sdkconfig_append: {line}"));
        }

        if self.overlay == OverlayMode::Reset
            && filesystem::remove_file_if_exists(&self.sdkconfig)?
        {
            tracing::debug!("Removed {} before set-target", self.sdkconfig.display());
        }

        run_step(
            &mut *self.runner,
            ToolPhase::SetTarget,
            &self.toolchain.set_target(&target.target),
        )?;

        filesystem::append_lines(&self.sdkconfig, &overlay)?;
        tracing::debug!(
            "Appended {} lines to {}",
            overlay.len(),
            self.sdkconfig.display()
        );

        run_step(
            &mut *self.runner,
            ToolPhase::Build,
            &self.toolchain.build(&build.name),
        )?;

        run_step(&mut *self.runner, ToolPhase::MergeBin, &self.toolchain.merge_bin())?;

        tracing::info!("Built {} for {}", build.name, target.target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolchainError;
    use crate::test_utils::{sample_target, RecordingRunner};
    use tempfile::TempDir;

    fn setup(dir: &TempDir) -> IdfToolchain {
        IdfToolchain::new("idf.py", "IDF_TARGET", "BOARD_NAME", dir.path())
    }

    #[test]
    fn test_steps_run_in_order() {
        let dir = TempDir::new().unwrap();
        let toolchain = setup(&dir);
        let sdkconfig = dir.path().join("sdkconfig");
        let mut runner = RecordingRunner::new();
        let target = sample_target("esp32s3", &["esp32s3_basic"]);

        BuildExecutor::new(&mut runner, &toolchain, &sdkconfig, OverlayMode::Reset)
            .execute(&target, &target.builds[0])
            .unwrap();

        assert_eq!(
            runner.command_lines(),
            vec![
                "idf.py set-target esp32s3",
                "idf.py -DBOARD_NAME=esp32s3_basic build",
                "idf.py merge-bin",
            ]
        );
        assert_eq!(runner.calls[0].env_remove, vec!["IDF_TARGET"]);
        assert_eq!(
            std::fs::read_to_string(&sdkconfig).unwrap(),
            "\nCONFIG_BOARD_ESP32S3=y\n"
        );
    }

    #[test]
    fn test_overlay_lines_follow_board_flag() {
        let dir = TempDir::new().unwrap();
        let toolchain = setup(&dir);
        let sdkconfig = dir.path().join("sdkconfig");
        let mut runner = RecordingRunner::new();
        let mut target = sample_target("esp32s3", &["esp32s3_lcd"]);
        target.builds[0].sdkconfig_append =
            vec!["CONFIG_LCD=y".to_string(), "CONFIG_LCD_SIZE=240".to_string()];

        BuildExecutor::new(&mut runner, &toolchain, &sdkconfig, OverlayMode::Reset)
            .execute(&target, &target.builds[0])
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&sdkconfig).unwrap(),
            "\nCONFIG_BOARD_ESP32S3=y\nCONFIG_LCD=y\nCONFIG_LCD_SIZE=240\n"
        );
    }

    #[test]
    fn test_reset_mode_drops_previous_overlay() {
        let dir = TempDir::new().unwrap();
        let toolchain = setup(&dir);
        let sdkconfig = dir.path().join("sdkconfig");
        std::fs::write(&sdkconfig, "CONFIG_FROM_EARLIER=y\n").unwrap();
        let mut runner = RecordingRunner::new();
        let target = sample_target("esp32s3", &["esp32s3_basic"]);

        BuildExecutor::new(&mut runner, &toolchain, &sdkconfig, OverlayMode::Reset)
            .execute(&target, &target.builds[0])
            .unwrap();

        let content = std::fs::read_to_string(&sdkconfig).unwrap();
        assert!(!content.contains("CONFIG_FROM_EARLIER"));
    }

    #[test]
    fn test_accumulate_mode_keeps_previous_overlay() {
        let dir = TempDir::new().unwrap();
        let toolchain = setup(&dir);
        let sdkconfig = dir.path().join("sdkconfig");
        let mut runner = RecordingRunner::new();
        let target = sample_target("esp32s3", &["esp32s3_a", "esp32s3_b"]);

        let mut executor =
            BuildExecutor::new(&mut runner, &toolchain, &sdkconfig, OverlayMode::Accumulate);
        executor.execute(&target, &target.builds[0]).unwrap();
        executor.execute(&target, &target.builds[1]).unwrap();

        let content = std::fs::read_to_string(&sdkconfig).unwrap();
        assert_eq!(content.matches("CONFIG_BOARD_ESP32S3=y").count(), 2);
    }

    #[test]
    fn test_set_target_failure_stops_before_overlay() {
        let dir = TempDir::new().unwrap();
        let toolchain = setup(&dir);
        let sdkconfig = dir.path().join("sdkconfig");
        let mut runner = RecordingRunner::new().fail_on("set-target");
        let target = sample_target("esp32s3", &["esp32s3_basic"]);

        let err = BuildExecutor::new(&mut runner, &toolchain, &sdkconfig, OverlayMode::Reset)
            .execute(&target, &target.builds[0])
            .unwrap_err();

        assert!(matches!(
            err,
            ReleaseError::Toolchain(ToolchainError::Failed {
                phase: ToolPhase::SetTarget,
                ..
            })
        ));
        assert_eq!(runner.calls.len(), 1);
        assert!(!sdkconfig.exists());
    }

    #[test]
    fn test_build_failure_skips_merge() {
        let dir = TempDir::new().unwrap();
        let toolchain = setup(&dir);
        let sdkconfig = dir.path().join("sdkconfig");
        let mut runner = RecordingRunner::new().fail_on("build");
        let target = sample_target("esp32s3", &["esp32s3_basic"]);

        let err = BuildExecutor::new(&mut runner, &toolchain, &sdkconfig, OverlayMode::Reset)
            .execute(&target, &target.builds[0])
            .unwrap_err();

        assert!(err.to_string().contains("build failed"));
        assert_eq!(runner.calls.len(), 2);
    }
}
