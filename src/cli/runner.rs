//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::TransferProfile;
use crate::error::{Error, Result};
use crate::task::TransferTask;
use crate::vars::VariableStore;
use crate::warehouse::WarehouseEngine;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run { output } => self.transfer(output.as_deref()).await,
            Commands::Check => self.check(),
            Commands::Validate => self.validate(),
        }
    }

    /// Load the transfer profile
    fn load_profile(&self) -> Result<TransferProfile> {
        let path = self
            .cli
            .profile
            .as_ref()
            .ok_or_else(|| Error::config("Profile file not specified (use -p flag)"))?;
        TransferProfile::from_file(path)
    }

    /// Load variables
    fn load_variables(&self) -> Result<VariableStore> {
        // Inline variables take precedence
        if let Some(json) = &self.cli.variables_json {
            VariableStore::from_json(json)
        } else if let Some(path) = &self.cli.variables {
            VariableStore::from_file(path)
        } else {
            Ok(VariableStore::new())
        }
    }

    /// Execute the transfer once
    async fn transfer(&self, output: Option<&str>) -> Result<()> {
        let profile = self.load_profile()?;
        let vars = self.load_variables()?;

        let task = TransferTask::new(profile, vars);
        let report = task.run(output).await?;

        println!(
            "Transferred {} rows ({} bytes) to {} in {:?}",
            report.rows, report.bytes, report.object_path, report.elapsed
        );
        Ok(())
    }

    /// Test the warehouse connection
    fn check(&self) -> Result<()> {
        let profile = self.load_profile()?;
        let engine = WarehouseEngine::new(&profile.warehouse)?;
        engine.check_connection()?;
        println!("Connection OK: {}", engine.connection_info());
        Ok(())
    }

    /// Validate the transfer profile
    fn validate(&self) -> Result<()> {
        let profile = self.load_profile()?;
        let query = profile.source.build_query()?;
        println!("Profile '{}' is valid", profile.name);
        println!("  query:    {query}");
        println!("  artifact: {}", profile.artifact.path);
        println!(
            "  object:   {}://<{}>/<{}>{}",
            profile.destination.scheme,
            profile.destination.bucket_var,
            profile.destination.prefix_var,
            profile.destination.filename
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn write_profile(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("profile.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "name: test\nwarehouse:\n  engine: duckdb\nsource:\n  query: \"SELECT 1 AS one\""
        )
        .unwrap();
        path
    }

    #[test]
    fn test_missing_profile_flag() {
        let cli = Cli::parse_from(["warehouse-transfer", "validate"]);
        let runner = Runner::new(cli);
        let err = runner.validate().unwrap_err();
        assert!(err.to_string().contains("Profile file not specified"));
    }

    #[test]
    fn test_validate_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_profile(&dir);
        let cli = Cli::parse_from([
            "warehouse-transfer",
            "-p",
            path.to_str().unwrap(),
            "validate",
        ]);
        let runner = Runner::new(cli);
        assert!(runner.validate().is_ok());
    }

    #[test]
    fn test_check_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_profile(&dir);
        let cli = Cli::parse_from([
            "warehouse-transfer",
            "-p",
            path.to_str().unwrap(),
            "check",
        ]);
        let runner = Runner::new(cli);
        assert!(runner.check().is_ok());
    }

    #[tokio::test]
    async fn test_run_with_output_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_profile(&dir);
        let out_dir = dir.path().join("out");
        let artifact = dir.path().join("artifact.csv");

        // Point the artifact somewhere writable for the test
        let profile_yaml = format!(
            "name: test\nwarehouse:\n  engine: duckdb\nsource:\n  query: \"SELECT 1 AS one\"\nartifact:\n  path: {}",
            artifact.display()
        );
        std::fs::write(&path, profile_yaml).unwrap();

        let cli = Cli::parse_from([
            "warehouse-transfer",
            "-p",
            path.to_str().unwrap(),
            "run",
            "-o",
            out_dir.to_str().unwrap(),
        ]);
        let runner = Runner::new(cli);
        runner.run().await.unwrap();

        assert_eq!(
            std::fs::read_to_string(out_dir.join("file.csv")).unwrap(),
            "1\n"
        );
    }
}
