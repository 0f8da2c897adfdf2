//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SourceConfig;
use crate::connector::{Connector, StripeConnector};
use crate::error::{Error, Result};
use crate::normalize::RowBatch;
use serde_json::{json, Value};
use tracing::{error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    connector: StripeConnector,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self::with_connector(cli, StripeConnector::new())
    }

    /// Create a runner around a specific connector
    pub fn with_connector(cli: Cli, connector: StripeConnector) -> Self {
        Self { cli, connector }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Read { resources } => self.read(resources.as_deref()).await,
            Commands::Spec => self.spec(),
            Commands::Resources => self.resources(),
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<SourceConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return SourceConfig::from_json(json_str);
        }

        if let Some(path) = &self.cli.config {
            return SourceConfig::from_file(path);
        }

        Err(Error::config(
            "No configuration given (use --config or --config-json)",
        ))
    }

    /// Check connection. Always reports a status, even for a bad config.
    async fn check(&self) -> Result<()> {
        let status = self.connection_status().await;
        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "status": status
        }));

        Ok(())
    }

    async fn connection_status(&self) -> &'static str {
        let connected = match self.load_config() {
            Ok(config) => self.connector.check(&config).await,
            Err(e) => {
                error!("Connection check failed: {e}");
                false
            }
        };

        if connected {
            "SUCCEEDED"
        } else {
            "FAILED"
        }
    }

    /// Read batches and write them to stdout
    async fn read(&self, resources: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let only = resources
            .map(parse_resource_list)
            .filter(|names| !names.is_empty());

        let mut reader = self.connector.read(&config, only.as_deref()).await?;
        while let Some(batch) = reader.next_batch().await {
            self.output_batch(&batch?)?;
        }

        info!("Summary: {}", reader.stats());
        Ok(())
    }

    /// Show connector spec
    fn spec(&self) -> Result<()> {
        let spec = self.connector.spec();
        self.output_message(&json!({
            "type": "SPEC",
            "spec": serde_json::to_value(&spec)?
        }));
        Ok(())
    }

    /// List resources
    fn resources(&self) -> Result<()> {
        self.output_message(&json!({
            "type": "RESOURCES",
            "resources": self.connector.resources()
        }));
        Ok(())
    }

    /// Write one batch
    fn output_batch(&self, batch: &RowBatch) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(batch)?);
            }
            OutputFormat::Pretty => {
                let columns: Vec<String> = batch
                    .column_types
                    .iter()
                    .map(|c| format!("{}:{}", c.name, c.evidence_type))
                    .collect();
                println!(
                    "{} ({} rows) [{}]",
                    batch.name,
                    batch.expected_row_count,
                    columns.join(", ")
                );
            }
        }
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Split a comma-separated resource list, dropping blanks
fn parse_resource_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_resource_list() {
        assert_eq!(
            parse_resource_list("customers, charges,,invoices "),
            vec!["customers", "charges", "invoices"]
        );
        assert!(parse_resource_list("").is_empty());
    }

    #[test]
    fn test_cli_parses_read() {
        let cli = Cli::parse_from([
            "stripe-source",
            "--config-json",
            r#"{"api_key":"sk_test_1"}"#,
            "read",
            "--resources",
            "customers",
        ]);

        assert!(matches!(cli.command, Commands::Read { resources: Some(ref r) } if r == "customers"));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_config_prefers_inline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_key": "sk_test_file"}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "stripe-source",
            "-C",
            path.as_str(),
            "--config-json",
            r#"{"api_key":"sk_test_inline"}"#,
            "check",
        ]);
        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.api_key, "sk_test_inline");

        let cli = Cli::parse_from(["stripe-source", "-C", path.as_str(), "check"]);
        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.api_key, "sk_test_file");
    }

    #[test]
    fn test_load_config_missing() {
        let cli = Cli::parse_from(["stripe-source", "check"]);
        let err = Runner::new(cli).load_config().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_check_with_empty_key_reports_failed() {
        let cli = Cli::parse_from([
            "stripe-source",
            "--config-json",
            r#"{"api_key":""}"#,
            "check",
        ]);
        let runner = Runner::new(cli);

        assert_eq!(runner.connection_status().await, "FAILED");
        assert!(runner.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_check_without_config_reports_failed() {
        let cli = Cli::parse_from(["stripe-source", "check"]);
        let runner = Runner::new(cli);

        assert_eq!(runner.connection_status().await, "FAILED");
        assert!(runner.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_read_with_empty_resource_list_reads_everything() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/[a-z_]+$"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "obj_1"}]})),
            )
            .expect(12)
            .mount(&mock_server)
            .await;

        let cli = Cli::parse_from([
            "stripe-source",
            "--config-json",
            r#"{"api_key":"sk_test_1"}"#,
            "read",
            "--resources",
            " , ",
        ]);
        let runner = Runner::with_connector(cli, StripeConnector::with_base_url(mock_server.uri()));

        assert!(runner.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_read_rejects_unknown_resource() {
        let cli = Cli::parse_from([
            "stripe-source",
            "--config-json",
            r#"{"api_key":"sk_test_1"}"#,
            "read",
            "--resources",
            "coupons",
        ]);
        let err = Runner::new(cli).run().await.unwrap_err();
        assert!(matches!(err, Error::UnknownResource { .. }));
    }
}
