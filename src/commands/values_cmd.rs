use clap::{Args, ValueEnum};

use crate::api::ApiClient;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// List the placeholder values resource
#[derive(Args)]
pub struct ValuesCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ValuesCommand {
    pub async fn run(&self, api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
        let values = api.values().await?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&values)?);
            }
            OutputFormat::Text => {
                for value in &values {
                    println!("{}  {}", value.id, value.name);
                }
            }
        }
        Ok(())
    }
}
