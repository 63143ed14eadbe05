//! List command implementation

use super::{connect, report};
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Regular expression matched from the start of each project path
    #[arg(default_value = "")]
    pub pattern: String,

    /// Include every visible project, not only those the token's user is a member of
    #[arg(long)]
    pub all: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, client) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };

        let membership = !self.all && config.listing.membership;

        match client.list_projects(&self.pattern, membership).await {
            Ok(projects) => {
                tracing::info!(
                    pattern = %self.pattern,
                    membership,
                    matched = projects.len(),
                    "Listed projects"
                );
                for project in projects {
                    println!("{project}");
                }
                Ok(0)
            }
            Err(e) => Ok(report(&e)),
        }
    }
}
