use crate::api;
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{Context, Result};
use url::Url;

/// Handle the server action
/// # Errors
/// Returns an error if the DSN is malformed or the server fails to start
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Server { port, dsn } => {
            // Fail early on malformed connection strings
            Url::parse(&dsn).context("Invalid database connection string")?;

            api::new(port, dsn, globals).await?;
        }
    }

    Ok(())
}
