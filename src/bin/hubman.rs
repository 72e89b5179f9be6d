//! Interactive CLI entry point.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use hubman::audit::ActionLog;
use hubman::config::Config;
use hubman::github::GitHubClient;
use hubman::ui::{App, ConsolePrompter};
use hubman::vcs::SystemGit;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Both startup failures here are fatal: a missing token and a token
    // GitHub rejects.
    let config = Config::from_env()?;
    let log = ActionLog::new(&config.log_file);
    let client = GitHubClient::with_base_url(&config.token, &config.api_url);
    let user = client.authenticated_user()?;
    println!("Authenticated as: {}", user.login);

    let git = SystemGit;
    let app = App {
        client: &client,
        config: &config,
        log: &log,
        git: &git,
    };

    let mut prompt = ConsolePrompter;
    let result = app.run(&mut prompt);
    let _ = log.record("Exited hubman");
    result.map_err(Into::into)
}
