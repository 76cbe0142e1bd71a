//! Guardline QA Probe — HTTP smoke tests against the backend API and the
//! frontend, with a console summary and an HTML report. Exits non-zero when
//! any probe failed.

use std::path::Path;

use clap::Parser;
use guardline_probe::auth::Credentials;
use guardline_probe::report::{render_summary, write_html};
use guardline_probe::runner::{run, ProbeConfig};
use guardline_probe::HttpTransport;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "qa-probe")]
#[command(about = "Automated QA probe for the guard management stack")]
#[command(version)]
struct Cli {
    /// Backend API base URL
    #[arg(long, env = "API_BASE_URL", default_value = "http://localhost:8080/api")]
    api_url: String,

    /// Frontend base URL
    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:5173")]
    frontend_url: String,

    /// Skip frontend route checks
    #[arg(long, default_value_t = false)]
    no_frontend: bool,

    /// Admin login email for the authentication bootstrap
    #[arg(long, env = "QA_ADMIN_EMAIL")]
    admin_email: Option<String>,

    /// Admin login password for the authentication bootstrap
    #[arg(long, env = "QA_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // .env first so clap's env-backed flags can pick values from it.
    if dotenvy::dotenv().is_ok() {
        eprintln!("Loaded .env file");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qa_probe=info,guardline_probe=info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let admin_credentials = match (cli.admin_email, cli.admin_password) {
        (Some(email), Some(password)) => Some(Credentials::new(email, password)),
        _ => None,
    };

    let config = ProbeConfig {
        api_base_url: cli.api_url,
        frontend_url: cli.frontend_url,
        skip_frontend: cli.no_frontend,
        admin_credentials,
    };

    let transport = HttpTransport::new()?;
    let report = run(&config, &transport);

    println!("{}", render_summary(&report));
    let path = write_html(&report, Path::new("."))?;
    info!(report = %path.display(), "HTML report written");

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
