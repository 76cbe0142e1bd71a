//! Top-to-bottom probe run driver: authenticate, probe read endpoints, walk
//! the dependent chain, check frontend routes, then aggregate.

use tracing::info;

use crate::auth::{self, Credentials};
use crate::executor::Transport;
use crate::report::ProbeReport;
use crate::routes;
use crate::sequencer;
use crate::session::ProbeSession;

/// Run configuration, resolved from CLI flags and environment by the binary.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub api_base_url: String,
    pub frontend_url: String,
    pub skip_frontend: bool,
    pub admin_credentials: Option<Credentials>,
}

/// Execute one full probe run and return the aggregated report. Probe
/// failures never abort the run; they are all recorded and tallied.
pub fn run<T: Transport>(config: &ProbeConfig, transport: &T) -> ProbeReport {
    let mut session = ProbeSession::new(transport, &config.api_base_url);

    info!(api = %config.api_base_url, "starting authentication");
    auth::login(&mut session, config.admin_credentials.clone());

    info!("probing read-only backend endpoints");
    routes::run_read_probes(&mut session);

    info!("running dependent create/use/delete chain");
    sequencer::run_chain(&mut session);

    if config.skip_frontend {
        info!("frontend checks skipped");
    } else {
        info!(frontend = %config.frontend_url, "checking frontend routes");
        routes::run_frontend_checks(transport, &config.frontend_url, &mut session.log);
    }

    ProbeReport::from_log(&session.log)
}
