//! Builders wiring settings into the HTTP state.

use std::sync::Arc;

use admissions::domain::ports::{AddressLookup, AdmissionRepository};
use admissions::domain::{AdmissionService, BlockingExecutor, RetryingAddressLookup};
use admissions::inbound::http::state::HttpState;
use admissions::outbound::persistence::{
    DbPool, DieselAdmissionRepository, InMemoryAdmissionRepository, PoolConfig,
    run_pending_migrations,
};
use admissions::outbound::viacep::ViaCepHttpLookup;
use admissions::settings::AdmissionsSettings;
use color_eyre::eyre::{Result, WrapErr};
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

fn state_for<R, L>(
    repository: R,
    lookup: L,
    clock: Arc<dyn Clock>,
    executor: BlockingExecutor,
) -> HttpState
where
    R: AdmissionRepository + 'static,
    L: AddressLookup + 'static,
{
    let service = AdmissionService::new(Arc::new(repository), Arc::new(lookup), clock, executor);
    HttpState::new(Arc::new(service.clone()), Arc::new(service))
}

/// Build the admission handlers' state from settings.
///
/// Uses PostgreSQL when a database URL is configured, applying pending
/// migrations first, and the in-memory store otherwise. Blocks while the
/// pool connects.
pub(crate) fn build_http_state(settings: &AdmissionsSettings) -> Result<HttpState> {
    let base_url = settings.viacep_base_url()?;
    let viacep = ViaCepHttpLookup::new(&base_url, settings.viacep_timeout()?)
        .wrap_err("failed to build the ViaCEP client")?;
    let lookup = RetryingAddressLookup::new(viacep, settings.viacep_retry_policy()?);
    let executor = BlockingExecutor::new(settings.persistence_concurrency()?);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    match settings.database_url() {
        Some(url) => {
            let config = PoolConfig::new(url).with_max_size(settings.database_pool_size()?);
            let pool = DbPool::new(config).wrap_err("failed to connect to PostgreSQL")?;
            run_pending_migrations(&pool).wrap_err("failed to apply database migrations")?;
            info!(%base_url, store = "postgres", "admission service configured");
            Ok(state_for(
                DieselAdmissionRepository::new(pool),
                lookup,
                clock,
                executor,
            ))
        }
        None => {
            warn!("no database configured; calculations are kept in memory");
            info!(%base_url, store = "memory", "admission service configured");
            Ok(state_for(
                InMemoryAdmissionRepository::new(),
                lookup,
                clock,
                executor,
            ))
        }
    }
}
