//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AdmissionCommand, AdmissionQuery};

/// Dependency bundle for the admission handlers.
#[derive(Clone)]
pub struct HttpState {
    pub command: Arc<dyn AdmissionCommand>,
    pub query: Arc<dyn AdmissionQuery>,
}

impl HttpState {
    /// Bundle the creation and query use-cases.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use admissions::domain::ports::FixtureAddressLookup;
    /// use admissions::domain::{AdmissionService, BlockingExecutor};
    /// use admissions::inbound::http::state::HttpState;
    /// use admissions::outbound::persistence::InMemoryAdmissionRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = AdmissionService::new(
    ///     Arc::new(InMemoryAdmissionRepository::new()),
    ///     Arc::new(FixtureAddressLookup::default()),
    ///     Arc::new(DefaultClock),
    ///     BlockingExecutor::new(4),
    /// );
    /// let state = HttpState::new(Arc::new(service.clone()), Arc::new(service));
    /// let _command = state.command.clone();
    /// ```
    pub fn new(command: Arc<dyn AdmissionCommand>, query: Arc<dyn AdmissionQuery>) -> Self {
        Self { command, query }
    }
}
