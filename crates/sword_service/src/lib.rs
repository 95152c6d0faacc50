pub mod collection;
pub mod sub_service;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sword_core::accessor::RepositoryAccessor;
use sword_core::config::SwordConfiguration;
use sword_core::location::UrlManager;
use sword_core::negotiation::NegotiationEngine;
use sword_core::{Result, SwordError};

#[derive(Clone)]
pub struct SwordService {
    pub repository: Arc<dyn RepositoryAccessor>,
    pub config: Arc<SwordConfiguration>,
    engine: NegotiationEngine<UrlManager>,
    upstream_timeout: Duration,
}

impl SwordService {
    pub fn new(repository: Arc<dyn RepositoryAccessor>, config: SwordConfiguration) -> Result<Self> {
        let engine = NegotiationEngine::new(config.url_manager()?);
        let upstream_timeout = Duration::from_millis(config.upstream_timeout_ms);

        Ok(Self {
            repository,
            config: Arc::new(config),
            engine,
            upstream_timeout,
        })
    }

    pub fn engine(&self) -> &NegotiationEngine<UrlManager> {
        &self.engine
    }

    /// Runs one accessor call under the configured deadline. A call that does
    /// not finish in time fails the request; it is never retried.
    async fn upstream<T, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.upstream_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(SwordError::upstream(
                operation,
                format!("no response within {}ms", self.upstream_timeout.as_millis()),
            )),
        }
    }
}
