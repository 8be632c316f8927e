//! Function bootstrap orchestration.
//!
//! A cold start loads the configuration, installs telemetry and connects the
//! store exactly once. The resulting [`Function`] is then reused for every
//! invocation the runtime delivers to the process.

use std::sync::Arc;

use lambda_runtime::{LambdaEvent, service_fn};
use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;
use tracing::Instrument;

use items_config::{Config, ConfigValidationError};

use crate::dispatch::{Dispatcher, GatewayRequest, GatewayResponse};
use crate::health::HealthReporter;
use crate::store::{StoreError, StoreProvider};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the function configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that hands out a configuration resolved elsewhere.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already-resolved configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Configuration loaded but holds unusable values.
    #[error("invalid configuration: {source}")]
    InvalidConfiguration {
        /// Validation failure.
        #[source]
        source: ConfigValidationError,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The store client could not be built.
    #[error("failed to connect the item store: {source}")]
    Store {
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
}

/// Result of a successful bootstrap: configuration plus a ready dispatcher.
#[derive(Debug)]
pub struct Function {
    config: Config,
    dispatcher: Dispatcher,
    telemetry: TelemetryHandle,
}

impl Function {
    fn new(config: Config, dispatcher: Dispatcher, telemetry: TelemetryHandle) -> Self {
        Self {
            config,
            dispatcher,
            telemetry,
        }
    }

    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the dispatcher serving invocations.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Serves a single gateway event.
    pub async fn invoke(&self, request: &GatewayRequest) -> GatewayResponse {
        self.dispatcher.handle(request).await
    }

    /// Serves invocations from the Lambda runtime until it shuts down.
    ///
    /// Each invocation runs inside a span carrying the runtime's request id.
    /// Dispatch itself never fails, so errors here come from the runtime
    /// (event decoding or the runtime API).
    ///
    /// # Errors
    ///
    /// Returns the runtime error that stopped the event loop.
    pub async fn run(self) -> Result<(), lambda_runtime::Error> {
        let dispatcher = self.dispatcher;
        lambda_runtime::run(service_fn(move |event: LambdaEvent<GatewayRequest>| {
            let dispatcher = dispatcher.clone();
            async move {
                let span = tracing::info_span!(
                    "invocation",
                    request_id = %event.context.request_id
                );
                let response = dispatcher.handle(&event.payload).instrument(span).await;
                Ok::<GatewayResponse, lambda_runtime::Error>(response)
            }
        }))
        .await
    }
}

/// Bootstraps the function using the supplied collaborators.
///
/// # Errors
///
/// Returns a [`BootstrapError`] naming the stage that failed; the reporter
/// has already been told about it.
pub async fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    provider: &dyn StoreProvider,
) -> Result<Function, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => return Err(fail(&*reporter, BootstrapError::Configuration { source })),
    };

    if let Err(source) = config.validate() {
        return Err(fail(
            &*reporter,
            BootstrapError::InvalidConfiguration { source },
        ));
    }

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => return Err(fail(&*reporter, BootstrapError::Telemetry { source })),
    };

    reporter.store_connecting(config.table_name());
    let store = match provider.connect(&config).await {
        Ok(store) => {
            reporter.store_ready(config.table_name());
            store
        }
        Err(source) => {
            reporter.store_failed(&source);
            return Err(fail(&*reporter, BootstrapError::Store { source }));
        }
    };

    reporter.bootstrap_succeeded(&config);
    Ok(Function::new(config, Dispatcher::new(store), telemetry))
}

fn fail(reporter: &dyn HealthReporter, error: BootstrapError) -> BootstrapError {
    reporter.bootstrap_failed(&error);
    error
}
