pub mod config;
pub mod errors;
pub mod paths;

use std::marker::PhantomData;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::{
    filter::filter_fn, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    Layer,
};

pub use config::{ApiConfig, LogConfig, OnboardConfig, StorageConfig};
pub use errors::{AppError, ConfigError};
pub use paths::{PathContext, RuntimeEnvironment};

/// Application infrastructure context.
///
/// Contains path management, the loaded configuration, version info and the
/// logging guard.
pub struct AppContext {
    pub path_context: PathContext,
    pub config: OnboardConfig,
    pub version: &'static str,
    /// The log guard must be kept alive for the duration of the application
    /// to ensure log messages are properly flushed.
    _log_guard: tracing_appender::non_blocking::WorkerGuard,
}

impl AppContext {
    pub fn app_id(&self) -> &str {
        self.path_context.app_id()
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn path_context(&self) -> &PathContext {
        &self.path_context
    }

    pub fn config(&self) -> &OnboardConfig {
        &self.config
    }

    /// Where saved forms live: the configured directory, else the default one.
    pub fn saved_forms_dir(&self) -> PathBuf {
        self.config
            .storage
            .dir
            .clone()
            .unwrap_or_else(|| self.path_context.saved_forms_dir())
    }
}

/// Application metadata trait.
///
/// Define your application's identity by implementing this trait.
pub trait Application: Sized + 'static {
    const APP_ID: &'static str;
    const STUDIO: &'static str = "tango";
    const PROJECT_ID: &'static str = "onboarding";
}

/// Builder for creating applications with proper initialization.
pub struct AppBuilder<A: Application> {
    context: AppContext,
    _marker: PhantomData<A>,
}

impl<A: Application> AppBuilder<A> {
    /// Create a new application builder with the detected base directory.
    pub fn new(version: &'static str) -> Result<Self, AppError> {
        Self::with_paths(
            PathContext::new(A::STUDIO, A::PROJECT_ID, A::APP_ID),
            version,
        )
    }

    /// Same as `new`, rooted at an explicit base directory.
    pub fn with_base_path(base_path: PathBuf, version: &'static str) -> Result<Self, AppError> {
        Self::with_paths(
            PathContext::with_base_path(base_path, A::STUDIO, A::PROJECT_ID, A::APP_ID),
            version,
        )
    }

    /// This performs all the common initialization:
    /// - Ensures all directories exist
    /// - Loads the configuration file
    /// - Initializes logging (file + console)
    fn with_paths(path_context: PathContext, version: &'static str) -> Result<Self, AppError> {
        path_context.ensure_directories()?;

        let config = OnboardConfig::load(&path_context.config_file())?;
        let level = config.log.level_filter()?;

        let log_file_path = path_context.log_file_now();
        let (Some(log_dir), Some(log_filename)) = (log_file_path.parent(), log_file_path.file_name())
        else {
            return Err(AppError::LogPath(log_file_path.clone()));
        };

        let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Separate layer: file (non-blocking) + console (stderr)
        let file_layer = fmt::Layer::default()
            .with_target(false)
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(level_filter(level));

        let console_layer = fmt::Layer::default()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(level_filter(level));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer)
            .try_init()
            .map_err(|err| AppError::Logging(err.to_string()))?;

        info!(
            app = A::APP_ID,
            version,
            root = %path_context.project_root().display(),
            "application initialised"
        );

        Ok(Self {
            context: AppContext {
                path_context,
                config,
                version,
                _log_guard: guard,
            },
            _marker: PhantomData,
        })
    }

    pub fn build(self) -> AppContext {
        self.context
    }
}

fn level_filter<S>(level: LevelFilter) -> impl tracing_subscriber::layer::Filter<S> {
    filter_fn(move |metadata| metadata.level() <= &level)
}
