//! Path context for runtime environment detection and project-aware paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Identifies the runtime environment where the application is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Running via `cargo run` or in development mode
    Development,
    /// Running as an installed binary
    Production,
}

/// Directory layout under `<base>/<studio>/<project_id>`.
#[derive(Debug, Clone)]
pub struct PathContext {
    environment: RuntimeEnvironment,
    base_path: Arc<Path>,
    studio: String,
    project_id: String,
    app_id: &'static str,
}

impl PathContext {
    /// Creates a new PathContext with automatic environment detection.
    pub fn new(
        studio: impl Into<String>,
        project_id: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        let environment = Self::detect_environment();
        let base_path = Self::determine_base_path(environment);
        Self::with_environment(environment, base_path, studio, project_id, app_id)
    }

    /// Creates a PathContext with an explicit base path (tests, `--data-dir`).
    pub fn with_base_path(
        base_path: PathBuf,
        studio: impl Into<String>,
        project_id: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        Self::with_environment(Self::detect_environment(), base_path, studio, project_id, app_id)
    }

    fn with_environment(
        environment: RuntimeEnvironment,
        base_path: PathBuf,
        studio: impl Into<String>,
        project_id: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        Self {
            environment,
            base_path: base_path.into(),
            studio: studio.into(),
            project_id: project_id.into(),
            app_id,
        }
    }

    fn detect_environment() -> RuntimeEnvironment {
        // Binaries built by cargo live under target/{debug,release}
        if let Ok(exe_path) = std::env::current_exe() {
            if exe_path.components().any(|c| c.as_os_str() == "target") {
                return RuntimeEnvironment::Development;
            }
        }
        if std::env::var("CARGO").is_ok() || std::env::var("CARGO_MANIFEST_DIR").is_ok() {
            return RuntimeEnvironment::Development;
        }
        RuntimeEnvironment::Production
    }

    fn determine_base_path(environment: RuntimeEnvironment) -> PathBuf {
        match environment {
            RuntimeEnvironment::Development => std::env::current_dir()
                .map(|dir| dir.join(".out"))
                .unwrap_or_else(|_| PathBuf::from(".out")),
            RuntimeEnvironment::Production => dirs::data_local_dir()
                .map(|dir| dir.join("Tango"))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn studio(&self) -> &str {
        &self.studio
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn app_id(&self) -> &str {
        self.app_id
    }

    /// `<base>/<studio>/<project_id>`
    pub fn project_root(&self) -> PathBuf {
        self.base_path.join(&self.studio).join(&self.project_id)
    }

    /// `<project_root>/<app_id>.config.ron`
    pub fn config_file(&self) -> PathBuf {
        self.project_root().join(format!("{}.config.ron", self.app_id))
    }

    /// `<project_root>/saved_forms/`, one JSON file per saved form.
    pub fn saved_forms_dir(&self) -> PathBuf {
        self.project_root().join("saved_forms")
    }

    /// `<project_root>/schemas/`, custom schema JSON files.
    pub fn schemas_dir(&self) -> PathBuf {
        self.project_root().join("schemas")
    }

    /// `<project_root>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.project_root().join("logs")
    }

    /// `<project_root>/logs/<app_id>.<timestamp>.log`
    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir()
            .join(format!("{}.{}.log", self.app_id, timestamp))
    }

    /// Log file path with the current local timestamp.
    pub fn log_file_now(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.log_file(&timestamp)
    }

    /// Ensures all necessary directories exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in [
            self.project_root(),
            self.saved_forms_dir(),
            self.schemas_dir(),
            self.logs_dir(),
        ] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
