//! Initialise an application context and print where everything lives.
//!
//! Run with `cargo run -p app --example basic_app`. A default config file is
//! written on first run so it can be edited afterwards.

use app::{AppBuilder, AppError, Application};

struct DemoApp;

impl Application for DemoApp {
    const APP_ID: &'static str = "demo";
    // Uses defaults: STUDIO = "tango", PROJECT_ID = "onboarding"
}

fn main() -> Result<(), AppError> {
    println!("=== Basic App Example ===\n");

    let app_context = AppBuilder::<DemoApp>::new("1.0.0")?.build();

    println!("📋 Application Info:");
    println!("   App ID: {}", app_context.app_id());
    println!("   Version: {}", app_context.version());
    println!();

    let ctx = app_context.path_context();

    println!("📂 Path Structure:");
    println!("   Studio: {}", ctx.studio());
    println!("   Project: {}", ctx.project_id());
    println!("   Environment: {:?}", ctx.environment());
    println!("   Base Path: {:?}", ctx.base_path());
    println!();

    println!("📁 Directories:");
    println!("   Project Root: {:?}", ctx.project_root());
    println!("   Saved forms: {:?}", app_context.saved_forms_dir());
    println!("   Schemas: {:?}", ctx.schemas_dir());
    println!("   Logs: {:?}", ctx.logs_dir());
    println!();

    let config = app_context.config();
    println!("⚙️  Configuration ({:?}):", ctx.config_file());
    println!("   API: {} (timeout {:?})", config.api.base_url, config.api.timeout());
    println!("   Storage prefix: {}", config.storage.key_prefix);
    println!();

    if !ctx.config_file().exists() {
        config.save(&ctx.config_file())?;
        println!("💡 Wrote default config to {:?}", ctx.config_file());
    }

    Ok(())
}
