mod app_state;
mod cli;
mod logging;
mod updater;

use std::path::PathBuf;

use winit::event_loop::EventLoop;

use rambox_config::schema::RamboxConfig;
use rambox_services::{ServiceRegistry, ServiceStore};

const SERVICES_FILE_NAME: &str = "services.json";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let path = rambox_platform::crash_report::write_crash_report(info);

        eprintln!("\n--- Rambox crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("----------------------\n");

        default_hook(info);
    }));
}

/// Parse failures fall back to defaults. Out-of-range values are only
/// warned about by the loader, and the parsed config is kept.
fn load_config(args: &cli::Args) -> RamboxConfig {
    let loaded = match args.config {
        Some(ref path) => rambox_config::toml_loader::load_or_create(path),
        None => rambox_config::toml_loader::load_default(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("config load failed, using defaults: {e}");
        RamboxConfig::default()
    })
}

fn services_path(args: &cli::Args) -> Option<PathBuf> {
    match args.data_dir {
        Some(ref dir) => Some(dir.join(SERVICES_FILE_NAME)),
        None => rambox_platform::services_file()
            .map_err(|e| tracing::error!("Cannot locate services file: {e}"))
            .ok(),
    }
}

/// Load the service store. Corrupt files are already backed up and
/// replaced by an empty list inside the store, so only I/O errors land here.
fn load_registry(path: PathBuf) -> Option<ServiceRegistry> {
    match ServiceRegistry::load(ServiceStore::new(path.clone())) {
        Ok(registry) => Some(registry),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to load services");
            None
        }
    }
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Config first: it carries the logging settings
    let config = load_config(&args);
    let _log_guard = logging::init(&config.logging, args.log_level.as_deref());

    tracing::info!("Rambox v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!(path = %path.display(), "Using config override");
    }
    // The loader ran before the subscriber existed, so repeat its warning
    if let Err(e) = rambox_config::validation::validate(&config) {
        tracing::warn!("Config has out-of-range values, using them anyway: {e}");
    }

    if let Err(e) = rambox_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }
    if let Some(ref dir) = args.data_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!(dir = %dir.display(), "Failed to create data directory: {e}");
        }
    }

    let Some(registry) = services_path(&args).and_then(load_registry) else {
        eprintln!("Rambox could not open its service store, see the log for details.");
        std::process::exit(1);
    };
    tracing::info!(services = registry.len(), "Services loaded");

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::RamboxApp::new(config, registry)
        .with_config_path(args.config.clone())
        .with_update_checks(!args.no_update_check);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
