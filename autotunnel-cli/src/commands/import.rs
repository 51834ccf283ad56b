//! Import commands: files, archives and pasted text.

use std::io::Read as _;
use std::path::Path;

use autotunnel_core::import::{CancellationToken, FileSource, ImportReport, TunnelImporter};
use autotunnel_core::naming::RandomTunnelName;
use autotunnel_core::store::SettingsStore;

use crate::error::CliError;
use crate::util::{create_config_manager, runtime};

/// Import command handler.
///
/// Every source is attempted even after an earlier one fails. Ctrl-C
/// cancels whatever is still running; tunnels already saved stay saved.
pub fn cmd_import(config_path: Option<&Path>, sources: &[String]) -> Result<(), CliError> {
    let config_manager = create_config_manager(config_path)?;
    let rt = runtime()?;

    let report = rt.block_on(async {
        let settings = config_manager.load_settings().await?;
        let importer =
            TunnelImporter::new(config_manager, RandomTunnelName).with_settings(settings.import);

        let cancel = CancellationToken::new();
        let watcher = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("Interrupted, cancelling import");
                    cancel.cancel();
                }
            })
        };

        let mut report = ImportReport::new();
        for location in sources {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            match FileSource::parse(location) {
                Ok(source) => report.merge(importer.import_source(&source, &cancel).await),
                Err(error) => report.add_failure(location.clone(), error),
            }
        }

        watcher.abort();
        Ok::<_, CliError>(report)
    })?;

    print_report(&report);

    if report.has_failures() || report.cancelled {
        return Err(CliError::Import(report.summary()));
    }
    Ok(())
}

/// Paste command handler: imports configuration text read from stdin
pub fn cmd_paste(config_path: Option<&Path>) -> Result<(), CliError> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;

    let config_manager = create_config_manager(config_path)?;
    let rt = runtime()?;

    let tunnel = rt.block_on(async {
        let settings = config_manager.load_settings().await?;
        let importer =
            TunnelImporter::new(config_manager, RandomTunnelName).with_settings(settings.import);
        importer.import_text(&text).await.map_err(|error| {
            tracing::error!(error = %error, "Failed to import pasted text");
            CliError::Import(error.user_facing().to_string())
        })
    })?;

    println!("Imported tunnel '{}'", tunnel.name);
    Ok(())
}

/// Prints the outcome of an import.
///
/// Failures show only the user-facing message; the detail goes to the log.
fn print_report(report: &ImportReport) {
    for tunnel in &report.imported {
        println!("Imported tunnel '{}'", tunnel.name);
    }
    for failure in &report.failures {
        tracing::error!(item = %failure.item, error = %failure.error, "Import failed");
        eprintln!("{}: {}", failure.item, failure.error.user_facing());
    }
    println!("{}", report.summary());
}
