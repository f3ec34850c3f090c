mod bootstrap;

use anyhow::{Context, Result};
use energy_core::settings::Settings;
use energy_data::analysis::analyze_directory;
use energy_report::export::export_all;
use energy_report::summary::{render_error_list, render_summary};
use energy_report::table_view::render_summary_table;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(settings.effective_log_level())?;

    tracing::info!("campus-energy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, Output: {}, Extension: {}",
        settings.data_dir.display(),
        settings.output_dir.display(),
        settings.normalized_extension()
    );

    let result = analyze_directory(&settings.data_dir, settings.normalized_extension())
        .map_err(|err| {
            let action = if err.is_fatal() {
                "data directory unavailable"
            } else {
                "failed to analyse"
            };
            anyhow::Error::new(err).context(format!("{}: {}", action, settings.data_dir.display()))
        })?;

    println!("DATA LOADED. Rows: {}", result.dataset.len());
    if result.errors.is_empty() {
        println!("ERRORS: none");
    } else {
        println!("ERRORS:");
        print!("{}", render_error_list(&result.errors));
    }

    println!();
    println!("SUMMARY TABLE:");
    print!("{}", render_summary_table(&result.summary));

    println!();
    print!("{}", render_summary(&result));

    if settings.no_export {
        tracing::info!("Export skipped (--no-export)");
        return Ok(());
    }

    let paths = export_all(&result, &settings.output_dir)
        .with_context(|| format!("failed to export to {}", settings.output_dir.display()))?;

    println!();
    println!("FILES GENERATED IN {}", settings.output_dir.display());
    for path in paths.all() {
        println!("  {}", path.display());
    }

    Ok(())
}
