use std::path::Path;

use tripsync_core::export::{render_plan_export, ExportFormat};

use crate::cli::ExportFormatArg;
use crate::commands::common::{bootstrap_or_warn, open_engine};
use crate::error::CliError;

pub async fn run_export(
    format: ExportFormatArg,
    output_path: Option<&Path>,
    cache_dir: &Path,
) -> Result<(), CliError> {
    let format = match format {
        ExportFormatArg::Json => ExportFormat::Json,
        ExportFormatArg::Markdown => ExportFormat::Markdown,
    };

    let (mut engine, _config) = open_engine(cache_dir)?;
    bootstrap_or_warn(&mut engine).await;

    let rendered = render_plan_export(engine.plan(), format)?;
    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
