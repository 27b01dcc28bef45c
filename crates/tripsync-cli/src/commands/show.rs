use std::path::Path;

use tripsync_core::models::SECTION_ORDER;

use crate::commands::common::{
    bootstrap_or_warn, format_section_lines, open_engine, parse_tab, status_label,
};
use crate::error::CliError;

pub async fn run_show(
    tab: Option<&str>,
    json: bool,
    offline: bool,
    cache_dir: &Path,
) -> Result<(), CliError> {
    let (mut engine, _config) = open_engine(cache_dir)?;
    if !offline {
        bootstrap_or_warn(&mut engine).await;
    }

    let sections = match tab {
        Some(tab) => vec![parse_tab(tab)?],
        None => SECTION_ORDER.to_vec(),
    };

    if json {
        let selected: Vec<_> = sections
            .iter()
            .filter_map(|id| engine.plan().section(*id))
            .collect();
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    for (index, id) in sections.iter().enumerate() {
        let Some(section) = engine.plan().section(*id) else {
            continue;
        };
        if index > 0 {
            println!();
        }
        for line in format_section_lines(section) {
            println!("{line}");
        }
    }
    println!();
    println!("status: {}", status_label(engine.status()));

    Ok(())
}
