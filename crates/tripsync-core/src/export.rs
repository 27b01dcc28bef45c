//! Plan export helpers: the print view, rendered as text.

use std::fmt::Write as _;

use crate::models::{TravelPlan, SECTION_ORDER};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

/// Render the whole plan as pretty-printed JSON.
pub fn render_json_export(plan: &TravelPlan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(plan)
}

/// Render the whole plan as Markdown, all sections in fixed tab order.
/// This is the printable view of the itinerary.
#[must_use]
pub fn render_markdown_export(plan: &TravelPlan) -> String {
    let mut output = String::new();

    for (index, section_id) in SECTION_ORDER.iter().enumerate() {
        let Some(section) = plan.section(*section_id) else {
            continue;
        };

        if index > 0 {
            output.push('\n');
        }
        let _ = writeln!(output, "## {:02} {}", index + 1, section.title);
        let _ = writeln!(output, "_{}_", section.description);

        for item in &section.items {
            let _ = writeln!(output);
            let _ = writeln!(output, "### {}", item.title);
            if let Some(subtitle) = &item.subtitle {
                let _ = writeln!(output, "**{subtitle}**");
            }
            if let Some(time) = &item.time {
                let _ = writeln!(output, "🕐 {time}");
            }
            let locations = item.map_locations();
            if !locations.is_empty() {
                let labels: Vec<String> =
                    locations.iter().map(crate::models::LocationRef::label).collect();
                let _ = writeln!(output, "📍 {}", labels.join(" · "));
            }
            if let Some(tags) = &item.tags {
                let _ = writeln!(output, "`{}`", tags.join("` `"));
            }
            let _ = writeln!(output);
            output.push_str(item.detail_text());
            output.push('\n');
        }
    }

    output
}

/// Render the plan in the selected format.
pub fn render_plan_export(plan: &TravelPlan, format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(plan),
        ExportFormat::Markdown => Ok(render_markdown_export(plan)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionId;

    #[test]
    fn markdown_export_keeps_tab_order() {
        let plan = TravelPlan::initial();
        let rendered = render_markdown_export(&plan);

        let prep = rendered.find("## 01 行前准备").unwrap();
        let harbin = rendered.find("## 02 哈尔滨").unwrap();
        let tips = rendered.find("## 04 生存指南").unwrap();
        assert!(prep < harbin && harbin < tips);
    }

    #[test]
    fn markdown_export_uses_detail_content_when_present() {
        let mut plan = TravelPlan::initial();
        let item = &mut plan
            .section_mut(SectionId::Prep)
            .unwrap()
            .items[0];
        item.detail_content = Some("详细版内容".to_string());

        let rendered = render_markdown_export(&plan);
        assert!(rendered.contains("详细版内容"));
    }

    #[test]
    fn markdown_export_lists_item_locations() {
        let mut plan = TravelPlan::initial();
        plan.section_mut(SectionId::Harbin).unwrap().items[0].locations =
            Some(vec![crate::models::LocationRef {
                name: "中华巴洛克风情街".to_string(),
                keyword: "哈尔滨中华巴洛克风情街".to_string(),
            }]);

        let rendered = render_markdown_export(&plan);
        assert!(rendered.contains("📍 中华巴洛克风情街 (哈尔滨中华巴洛克风情街)"));
    }

    #[test]
    fn json_export_is_parseable() {
        let plan = TravelPlan::initial();
        let rendered = render_json_export(&plan).unwrap();
        let parsed: TravelPlan = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, plan);
    }
}
