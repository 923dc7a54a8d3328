use crate::view::CatalogView;

/// Render the grouped course view as plain text
pub fn render_view(view: &CatalogView) -> String {
    let mut content = String::new();

    if let Some(marker) = view.empty_marker() {
        content.push_str(marker);
        content.push('\n');
        return content;
    }

    for group in &view.groups {
        content.push_str(&format!("## {}\n", group.header()));

        if !group.expanded {
            content.push('\n');
            continue;
        }

        if let Some(marker) = group.empty_marker() {
            content.push_str(&format!("  {}\n\n", marker));
            continue;
        }

        for chip in &group.items {
            let mark = if chip.selected {
                "[x]"
            } else if chip.blocked {
                "[-]"
            } else {
                "[ ]"
            };
            content.push_str(&format!("  {} {} ({})", mark, chip.label, chip.code));
            if let Some(explanation) = &chip.explanation {
                content.push_str(&format!("  ⟵ {}", explanation));
            }
            content.push('\n');
        }
        content.push('\n');
    }

    content.push_str(&format!("Selected: {}\n", view.selected_count));
    content
}
