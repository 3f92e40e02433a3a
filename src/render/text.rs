//! Human-readable plan output.

use crate::plan::SplitPlan;

pub fn render_text(plan: &SplitPlan) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Workspace: {}", plan.workspace_root.display()));
    match &plan.ignore_file {
        Some(path) => lines.push(format!("Ignore file: {}", path.display())),
        None => lines.push("Ignore file: none".to_string()),
    }
    lines.push(format!(
        "Grid: {} columns x {} rows ({} files)",
        plan.layout.columns,
        plan.layout.rows,
        plan.panes.len()
    ));

    for pane in &plan.panes {
        lines.push(format!(
            "  [{:>2}] row {}, col {}  {}",
            pane.cell.group,
            pane.cell.row + 1,
            pane.cell.column + 1,
            pane.relative_path
        ));
    }

    lines.push(format!("Files found: {}, binary skipped: {}", plan.found, plan.binary_skipped));
    if let Some(total) = plan.truncated_from {
        lines.push(format!("Limited to {} of {} text files", plan.panes.len(), total));
    }
    if !plan.skipped.is_empty() {
        lines.push("Skipped:".to_string());
        for skipped in &plan.skipped {
            lines.push(format!("  {}", skipped.reason));
        }
    }

    format!("{}\n", lines.join("\n"))
}
