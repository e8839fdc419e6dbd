//! Templates handed to the external editor and parsing of what comes back.

/// Template for a single free-text field.
pub(super) fn field_editor_template(prompt: &str, current: &str) -> String {
    let mut template = format!("# {prompt}\n# Lines starting with '#' are ignored.\n");
    if current.is_empty() {
        template.push('\n');
    } else {
        template.push_str(current);
        template.push('\n');
    }
    template
}

/// Body of the edited text without comment lines, `None` when blank.
pub(super) fn parse_field_editor_output(raw: &str) -> Option<String> {
    let body = raw
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Single-line variant: only the first non-comment, non-blank line counts.
pub(super) fn parse_line_editor_output(raw: &str) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
}
