//! Small markup helpers shared by the views.

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Tag badges, one per tag.
#[must_use]
pub fn tag_badges(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!(r#"<span class="badge b-other">{}</span>"#, escape(t)))
        .collect()
}

/// Placeholder shown when a filtered list is empty.
#[must_use]
pub fn empty_state(section: &str, message: &str) -> String {
    format!(
        r#"<div class="empty-state" id="{section}-empty"><p>{}</p></div>"#,
        escape(message)
    )
}

/// `<option>` elements for a select.
///
/// When `selected` is not among the options it is added as an extra,
/// selected option so that unknown stored values survive an edit.
#[must_use]
pub fn select_options(options: &[(&str, &str)], selected: &str) -> String {
    let mut out: String = options
        .iter()
        .map(|(value, label)| option(value, label, *value == selected))
        .collect();
    if !selected.is_empty() && !options.iter().any(|(value, _)| *value == selected) {
        out.push_str(&option(selected, selected, true));
    }
    out
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}
