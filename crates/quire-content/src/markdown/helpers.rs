//! Small content helpers shared by the metadata and document layers.

pub use quire_core::normalize_id;

/// Split a comma separated list, trimming entries and dropping empty ones.
///
/// ```
/// use quire_content::markdown::parse_comma_list;
///
/// assert_eq!(parse_comma_list("rust, embedded ,, c"), vec!["rust", "embedded", "c"]);
/// ```
pub fn parse_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Body text under the heading whose text matches `heading`.
///
/// Matching ignores case and surrounding whitespace. The section runs until
/// the next ATX heading of the same or a higher level; `#` lines inside
/// fenced code blocks are not headings.
pub fn extract_section_content(content: &str, heading: &str) -> Option<String> {
    let wanted = heading.trim().to_lowercase();
    let mut section: Option<(usize, Vec<&str>)> = None;
    let mut fence: Option<&str> = None;

    for line in content.lines() {
        let trimmed = line.trim_start();

        if let Some(open) = fence {
            if trimmed.starts_with(open) {
                fence = None;
            }
        } else if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            fence = Some(&trimmed[..3]);
        } else if let Some((level, text)) = atx_heading(trimmed) {
            match section {
                Some((open_level, lines)) if level <= open_level => {
                    return Some(lines.join("\n").trim().to_string());
                }
                None if text.to_lowercase() == wanted => {
                    section = Some((level, Vec::new()));
                    continue;
                }
                _ => {}
            }
        }

        if let Some((_, ref mut lines)) = section {
            lines.push(line);
        }
    }

    section.map(|(_, lines)| lines.join("\n").trim().to_string())
}

/// Parse an ATX heading line into `(level, text)`.
fn atx_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    Some((level, rest.trim().trim_end_matches('#').trim_end()))
}
