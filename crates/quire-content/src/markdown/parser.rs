//! Markdown structure extraction.
//!
//! Thin helpers over `pulldown-cmark` events. Fenced and indented code
//! blocks are treated as opaque text: they are never part of headings,
//! summaries, or plain-text output, and [`extract_code_blocks`] returns
//! their contents verbatim.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use serde::Serialize;

/// A code block quoted in a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Info-string language of a fenced block (`c`, `rust`, ...).
    pub language: Option<String>,
    /// Block contents, unmodified.
    pub code: String,
}

/// Text of the first heading of any level.
///
/// ```
/// use quire_content::markdown::extract_first_heading;
///
/// let md = "Intro\n\n## Tip 1: `volatile`\n\ntext";
/// assert_eq!(extract_first_heading(md), Some("Tip 1: volatile".to_string()));
/// ```
pub fn extract_first_heading(content: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => {
                let heading = text.trim();
                if !heading.is_empty() {
                    return Some(heading.to_string());
                }
                in_heading = false;
                text.clear();
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            _ => {}
        }
    }

    None
}

/// Plain text of the first paragraph, with soft breaks joined by spaces.
pub fn extract_first_paragraph(content: &str) -> Option<String> {
    let mut in_paragraph = false;
    let mut text = String::new();

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) => {
                let paragraph = text.trim();
                if !paragraph.is_empty() {
                    return Some(paragraph.to_string());
                }
                in_paragraph = false;
                text.clear();
            }
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    None
}

/// Plain text of the whole body, one block per line, code blocks excluded.
pub fn extract_text_content(content: &str) -> String {
    let mut out = String::new();
    let mut code_depth = 0usize;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code_depth += 1,
            Event::End(TagEnd::CodeBlock) => code_depth = code_depth.saturating_sub(1),
            _ if code_depth > 0 => {}
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                if !out.ends_with('\n') && !out.is_empty() {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }

    out.trim_end().to_string()
}

/// All code blocks in document order.
pub fn extract_code_blocks(content: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<CodeBlock> = None;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split(|c: char| c.is_whitespace() || c == ',')
                        .next()
                        .filter(|lang| !lang.is_empty())
                        .map(String::from),
                    CodeBlockKind::Indented => None,
                };
                current = Some(CodeBlock {
                    language,
                    code: String::new(),
                });
            }
            Event::Text(t) => {
                if let Some(block) = current.as_mut() {
                    block.code.push_str(&t);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "\
Short intro with *emphasis*
over two lines.

## Keep ISRs short

Do the minimum in the handler.

```c
#define LED_PIN 5
volatile uint8_t flag;
```

    indented block

- item one
- item two
";

    #[test]
    fn test_extract_first_heading() {
        assert_eq!(
            extract_first_heading(POST),
            Some("Keep ISRs short".to_string())
        );
    }

    #[test]
    fn test_extract_first_heading_ignores_code() {
        let md = "```c\n# not a heading\n```\n\n# Real";
        assert_eq!(extract_first_heading(md), Some("Real".to_string()));
    }

    #[test]
    fn test_extract_first_heading_none() {
        assert_eq!(extract_first_heading("plain text"), None);
        assert_eq!(extract_first_heading(""), None);
    }

    #[test]
    fn test_extract_first_paragraph() {
        assert_eq!(
            extract_first_paragraph(POST),
            Some("Short intro with emphasis over two lines.".to_string())
        );
    }

    #[test]
    fn test_extract_first_paragraph_none() {
        assert_eq!(extract_first_paragraph("# Only a heading"), None);
    }

    #[test]
    fn test_extract_text_content_skips_code() {
        let text = extract_text_content(POST);
        assert!(text.contains("Keep ISRs short"));
        assert!(text.contains("item two"));
        assert!(!text.contains("LED_PIN"));
        assert!(!text.contains("indented block"));
    }

    #[test]
    fn test_extract_code_blocks() {
        let blocks = extract_code_blocks(POST);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language.as_deref(), Some("c"));
        assert_eq!(blocks[0].code, "#define LED_PIN 5\nvolatile uint8_t flag;\n");
        assert_eq!(blocks[1].language, None);
        assert_eq!(blocks[1].code, "indented block\n");
    }

    #[test]
    fn test_extract_code_blocks_info_string() {
        let blocks = extract_code_blocks("```rust,ignore\nfn main() {}\n```\n");
        assert_eq!(blocks[0].language.as_deref(), Some("rust"));

        let blocks = extract_code_blocks("```\nraw\n```\n");
        assert_eq!(blocks[0].language, None);
    }
}
