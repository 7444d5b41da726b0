//! Human-readable HTML projection of a [`TranslationResult`].
//!
//! Every value taken from the result is escaped; the page adds styling and
//! section headings only.

use std::fmt::Write;

use plainread_shared::TranslationResult;

const STYLE: &str = r#"
  body { font-family: Arial, sans-serif; max-width: 1000px; margin: 0 auto; padding: 20px; line-height: 1.6; }
  .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 10px; margin-bottom: 30px; }
  .subject { font-size: 28px; font-weight: bold; }
  .reading-level { font-size: 16px; opacity: 0.9; margin-top: 10px; }
  .modules { font-size: 14px; margin-top: 15px; }
  .section { margin: 25px 0; padding: 20px; border-left: 5px solid #667eea; background: #f8faff; border-radius: 5px; }
  .findings { border-left-color: #4CAF50; background: #f8fff8; }
  .methodology { border-left-color: #FF9800; background: #fff8f0; }
  .matters { border-left-color: #E91E63; background: #fdf8fb; }
  .questions { border-left-color: #9C27B0; background: #faf8ff; }
  .confidence { text-align: center; font-size: 20px; margin: 30px 0; padding: 15px; background: #e3f2fd; border-radius: 8px; }
  ul { padding-left: 20px; }
  li { margin: 10px 0; }
  h2 { color: #333; border-bottom: 2px solid #eee; padding-bottom: 10px; }
  .tip { background: #fff3e0; padding: 15px; border-radius: 5px; margin: 10px 0; border-left: 4px solid #ff9800; }
  .translation p { text-align: justify; line-height: 1.8; }
  footer { text-align: center; color: #666; font-size: 14px; margin-top: 40px; }
"#;

/// Escape text for use in HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render the full report page.
pub fn render(result: &TranslationResult) -> String {
    let subject = escape(result.subject_area.label());
    let modules = if result.modules_applied.is_empty() {
        "None".to_string()
    } else {
        escape(&result.modules_applied.join(", "))
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>Research Translation: {subject}</title>");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n");

    html.push_str("<div class=\"header\">\n");
    let _ = writeln!(
        html,
        "  <div class=\"subject\">📚 {subject} Research Translation</div>"
    );
    let _ = writeln!(
        html,
        "  <div class=\"reading-level\">📖 Original Reading Level: {}</div>",
        escape(result.reading_level.label())
    );
    let _ = writeln!(
        html,
        "  <div class=\"modules\">🔧 Accessibility Modules Applied: {modules}</div>"
    );
    html.push_str("</div>\n");

    let _ = writeln!(
        html,
        "<div class=\"confidence\"><strong>🎯 Translation Confidence: {:.0}%</strong></div>",
        result.confidence * 100.0
    );

    list_section(
        &mut html,
        "section findings",
        "🔍 Key Findings (What They Discovered)",
        &result.key_findings,
    );
    list_section(
        &mut html,
        "section matters",
        "🎯 Why This Matters (Real-World Impact)",
        &result.why_it_matters,
    );
    list_section(
        &mut html,
        "section methodology",
        "⚙️ How They Did It (Methods Simplified)",
        &result.methodology,
    );
    list_section(
        &mut html,
        "section questions",
        "❓ Questions to Ask Professionals",
        &result.questions,
    );
    if !result.visual_elements.is_empty() {
        list_section(&mut html, "section", "🎬 Visual Elements", &result.visual_elements);
    }
    if !result.action_items.is_empty() {
        list_section(&mut html, "section", "📋 Action Items", &result.action_items);
    }

    html.push_str("<div class=\"section translation\">\n  <h2>📖 Full Translation</h2>\n");
    html.push_str(
        "  <div class=\"tip\"><strong>💡 Reading Tip:</strong> Technical terms are explained \
         in parentheses.</div>\n",
    );
    for line in result.rewritten_text.lines() {
        let _ = writeln!(html, "  <p>{}</p>", escape(line));
    }
    html.push_str("</div>\n");

    html.push_str("<footer>\n");
    html.push_str("  <p><strong>PlainRead</strong> - research in plain language</p>\n");
    let _ = writeln!(html, "  <p>Source: {}</p>", escape(&result.source_identifier));
    html.push_str(
        "  <p><em>This translation provides information, not professional advice. \
         Always consult experts for important decisions.</em></p>\n",
    );
    html.push_str("</footer>\n</body>\n</html>\n");

    html
}

fn list_section(html: &mut String, class: &str, heading: &str, items: &[String]) {
    let _ = writeln!(html, "<div class=\"{class}\">\n  <h2>{heading}</h2>\n  <ul>");
    for item in items {
        let _ = writeln!(html, "    <li>{}</li>", escape(item));
    }
    html.push_str("  </ul>\n</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use plainread_shared::{ReadingLevel, SubjectArea};

    fn result() -> TranslationResult {
        TranslationResult {
            original_text: "orig".into(),
            rewritten_text: "First line.\nSecond <b>line</b>.".into(),
            key_findings: vec!["🔍 dose & response".into()],
            why_it_matters: vec![],
            methodology: vec!["👥 n = 40".into()],
            questions: vec![],
            visual_elements: vec![],
            action_items: vec!["✅ Ask \"why\"".into()],
            confidence: 0.874,
            subject_area: SubjectArea::SocialScience,
            reading_level: ReadingLevel::College,
            modules_applied: vec![],
            source_identifier: "papers/a<b>.txt".into(),
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom's & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom&#39;s &amp; co&lt;/a&gt;"
        );
    }

    #[test]
    fn render_escapes_result_values() {
        let html = render(&result());
        assert!(html.contains("<li>🔍 dose &amp; response</li>"));
        assert!(html.contains("<p>Second &lt;b&gt;line&lt;/b&gt;.</p>"));
        assert!(html.contains("Source: papers/a&lt;b&gt;.txt"));
        assert!(!html.contains("<b>line</b>"));
    }

    #[test]
    fn render_shows_header_fields() {
        let html = render(&result());
        assert!(html.contains("Social Science Research Translation"));
        assert!(html.contains("Original Reading Level: College"));
        assert!(html.contains("Modules Applied: None"));
        assert!(html.contains("Translation Confidence: 87%"));
    }

    #[test]
    fn optional_sections_only_when_present() {
        let html = render(&result());
        assert!(!html.contains("Visual Elements"));
        assert!(html.contains("📋 Action Items"));
        assert!(html.contains("✅ Ask &quot;why&quot;"));
    }
}
