//! Inline HTML for the two pages the service renders. The surface is one
//! form and one result view, so a template engine would be overkill here.

/// Escapes user-derived text rendered into an HTML body.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The input form, with the one-shot message from a failed submission
/// rendered above it when present.
pub fn index_page(flash: Option<&str>) -> String {
    let flash_block = match flash {
        Some(msg) => format!(r#"<p class="flash">{}</p>"#, escape_html(msg)),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Precis - Text Summarizer</title>
  <style>
    body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}
    .flash {{ color: #a00; border: 1px solid #a00; padding: 0.5rem; }}
    textarea {{ width: 100%; height: 12rem; }}
  </style>
</head>
<body>
  <h1>Summarize a document</h1>
  {flash_block}
  <form method="post" action="/" enctype="multipart/form-data">
    <p><label for="text_input">Paste text:</label><br>
    <textarea id="text_input" name="text_input"></textarea></p>
    <p><label for="file_input">Or upload a .txt / .pdf file:</label><br>
    <input id="file_input" type="file" name="file_input"></p>
    <p><button type="submit">Summarize</button></p>
  </form>
</body>
</html>
"#
    )
}

/// The result view: the joined per-chunk summaries, preformatted so the
/// newline separators between chunk summaries stay visible.
pub fn result_page(summary: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Precis - Summary</title>
  <style>
    body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}
    pre {{ white-space: pre-wrap; background: #f4f4f4; padding: 1rem; }}
  </style>
</head>
<body>
  <h1>Summary</h1>
  <pre>{}</pre>
  <p><a href="/">Summarize another document</a></p>
</body>
</html>
"#,
        escape_html(summary)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn flash_message_is_rendered_escaped() {
        let page = index_page(Some("bad <input>"));
        assert!(page.contains("bad &lt;input&gt;"));
        assert!(!page.contains("bad <input>"));
    }

    #[test]
    fn form_page_has_both_fields() {
        let page = index_page(None);
        assert!(page.contains(r#"name="text_input""#));
        assert!(page.contains(r#"name="file_input""#));
        assert!(!page.contains("class=\"flash\""));
    }

    #[test]
    fn result_page_shows_summary() {
        let page = result_page("line one\nline two");
        assert!(page.contains("line one\nline two"));
    }
}
