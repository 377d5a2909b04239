//! HTML helpers for chat bubbles
//!
//! A bubble is the only content inserted as raw HTML, and it only ever
//! comes from `bubble_html`. Everything else goes through text nodes.

use crate::ports::outbound::Bubble;

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape `text`, then turn line breaks into `<br>`.
///
/// The backend sometimes sends the two-character sequence `\n` instead of a
/// newline; both forms break the line.
pub fn message_html(text: &str) -> String {
    escape_html(text)
        .replace("\\n", "<br>")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

/// Markup of one history entry: wrapper, optional sender, body.
pub fn bubble_html(bubble: &Bubble) -> String {
    let sender = if bubble.role.shows_sender() {
        format!(
            "<span class=\"sender-name\">{}</span>",
            escape_html(&bubble.sender)
        )
    } else {
        String::new()
    };
    format!(
        "<div class=\"msg-wrapper {}\">{}<div class=\"bubble\">{}</div></div>",
        bubble.role.css_class(),
        sender,
        message_html(&bubble.text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::BubbleRole;

    fn unescape_html(html: &str) -> String {
        html.replace("&#039;", "'")
            .replace("&quot;", "\"")
            .replace("&gt;", ">")
            .replace("&lt;", "<")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("Под игото"), "Под игото");
    }

    #[test]
    fn test_escape_round_trips() {
        let samples = [
            "",
            "plain",
            "&amp; already escaped",
            "<<>>&&\"\"''",
            "Ирина: \"Ела<br>тук\" & 'стой'",
            "&lt;",
        ];
        for sample in samples {
            let escaped = escape_html(sample);
            assert!(!escaped.contains('<'));
            assert!(!escaped.contains('>'));
            assert_eq!(unescape_html(&escaped), sample);
        }
    }

    #[test]
    fn test_message_html_breaks_lines() {
        assert_eq!(message_html("един\nдва"), "един<br>два");
        assert_eq!(message_html("един\\nдва"), "един<br>два");
        assert_eq!(message_html("един\r\nдва"), "един<br>два");
    }

    #[test]
    fn test_message_html_never_passes_markup_through() {
        let html = message_html("<img src=x onerror=alert(1)>\nнов ред");
        assert_eq!(html, "&lt;img src=x onerror=alert(1)&gt;<br>нов ред");
    }

    #[test]
    fn test_bubble_html_escapes_sender_and_body() {
        let html = bubble_html(&Bubble {
            role: BubbleRole::Character,
            sender: "<b>Ирина</b>".into(),
            text: "Ела & виж\\nтук".into(),
        });
        assert_eq!(
            html,
            "<div class=\"msg-wrapper ai\"><span class=\"sender-name\">&lt;b&gt;Ирина&lt;/b&gt;</span>\
             <div class=\"bubble\">Ела &amp; виж<br>тук</div></div>"
        );
    }

    #[test]
    fn test_bubble_html_hides_sender_of_system_bubbles() {
        let html = bubble_html(&Bubble {
            role: BubbleRole::System,
            sender: "System".into(),
            text: "Глава II".into(),
        });
        assert!(!html.contains("sender-name"));
        assert_eq!(
            html,
            "<div class=\"msg-wrapper system\"><div class=\"bubble\">Глава II</div></div>"
        );
    }
}
