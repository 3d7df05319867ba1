//! HTML pages served by the document routes.
//!
//! Pages are assembled with `format!`. Every piece of user-controlled text
//! (document names, content, usernames, messages) goes through [`escape`].

use std::borrow::Cow;
use std::fmt::Write as _;

use pulldown_cmark_escape::escape_html;

use crate::domain::{DocumentName, FlashKind, FlashMessage};

/// Escape text for inclusion in HTML element content or quoted attributes.
///
/// # Examples
/// ```
/// use cms::inbound::http::pages::escape;
///
/// assert_eq!(escape(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
/// ```
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    match escape_html(&mut out, raw) {
        Ok(()) => out,
        Err(_) => unreachable!("writing to a String cannot fail"),
    }
}

/// Percent-encode a document name for use as a path segment.
fn path_segment(name: &str) -> Cow<'_, str> {
    urlencoding::encode(name)
}

fn flash_block(messages: &[FlashMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let class = match message.kind {
                FlashKind::Error => "flash error",
                FlashKind::Success => "flash success",
            };
            format!(r#"<p class="{class}">{}</p>"#, escape(&message.text))
        })
        .collect()
}

fn layout(title: &str, messages: &[FlashMessage], body: &str) -> String {
    format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>{title}</title></head>\n",
            "<body>\n{flash}\n{body}\n</body>\n",
            "</html>\n"
        ),
        title = escape(title),
        flash = flash_block(messages),
        body = body,
    )
}

/// Document listing with sign-in state.
pub fn index(names: &[DocumentName], username: Option<&str>, messages: &[FlashMessage]) -> String {
    let mut body = String::from("<ul>\n");
    for name in names {
        let href = path_segment(name.as_str());
        let label = escape(name.as_str());
        let _ = writeln!(
            body,
            concat!(
                "<li><a href=\"/{href}\">{label}</a> ",
                "<a href=\"/{href}/edit\">edit</a> ",
                "<form class=\"inline\" method=\"post\" action=\"/{href}/delete\">",
                "<button type=\"submit\">delete</button></form></li>"
            ),
            href = href,
            label = label,
        );
    }
    body.push_str("</ul>\n<p><a href=\"/new\">New Document</a></p>\n");
    match username {
        Some(user) => {
            let _ = write!(
                body,
                concat!(
                    "<form method=\"post\" action=\"/users/signout\">",
                    "<p>Signed in as {user}. <button type=\"submit\">Sign Out</button></p>",
                    "</form>"
                ),
                user = escape(user),
            );
        }
        None => body.push_str("<p><a href=\"/users/signin\">Sign In</a></p>"),
    }
    layout("Documents", messages, &body)
}

/// Form for a new document. `name` pre-fills the field after a rejection.
pub fn new_document(name: &str, messages: &[FlashMessage]) -> String {
    let body = format!(
        concat!(
            "<form method=\"post\" action=\"/create\">\n",
            "<label for=\"file_name\">Add a new document:</label>\n",
            "<input id=\"file_name\" name=\"file_name\" value=\"{name}\">\n",
            "<textarea name=\"content\" rows=\"20\" cols=\"80\"></textarea>\n",
            "<button type=\"submit\">Create</button>\n",
            "</form>"
        ),
        name = escape(name),
    );
    layout("New Document", messages, &body)
}

/// Edit form pre-filled with raw content.
pub fn edit_document(name: &DocumentName, content: &str, messages: &[FlashMessage]) -> String {
    let body = format!(
        concat!(
            "<form method=\"post\" action=\"/{href}\">\n",
            "<label for=\"content\">Edit content of {label}:</label>\n",
            "<textarea id=\"content\" name=\"content\" rows=\"20\" cols=\"80\">{content}</textarea>\n",
            "<button type=\"submit\">Save Changes</button>\n",
            "</form>"
        ),
        href = path_segment(name.as_str()),
        label = escape(name.as_str()),
        content = escape(content),
    );
    layout(&format!("Edit {name}"), messages, &body)
}

/// Sign-in form. `username` pre-fills the field after a failed attempt.
pub fn sign_in(username: &str, messages: &[FlashMessage]) -> String {
    let body = format!(
        concat!(
            "<form method=\"post\" action=\"/users/signin\">\n",
            "<label for=\"username\">Username</label>\n",
            "<input id=\"username\" name=\"username\" value=\"{username}\">\n",
            "<label for=\"password\">Password</label>\n",
            "<input id=\"password\" name=\"password\" type=\"password\">\n",
            "<button type=\"submit\">Sign In</button>\n",
            "</form>"
        ),
        username = escape(username),
    );
    layout("Sign In", messages, &body)
}

/// Page shown for hard failures.
pub fn error_page(message: &str, trace_id: Option<&str>) -> String {
    let mut body = format!("<h1>{}</h1>", escape(message));
    if let Some(id) = trace_id {
        let _ = write!(body, "<p>Trace id: <code>{}</code></p>", escape(id));
    }
    layout("Error", &[], &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn name(raw: &str) -> DocumentName {
        DocumentName::new(raw).expect("valid name")
    }

    #[rstest]
    #[case("a.txt", "a.txt")]
    #[case("my notes.md", "my%20notes.md")]
    #[case("q?.txt", "q%3F.txt")]
    fn path_segments_are_percent_encoded(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(path_segment(raw), expected);
    }

    #[rstest]
    fn sign_in_form_escapes_quoted_username() {
        let page = sign_in(r#""><script>"#, &[]);
        assert!(page.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
        assert!(!page.contains("<script>"));
    }

    #[rstest]
    fn index_escapes_names_and_links_actions() {
        let page = index(&[name("<b>.txt")], None, &[]);
        assert!(page.contains("&lt;b&gt;.txt"));
        assert!(!page.contains("<b>.txt"));
        assert!(page.contains(r#"action="/%3Cb%3E.txt/delete""#));
        assert!(page.contains("/users/signin"));
    }

    #[rstest]
    fn index_shows_signed_in_user_and_messages() {
        let messages = [FlashMessage {
            kind: FlashKind::Success,
            text: "a.txt was created.".to_owned(),
        }];
        let page = index(&[], Some("admin"), &messages);
        assert!(page.contains("Signed in as admin."));
        assert!(page.contains(r#"<p class="flash success">a.txt was created.</p>"#));
    }

    #[rstest]
    fn edit_form_escapes_content() {
        let page = edit_document(&name("a.md"), "</textarea><script>", &[]);
        assert!(page.contains("&lt;/textarea&gt;&lt;script&gt;"));
    }
}
