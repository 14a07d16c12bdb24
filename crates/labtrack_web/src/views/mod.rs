//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through [`escape_html`].

pub mod scientist_show;

const APP_TITLE: &str = "LabTrack";

/// Escape HTML entities for safe embedding.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wraps page content in the shared document shell.
///
/// `main` must already be escaped.
pub fn layout(title: &str, main: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{} | {APP_TITLE}</title>\n</head>\n<body>\n<main>\n{main}</main>\n</body>\n</html>\n",
        escape_html(title)
    )
}

pub fn not_found_page(path: &str) -> String {
    layout(
        "Not Found",
        &format!(
            "<h1>Not Found</h1>\n<p>Nothing lives at <code>{}</code>.</p>\n",
            escape_html(path)
        ),
    )
}

pub fn method_not_allowed_page() -> String {
    layout(
        "Method Not Allowed",
        "<h1>Method Not Allowed</h1>\n",
    )
}

pub fn server_error_page() -> String {
    layout(
        "Server Error",
        "<h1>Something went wrong</h1>\n<p>The error has been logged.</p>\n",
    )
}

#[cfg(test)]
mod tests {
    use super::{escape_html, not_found_page};

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn not_found_page_escapes_path() {
        let page = not_found_page("/<script>");
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
