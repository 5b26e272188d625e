//! HTML surfaces served by the gate.
//!
//! Plain `format!` templates; no template engine. Everything interpolated
//! into markup goes through [`escape_html`], and values embedded in script
//! blocks are serialized as JSON string literals.

const STYLE: &str = "body{font-family:system-ui,sans-serif;background:#121212;color:#fff;\
display:flex;flex-direction:column;align-items:center;justify-content:center;\
min-height:100vh;margin:0;text-align:center}a,button{background:#1db954;color:#fff;\
border:none;border-radius:24px;padding:12px 32px;font-size:1rem;text-decoration:none;\
cursor:pointer}p.error{color:#e57373}img{border-radius:50%;width:160px;height:160px;\
object-fit:cover;margin-bottom:16px}";

/// Minimal HTML escaping for text and attribute positions.
pub(crate) fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title><style>{STYLE}</style></head><body>{body}</body></html>",
        title = escape_html(title),
    )
}

/// Landing page, with an optional error banner from redirect query tags.
#[must_use]
pub fn home(error: Option<&str>, details: Option<&str>) -> String {
    let banner = match error {
        Some(tag) => {
            let details = details.unwrap_or("please try again");
            format!(
                "<p class=\"error\">Something went wrong ({}): {}</p>",
                escape_html(tag),
                escape_html(details),
            )
        }
        None => String::new(),
    };

    page(
        "seguimi",
        &format!(
            "<h1>One quick step</h1>\
<p>Log in with your music account to continue.</p>{banner}\
<a href=\"/login\">Log in</a>"
        ),
    )
}

/// The "please follow" interaction surface.
///
/// The bearer token is embedded for the follow action only; it lives as
/// long as this page and is never sent anywhere but `/follow`.
#[must_use]
pub fn follow(
    artist_name: &str,
    artist_image_url: Option<&str>,
    access_token: &str,
    success_url: Option<&str>,
) -> String {
    let image = match artist_image_url {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(url),
            escape_html(artist_name),
        ),
        None => String::new(),
    };

    // JSON string literals are valid JS string literals; this keeps quotes
    // and backslashes in tokens or URLs from breaking out of the script.
    let token_literal = serde_json::to_string(access_token).unwrap_or_else(|_| "\"\"".to_string());
    let success_literal =
        serde_json::to_string(success_url.unwrap_or("")).unwrap_or_else(|_| "\"\"".to_string());

    let body = format!(
        "{image}<h1>Follow {name} to continue</h1>\
<p id=\"status\">You are not following yet.</p>\
<button id=\"follow\" onclick=\"followNow()\">Follow Now</button>\
<script>\
const ACCESS_TOKEN = {token_literal};\
const SUCCESS_URL = {success_literal};\
async function followNow() {{\
  const status = document.getElementById('status');\
  status.textContent = 'Following…';\
  try {{\
    const res = await fetch('/follow?access_token=' + encodeURIComponent(ACCESS_TOKEN));\
    const body = await res.json();\
    if (res.ok && body.success) {{\
      if (SUCCESS_URL) {{ window.location = SUCCESS_URL; }}\
      else {{ status.textContent = 'You are in. Thanks for following!'; }}\
    }} else {{\
      status.textContent = (body.details || body.error || 'Something went wrong') + '. Tap to retry.';\
    }}\
  }} catch (err) {{\
    status.textContent = 'Network error. Tap to retry.';\
  }}\
}}\
</script>",
        name = escape_html(artist_name),
    );

    page("Follow to continue", &body)
}

/// Inline success surface, used when no success URL is configured.
#[must_use]
pub fn success() -> String {
    page(
        "Welcome",
        "<h1>You are in</h1><p>Thanks for following. Enjoy.</p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a \"b\" & c"), "a &quot;b&quot; &amp; c");
    }

    #[test]
    fn home_reflects_error_tags_escaped() {
        let html = home(Some("state_mismatch"), Some("<b>oops</b>"));
        assert!(html.contains("state_mismatch"));
        assert!(html.contains("&lt;b&gt;oops&lt;/b&gt;"));
        assert!(!html.contains("<b>oops</b>"));
    }

    #[test]
    fn home_without_error_has_no_banner() {
        let html = home(None, None);
        assert!(!html.contains("class=\"error\""));
        assert!(html.contains("/login"));
    }

    #[test]
    fn follow_page_embeds_token_as_js_literal() {
        let html = follow("Laura Pausini", None, "BQ\"token", None);
        assert!(html.contains("Laura Pausini"));
        assert!(html.contains("\"BQ\\\"token\""));
        assert!(!html.contains("BQ\"token\";"));
    }

    #[test]
    fn follow_page_shows_artist_image_when_present() {
        let html = follow("Artist", Some("https://img.test/a.jpg"), "token", None);
        assert!(html.contains("img src=\"https://img.test/a.jpg\""));
    }

    #[test]
    fn success_page_renders() {
        assert!(success().contains("You are in"));
    }
}
