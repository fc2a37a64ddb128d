//! HTML rendering
//!
//! Pure functions from view models to HTML strings. Every string that came
//! from the upstream goes through [`escape`] before it is written out.

use warp::http::StatusCode;

pub mod injuries;
pub mod news;
pub mod projections;
pub mod schedule;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0 2rem 2rem}\
nav{display:flex;gap:1rem;padding:1rem 0;border-bottom:1px solid #ddd;margin-bottom:1rem}\
nav a{text-decoration:none;color:#1a4d8f}nav a.active{font-weight:bold}\
table{border-collapse:collapse;margin:.5rem 0 1.5rem}\
th,td{border:1px solid #ddd;padding:.3rem .6rem;text-align:left}th{background:#f4f4f4}\
.note{background:#fff8e1;border:1px solid #f0d98c;padding:.5rem .8rem;margin:.5rem 0}\
.error{background:#fdecea;border:1px solid #f5b7b1;padding:.8rem 1rem}\
.card{display:flex;align-items:center;gap:10px;padding:10px;border:1px solid #ddd;border-radius:8px}\
.card img{border-radius:6px}form{margin:.5rem 0 1rem}";

const NAV: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/projections", "Projections"),
    ("/injuries", "Injuries"),
    ("/schedule", "Schedule"),
    ("/news", "News"),
];

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Full page with the shared navigation; `body` must already be HTML
pub fn layout(title: &str, active: &str, body: &str) -> String {
    let mut nav = String::new();
    for (href, label) in NAV {
        let class = if href == active { " class=\"active\"" } else { "" };
        nav.push_str(&format!("<a href=\"{href}\"{class}>{label}</a>"));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} · Gridiron</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav>{nav}</nav>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Table from header labels and rows of already-rendered cells
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table>\n<thead><tr>");
    for header in headers {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn note(text: &str) -> String {
    format!("<div class=\"note\">{}</div>\n", escape(text))
}

/// Number cell; absent values render empty
pub fn number(value: Option<f64>) -> String {
    value.map(|v| format!("{v}")).unwrap_or_default()
}

/// Signed line such as `+3.5` or `-140`
pub fn signed(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{v}"),
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}

/// Page shown when a page's primary data could not be loaded
pub fn error_page(title: &str, active: &str, status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<div class=\"error\"><p>{}</p><p><small>HTTP {}</small></p></div>\n",
        escape(title),
        escape(message),
        status.as_u16()
    );
    layout(title, active, &body)
}

pub fn not_found_page() -> String {
    layout(
        "Not found",
        "",
        "<h1>Not found</h1>\n<p>That page does not exist. Try one of the links above.</p>\n",
    )
}
