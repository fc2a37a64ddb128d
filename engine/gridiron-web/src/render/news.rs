use super::{escape, layout, note, table};
use crate::pages::news::NewsView;

pub fn page(view: &NewsView) -> String {
    let mut body = String::from("<h1>NFL News</h1>\n");
    body.push_str(&format!(
        "<form method=\"get\" action=\"/news\">\n\
         <label>Search headlines <input type=\"text\" name=\"q\" value=\"{}\"></label>\n\
         <button type=\"submit\">Search</button>\n</form>\n",
        escape(&view.query)
    ));

    if let Some(message) = &view.note {
        body.push_str(&note(message));
    }

    if !view.items.is_empty() {
        let rows: Vec<Vec<String>> = view
            .items
            .iter()
            .map(|item| {
                vec![
                    format!(
                        "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                        escape(&item.link),
                        escape(&item.headline)
                    ),
                    escape(&item.source),
                    item.published.map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        body.push_str(&table(&["Headline", "Source", "Published"], &rows));
    } else if view.note.is_none() {
        body.push_str("<p>No headlines right now.</p>\n");
    }

    layout("News", "/news", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tank01_client::NewsItem;

    #[test]
    fn test_headlines_link_out() {
        let view = NewsView {
            query: String::new(),
            items: vec![NewsItem {
                headline: "Bills & Allen agree".to_string(),
                link: "https://espn.com/story?id=1&x=2".to_string(),
                source: "espn.com".to_string(),
                player_ids: Vec::new(),
                published: None,
            }],
            note: None,
        };
        let html = page(&view);
        assert!(html.contains("href=\"https://espn.com/story?id=1&amp;x=2\""));
        assert!(html.contains(">Bills &amp; Allen agree</a>"));
        assert!(html.contains("<td>espn.com</td>"));
    }

    #[test]
    fn test_no_match_note() {
        let view = NewsView {
            query: "Brady".to_string(),
            items: Vec::new(),
            note: Some("Sorry \u{2014} couldn't find \u{201c}Brady\u{201d}.".to_string()),
        };
        let html = page(&view);
        assert!(html.contains("couldn&#39;t find \u{201c}Brady\u{201d}"));
        assert!(html.contains("value=\"Brady\""));
        assert!(!html.contains("No headlines right now."));
    }
}
