use super::{escape, layout, note, table};
use crate::pages::injuries::{InjuriesView, PlayerCard};

pub fn page(view: &InjuriesView) -> String {
    let mut body = String::from("<h1>Injury Report</h1>\n");
    body.push_str(&format!(
        "<p>Season {} · scanned the top {} players by ADP (up to {} results) · found {} in {:.2}s</p>\n",
        escape(&view.season),
        view.scan_limit,
        view.max_results,
        view.found(),
        view.elapsed_secs
    ));

    body.push_str(&format!(
        "<form method=\"get\" action=\"/injuries\">\n\
         <label>Player <input type=\"text\" name=\"player\" value=\"{}\" placeholder=\"e.g. Travis Kelce\"></label>\n\
         <button type=\"submit\">Look up</button>\n</form>\n",
        escape(&view.query)
    ));

    if let Some(card) = &view.card {
        body.push_str(&player_card(card));
    }
    if let Some(message) = &view.card_message {
        body.push_str(&note(message));
    }

    if view.notes.is_empty() {
        body.push_str("<p>No injury descriptions found in the scanned range.</p>\n");
    } else {
        let rows: Vec<Vec<String>> = view
            .notes
            .iter()
            .map(|n| {
                vec![
                    format!(
                        "<a href=\"/injuries?player={}\">{}</a>",
                        urlencoding::encode(&n.player),
                        escape(&n.player)
                    ),
                    escape(&n.blurb),
                    n.status.as_deref().map(escape).unwrap_or_default(),
                ]
            })
            .collect();
        body.push_str(&table(&["Player", "Injury", "Status"], &rows));
    }

    layout("Injuries", "/injuries", &body)
}

fn player_card(card: &PlayerCard) -> String {
    let photo = card
        .headshot
        .as_deref()
        .map(|src| format!("<img src=\"{}\" width=\"90\" alt=\"\">", escape(src)))
        .unwrap_or_default();

    let mut title = format!("<strong>{}</strong>", escape(&card.name));
    if let Some(position) = &card.position {
        title.push_str(&format!(" \u{2014} {}", escape(position)));
    }
    if let Some(jersey) = &card.jersey {
        title.push_str(&format!(" #{}", escape(jersey)));
    }

    let team = match (&card.team_name, &card.team_abv) {
        (Some(name), Some(abv)) => format!("{} ({})", escape(name), escape(abv)),
        (None, Some(abv)) => escape(abv),
        _ => String::new(),
    };

    format!(
        "<div class=\"card\">\n{photo}\n<div>\n<div>{title}</div>\n<div>{team}</div>\n\
         <div><em>{}</em></div>\n</div>\n</div>\n",
        escape(&card.injury)
    )
}
