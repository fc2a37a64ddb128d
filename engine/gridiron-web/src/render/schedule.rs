use super::{escape, layout, note, number, signed, table};
use crate::pages::schedule::ScheduleView;
use crate::pages::MAX_WEEK;

pub fn page(view: &ScheduleView) -> String {
    let mut body = format!(
        "<h1>Schedule &amp; Odds</h1>\n<p>Season {} · Week {}</p>\n",
        escape(&view.season),
        view.week
    );

    let options: String = (1..=MAX_WEEK)
        .map(|week| {
            let selected = if week == view.week { " selected" } else { "" };
            format!("<option value=\"{week}\"{selected}>Week {week}</option>")
        })
        .collect();
    body.push_str(&format!(
        "<form method=\"get\" action=\"/schedule\">\n<select name=\"week\">{options}</select>\n\
         <button type=\"submit\">Show</button>\n</form>\n"
    ));

    if view.rows.is_empty() {
        body.push_str("<p>No games found for that week.</p>\n");
        return layout("Schedule", "/schedule", &body);
    }

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            let odds = row.game.odds.as_ref();
            vec![
                escape(&row.date),
                escape(row.game.time.as_deref().unwrap_or_default()),
                escape(&row.game.away),
                escape(&row.game.home),
                signed(odds.and_then(|o| o.home_spread)),
                number(odds.and_then(|o| o.total)),
                signed(odds.and_then(|o| o.away_moneyline)),
                signed(odds.and_then(|o| o.home_moneyline)),
                number(odds.and_then(|o| o.implied_away)),
                number(odds.and_then(|o| o.implied_home)),
                row.note.as_deref().map(escape).unwrap_or_default(),
            ]
        })
        .collect();
    body.push_str(&table(
        &[
            "Date",
            "Time",
            "Away",
            "Home",
            "Spread (Home)",
            "Total (O/U)",
            "ML Away",
            "ML Home",
            "Imp Away",
            "Imp Home",
            "Note",
        ],
        &rows,
    ));

    if let Some(missing) = &view.missing_note {
        body.push_str(&note(missing));
    }

    layout("Schedule", "/schedule", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::schedule::{ScheduleRow, ODDS_PENDING_NOTE};
    use tank01_client::{Game, Odds};

    fn create_test_row(odds: Option<Odds>, note: Option<&str>) -> ScheduleRow {
        ScheduleRow {
            game: Game {
                id: Some("20250907_SF@SEA".to_string()),
                week: Some(1),
                home: "SEA".to_string(),
                away: "SF".to_string(),
                date: Some("20250907".to_string()),
                time: Some("4:05p".to_string()),
                odds,
            },
            date: "2025-09-07 (Sun)".to_string(),
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn test_rows_show_odds_or_note() {
        let odds = Odds { home_spread: Some(-2.5), total: Some(45.5), away_moneyline: Some(120.0), ..Odds::default() };
        let view = ScheduleView {
            season: "2025".to_string(),
            week: 1,
            rows: vec![create_test_row(Some(odds), None), create_test_row(None, Some(ODDS_PENDING_NOTE))],
            missing_note: Some("Note: Betting odds aren't posted yet for: 2025-09-08 (Mon).".to_string()),
        };
        let html = page(&view);
        assert!(html.contains("<td>-2.5</td><td>45.5</td><td>+120</td>"));
        assert!(html.contains(ODDS_PENDING_NOTE));
        assert!(html.contains("aren&#39;t posted yet"));
        assert!(html.contains("<option value=\"1\" selected>Week 1</option>"));
    }

    #[test]
    fn test_empty_week() {
        let view = ScheduleView { season: "2025".to_string(), week: 9, rows: Vec::new(), missing_note: None };
        let html = page(&view);
        assert!(html.contains("No games found for that week."));
        assert!(!html.contains("<table>"));
    }
}
