use tank01_client::Scoring;

use super::{escape, layout, note, table};
use crate::pages::projections::{ProjectionRow, ProjectionsView, MAX_TEAMS, MIN_TEAMS};
use crate::pages::MAX_WEEK;

pub fn page(view: &ProjectionsView, active: &str) -> String {
    let q = &view.query;
    let mut body = format!(
        "<h1>Fantasy Projections</h1>\n<p>Season {} · {} teams · {} scoring</p>\n",
        escape(&view.season),
        q.teams,
        q.scoring.as_param()
    );
    body.push_str(&controls(view, active));

    for text in &view.notes {
        body.push_str(&note(text));
    }

    body.push_str(&format!("<h2>Top {} by ADP</h2>\n", view.adp_board.len()));
    let adp_rows: Vec<Vec<String>> = view
        .adp_board
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            vec![
                (i + 1).to_string(),
                escape(&entry.name),
                entry.position.to_string(),
                format!("{:.1}", entry.adp),
            ]
        })
        .collect();
    body.push_str(&table(&["#", "Player", "Pos", "ADP"], &adp_rows));

    body.push_str("<h2>Draft Log</h2>\n");
    let pick_rows: Vec<Vec<String>> = view
        .picks
        .iter()
        .map(|pick| {
            vec![
                pick.round.to_string(),
                pick.number.to_string(),
                pick.team.to_string(),
                pick.player.position.to_string(),
                escape(&pick.player.name),
            ]
        })
        .collect();
    body.push_str(&table(&["Round", "Pick#", "Team", "Pos", "Player"], &pick_rows));

    body.push_str(&format!("<h2>Team {} Roster</h2>\n", q.slot));
    let roster_rows: Vec<Vec<String>> = view
        .roster
        .iter()
        .map(|row| {
            let photo = row
                .headshot
                .as_deref()
                .map(|src| format!("<img src=\"{}\" width=\"48\" alt=\"\">", escape(src)))
                .unwrap_or_default();
            vec![
                row.pick.to_string(),
                row.position.to_string(),
                escape(&row.name),
                escape(&row.nfl_team),
                photo,
                format!("{:.1}", row.adp),
            ]
        })
        .collect();
    body.push_str(&table(
        &["#", "Pos", "Name", "NFL Team", "Photo", "ADP (Average Draft Pick)"],
        &roster_rows,
    ));

    body.push_str(&format!("<h2>Week {} \u{2014} Projections</h2>\n", q.week));
    body.push_str(&projection_table(&view.projections));

    body.push_str("<h2>Starters</h2>\n");
    body.push_str(&projection_table(&view.starters));

    body.push_str("<h2>Totals</h2>\n");
    body.push_str(&table(
        &["Group", "ProjPts"],
        &[
            vec![format!("Team {} Roster Total", q.slot), format!("{:.2}", view.roster_total)],
            vec![format!("Team {} Starters Total", q.slot), format!("{:.2}", view.starters_total)],
        ],
    ));

    layout("Projections", active, &body)
}

fn projection_table(rows: &[ProjectionRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                escape(&row.name),
                row.position.to_string(),
                escape(&row.nfl_team),
                escape(&row.opponent),
                format!("{:.2}", row.points),
            ]
        })
        .collect();
    table(&["Player", "Pos", "NFL Team", "Opp", "ProjPts"], &cells)
}

fn controls(view: &ProjectionsView, action: &str) -> String {
    let q = &view.query;
    let scoring_options: String = [Scoring::Standard, Scoring::Ppr, Scoring::HalfPpr]
        .iter()
        .map(|scoring| {
            let selected = if *scoring == q.scoring { " selected" } else { "" };
            format!("<option value=\"{0}\"{selected}>{0}</option>", scoring.as_param())
        })
        .collect();

    format!(
        "<form method=\"get\" action=\"{action}\">\n\
         <label>Teams <input type=\"number\" name=\"teams\" min=\"{MIN_TEAMS}\" max=\"{MAX_TEAMS}\" value=\"{teams}\"></label>\n\
         <label>Slot <input type=\"number\" name=\"slot\" min=\"1\" max=\"{teams}\" value=\"{slot}\"></label>\n\
         <label>Week <input type=\"number\" name=\"week\" min=\"1\" max=\"{MAX_WEEK}\" value=\"{week}\"></label>\n\
         <label>Scoring <select name=\"scoring\">{scoring_options}</select></label>\n\
         <button type=\"submit\">Update</button>\n</form>\n",
        teams = q.teams,
        slot = q.slot,
        week = q.week,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::projections::{ProjectionsQuery, RosterRow};
    use tank01_client::Position;

    fn create_test_view() -> ProjectionsView {
        let query = ProjectionsQuery { teams: 8, slot: 2, week: 4, scoring: Scoring::Ppr };
        ProjectionsView {
            query,
            season: "2025".to_string(),
            adp_board: Vec::new(),
            picks: Vec::new(),
            roster: vec![RosterRow {
                pick: 1,
                position: Position::WR,
                name: "Ja'Marr Chase".to_string(),
                nfl_team: "Cincinnati Bengals".to_string(),
                headshot: Some("https://a.espncdn.com/chase.png".to_string()),
                adp: 2.0,
            }],
            projections: vec![ProjectionRow {
                name: "Ja'Marr Chase".to_string(),
                position: Position::WR,
                nfl_team: "Cincinnati Bengals".to_string(),
                opponent: "vs Cleveland Browns".to_string(),
                points: 17.456,
            }],
            starters: Vec::new(),
            roster_total: 17.46,
            starters_total: 17.46,
            notes: vec!["Projections unavailable right now; points shown as 0.".to_string()],
        }
    }

    #[test]
    fn test_page_reflects_query() {
        let html = page(&create_test_view(), "/projections");
        assert!(html.contains("Week 4 \u{2014} Projections"));
        assert!(html.contains("Team 2 Roster Total"));
        assert!(html.contains("Team 2 Starters Total"));
        assert!(html.contains("<option value=\"PPR\" selected>PPR</option>"));
        assert!(html.contains("name=\"teams\" min=\"2\" max=\"16\" value=\"8\""));
    }

    #[test]
    fn test_rows_escaped_and_formatted() {
        let html = page(&create_test_view(), "/");
        assert!(html.contains("Ja&#39;Marr Chase"));
        assert!(html.contains("<img src=\"https://a.espncdn.com/chase.png\" width=\"48\" alt=\"\">"));
        assert!(html.contains("<td>17.46</td>"));
        assert!(html.contains("<td>2.0</td>"));
        assert!(html.contains("class=\"note\""));
    }
}
