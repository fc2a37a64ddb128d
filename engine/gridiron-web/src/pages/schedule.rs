//! Schedule page: one week of games joined with betting odds

use std::collections::{BTreeMap, BTreeSet};
use tank01_client::endpoints;
use tank01_client::normalize::format_game_date;
use tank01_client::{Game, Odds, Upstream};
use tracing::{info, warn};

use super::{param_u32, Query, MAX_WEEK};
use crate::config::PagesConfig;
use crate::error::PageResult;

/// Row note when a game has no usable line
pub const ODDS_PENDING_NOTE: &str = "Betting odds not yet released.";

/// Row note when the odds feed returned nothing for the game's date
pub const DATE_PENDING_NOTE: &str = "Betting odds not yet released for this date.";

/// Row note when the odds call for the game's date failed
pub const ODDS_UNAVAILABLE_NOTE: &str = "Betting odds unavailable right now.";

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub game: Game,
    /// `YYYY-MM-DD (Ddd)`, empty when the feed has no date
    pub date: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScheduleView {
    pub season: String,
    pub week: u32,
    pub rows: Vec<ScheduleRow>,
    /// Summary of the dates whose odds are not posted yet
    pub missing_note: Option<String>,
}

/// `week` query value; missing or unparsable gives 1, otherwise clamped to the season
pub fn week_from_query(query: &Query) -> u32 {
    param_u32(query, "week", 1).clamp(1, MAX_WEEK)
}

pub async fn build(upstream: &dyn Upstream, config: &PagesConfig, week: u32) -> PageResult<ScheduleView> {
    let season = config.season.clone();
    let games = endpoints::games_for_week(upstream, &season, week).await?;
    info!("Week {} has {} games", week, games.len());

    if games.is_empty() {
        return Ok(ScheduleView { season, week, rows: Vec::new(), missing_note: None });
    }

    let dates: BTreeSet<String> = games.iter().filter_map(|g| g.date.clone()).collect();
    let mut posted: Vec<Odds> = Vec::new();
    let mut date_notes: BTreeMap<String, &'static str> = BTreeMap::new();

    for date in &dates {
        match endpoints::betting_odds(upstream, date).await {
            Ok(odds) if odds.is_empty() => {
                date_notes.insert(date.clone(), DATE_PENDING_NOTE);
            }
            Ok(odds) => posted.extend(odds),
            Err(e) => {
                warn!("Betting odds for {} unavailable: {}", date, e);
                date_notes.insert(date.clone(), ODDS_UNAVAILABLE_NOTE);
            }
        }
    }

    let mut rows: Vec<ScheduleRow> = games
        .into_iter()
        .map(|mut game| {
            game.odds = match_odds(&game, &posted).filter(|odds| !odds.is_empty()).cloned();
            let note = match &game.odds {
                Some(_) => None,
                None => Some(
                    game.date
                        .as_ref()
                        .and_then(|date| date_notes.get(date))
                        .copied()
                        .unwrap_or(ODDS_PENDING_NOTE)
                        .to_string(),
                ),
            };
            ScheduleRow { date: game.display_date(), game, note }
        })
        .collect();

    // undated games sort last
    rows.sort_by(|a, b| {
        (a.game.date.is_none(), &a.game.date, &a.game.time)
            .cmp(&(b.game.date.is_none(), &b.game.date, &b.game.time))
    });

    let pending: Vec<String> = date_notes
        .iter()
        .filter(|(_, note)| **note == DATE_PENDING_NOTE)
        .map(|(date, _)| format_game_date(date))
        .collect();
    let missing_note = (!pending.is_empty()).then(|| {
        format!(
            "Note: Betting odds aren't posted yet for: {}. They often appear closer to game week.",
            pending.join(", ")
        )
    });

    Ok(ScheduleView { season, week, rows, missing_note })
}

/// Odds for a game: by game id first, then by date and both teams
pub fn match_odds<'a>(game: &Game, odds: &'a [Odds]) -> Option<&'a Odds> {
    if let Some(id) = &game.id {
        if let Some(found) = odds.iter().find(|o| o.game_id.as_ref() == Some(id)) {
            return Some(found);
        }
    }
    odds.iter().find(|o| {
        game.date.is_some()
            && o.date == game.date
            && o.away.as_deref() == Some(game.away.as_str())
            && o.home.as_deref() == Some(game.home.as_str())
    })
}
