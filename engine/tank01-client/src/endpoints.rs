//! Typed helpers for the Tank01 endpoints the pages use
//!
//! Each helper issues exactly one request unless stated otherwise and
//! returns normalized models. Errors are passed through untouched so the
//! caller decides whether the data was primary or enrichment.

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::client::Upstream;
use crate::error::UpstreamError;
use crate::models::*;
use crate::normalize::{self, body_list, body_object, canonical_team, pick_team};

/// Opponent and home/away flag per canonical team for one week
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekMatchups {
    pub opponent: HashMap<String, String>,
    pub home: HashMap<String, bool>,
}

impl WeekMatchups {
    pub fn is_empty(&self) -> bool {
        self.opponent.is_empty()
    }
}

/// Projections for one week, split the way the upstream returns them
#[derive(Debug, Clone, Default)]
pub struct WeekProjections {
    pub players: HashMap<String, Value>,
    pub team_defense: Vec<Value>,
}

impl WeekProjections {
    pub fn player_points(&self, player_id: &str, scoring: Scoring) -> Option<f64> {
        self.players
            .get(player_id)
            .and_then(|entry| normalize::fantasy_points(entry, scoring.as_param()))
    }

    pub fn defense_points(&self, team_abv: &str, scoring: Scoring) -> Option<f64> {
        self.team_defense
            .iter()
            .find(|entry| pick_team(entry, &["teamAbv"]).as_deref() == Some(team_abv))
            .and_then(|entry| normalize::fantasy_points(entry, scoring.as_param()))
    }
}

/// ADP list for a season, in upstream order
pub async fn adp(
    upstream: &dyn Upstream,
    season: &str,
    scoring: Scoring,
) -> Result<Vec<AdpEntry>, UpstreamError> {
    let raw = upstream
        .get(
            "getNFLADP",
            &[("season", season.to_string()), ("adpType", scoring.as_param().to_string())],
        )
        .await?;
    let entries: Vec<AdpEntry> =
        body_list(&raw, Some("adpList")).iter().filter_map(AdpEntry::from_value).collect();
    debug!("Parsed {} ADP entries for {}", entries.len(), season);
    Ok(entries)
}

/// All NFL teams
pub async fn teams(upstream: &dyn Upstream) -> Result<Vec<Team>, UpstreamError> {
    let raw = upstream.get("getNFLTeams", &[("teamStats", "false".to_string())]).await?;
    Ok(body_list(&raw, Some("teams")).iter().filter_map(Team::from_value).collect())
}

/// Regular-season games for a week
pub async fn games_for_week(
    upstream: &dyn Upstream,
    season: &str,
    week: u32,
) -> Result<Vec<Game>, UpstreamError> {
    let raw = upstream
        .get(
            "getNFLGamesForWeek",
            &[
                ("season", season.to_string()),
                ("week", week.to_string()),
                ("seasonType", "reg".to_string()),
            ],
        )
        .await?;
    Ok(game_list(&raw).iter().filter_map(Game::from_value).collect())
}

fn game_list(raw: &Value) -> Vec<Value> {
    let list = body_list(raw, Some("games"));
    if list.is_empty() {
        body_list(raw, Some("weeklySchedule"))
    } else {
        list
    }
}

/// Opponent map for a week.
///
/// Tries the weekly schedule, the games-for-week and the scoreboard
/// endpoints in that order; the first one that yields games wins. Failures
/// of individual endpoints are skipped, so the result may be empty.
pub async fn weekly_matchups(upstream: &dyn Upstream, season: &str, week: u32) -> WeekMatchups {
    let params = [("season", season.to_string()), ("week", week.to_string())];
    let mut matchups = WeekMatchups::default();

    for endpoint in ["getNFLWeeklySchedule", "getNFLGamesForWeek", "getNFLScoreboard"] {
        let raw = match upstream.get(endpoint, &params).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping {} for week {} matchups: {}", endpoint, week, e);
                continue;
            }
        };

        // every spelling of a team resolves to its canonical opponent
        for game in game_list(&raw).iter().filter_map(Game::from_value) {
            for alias in normalize::team_aliases(&game.home) {
                matchups.opponent.insert(alias.clone(), game.away.clone());
                matchups.home.insert(alias, true);
            }
            for alias in normalize::team_aliases(&game.away) {
                matchups.opponent.insert(alias.clone(), game.home.clone());
                matchups.home.insert(alias, false);
            }
        }

        if !matchups.is_empty() {
            break;
        }
    }

    matchups
}

/// Betting odds posted for a game date (`YYYYMMDD`)
pub async fn betting_odds(upstream: &dyn Upstream, date: &str) -> Result<Vec<Odds>, UpstreamError> {
    let raw = upstream
        .get(
            "getNFLBettingOdds",
            &[
                ("gameDate", date.to_string()),
                ("itemFormat", "list".to_string()),
                ("impliedTotals", "true".to_string()),
            ],
        )
        .await?;
    Ok(body_list(&raw, None)
        .iter()
        .filter_map(Odds::from_value)
        .map(|mut odds| {
            odds.date.get_or_insert_with(|| date.to_string());
            odds
        })
        .collect())
}

/// Scoring weights sent along with a projections request
pub fn scoring_params(scoring: Scoring) -> Vec<(&'static str, String)> {
    vec![
        ("pointsPerReception", scoring.points_per_reception().to_string()),
        ("twoPointConversions", "2".to_string()),
        ("passYards", "0.04".to_string()),
        ("passTD", "4".to_string()),
        ("passCompletions", "1".to_string()),
        ("passInterceptions", "-2".to_string()),
        ("rushYards", "0.1".to_string()),
        ("rushTD", "6".to_string()),
        ("receivingYards", "0.1".to_string()),
        ("receivingTD", "6".to_string()),
        ("fumbles", "-2".to_string()),
        ("fgMade", "3".to_string()),
        ("fgMissed", "-1".to_string()),
        ("xpMade", "1".to_string()),
        ("xpMissed", "-1".to_string()),
    ]
}

/// Weekly projections for every player and team defense
pub async fn projections(
    upstream: &dyn Upstream,
    season: &str,
    week: u32,
    scoring: Scoring,
) -> Result<WeekProjections, UpstreamError> {
    let mut params = vec![("week", week.to_string()), ("archiveSeason", season.to_string())];
    params.extend(scoring_params(scoring));

    let raw = upstream.get("getNFLProjections", &params).await?;
    let Some(body) = body_object(&raw) else {
        return Ok(WeekProjections::default());
    };

    let players = match body.get("playerProjections") {
        Some(Value::Object(by_id)) => by_id.iter().map(|(id, v)| (id.clone(), v.clone())).collect(),
        _ => HashMap::new(),
    };
    let team_defense = match body.get("teamDefenseProjections") {
        Some(Value::Object(by_id)) => by_id.values().filter(|v| v.is_object()).cloned().collect(),
        Some(Value::Array(list)) => list.clone(),
        _ => Vec::new(),
    };

    Ok(WeekProjections { players, team_defense })
}

/// Look up a player by name, trying each slug candidate in turn.
///
/// Returns `Ok(None)` when no candidate matched. Upstream errors on one
/// candidate are remembered and returned only if no candidate succeeded.
pub async fn player_profile(
    upstream: &dyn Upstream,
    name: &str,
) -> Result<Option<PlayerProfile>, UpstreamError> {
    let mut last_error = None;

    for slug in normalize::slug_candidates(name) {
        let params = [("playerName", slug.clone()), ("getStats", "false".to_string())];
        match upstream.get("getNFLPlayerInfo", &params).await {
            Ok(raw) => {
                if let Some(profile) =
                    body_list(&raw, None).first().and_then(PlayerProfile::from_value)
                {
                    return Ok(Some(profile));
                }
                last_error = None;
            }
            Err(e) => {
                debug!("Profile lookup for slug {} failed: {}", slug, e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(e),
        None => Ok(None),
    }
}

/// League news headlines
pub async fn news(
    upstream: &dyn Upstream,
    max_items: usize,
    fantasy_only: bool,
) -> Result<Vec<NewsItem>, UpstreamError> {
    let mut params = vec![("maxItems", max_items.to_string())];
    if fantasy_only {
        params.push(("fantasyNews", "true".to_string()));
    }
    let raw = upstream.get("getNFLNews", &params).await?;
    Ok(body_list(&raw, None).iter().filter_map(NewsItem::from_value).collect())
}

/// Canonical abbreviation -> display name
pub fn team_names(teams: &[Team]) -> HashMap<String, String> {
    teams.iter().map(|t| (canonical_team(&t.abv), t.name.clone())).collect()
}

/// Team abbreviation for a defense listed as "<Team Name> DST"
pub fn defense_team(name: &str, teams: &[Team]) -> Option<String> {
    if !name.to_lowercase().contains("dst") {
        return None;
    }
    let base = name.replace(" DST", "").trim().to_string();
    if let Some(team) = teams.iter().find(|t| t.name == base) {
        return Some(team.abv.clone());
    }
    let nick = base.split_whitespace().last()?.to_lowercase();
    teams.iter().find(|t| t.nickname() == nick).map(|t| t.abv.clone())
}
