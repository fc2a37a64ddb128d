//! Canonical team codes and field names
//!
//! The Tank01 feed is not consistent about either: the same team can come
//! back as `JAC` or `JAX`, and a game's home team may live under `home`,
//! `homeTeam`, `homeTeamAbv` or `teamHomeAbv` depending on the endpoint.
//! Everything here is a pure lookup against fixed tables.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Alias -> canonical team abbreviation
pub const TEAM_ALIASES: &[(&str, &str)] = &[
    ("JAC", "JAX"),
    ("WAS", "WSH"),
    ("SFO", "SF"),
    ("TAM", "TB"),
    ("NOR", "NO"),
    ("LA", "LAR"),
    ("OAK", "LV"),
    ("STL", "LAR"),
    ("SD", "LAC"),
];

pub const GAME_ID_FIELDS: &[&str] = &["gameID", "gameId", "game_id", "id"];
pub const HOME_TEAM_FIELDS: &[&str] =
    &["home", "homeTeam", "homeTeamAbv", "homeTeamAbbr", "teamHomeAbv"];
pub const AWAY_TEAM_FIELDS: &[&str] =
    &["away", "awayTeam", "awayTeamAbv", "awayTeamAbbr", "teamAwayAbv"];
pub const GAME_DATE_FIELDS: &[&str] = &["gameDate", "date"];
pub const GAME_TIME_FIELDS: &[&str] = &["gameTime", "time"];
pub const GAME_WEEK_FIELDS: &[&str] = &["gameWeek", "week"];

pub const TOTAL_FIELDS: &[&str] = &["overUnder", "total", "ou"];
pub const HOME_SPREAD_FIELDS: &[&str] = &["homeSpread", "spreadHome", "spread"];
pub const HOME_MONEYLINE_FIELDS: &[&str] = &["homeMoneyline", "mlHome", "moneylineHome"];
pub const AWAY_MONEYLINE_FIELDS: &[&str] = &["awayMoneyline", "mlAway", "moneylineAway"];
pub const IMPLIED_HOME_FIELDS: &[&str] = &["home", "homeImplied"];
pub const IMPLIED_AWAY_FIELDS: &[&str] = &["away", "awayImplied"];

pub const TEAM_ABV_FIELDS: &[&str] = &["teamAbv", "team"];
pub const TEAM_NAME_FIELDS: &[&str] = &["teamName", "teamAbv"];
pub const PLAYER_NAME_FIELDS: &[&str] = &["longName", "espnName", "name"];
pub const POSITION_FIELDS: &[&str] = &["pos", "position"];
pub const JERSEY_FIELDS: &[&str] = &["jerseyNum", "number"];
pub const INJURY_TEXT_FIELDS: &[&str] = &["description", "designation", "status"];
pub const INJURY_STATUS_FIELDS: &[&str] = &["designation", "status"];

const NAME_SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "v", "vi"];

/// Map a team abbreviation to its canonical form.
///
/// Unknown codes pass through unchanged apart from upper-casing, so the
/// function is idempotent.
pub fn canonical_team(abv: &str) -> String {
    let upper = abv.trim().to_uppercase();
    TEAM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(upper)
}

/// Every spelling that refers to the same team as `abv`, canonical included
pub fn team_aliases(abv: &str) -> BTreeSet<String> {
    let canonical = canonical_team(abv);
    let mut out = BTreeSet::new();
    out.insert(abv.trim().to_uppercase());
    for (alias, target) in TEAM_ALIASES {
        if *target == canonical {
            out.insert(alias.to_string());
        }
    }
    out.insert(canonical);
    out
}

/// First non-empty value among `fields`, rendered as a string
pub fn pick_str(obj: &Value, fields: &[&str]) -> Option<String> {
    let map = obj.as_object()?;
    fields.iter().find_map(|field| match map.get(*field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First value among `fields` that parses as a number
pub fn pick_f64(obj: &Value, fields: &[&str]) -> Option<f64> {
    let map = obj.as_object()?;
    fields.iter().find_map(|field| map.get(*field).and_then(to_float))
}

/// Canonical team code found under any of `fields`
pub fn pick_team(obj: &Value, fields: &[&str]) -> Option<String> {
    pick_str(obj, fields).map(|abv| canonical_team(&abv))
}

/// Parse a number or numeric string such as `"+3.5"` or `"-110"`
pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('+').parse().ok(),
        _ => None,
    }
}

/// Unwrap the `{"body": ...}` envelope and return the list under `key`.
///
/// Accepts a bare list, `{"body": [...]}`, `{"body": {key: [...]}}` or
/// `{key: [...]}`. Lists of bare strings are promoted to team objects.
pub fn body_list(raw: &Value, key: Option<&str>) -> Vec<Value> {
    let items = match raw {
        Value::Array(items) => items.clone(),
        Value::Object(map) => {
            let body = map.get("body").unwrap_or(raw);
            match (body, key) {
                (Value::Array(items), _) => items.clone(),
                (Value::Object(inner), Some(key)) => list_at(inner, key),
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    if matches!(items.first(), Some(Value::String(_))) {
        return items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .map(|s| serde_json::json!({ "teamAbv": s, "teamName": s }))
            .collect();
    }
    items
}

fn list_at(map: &Map<String, Value>, key: &str) -> Vec<Value> {
    match map.get(key) {
        Some(Value::Array(items)) => items.clone(),
        // keyed by id, e.g. teamDefenseProjections
        Some(Value::Object(by_id)) => by_id.values().filter(|v| v.is_object()).cloned().collect(),
        _ => Vec::new(),
    }
}

/// The `body` object of an upstream response, or the response itself
pub fn body_object(raw: &Value) -> Option<&Map<String, Value>> {
    match raw.get("body") {
        Some(Value::Object(body)) => Some(body),
        Some(_) => None,
        None => raw.as_object(),
    }
}

/// Projected fantasy points from a projection entry.
///
/// Looks at `fantasyPoints` first, then `fantasyPointsDefault` (either a
/// scalar or an object keyed by scoring format), then the per-format fields.
pub fn fantasy_points(obj: &Value, scoring: &str) -> Option<f64> {
    let map = obj.as_object()?;

    if let Some(points) = map.get("fantasyPoints").and_then(to_float) {
        return Some(points);
    }

    match map.get("fantasyPointsDefault") {
        Some(Value::Object(by_format)) => {
            let found = [scoring, "PPR", "standard", "halfPPR", "HalfPPR", "Default"]
                .iter()
                .find_map(|key| by_format.get(*key).and_then(to_float));
            if found.is_some() {
                return found;
            }
        }
        Some(other) => {
            if let Some(points) = to_float(other) {
                return Some(points);
            }
        }
        None => {}
    }

    pick_f64(obj, &["fantasyPointsPPR", "fantasyPointsHalfPPR", "fantasyPointsStandard"])
}

/// URL slugs the player-info endpoint may know a player by.
///
/// `"Odell Beckham Jr."` yields `odell-beckham-jr` and `odell-beckham`.
pub fn slug_candidates(name: &str) -> Vec<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '-')
        .collect::<String>()
        .to_lowercase();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let mut out = Vec::new();
    if !tokens.is_empty() {
        out.push(tokens.join("-"));
    }
    let without_suffix: Vec<&str> =
        tokens.iter().copied().filter(|t| !NAME_SUFFIXES.contains(t)).collect();
    if !without_suffix.is_empty() && without_suffix.len() != tokens.len() {
        out.push(without_suffix.join("-"));
    }
    out.dedup();
    out
}

/// `"20250907"` -> `"2025-09-07 (Sun)"`; anything else is returned as-is
pub fn format_game_date(yyyymmdd: &str) -> String {
    NaiveDate::parse_from_str(yyyymmdd.trim(), "%Y%m%d")
        .map(|date| date.format("%Y-%m-%d (%a)").to_string())
        .unwrap_or_else(|_| yyyymmdd.to_string())
}

/// True for absolute `http` or `https` URLs
pub fn is_web_link(link: &str) -> bool {
    reqwest::Url::parse(link).map_or(false, |url| matches!(url.scheme(), "http" | "https"))
}

/// Host part of a link, without a leading `www.`
pub fn source_of(link: &str) -> String {
    reqwest::Url::parse(link)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.trim_start_matches("www.").to_string()))
        .unwrap_or_default()
}
