use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{self, *};

/// Fantasy position bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
}

impl Position {
    pub const ALL: [Position; 6] =
        [Position::QB, Position::RB, Position::WR, Position::TE, Position::K, Position::DST];

    /// Classify a positional ADP tag such as `WR12`, `PK3`, `DST1` or `DEF`
    pub fn from_adp_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_uppercase();
        if tag.starts_with("DST") || tag == "DEF" {
            return Some(Position::DST);
        }
        if tag.starts_with("PK") || tag.starts_with('K') {
            return Some(Position::K);
        }
        match tag.get(..2)? {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring format used for ADP and projections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Scoring {
    #[default]
    Standard,
    HalfPpr,
    Ppr,
}

impl Scoring {
    /// Lenient parse of the `scoring` query value
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "ppr" => Scoring::Ppr,
            "halfppr" | "half_ppr" | "half-ppr" => Scoring::HalfPpr,
            _ => Scoring::Standard,
        }
    }

    /// Value the upstream expects for `adpType`
    pub fn as_param(&self) -> &'static str {
        match self {
            Scoring::Standard => "standard",
            Scoring::HalfPpr => "halfPPR",
            Scoring::Ppr => "PPR",
        }
    }

    pub fn points_per_reception(&self) -> f64 {
        match self {
            Scoring::Standard => 0.0,
            Scoring::HalfPpr => 0.5,
            Scoring::Ppr => 1.0,
        }
    }
}

/// NFL team with its canonical abbreviation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub abv: String,
    pub name: String,
}

impl Team {
    pub fn from_value(value: &Value) -> Option<Self> {
        let abv = pick_team(value, &["teamAbv"])?;
        let name = pick_str(value, TEAM_NAME_FIELDS).unwrap_or_else(|| abv.clone());
        Some(Self { abv, name })
    }

    /// Last word of the display name, lowercased ("Kansas City Chiefs" -> "chiefs")
    pub fn nickname(&self) -> String {
        self.name.split_whitespace().last().unwrap_or_default().to_lowercase()
    }
}

/// One row of the ADP list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdpEntry {
    pub player_id: Option<String>,
    pub name: String,
    pub position: Position,
    pub adp: f64,
}

impl AdpEntry {
    /// Rows without a usable position are dropped
    pub fn from_value(value: &Value) -> Option<Self> {
        let name = pick_str(value, &["longName", "name"]).unwrap_or_else(|| "<none>".to_string());
        let position = Position::from_adp_tag(&pick_str(value, &["posADP"])?)?;
        Some(Self {
            player_id: pick_str(value, &["playerID", "playerId"]),
            name,
            position,
            adp: pick_f64(value, &["overallADP"]).unwrap_or(0.0),
        })
    }
}

/// Injury block attached to a player profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InjuryInfo {
    pub blurb: String,
    pub status: Option<String>,
}

/// Player information as returned by `getNFLPlayerInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlayerProfile {
    pub player_id: Option<String>,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub jersey: Option<String>,
    pub headshot: Option<String>,
    pub injury: Option<InjuryInfo>,
}

impl PlayerProfile {
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        let injury = value.get("injury").filter(|inj| inj.is_object()).and_then(|inj| {
            let blurb = pick_str(inj, INJURY_TEXT_FIELDS)?;
            Some(InjuryInfo { blurb, status: pick_str(inj, INJURY_STATUS_FIELDS) })
        });
        Some(Self {
            player_id: pick_str(value, &["playerID", "playerId"]),
            name: pick_str(value, PLAYER_NAME_FIELDS).unwrap_or_default(),
            team: pick_team(value, TEAM_ABV_FIELDS),
            position: pick_str(value, POSITION_FIELDS),
            jersey: pick_str(value, JERSEY_FIELDS),
            headshot: pick_str(value, &["espnHeadshot"]),
            injury,
        })
    }
}

/// Player as shown on the pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<String>,
    pub name: String,
    pub team: Option<String>,
    pub position: Position,
    pub headshot: Option<String>,
    pub adp: f64,
}

impl From<&AdpEntry> for Player {
    fn from(entry: &AdpEntry) -> Self {
        Self {
            id: entry.player_id.clone(),
            name: entry.name.clone(),
            team: None,
            position: entry.position,
            headshot: None,
            adp: entry.adp,
        }
    }
}

/// Betting line for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Odds {
    pub game_id: Option<String>,
    pub date: Option<String>,
    pub home: Option<String>,
    pub away: Option<String>,
    pub home_spread: Option<f64>,
    pub total: Option<f64>,
    pub away_moneyline: Option<f64>,
    pub home_moneyline: Option<f64>,
    pub implied_away: Option<f64>,
    pub implied_home: Option<f64>,
}

impl Odds {
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        let implied = value.get("impliedTotals").cloned().unwrap_or(Value::Null);
        Some(Self {
            game_id: pick_str(value, GAME_ID_FIELDS),
            date: pick_str(value, GAME_DATE_FIELDS),
            home: pick_team(value, HOME_TEAM_FIELDS),
            away: pick_team(value, AWAY_TEAM_FIELDS),
            home_spread: pick_f64(value, HOME_SPREAD_FIELDS),
            total: pick_f64(value, TOTAL_FIELDS),
            away_moneyline: pick_f64(value, AWAY_MONEYLINE_FIELDS),
            home_moneyline: pick_f64(value, HOME_MONEYLINE_FIELDS),
            implied_away: pick_f64(&implied, IMPLIED_AWAY_FIELDS),
            implied_home: pick_f64(&implied, IMPLIED_HOME_FIELDS),
        })
    }

    /// True when none of spread, total or moneylines is posted
    pub fn is_empty(&self) -> bool {
        self.home_spread.is_none()
            && self.total.is_none()
            && self.away_moneyline.is_none()
            && self.home_moneyline.is_none()
    }
}

/// Scheduled game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Option<String>,
    pub week: Option<u32>,
    pub home: String,
    pub away: String,
    /// Raw `YYYYMMDD` date
    pub date: Option<String>,
    pub time: Option<String>,
    pub odds: Option<Odds>,
}

impl Game {
    /// Games without both teams are dropped
    pub fn from_value(value: &Value) -> Option<Self> {
        let home = pick_team(value, HOME_TEAM_FIELDS)?;
        let away = pick_team(value, AWAY_TEAM_FIELDS)?;
        let week = pick_str(value, GAME_WEEK_FIELDS).and_then(|w| {
            w.trim_start_matches("Week").trim().parse().ok()
        });
        Some(Self {
            id: pick_str(value, GAME_ID_FIELDS),
            week,
            home,
            away,
            date: pick_str(value, GAME_DATE_FIELDS),
            time: pick_str(value, GAME_TIME_FIELDS),
            odds: None,
        })
    }

    pub fn display_date(&self) -> String {
        self.date.as_deref().map(normalize::format_game_date).unwrap_or_default()
    }
}

/// Injury note for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryNote {
    pub player: String,
    pub blurb: String,
    pub status: Option<String>,
}

/// League news headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub link: String,
    pub source: String,
    pub player_ids: Vec<String>,
    pub published: Option<DateTime<Utc>>,
}

impl NewsItem {
    /// Items without both a title and a web link are dropped
    pub fn from_value(value: &Value) -> Option<Self> {
        let headline = pick_str(value, &["title", "headline"])?;
        let link = pick_str(value, &["link", "url"]).filter(|link| is_web_link(link))?;
        let player_ids = match value.get("playerIDs") {
            Some(Value::Array(ids)) => ids
                .iter()
                .filter_map(|id| match id {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let published = pick_str(value, &["published", "publishedAt", "date"])
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Some(Self { source: source_of(&link), headline, link, player_ids, published })
    }
}
