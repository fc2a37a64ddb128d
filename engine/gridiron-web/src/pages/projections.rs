//! Projections page: ADP board, simulated draft and one team's week

use std::collections::HashMap;
use tank01_client::endpoints::{self, WeekMatchups, WeekProjections};
use tank01_client::normalize::canonical_team;
use tank01_client::{AdpEntry, Player, Position, Scoring, Team, Upstream};
use tracing::{debug, info, warn};

use super::draft::{self, DraftBoard, Pick, ROSTER_LIMITS};
use super::{param_text, param_u32, round2, Query, MAX_WEEK};
use crate::config::PagesConfig;
use crate::error::PageResult;

pub const MIN_TEAMS: u32 = 2;
pub const MAX_TEAMS: u32 = 16;

/// Opponent shown when the team is not playing this week
pub const BYE_WEEK: &str = "Bye Week";

/// Opponent shown when no schedule source answered
pub const OPPONENT_UNKNOWN: &str = "TBD";

/// League settings taken from the query string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionsQuery {
    pub teams: u32,
    pub slot: u32,
    pub week: u32,
    pub scoring: Scoring,
}

impl Default for ProjectionsQuery {
    fn default() -> Self {
        Self { teams: 10, slot: 1, week: 1, scoring: Scoring::Standard }
    }
}

impl ProjectionsQuery {
    /// Parse and clamp `teams`, `slot`, `week` and `scoring`
    pub fn from_query(query: &Query) -> Self {
        let defaults = Self::default();
        let teams = param_u32(query, "teams", defaults.teams).clamp(MIN_TEAMS, MAX_TEAMS);
        let slot = param_u32(query, "slot", defaults.slot).clamp(1, teams);
        let week = param_u32(query, "week", defaults.week).clamp(1, MAX_WEEK);
        let scoring = Scoring::parse(&param_text(query, "scoring"));
        Self { teams, slot, week, scoring }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub pick: usize,
    pub position: Position,
    pub name: String,
    pub nfl_team: String,
    pub headshot: Option<String>,
    pub adp: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRow {
    pub name: String,
    pub position: Position,
    pub nfl_team: String,
    pub opponent: String,
    pub points: f64,
}

#[derive(Debug, Clone)]
pub struct ProjectionsView {
    pub query: ProjectionsQuery,
    pub season: String,
    pub adp_board: Vec<AdpEntry>,
    pub picks: Vec<Pick>,
    pub roster: Vec<RosterRow>,
    pub projections: Vec<ProjectionRow>,
    pub starters: Vec<ProjectionRow>,
    pub roster_total: f64,
    pub starters_total: f64,
    /// Enrichment that could not be loaded
    pub notes: Vec<String>,
}

/// Lookups shared by the roster and projection rows
struct TeamDirectory {
    teams: Vec<Team>,
    names: HashMap<String, String>,
}

impl TeamDirectory {
    fn display_name(&self, abv: &str) -> String {
        self.names.get(abv).cloned().unwrap_or_else(|| abv.to_string())
    }

    /// Canonical team of a drafted player, if it can be worked out
    fn team_of(&self, player: &Player) -> Option<String> {
        let raw = match player.position {
            Position::DST => endpoints::defense_team(&player.name, &self.teams).or(player.team.clone()),
            _ => player.team.clone(),
        };
        raw.map(|abv| canonical_team(&abv)).filter(|abv| !abv.is_empty())
    }
}

pub async fn build(
    upstream: &dyn Upstream,
    config: &PagesConfig,
    query: &ProjectionsQuery,
) -> PageResult<ProjectionsView> {
    let season = config.season.clone();
    let mut notes = Vec::new();

    let entries = endpoints::adp(upstream, &season, query.scoring).await?;
    info!(
        "Building projections for team {} of {} (week {}, {})",
        query.slot,
        query.teams,
        query.week,
        query.scoring.as_param()
    );

    let adp_board = draft::top_by_adp(&entries, config.adp_board_size);

    let teams = match endpoints::teams(upstream).await {
        Ok(teams) => teams,
        Err(e) => {
            warn!("Team list unavailable: {}", e);
            notes.push("Team names unavailable right now; showing abbreviations.".to_string());
            Vec::new()
        }
    };

    let mut board = DraftBoard::from_adp(&entries);
    let fill = &teams[..teams.len().min(query.teams as usize)];
    if board.is_empty(Position::DST) {
        board.fill_placeholders(Position::DST, fill, draft::DEFENSE_PLACEHOLDER_ADP);
    }
    if board.is_empty(Position::K) {
        board.fill_placeholders(Position::K, fill, draft::KICKER_PLACEHOLDER_ADP);
    }

    let result = draft::simulate(board, query.teams, config.draft_rounds);
    debug!("Simulated {} picks", result.picks.len());

    let directory = TeamDirectory { names: endpoints::team_names(&teams), teams };
    let mut drafted: Vec<Player> = result.roster(query.slot).to_vec();

    // one profile lookup per drafted player; defenses have no profile
    for player in drafted.iter_mut().filter(|p| p.id.is_some()) {
        match endpoints::player_profile(upstream, &player.name).await {
            Ok(Some(profile)) => {
                player.headshot = profile.headshot;
                if profile.team.is_some() {
                    player.team = profile.team;
                }
            }
            Ok(None) => debug!("No profile for {}", player.name),
            Err(e) => debug!("Profile for {} unavailable: {}", player.name, e),
        }
    }

    let roster = drafted
        .iter()
        .enumerate()
        .map(|(i, player)| RosterRow {
            pick: i + 1,
            position: player.position,
            name: player.name.clone(),
            nfl_team: directory
                .team_of(player)
                .map(|abv| directory.display_name(&abv))
                .unwrap_or_default(),
            headshot: player.headshot.clone(),
            adp: player.adp,
        })
        .collect();

    let matchups = endpoints::weekly_matchups(upstream, &season, query.week).await;
    if matchups.is_empty() {
        notes.push(format!("No schedule found for week {}; opponents unknown.", query.week));
    }

    let week_projections = if drafted.is_empty() {
        None
    } else {
        match endpoints::projections(upstream, &season, query.week, query.scoring).await {
            Ok(projections) => Some(projections),
            Err(e) => {
                warn!("Projections unavailable for week {}: {}", query.week, e);
                notes.push("Projections unavailable right now; points shown as 0.".to_string());
                None
            }
        }
    };

    let projections: Vec<ProjectionRow> = drafted
        .iter()
        .map(|player| {
            projection_row(player, &directory, &matchups, week_projections.as_ref(), query.scoring)
        })
        .collect();

    let starters = pick_starters(&projections);
    let roster_total = round2(projections.iter().map(|row| row.points).sum());
    let starters_total = round2(starters.iter().map(|row| row.points).sum());

    Ok(ProjectionsView {
        query: *query,
        season,
        adp_board,
        picks: result.picks,
        roster,
        projections,
        starters,
        roster_total,
        starters_total,
        notes,
    })
}

fn projection_row(
    player: &Player,
    directory: &TeamDirectory,
    matchups: &WeekMatchups,
    projections: Option<&WeekProjections>,
    scoring: Scoring,
) -> ProjectionRow {
    let team = directory.team_of(player);
    let opponent = opponent_label(team.as_deref(), matchups, directory);

    let points = if opponent == BYE_WEEK {
        0.0
    } else {
        projections
            .and_then(|week| match (player.position, &player.id, &team) {
                (Position::DST, _, Some(abv)) => week.defense_points(abv, scoring),
                (Position::DST, _, None) => None,
                (_, Some(id), _) => week.player_points(id, scoring),
                (_, None, _) => None,
            })
            .unwrap_or(0.0)
    };

    ProjectionRow {
        name: player.name.clone(),
        position: player.position,
        nfl_team: team.as_deref().map(|abv| directory.display_name(abv)).unwrap_or_default(),
        opponent,
        points: round2(points),
    }
}

/// `vs Team` at home, `@ Team` on the road, or the bye marker
fn opponent_label(team: Option<&str>, matchups: &WeekMatchups, directory: &TeamDirectory) -> String {
    if matchups.is_empty() {
        return OPPONENT_UNKNOWN.to_string();
    }
    let Some(team) = team else {
        return String::new();
    };
    match matchups.opponent.get(team) {
        Some(opponent) => {
            let name = directory.display_name(opponent);
            if matchups.home.get(team).copied().unwrap_or(true) {
                format!("vs {name}")
            } else {
                format!("@ {name}")
            }
        }
        None => BYE_WEEK.to_string(),
    }
}

/// Highest-projected players per starting slot, in slot order
pub fn pick_starters(rows: &[ProjectionRow]) -> Vec<ProjectionRow> {
    let mut starters = Vec::new();
    for (position, count) in ROSTER_LIMITS {
        let mut candidates: Vec<&ProjectionRow> =
            rows.iter().filter(|row| row.position == position).collect();
        candidates.sort_by(|a, b| b.points.total_cmp(&a.points));
        starters.extend(candidates.into_iter().take(count).cloned());
    }
    starters
}
