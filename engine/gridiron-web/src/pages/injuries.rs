//! Injuries page: injury notes for the top of the ADP board, plus an
//! optional player card

use std::collections::HashSet;
use std::time::Instant;
use tank01_client::endpoints;
use tank01_client::{InjuryNote, Scoring, Upstream};
use tracing::{debug, info, warn};

use super::draft::top_by_adp;
use super::{param_text, round2, Query};
use crate::config::PagesConfig;
use crate::error::{PageError, PageResult};

/// Injury text shown on a card when the profile lists none
pub const NO_INJURY_LISTED: &str = "(none listed)";

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCard {
    pub name: String,
    pub position: Option<String>,
    pub jersey: Option<String>,
    pub team_abv: Option<String>,
    pub team_name: Option<String>,
    pub headshot: Option<String>,
    pub injury: String,
}

#[derive(Debug, Clone)]
pub struct InjuriesView {
    pub season: String,
    pub scan_limit: usize,
    pub max_results: usize,
    pub notes: Vec<InjuryNote>,
    pub elapsed_secs: f64,
    /// Search text from `?player=`, empty when absent
    pub query: String,
    pub card: Option<PlayerCard>,
    /// Shown instead of the card when the search found nothing
    pub card_message: Option<String>,
}

impl InjuriesView {
    pub fn found(&self) -> usize {
        self.notes.len()
    }
}

pub async fn build(
    upstream: &dyn Upstream,
    config: &PagesConfig,
    query: &Query,
) -> PageResult<InjuriesView> {
    let started = Instant::now();
    let season = config.season.clone();

    let entries = endpoints::adp(upstream, &season, Scoring::Standard).await?;
    let scanned = top_by_adp(&entries, config.injury_scan_limit);
    let names: Vec<&str> = scanned
        .iter()
        .map(|entry| entry.name.as_str())
        .filter(|name| !name.is_empty() && *name != "<none>")
        .collect();

    let mut notes = Vec::new();
    let mut seen = HashSet::new();
    for name in names {
        if notes.len() >= config.injury_max_results {
            break;
        }
        // same name listed at two positions
        if !seen.insert(name) {
            continue;
        }
        let profile = match endpoints::player_profile(upstream, name).await {
            Ok(Some(profile)) => profile,
            Ok(None) => continue,
            Err(e) => {
                debug!("Skipping injury lookup for {}: {}", name, e);
                continue;
            }
        };
        if let Some(injury) = profile.injury {
            notes.push(InjuryNote { player: name.to_string(), blurb: injury.blurb, status: injury.status });
        }
    }

    notes.sort_by(|a, b| a.player.cmp(&b.player));

    let search = param_text(query, "player");
    let (card, card_message) = if search.is_empty() {
        (None, None)
    } else {
        match player_card(upstream, &search).await {
            Ok(card) => (Some(card), None),
            Err(e) => (None, Some(e.user_message())),
        }
    };

    let elapsed_secs = round2(started.elapsed().as_secs_f64());
    info!("Injury scan found {} notes in {:.2}s", notes.len(), elapsed_secs);

    Ok(InjuriesView {
        season,
        scan_limit: config.injury_scan_limit,
        max_results: config.injury_max_results,
        notes,
        elapsed_secs,
        query: search,
        card,
        card_message,
    })
}

/// Profile card for a searched player
pub async fn player_card(upstream: &dyn Upstream, search: &str) -> PageResult<PlayerCard> {
    let profile = endpoints::player_profile(upstream, search)
        .await?
        .ok_or_else(|| PageError::NotFound(search.to_string()))?;

    let team_name = match &profile.team {
        Some(abv) => match endpoints::teams(upstream).await {
            Ok(teams) => endpoints::team_names(&teams).get(abv).cloned(),
            Err(e) => {
                warn!("Team list unavailable for player card: {}", e);
                None
            }
        },
        None => None,
    };

    let name = if profile.name.is_empty() { search.to_string() } else { profile.name };
    Ok(PlayerCard {
        name,
        position: profile.position,
        jersey: profile.jersey,
        team_abv: profile.team,
        team_name,
        headshot: profile.headshot,
        injury: profile.injury.map(|i| i.blurb).unwrap_or_else(|| NO_INJURY_LISTED.to_string()),
    })
}
