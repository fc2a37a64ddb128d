//! Snake draft simulation over the ADP list
//!
//! Players are bucketed by position and ordered by ascending ADP. Every
//! pick takes the cheapest bucket head among positions the drafting team
//! still needs; once a team has filled every starting slot it simply takes
//! the best ADP left.

use std::collections::BTreeMap;
use std::collections::VecDeque;
use tank01_client::{AdpEntry, Player, Position, Team};

/// Starting slots per position; also the roster caps during the draft
pub const ROSTER_LIMITS: [(Position, usize); 6] = [
    (Position::QB, 1),
    (Position::RB, 2),
    (Position::WR, 3),
    (Position::TE, 1),
    (Position::K, 1),
    (Position::DST, 1),
];

/// ADP given to team defenses when the ADP list has none
pub const DEFENSE_PLACEHOLDER_ADP: f64 = 200.0;

/// ADP given to kickers when the ADP list has none
pub const KICKER_PLACEHOLDER_ADP: f64 = 180.0;

/// Available players, one ADP-ordered queue per position
#[derive(Debug, Clone, Default)]
pub struct DraftBoard {
    buckets: BTreeMap<Position, VecDeque<Player>>,
}

impl DraftBoard {
    pub fn from_adp(entries: &[AdpEntry]) -> Self {
        let mut by_position: BTreeMap<Position, Vec<Player>> = BTreeMap::new();
        for entry in entries {
            by_position.entry(entry.position).or_default().push(Player::from(entry));
        }

        let buckets = Position::ALL
            .iter()
            .map(|position| {
                let mut players = by_position.remove(position).unwrap_or_default();
                players.sort_by(|a, b| a.adp.total_cmp(&b.adp));
                (*position, players.into_iter().collect())
            })
            .collect();

        Self { buckets }
    }

    pub fn is_empty(&self, position: Position) -> bool {
        self.buckets.get(&position).map_or(true, |bucket| bucket.is_empty())
    }

    /// Players not drafted yet
    pub fn remaining(&self) -> usize {
        self.buckets.values().map(VecDeque::len).sum()
    }

    /// Stand in one "<Team Name> DST" or "<Team Name> K" per team
    pub fn fill_placeholders(&mut self, position: Position, teams: &[Team], adp: f64) {
        let label = if position == Position::DST { "DST" } else { "K" };
        let bucket = self.buckets.entry(position).or_default();
        for team in teams {
            bucket.push_back(Player {
                id: None,
                name: format!("{} {}", team.name, label),
                team: Some(team.abv.clone()),
                position,
                headshot: None,
                adp,
            });
        }
    }

    fn head(&self, position: Position) -> Option<&Player> {
        self.buckets.get(&position).and_then(|bucket| bucket.front())
    }

    fn take(&mut self, position: Position) -> Option<Player> {
        self.buckets.get_mut(&position).and_then(VecDeque::pop_front)
    }
}

/// One selection in the draft log
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub round: u32,
    /// Overall pick number, starting at 1
    pub number: u32,
    pub team: u32,
    pub player: Player,
}

#[derive(Debug, Clone, Default)]
pub struct DraftResult {
    pub picks: Vec<Pick>,
    rosters: Vec<Vec<Player>>,
}

impl DraftResult {
    /// Players drafted by team `slot` (1-based), in pick order
    pub fn roster(&self, slot: u32) -> &[Player] {
        slot.checked_sub(1)
            .and_then(|index| self.rosters.get(index as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Round and drafting team (both 1-based) for a zero-based pick index.
///
/// Odd rounds run 1..=teams, even rounds run back from `teams` to 1.
pub fn snake_position(pick_index: u32, teams: u32) -> (u32, u32) {
    let round = pick_index / teams + 1;
    let index = pick_index % teams + 1;
    let team = if round % 2 == 1 { index } else { teams + 1 - index };
    (round, team)
}

/// Run a `teams * rounds` snake draft; stops early when the board runs dry
pub fn simulate(mut board: DraftBoard, teams: u32, rounds: u32) -> DraftResult {
    let mut result =
        DraftResult { picks: Vec::new(), rosters: vec![Vec::new(); teams as usize] };

    for pick_index in 0..teams * rounds {
        let (round, team) = snake_position(pick_index, teams);
        let roster = &result.rosters[(team - 1) as usize];

        let position = match needed_position(&board, roster) {
            Some(position) => position,
            None => match best_available(&board) {
                Some(position) => position,
                None => break,
            },
        };

        let Some(player) = board.take(position) else { break };
        result.rosters[(team - 1) as usize].push(player.clone());
        result.picks.push(Pick { round, number: pick_index + 1, team, player });
    }

    result
}

/// Cheapest bucket head among positions still under their cap
fn needed_position(board: &DraftBoard, roster: &[Player]) -> Option<Position> {
    let mut best: Option<(Position, f64)> = None;
    for (position, cap) in ROSTER_LIMITS {
        let have = roster.iter().filter(|p| p.position == position).count();
        if have >= cap {
            continue;
        }
        if let Some(head) = board.head(position) {
            if best.map_or(true, |(_, adp)| head.adp < adp) {
                best = Some((position, head.adp));
            }
        }
    }
    best.map(|(position, _)| position)
}

fn best_available(board: &DraftBoard) -> Option<Position> {
    let mut best: Option<(Position, f64)> = None;
    for position in Position::ALL {
        if let Some(head) = board.head(position) {
            if best.map_or(true, |(_, adp)| head.adp < adp) {
                best = Some((position, head.adp));
            }
        }
    }
    best.map(|(position, _)| position)
}

/// The `n` lowest-ADP entries, ascending
pub fn top_by_adp(entries: &[AdpEntry], n: usize) -> Vec<AdpEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.adp.total_cmp(&b.adp));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, position: Position, adp: f64) -> AdpEntry {
        AdpEntry { player_id: Some(name.to_lowercase()), name: name.to_string(), position, adp }
    }

    fn create_test_pool() -> Vec<AdpEntry> {
        let mut pool = Vec::new();
        for i in 0..6 {
            pool.push(entry(&format!("QB{i}"), Position::QB, 20.0 + i as f64 * 10.0));
            pool.push(entry(&format!("TE{i}"), Position::TE, 25.0 + i as f64 * 10.0));
            pool.push(entry(&format!("K{i}"), Position::K, 150.0 + i as f64));
            pool.push(entry(&format!("DST{i}"), Position::DST, 140.0 + i as f64));
        }
        for i in 0..12 {
            pool.push(entry(&format!("RB{i}"), Position::RB, 1.0 + i as f64 * 2.0));
            pool.push(entry(&format!("WR{i}"), Position::WR, 2.0 + i as f64 * 2.0));
        }
        pool
    }

    #[test]
    fn test_top_by_adp_truncates_and_orders() {
        let pool = create_test_pool();
        let top = top_by_adp(&pool, 25);
        assert_eq!(top.len(), 25);
        assert!(top.windows(2).all(|w| w[0].adp <= w[1].adp));
        assert_eq!(top[0].name, "RB0");

        let short = top_by_adp(&pool[..3], 25);
        assert_eq!(short.len(), 3);
    }

    #[test]
    fn test_snake_order_reverses_each_round() {
        let order: Vec<(u32, u32)> = (0..8).map(|i| snake_position(i, 4)).collect();
        assert_eq!(
            order,
            vec![(1, 1), (1, 2), (1, 3), (1, 4), (2, 4), (2, 3), (2, 2), (2, 1)]
        );
        assert_eq!(snake_position(8, 4), (3, 1));
    }

    #[test]
    fn test_buckets_sorted_by_adp() {
        let board = DraftBoard::from_adp(&[
            entry("Late", Position::RB, 30.0),
            entry("Early", Position::RB, 3.0),
        ]);
        assert_eq!(board.head(Position::RB).map(|p| p.name.as_str()), Some("Early"));
        assert!(board.is_empty(Position::K));
        assert_eq!(board.remaining(), 2);
    }

    #[test]
    fn test_first_pick_is_lowest_adp() {
        let result = simulate(DraftBoard::from_adp(&create_test_pool()), 4, 15);
        let first = &result.picks[0];
        assert_eq!(first.team, 1);
        assert_eq!(first.player.name, "RB0");
        assert_eq!(result.picks[4].team, 4);
    }

    #[test]
    fn test_roster_caps_respected_while_needs_remain() {
        let result = simulate(DraftBoard::from_adp(&create_test_pool()), 4, 9);
        for slot in 1..=4 {
            let roster = result.roster(slot);
            assert_eq!(roster.len(), 9);
            for (position, cap) in ROSTER_LIMITS {
                let have = roster.iter().filter(|p| p.position == position).count();
                assert_eq!(have, cap, "team {slot} has {have} {position}");
            }
        }
    }

    #[test]
    fn test_draft_stops_when_pool_is_empty() {
        let pool = vec![
            entry("A", Position::RB, 1.0),
            entry("B", Position::WR, 2.0),
            entry("C", Position::QB, 3.0),
        ];
        let result = simulate(DraftBoard::from_adp(&pool), 2, 15);
        assert_eq!(result.picks.len(), 3);
        // third pick snakes back to team 2
        assert_eq!(result.roster(1).len(), 1);
        assert_eq!(result.roster(2).len(), 2);
        assert!(result.roster(3).is_empty());
    }

    #[test]
    fn test_placeholders_fill_empty_positions() {
        let mut board = DraftBoard::from_adp(&[entry("A", Position::RB, 1.0)]);
        let teams = vec![
            Team { abv: "KC".to_string(), name: "Kansas City Chiefs".to_string() },
            Team { abv: "BUF".to_string(), name: "Buffalo Bills".to_string() },
        ];
        board.fill_placeholders(Position::DST, &teams, DEFENSE_PLACEHOLDER_ADP);
        board.fill_placeholders(Position::K, &teams[..1], KICKER_PLACEHOLDER_ADP);

        assert_eq!(board.remaining(), 4);
        let head = board.head(Position::DST).unwrap();
        assert_eq!(head.name, "Kansas City Chiefs DST");
        assert_eq!(head.team.as_deref(), Some("KC"));
        assert_eq!(board.head(Position::K).unwrap().adp, KICKER_PLACEHOLDER_ADP);
    }
}
