//! Progress leaderboard and achievements.

use serde::{Deserialize, Serialize};

use super::ledger::WinLedger;
use super::tally::MatchStatistics;
use crate::board::{PATH_LEN, PIECES_PER_PLAYER, RING_LEN};
use crate::core::{Color, Location, PieceSet, PlayerId, Roster};

/// Steps for a player with every piece on the last goal cell.
pub const MAX_STEPS: u32 = (PIECES_PER_PLAYER * PATH_LEN) as u32;

/// One row of the leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub color: Color,
    pub name: String,
    /// 1-based, in leaderboard order.
    pub rank: usize,
    pub steps: u32,
    pub pieces_in_goal: usize,
    /// `steps` as a share of `MAX_STEPS`, 0-100.
    pub percent: f64,
}

/// Steps a piece has covered: 0 at home, 1 on the entry cell.
#[must_use]
pub fn piece_steps(location: Location) -> u32 {
    match location {
        Location::Home(_) => 0,
        Location::Ring(progress) => u32::from(progress) + 1,
        Location::Goal(lane) => RING_LEN as u32 + u32::from(lane) + 1,
    }
}

/// Leaderboard by total steps, most first. Ties keep seat order.
#[must_use]
pub fn standings(roster: &Roster, pieces: &PieceSet) -> Vec<Standing> {
    let mut rows: Vec<Standing> = roster
        .iter()
        .map(|player| {
            let steps = pieces
                .owned_by(player.id)
                .map(|p| piece_steps(p.location))
                .sum();
            Standing {
                player: player.id,
                color: player.color,
                name: player.name.clone(),
                rank: 0,
                steps,
                pieces_in_goal: pieces.goal_count(player.id),
                percent: (f64::from(steps) / f64::from(MAX_STEPS) * 100.0).min(100.0),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.steps.cmp(&a.steps));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

/// Steps between first and second place; 0 with fewer than two rows.
#[must_use]
pub fn lead_gap(standings: &[Standing]) -> u32 {
    match standings {
        [first, second, ..] => first.steps - second.steps,
        _ => 0,
    }
}

/// Milestones for the current match and the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    /// Five captures in one match.
    Aggressor,
    /// Three sixes in one match.
    Lucky,
    /// Ten wins recorded.
    Veteran,
    /// Twenty-five games played.
    Regular,
    /// A thousand rolls recorded.
    DiceMaster,
}

impl Achievement {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Achievement::Aggressor => "captured 5 pieces in one match",
            Achievement::Lucky => "rolled 3 sixes in one match",
            Achievement::Veteran => "won 10 matches",
            Achievement::Regular => "played 25 matches",
            Achievement::DiceMaster => "rolled 1000 times",
        }
    }
}

/// Achievements earned so far.
#[must_use]
pub fn achievements(stats: &MatchStatistics, ledger: &WinLedger) -> Vec<Achievement> {
    [
        (stats.total_captures >= 5, Achievement::Aggressor),
        (stats.sixes_rolled >= 3, Achievement::Lucky),
        (ledger.total_wins >= 10, Achievement::Veteran),
        (ledger.games_played >= 25, Achievement::Regular),
        (ledger.total_rolls >= 1000, Achievement::DiceMaster),
    ]
    .into_iter()
    .filter_map(|(earned, achievement)| earned.then_some(achievement))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceId;

    #[test]
    fn test_piece_steps() {
        assert_eq!(piece_steps(Location::Home(0)), 0);
        assert_eq!(piece_steps(Location::Ring(0)), 1);
        assert_eq!(piece_steps(Location::Ring(39)), 40);
        assert_eq!(piece_steps(Location::Goal(3)), 44);
        assert_eq!(MAX_STEPS, 176);
    }

    #[test]
    fn test_standings_order_and_gap() {
        let roster = Roster::seat(&["Blue", "Red"]);
        let mut pieces = PieceSet::starting(2);
        let red = PlayerId::new(1);
        pieces.set_location(PieceId::new(red, 0), Location::Ring(9));
        pieces.set_location(PieceId::new(red, 1), Location::Goal(0));

        let rows = standings(&roster, &pieces);
        assert_eq!(rows[0].player, red);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].steps, 51);
        assert_eq!(rows[0].pieces_in_goal, 1);
        assert_eq!(rows[1].steps, 0);
        assert_eq!(lead_gap(&rows), 51);
        assert_eq!(lead_gap(&rows[..1]), 0);
    }

    #[test]
    fn test_full_goal_is_hundred_percent() {
        let roster = Roster::seat(&["Blue", "Red"]);
        let blue = PlayerId::new(0);
        let mut pieces = PieceSet::starting(2);
        for i in 0..4 {
            pieces.set_location(PieceId::new(blue, i), Location::Goal(3));
        }
        let rows = standings(&roster, &pieces);
        assert_eq!(rows[0].steps, MAX_STEPS);
        assert!((rows[0].percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_achievements() {
        let mut stats = MatchStatistics::new(2);
        let ledger = WinLedger::default();
        assert!(achievements(&stats, &ledger).is_empty());

        stats.total_captures = 5;
        stats.sixes_rolled = 3;
        let ledger = WinLedger {
            total_wins: 10,
            games_played: 25,
            total_rolls: 999,
            ..WinLedger::default()
        };
        assert_eq!(
            achievements(&stats, &ledger),
            vec![
                Achievement::Aggressor,
                Achievement::Lucky,
                Achievement::Veteran,
                Achievement::Regular
            ]
        );
    }
}
