/// Report model: per-match payloads and kill-by-means tallies.
use serde::Serialize;
use std::collections::BTreeMap;

/// Killer name fragment that marks an environmental kill (`<world>`).
const WORLD: &str = "world";

/// Cause-of-death label → occurrence count, scoped to one match.
pub type KillByMeans = BTreeMap<String, u64>;

/// Accumulated statistics for a single match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub total_kills: i64,
    pub players: Vec<String>,
    pub kills: BTreeMap<String, i64>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player to the roster, keeping first-seen order and skipping
    /// names already present.
    pub fn add_player(&mut self, name: &str) {
        if self.players.iter().any(|p| p == name) {
            return;
        }
        self.players.push(name.to_string());
    }

    /// Record one kill event.
    ///
    /// Every event counts toward `total_kills`. Self-kills leave the ledger
    /// alone. A killer whose name contains `world` is the environment, and
    /// the victim loses a point instead of the killer gaining one. The
    /// substring test is case-sensitive and matches anywhere in the name.
    pub fn add_kill(&mut self, killer: &str, victim: &str) {
        self.total_kills += 1;

        if killer == victim {
            return;
        }

        if killer.contains(WORLD) {
            *self.kills.entry(victim.to_string()).or_insert(0) -= 1;
        } else {
            *self.kills.entry(killer.to_string()).or_insert(0) += 1;
        }
    }
}

/// Final output of one pass over a log: two independent mappings keyed by
/// match id. `kills_by_means` only holds matches that recorded a kill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub games: BTreeMap<String, Payload>,
    pub kills_by_means: BTreeMap<String, KillByMeans>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Sum of `total_kills` across every match.
    pub fn total_kills(&self) -> i64 {
        self.games.values().map(|p| p.total_kills).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_payload_is_empty() {
        let p = Payload::new();
        assert_eq!(p.total_kills, 0);
        assert!(p.players.is_empty());
        assert!(p.kills.is_empty());
    }

    #[test]
    fn add_player_dedups_and_keeps_order() {
        let mut p = Payload::new();
        p.add_player("Isgalamido");
        p.add_player("Dono da Bola");
        p.add_player("Isgalamido");
        p.add_player("Zeh");
        assert_eq!(p.players, vec!["Isgalamido", "Dono da Bola", "Zeh"]);
    }

    #[test]
    fn add_kill_credits_killer() {
        let mut p = Payload::new();
        p.add_kill("Zeh", "Isgalamido");
        p.add_kill("Zeh", "Isgalamido");
        assert_eq!(p.total_kills, 2);
        assert_eq!(p.kills.get("Zeh"), Some(&2));
        assert_eq!(p.kills.get("Isgalamido"), None);
    }

    #[test]
    fn add_kill_by_world_penalizes_victim() {
        let mut p = Payload::new();
        p.add_kill("<world>", "Isgalamido");
        assert_eq!(p.kills.get("Isgalamido"), Some(&-1));
        p.add_kill("<world>", "Isgalamido");
        assert_eq!(p.kills.get("Isgalamido"), Some(&-2));
        assert_eq!(p.total_kills, 2);
        assert!(!p.kills.contains_key("<world>"));
    }

    #[test]
    fn add_kill_world_match_is_substring_and_case_sensitive() {
        let mut p = Payload::new();
        p.add_kill("Oldworlder", "Zeh");
        p.add_kill("Worldwalker", "Zeh");
        assert_eq!(p.kills.get("Zeh"), Some(&-1));
        assert_eq!(p.kills.get("Worldwalker"), Some(&1));
        assert!(!p.kills.contains_key("Oldworlder"));
    }

    #[test]
    fn add_kill_self_kill_counts_total_only() {
        let mut p = Payload::new();
        p.add_kill("Zeh", "Zeh");
        assert_eq!(p.total_kills, 1);
        assert!(p.kills.is_empty());
    }

    #[test]
    fn report_total_kills_sums_games() {
        let mut report = Report::default();
        let mut a = Payload::new();
        a.add_kill("Zeh", "Mal");
        let mut b = Payload::new();
        b.add_kill("<world>", "Mal");
        b.add_kill("Mal", "Mal");
        report.games.insert("game_1".to_string(), a);
        report.games.insert("game_2".to_string(), b);
        assert_eq!(report.total_kills(), 3);
        assert!(!report.is_empty());
    }
}
