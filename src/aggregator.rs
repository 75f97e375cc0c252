use crate::domain::{KillByMeans, Payload, Report};
use crate::parser;
use tracing::{debug, trace};

/// Default prefix for match identifiers (`game_1`, `game_2`, ...).
pub const DEFAULT_GAME_PREFIX: &str = "game_";

/// Single-pass fold of log lines into a [`Report`].
///
/// Holds one in-progress match. A match-start line closes the match in
/// progress (if one was ever opened) and latches the open flag. Roster and
/// kill lines are folded whether or not a match is open, so events seen
/// before the first `InitGame:` land in the first match.
///
/// Match ids are assigned when a match is closed, in closing order.
pub struct SessionAggregator {
    prefix: String,
    game_open: bool,
    games_closed: u64,
    lines_seen: u64,
    payload: Payload,
    kill_by_means: KillByMeans,
    report: Report,
}

impl SessionAggregator {
    /// Create an aggregator that names matches `{prefix}{n}`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            game_open: false,
            games_closed: 0,
            lines_seen: 0,
            payload: Payload::new(),
            kill_by_means: KillByMeans::new(),
            report: Report::default(),
        }
    }

    /// Fold every line of `lines` and return the finished report.
    #[cfg(test)]
    pub fn run<I, S>(mut self, lines: I) -> Report
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed(line.as_ref());
        }
        self.finish()
    }

    /// Fold one line.
    ///
    /// Each marker is checked on its own; a line carrying several markers
    /// triggers every matching branch, in the order start, roster, kill.
    pub fn feed(&mut self, line: &str) {
        self.lines_seen += 1;

        if parser::is_game_start(line) {
            if self.game_open {
                self.close_game();
            }
            self.game_open = true;
        }

        if parser::is_roster_update(line) {
            let name = parser::player_name(line);
            trace!(player = name, "roster update");
            self.payload.add_player(name);
        }

        if parser::is_kill(line) {
            let kill = parser::kill_event(line);
            trace!(
                killer = kill.killer,
                victim = kill.victim,
                cause = kill.cause,
                "kill"
            );
            self.payload.add_kill(kill.killer, kill.victim);
            *self.kill_by_means.entry(kill.cause.to_string()).or_insert(0) += 1;
        }
    }

    /// Close the match in progress, if any match was ever opened, and
    /// return the report.
    ///
    /// Events folded without any `InitGame:` line are dropped.
    pub fn finish(mut self) -> Report {
        if self.game_open {
            self.close_game();
        } else if self.payload != Payload::default() {
            debug!(
                lines = self.lines_seen,
                "no match start seen, discarding accumulated events"
            );
        }
        self.report
    }

    /// Number of lines fed so far.
    pub fn lines_seen(&self) -> u64 {
        self.lines_seen
    }

    fn close_game(&mut self) {
        self.games_closed += 1;
        let game_id = format!("{}{}", self.prefix, self.games_closed);

        let payload = std::mem::take(&mut self.payload);
        let kill_by_means = std::mem::take(&mut self.kill_by_means);

        debug!(
            game = %game_id,
            total_kills = payload.total_kills,
            players = payload.players.len(),
            "match closed"
        );

        if !kill_by_means.is_empty() {
            self.report
                .kills_by_means
                .insert(game_id.clone(), kill_by_means);
        }
        self.report.games.insert(game_id, payload);
    }
}

impl Default for SessionAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_GAME_PREFIX)
    }
}
