/// Line classification and field extraction for Quake 3 server logs.
///
/// Classification is plain substring containment, one predicate per marker.
/// A line may satisfy more than one predicate; callers test each one
/// independently. Extraction never fails: a line that does not fit the
/// expected grammar yields empty fields.

/// Marker for the start of a new match.
pub const GAME_START_MARKER: &str = "InitGame:";
/// Marker for a player identity assignment or change.
pub const ROSTER_MARKER: &str = "ClientUserinfoChanged:";
/// Marker for a kill event.
pub const KILL_MARKER: &str = "Kill:";

const NAME_LEFT: &str = "n\\";
const NAME_RIGHT: &str = "\\t";
const KILLED: &str = "killed";
const BY: &str = "by";

/// Fields of one kill line, borrowed from the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KillEvent<'a> {
    pub killer: &'a str,
    pub victim: &'a str,
    pub cause: &'a str,
}

pub fn is_game_start(line: &str) -> bool {
    line.contains(GAME_START_MARKER)
}

pub fn is_roster_update(line: &str) -> bool {
    line.contains(ROSTER_MARKER)
}

pub fn is_kill(line: &str) -> bool {
    line.contains(KILL_MARKER)
}

/// Player name from a `ClientUserinfoChanged:` line, e.g.
/// `20:34 ClientUserinfoChanged: 2 n\Isgalamido\t\0\model\...` → `Isgalamido`.
///
/// Returns `""` when the line is not a roster update or the name
/// delimiters are missing.
pub fn player_name(line: &str) -> &str {
    if !is_roster_update(line) {
        return "";
    }
    between(line, NAME_LEFT, NAME_RIGHT)
}

/// Killer, victim and cause from a `Kill:` line, e.g.
/// `21:42 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT`.
///
/// The segment after the marker is cut at colons to drop the numeric
/// codes, then split on `killed` and `by`. Any segment that is missing
/// comes back empty.
pub fn kill_event(line: &str) -> KillEvent<'_> {
    if !is_kill(line) {
        return KillEvent::default();
    }

    let after_marker = segment(line, KILL_MARKER, 1);
    let description = segment(after_marker, ":", 1);

    let killer = segment(description, KILLED, 0);
    let tail = segment(description, KILLED, 1);

    KillEvent {
        killer: trim_spaces(killer),
        victim: trim_spaces(segment(tail, BY, 0)),
        cause: trim_spaces(segment(tail, BY, 1)),
    }
}

/// Text between the first `left` and the next `right` after it.
fn between<'a>(s: &'a str, left: &str, right: &str) -> &'a str {
    let Some(start) = s.find(left).map(|i| i + left.len()) else {
        return "";
    };
    match s[start..].find(right) {
        Some(len) => &s[start..start + len],
        None => "",
    }
}

/// The `n`-th piece of `s` split on every occurrence of `sep`, or `""`.
fn segment<'a>(s: &'a str, sep: &str, n: usize) -> &'a str {
    s.split(sep).nth(n).unwrap_or("")
}

/// Strip leading and trailing ASCII spaces only.
fn trim_spaces(s: &str) -> &str {
    s.trim_matches(' ')
}
