//! Team-name reconciliation between the odds provider and the results feed.
//!
//! The two providers share no game id, so a stored pick is tied back to a
//! final score purely by team names. False positives mis-grade a pick;
//! false negatives leave it pending forever.

use crate::models::{GameResult, Prediction};

/// Suffix tokens dropped from the end of a name before comparison
const STRIP_SUFFIXES: [&str; 5] = ["fc", "sc", "united", "city", "town"];

/// Lowercase, drop a trailing club suffix ("FC", "United", ...), trim.
pub fn normalize_team_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    for suffix in STRIP_SUFFIXES {
        if let Some(stripped) = lowered.strip_suffix(suffix) {
            // Only strip a whole trailing token, not the tail of a word
            if stripped.ends_with(' ') {
                return stripped.trim_end().to_string();
            }
        }
    }
    lowered
}

/// Whether two provider spellings refer to the same team.
///
/// Containment either way covers truncations ("Lakers" vs "Los Angeles
/// Lakers"). Abbreviated market names ("LA Lakers", "NY Yankees") share no
/// substring with the full spelling, so a second pass accepts an equal
/// trailing nickname when one market is an initialism of the other ("la"
/// for "los angeles"). A shared nickname alone is never enough: college
/// teams reuse nicknames constantly and matching on them mis-grades picks.
pub fn teams_match(a: &str, b: &str) -> bool {
    let a = normalize_team_name(a);
    let b = normalize_team_name(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.contains(&b) || b.contains(&a) {
        return true;
    }
    abbreviated_variants(&a, &b)
}

/// Same trailing nickname with one side's market abbreviated,
/// e.g. "ny yankees" vs "new york yankees".
fn abbreviated_variants(a: &str, b: &str) -> bool {
    let a_tokens: Vec<&str> = a.split_whitespace().collect();
    let b_tokens: Vec<&str> = b.split_whitespace().collect();
    let (Some((a_nick, a_market)), Some((b_nick, b_market))) =
        (a_tokens.split_last(), b_tokens.split_last())
    else {
        return false;
    };
    if a_nick != b_nick || a_market.is_empty() || b_market.is_empty() {
        return false;
    }
    market_abbreviates(a_market, b_market) || market_abbreviates(b_market, a_market)
}

/// Whether `short` is the initialism of `long`'s tokens ("ny" for
/// ["new", "york"]).
fn market_abbreviates(short: &[&str], long: &[&str]) -> bool {
    if short.len() != 1 || long.len() < 2 {
        return false;
    }
    let initials: String = long.iter().filter_map(|t| t.chars().next()).collect();
    short[0] == initials
}

/// Filter `picks` down to the ones that refer to `result`'s game.
///
/// A pick matches only if the sport agrees, both the home and the away
/// side match by name, and the pick is still open. Terminal picks
/// (completed, cancelled) are never re-matched.
pub fn matching_predictions<'a>(
    picks: &'a [Prediction],
    result: &GameResult,
) -> Vec<&'a Prediction> {
    picks
        .iter()
        .filter(|pick| pick_matches(pick, result))
        .collect()
}

fn pick_matches(pick: &Prediction, result: &GameResult) -> bool {
    if pick.sport != result.sport || !pick.is_open() {
        return false;
    }
    if pick.home_team.is_empty() || pick.away_team.is_empty() {
        return false;
    }
    teams_match(&pick.home_team, &result.home_team)
        && teams_match(&pick.away_team, &result.away_team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        GameStatus, PredictedOutcome, PredictionType, ResultStatus, Side, Sport,
    };
    use uuid::Uuid;

    fn pick(sport: Sport, home: &str, away: &str) -> Prediction {
        Prediction::new(
            Uuid::new_v4(),
            "odds-123".to_string(),
            sport,
            home.to_string(),
            away.to_string(),
            PredictionType::Moneyline,
            "analysis".to_string(),
            PredictedOutcome::Home,
            None,
            None,
        )
    }

    fn result(sport: Sport, home: &str, away: &str) -> GameResult {
        GameResult {
            external_id: "sr:game:1".to_string(),
            sport,
            home_team: home.to_string(),
            away_team: away.to_string(),
            status: ResultStatus::Completed,
            home_score: 2,
            away_score: 1,
            winner: Some(Side::Home),
        }
    }

    #[test]
    fn test_normalize_strips_club_suffixes() {
        assert_eq!(normalize_team_name("Leeds United"), "leeds");
        assert_eq!(normalize_team_name("Manchester City"), "manchester");
        assert_eq!(normalize_team_name("Dallas FC"), "dallas");
        assert_eq!(normalize_team_name("  Ipswich Town "), "ipswich");
        // Suffix must be its own token
        assert_eq!(normalize_team_name("Traffic"), "traffic");
    }

    #[test]
    fn test_abbreviated_market_names_match() {
        assert!(teams_match("Los Angeles Lakers", "LA Lakers"));
        assert!(teams_match("LA Lakers", "Los Angeles Lakers"));
        assert!(teams_match("NY Yankees", "New York Yankees"));
    }

    #[test]
    fn test_containment_match() {
        assert!(teams_match("Lakers", "Los Angeles Lakers"));
        assert!(teams_match("Boston Red Sox", "Boston Red Sox"));
    }

    #[test]
    fn test_same_market_different_team_does_not_match() {
        assert!(!teams_match("Boston Celtics", "Boston Bruins"));
        assert!(!teams_match("New York Mets", "New York Yankees"));
    }

    #[test]
    fn test_shared_nickname_different_school_does_not_match() {
        // College nicknames repeat across schools; the nickname alone must
        // never tie two teams together
        assert!(!teams_match("Kentucky Wildcats", "Arizona Wildcats"));
        assert!(!teams_match("Gonzaga Bulldogs", "Butler Bulldogs"));
        assert!(!teams_match("Michigan State Spartans", "Norfolk State Spartans"));
    }

    #[test]
    fn test_shared_nickname_game_is_not_matched() {
        let picks = vec![pick(Sport::NCAAMB, "Kentucky Wildcats", "Gonzaga Bulldogs")];
        let wrong_game = result(Sport::NCAAMB, "Arizona Wildcats", "Butler Bulldogs");
        assert!(matching_predictions(&picks, &wrong_game).is_empty());

        let right_game = result(Sport::NCAAMB, "Kentucky Wildcats", "Gonzaga Bulldogs");
        assert_eq!(matching_predictions(&picks, &right_game).len(), 1);
    }

    #[test]
    fn test_both_sides_required() {
        let picks = vec![pick(Sport::NBA, "Los Angeles Lakers", "Boston Celtics")];
        let hit = result(Sport::NBA, "LA Lakers", "Boston Celtics");
        assert_eq!(matching_predictions(&picks, &hit).len(), 1);

        // Home matches, away does not
        let miss = result(Sport::NBA, "LA Lakers", "Boston Bruins");
        assert!(matching_predictions(&picks, &miss).is_empty());
    }

    #[test]
    fn test_sport_must_agree() {
        let picks = vec![pick(Sport::NBA, "Los Angeles Lakers", "Boston Celtics")];
        let r = result(Sport::NHL, "LA Lakers", "Boston Celtics");
        assert!(matching_predictions(&picks, &r).is_empty());
    }

    #[test]
    fn test_terminal_picks_never_rematch() {
        let mut completed = pick(Sport::NBA, "Los Angeles Lakers", "Boston Celtics");
        completed.game_status = GameStatus::Completed;
        let mut cancelled = pick(Sport::NBA, "Los Angeles Lakers", "Boston Celtics");
        cancelled.game_status = GameStatus::Cancelled;
        let mut live = pick(Sport::NBA, "Los Angeles Lakers", "Boston Celtics");
        live.game_status = GameStatus::InProgress;

        let picks = vec![completed, cancelled, live];
        let r = result(Sport::NBA, "Los Angeles Lakers", "Boston Celtics");
        let matched = matching_predictions(&picks, &r);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].game_status, GameStatus::InProgress);
    }

    #[test]
    fn test_missing_team_names_never_match() {
        let mut p = pick(Sport::NBA, "", "Boston Celtics");
        p.game_status = GameStatus::Pending;
        let picks = vec![p];
        let r = result(Sport::NBA, "Los Angeles Lakers", "Boston Celtics");
        assert!(matching_predictions(&picks, &r).is_empty());
    }

    #[test]
    fn test_multiple_users_all_match() {
        let picks = vec![
            pick(Sport::MLB, "New York Yankees", "Boston Red Sox"),
            pick(Sport::MLB, "NY Yankees", "Boston Red Sox"),
        ];
        let r = result(Sport::MLB, "New York Yankees", "Boston Red Sox");
        assert_eq!(matching_predictions(&picks, &r).len(), 2);
    }
}
