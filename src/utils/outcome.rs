//! Predicted-outcome extraction from free-text analysis.
//!
//! The analysis string comes from a language model and is stored opaquely;
//! at lock-in time we classify which side (or total direction) it actually
//! recommends. Heuristic by nature: anything ambiguous becomes `Unknown`,
//! which the grader later skips rather than guessing.

use crate::models::{PredictedOutcome, PredictionType};

/// Classify a prediction paragraph into a gradable outcome. Never fails;
/// the `Unknown` fallback absorbs unparseable text.
pub fn extract_predicted_outcome(
    prediction_text: &str,
    home_team: &str,
    away_team: &str,
    prediction_type: PredictionType,
) -> PredictedOutcome {
    let text = prediction_text.to_lowercase();
    let home = home_team.trim().to_lowercase();
    let away = away_team.trim().to_lowercase();

    match prediction_type {
        PredictionType::Moneyline => {
            let mentions_home = !home.is_empty() && text.contains(&home);
            let mentions_away = !away.is_empty() && text.contains(&away);
            if mentions_home && !mentions_away {
                PredictedOutcome::Home
            } else if mentions_away && !mentions_home {
                PredictedOutcome::Away
            } else if text.contains("home") {
                PredictedOutcome::Home
            } else if text.contains("away") {
                PredictedOutcome::Away
            } else {
                PredictedOutcome::Unknown
            }
        }
        PredictionType::Spread => {
            // Prefer an explicit "Pick: Team -7.5" line when present
            if let Some((_, pick_line)) = text.split_once("pick:") {
                side_named_in(pick_line, &home, &away)
            } else {
                side_named_in(&text, &home, &away)
            }
        }
        PredictionType::OverUnder => {
            if text.contains("over") {
                PredictedOutcome::Over
            } else if text.contains("under") {
                PredictedOutcome::Under
            } else {
                PredictedOutcome::Unknown
            }
        }
    }
}

fn side_named_in(text: &str, home: &str, away: &str) -> PredictedOutcome {
    if !home.is_empty() && text.contains(home) {
        PredictedOutcome::Home
    } else if !away.is_empty() && text.contains(away) {
        PredictedOutcome::Away
    } else {
        PredictedOutcome::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "Kansas City Chiefs";
    const AWAY: &str = "Buffalo Bills";

    #[test]
    fn test_moneyline_team_mention() {
        assert_eq!(
            extract_predicted_outcome(
                "Kansas City Chiefs to win by a touchdown.",
                HOME,
                AWAY,
                PredictionType::Moneyline
            ),
            PredictedOutcome::Home
        );
        assert_eq!(
            extract_predicted_outcome(
                "Expect the Buffalo Bills to edge this one late.",
                HOME,
                AWAY,
                PredictionType::Moneyline
            ),
            PredictedOutcome::Away
        );
    }

    #[test]
    fn test_moneyline_both_teams_falls_back_to_side_words() {
        assert_eq!(
            extract_predicted_outcome(
                "Kansas City Chiefs host the Buffalo Bills; take the home side.",
                HOME,
                AWAY,
                PredictionType::Moneyline
            ),
            PredictedOutcome::Home
        );
    }

    #[test]
    fn test_moneyline_unknown() {
        assert_eq!(
            extract_predicted_outcome(
                "Too close to call.",
                HOME,
                AWAY,
                PredictionType::Moneyline
            ),
            PredictedOutcome::Unknown
        );
    }

    #[test]
    fn test_spread_pick_line_wins() {
        assert_eq!(
            extract_predicted_outcome(
                "The Kansas City Chiefs are rolling. Pick: Buffalo Bills +7.5",
                HOME,
                AWAY,
                PredictionType::Spread
            ),
            PredictedOutcome::Away
        );
    }

    #[test]
    fn test_spread_first_mention_without_pick_line() {
        assert_eq!(
            extract_predicted_outcome(
                "Kansas City Chiefs cover comfortably.",
                HOME,
                AWAY,
                PredictionType::Spread
            ),
            PredictedOutcome::Home
        );
    }

    #[test]
    fn test_over_under() {
        assert_eq!(
            extract_predicted_outcome(
                "Both offenses are hot; take the Over on 47.5.",
                HOME,
                AWAY,
                PredictionType::OverUnder
            ),
            PredictedOutcome::Over
        );
        assert_eq!(
            extract_predicted_outcome(
                "Defensive slugfest, stay under the total.",
                HOME,
                AWAY,
                PredictionType::OverUnder
            ),
            PredictedOutcome::Under
        );
        assert_eq!(
            extract_predicted_outcome("No read on the total.", HOME, AWAY, PredictionType::OverUnder),
            PredictedOutcome::Unknown
        );
    }

    #[test]
    fn test_never_panics_on_empty_inputs() {
        assert_eq!(
            extract_predicted_outcome("", "", "", PredictionType::Moneyline),
            PredictedOutcome::Unknown
        );
        assert_eq!(
            extract_predicted_outcome("Pick:", HOME, AWAY, PredictionType::Spread),
            PredictedOutcome::Unknown
        );
    }
}
