//! Bet-type-specific correctness rules for completed games.

use crate::models::{Grade, GameResult, PredictedOutcome, Prediction, PredictionType, Side};

/// Result of a grading attempt. A skipped pick stays open and is retried
/// on a later run once the missing data is available; it is never written
/// back as a spurious loss.
#[derive(Debug, Clone, PartialEq)]
pub enum GradeOutcome {
    Graded(Grade),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Extraction produced `Unknown`, or the outcome does not fit the bet
    /// type (e.g. an Over on a moneyline pick)
    UnknownOutcome,
    MissingSpreadLine,
    MissingTotalLine,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::UnknownOutcome => "predicted outcome is unknown",
            SkipReason::MissingSpreadLine => "no spread line recorded",
            SkipReason::MissingTotalLine => "no over/under line recorded",
        };
        f.write_str(reason)
    }
}

/// Grade one matched pick against a completed game result.
///
/// Pure and deterministic: the same pick and result always yield the same
/// outcome, so overlapping grading runs are harmless.
///
/// A push (spread or total landing exactly on the line) grades as
/// incorrect for both sides rather than voiding the pick.
pub fn grade(pick: &Prediction, result: &GameResult) -> GradeOutcome {
    let is_correct = match pick.prediction_type {
        PredictionType::Moneyline => match pick.predicted_outcome {
            PredictedOutcome::Home => result.winner == Some(Side::Home),
            PredictedOutcome::Away => result.winner == Some(Side::Away),
            _ => return GradeOutcome::Skipped(SkipReason::UnknownOutcome),
        },
        PredictionType::Spread => {
            let Some(line) = pick.spread_line else {
                return GradeOutcome::Skipped(SkipReason::MissingSpreadLine);
            };
            // The line is quoted against the home team: -7 means home
            // favored by 7. Adding it to the home score settles the bet.
            let adjusted_home = result.home_score as f64 + line;
            match pick.predicted_outcome {
                PredictedOutcome::Home => adjusted_home > result.away_score as f64,
                PredictedOutcome::Away => (result.away_score as f64) > adjusted_home,
                _ => return GradeOutcome::Skipped(SkipReason::UnknownOutcome),
            }
        }
        PredictionType::OverUnder => {
            let Some(line) = pick.over_under_line else {
                return GradeOutcome::Skipped(SkipReason::MissingTotalLine);
            };
            let total = (result.home_score + result.away_score) as f64;
            match pick.predicted_outcome {
                PredictedOutcome::Over => total > line,
                PredictedOutcome::Under => total < line,
                _ => return GradeOutcome::Skipped(SkipReason::UnknownOutcome),
            }
        }
    };

    GradeOutcome::Graded(Grade {
        is_correct,
        actual_outcome: describe_winner(result.winner).to_string(),
        game_final_score: result.final_score_line(),
    })
}

/// Human-readable result line, independent of bet type
fn describe_winner(winner: Option<Side>) -> &'static str {
    match winner {
        Some(Side::Home) => "Home Win",
        Some(Side::Away) => "Away Win",
        None => "Draw",
    }
}
