//! Win-rate aggregation over a user's graded picks.
//!
//! Recomputed on every read rather than stored; one user's pick history is
//! small enough that this never matters. Would need a materialized rollup
//! before serving cross-user analytics.

use crate::models::{GameStatus, Prediction, PredictionType, WinRates};

/// Compute overall and per-bet-type win rates. Only completed picks with a
/// recorded grade count; an empty group yields `None`, not 0%.
pub fn compute_win_rates(picks: &[Prediction]) -> WinRates {
    let completed: Vec<&Prediction> = picks
        .iter()
        .filter(|p| p.game_status == GameStatus::Completed && p.is_correct.is_some())
        .collect();

    let by_type = |t: PredictionType| rate(completed.iter().copied().filter(|p| p.prediction_type == t));

    WinRates {
        overall: rate(completed.iter().copied()),
        moneyline: by_type(PredictionType::Moneyline),
        spread: by_type(PredictionType::Spread),
        over_under: by_type(PredictionType::OverUnder),
    }
}

fn rate<'a>(picks: impl Iterator<Item = &'a Prediction>) -> Option<f64> {
    let mut total = 0u32;
    let mut correct = 0u32;
    for pick in picks {
        total += 1;
        if pick.is_correct == Some(true) {
            correct += 1;
        }
    }
    if total == 0 {
        None
    } else {
        Some(100.0 * f64::from(correct) / f64::from(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PredictedOutcome, Sport};
    use uuid::Uuid;

    fn graded_pick(prediction_type: PredictionType, is_correct: bool) -> Prediction {
        let mut pick = Prediction::new(
            Uuid::new_v4(),
            "odds-1".to_string(),
            Sport::NBA,
            "Home".to_string(),
            "Away".to_string(),
            prediction_type,
            "analysis".to_string(),
            PredictedOutcome::Home,
            None,
            None,
        );
        pick.game_status = GameStatus::Completed;
        pick.is_correct = Some(is_correct);
        pick
    }

    #[test]
    fn test_rates_by_group() {
        // 3 moneyline (2 correct) + 1 spread (incorrect), no totals
        let picks = vec![
            graded_pick(PredictionType::Moneyline, true),
            graded_pick(PredictionType::Moneyline, true),
            graded_pick(PredictionType::Moneyline, false),
            graded_pick(PredictionType::Spread, false),
        ];
        let rates = compute_win_rates(&picks);
        assert_eq!(rates.overall, Some(50.0));
        assert!((rates.moneyline.unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(rates.spread, Some(0.0));
        assert_eq!(rates.over_under, None);
    }

    #[test]
    fn test_open_picks_are_excluded() {
        let mut pending = graded_pick(PredictionType::Moneyline, true);
        pending.game_status = GameStatus::Pending;
        pending.is_correct = None;

        let picks = vec![pending, graded_pick(PredictionType::Moneyline, false)];
        let rates = compute_win_rates(&picks);
        assert_eq!(rates.overall, Some(0.0));
        assert_eq!(rates.moneyline, Some(0.0));
    }

    #[test]
    fn test_no_data_is_distinguishable_from_zero() {
        let rates = compute_win_rates(&[]);
        assert_eq!(rates.overall, None);
        assert_eq!(rates.moneyline, None);
        assert_eq!(rates.spread, None);
        assert_eq!(rates.over_under, None);
    }
}
