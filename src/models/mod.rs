use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sports covered by the results feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    MLB,
    NBA,
    NFL,
    NHL,
    NCAAMB,
}

impl Sport {
    pub const ALL: [Sport; 5] = [
        Sport::MLB,
        Sport::NBA,
        Sport::NFL,
        Sport::NHL,
        Sport::NCAAMB,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::MLB => "MLB",
            Sport::NBA => "NBA",
            Sport::NFL => "NFL",
            Sport::NHL => "NHL",
            Sport::NCAAMB => "NCAAMB",
        }
    }
}

impl std::str::FromStr for Sport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MLB" => Ok(Sport::MLB),
            "NBA" => Ok(Sport::NBA),
            "NFL" => Ok(Sport::NFL),
            "NHL" => Ok(Sport::NHL),
            "NCAAMB" => Ok(Sport::NCAAMB),
            other => anyhow::bail!("unsupported sport: {}", other),
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a matchup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Status of a game as reported by the results feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Scheduled,
    Live,
    Completed,
}

impl ResultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Scheduled => "scheduled",
            ResultStatus::Live => "live",
            ResultStatus::Completed => "completed",
        }
    }
}

/// Lifecycle state of a stored pick. `Completed` and `Cancelled` are
/// terminal; only `Pending` and `InProgress` picks are ever re-matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Pending => "pending",
            GameStatus::InProgress => "in_progress",
            GameStatus::Completed => "completed",
            GameStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for GameStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(GameStatus::Pending),
            "in_progress" => Ok(GameStatus::InProgress),
            "completed" => Ok(GameStatus::Completed),
            "cancelled" => Ok(GameStatus::Cancelled),
            other => anyhow::bail!("unknown pick status: {}", other),
        }
    }
}

/// Bet type, fixed when the pick is locked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionType {
    #[serde(rename = "MONEYLINE")]
    Moneyline,
    #[serde(rename = "SPREAD")]
    Spread,
    #[serde(rename = "OVER_UNDER")]
    OverUnder,
}

impl PredictionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionType::Moneyline => "MONEYLINE",
            PredictionType::Spread => "SPREAD",
            PredictionType::OverUnder => "OVER_UNDER",
        }
    }
}

impl std::str::FromStr for PredictionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MONEYLINE" => Ok(PredictionType::Moneyline),
            "SPREAD" => Ok(PredictionType::Spread),
            "OVER_UNDER" => Ok(PredictionType::OverUnder),
            other => anyhow::bail!("unknown prediction type: {}", other),
        }
    }
}

/// Outcome extracted from the analysis text at lock-in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictedOutcome {
    #[serde(rename = "home")]
    Home,
    #[serde(rename = "away")]
    Away,
    Over,
    Under,
    Unknown,
}

impl PredictedOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictedOutcome::Home => "home",
            PredictedOutcome::Away => "away",
            PredictedOutcome::Over => "Over",
            PredictedOutcome::Under => "Under",
            PredictedOutcome::Unknown => "Unknown",
        }
    }

    /// Infallible parse of the stored string form. Legacy rows hold
    /// free-form values, so anything unrecognized becomes `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "home" => PredictedOutcome::Home,
            "away" => PredictedOutcome::Away,
            "over" => PredictedOutcome::Over,
            "under" => PredictedOutcome::Under,
            _ => PredictedOutcome::Unknown,
        }
    }
}

/// Canonical game record produced by the feed adapter. Ephemeral:
/// recomputed on every fetch and only cached for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub external_id: String,
    pub sport: Sport,
    pub home_team: String,
    pub away_team: String,
    pub status: ResultStatus,
    pub home_score: i32,
    pub away_score: i32,
    pub winner: Option<Side>,
}

impl GameResult {
    /// A winner exists only for a completed game with a score difference.
    pub fn derive_winner(status: ResultStatus, home_score: i32, away_score: i32) -> Option<Side> {
        if status != ResultStatus::Completed {
            return None;
        }
        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Final score line using the feed's own team names,
    /// e.g. "Boston Red Sox 3 - New York Yankees 5"
    pub fn final_score_line(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.away_team, self.away_score, self.home_team, self.home_score
        )
    }
}

/// A user's locked-in pick. `game_id` comes from the odds provider and
/// shares no namespace with `GameResult::external_id`, which is why the
/// team names are captured here for later matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub game_id: String,
    pub sport: Sport,
    pub home_team: String,
    pub away_team: String,
    pub prediction_type: PredictionType,
    pub prediction_text: String,
    pub predicted_outcome: PredictedOutcome,
    pub spread_line: Option<f64>,
    pub over_under_line: Option<f64>,
    pub game_status: GameStatus,
    pub actual_outcome: Option<String>,
    pub is_correct: Option<bool>,
    pub game_final_score: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    /// Build a fresh pending pick. Lines are frozen here; the feed's lines
    /// may move later but grading always uses these values.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        game_id: String,
        sport: Sport,
        home_team: String,
        away_team: String,
        prediction_type: PredictionType,
        prediction_text: String,
        predicted_outcome: PredictedOutcome,
        spread_line: Option<f64>,
        over_under_line: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            game_id,
            sport,
            home_team,
            away_team,
            prediction_type,
            prediction_text,
            predicted_outcome,
            spread_line,
            over_under_line,
            game_status: GameStatus::Pending,
            actual_outcome: None,
            is_correct: None,
            game_final_score: None,
            created_at: Utc::now(),
        }
    }

    /// Still eligible for matching and grading
    pub fn is_open(&self) -> bool {
        matches!(
            self.game_status,
            GameStatus::Pending | GameStatus::InProgress
        )
    }
}

/// Grading result written back to a pick. The three fields are always
/// written together in a single update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub is_correct: bool,
    pub actual_outcome: String,
    pub game_final_score: String,
}

/// Win-rate statistics over one user's graded picks. `None` means the
/// group has no completed picks, which is distinct from a true 0%.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinRates {
    pub overall: Option<f64>,
    pub moneyline: Option<f64>,
    pub spread: Option<f64>,
    pub over_under: Option<f64>,
}
