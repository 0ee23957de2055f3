pub mod grading;
pub mod matching;
pub mod outcome;
pub mod win_rates;
