//! Centralized tuning constants for the Mathrun session simulators.
//!
//! The thresholds below define the synthetic player model and the
//! recommendation battery.

// Desktop session loop -------------------------------------------------------
pub(crate) const DESKTOP_MAX_TIME_MS: f64 = 180_000.0;
pub(crate) const DESKTOP_MAX_SCORE: u32 = 500;
pub(crate) const DESKTOP_COMPLETION_SCORE: u32 = 300;
pub(crate) const DESKTOP_COMPLETION_TIME_MS: f64 = 120_000.0;
pub(crate) const DESKTOP_START_DIFFICULTY: f64 = 1.0;
pub(crate) const DESKTOP_MAX_DIFFICULTY: f64 = 3.0;
pub(crate) const DESKTOP_DIFFICULTY_PENALTY: f64 = 0.1;
pub(crate) const DESKTOP_DIFFICULTY_STEP: f64 = 0.1;
pub(crate) const DESKTOP_MILESTONE_DIFFICULTY_STEP: f64 = 0.2;
pub(crate) const DESKTOP_MILESTONE_SCORE: u32 = 100;
pub(crate) const DESKTOP_PROBLEM_LEVEL_STEP: u32 = 50;
pub(crate) const DESKTOP_BASE_POINTS: f64 = 10.0;
pub(crate) const FRUSTRATION_FAILURE_THRESHOLD: u32 = 3;
pub(crate) const FRUSTRATION_PAUSE_MS: f64 = 5_000.0;
pub(crate) const CURIOUS_PAUSE_BASE_CHANCE: f64 = 0.1;
pub(crate) const CURIOUS_PAUSE_MS: f64 = 3_000.0;

// Desktop reaction time --------------------------------------------------------
pub(crate) const DESKTOP_REACTION_BASE_MS: f64 = 2_000.0;
pub(crate) const DESKTOP_REACTION_SKILL_MS: f64 = 1_500.0;
pub(crate) const DESKTOP_REACTION_DIFFICULTY_MS: f64 = 200.0;
pub(crate) const DESKTOP_REACTION_JITTER_MS: f64 = 1_000.0;

// Frustration model ------------------------------------------------------------
pub(crate) const QUIT_PER_FAILURE: f64 = 0.2;
pub(crate) const QUIT_PATIENCE_RELIEF: f64 = 0.02;
pub(crate) const QUIT_PROBABILITY_CAP: f64 = 0.8;
pub(crate) const QUIT_SCORE_CEILING: u32 = 50;
pub(crate) const FRUSTRATION_PAUSE_CHANCE: f64 = 0.6;
pub(crate) const SPEED_DOWN_FAILURES: u32 = 4;
pub(crate) const SPEED_UP_MAX_FAILURES: u32 = 2;
pub(crate) const SPEED_UP_MIN_PATIENCE: u32 = 8;
pub(crate) const SPEED_UP_CHANCE: f64 = 0.3;

// Mobile session loop ----------------------------------------------------------
pub(crate) const MOBILE_MAX_TIME_MS: f64 = 120_000.0;
pub(crate) const MOBILE_MAX_SCORE: u32 = 400;
pub(crate) const MOBILE_FRUSTRATION_LIMIT: f64 = 10.0;
pub(crate) const MOBILE_SUCCESS_SCORE: u32 = 200;
pub(crate) const MOBILE_SUCCESS_FRUSTRATION: f64 = 8.0;
pub(crate) const MOBILE_PROBLEM_LEVEL_STEP: u32 = 100;
pub(crate) const MOBILE_MAX_PROBLEM_LEVEL: u32 = 3;
pub(crate) const MOBILE_BASE_POINTS: u32 = 10;
pub(crate) const CANVAS_SIZING_CHANCE: f64 = 0.3;
pub(crate) const CANVAS_SIZING_MS: f64 = 2_000.0;
pub(crate) const TOUCH_RETRY_MS: f64 = 1_000.0;
pub(crate) const TOUCH_MISS_FRUSTRATION: f64 = 0.5;
pub(crate) const KEYBOARD_OBSTRUCTION_CHANCE: f64 = 0.4;
pub(crate) const KEYBOARD_ADJUST_MS: f64 = 2_000.0;
pub(crate) const SMALL_SCREEN_UI_FACTOR: f64 = 0.85;
pub(crate) const LARGER_SCREEN_UI_FACTOR: f64 = 0.95;
pub(crate) const TOUCH_MISS_ACCURACY_FACTOR: f64 = 0.7;
pub(crate) const CORRECT_FRUSTRATION_RELIEF: f64 = 0.2;
pub(crate) const INTERRUPTION_CHANCE: f64 = 0.1;
pub(crate) const APP_BACKGROUND_ABANDON_CHANCE: f64 = 0.3;
pub(crate) const PAUSE_PROBE_CHANCE: f64 = 0.15;
pub(crate) const PAUSE_PROBE_MIN_SCORE: u32 = 50;
pub(crate) const PAUSE_PROBE_MS: f64 = 3_000.0;
pub(crate) const SMALL_SCREEN_BUTTON_FACTOR: f64 = 0.7;
pub(crate) const ORIENTATION_FLIP_CHANCE: f64 = 0.05;
pub(crate) const ORIENTATION_FLIP_MS: f64 = 3_000.0;
pub(crate) const ROTATION_LAYOUT_CHANCE: f64 = 0.4;
pub(crate) const SLOWDOWN_AFTER_MS: f64 = 60_000.0;
pub(crate) const SLOWDOWN_CHANCE: f64 = 0.1;
pub(crate) const SLOWDOWN_MS: f64 = 500.0;

// Mobile reaction time ---------------------------------------------------------
pub(crate) const MOBILE_REACTION_BASE_MS: f64 = 2_500.0;
pub(crate) const MOBILE_REACTION_SMALL_MS: f64 = 800.0;
pub(crate) const MOBILE_REACTION_LARGER_MS: f64 = 200.0;
pub(crate) const MOBILE_REACTION_TOUCH_MS: f64 = 1_000.0;
pub(crate) const MOBILE_REACTION_JITTER_MS: f64 = 800.0;

// Feedback -----------------------------------------------------------------------
pub(crate) const RATING_MIN: f64 = 1.0;
pub(crate) const RATING_MAX: f64 = 10.0;
pub(crate) const ENJOYMENT_BASE: f64 = 5.0;
pub(crate) const ENJOYMENT_SUCCESS_WEIGHT: f64 = 4.0;
pub(crate) const ENJOYMENT_COMPLETION_BONUS: f64 = 2.0;
pub(crate) const EASY_SUCCESS_RATE: f64 = 0.8;
pub(crate) const HARD_SUCCESS_RATE: f64 = 0.3;
pub(crate) const CONTROLS_BASE: f64 = 7.0;
pub(crate) const CONTROLS_SPREAD: f64 = 2.0;
pub(crate) const CONTROLS_FEATURE_NUDGE: f64 = 0.5;
pub(crate) const EXPERT_FAST_FINISH_MS: f64 = 60_000.0;
pub(crate) const USABILITY_START: f64 = 100.0;
pub(crate) const USABILITY_SUCCESS_BONUS: f64 = 20.0;
pub(crate) const USABILITY_TOUCH_WEIGHT: f64 = 20.0;
pub(crate) const USABILITY_TOUCH_OFFSET: f64 = 10.0;

// Recommendation battery -----------------------------------------------------------
pub(crate) const LOW_COMPLETION_RATE: f64 = 0.6;
pub(crate) const HIGH_RAGEQUIT_RATE: f64 = 0.2;
pub(crate) const HIGH_PAUSE_USAGE_RATIO: f64 = 0.8;
pub(crate) const LOW_ENJOYMENT: f64 = 6.0;
pub(crate) const USER_REQUEST_MIN_COUNT: u32 = 5;
pub(crate) const LOW_MOBILE_SUCCESS_RATE: f64 = 0.5;
pub(crate) const LOW_TOUCH_ACCURACY: f64 = 0.8;
pub(crate) const LOW_USABILITY_SCORE: f64 = 70.0;
pub(crate) const ISSUE_COUNT_THRESHOLD: u32 = 5;
pub(crate) const ANDROID_SESSION_THRESHOLD: u32 = 5;
