use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::ids::LessonId;

/// Points between consecutive levels.
pub const POINTS_PER_LEVEL: u64 = 1_000;

/// Bonus granted the first time a lesson is completed.
pub const LESSON_COMPLETION_BONUS: u64 = 100;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("lesson {0} is marked perfect but not completed")]
    PerfectNotCompleted(LessonId),
}

//
// ─── OUTCOMES ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakUpdate {
    /// Already played today (or the date went backwards).
    Unchanged,
    /// Played yesterday; streak grew by one.
    Extended,
    /// First play, or a gap of more than one day.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonCompletion {
    pub first_time: bool,
    pub newly_perfect: bool,
    pub bonus: u64,
}

//
// ─── USER PROGRESS ────────────────────────────────────────────────────────────
//

/// Stored shape of `UserProgress`, checked on the way in.
#[derive(Debug, Clone, Deserialize)]
struct PersistedProgress {
    total_score: u64,
    level: u32,
    streak_days: u32,
    last_play_date: Option<NaiveDate>,
    completed_lessons: BTreeSet<LessonId>,
    perfect_lessons: BTreeSet<LessonId>,
}

impl TryFrom<PersistedProgress> for UserProgress {
    type Error = ProgressError;

    fn try_from(raw: PersistedProgress) -> Result<Self, Self::Error> {
        Self::from_persisted(
            raw.total_score,
            raw.level,
            raw.streak_days,
            raw.last_play_date,
            raw.completed_lessons,
            raw.perfect_lessons,
        )
    }
}

/// Long-lived learner progress: points, level, streak and completed lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedProgress")]
pub struct UserProgress {
    total_score: u64,
    level: u32,
    streak_days: u32,
    last_play_date: Option<NaiveDate>,
    completed_lessons: BTreeSet<LessonId>,
    perfect_lessons: BTreeSet<LessonId>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            total_score: 0,
            level: 1,
            streak_days: 0,
            last_play_date: None,
            completed_lessons: BTreeSet::new(),
            perfect_lessons: BTreeSet::new(),
        }
    }
}

impl UserProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate progress from storage. A stored level of 0 reads as level 1.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::PerfectNotCompleted` if a perfect lesson is
    /// missing from the completed set.
    pub fn from_persisted(
        total_score: u64,
        level: u32,
        streak_days: u32,
        last_play_date: Option<NaiveDate>,
        completed_lessons: BTreeSet<LessonId>,
        perfect_lessons: BTreeSet<LessonId>,
    ) -> Result<Self, ProgressError> {
        if let Some(id) = perfect_lessons.difference(&completed_lessons).next() {
            return Err(ProgressError::PerfectNotCompleted(*id));
        }
        Ok(Self {
            total_score,
            level: level.max(1),
            streak_days,
            last_play_date,
            completed_lessons,
            perfect_lessons,
        })
    }

    /// Level implied by a score: one level per thousand points, starting at 1.
    #[must_use]
    pub fn level_for_score(total_score: u64) -> u32 {
        u32::try_from(total_score / POINTS_PER_LEVEL)
            .unwrap_or(u32::MAX - 1)
            .saturating_add(1)
    }

    /// Add points; returns the new level if this crossed a level boundary.
    ///
    /// The level never decreases.
    pub fn add_score(&mut self, points: u64) -> Option<u32> {
        self.total_score = self.total_score.saturating_add(points);
        let level = Self::level_for_score(self.total_score);
        if level > self.level {
            self.level = level;
            return Some(level);
        }
        None
    }

    /// Mark a lesson completed, granting the bonus the first time only.
    pub fn complete_lesson(&mut self, id: LessonId, perfect: bool) -> LessonCompletion {
        let first_time = self.completed_lessons.insert(id);
        let newly_perfect = perfect && self.perfect_lessons.insert(id);
        let bonus = if first_time {
            self.add_score(LESSON_COMPLETION_BONUS);
            LESSON_COMPLETION_BONUS
        } else {
            0
        };
        LessonCompletion {
            first_time,
            newly_perfect,
            bonus,
        }
    }

    /// Count consecutive play days.
    pub fn update_streak(&mut self, today: NaiveDate) -> StreakUpdate {
        let update = match self.last_play_date {
            Some(last) if last >= today => return StreakUpdate::Unchanged,
            Some(last) if last.succ_opt() == Some(today) => {
                self.streak_days = self.streak_days.saturating_add(1);
                StreakUpdate::Extended
            }
            _ => {
                self.streak_days = 1;
                StreakUpdate::Reset
            }
        };
        self.last_play_date = Some(today);
        update
    }

    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    #[must_use]
    pub fn last_play_date(&self) -> Option<NaiveDate> {
        self.last_play_date
    }

    #[must_use]
    pub fn completed_lessons(&self) -> &BTreeSet<LessonId> {
        &self.completed_lessons
    }

    #[must_use]
    pub fn perfect_lessons(&self) -> &BTreeSet<LessonId> {
        &self.perfect_lessons
    }

    #[must_use]
    pub fn has_completed(&self, id: LessonId) -> bool {
        self.completed_lessons.contains(&id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn fresh_progress_starts_at_level_one() {
        let progress = UserProgress::new();
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.total_score(), 0);
    }

    #[test]
    fn level_tracks_thousands() {
        let mut progress = UserProgress::new();
        assert_eq!(progress.add_score(999), None);
        assert_eq!(progress.add_score(1), Some(2));
        assert_eq!(progress.add_score(2_500), Some(4));
        assert_eq!(progress.level(), 4);
    }

    #[test]
    fn persisted_level_is_never_lowered() {
        let mut progress = UserProgress::from_persisted(
            0,
            5,
            0,
            None,
            BTreeSet::new(),
            BTreeSet::new(),
        )
        .unwrap();
        assert_eq!(progress.add_score(1_500), None);
        assert_eq!(progress.level(), 5);
    }

    #[test]
    fn stored_level_zero_reads_as_one() {
        let progress =
            UserProgress::from_persisted(0, 0, 0, None, BTreeSet::new(), BTreeSet::new())
                .unwrap();
        assert_eq!(progress.level(), 1);
    }

    #[test]
    fn perfect_lessons_must_be_completed() {
        let perfect = BTreeSet::from([LessonId::new(3)]);
        let err = UserProgress::from_persisted(0, 1, 0, None, BTreeSet::new(), perfect)
            .unwrap_err();
        assert_eq!(err, ProgressError::PerfectNotCompleted(LessonId::new(3)));
    }

    #[test]
    fn lesson_bonus_is_granted_once() {
        let mut progress = UserProgress::new();
        let first = progress.complete_lesson(LessonId::new(1), false);
        assert!(first.first_time);
        assert_eq!(first.bonus, LESSON_COMPLETION_BONUS);

        let again = progress.complete_lesson(LessonId::new(1), true);
        assert!(!again.first_time);
        assert!(again.newly_perfect);
        assert_eq!(again.bonus, 0);
        assert_eq!(progress.total_score(), LESSON_COMPLETION_BONUS);
        assert!(progress.perfect_lessons().contains(&LessonId::new(1)));
    }

    #[test]
    fn streak_rules() {
        let mut progress = UserProgress::new();
        assert_eq!(progress.update_streak(day(1)), StreakUpdate::Reset);
        assert_eq!(progress.streak_days(), 1);

        assert_eq!(progress.update_streak(day(1)), StreakUpdate::Unchanged);
        assert_eq!(progress.update_streak(day(2)), StreakUpdate::Extended);
        assert_eq!(progress.update_streak(day(3)), StreakUpdate::Extended);
        assert_eq!(progress.streak_days(), 3);

        assert_eq!(progress.update_streak(day(6)), StreakUpdate::Reset);
        assert_eq!(progress.streak_days(), 1);
        assert_eq!(progress.last_play_date(), Some(day(6)));
    }

    #[test]
    fn streak_ignores_dates_in_the_past() {
        let mut progress = UserProgress::new();
        progress.update_streak(day(10));
        assert_eq!(progress.update_streak(day(9)), StreakUpdate::Unchanged);
        assert_eq!(progress.last_play_date(), Some(day(10)));
    }

    #[test]
    fn deserializing_checks_persisted_invariants() {
        let orphan_perfect = r#"{"total_score":300,"level":1,"streak_days":2,"last_play_date":"2024-03-10","completed_lessons":[],"perfect_lessons":[4]}"#;
        assert!(serde_json::from_str::<UserProgress>(orphan_perfect).is_err());

        let level_zero = r#"{"total_score":0,"level":0,"streak_days":0,"last_play_date":null,"completed_lessons":[1],"perfect_lessons":[1]}"#;
        let progress: UserProgress = serde_json::from_str(level_zero).unwrap();
        assert_eq!(progress.level(), 1);
        assert!(progress.perfect_lessons().contains(&LessonId::new(1)));
    }
}
