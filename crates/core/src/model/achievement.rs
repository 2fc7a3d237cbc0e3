use std::collections::BTreeSet;

use crate::model::lesson::{Category, Lesson};
use crate::model::progress::UserProgress;

/// Milestones shown on the profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Achievement {
    FirstLesson,
    WeekStreak,
    HundredPoints,
    Perfectionist,
    Master,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstLesson,
        Achievement::WeekStreak,
        Achievement::HundredPoints,
        Achievement::Perfectionist,
        Achievement::Master,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstLesson => "First Lesson",
            Achievement::WeekStreak => "7-Day Streak",
            Achievement::HundredPoints => "100 Points",
            Achievement::Perfectionist => "Perfectionist",
            Achievement::Master => "Master",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstLesson => "You completed your first lesson",
            Achievement::WeekStreak => "You maintained a 7-day streak",
            Achievement::HundredPoints => "You reached 100 points",
            Achievement::Perfectionist => "Get 100% in 5 lessons",
            Achievement::Master => "Complete all categories",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Achievement::FirstLesson => "🏆",
            Achievement::WeekStreak => "🔥",
            Achievement::HundredPoints => "⭐",
            Achievement::Perfectionist => "🎯",
            Achievement::Master => "🌟",
        }
    }

    /// Whether `progress` satisfies this achievement.
    ///
    /// `catalog` maps completed lessons to categories for `Master`.
    #[must_use]
    pub fn is_unlocked(self, progress: &UserProgress, catalog: &[Lesson]) -> bool {
        match self {
            Achievement::FirstLesson => !progress.completed_lessons().is_empty(),
            Achievement::WeekStreak => progress.streak_days() >= 7,
            Achievement::HundredPoints => progress.total_score() >= 100,
            Achievement::Perfectionist => progress.perfect_lessons().len() >= 5,
            Achievement::Master => {
                let covered: BTreeSet<Category> = catalog
                    .iter()
                    .filter(|lesson| progress.has_completed(lesson.id()))
                    .map(Lesson::category)
                    .collect();
                Category::ALL.iter().all(|cat| covered.contains(cat))
            }
        }
    }
}

/// Every achievement currently unlocked, in display order.
#[must_use]
pub fn unlocked_achievements(progress: &UserProgress, catalog: &[Lesson]) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|achievement| achievement.is_unlocked(progress, catalog))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::LessonId;
    use crate::model::lesson::Difficulty;

    fn catalog() -> Vec<Lesson> {
        [
            (1, Category::Spanish),
            (5, Category::Geography),
            (7, Category::Culture),
            (10, Category::Cuisine),
        ]
        .into_iter()
        .map(|(id, cat)| {
            Lesson::new(LessonId::new(id), cat, format!("L{id}"), "", Difficulty::Easy).unwrap()
        })
        .collect()
    }

    #[test]
    fn nothing_unlocked_for_new_learner() {
        assert!(unlocked_achievements(&UserProgress::new(), &catalog()).is_empty());
    }

    #[test]
    fn first_lesson_also_reaches_hundred_points() {
        let mut progress = UserProgress::new();
        progress.complete_lesson(LessonId::new(1), false);
        assert_eq!(
            unlocked_achievements(&progress, &catalog()),
            vec![Achievement::FirstLesson, Achievement::HundredPoints]
        );
    }

    #[test]
    fn master_needs_every_category() {
        let mut progress = UserProgress::new();
        for id in [1, 5, 7] {
            progress.complete_lesson(LessonId::new(id), false);
        }
        assert!(!Achievement::Master.is_unlocked(&progress, &catalog()));
        progress.complete_lesson(LessonId::new(10), false);
        assert!(Achievement::Master.is_unlocked(&progress, &catalog()));
    }

    #[test]
    fn perfectionist_counts_perfect_lessons() {
        let mut progress = UserProgress::new();
        for id in 1..=4 {
            progress.complete_lesson(LessonId::new(id), true);
        }
        assert!(!Achievement::Perfectionist.is_unlocked(&progress, &catalog()));
        progress.complete_lesson(LessonId::new(5), true);
        assert!(Achievement::Perfectionist.is_unlocked(&progress, &catalog()));
    }
}
