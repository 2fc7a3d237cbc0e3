use std::sync::Arc;

use academy_core::model::{
    Achievement, Lesson, LessonCompletion, LessonId, StreakUpdate, Theme, UserProgress,
    unlocked_achievements,
};
use storage::repository::{ProgressKey, ProgressRepository};
use tracing::info;

use crate::Clock;
use crate::error::ProgressServiceError;

/// Points awarded per correct answer in any quiz.
pub const POINTS_PER_CORRECT: u64 = 100;

/// What a single award changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub progress: UserProgress,
    pub points: u64,
    pub level_up: Option<u32>,
    pub lesson: Option<LessonCompletion>,
    pub streak: StreakUpdate,
}

/// Reads and writes learner progress through the injected repository.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, repo }
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures.
    pub async fn load(&self) -> Result<UserProgress, ProgressServiceError> {
        Ok(self.repo.load_progress().await?)
    }

    /// Add points and count today towards the streak.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures.
    pub async fn add_score(&self, points: u64) -> Result<ProgressUpdate, ProgressServiceError> {
        self.record(points, None).await
    }

    /// Add points, optionally mark a lesson completed, and update the streak
    /// in a single load and save.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures.
    pub async fn record(
        &self,
        points: u64,
        lesson: Option<(LessonId, bool)>,
    ) -> Result<ProgressUpdate, ProgressServiceError> {
        let mut progress = self.repo.load_progress().await?;
        let level_before = progress.level();
        progress.add_score(points);
        let lesson = lesson.map(|(id, perfect)| progress.complete_lesson(id, perfect));
        let level_up = Some(progress.level()).filter(|&level| level > level_before);
        let streak = progress.update_streak(self.clock.today());
        self.repo.save_progress(&progress).await?;

        if let Some(level) = level_up {
            info!(level, total_score = progress.total_score(), "level up");
        }
        Ok(ProgressUpdate {
            progress,
            points,
            level_up,
            lesson,
            streak,
        })
    }

    /// Coins spendable on themes; one coin per point.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures.
    pub async fn coins(&self) -> Result<u64, ProgressServiceError> {
        Ok(self.load().await?.total_score())
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures.
    pub async fn achievements(
        &self,
        catalog: &[Lesson],
    ) -> Result<Vec<Achievement>, ProgressServiceError> {
        let progress = self.load().await?;
        Ok(unlocked_achievements(&progress, catalog))
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures.
    pub async fn unlocked_themes(&self) -> Result<Vec<Theme>, ProgressServiceError> {
        let progress = self.load().await?;
        Ok(Theme::unlocked(progress.level(), progress.total_score()))
    }

    /// The stored theme, or the default when none was picked.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures or an unknown id.
    pub async fn selected_theme(&self) -> Result<Theme, ProgressServiceError> {
        match self.repo.get(ProgressKey::SelectedTheme).await? {
            Some(id) => Ok(id.parse()?),
            None => Ok(Theme::default()),
        }
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError::ThemeLocked` if the learner has not
    /// reached the theme's level and coin requirement.
    pub async fn select_theme(&self, theme: Theme) -> Result<(), ProgressServiceError> {
        let progress = self.load().await?;
        if !theme.is_unlocked(progress.level(), progress.total_score()) {
            return Err(ProgressServiceError::ThemeLocked(theme));
        }
        self.repo.set(ProgressKey::SelectedTheme, theme.id()).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures.
    pub async fn onboarding_completed(&self) -> Result<bool, ProgressServiceError> {
        let value = self.repo.get(ProgressKey::OnboardingCompleted).await?;
        Ok(value.as_deref() == Some("true"))
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError` on storage failures.
    pub async fn complete_onboarding(&self) -> Result<(), ProgressServiceError> {
        self.repo.set(ProgressKey::OnboardingCompleted, "true").await?;
        Ok(())
    }
}
