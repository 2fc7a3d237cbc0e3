use async_trait::async_trait;
use chrono::NaiveDate;
use academy_core::model::{AttemptId, LessonId, QuizAttempt, UserProgress};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

fn ser<E: fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

//
// ─── PROGRESS KEYS ─────────────────────────────────────────────────────────────
//

/// Keys of the progress key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProgressKey {
    TotalScore,
    Level,
    StreakDays,
    LastPlayDate,
    CompletedLessons,
    PerfectLessons,
    OnboardingCompleted,
    SelectedTheme,
}

impl ProgressKey {
    pub const ALL: [ProgressKey; 8] = [
        ProgressKey::TotalScore,
        ProgressKey::Level,
        ProgressKey::StreakDays,
        ProgressKey::LastPlayDate,
        ProgressKey::CompletedLessons,
        ProgressKey::PerfectLessons,
        ProgressKey::OnboardingCompleted,
        ProgressKey::SelectedTheme,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressKey::TotalScore => "total_score",
            ProgressKey::Level => "level",
            ProgressKey::StreakDays => "streak_days",
            ProgressKey::LastPlayDate => "last_play_date",
            ProgressKey::CompletedLessons => "completed_lessons",
            ProgressKey::PerfectLessons => "perfect_lessons",
            ProgressKey::OnboardingCompleted => "onboarding_completed",
            ProgressKey::SelectedTheme => "selected_theme",
        }
    }
}

impl fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressKey {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StorageError::Serialization(format!("unknown progress key: {s}")))
    }
}

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// String encoding of `UserProgress` for the key-value store.
///
/// Missing keys read as defaults, so a fresh store loads as a new learner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressRecord {
    pub total_score: Option<String>,
    pub level: Option<String>,
    pub streak_days: Option<String>,
    pub last_play_date: Option<String>,
    pub completed_lessons: Option<String>,
    pub perfect_lessons: Option<String>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        Self {
            total_score: Some(progress.total_score().to_string()),
            level: Some(progress.level().to_string()),
            streak_days: Some(progress.streak_days().to_string()),
            last_play_date: progress.last_play_date().map(|d| d.to_string()),
            completed_lessons: Some(join_ids(progress.completed_lessons())),
            perfect_lessons: Some(join_ids(progress.perfect_lessons())),
        }
    }

    /// Pairs to write; `None` entries are removed from the store.
    #[must_use]
    pub fn entries(&self) -> [(ProgressKey, Option<&str>); 6] {
        [
            (ProgressKey::TotalScore, self.total_score.as_deref()),
            (ProgressKey::Level, self.level.as_deref()),
            (ProgressKey::StreakDays, self.streak_days.as_deref()),
            (ProgressKey::LastPlayDate, self.last_play_date.as_deref()),
            (
                ProgressKey::CompletedLessons,
                self.completed_lessons.as_deref(),
            ),
            (ProgressKey::PerfectLessons, self.perfect_lessons.as_deref()),
        ]
    }

    /// Decode the record back into domain progress.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed values.
    pub fn into_progress(self) -> Result<UserProgress, StorageError> {
        let total_score = parse_or(self.total_score.as_deref(), 0_u64)?;
        let level = parse_or(self.level.as_deref(), 1_u32)?;
        let streak_days = parse_or(self.streak_days.as_deref(), 0_u32)?;
        let last_play_date = self
            .last_play_date
            .as_deref()
            .map(NaiveDate::from_str)
            .transpose()
            .map_err(ser)?;
        let completed = split_ids(self.completed_lessons.as_deref())?;
        let perfect = split_ids(self.perfect_lessons.as_deref())?;

        UserProgress::from_persisted(
            total_score,
            level,
            streak_days,
            last_play_date,
            completed,
            perfect,
        )
        .map_err(ser)
    }
}

fn parse_or<T>(raw: Option<&str>, default: T) -> Result<T, StorageError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map_or(Ok(default), |value| value.trim().parse::<T>().map_err(ser))
}

fn join_ids(ids: &BTreeSet<LessonId>) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn split_ids(raw: Option<&str>) -> Result<BTreeSet<LessonId>, StorageError> {
    raw.unwrap_or_default()
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.parse::<LessonId>().map_err(ser))
        .collect()
}

//
// ─── REPOSITORY CONTRACTS ──────────────────────────────────────────────────────
//

/// Key-value store behind every read and write of learner progress.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Read a raw value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be read.
    async fn get(&self, key: ProgressKey) -> Result<Option<String>, StorageError>;

    /// Write a raw value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, key: ProgressKey, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be removed.
    async fn remove(&self, key: ProgressKey) -> Result<(), StorageError>;

    /// Load the progress aggregate, defaulting missing keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures or malformed values.
    async fn load_progress(&self) -> Result<UserProgress, StorageError> {
        let record = ProgressRecord {
            total_score: self.get(ProgressKey::TotalScore).await?,
            level: self.get(ProgressKey::Level).await?,
            streak_days: self.get(ProgressKey::StreakDays).await?,
            last_play_date: self.get(ProgressKey::LastPlayDate).await?,
            completed_lessons: self.get(ProgressKey::CompletedLessons).await?,
            perfect_lessons: self.get(ProgressKey::PerfectLessons).await?,
        };
        record.into_progress()
    }

    /// Persist the progress aggregate key by key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any key cannot be written.
    async fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let record = ProgressRecord::from_progress(progress);
        for (key, value) in record.entries() {
            match value {
                Some(value) => self.set(key, value).await?,
                None => self.remove(key).await?,
            }
        }
        Ok(())
    }
}

/// Stored attempt with its row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRow {
    pub id: AttemptId,
    pub attempt: QuizAttempt,
}

impl AttemptRow {
    #[must_use]
    pub fn new(id: AttemptId, attempt: QuizAttempt) -> Self {
        Self { id, attempt }
    }
}

/// History of finished quizzes.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Append an attempt and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn append_attempt(&self, attempt: &QuizAttempt) -> Result<AttemptId, StorageError>;

    /// Fetch an attempt by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_attempt(&self, id: AttemptId) -> Result<QuizAttempt, StorageError>;

    /// Most recent attempts first (by completion time, then id).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn list_recent(&self, limit: u32) -> Result<Vec<AttemptRow>, StorageError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<ProgressKey, String>>>,
    attempts: Arc<Mutex<Vec<QuizAttempt>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get(&self, key: ProgressKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn set(&self, key: ProgressKey, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: ProgressKey) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&key);
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn append_attempt(&self, attempt: &QuizAttempt) -> Result<AttemptId, StorageError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(attempt.clone());
        let id = i64::try_from(guard.len()).map_err(ser)?;
        Ok(AttemptId::new(id))
    }

    async fn get_attempt(&self, id: AttemptId) -> Result<QuizAttempt, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        usize::try_from(id.value() - 1)
            .ok()
            .and_then(|index| guard.get(index))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<AttemptRow>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows = guard
            .iter()
            .enumerate()
            .map(|(index, attempt)| {
                let id = i64::try_from(index + 1).map_err(ser)?;
                Ok(AttemptRow::new(AttemptId::new(id), attempt.clone()))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;
        rows.sort_by(|a, b| {
            b.attempt
                .completed_at()
                .cmp(&a.attempt.completed_at())
                .then(b.id.cmp(&a.id))
        });
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo);
        Self { progress, attempts }
    }
}
