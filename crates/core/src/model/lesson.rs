use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,
}

/// Subject area a lesson belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Spanish,
    Geography,
    Culture,
    Cuisine,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Spanish,
        Category::Geography,
        Category::Culture,
        Category::Cuisine,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Spanish => "Español",
            Category::Geography => "Geografía",
            Category::Culture => "Cultura",
            Category::Cuisine => "Cocina",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LessonFields {
    id: LessonId,
    category: Category,
    title: String,
    description: String,
    difficulty: Difficulty,
    #[serde(default)]
    locked: bool,
}

impl TryFrom<LessonFields> for Lesson {
    type Error = LessonError;

    fn try_from(raw: LessonFields) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.id, raw.category, raw.title, raw.description, raw.difficulty)?
            .locked(raw.locked))
    }
}

/// A lesson node in the learning path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LessonFields")]
pub struct Lesson {
    id: LessonId,
    category: Category,
    title: String,
    description: String,
    difficulty: Difficulty,
    locked: bool,
}

impl Lesson {
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` if the title is blank.
    pub fn new(
        id: LessonId,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, LessonError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        Ok(Self {
            id,
            category,
            title,
            description: description.into().trim().to_owned(),
            difficulty,
            locked: false,
        })
    }

    #[must_use]
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_requires_title() {
        let err = Lesson::new(LessonId::new(1), Category::Spanish, "  ", "", Difficulty::Easy)
            .unwrap_err();
        assert_eq!(err, LessonError::EmptyTitle);
    }

    #[test]
    fn lessons_start_unlocked() {
        let lesson = Lesson::new(
            LessonId::new(6),
            Category::Geography,
            "Mountains and Rivers",
            "Andes, Amazon...",
            Difficulty::Hard,
        )
        .unwrap();
        assert!(!lesson.is_locked());
        assert!(lesson.locked(true).is_locked());
    }

    #[test]
    fn deserializing_rejects_blank_title() {
        let json = r#"{"id":2,"category":"Spanish","title":" ","description":"","difficulty":"Easy","locked":false}"#;
        assert!(serde_json::from_str::<Lesson>(json).is_err());

        let json = r#"{"id":2,"category":"Spanish","title":"Numbers","description":"","difficulty":"Easy","locked":true}"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.title(), "Numbers");
        assert!(lesson.is_locked());
    }
}
