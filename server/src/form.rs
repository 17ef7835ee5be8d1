//! Validation for the recipe form.
//!
//! A posted [`RecipeForm`] is first trimmed into [`FormValues`], which are kept
//! so a rejected form can be shown again as typed. [`validate`] is pure: it
//! never touches the store and collects every problem instead of stopping at
//! the first.

use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{NewRecipe, RecipeChanges};

pub const TITLE_MAX_CHARS: usize = 200;

/// Raw form body as posted by the browser. Missing fields read as empty.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecipeForm {
    #[serde(default)]
    pub title: Option<String>,
    /// Preparation time in minutes, as typed.
    #[serde(default)]
    pub minutes: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Trimmed values echoed back into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub title: String,
    pub minutes: String,
    pub description: String,
}

/// User-facing problems with a submission. `Display` is the message shown on
/// the page.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("所要分数は整数で入力してください。")]
    MinutesNotInteger,

    #[error("所要分数は1以上の整数で入力してください。")]
    MinutesBelowOne,

    #[error("タイトルは必須です。")]
    TitleRequired,

    #[error("タイトルは200文字以内で入力してください。")]
    TitleTooLong,

    #[error("データベースが未設定のため保存できません。")]
    DatabaseNotConfigured,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeInput {
    pub title: String,
    pub minutes: i32,
    pub description: String,
}

impl RecipeInput {
    pub fn as_new_recipe(&self) -> NewRecipe<'_> {
        NewRecipe {
            title: &self.title,
            minutes: self.minutes,
            description: Some(&self.description),
        }
    }

    pub fn as_changes(&self) -> RecipeChanges<'_> {
        RecipeChanges {
            title: &self.title,
            minutes: self.minutes,
            description: Some(&self.description),
        }
    }
}

impl From<RecipeForm> for FormValues {
    fn from(form: RecipeForm) -> Self {
        fn clean(field: Option<String>) -> String {
            field.as_deref().unwrap_or("").trim().to_string()
        }

        Self {
            title: clean(form.title),
            minutes: clean(form.minutes),
            description: clean(form.description),
        }
    }
}

/// Parses an integer the way a person types one: optional sign, then ASCII
/// or full-width digits, with single underscores allowed between digits
/// (`1_000`). Digits from other scripts (Arabic-Indic, Devanagari, ...) are
/// not accepted. Anything else, or a value outside `i32`, is `None`.
pub fn parse_minutes(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let first = raw.chars().next()?;
    let (negative, digits) = match first {
        '-' | '－' => (true, &raw[first.len_utf8()..]),
        '+' | '＋' => (false, &raw[first.len_utf8()..]),
        _ => (false, raw),
    };

    if digits.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    let mut after_digit = false;
    for c in digits.chars() {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            '０'..='９' => c as u32 - '０' as u32,
            // A single underscore may sit between two digits.
            '_' if after_digit => {
                after_digit = false;
                continue;
            }
            _ => return None,
        };
        after_digit = true;
        value = value.checked_mul(10)?.checked_add(i64::from(digit))?;
        if value > i64::from(i32::MAX) + 1 {
            return None;
        }
    }
    if !after_digit {
        return None;
    }

    let value = if negative { -value } else { value };
    i32::try_from(value).ok()
}

/// Checks trimmed form values. Every problem is reported, minutes first,
/// then title.
pub fn validate(values: &FormValues) -> Result<RecipeInput, Vec<FormError>> {
    let mut errors = Vec::new();

    let minutes = parse_minutes(&values.minutes);
    match minutes {
        None => errors.push(FormError::MinutesNotInteger),
        Some(m) if m < 1 => errors.push(FormError::MinutesBelowOne),
        Some(_) => {}
    }

    if values.title.is_empty() {
        errors.push(FormError::TitleRequired);
    } else if values.title.chars().count() > TITLE_MAX_CHARS {
        errors.push(FormError::TitleTooLong);
    }

    match minutes {
        Some(minutes) if errors.is_empty() => Ok(RecipeInput {
            title: values.title.clone(),
            minutes,
            description: values.description.clone(),
        }),
        _ => Err(errors),
    }
}
