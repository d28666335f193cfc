//! Skill identifiers and the per-user skill snapshot.
//!
//! A `Skill` is displayed by its label (whitespace collapsed, each word
//! title-cased) and compared by its key, a case fold of the label. Two inputs
//! that differ only in case or spacing are the same skill everywhere in the
//! crate. Labels are what gets persisted, so `parse(label)` must give back the
//! same label and key.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    #[error("skill cannot be empty")]
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Skill {
    label: String,
    key: String,
}

impl Skill {
    /// Normalizes raw user or catalog text into a skill.
    pub fn parse(raw: &str) -> Result<Self, SkillError> {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return Err(SkillError::Empty);
        }

        let label = canonical_label(&collapsed);
        Ok(Self {
            key: fold_case(&label),
            label,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Title-cases until the text stops changing. One pass is not always enough:
/// "ß" upper-cases to "SS", whose second letter the next pass lower-cases.
fn canonical_label(text: &str) -> String {
    let mut label = title_case(text);
    for _ in 0..MAX_TITLE_CASE_PASSES {
        let next = title_case(&label);
        if next == label {
            break;
        }
        label = next;
    }
    label
}

const MAX_TITLE_CASE_PASSES: usize = 8;

/// Per-character upper then lower, so final sigma, sharp s and other
/// context-sensitive forms collapse to one key.
fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Upper-cases the first character of each word and lower-cases the rest.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl PartialEq for Skill {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Skill {}

impl Hash for Skill {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Skill {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Skill {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl TryFrom<String> for Skill {
    type Error = SkillError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Skill::parse(&value)
    }
}

impl From<Skill> for String {
    fn from(skill: Skill) -> Self {
        skill.label
    }
}

/// Immutable snapshot of the skills one user holds at computation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserSkills(BTreeSet<Skill>);

impl UserSkills {
    pub fn new(skills: impl IntoIterator<Item = Skill>) -> Self {
        Self(skills.into_iter().collect())
    }

    /// Parses raw skill text, collapsing entries that normalize to the same key.
    pub fn parse_all<I, S>(raw: I) -> Result<Self, SkillError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(|s| Skill::parse(s.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    pub fn contains(&self, skill: &Skill) -> bool {
        self.0.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Skill> for UserSkills {
    fn from_iter<T: IntoIterator<Item = Skill>>(iter: T) -> Self {
        Self::new(iter)
    }
}
