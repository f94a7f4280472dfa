//! Entry shapes held by the ordered section stores.
//!
//! Entries are plain values. An edit never touches a stored entry; it produces
//! a new entry via [`SectionEntry::with_field`] that the store swaps in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Section kinds
// ────────────────────────────────────────────────────────────────────────────

/// The three ordered sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
        };
        f.write_str(name)
    }
}

/// An element of an ordered section.
///
/// `Default` is the blank entry appended by the store; `with_field` returns a copy
/// of `self` with exactly one field replaced.
pub trait SectionEntry: Clone + Default + Send + Sync + 'static {
    type Field: Copy + fmt::Debug + Send;

    const SECTION: SectionKind;

    fn with_field(&self, field: Self::Field, value: String) -> Self;
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    Company,
    Position,
    Duration,
    Description,
}

impl SectionEntry for Experience {
    type Field = ExperienceField;

    const SECTION: SectionKind = SectionKind::Experience;

    fn with_field(&self, field: ExperienceField, value: String) -> Self {
        let mut next = self.clone();
        match field {
            ExperienceField::Company => next.company = value,
            ExperienceField::Position => next.position = value,
            ExperienceField::Duration => next.duration = value,
            ExperienceField::Description => next.description = value,
        }
        next
    }
}

impl FromStr for ExperienceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(ExperienceField::Company),
            "position" => Ok(ExperienceField::Position),
            "duration" => Ok(ExperienceField::Duration),
            "description" => Ok(ExperienceField::Description),
            other => Err(format!("unknown experience field '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationField {
    School,
    Degree,
    Year,
}

impl SectionEntry for Education {
    type Field = EducationField;

    const SECTION: SectionKind = SectionKind::Education;

    fn with_field(&self, field: EducationField, value: String) -> Self {
        let mut next = self.clone();
        match field {
            EducationField::School => next.school = value,
            EducationField::Degree => next.degree = value,
            EducationField::Year => next.year = value,
        }
        next
    }
}

impl FromStr for EducationField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school" => Ok(EducationField::School),
            "degree" => Ok(EducationField::Degree),
            "year" => Ok(EducationField::Year),
            other => Err(format!("unknown education field '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill
// ────────────────────────────────────────────────────────────────────────────

/// A skill is a single free-text value (a one-field entry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skill(pub String);

impl Skill {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Skill {
    fn from(value: &str) -> Self {
        Skill(value.to_string())
    }
}

impl SectionEntry for Skill {
    /// Skills have no named fields; the whole value is replaced.
    type Field = ();

    const SECTION: SectionKind = SectionKind::Skills;

    fn with_field(&self, _field: (), value: String) -> Self {
        Skill(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_entries_have_empty_fields() {
        let exp = Experience::default();
        assert!(exp.company.is_empty() && exp.position.is_empty());
        assert!(exp.duration.is_empty() && exp.description.is_empty());

        let edu = Education::default();
        assert!(edu.school.is_empty() && edu.degree.is_empty() && edu.year.is_empty());

        assert_eq!(Skill::default().as_str(), "");
    }

    #[test]
    fn test_with_field_replaces_only_target_field() {
        let original = Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            duration: "2020-2023".to_string(),
            description: "Built things".to_string(),
        };
        let edited = original.with_field(ExperienceField::Duration, "2020-2024".to_string());

        assert_eq!(edited.duration, "2020-2024");
        assert_eq!(edited.company, original.company);
        assert_eq!(edited.position, original.position);
        assert_eq!(edited.description, original.description);
        // The source value is untouched.
        assert_eq!(original.duration, "2020-2023");
    }

    #[test]
    fn test_education_with_field() {
        let edu = Education::default().with_field(EducationField::Degree, "BSc".to_string());
        assert_eq!(edu.degree, "BSc");
        assert!(edu.school.is_empty());
    }

    #[test]
    fn test_skill_with_field_replaces_value() {
        let skill = Skill::from("Go").with_field((), "Rust".to_string());
        assert_eq!(skill, Skill::from("Rust"));
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("company".parse(), Ok(ExperienceField::Company));
        assert_eq!("year".parse(), Ok(EducationField::Year));
        assert!("salary".parse::<ExperienceField>().is_err());
        assert!("gpa".parse::<EducationField>().is_err());
    }

    #[test]
    fn test_section_kind_path_names() {
        let kind: SectionKind = serde_json::from_str("\"skills\"").unwrap();
        assert_eq!(kind, SectionKind::Skills);
        assert_eq!(SectionKind::Experience.to_string(), "experience");
    }

    #[test]
    fn test_skill_serializes_as_plain_string() {
        let json = serde_json::to_string(&vec![Skill::from("Go"), Skill::from("Rust")]).unwrap();
        assert_eq!(json, r#"["Go","Rust"]"#);
    }
}
