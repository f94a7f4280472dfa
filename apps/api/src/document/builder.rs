//! Document Model Builder: derives the [`DocumentTree`] from store state.
//!
//! Pure and deterministic: no hidden state, no side effects. Section order in the
//! output follows the insertion order of each store.

use crate::document::tree::{DocumentTree, EducationBlock, ExperienceBlock, HeaderBlock};
use crate::models::{Education, Experience, Identity, Skill};

pub const SKILL_SEPARATOR: &str = ", ";

pub fn build_document(
    identity: &Identity,
    experience: &[Experience],
    education: &[Education],
    skills: &[Skill],
) -> DocumentTree {
    DocumentTree {
        header: HeaderBlock {
            name: identity.name.clone(),
            email: identity.email.clone(),
            phone: identity.phone.clone(),
        },
        experience: experience
            .iter()
            .map(|e| ExperienceBlock {
                company: e.company.clone(),
                position: e.position.clone(),
                duration: e.duration.clone(),
                description: e.description.clone(),
            })
            .collect(),
        education: education
            .iter()
            .map(|e| EducationBlock {
                school: e.school.clone(),
                degree: e.degree.clone(),
                year: e.year.clone(),
            })
            .collect(),
        skills: join_skills(skills),
    }
}

/// Joins skills with `", "` in list order. Blank skills are kept, so `["Go", ""]`
/// becomes `"Go, "` exactly as the form shows it.
pub fn join_skills(skills: &[Skill]) -> String {
    skills
        .iter()
        .map(Skill::as_str)
        .collect::<Vec<_>>()
        .join(SKILL_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tree::DocumentSection;

    fn skills(values: &[&str]) -> Vec<Skill> {
        values.iter().map(|v| Skill::from(*v)).collect()
    }

    fn acme() -> Experience {
        Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            duration: "2020-2023".to_string(),
            description: "Built things".to_string(),
        }
    }

    #[test]
    fn test_join_skills_two_values() {
        assert_eq!(join_skills(&skills(&["Go", "Rust"])), "Go, Rust");
    }

    #[test]
    fn test_join_skills_empty_list_is_empty_string() {
        assert_eq!(join_skills(&[]), "");
    }

    #[test]
    fn test_join_skills_single_value() {
        assert_eq!(join_skills(&skills(&["X"])), "X");
    }

    #[test]
    fn test_join_skills_keeps_blank_entries() {
        assert_eq!(join_skills(&skills(&["Go", ""])), "Go, ");
    }

    #[test]
    fn test_build_is_deterministic() {
        let identity = Identity {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
        };
        let exp = vec![acme()];
        let edu = vec![Education {
            school: "MIT".to_string(),
            degree: "BSc".to_string(),
            year: "2019".to_string(),
        }];
        let sk = skills(&["Go", "Rust"]);

        let first = build_document(&identity, &exp, &edu, &sk);
        let second = build_document(&identity, &exp, &edu, &sk);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_experience_end_to_end() {
        let tree = build_document(&Identity::default(), &[acme()], &[], &[]);

        assert_eq!(tree.experience.len(), 1);
        let block = &tree.experience[0];
        assert_eq!(block.company, "Acme");
        assert_eq!(block.position, "Engineer");
        assert_eq!(block.duration, "2020-2023");
        assert_eq!(block.description, "Built things");

        let sections = tree.sections();
        assert!(matches!(sections[0], DocumentSection::Header(_)));
        assert!(matches!(sections[1], DocumentSection::Experience(blocks) if blocks.len() == 1));
        assert!(matches!(sections[2], DocumentSection::Education(blocks) if blocks.is_empty()));
        assert!(matches!(sections[3], DocumentSection::Skills("")));
    }

    #[test]
    fn test_section_order_follows_insertion_order() {
        let first = Education {
            school: "First".to_string(),
            ..Education::default()
        };
        let second = Education {
            school: "Second".to_string(),
            ..Education::default()
        };
        let tree = build_document(&Identity::default(), &[], &[first, second], &[]);
        let schools: Vec<&str> = tree.education.iter().map(|e| e.school.as_str()).collect();
        assert_eq!(schools, vec!["First", "Second"]);
    }

    #[test]
    fn test_empty_inputs_still_have_header() {
        let tree = build_document(&Identity::default(), &[], &[], &[]);
        assert_eq!(tree.header.name, "");
        assert!(tree.experience.is_empty());
        assert!(tree.education.is_empty());
        assert_eq!(tree.skills, "");
    }
}
