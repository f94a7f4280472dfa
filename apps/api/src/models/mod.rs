pub mod entries;
pub mod identity;

pub use entries::{
    Education, EducationField, Experience, ExperienceField, SectionEntry, SectionKind, Skill,
};
pub use identity::{Identity, IdentityField};
