use serde::{Deserialize, Serialize};

/// Read-only projection of a resume session, in the exact shape that gets laid out.
///
/// Never mutated: it is rebuilt from the stores whenever it is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub header: HeaderBlock,
    pub experience: Vec<ExperienceBlock>,
    pub education: Vec<EducationBlock>,
    /// Skills joined with `", "` in list order.
    pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceBlock {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationBlock {
    pub school: String,
    pub degree: String,
    pub year: String,
}

/// One top-level section of the tree, borrowed for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSection<'a> {
    Header(&'a HeaderBlock),
    Experience(&'a [ExperienceBlock]),
    Education(&'a [EducationBlock]),
    Skills(&'a str),
}

impl DocumentTree {
    /// Sections in rendering order: header, experience, education, skills.
    pub fn sections(&self) -> [DocumentSection<'_>; 4] {
        [
            DocumentSection::Header(&self.header),
            DocumentSection::Experience(&self.experience),
            DocumentSection::Education(&self.education),
            DocumentSection::Skills(&self.skills),
        ]
    }
}
