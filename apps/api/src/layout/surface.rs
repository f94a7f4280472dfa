//! Presentation surface: the Document Tree laid out as a fixed-width block of text lines.
//!
//! The surface is what the preview shows and what the exporter paginates, so both
//! consume identical line breaks. Units are reference-window units (the block is
//! `PageGeometry::window_width` wide); the exporter scales them onto paper.

use serde::{Deserialize, Serialize};

use crate::document::tree::{DocumentSection, DocumentTree};
use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::geometry::PageGeometry;
use crate::layout::wrap::wrap_text;

/// Inner padding of the preview block on every side.
pub const SURFACE_PADDING: f32 = 24.0;
/// Vertical gap between top-level sections.
pub const SECTION_GAP: f32 = 16.0;
/// Vertical gap after each experience or education entry.
pub const ENTRY_GAP: f32 = 8.0;

pub const EXPERIENCE_HEADING: &str = "Work Experience";
pub const EDUCATION_HEADING: &str = "Education";
pub const SKILLS_HEADING: &str = "Skills";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// What a line represents in the resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Name,
    Contact,
    SectionHeading,
    EntryTitle,
    EntryDetail,
    Skills,
}

/// A single measured line of text placed on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLine {
    pub text: String,
    pub role: LineRole,
    pub face: FontFace,
    pub font_size: f32,
    /// Left edge of the text, from the surface's left edge.
    pub x: f32,
    /// Top of the line box, from the surface's top edge.
    pub y: f32,
    /// Height of the line box.
    pub height: f32,
}

impl SurfaceLine {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    /// Total height including bottom padding. Unbounded: pagination happens at export.
    pub height: f32,
    pub lines: Vec<SurfaceLine>,
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    role: LineRole,
    face: FontFace,
    size: f32,
    line_height: f32,
}

const NAME: TextStyle = TextStyle {
    role: LineRole::Name,
    face: FontFace::Bold,
    size: 20.0,
    line_height: 28.0,
};
const CONTACT: TextStyle = TextStyle {
    role: LineRole::Contact,
    face: FontFace::Regular,
    size: 16.0,
    line_height: 24.0,
};
const HEADING: TextStyle = TextStyle {
    role: LineRole::SectionHeading,
    face: FontFace::Bold,
    size: 18.0,
    line_height: 28.0,
};
const ENTRY_TITLE: TextStyle = TextStyle {
    role: LineRole::EntryTitle,
    face: FontFace::Bold,
    size: 16.0,
    line_height: 24.0,
};
const ENTRY_DETAIL: TextStyle = TextStyle {
    role: LineRole::EntryDetail,
    face: FontFace::Regular,
    size: 14.0,
    line_height: 20.0,
};
const SKILLS: TextStyle = TextStyle {
    role: LineRole::Skills,
    face: FontFace::Regular,
    size: 16.0,
    line_height: 24.0,
};

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a Document Tree at the geometry's window width.
pub fn render_surface(tree: &DocumentTree, geometry: &PageGeometry) -> Surface {
    let mut writer = SurfaceWriter::new(geometry.window_width);

    for (i, section) in tree.sections().iter().enumerate() {
        if i > 0 {
            writer.gap(SECTION_GAP);
        }
        match section {
            DocumentSection::Header(header) => {
                writer.text(&header.name, NAME);
                writer.text(&format!("{} | {}", header.email, header.phone), CONTACT);
            }
            DocumentSection::Experience(blocks) => {
                writer.text(EXPERIENCE_HEADING, HEADING);
                for block in blocks.iter() {
                    writer.text(&format!("{} at {}", block.position, block.company), ENTRY_TITLE);
                    writer.text(&block.duration, ENTRY_DETAIL);
                    writer.text(&block.description, ENTRY_DETAIL);
                    writer.gap(ENTRY_GAP);
                }
            }
            DocumentSection::Education(blocks) => {
                writer.text(EDUCATION_HEADING, HEADING);
                for block in blocks.iter() {
                    writer.text(&block.degree, ENTRY_TITLE);
                    writer.text(&format!("{}, {}", block.school, block.year), ENTRY_DETAIL);
                    writer.gap(ENTRY_GAP);
                }
            }
            DocumentSection::Skills(joined) => {
                writer.text(SKILLS_HEADING, HEADING);
                writer.text(joined, SKILLS);
            }
        }
    }

    writer.finish()
}

/// Cursor that stacks wrapped lines top to bottom.
struct SurfaceWriter {
    width: f32,
    y: f32,
    lines: Vec<SurfaceLine>,
}

impl SurfaceWriter {
    fn new(width: f32) -> Self {
        Self {
            width,
            y: SURFACE_PADDING,
            lines: Vec::new(),
        }
    }

    fn content_width(&self) -> f32 {
        (self.width - 2.0 * SURFACE_PADDING).max(1.0)
    }

    fn text(&mut self, text: &str, style: TextStyle) {
        let metrics = get_metrics(style.face);
        for line in wrap_text(text, metrics, style.size, self.content_width()) {
            self.lines.push(SurfaceLine {
                text: line,
                role: style.role,
                face: style.face,
                font_size: style.size,
                x: SURFACE_PADDING,
                y: self.y,
                height: style.line_height,
            });
            self.y += style.line_height;
        }
    }

    fn gap(&mut self, amount: f32) {
        self.y += amount;
    }

    fn finish(self) -> Surface {
        Surface {
            width: self.width,
            height: self.y + SURFACE_PADDING,
            lines: self.lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::builder::build_document;
    use crate::layout::geometry::default_page_geometry;
    use crate::models::{Education, Experience, Identity, Skill};

    fn identity() -> Identity {
        Identity {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn texts_with_role(surface: &Surface, role: LineRole) -> Vec<&str> {
        surface
            .lines
            .iter()
            .filter(|l| l.role == role)
            .map(|l| l.text.as_str())
            .collect()
    }

    #[test]
    fn test_empty_document_has_header_and_headings() {
        let tree = build_document(&Identity::default(), &[], &[], &[]);
        let surface = render_surface(&tree, &default_page_geometry());

        assert_eq!(surface.width, 650.0);
        assert_eq!(texts_with_role(&surface, LineRole::Name), vec![""]);
        assert_eq!(texts_with_role(&surface, LineRole::Contact), vec![" | "]);
        assert_eq!(
            texts_with_role(&surface, LineRole::SectionHeading),
            vec![EXPERIENCE_HEADING, EDUCATION_HEADING, SKILLS_HEADING]
        );
    }

    #[test]
    fn test_surface_starts_with_name_line_without_caption() {
        let tree = build_document(&identity(), &[], &[], &[]);
        let surface = render_surface(&tree, &default_page_geometry());

        assert_eq!(surface.lines[0].role, LineRole::Name);
        assert!(!surface.lines.iter().any(|l| l.text == "Resume Preview"));
    }

    #[test]
    fn test_experience_lines_follow_preview_format() {
        let exp = Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            duration: "2020-2023".to_string(),
            description: "Built things".to_string(),
        };
        let tree = build_document(&identity(), &[exp], &[], &[]);
        let surface = render_surface(&tree, &default_page_geometry());

        assert_eq!(texts_with_role(&surface, LineRole::EntryTitle), vec!["Engineer at Acme"]);
        assert_eq!(
            texts_with_role(&surface, LineRole::EntryDetail),
            vec!["2020-2023", "Built things"]
        );
    }

    #[test]
    fn test_sections_appear_in_document_order() {
        let edu = Education {
            school: "MIT".to_string(),
            degree: "BSc".to_string(),
            year: "2019".to_string(),
        };
        let tree = build_document(&identity(), &[Experience::default()], &[edu], &[Skill::from("Rust")]);
        let surface = render_surface(&tree, &default_page_geometry());

        let position = |text: &str| {
            surface
                .lines
                .iter()
                .position(|l| l.text == text)
                .unwrap_or_else(|| panic!("missing line {text}"))
        };
        assert!(position("Ada Lovelace") < position(EXPERIENCE_HEADING));
        assert!(position(EXPERIENCE_HEADING) < position(EDUCATION_HEADING));
        assert!(position(EDUCATION_HEADING) < position("MIT, 2019"));
        assert!(position("MIT, 2019") < position(SKILLS_HEADING));
        assert!(position(SKILLS_HEADING) < position("Rust"));
    }

    #[test]
    fn test_lines_stack_without_overlap() {
        let exp = Experience {
            description: "Shipped features ".repeat(60),
            ..Experience::default()
        };
        let tree = build_document(&identity(), &[exp.clone(), exp], &[], &[]);
        let surface = render_surface(&tree, &default_page_geometry());

        for pair in surface.lines.windows(2) {
            assert!(pair[1].y >= pair[0].bottom(), "lines overlap: {pair:?}");
        }
        let last = surface.lines.last().unwrap();
        assert!((surface.height - (last.bottom() + SURFACE_PADDING)).abs() < 1e-3);
    }

    #[test]
    fn test_lines_fit_inside_padding() {
        let exp = Experience {
            description: "Reduced latency across distributed services ".repeat(30),
            ..Experience::default()
        };
        let tree = build_document(&identity(), &[exp], &[], &[]);
        let surface = render_surface(&tree, &default_page_geometry());

        for line in &surface.lines {
            let w = get_metrics(line.face).measure_at(&line.text, line.font_size);
            assert!(line.x + w <= surface.width - SURFACE_PADDING + 1e-3);
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let tree = build_document(&identity(), &[Experience::default()], &[], &[Skill::from("Go")]);
        let g = default_page_geometry();
        assert_eq!(render_surface(&tree, &g), render_surface(&tree, &g));
    }
}
