//! PDF serialization: writes a paginated surface as a PDF using the standard
//! Helvetica fonts, one content stream per page.
//!
//! Surface units are scaled by `PageGeometry::scale` onto the page and offset by
//! the top/left margins. Text outside printable ASCII is written as `?`, matching
//! the fallback width the layout measured it with.

use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::FontFace;
use crate::layout::geometry::{PageGeometry, PT_PER_MM};
use crate::layout::paginate::PagePlan;
use crate::layout::surface::{LineRole, Surface, SurfaceLine};

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");
/// Maps `'` and `` ` `` to quotesingle and grave, the glyphs the width tables measure.
const TEXT_ENCODING: Name<'static> = Name(b"WinAnsiEncoding");

/// Baseline position within a line box, as a fraction of the font size below the
/// half-leading.
const BASELINE_RATIO: f32 = 0.8;

/// Section headings use the preview's accent blue.
const HEADING_RGB: (f32, f32, f32) = (0.145, 0.388, 0.922);

pub fn render_pdf(
    surface: &Surface,
    plan: &PagePlan,
    geometry: &PageGeometry,
    generated_at: DateTime<Utc>,
) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let info_id = alloc.bump();

    let page_ids: Vec<(Ref, Ref)> = plan
        .pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    pdf.type1_font(regular_id)
        .base_font(Name(FontFace::Regular.base_font().as_bytes()))
        .encoding_predefined(TEXT_ENCODING);
    pdf.type1_font(bold_id)
        .base_font(Name(FontFace::Bold.base_font().as_bytes()))
        .encoding_predefined(TEXT_ENCODING);

    let media_box = Rect::new(0.0, 0.0, geometry.page_width_pt(), geometry.page_height_pt());

    for (slice, (page_id, content_id)) in plan.pages.iter().zip(&page_ids) {
        let mut page = pdf.page(*page_id);
        page.media_box(media_box);
        page.parent(page_tree_id);
        page.contents(*content_id);
        page.resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        page.finish();

        let mut content = Content::new();
        for line in &surface.lines[slice.lines.clone()] {
            if line.text.is_empty() {
                continue;
            }
            write_line(&mut content, line, slice.offset, geometry);
        }
        pdf.stream(*content_id, &content.finish());
    }

    let title = document_title(surface);
    pdf.document_info(info_id)
        .title(TextStr(&title))
        .creator(TextStr("Resume Builder"))
        .creation_date(pdf_date(generated_at));

    pdf.finish()
}

fn write_line(content: &mut Content, line: &SurfaceLine, page_offset: f32, geometry: &PageGeometry) {
    let scale = geometry.scale();
    let font_size_pt = line.font_size * scale * PT_PER_MM;

    let half_leading = (line.height - line.font_size) / 2.0;
    let baseline_units = line.y - page_offset + half_leading + line.font_size * BASELINE_RATIO;
    let x_mm = geometry.margin_left_mm + line.x * scale;
    let baseline_mm = geometry.margin_top_mm + baseline_units * scale;

    let x_pt = x_mm * PT_PER_MM;
    let y_pt = geometry.page_height_pt() - baseline_mm * PT_PER_MM;

    let font = match line.face {
        FontFace::Regular => REGULAR_FONT,
        FontFace::Bold => BOLD_FONT,
    };
    let encoded = encode_text(&line.text);

    content.save_state();
    if line.role == LineRole::SectionHeading {
        let (r, g, b) = HEADING_RGB;
        content.set_fill_rgb(r, g, b);
    }
    content.begin_text();
    content.set_font(font, font_size_pt);
    content.next_line(x_pt, y_pt);
    content.show(Str(&encoded));
    content.end_text();
    content.restore_state();
}

/// Maps text onto the single-byte range the standard fonts can show.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (' '..='~').contains(&c) { c as u8 } else { b'?' })
        .collect()
}

fn document_title(surface: &Surface) -> String {
    let name = surface
        .lines
        .iter()
        .filter(|l| l.role == LineRole::Name)
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let name = name.trim();
    if name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{name} - Resume")
    }
}

fn pdf_date(at: DateTime<Utc>) -> Date {
    Date::new(at.year().clamp(0, 9999) as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::builder::build_document;
    use crate::layout::geometry::default_page_geometry;
    use crate::layout::paginate::paginate;
    use crate::layout::surface::render_surface;
    use crate::models::{Experience, Identity};

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn render(identity: &Identity, experience: &[Experience]) -> (Vec<u8>, PagePlan) {
        let geometry = default_page_geometry();
        let tree = build_document(identity, experience, &[], &[]);
        let surface = render_surface(&tree, &geometry);
        let plan = paginate(&surface, &geometry);
        (render_pdf(&surface, &plan, &geometry, Utc::now()), plan)
    }

    #[test]
    fn test_output_is_a_pdf_file() {
        let (bytes, _) = render(&Identity::default(), &[]);
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn test_header_text_is_written() {
        let identity = Identity {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
        };
        let (bytes, plan) = render(&identity, &[]);
        assert_eq!(plan.page_count(), 1);
        assert!(contains(&bytes, b"Ada Lovelace"));
        assert!(contains(&bytes, b"ada@example.com | 555-0100"));
        assert!(contains(&bytes, b"Helvetica-Bold"));
    }

    #[test]
    fn test_fonts_use_win_ansi_encoding() {
        let identity = Identity {
            name: "Conan O'Brien".to_string(),
            ..Identity::default()
        };
        let (bytes, _) = render(&identity, &[]);
        let declared = bytes
            .windows(b"/Encoding /WinAnsiEncoding".len())
            .filter(|w| *w == b"/Encoding /WinAnsiEncoding")
            .count();
        assert_eq!(declared, 2);
        assert!(contains(&bytes, b"Conan O'Brien"));
    }

    #[test]
    fn test_experience_text_is_written() {
        let exp = Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            duration: "2020-2023".to_string(),
            description: "Built things".to_string(),
        };
        let (bytes, _) = render(&Identity::default(), &[exp]);
        assert!(contains(&bytes, b"Engineer at Acme"));
        assert!(contains(&bytes, b"2020-2023"));
        assert!(contains(&bytes, b"Built things"));
    }

    #[test]
    fn test_lines_on_later_pages_are_written() {
        let experiences: Vec<Experience> = (0..40)
            .map(|i| Experience {
                company: format!("Company{i:02}"),
                position: "Engineer".to_string(),
                duration: "2020".to_string(),
                description: "Maintained systems. ".repeat(10),
            })
            .collect();
        let (bytes, plan) = render(&Identity::default(), &experiences);
        assert!(plan.page_count() > 1);
        assert!(contains(&bytes, b"Engineer at Company00"));
        assert!(contains(&bytes, b"Engineer at Company39"));
    }

    #[test]
    fn test_encode_text_replaces_non_ascii() {
        assert_eq!(encode_text("Zoë"), b"Zo?".to_vec());
        assert_eq!(encode_text("a|b"), b"a|b".to_vec());
        assert_eq!(encode_text("tab\there"), b"tab?here".to_vec());
    }

    #[test]
    fn test_document_title_uses_name() {
        let geometry = default_page_geometry();
        let identity = Identity {
            name: "Ada".to_string(),
            ..Identity::default()
        };
        let surface = render_surface(&build_document(&identity, &[], &[], &[]), &geometry);
        assert_eq!(document_title(&surface), "Ada - Resume");

        let blank = render_surface(&build_document(&Identity::default(), &[], &[], &[]), &geometry);
        assert_eq!(document_title(&blank), "Resume");
    }
}
