//! Page breaking: splits a laid-out surface into physical pages.
//!
//! Lines are taken in order and measured against the page's printable height
//! (`PageGeometry::page_height_units`). A new page starts wherever the next line
//! would overflow the current one. Lines are never split across pages.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layout::geometry::PageGeometry;
use crate::layout::surface::Surface;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One physical page: a contiguous run of surface lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSlice {
    /// Indices into `Surface::lines`.
    pub lines: Range<usize>,
    /// Surface y-coordinate that maps to the top of the page's printable area.
    pub offset: f32,
    /// Height of content on this page, in surface units.
    pub content_height: f32,
    /// `content_height / page_height`.
    pub fill_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagePlan {
    /// Printable height per page, in surface units.
    pub page_height: f32,
    pub pages: Vec<PageSlice>,
}

impl PagePlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core function
// ────────────────────────────────────────────────────────────────────────────

/// Computes page breaks for a surface. Always returns at least one page.
///
/// The first page starts at the top of the surface, so the block's top padding
/// is kept on page one just as the preview shows it. Later pages start at the
/// top of their first line.
pub fn paginate(surface: &Surface, geometry: &PageGeometry) -> PagePlan {
    let page_height = geometry.page_height_units();
    let mut pages = Vec::new();

    let mut start_index = 0usize;
    let mut offset = 0.0_f32;
    let mut bottom = 0.0_f32;

    for (i, line) in surface.lines.iter().enumerate() {
        let overflows = line.bottom() - offset > page_height;
        if overflows && i > start_index {
            pages.push(slice(start_index..i, offset, bottom, page_height));
            start_index = i;
            offset = line.y;
        }
        if line.height > page_height {
            warn!(
                line = i,
                height = line.height,
                page_height,
                "Line taller than a page; placing it on its own page"
            );
        }
        bottom = line.bottom();
    }

    pages.push(slice(start_index..surface.lines.len(), offset, bottom, page_height));

    PagePlan { page_height, pages }
}

fn slice(lines: Range<usize>, offset: f32, bottom: f32, page_height: f32) -> PageSlice {
    let content_height = (bottom - offset).max(0.0);
    PageSlice {
        lines,
        offset,
        content_height,
        fill_fraction: content_height / page_height,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::builder::build_document;
    use crate::layout::font_metrics::FontFace;
    use crate::layout::geometry::default_page_geometry;
    use crate::layout::surface::{render_surface, LineRole, SurfaceLine};
    use crate::models::{Experience, Identity};

    fn make_line(y: f32, height: f32) -> SurfaceLine {
        SurfaceLine {
            text: "line".to_string(),
            role: LineRole::EntryDetail,
            face: FontFace::Regular,
            font_size: 14.0,
            x: 24.0,
            y,
            height,
        }
    }

    fn make_surface(count: usize, height: f32) -> Surface {
        let lines: Vec<SurfaceLine> = (0..count)
            .map(|i| make_line(24.0 + i as f32 * height, height))
            .collect();
        let total = lines.last().map(|l| l.bottom()).unwrap_or(0.0) + 24.0;
        Surface {
            width: 650.0,
            height: total,
            lines,
        }
    }

    #[test]
    fn test_empty_surface_is_one_page() {
        let surface = Surface {
            width: 650.0,
            height: 48.0,
            lines: vec![],
        };
        let plan = paginate(&surface, &default_page_geometry());
        assert_eq!(plan.page_count(), 1);
        assert_eq!(plan.pages[0].lines, 0..0);
        assert_eq!(plan.pages[0].content_height, 0.0);
    }

    #[test]
    fn test_short_surface_is_one_page() {
        let surface = make_surface(10, 20.0);
        let plan = paginate(&surface, &default_page_geometry());
        assert_eq!(plan.page_count(), 1);
        assert_eq!(plan.pages[0].lines, 0..10);
        assert!(plan.pages[0].fill_fraction < 0.5);
    }

    #[test]
    fn test_tall_surface_breaks_and_respects_page_height() {
        let geometry = default_page_geometry();
        let surface = make_surface(200, 20.0); // ~4000 units, ~4.2 pages
        let plan = paginate(&surface, &geometry);

        assert!(plan.page_count() > 1);
        for page in &plan.pages {
            assert!(
                page.content_height <= plan.page_height + 1e-3,
                "page content {} exceeds {}",
                page.content_height,
                plan.page_height
            );
            assert!(page.fill_fraction <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_pages_cover_every_line_exactly_once() {
        let surface = make_surface(137, 24.0);
        let plan = paginate(&surface, &default_page_geometry());

        let mut expected_start = 0;
        for page in &plan.pages {
            assert_eq!(page.lines.start, expected_start);
            assert!(!page.lines.is_empty());
            expected_start = page.lines.end;
        }
        assert_eq!(expected_start, surface.lines.len());
    }

    #[test]
    fn test_break_happens_at_first_overflowing_line() {
        let geometry = default_page_geometry();
        let page_height = geometry.page_height_units();
        let surface = make_surface(100, 20.0);
        let plan = paginate(&surface, &geometry);

        let first = &plan.pages[0];
        let last_on_page = &surface.lines[first.lines.end - 1];
        let next = &surface.lines[first.lines.end];
        assert!(last_on_page.bottom() <= page_height);
        assert!(next.bottom() > page_height);
        assert_eq!(plan.pages[1].offset, next.y);
    }

    #[test]
    fn test_later_pages_are_fully_used_before_breaking() {
        let geometry = default_page_geometry();
        let surface = make_surface(300, 20.0);
        let plan = paginate(&surface, &geometry);

        // Every page except the last breaks only because the next line would not fit.
        for page in &plan.pages[..plan.page_count() - 1] {
            assert!(page.content_height + 20.0 > plan.page_height);
        }
    }

    #[test]
    fn test_real_resume_with_many_entries_spans_pages() {
        let geometry = default_page_geometry();
        let experiences: Vec<Experience> = (0..30)
            .map(|i| Experience {
                company: format!("Company {i}"),
                position: "Engineer".to_string(),
                duration: "2020-2023".to_string(),
                description: "Designed and operated services handling production traffic. ".repeat(4),
            })
            .collect();
        let tree = build_document(&Identity::default(), &experiences, &[], &[]);
        let surface = render_surface(&tree, &geometry);
        let plan = paginate(&surface, &geometry);

        assert!(surface.height > geometry.page_height_units());
        assert!(plan.page_count() > 1);
        for page in &plan.pages {
            assert!(page.content_height <= plan.page_height + 1e-3);
        }
    }
}
