use std::path::Path;

use mupdf::{Document, Page, TextPageFlags};

use bildex_core::{DocumentProvider, Fragment, ProviderError};

/// MuPDF-based implementation of [`DocumentProvider`].
///
/// This crate is the sole AGPL island: it keeps the mupdf dependency
/// (AGPL-3.0) out of the transitive closure of the parsing and reporting
/// code paths.
///
/// The provider is deliberately thin: it reports raw per-page text, the
/// positioned text runs with their font sizes, and page heights. All
/// content decisions (marker detection, noise filtering, title regions)
/// belong to the parsing pipeline.
pub struct MupdfProvider {
    document: Document,
    page_count: usize,
}

/// Font-size jitter below this is treated as the same run.
const SIZE_EPSILON: f32 = 0.1;

impl MupdfProvider {
    /// Open a document for random-access page reads.
    pub fn open(path: &Path) -> Result<Self, ProviderError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| ProviderError::Open("invalid path encoding".into()))?;
        let document =
            Document::open(path_str).map_err(|e| ProviderError::Open(e.to_string()))?;
        let page_count = document
            .page_count()
            .map_err(|e| ProviderError::Open(e.to_string()))? as usize;
        Ok(Self {
            document,
            page_count,
        })
    }

    fn load_page(&self, index: usize) -> Result<Page, ProviderError> {
        self.document
            .load_page(index as i32)
            .map_err(|e| ProviderError::Page {
                page: index,
                message: e.to_string(),
            })
    }
}

fn push_fragment(fragments: &mut Vec<Fragment>, text: &str, x: f32, y: f32, font_size: f32) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        fragments.push(Fragment::new(trimmed, x, y, font_size));
    }
}

impl DocumentProvider for MupdfProvider {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, index: usize) -> Result<String, ProviderError> {
        let page = self.load_page(index)?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| ProviderError::Page {
                page: index,
                message: e.to_string(),
            })?;

        let mut page_text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                page_text.push_str(&line_text);
                page_text.push('\n');
            }
        }
        Ok(page_text)
    }

    fn page_fragments(&self, index: usize) -> Result<Vec<Fragment>, ProviderError> {
        let page = self.load_page(index)?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| ProviderError::Page {
                page: index,
                message: e.to_string(),
            })?;

        let mut fragments = Vec::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_y = line.bounds().y0;

                // One fragment per run of equal-size characters; a size jump
                // inside a visual line starts a new run.
                let mut text = String::new();
                let mut run_x = 0.0f32;
                let mut run_size = 0.0f32;
                let mut started = false;

                for ch in line.chars() {
                    let c = ch.char().unwrap_or('\u{FFFD}');
                    let size = ch.size();
                    if !started {
                        started = true;
                        run_x = ch.origin().x;
                        run_size = size;
                    } else if (size - run_size).abs() > SIZE_EPSILON {
                        push_fragment(&mut fragments, &text, run_x, line_y, run_size);
                        text.clear();
                        run_x = ch.origin().x;
                        run_size = size;
                    }
                    text.push(c);
                }
                if started {
                    push_fragment(&mut fragments, &text, run_x, line_y, run_size);
                }
            }
        }
        Ok(fragments)
    }

    fn page_height(&self, index: usize) -> Result<f32, ProviderError> {
        let page = self.load_page(index)?;
        let bounds = page.bounds().map_err(|e| ProviderError::Page {
            page: index,
            message: e.to_string(),
        })?;
        Ok(bounds.y1 - bounds.y0)
    }
}
