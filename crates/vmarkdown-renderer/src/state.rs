//! State structs for markdown event processing.

use pulldown_cmark::Alignment;

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Whether we're inside a code block.
    active: bool,
    /// Language declared on the fence (e.g., "rust", "python").
    language: Option<String>,
    /// Buffer for code block content.
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with optional language.
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    /// Whether we're inside the table header row.
    in_head: bool,
    /// Column alignments for current table.
    alignments: Vec<Alignment>,
    /// Current column index in table row.
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Get the alignment style for the current cell.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for capturing image alt text.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt_text: String,
    /// Image source and title waiting for the alt text.
    pending: Option<(String, String)>,
}

impl ImageState {
    /// Start capturing alt text for an image.
    pub(crate) fn start(&mut self, src: String, title: String) {
        self.active = true;
        self.alt_text.clear();
        self.pending = Some((src, title));
    }

    /// End capture and return `(src, title, alt)`.
    pub(crate) fn end(&mut self) -> Option<(String, String, String)> {
        self.active = false;
        let alt = std::mem::take(&mut self.alt_text);
        self.pending.take().map(|(src, title)| (src, title, alt))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_state() {
        let mut state = CodeBlockState::default();
        assert!(!state.is_active());

        state.start(Some("rust".to_owned()));
        assert!(state.is_active());

        state.push_str("fn main() {}");
        let (lang, content) = state.end();
        assert_eq!(lang, Some("rust".to_owned()));
        assert_eq!(content, "fn main() {}");
        assert!(!state.is_active());
    }

    #[test]
    fn test_table_state() {
        let mut state = TableState::default();
        state.start(vec![Alignment::Left, Alignment::Center, Alignment::Right]);

        state.start_head();
        assert!(state.is_in_head());
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:left""#
        );

        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:center""#
        );

        state.next_cell();
        state.next_cell();
        assert_eq!(state.current_alignment_style(), "");

        state.end_head();
        assert!(!state.is_in_head());
    }

    #[test]
    fn test_image_state() {
        let mut state = ImageState::default();
        assert!(!state.is_active());

        state.start("cat.png".to_owned(), String::new());
        assert!(state.is_active());

        state.push_str("a cat");
        let (src, title, alt) = state.end().unwrap();
        assert_eq!(src, "cat.png");
        assert_eq!(title, "");
        assert_eq!(alt, "a cat");
        assert!(!state.is_active());
    }
}
