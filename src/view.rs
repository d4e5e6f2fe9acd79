//! Render-target abstraction for the result panels
//!
//! Renderers write [`Block`]s through the [`RenderTarget`] port instead of
//! touching a real page, so they stay unit-testable. [`TextPanel`] is the
//! concrete in-memory target used by the CLI and the test suite.

/// One visual block inside a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Panel heading
    Heading(String),
    /// A labeled line ("Distance: 0.3 km")
    Labeled { label: String, value: String },
    /// A plain line of text
    Text(String),
    /// Visual separator between entries
    Separator,
}

impl Block {
    /// Build a labeled line
    pub fn labeled<L: Into<String>, V: Into<String>>(label: L, value: V) -> Self {
        Self::Labeled {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Port through which renderers mutate a panel
pub trait RenderTarget {
    /// Drop all current content blocks
    fn clear(&mut self);

    /// Append a block after the current content
    fn push(&mut self, block: Block);

    /// Set or clear the inline error message. Setting an error leaves the
    /// content blocks untouched.
    fn set_error(&mut self, message: Option<String>);

    /// Make the panel visible. Panels start hidden and stay visible once
    /// revealed.
    fn reveal(&mut self);
}

/// In-memory panel that renders its blocks as plain text
#[derive(Debug, Default)]
pub struct TextPanel {
    blocks: Vec<Block>,
    error: Option<String>,
    visible: bool,
}

impl TextPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content blocks, in display order
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Current inline error message, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of separator blocks currently displayed
    #[must_use]
    pub fn separator_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Separator))
            .count()
    }

    /// Render the panel as plain text, one line per block
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for block in &self.blocks {
            match block {
                Block::Heading(text) => out.push_str(text),
                Block::Labeled { label, value } => {
                    out.push_str(label);
                    out.push_str(": ");
                    out.push_str(value);
                }
                Block::Text(text) => out.push_str(text),
                Block::Separator => out.push_str("--------"),
            }
            out.push('\n');
        }

        if let Some(error) = &self.error {
            out.push_str("Error: ");
            out.push_str(error);
            out.push('\n');
        }

        out
    }
}

impl RenderTarget for TextPanel {
    fn clear(&mut self) {
        self.blocks.clear();
    }

    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }

    fn reveal(&mut self) {
        self.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_starts_hidden_and_empty() {
        let panel = TextPanel::new();
        assert!(!panel.is_visible());
        assert!(panel.blocks().is_empty());
        assert!(panel.error().is_none());
    }

    #[test]
    fn test_clear_replaces_content() {
        let mut panel = TextPanel::new();
        panel.push(Block::Heading("Old".to_string()));
        panel.clear();
        panel.push(Block::Heading("New".to_string()));

        assert_eq!(panel.blocks(), &[Block::Heading("New".to_string())]);
    }

    #[test]
    fn test_error_does_not_touch_blocks() {
        let mut panel = TextPanel::new();
        panel.push(Block::labeled("Total Distance", "2.3 km"));
        panel.set_error(Some("backend unreachable".to_string()));

        assert_eq!(panel.blocks().len(), 1);
        assert_eq!(panel.error(), Some("backend unreachable"));
    }

    #[test]
    fn test_to_text_layout() {
        let mut panel = TextPanel::new();
        panel.push(Block::Heading("Weather Forecast".to_string()));
        panel.push(Block::labeled("Humidity (%)", "60"));
        panel.push(Block::Separator);
        panel.push(Block::Text("scattered clouds".to_string()));

        assert_eq!(
            panel.to_text(),
            "Weather Forecast\nHumidity (%): 60\n--------\nscattered clouds\n"
        );
    }
}
