#![forbid(unsafe_code)]

//! Line-based render target.
//!
//! A [`Frame`] is what a model's `view` draws into: an ordered list of
//! styled text lines plus an optional cursor position. The runtime paints it
//! onto the terminal; tests read it back as plain text.
//!
//! Lines past `height` are kept but not painted, and lines wider than
//! `width` are clipped at paint time by [`Frame::visible_lines`].

use unicode_width::UnicodeWidthChar;

/// Visual role of a line. The runtime maps each role to terminal attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    /// Unstyled text.
    #[default]
    Plain,
    /// Section heading.
    Heading,
    /// Input label.
    Label,
    /// Input value, not focused.
    Input,
    /// Input value with keyboard focus.
    FocusedInput,
    /// Validation error text.
    Error,
    /// Button, not focused.
    Button,
    /// Button with keyboard focus.
    FocusedButton,
    /// Submitted summary text.
    Summary,
    /// Dimmed key hints.
    Hint,
}

/// One styled line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Text content (single line, no newlines).
    pub text: String,
    /// Visual role.
    pub style: LineStyle,
}

impl Line {
    /// Create a styled line.
    #[must_use]
    pub fn styled(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create an unstyled line.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, LineStyle::Plain)
    }

    /// An empty spacer line.
    #[must_use]
    pub fn blank() -> Self {
        Self::plain(String::new())
    }
}

/// A frame of lines drawn by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Width of the drawable area in columns.
    pub width: u16,
    /// Height of the drawable area in rows.
    pub height: u16,
    lines: Vec<Line>,
    cursor: Option<(u16, u16)>,
}

impl Frame {
    /// Create an empty frame for a `width` x `height` area.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            lines: Vec::new(),
            cursor: None,
        }
    }

    /// Append a line.
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Append several lines.
    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.lines.extend(lines);
    }

    /// All lines, including those below the visible area.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines drawn so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Place the terminal cursor at column `x` of row `y`.
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Some((x, y));
    }

    /// The requested cursor position, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Lines that fit the area, each clipped to `width` display columns.
    pub fn visible_lines(&self) -> impl Iterator<Item = (LineStyle, String)> + '_ {
        self.lines
            .iter()
            .take(usize::from(self.height))
            .map(|line| (line.style, clip_to_width(&line.text, self.width)))
    }

    /// Full frame content as newline-joined text.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns `true` if any line contains `needle`.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }

    /// Number of lines with the given style.
    #[must_use]
    pub fn count_style(&self, style: LineStyle) -> usize {
        self.lines.iter().filter(|l| l.style == style).count()
    }
}

/// Clip `text` so its display width does not exceed `width` columns.
#[must_use]
pub fn clip_to_width(text: &str, width: u16) -> String {
    let max = usize::from(width);
    let mut used = 0usize;
    let mut out = String::with_capacity(text.len().min(max * 4));
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame() {
        let frame = Frame::new(80, 24);
        assert!(frame.is_empty());
        assert_eq!(frame.text(), "");
        assert_eq!(frame.cursor(), None);
    }

    #[test]
    fn contains_text_searches_every_line() {
        let mut frame = Frame::new(10, 1);
        frame.push(Line::plain("Contact Form"));
        frame.push(Line::styled("Error: x", LineStyle::Error));
        // Second line is below the visible area but still searchable.
        assert!(frame.contains_text("Error: x"));
        assert_eq!(frame.count_style(LineStyle::Error), 1);
    }

    #[test]
    fn visible_lines_clip_width_and_height() {
        let mut frame = Frame::new(4, 2);
        frame.push(Line::plain("abcdef"));
        frame.push(Line::plain("xy"));
        frame.push(Line::plain("hidden"));
        let visible: Vec<_> = frame.visible_lines().map(|(_, t)| t).collect();
        assert_eq!(visible, vec!["abcd".to_string(), "xy".to_string()]);
    }

    #[test]
    fn clip_respects_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(clip_to_width("日本語", 5), "日本");
        assert_eq!(clip_to_width("abc", 0), "");
    }
}
