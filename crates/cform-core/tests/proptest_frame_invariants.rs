//! Property tests for frame clipping.

use cform_core::frame::{Frame, Line, clip_to_width};
use proptest::prelude::*;
use unicode_width::UnicodeWidthStr;

proptest! {
    #[test]
    fn clipped_text_never_exceeds_width(text in "\\PC{0,40}", width in 0u16..30) {
        let clipped = clip_to_width(&text, width);
        prop_assert!(clipped.width() <= usize::from(width));
        prop_assert!(text.starts_with(&clipped));
    }

    #[test]
    fn visible_lines_bounded_by_height(count in 0usize..20, height in 0u16..10) {
        let mut frame = Frame::new(20, height);
        for i in 0..count {
            frame.push(Line::plain(format!("line {i}")));
        }
        prop_assert_eq!(frame.visible_lines().count(), count.min(usize::from(height)));
        prop_assert_eq!(frame.len(), count);
    }
}
