//! Line reconstruction: groups characters into visual lines by vertical bucket.

use std::collections::BTreeMap;

use crate::model::{Character, FontSize, Line};

/// Height of a vertical bucket; absorbs sub-pixel baseline jitter.
pub const LINE_BUCKET_HEIGHT: f32 = 2.0;

/// Quantize a vertical position to its bucket index.
fn bucket_of(top: f32) -> i64 {
    (top / LINE_BUCKET_HEIGHT).floor() as i64
}

/// Group one page's characters into lines, top to bottom.
///
/// Characters whose `top` falls in the same bucket form one line. Within a
/// line, characters are ordered by `x` and concatenated with no separator
/// inserted. Lines that are empty after trimming are dropped.
pub fn group_chars_into_lines(chars: &[Character], page: u32) -> Vec<Line> {
    let mut buckets: BTreeMap<i64, Vec<&Character>> = BTreeMap::new();
    for ch in chars {
        buckets.entry(bucket_of(ch.top)).or_default().push(ch);
    }

    let mut lines = Vec::with_capacity(buckets.len());
    for (bucket, mut members) in buckets {
        // Stable sort keeps stream order for glyphs sharing an x
        members.sort_by(|a, b| a.x.total_cmp(&b.x));

        let text: String = members.iter().map(|c| c.text.as_str()).collect();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let Some(font_size) = FontSize::mean(members.iter().map(|c| c.size)) else {
            continue;
        };

        lines.push(Line::new(
            text,
            bucket as f32 * LINE_BUCKET_HEIGHT,
            font_size,
            page,
        ));
    }

    lines
}
