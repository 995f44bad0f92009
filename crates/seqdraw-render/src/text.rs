use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use unicode_width::UnicodeWidthStr;

pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans, Verdana, sans-serif";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
            font_size,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Measures rendered text. Implementations must be deterministic: the same
/// `(text, style)` always yields the same metrics.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn text_lines(text: &str) -> impl Iterator<Item = &str> {
        text.split('\n')
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let mut max_columns = 0usize;
        let mut line_count = 0usize;
        for line in Self::text_lines(text) {
            // East Asian wide glyphs occupy two columns.
            max_columns = max_columns.max(UnicodeWidthStr::width(line));
            line_count += 1;
        }

        TextMetrics {
            width: max_columns as f64 * font_size * char_width_factor,
            height: line_count as f64 * font_size * line_height_factor,
            line_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    font_family: Option<String>,
    font_size_bits: u64,
    font_weight: Option<String>,
    text: String,
}

/// Caches another measurer's results per `(font, size, weight, text)`.
///
/// Useful when the wrapped measurer consults real font data.
#[derive(Debug, Default)]
pub struct MemoizedTextMeasurer<M> {
    inner: M,
    cache: Mutex<FxHashMap<MeasureKey, TextMetrics>>,
}

impl<M> MemoizedTextMeasurer<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<M: TextMeasurer> TextMeasurer for MemoizedTextMeasurer<M> {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let key = MeasureKey {
            font_family: style.font_family.clone(),
            font_size_bits: style.font_size.to_bits(),
            font_weight: style.font_weight.clone(),
            text: text.to_string(),
        };
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        *cache
            .entry(key)
            .or_insert_with(|| self.inner.measure(text, style))
    }
}
