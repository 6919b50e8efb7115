//! Rich text and the legacy `&`-code format
//!
//! Descriptions are authored with legacy color codes (`&a`, `&l`, ...) and
//! kept in memory as a list of styled spans.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Default marker character for legacy codes in configuration files.
pub const LEGACY_MARKER: char = '&';

// ============================================================================
// STYLE
// ============================================================================

/// The sixteen legacy named colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    const ORDERED: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::DarkBlue,
        NamedColor::DarkGreen,
        NamedColor::DarkAqua,
        NamedColor::DarkRed,
        NamedColor::DarkPurple,
        NamedColor::Gold,
        NamedColor::Gray,
        NamedColor::DarkGray,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Aqua,
        NamedColor::Red,
        NamedColor::LightPurple,
        NamedColor::Yellow,
        NamedColor::White,
    ];

    /// Legacy code character (`0`-`9`, `a`-`f`).
    pub fn code(&self) -> char {
        let index = Self::ORDERED.iter().position(|c| c == self).unwrap_or(0);
        std::char::from_digit(index as u32, 16).unwrap_or('0')
    }

    pub fn from_code(code: char) -> Option<Self> {
        code.to_digit(16).map(|i| Self::ORDERED[i as usize])
    }
}

bitflags! {
    /// Text decorations toggled by legacy codes `k`-`o`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Decorations: u8 {
        const OBFUSCATED = 0b0000_0001;
        const BOLD = 0b0000_0010;
        const STRIKETHROUGH = 0b0000_0100;
        const UNDERLINED = 0b0000_1000;
        const ITALIC = 0b0001_0000;
    }
}

impl Decorations {
    const CODES: [(Decorations, char); 5] = [
        (Decorations::OBFUSCATED, 'k'),
        (Decorations::BOLD, 'l'),
        (Decorations::STRIKETHROUGH, 'm'),
        (Decorations::UNDERLINED, 'n'),
        (Decorations::ITALIC, 'o'),
    ];

    fn from_code(code: char) -> Option<Self> {
        Self::CODES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(d, _)| *d)
    }
}

impl Serialize for Decorations {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Decorations {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Ok(Decorations::from_bits_truncate(bits))
    }
}

/// Color plus decorations applied to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Style {
    pub color: Option<NamedColor>,
    pub decorations: Decorations,
}

// ============================================================================
// RICH TEXT
// ============================================================================

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub style: Style,
}

/// Styled text made of consecutive spans.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichText {
    spans: Vec<TextSpan>,
}

impl RichText {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut rich = Self::empty();
        rich.push(text, Style::default());
        rich
    }

    /// Append a span. Empty text is ignored; a span with the same style as
    /// the last one is merged into it.
    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&text),
            _ => self.spans.push(TextSpan { text, style }),
        }
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Text content with all styling dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

// ============================================================================
// LEGACY CODEC
// ============================================================================

pub mod legacy {
    use super::*;

    /// Decode legacy-coded text into [`RichText`].
    ///
    /// A color code resets decorations, a decoration code adds to the current
    /// style and `r` resets everything. A marker followed by an unknown code,
    /// or at the end of input, is kept as literal text.
    pub fn decode(text: &str, marker: char) -> RichText {
        let mut rich = RichText::empty();
        let mut style = Style::default();
        let mut buffer = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if c != marker {
                buffer.push(c);
                continue;
            }
            let Some(&code) = chars.peek() else {
                buffer.push(c);
                break;
            };
            let code = code.to_ascii_lowercase();
            let next_style = if let Some(color) = NamedColor::from_code(code) {
                Style {
                    color: Some(color),
                    decorations: Decorations::empty(),
                }
            } else if let Some(decoration) = Decorations::from_code(code) {
                Style {
                    color: style.color,
                    decorations: style.decorations | decoration,
                }
            } else if code == 'r' {
                Style::default()
            } else {
                buffer.push(c);
                continue;
            };
            chars.next();
            rich.push(std::mem::take(&mut buffer), style);
            style = next_style;
        }
        rich.push(buffer, style);
        rich
    }

    /// Encode [`RichText`] with legacy codes.
    ///
    /// Only the codes needed to move from one span's style to the next are
    /// written, so canonical input survives `decode` then `encode` unchanged.
    /// A literal marker followed by a code character is split from it by a
    /// restatement of the current style.
    pub fn encode(text: &RichText, marker: char) -> String {
        let mut out = String::new();
        let mut current = Style::default();

        for span in text.spans() {
            let target = span.style;
            if target.color != current.color || !target.decorations.contains(current.decorations) {
                push_style(&mut out, target, marker);
            } else {
                push_decorations(&mut out, target.decorations - current.decorations, marker);
            }
            push_text(&mut out, &span.text, target, marker);
            current = target;
        }
        out
    }

    fn is_code(c: char) -> bool {
        let c = c.to_ascii_lowercase();
        c == 'r' || NamedColor::from_code(c).is_some() || Decorations::from_code(c).is_some()
    }

    /// Full codes for `style`: color (or reset) then every decoration.
    fn push_style(out: &mut String, style: Style, marker: char) {
        out.push(marker);
        out.push(style.color.map_or('r', |c| c.code()));
        push_decorations(out, style.decorations, marker);
    }

    fn push_decorations(out: &mut String, decorations: Decorations, marker: char) {
        for (decoration, code) in Decorations::CODES {
            if decorations.contains(decoration) {
                out.push(marker);
                out.push(code);
            }
        }
    }

    fn push_text(out: &mut String, text: &str, style: Style, marker: char) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            out.push(c);
            if c == marker && chars.peek().copied().is_some_and(is_code) {
                push_style(out, style, marker);
            }
        }
    }
}
