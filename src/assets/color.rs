use crate::foundation::{
    core::Rgba8Premul,
    error::{KropperError, KropperResult},
};

/// Parse a CSS-style hex color (`#RGB`, `#RRGGBB` or `#RRGGBBAA`, case-insensitive) into
/// premultiplied RGBA8.
pub fn parse_hex_color(s: &str) -> KropperResult<Rgba8Premul> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(KropperError::validation(format!("invalid hex color \"{s}\"")));
    }

    fn hex_byte(pair: &str) -> KropperResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| KropperError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    let (r, g, b, a) = match s.len() {
        3 => {
            let r = hex_byte(&s[0..1])? * 17;
            let g = hex_byte(&s[1..2])? * 17;
            let b = hex_byte(&s[2..3])? * 17;
            (r, g, b, 255)
        }
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err(KropperError::validation(
                "hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)",
            ));
        }
    };

    Ok(Rgba8Premul::from_straight_rgba(r, g, b, a))
}

/// Parse a background color, falling back to opaque white for anything unparseable.
pub(crate) fn background_or_white(s: &str) -> Rgba8Premul {
    parse_hex_color(s).unwrap_or_else(|err| {
        tracing::warn!(color = s, %err, "unparseable background color, using white");
        Rgba8Premul::from_straight_rgba(255, 255, 255, 255)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
