// SPDX-License-Identifier: MIT
//
// swatch color type — sRGB-canonical storage with perceptual operations.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
//
// Design tokens travel as hex strings, so a `Color` stores exactly what a
// hex string can express: four 8-bit channels. Parsing and formatting are
// lossless. Operations that need a perceptual space (lighten, darken) go
// through OKLCH and come back quantized; mixing and compositing happen in
// linear sRGB.
//
// Conversion pipeline:
//
//   hex ↔ sRGB (u8) ↔ sRGB (f32) ↔ Linear sRGB ↔ Oklab ↔ OKLCH

use std::fmt;
use std::str::FromStr;

use crate::ColorError;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An sRGB color with 8-bit channels and 8-bit alpha.
///
/// # Examples
///
/// ```
/// use swatch_color::Color;
///
/// let brand = Color::hex("#3366CC").unwrap();
/// assert_eq!(brand.to_hex(), "#3366CC");
///
/// // Half-opacity variants append the 0x80 alpha byte.
/// assert_eq!(brand.half().to_hex(), "#3366CC80");
///
/// // Perceptual lightness steps.
/// let deeper = brand.darken(0.1);
/// assert!(deeper != brand);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha (opacity): 0 (fully transparent) to 255 (fully opaque).
    pub a: u8,
}

/// A color in OKLCH coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f32,
    /// Chroma: 0.0 (gray) to ~0.37 (most vivid).
    pub c: f32,
    /// Hue angle in degrees, [0, 360).
    pub h: f32,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create an opaque color from 8-bit sRGB values.
    #[inline]
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from 8-bit sRGB values with alpha.
    #[inline]
    #[must_use]
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from sRGB floats (0.0 to 1.0, clamped).
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgb8(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Parse a hex string.
    ///
    /// Supports `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (with or without `#`).
    /// Returns `None` if the string is not a valid hex color.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Build an opaque color from OKLCH coordinates, reducing chroma until
    /// the result fits the sRGB gamut.
    #[must_use]
    pub fn from_oklch(l: f32, c: f32, h: f32) -> Self {
        let l = l.clamp(0.0, 1.0);
        let (r, g, b) = oklch_to_srgb(l, c, h);
        if in_unit_range(r, g, b) {
            return Self::srgb(r, g, b);
        }

        // Binary search for maximum in-gamut chroma.
        let mut lo: f32 = 0.0;
        let mut hi: f32 = c.max(0.0);
        for _ in 0..16 {
            let mid = (lo + hi) * 0.5;
            let (r, g, b) = oklch_to_srgb(l, mid, h);
            if in_unit_range(r, g, b) {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let (r, g, b) = oklch_to_srgb(l, lo, h);
        Self::srgb(r, g, b)
    }

    /// Pure black.
    pub const BLACK: Self = Self::rgb8(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::rgb8(255, 255, 255);

    /// Fully transparent black (`#00000000`).
    pub const TRANSPARENT: Self = Self::rgba8(0, 0, 0, 0);

    /// Alpha byte used for "half" token variants (50%).
    pub const HALF_ALPHA: u8 = 0x80;

    // ─── Alpha ───────────────────────────────────────────────────────────

    /// Return a copy with the given alpha byte.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// The half-opacity variant of this color.
    #[inline]
    #[must_use]
    pub const fn half(self) -> Self {
        self.with_alpha(Self::HALF_ALPHA)
    }

    /// Whether this color is fully opaque.
    #[inline]
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    // ─── Perceptual Operations ───────────────────────────────────────────

    /// The OKLCH coordinates of this color (alpha ignored).
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        let (r, g, b) = self.to_srgb();
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Oklch { l, c, h }
    }

    /// Increase OKLCH lightness by `amount` (clamped to 0.0–1.0).
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        self.shift_lightness(amount)
    }

    /// Decrease OKLCH lightness by `amount` (clamped to 0.0–1.0).
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        self.shift_lightness(-amount)
    }

    fn shift_lightness(self, delta: f32) -> Self {
        let Oklch { l, c, h } = self.to_oklch();
        Self::from_oklch(l + delta, c, h).with_alpha(self.a)
    }

    /// Mix this color with another in linear sRGB.
    ///
    /// `t` = 0.0 returns `self`, `t` = 1.0 returns `other`.
    #[must_use]
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;
        let (sr, sg, sb) = self.to_linear_srgb();
        let (or, og, ob) = other.to_linear_srgb();

        let r = linear_to_srgb(sr.mul_add(inv_t, or * t));
        let g = linear_to_srgb(sg.mul_add(inv_t, og * t));
        let b = linear_to_srgb(sb.mul_add(inv_t, ob * t));
        let a = (f32::from(self.a) / 255.0).mul_add(inv_t, f32::from(other.a) / 255.0 * t);

        Self::rgba8(to_u8(r), to_u8(g), to_u8(b), to_u8(a))
    }

    /// Composite this color (source) over `dst`.
    ///
    /// Porter-Duff "source over" in linear sRGB. Opaque sources are
    /// returned unchanged.
    #[must_use]
    pub fn composite_over(self, dst: Self) -> Self {
        if self.is_opaque() || dst.a == 0 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }

        let sa = f32::from(self.a) / 255.0;
        let da = f32::from(dst.a) / 255.0;
        let (sr, sg, sb) = self.to_linear_srgb();
        let (dr, dg, db) = dst.to_linear_srgb();

        let out_a = da.mul_add(1.0 - sa, sa);
        let inv_sa = 1.0 - sa;
        let out_r = sr.mul_add(sa, dr * da * inv_sa) / out_a;
        let out_g = sg.mul_add(sa, dg * da * inv_sa) / out_a;
        let out_b = sb.mul_add(sa, db * da * inv_sa) / out_a;

        Self::rgba8(
            to_u8(linear_to_srgb(out_r)),
            to_u8(linear_to_srgb(out_g)),
            to_u8(linear_to_srgb(out_b)),
            to_u8(out_a),
        )
    }

    /// HSL hue angle in degrees, [0, 360). Achromatic colors report 0.
    #[must_use]
    pub fn hue(self) -> f32 {
        let (r, g, b) = self.to_srgb();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;
        if d < 1e-6 {
            return 0.0;
        }

        #[allow(clippy::float_cmp)]
        let h = if max == r {
            60.0 * ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / d + 2.0)
        } else {
            60.0 * ((r - g) / d + 4.0)
        };
        normalize_hue(h)
    }

    /// Whether the color has no hue (all channels equal).
    #[inline]
    #[must_use]
    pub const fn is_achromatic(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// sRGB channels as floats in 0.0–1.0 (alpha ignored).
    #[must_use]
    pub fn to_srgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    fn to_linear_srgb(self) -> (f32, f32, f32) {
        let (r, g, b) = self.to_srgb();
        (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }

    /// Uppercase hex string: `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        let Self { r, g, b, a } = self;
        if self.is_opaque() {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).ok_or_else(|| ColorError::InvalidHex(s.to_owned()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// Oklab color space math created by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/

/// Normalize a hue angle to the range [0, 360).
#[inline]
fn normalize_hue(h: f32) -> f32 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

#[inline]
fn in_unit_range(r: f32, g: f32, b: f32) -> bool {
    const EPS: f32 = 1e-3;
    let ok = |v: f32| (-EPS..=1.0 + EPS).contains(&v);
    ok(r) && ok(g) && ok(b)
}

/// Convert Oklab (L, a, b) to linear sRGB.
#[inline]
fn oklab_to_linear_srgb(l_ok: f32, a: f32, b: f32) -> (f32, f32, f32) {
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l_ok));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l_ok));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l_ok));

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 0.230_969_94f32.mul_add(s, 4.076_741_7f32.mul_add(l, -(3.307_711_6 * m)));
    let g = 0.341_319_38f32.mul_add(-s, (-1.268_438f32).mul_add(l, 2.609_757_4 * m));
    let bl = 1.707_614_7f32.mul_add(s, (-0.004_196_086_3f32).mul_add(l, -(0.703_418_6 * m)));

    (r, g, bl)
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g));

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.004_072_047f32.mul_add(-s_, 0.210_454_26f32.mul_add(l_, 0.793_617_8 * m_));
    let a = 0.450_593_7f32.mul_add(s_, 1.977_998_5f32.mul_add(l_, -(2.428_592_2 * m_)));
    let b_ok = 0.808_675_77f32.mul_add(-s_, 0.025_904_037f32.mul_add(l_, 0.782_771_77 * m_));

    (l_ok, a, b_ok)
}

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert sRGB (0.0–1.0) → OKLCH.
fn srgb_to_oklch(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let (l, a, b_ok) =
        linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    let c = a.hypot(b_ok);
    let h = if c < 1e-8 {
        0.0
    } else {
        normalize_hue(b_ok.atan2(a).to_degrees())
    };
    (l, c, h)
}

/// Convert OKLCH → sRGB (0.0–1.0, may be out of gamut).
fn oklch_to_srgb(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let h_rad = h.to_radians();
    let (lr, lg, lb) = oklab_to_linear_srgb(l, c * h_rad.cos(), c * h_rad.sin());
    (
        linear_to_srgb(lr.max(0.0)),
        linear_to_srgb(lg.max(0.0)),
        linear_to_srgb(lb.max(0.0)),
    )
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        3 | 4 => {
            let nibble = |i: usize| parse_hex_digit(bytes[i]).map(|v| v << 4 | v);
            let a = if bytes.len() == 4 { nibble(3)? } else { 255 };
            Some(Color::rgba8(nibble(0)?, nibble(1)?, nibble(2)?, a))
        }
        6 | 8 => {
            let byte = |i: usize| parse_hex_byte(&bytes[i..i + 2]);
            let a = if bytes.len() == 8 { byte(6)? } else { 255 };
            Some(Color::rgba8(byte(0)?, byte(2)?, byte(4)?, a))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    // Clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    fn channel_close(a: u8, b: u8) -> bool {
        (i16::from(a) - i16::from(b)).unsigned_abs() <= 1
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn parse_six_digit() {
        assert_eq!(Color::hex("#3366CC"), Some(Color::rgb8(0x33, 0x66, 0xCC)));
        assert_eq!(Color::hex("3366cc"), Some(Color::rgb8(0x33, 0x66, 0xCC)));
    }

    #[test]
    fn parse_short_forms() {
        assert_eq!(Color::hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::hex("#0008"), Some(Color::rgba8(0, 0, 0, 0x88)));
    }

    #[test]
    fn parse_eight_digit() {
        assert_eq!(Color::hex("#FFFFFF80"), Some(Color::WHITE.half()));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Color::hex(""), None);
        assert_eq!(Color::hex("#12345"), None);
        assert_eq!(Color::hex("#GGGGGG"), None);
        assert_eq!(Color::hex("transparent"), None);
    }

    #[test]
    fn from_str_reports_input() {
        let err = "#xyz".parse::<Color>().unwrap_err();
        assert_eq!(err.to_string(), "invalid hex color: #xyz");
    }

    #[test]
    fn hex_is_uppercase_and_lossless() {
        for s in ["#000000", "#FFFFFF", "#3366CC", "#FFD700", "#12AB9F"] {
            assert_eq!(Color::hex(s).unwrap().to_hex(), s);
        }
    }

    #[test]
    fn translucent_hex_has_eight_digits() {
        let c = Color::hex("#3366CC").unwrap().half();
        assert_eq!(c.to_hex(), "#3366CC80");
        assert_eq!(Color::TRANSPARENT.to_hex(), "#00000000");
    }

    // ── Hue ──────────────────────────────────────────────────────────────

    #[test]
    fn hue_of_primaries() {
        assert!(approx_eq(Color::rgb8(255, 0, 0).hue(), 0.0, 0.01));
        assert!(approx_eq(Color::rgb8(0, 255, 0).hue(), 120.0, 0.01));
        assert!(approx_eq(Color::rgb8(0, 0, 255).hue(), 240.0, 0.01));
    }

    #[test]
    fn hue_of_gold_and_steel_blue() {
        let gold = Color::hex("#FFD700").unwrap().hue();
        assert!(gold > 50.0 && gold < 51.0, "gold hue: {gold}");
        let blue = Color::hex("#336699").unwrap().hue();
        assert!(approx_eq(blue, 210.0, 0.5), "blue hue: {blue}");
    }

    #[test]
    fn hue_of_gray_is_zero() {
        assert!(approx_eq(Color::rgb8(128, 128, 128).hue(), 0.0, f32::EPSILON));
        assert!(Color::rgb8(128, 128, 128).is_achromatic());
    }

    // ── Mixing ───────────────────────────────────────────────────────────

    #[test]
    fn mix_endpoints() {
        let a = Color::hex("#3366CC").unwrap();
        assert_eq!(a.mix(Color::WHITE, 0.0), a);
        assert_eq!(a.mix(Color::WHITE, 1.0), Color::WHITE);
    }

    #[test]
    fn mix_clamps_fraction() {
        let a = Color::hex("#3366CC").unwrap();
        assert_eq!(a.mix(Color::BLACK, 2.0), Color::BLACK);
        assert_eq!(a.mix(Color::BLACK, -1.0), a);
    }

    #[test]
    fn mix_midpoint_is_between() {
        let mid = Color::BLACK.mix(Color::WHITE, 0.5);
        // Linear-light midpoint encodes to ~188 in sRGB.
        assert!(channel_close(mid.r, 188), "midpoint: {mid}");
        assert!(mid.is_achromatic());
    }

    // ── Lightness ────────────────────────────────────────────────────────

    #[test]
    fn darken_reduces_lightness() {
        let c = Color::hex("#3366CC").unwrap();
        assert!(c.darken(0.1).to_oklch().l < c.to_oklch().l);
        assert!(c.lighten(0.1).to_oklch().l > c.to_oklch().l);
    }

    #[test]
    fn lightness_clamps_at_extremes() {
        assert_eq!(Color::WHITE.lighten(0.5), Color::WHITE);
        assert_eq!(Color::BLACK.darken(0.5), Color::BLACK);
    }

    #[test]
    fn lightness_keeps_alpha() {
        let c = Color::hex("#3366CC80").unwrap();
        assert_eq!(c.darken(0.1).a, 0x80);
    }

    #[test]
    fn oklch_roundtrip_is_close() {
        for hex in ["#FF0000", "#00FF00", "#0000FF", "#FFD700", "#3366CC", "#808080"] {
            let c = Color::hex(hex).unwrap();
            let Oklch { l, c: chroma, h } = c.to_oklch();
            let back = Color::from_oklch(l, chroma, h);
            assert!(
                channel_close(back.r, c.r)
                    && channel_close(back.g, c.g)
                    && channel_close(back.b, c.b),
                "{hex} came back as {back}"
            );
        }
    }

    // ── Compositing ──────────────────────────────────────────────────────

    #[test]
    fn composite_opaque_is_identity() {
        let c = Color::hex("#3366CC").unwrap();
        assert_eq!(c.composite_over(Color::WHITE), c);
    }

    #[test]
    fn composite_transparent_shows_destination() {
        assert_eq!(Color::TRANSPARENT.composite_over(Color::WHITE), Color::WHITE);
    }

    #[test]
    fn composite_half_black_on_white_is_gray() {
        let out = Color::BLACK.half().composite_over(Color::WHITE);
        assert!(out.is_opaque());
        assert!(out.r > 100 && out.r < 220, "composite: {out}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_hex_strings() {
        let c = Color::hex("#3366CC80").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#3366CC80\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
