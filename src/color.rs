use crate::Scalar;
use std::{fmt, str::FromStr};

/// ABGR color packed as u32 value
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RGBA(u32);

impl RGBA {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32))
    }

    /// Opaque gray with all channels set to `level`
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level, 255)
    }

    /// Opaque color from hue, saturation and value, each in `[0, 1]`
    ///
    /// Hue wraps around, so `1.0` is red again. Channels are truncated.
    pub fn from_hsv(hue: Scalar, saturation: Scalar, value: Scalar) -> Self {
        let channel = |c: Scalar| (c.clamp(0.0, 1.0) * 255.0) as u8;
        let (s, v) = (saturation.clamp(0.0, 1.0), value.clamp(0.0, 1.0));
        if s == 0.0 {
            return Self::gray(channel(v));
        }
        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(channel(r), channel(g), channel(b), 255)
    }

    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xff) as u8
    }

    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Convert color to sRGBA list
    pub fn to_rgba(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Convert color to sRGB list (alpha is discarded)
    pub fn to_rgb(self) -> [u8; 3] {
        let [r, g, b, _] = self.to_rgba();
        [r, g, b]
    }

    /// Override alpha component of the color
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self::new(self.red(), self.green(), self.blue(), alpha)
    }

    /// Look up color by its name (case insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::gray(0),
            "white" => Self::gray(255),
            "grey" | "gray" => Self::gray(128),
            "lightgrey" | "lightgray" => Self::gray(211),
            "darkgrey" | "darkgray" => Self::gray(169),
            "red" => Self::new(255, 0, 0, 255),
            "green" => Self::new(0, 128, 0, 255),
            "blue" => Self::new(0, 0, 255, 255),
            "lime" => Self::new(0, 255, 0, 255),
            "lightgreen" => Self::new(144, 238, 144, 255),
            "deepskyblue" => Self::new(0, 191, 255, 255),
            "cyan" => Self::new(0, 255, 255, 255),
            "magenta" => Self::new(255, 0, 255, 255),
            "yellow" => Self::new(255, 255, 0, 255),
            "orange" => Self::new(255, 165, 0, 255),
            "orangered" => Self::new(255, 69, 0, 255),
            "purple" => Self::new(128, 0, 128, 255),
            "transparent" => Self::new(0, 0, 0, 0),
            _ => return None,
        };
        Some(color)
    }
}

impl fmt::Debug for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({})", self)
    }
}

impl fmt::Display for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}

impl FromStr for RGBA {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = color.strip_prefix('#') {
            if hex.len() != 6 && hex.len() != 8 {
                return Err(ColorError::HexExpected);
            }
            // #RRGGBB(AA)
            let digit = |byte| match byte {
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'0'..=b'9' => Ok(byte - b'0'),
                _ => Err(ColorError::HexExpected),
            };
            let mut hex = hex
                .as_bytes()
                .chunks(2)
                .map(|pair| Ok((digit(pair[0])? << 4) | digit(pair[1])?));
            Ok(RGBA::new(
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(255))?,
            ))
        } else {
            RGBA::from_name(color).ok_or_else(|| ColorError::UnknownName(color.to_owned()))
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RGBA {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RGBA {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        color.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    HexExpected,
    UnknownName(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB(AA) in hexidemical format")
            }
            ColorError::UnknownName(name) => write!(f, "Unknown color name: {}", name),
        }
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_u8() {
        let c = RGBA::new(1, 2, 3, 4);
        assert_eq!([1, 2, 3, 4], c.to_rgba());
        assert_eq!([1, 2, 3], c.to_rgb());
        assert_eq!(1, c.red());
        assert_eq!(2, c.green());
        assert_eq!(3, c.blue());
        assert_eq!(4, c.alpha());
        assert_eq!(c.with_alpha(255), RGBA::new(1, 2, 3, 255));
        assert_eq!(RGBA::gray(80).to_rgba(), [80, 80, 80, 255]);
    }

    #[test]
    fn test_from_hsv() {
        assert_eq!(RGBA::from_hsv(0.0, 1.0, 1.0), RGBA::new(255, 0, 0, 255));
        assert_eq!(RGBA::from_hsv(0.25, 1.0, 1.0), RGBA::new(127, 255, 0, 255));
        assert_eq!(RGBA::from_hsv(0.5, 1.0, 1.0), RGBA::new(0, 255, 255, 255));
        assert_eq!(RGBA::from_hsv(0.75, 1.0, 1.0), RGBA::new(127, 0, 255, 255));
        // hue wraps around
        assert_eq!(RGBA::from_hsv(1.0, 1.0, 1.0), RGBA::from_hsv(0.0, 1.0, 1.0));
        // no saturation is gray
        assert_eq!(RGBA::from_hsv(0.3, 0.0, 0.5), RGBA::gray(127));
        assert_eq!(RGBA::from_hsv(0.6, 1.0, 0.0), RGBA::gray(0));
    }

    #[test]
    fn test_display_parse() -> Result<(), ColorError> {
        let c: RGBA = "#01020304".parse()?;
        assert_eq!(c, RGBA::new(1, 2, 3, 4));
        assert_eq!(c.to_string(), "#01020304");

        let c: RGBA = "#AAbbcc".parse()?;
        assert_eq!(c, RGBA::new(170, 187, 204, 255));
        assert_eq!(c.to_string(), "#aabbcc");

        assert_eq!("#12345".parse::<RGBA>(), Err(ColorError::HexExpected));
        assert_eq!("#12345g".parse::<RGBA>(), Err(ColorError::HexExpected));
        Ok(())
    }

    #[test]
    fn test_names() -> Result<(), ColorError> {
        assert_eq!("deepskyblue".parse::<RGBA>()?, RGBA::new(0, 191, 255, 255));
        assert_eq!("Grey".parse::<RGBA>()?, "gray".parse::<RGBA>()?);
        assert_eq!(RGBA::from_name("white"), Some(RGBA::gray(255)));
        assert_eq!(
            "chartreuse-ish".parse::<RGBA>(),
            Err(ColorError::UnknownName("chartreuse-ish".to_owned()))
        );
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), Box<dyn std::error::Error>> {
        let color = RGBA::new(255, 128, 0, 64);
        let json = serde_json::to_string(&color)?;
        assert_eq!(json, "\"#ff800040\"");
        let parsed: RGBA = serde_json::from_str(&json)?;
        assert_eq!(parsed, color);
        let named: RGBA = serde_json::from_str("\"orange\"")?;
        assert_eq!(named, RGBA::new(255, 165, 0, 255));
        Ok(())
    }
}
