//! Tunables for the banner effect.
//!
//! Every field has a default matching the stock banner. Options coming from
//! JavaScript are deserialized with camelCase keys, missing keys fall back to
//! the defaults, and the result is validated before an engine is built.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// An RGBA color. Channels are 0-255, alpha is 0.0-1.0.
///
/// Deserializes from either a CSS string (`"#333"`, `"#1a2b3c"`,
/// `"rgb(0,0,0)"`, `"rgba(0,0,0,0.88)"`) or an `{ r, g, b, a? }` object.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RgbaRepr")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbaRepr {
    Css(String),
    Parts {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: f32,
    },
}

fn opaque() -> f32 {
    1.0
}

impl TryFrom<RgbaRepr> for Rgba {
    type Error = ConfigError;

    fn try_from(repr: RgbaRepr) -> Result<Self, Self::Error> {
        match repr {
            RgbaRepr::Css(css) => css.parse(),
            RgbaRepr::Parts { r, g, b, a } => Ok(Self::new(r, g, b, a)),
        }
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let css = s.trim().to_ascii_lowercase();
        let invalid = || ConfigError::Color(s.to_string());

        if let Some(hex) = css.strip_prefix('#') {
            let digits: Vec<u8> = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| d as u8))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?;
            return match digits[..] {
                [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17, 1.0)),
                [r1, r0, g1, g0, b1, b0] => Ok(Self::new(
                    (r1 << 4) | r0,
                    (g1 << 4) | g0,
                    (b1 << 4) | b0,
                    1.0,
                )),
                _ => Err(invalid()),
            };
        }

        let (args, with_alpha) = if let Some(rest) = css.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = css.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let parts: Vec<&str> = args
            .strip_suffix(')')
            .ok_or_else(invalid)?
            .split(',')
            .map(str::trim)
            .collect();

        let channel = |part: &str| part.parse::<u8>().map_err(|_| invalid());
        match parts[..] {
            [r, g, b] if !with_alpha => Ok(Self::new(channel(r)?, channel(g)?, channel(b)?, 1.0)),
            [r, g, b, a] if with_alpha => {
                let a: f32 = a.parse().map_err(|_| invalid())?;
                if !a.is_finite() {
                    return Err(invalid());
                }
                Ok(Self::new(channel(r)?, channel(g)?, channel(b)?, a))
            }
            _ => Err(invalid()),
        }
    }
}

impl Rgba {
    /// Create a color from channels and alpha.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string with this color's alpha scaled by `alpha`.
    ///
    /// Alpha is printed with three decimals, which is enough resolution for
    /// per-frame fades and keeps style strings short.
    pub fn css_with_alpha(&self, alpha: f32) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            (self.a * alpha).clamp(0.0, 1.0)
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Configuration for the banner effect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BannerConfig {
    /// Number of particles (default: 30).
    pub count: u32,
    /// Smallest particle radius (default: 5.0).
    pub radius_min: f32,
    /// Largest particle radius (default: 10.0).
    pub radius_max: f32,
    /// Per-frame jitter magnitude before scaling (default: 0.18).
    pub drift: f32,
    /// Per-axis velocity cap (default: 1.4).
    pub speed_cap: f32,
    /// Pointer repulsion radius (default: 110.0).
    pub repel_radius: f32,
    /// Pointer repulsion strength at zero distance (default: 1.0).
    pub repel_strength: f32,
    /// Number of distinct links (default: 38).
    pub link_count: u32,
    /// Links longer than this are not drawn (default: 220.0).
    pub link_max_dist: f32,
    /// Link opacity at zero length (default: 0.22).
    pub link_alpha: f32,
    /// Link stroke width (default: 1.2).
    pub line_width: f32,
    /// Per-frame velocity decay (default: 0.92).
    pub damping: f32,
    /// Inset of the bounce boundary from each surface edge (default: 10.0).
    pub edge_padding: f32,
    /// Particle fill (default: rgba(0,0,0,0.88)).
    pub node_fill: Rgba,
    /// Link stroke hue; its alpha multiplies the distance fade
    /// (default: rgba(0,0,0,1)).
    pub line_stroke: Rgba,
    /// Fixed RNG seed. `None` seeds from the host.
    pub seed: Option<u64>,
    /// Keep particles across resizes instead of regenerating them
    /// (default: false).
    pub preserve_on_resize: bool,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            count: 30,
            radius_min: 5.0,
            radius_max: 10.0,
            drift: 0.18,
            speed_cap: 1.4,
            repel_radius: 110.0,
            repel_strength: 1.0,
            link_count: 38,
            link_max_dist: 220.0,
            link_alpha: 0.22,
            line_width: 1.2,
            damping: 0.92,
            edge_padding: 10.0,
            node_fill: Rgba::new(0, 0, 0, 0.88),
            line_stroke: Rgba::new(0, 0, 0, 1.0),
            seed: None,
            preserve_on_resize: false,
        }
    }
}

impl BannerConfig {
    /// Number of distinct unordered pairs among `count` particles.
    pub fn max_links(&self) -> u64 {
        let n = u64::from(self.count);
        n * n.saturating_sub(1) / 2
    }

    /// Reject configurations the initializer or physics step cannot honor.
    ///
    /// Link sampling never terminates when more links are requested than
    /// pairs exist, so that case is caught here rather than at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius_min > self.radius_max {
            return Err(ConfigError::RadiusRange {
                min: self.radius_min,
                max: self.radius_max,
            });
        }
        if u64::from(self.link_count) > self.max_links() {
            return Err(ConfigError::TooManyLinks {
                requested: self.link_count,
                count: self.count,
                max: self.max_links(),
            });
        }
        if !(self.repel_radius > 0.0) {
            return Err(ConfigError::NonPositive("repelRadius", self.repel_radius));
        }
        if !(self.link_max_dist > 0.0) {
            return Err(ConfigError::NonPositive("linkMaxDist", self.link_max_dist));
        }
        if !(self.edge_padding >= 0.0) {
            return Err(ConfigError::NegativePadding(self.edge_padding));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.count, 30);
        assert_eq!(config.link_count, 38);
        assert_eq!(config.max_links(), 435);
    }

    #[test]
    fn test_rejects_inverted_radius() {
        let config = BannerConfig {
            radius_min: 12.0,
            radius_max: 4.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RadiusRange { .. })
        ));
    }

    #[test]
    fn test_rejects_unreachable_link_count() {
        let config = BannerConfig {
            count: 4,
            link_count: 7,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyLinks { max: 6, .. })
        ));

        // Exactly every pair is still reachable.
        let full = BannerConfig {
            count: 4,
            link_count: 6,
            ..Default::default()
        };
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_link_distance() {
        let config = BannerConfig {
            link_max_dist: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_css_colors() {
        assert_eq!("rgba(0,0,0,0.88)".parse(), Ok(Rgba::new(0, 0, 0, 0.88)));
        assert_eq!(" RGB(12, 34, 56) ".parse(), Ok(Rgba::new(12, 34, 56, 1.0)));
        assert_eq!("#333".parse(), Ok(Rgba::new(51, 51, 51, 1.0)));
        assert_eq!("#1a2B3c".parse(), Ok(Rgba::new(26, 43, 60, 1.0)));
    }

    #[test]
    fn test_rejects_malformed_colors() {
        let malformed = [
            "",
            "black",
            "#12",
            "#12345g",
            "rgb(0,0)",
            "rgba(0,0,0)",
            "rgb(256,0,0)",
            "rgba(0,0,0,x)",
        ];
        for bad in malformed {
            assert_eq!(
                bad.parse::<Rgba>(),
                Err(ConfigError::Color(bad.to_string())),
                "{bad:?} parsed"
            );
        }
    }

    #[test]
    fn test_deserialize_color_from_string() {
        use serde::de::value::{Error, StrDeserializer};

        let de = StrDeserializer::<Error>::new("rgba(0,0,0,0.88)");
        assert_eq!(Rgba::deserialize(de).unwrap(), Rgba::new(0, 0, 0, 0.88));

        let de = StrDeserializer::<Error>::new("not a color");
        assert!(Rgba::deserialize(de).is_err());
    }

    #[test]
    fn test_css_alpha_formatting() {
        let stroke = Rgba::new(0, 0, 0, 1.0);
        assert_eq!(stroke.css_with_alpha(0.22), "rgba(0,0,0,0.220)");
        assert_eq!(stroke.css_with_alpha(0.0), "rgba(0,0,0,0.000)");

        let half = Rgba::new(10, 20, 30, 0.5);
        assert_eq!(half.css_with_alpha(0.5), "rgba(10,20,30,0.250)");
        assert_eq!(format!("{}", half), "rgba(10,20,30,0.5)");
    }
}
