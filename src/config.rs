use log::Level;
use serde::Deserialize;
use web_sys::Document;

use crate::error::EnhanceError;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "page-enhancer-config";

pub const MAX_ORB_COUNT: usize = 12;

#[cfg(debug_assertions)]
pub fn default_log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn default_log_level() -> Level {
    Level::Info
}

/// Selectors, class names and tuning values for every feature.
///
/// Every field has a default, so a page only needs to embed the keys it wants
/// to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub log_level: Level,
    pub nav: NavConfig,
    pub reveal: RevealConfig,
    pub lightbox: LightboxConfig,
    pub backdrop: BackdropConfig,
    pub progress: ProgressConfig,
    pub side_images: SideImageConfig,
    pub hero: HeroConfig,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            nav: NavConfig::default(),
            reveal: RevealConfig::default(),
            lightbox: LightboxConfig::default(),
            backdrop: BackdropConfig::default(),
            progress: ProgressConfig::default(),
            side_images: SideImageConfig::default(),
            hero: HeroConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub container_selector: String,
    pub link_selector: String,
    pub home_page: String,
    pub active_class: String,
    pub list_id: String,
    pub open_class: String,
    pub toggle_class: String,
    pub toggle_label: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            container_selector: "nav".into(),
            link_selector: "nav ul li a".into(),
            home_page: "index".into(),
            active_class: "active".into(),
            list_id: "main-navigation".into(),
            open_class: "nav-open".into(),
            toggle_class: "nav-toggle".into(),
            toggle_label: "Toggle navigation".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub threshold: f64,
    pub visible_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".reveal".into(),
            threshold: 0.15,
            visible_class: "visible".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    pub selector: String,
    pub overlay_id: String,
    pub default_alt: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            selector: ".gallery-grid img, .diagram-figure img".into(),
            overlay_id: "lightbox".into(),
            default_alt: "Expanded image".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub container_class: String,
    pub orb_count: usize,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            container_class: "hero-animation".into(),
            orb_count: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub class: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            class: "scroll-progress".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SideImageConfig {
    pub selector: String,
    pub threshold: f64,
    pub visible_class: String,
}

impl Default for SideImageConfig {
    fn default() -> Self {
        Self {
            selector: ".side-image".into(),
            threshold: 0.1,
            visible_class: "is-visible".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OffsetPair {
    pub left: String,
    pub right: String,
}

impl OffsetPair {
    fn new(left: &str, right: &str) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Viewport heights strictly below this use `compact`.
    pub breakpoint: f64,
    pub compact: OffsetPair,
    pub tall: OffsetPair,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            breakpoint: 800.0,
            compact: OffsetPair::new("16rem", "42rem"),
            tall: OffsetPair::new("22rem", "52rem"),
        }
    }
}

impl EnhancerConfig {
    pub fn from_json(raw: &str) -> Result<Self, EnhanceError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the embedded override block, falling back to defaults when the
    /// page has none.
    pub fn from_document(document: &Document) -> Result<Self, EnhanceError> {
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|block| block.text_content())
        {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), EnhanceError> {
        check_threshold("reveal.threshold", self.reveal.threshold)?;
        check_threshold("side_images.threshold", self.side_images.threshold)?;
        if self.backdrop.orb_count > MAX_ORB_COUNT {
            return Err(EnhanceError::TooManyOrbs {
                count: self.backdrop.orb_count,
                max: MAX_ORB_COUNT,
            });
        }
        Ok(())
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), EnhanceError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EnhanceError::InvalidThreshold { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_yields_defaults() {
        let config = EnhancerConfig::from_json("  \n").unwrap();
        assert_eq!(config, EnhancerConfig::default());
        assert_eq!(config.reveal.threshold, 0.15);
        assert_eq!(config.side_images.threshold, 0.1);
        assert_eq!(config.backdrop.orb_count, 3);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = EnhancerConfig::from_json(
            r#"{ "log_level": "warn", "reveal": { "threshold": 0.3 }, "hero": { "breakpoint": 700 } }"#,
        )
        .unwrap();

        assert_eq!(config.log_level, Level::Warn);
        assert_eq!(config.reveal.threshold, 0.3);
        assert_eq!(config.reveal.selector, ".reveal");
        assert_eq!(config.hero.breakpoint, 700.0);
        assert_eq!(config.hero.compact.left, "16rem");
        assert_eq!(config.nav, NavConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = EnhancerConfig::from_json("{ reveal: ").unwrap_err();
        assert!(matches!(err, EnhanceError::Config(_)));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = EnhancerConfig::from_json(r#"{ "side_images": { "threshold": 1.5 } }"#).unwrap_err();
        match err {
            EnhanceError::InvalidThreshold { field, value } => {
                assert_eq!(field, "side_images.threshold");
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_orb_count_is_rejected() {
        let err = EnhancerConfig::from_json(r#"{ "backdrop": { "orb_count": 18446744073709551615 } }"#).unwrap_err();
        assert!(matches!(
            err,
            EnhanceError::TooManyOrbs { count: usize::MAX, max: MAX_ORB_COUNT }
        ));

        let config = EnhancerConfig::from_json(r#"{ "backdrop": { "orb_count": 12 } }"#).unwrap();
        assert_eq!(config.backdrop.orb_count, MAX_ORB_COUNT);
    }
}
