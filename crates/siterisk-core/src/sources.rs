//! Source catalog: which WFS layers and scraped pages feed each report.
//!
//! Loaded from a YAML file at startup and validated eagerly — a broken
//! catalog is a programmer/config error and fails fast rather than
//! degrading individual report slices later.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A risk/infrastructure domain backed by a WFS layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerDomain {
    Fire,
    Flood,
    Coastal,
    Character,
    Landslide,
    RetardingBasins,
    MajorRoads,
    Electricity,
}

impl std::fmt::Display for LayerDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LayerDomain::Fire => "fire",
            LayerDomain::Flood => "flood",
            LayerDomain::Coastal => "coastal",
            LayerDomain::Character => "character",
            LayerDomain::Landslide => "landslide",
            LayerDomain::RetardingBasins => "retarding_basins",
            LayerDomain::MajorRoads => "major_roads",
            LayerDomain::Electricity => "electricity",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WfsLayer {
    pub domain: LayerDomain,
    /// Fully-qualified WFS type name, e.g. `"open-data-platform:bmo"`.
    pub type_name: String,
    /// Spatial query buffer around the property, in meters. Falls back to
    /// the app-level default when absent.
    pub radius_m: Option<f64>,
}

/// URL templates for scraped page sources.
///
/// `suburb_stats` takes `{suburb}` and `{postcode}` placeholders;
/// `property` takes `{address}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSources {
    pub suburb_stats: String,
    pub property: String,
}

impl PageSources {
    #[must_use]
    pub fn suburb_stats_url(&self, suburb: &str, postcode: &str) -> String {
        self.suburb_stats
            .replace("{suburb}", &slugify(suburb))
            .replace("{postcode}", postcode.trim())
    }

    #[must_use]
    pub fn property_url(&self, address: &str) -> String {
        self.property.replace("{address}", &slugify(address))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceCatalog {
    pub wfs_endpoint: String,
    /// Geocoding endpoint returning JSON coordinates; takes an `{address}`
    /// placeholder.
    pub geocode_endpoint: String,
    pub layers: Vec<WfsLayer>,
    pub pages: PageSources,
}

impl SourceCatalog {
    #[must_use]
    pub fn layer(&self, domain: LayerDomain) -> Option<&WfsLayer> {
        self.layers.iter().find(|l| l.domain == domain)
    }

    #[must_use]
    pub fn geocode_url(&self, address: &str) -> String {
        self.geocode_endpoint.replace("{address}", &slugify(address))
    }
}

/// Generate a URL-safe slug from a free-text value.
#[must_use]
pub fn slugify(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c.is_whitespace() {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Load and validate the source catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourceCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: SourceCatalog = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &SourceCatalog) -> Result<(), ConfigError> {
    if !catalog.wfs_endpoint.starts_with("http://") && !catalog.wfs_endpoint.starts_with("https://")
    {
        return Err(ConfigError::Validation(format!(
            "wfs_endpoint must be an http(s) URL, got '{}'",
            catalog.wfs_endpoint
        )));
    }

    let mut seen_domains = HashSet::new();
    for layer in &catalog.layers {
        if layer.type_name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "layer '{}' has an empty type_name",
                layer.domain
            )));
        }
        if let Some(radius) = layer.radius_m {
            if radius <= 0.0 || !radius.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "layer '{}' has non-positive radius_m {radius}",
                    layer.domain
                )));
            }
        }
        if !seen_domains.insert(layer.domain) {
            return Err(ConfigError::Validation(format!(
                "duplicate layer domain: '{}'",
                layer.domain
            )));
        }
    }

    for (name, template, placeholder) in [
        ("suburb_stats", &catalog.pages.suburb_stats, "{suburb}"),
        ("property", &catalog.pages.property, "{address}"),
        ("geocode_endpoint", &catalog.geocode_endpoint, "{address}"),
    ] {
        if !template.contains(placeholder) {
            return Err(ConfigError::Validation(format!(
                "{name} template must contain the {placeholder} placeholder"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
wfs_endpoint: "https://geo.example.gov/wfs"
geocode_endpoint: "https://geocode.example.gov/search/{address}"
layers:
  - domain: fire
    type_name: "overlays:bushfire_mgmt"
    radius_m: 5000
  - domain: flood
    type_name: "overlays:floodway"
  - domain: retarding_basins
    type_name: "water:retarding_basins"
    radius_m: 2000
pages:
  suburb_stats: "https://stats.example.gov/{suburb}/{postcode}"
  property: "https://property.example.com/{address}"
"#;

    fn parse(yaml: &str) -> SourceCatalog {
        serde_yaml::from_str(yaml).expect("sample yaml parses")
    }

    #[test]
    fn sample_catalog_parses_and_validates() {
        let catalog = parse(SAMPLE);
        assert!(validate_catalog(&catalog).is_ok());
        assert_eq!(catalog.layers.len(), 3);
    }

    #[test]
    fn layer_lookup_by_domain() {
        let catalog = parse(SAMPLE);
        let fire = catalog.layer(LayerDomain::Fire).expect("fire layer");
        assert_eq!(fire.type_name, "overlays:bushfire_mgmt");
        assert_eq!(fire.radius_m, Some(5000.0));
        assert!(catalog.layer(LayerDomain::Electricity).is_none());
    }

    #[test]
    fn missing_radius_is_none() {
        let catalog = parse(SAMPLE);
        let flood = catalog.layer(LayerDomain::Flood).expect("flood layer");
        assert!(flood.radius_m.is_none());
    }

    #[test]
    fn duplicate_domain_rejected() {
        let yaml = SAMPLE.replace("domain: flood", "domain: fire");
        let catalog = parse(&yaml);
        let result = validate_catalog(&catalog);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
            "expected duplicate-domain validation error, got: {result:?}"
        );
    }

    #[test]
    fn empty_type_name_rejected() {
        let yaml = SAMPLE.replace("\"overlays:floodway\"", "\"  \"");
        let catalog = parse(&yaml);
        assert!(validate_catalog(&catalog).is_err());
    }

    #[test]
    fn non_positive_radius_rejected() {
        let yaml = SAMPLE.replace("radius_m: 5000", "radius_m: -1");
        let catalog = parse(&yaml);
        assert!(validate_catalog(&catalog).is_err());
    }

    #[test]
    fn non_http_endpoint_rejected() {
        let yaml = SAMPLE.replace("https://geo.example.gov/wfs", "ftp://geo.example.gov/wfs");
        let catalog = parse(&yaml);
        assert!(validate_catalog(&catalog).is_err());
    }

    #[test]
    fn template_without_placeholder_rejected() {
        let yaml = SAMPLE.replace("{address}", "fixed");
        let catalog = parse(&yaml);
        assert!(validate_catalog(&catalog).is_err());
    }

    #[test]
    fn page_url_substitution() {
        let catalog = parse(SAMPLE);
        assert_eq!(
            catalog.pages.suburb_stats_url("Kew East", "3102"),
            "https://stats.example.gov/kew-east/3102"
        );
        assert_eq!(
            catalog.pages.property_url("6 English Place Kew"),
            "https://property.example.com/6-english-place-kew"
        );
    }

    #[test]
    fn geocode_url_substitution() {
        let catalog = parse(SAMPLE);
        assert_eq!(
            catalog.geocode_url("6 English Place Kew VIC 3101"),
            "https://geocode.example.gov/search/6-english-place-kew-vic-3101"
        );
    }

    #[test]
    fn slugify_strips_punctuation_and_collapses_dashes() {
        assert_eq!(slugify("St Kilda  Rd."), "st-kilda-rd");
        assert_eq!(slugify("Kew"), "kew");
    }
}
