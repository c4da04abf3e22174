//! Route files: a declaration table in YAML or JSON.
//!
//! ```yaml
//! routes:
//!   - pattern: /posts/:postId/edit
//!     view: PostEdit
//!   - pattern: /signup
//!     view: SignUp
//! fallback: NotFound
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::RouterConfig;
use crate::router::{RouteMap, RouteTable};

/// One `pattern → view` line of a route file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteRecord {
    pub pattern: String,
    pub view: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutesFile {
    pub routes: Vec<RouteRecord>,
    /// View for the universal catch-all appended after `routes`
    #[serde(default)]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Format from a file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }
}

impl RoutesFile {
    /// Read and deserialize a route file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Unknown extension, I/O failure, or a document that does not match
    /// the route-file shape.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let Some(format) = FileFormat::from_path(path) else {
            bail!(
                "Unsupported route file extension for {} (expected .yaml, .yml or .json)",
                path.display()
            );
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read route file {}", path.display()))?;
        Self::from_str_as(&content, format)
            .with_context(|| format!("Failed to parse route file {}", path.display()))
    }

    pub fn from_str_as(content: &str, format: FileFormat) -> anyhow::Result<Self> {
        let file = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        };
        Ok(file)
    }

    /// Compile into a table of view names, in file order, with the fallback
    /// (if any) last.
    ///
    /// # Errors
    ///
    /// The first pattern syntax error, or
    /// [`RouterError::MissingFallback`](crate::RouterError::MissingFallback)
    /// when `config` requires a fallback and the table has none.
    pub fn to_table(&self, config: &RouterConfig) -> crate::Result<RouteTable<String>> {
        let mut map = RouteMap::with_config(config);
        for record in &self.routes {
            map.route(&record.pattern, record.view.clone());
        }
        if let Some(view) = &self.fallback {
            map.fallback(view.clone());
        }
        let table = map.into_table()?;
        if config.require_fallback {
            table.ensure_fallback()?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    const YAML: &str = "
routes:
  - pattern: /posts/:postId/edit
    view: PostEdit
  - pattern: /signup
    view: SignUp
fallback: NotFound
";

    #[test]
    fn test_yaml_and_json_agree() {
        let json = r#"{
            "routes": [
                {"pattern": "/posts/:postId/edit", "view": "PostEdit"},
                {"pattern": "/signup", "view": "SignUp"}
            ],
            "fallback": "NotFound"
        }"#;
        assert_eq!(
            RoutesFile::from_str_as(YAML, FileFormat::Yaml).unwrap(),
            RoutesFile::from_str_as(json, FileFormat::Json).unwrap()
        );
    }

    #[test]
    fn test_to_table_appends_fallback() {
        let file = RoutesFile::from_str_as(YAML, FileFormat::Yaml).unwrap();
        let table = file.to_table(&RouterConfig::default()).unwrap();
        assert_eq!(
            table.patterns().collect::<Vec<_>>(),
            vec!["/posts/:postId/edit", "/signup", "/:path*"]
        );
        assert!(table.has_fallback());
    }

    #[test]
    fn test_strict_config_requires_fallback() {
        let file = RoutesFile {
            routes: vec![RouteRecord {
                pattern: "/".to_string(),
                view: "Home".to_string(),
            }],
            fallback: None,
        };
        let config = RouterConfig::default().require_fallback(true);
        assert_eq!(file.to_table(&config).unwrap_err(), RouterError::MissingFallback);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let bad = "routes: []\nfallbak: NotFound\n";
        assert!(RoutesFile::from_str_as(bad, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path(Path::new("r.YML")), Some(FileFormat::Yaml));
        assert_eq!(FileFormat::from_path(Path::new("r.json")), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_path(Path::new("r.toml")), None);
        assert_eq!(FileFormat::from_path(Path::new("routes")), None);
    }
}
