//! Typed TOML configuration for both tools.
//!
//! Every table uses `serde(default)`, so a config file only needs the keys it changes.
//! Defaults reproduce the reference figures.
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::{
    boundary::BoundaryCondition,
    knot::Knot,
    points::DEFAULT_LIMIT,
    sampling::DEFAULT_SAMPLES,
    tangent::DEFAULT_HALF_LENGTH,
};

const REFERENCE_X: [f64; 11] = [0.0, 0.2, 1.0, 1.6, 2.0, 2.5, 3.0, 3.2, 4.0, 4.5, 5.0];
const REFERENCE_Y: [f64; 11] = [0.0, 0.1, 0.0, -0.2, 0.0, 0.8, 0.0, -0.3, 0.0, 0.5, 0.0];
const REFERENCE_ANCHORS: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveConfig {
    /// Control points as `[x, y]` pairs, any order.
    pub knots: Vec<Knot>,
    pub boundary: BoundaryCondition,
    pub samples: usize,
    pub tangents: TangentConfig,
    pub output: PathBuf,
    pub style: CurveStyle,
}

impl Default for CurveConfig {
    fn default() -> Self {
        CurveConfig {
            knots: Knot::from_xy(&REFERENCE_X, &REFERENCE_Y),
            boundary: BoundaryCondition::default(),
            samples: DEFAULT_SAMPLES,
            tangents: TangentConfig::default(),
            output: PathBuf::from("spline.svg"),
            style: CurveStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TangentConfig {
    /// x positions where tangents touch the curve.
    pub anchors: Vec<f64>,
    pub half_length: f64,
}

impl Default for TangentConfig {
    fn default() -> Self {
        TangentConfig { anchors: REFERENCE_ANCHORS.to_vec(), half_length: DEFAULT_HALF_LENGTH }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveStyle {
    pub width: u32,
    pub height: u32,
    pub caption: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub curve_color: [u8; 3],
    pub tangent_color: [u8; 3],
    pub knot_color: [u8; 3],
    pub show_knots: bool,
    pub grid: bool,
}

impl Default for CurveStyle {
    fn default() -> Self {
        CurveStyle {
            width: 800,
            height: 600,
            caption: None,
            x_label: "x".to_string(),
            y_label: "perlin(x)".to_string(),
            curve_color: [0, 0, 255],
            tangent_color: [255, 165, 0],
            knot_color: [255, 0, 0],
            show_knots: false,
            grid: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScatterConfig {
    pub input: PathBuf,
    /// Maximum number of points kept from the input.
    pub limit: usize,
    pub skip_invalid: bool,
    pub output: PathBuf,
    pub style: ScatterStyle,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        ScatterConfig {
            input: PathBuf::from("./test.txt"),
            limit: DEFAULT_LIMIT,
            skip_invalid: false,
            output: PathBuf::from("scatter.svg"),
            style: ScatterStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScatterStyle {
    pub width: u32,
    pub height: u32,
    pub caption: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
    pub color: [u8; 3],
    pub marker_size: u32,
    /// Projection angles in radians.
    pub yaw: f64,
    pub pitch: f64,
    pub scale: f64,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        ScatterStyle {
            width: 800,
            height: 800,
            caption: None,
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            z_label: "Z".to_string(),
            color: [255, 0, 0],
            marker_size: 2,
            yaw: 0.5,
            pitch: 0.3,
            scale: 0.8,
        }
    }
}

impl CurveConfig {
    /// Reads the config from `path`, or returns defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => read_toml(path),
            None => Ok(CurveConfig::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.knots.len() < 2 {
            return Err(ConfigError::Invalid(format!("at least 2 knots required, got {}", self.knots.len())));
        }
        if self.samples < 2 {
            return Err(ConfigError::Invalid(format!("samples must be at least 2, got {}", self.samples)));
        }
        if !(self.tangents.half_length.is_finite() && self.tangents.half_length > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tangent half_length must be positive, got {}",
                self.tangents.half_length
            )));
        }
        if let Some(x) = self.tangents.anchors.iter().find(|x| !x.is_finite()) {
            return Err(ConfigError::Invalid(format!("tangent anchor {x} is not finite")));
        }
        check_size(self.style.width, self.style.height)
    }
}

impl ScatterConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => read_toml(path),
            None => Ok(ScatterConfig::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == 0 {
            return Err(ConfigError::Invalid("limit must be at least 1".to_string()));
        }
        if self.style.marker_size == 0 {
            return Err(ConfigError::Invalid("marker_size must be at least 1".to_string()));
        }
        if !(self.style.scale.is_finite() && self.style.scale > 0.0) {
            return Err(ConfigError::Invalid(format!("scale must be positive, got {}", self.style.scale)));
        }
        check_size(self.style.width, self.style.height)
    }
}

fn check_size(width: u32, height: u32) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::Invalid(format!("figure size must be non-zero, got {width}x{height}")));
    }
    Ok(())
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "config read");
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn curve_defaults_are_reference_figure() {
        let config = CurveConfig::default();

        assert_eq!(11, config.knots.len());
        assert_eq!(0.8, config.knots[5].get_y());
        assert_eq!(BoundaryCondition::NotAKnot, config.boundary);
        assert_eq!(500, config.samples);
        assert_eq!(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], config.tangents.anchors);
        assert_eq!(0.15, config.tangents.half_length);
        assert_eq!("perlin(x)", config.style.y_label);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_curve_config_keeps_defaults() {
        let config: CurveConfig = toml::from_str(
            r#"
            samples = 50
            boundary = { kind = "natural" }

            [tangents]
            half_length = 0.3

            [style]
            grid = true
            "#,
        )
        .unwrap();

        assert_eq!(50, config.samples);
        assert_eq!(BoundaryCondition::Natural, config.boundary);
        assert_eq!(0.3, config.tangents.half_length);
        assert_eq!(6, config.tangents.anchors.len());
        assert!(config.style.grid);
        assert_eq!(11, config.knots.len());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<CurveConfig>("sample = 10").is_err());
        assert!(toml::from_str::<ScatterConfig>("[style]\ncolour = [1, 2, 3]").is_err());
    }

    #[test]
    fn curve_validation() {
        let mut config = CurveConfig::default();
        config.samples = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CurveConfig::default();
        config.knots.truncate(1);
        assert!(config.validate().is_err());

        let mut config = CurveConfig::default();
        config.tangents.half_length = 0.0;
        assert!(config.validate().is_err());

        let mut config = CurveConfig::default();
        config.tangents.anchors.push(f64::NAN);
        assert!(config.validate().is_err());

        let mut config = CurveConfig::default();
        config.style.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn scatter_defaults_and_validation() {
        let config = ScatterConfig::default();

        assert_eq!(PathBuf::from("./test.txt"), config.input);
        assert_eq!(20_000, config.limit);
        assert!(!config.skip_invalid);
        assert!(config.validate().is_ok());

        let mut config = ScatterConfig::default();
        config.limit = 0;
        assert!(config.validate().is_err());

        let mut config = ScatterConfig::default();
        config.style.scale = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "input = \"points.txt\"\nlimit = 10\n[style]\nyaw = 1.0").unwrap();

        let config = ScatterConfig::load(Some(file.path())).unwrap();

        assert_eq!(PathBuf::from("points.txt"), config.input);
        assert_eq!(10, config.limit);
        assert_eq!(1.0, config.style.yaw);
        assert_eq!("Z", config.style.z_label);
    }

    #[test]
    fn load_without_path_is_default() {
        let config = CurveConfig::load(None).unwrap();
        assert_eq!(500, config.samples);
    }

    #[test]
    fn load_errors_carry_path() {
        let missing = Path::new("/definitely/not/here.toml");
        let error = CurveConfig::load(Some(missing)).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("/definitely/not/here.toml"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "samples = \"many\"").unwrap();
        assert!(matches!(CurveConfig::load(Some(file.path())), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn bundled_configs_parse() {
        let curve: CurveConfig = toml::from_str(include_str!("../config/spline_tangents.toml")).unwrap();
        assert!(curve.validate().is_ok());

        let scatter: ScatterConfig = toml::from_str(include_str!("../config/scatter3d.toml")).unwrap();
        assert!(scatter.validate().is_ok());
    }
}
