use crate::core::ConfigProvider;
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_MODEL_PATH: &str = "assets/model_dt.json";
pub const DEFAULT_DATASET_PATH: &str = "assets/titanic.csv";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const MAX_PREVIEW_ROWS: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: String,
    pub preview_rows: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub assets_dir: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            title: "Titanic Survival Prediction".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATASET_PATH.to_string(),
            preview_rows: None,
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PredictError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_PATH})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var pattern")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn preview_rows(&self) -> usize {
        self.dataset.preview_rows.unwrap_or(DEFAULT_PREVIEW_ROWS)
    }
}

impl ConfigProvider for AppConfig {
    fn model_path(&self) -> &str {
        &self.model.path
    }

    fn dataset_path(&self) -> &str {
        &self.dataset.path
    }

    fn assets_dir(&self) -> &str {
        &self.presentation.assets_dir
    }

    fn preview_rows(&self) -> usize {
        AppConfig::preview_rows(self)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("model.path", &self.model.path)?;
        validate_file_extension("model.path", &self.model.path, &["json"])?;

        validate_path("dataset.path", &self.dataset.path)?;
        validate_file_extension("dataset.path", &self.dataset.path, &["csv"])?;
        validate_range("dataset.preview_rows", self.preview_rows(), 1, MAX_PREVIEW_ROWS)?;

        validate_non_empty_string("presentation.assets_dir", &self.presentation.assets_dir)?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
