#[cfg(feature = "lambda")]
use crate::config::toml_config::{
    DEFAULT_ASSETS_DIR, DEFAULT_DATASET_PATH, DEFAULT_MODEL_PATH, DEFAULT_PREVIEW_ROWS,
    MAX_PREVIEW_ROWS,
};
#[cfg(feature = "lambda")]
use crate::core::{ArtifactSource, ConfigProvider};
#[cfg(feature = "lambda")]
use crate::utils::error::{PredictError, Result};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub model_path: String,
    pub dataset_path: String,
    pub assets_dir: String,
    pub preview_rows: usize,
    /// Read artifacts from this bucket instead of the function's filesystem.
    pub artifact_bucket: Option<String>,
    pub artifact_region: String,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let preview_rows = match env::var("PREVIEW_ROWS") {
            Ok(value) => value
                .parse()
                .map_err(|_| PredictError::InvalidConfigValueError {
                    field: "PREVIEW_ROWS".to_string(),
                    value: value.clone(),
                    reason: "must be a positive integer".to_string(),
                })?,
            Err(_) => DEFAULT_PREVIEW_ROWS,
        };

        Ok(Self {
            model_path: env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string()),
            dataset_path: env::var("DATASET_PATH")
                .unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string()),
            assets_dir: env::var("ASSETS_DIR").unwrap_or_else(|_| DEFAULT_ASSETS_DIR.to_string()),
            preview_rows,
            artifact_bucket: env::var("ARTIFACT_BUCKET").ok().filter(|b| !b.is_empty()),
            artifact_region: env::var("ARTIFACT_REGION")
                .unwrap_or_else(|_| "ap-southeast-2".to_string()),
        })
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn dataset_path(&self) -> &str {
        &self.dataset_path
    }

    fn assets_dir(&self) -> &str {
        &self.assets_dir
    }

    fn preview_rows(&self) -> usize {
        self.preview_rows
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_path("MODEL_PATH", &self.model_path)?;
        validate_file_extension("MODEL_PATH", &self.model_path, &["json"])?;
        validate_path("DATASET_PATH", &self.dataset_path)?;
        validate_file_extension("DATASET_PATH", &self.dataset_path, &["csv"])?;
        validate_range("PREVIEW_ROWS", self.preview_rows, 1, MAX_PREVIEW_ROWS)?;

        if let Some(bucket) = &self.artifact_bucket {
            validate_s3_bucket_name("ARTIFACT_BUCKET", bucket)?;
            validate_aws_region("ARTIFACT_REGION", &self.artifact_region)?;
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| PredictError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("S3 bucket name cannot start or end with a hyphen"));
    }

    Ok(())
}

#[cfg(feature = "lambda")]
fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    crate::utils::validation::validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(PredictError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

/// Artifacts stored as objects in one S3 bucket; paths are object keys.
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Artifacts {
    client: S3Client,
    bucket: String,
}

#[cfg(feature = "lambda")]
impl S3Artifacts {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[cfg(feature = "lambda")]
impl ArtifactSource for S3Artifacts {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let location = self.describe(path);

        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| PredictError::artifact_missing(&location, e.into_service_error()))?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| PredictError::artifact_missing(&location, e))?;

        Ok(data.into_bytes().to_vec())
    }

    fn describe(&self, path: &str) -> String {
        format!("s3://{}/{}", self.bucket, path)
    }
}
