use crate::domain::model::FeatureValue;
use crate::utils::error::Result;

/// Read-only access to the startup artifacts (model, dataset).
pub trait ArtifactSource: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Human-readable location of `path`, used in logs and errors.
    fn describe(&self, path: &str) -> String {
        path.to_string()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn dataset_path(&self) -> &str;
    fn assets_dir(&self) -> &str;
    fn preview_rows(&self) -> usize;
}

/// A pre-trained binary classifier consulted one row at a time.
pub trait Classifier: Send + Sync {
    /// Feature names in the order the classifier expects them.
    fn feature_names(&self) -> &[String];

    /// Class distribution `[p_died, p_survived]` for one row of named columns.
    fn predict_proba(&self, row: &[(&str, FeatureValue)]) -> Result<[f64; 2]>;
}
