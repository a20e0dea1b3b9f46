use crate::core::classifier::DecisionTreeClassifier;
use crate::core::dataset::DatasetPreview;
use crate::core::inference::InferenceService;
use crate::core::presentation::RenderedView;
use crate::core::{ArtifactSource, ConfigProvider};
use crate::domain::model::PassengerForm;
use crate::domain::ports::Classifier;
use crate::utils::error::{PredictError, Result};
use chrono::NaiveDate;

/// Startup artifacts plus the stateless request handler.
///
/// Built once per process; nothing here changes after [`PredictionApp::load`].
pub struct PredictionApp {
    service: InferenceService<DecisionTreeClassifier>,
    preview: DatasetPreview,
    assets_dir: String,
}

impl PredictionApp {
    pub async fn load<S: ArtifactSource, C: ConfigProvider>(source: &S, config: &C) -> Result<Self> {
        // 載入模型
        let model_location = source.describe(config.model_path());
        tracing::info!("Loading classifier from {}", model_location);
        let model_bytes = source
            .read_file(config.model_path())
            .await
            .map_err(|e| missing(&model_location, e))?;
        let classifier = DecisionTreeClassifier::from_json_slice(&model_bytes, &model_location)?;
        tracing::info!(
            "Classifier ready: features={:?}, classes={:?}, depth={}, leaves={}",
            classifier.feature_names(),
            classifier.classes(),
            classifier.depth(),
            classifier.n_leaves()
        );

        // 載入資料集預覽
        let dataset_location = source.describe(config.dataset_path());
        let dataset_bytes = source
            .read_file(config.dataset_path())
            .await
            .map_err(|e| missing(&dataset_location, e))?;
        let preview = DatasetPreview::from_csv_bytes(&dataset_bytes, config.preview_rows())?;
        tracing::debug!(
            "Dataset preview: {} columns, {} rows from {}",
            preview.headers.len(),
            preview.rows.len(),
            dataset_location
        );

        Ok(Self {
            service: InferenceService::new(classifier),
            preview,
            assets_dir: config.assets_dir().to_string(),
        })
    }

    pub fn service(&self) -> &InferenceService<DecisionTreeClassifier> {
        &self.service
    }

    pub fn preview(&self) -> &DatasetPreview {
        &self.preview
    }

    /// One form submission in, one rendered view out.
    pub fn handle(&self, form: &PassengerForm, today: NaiveDate) -> Result<RenderedView> {
        let record = form.to_record(today)?;
        let result = self.service.predict(&record)?;
        tracing::info!(
            "Prediction: {} ({:.2}%)",
            result.label,
            result.probability_survived * 100.0
        );
        Ok(RenderedView::new(&result, &self.assets_dir))
    }
}

fn missing(location: &str, err: PredictError) -> PredictError {
    match err {
        PredictError::ArtifactMissing { .. } => err,
        other => PredictError::artifact_missing(location, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Label, Pclass, Sex};
    use std::collections::HashMap;

    struct MemorySource {
        files: HashMap<String, Vec<u8>>,
    }

    impl ArtifactSource for MemorySource {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.get(path).cloned().ok_or_else(|| {
                PredictError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn model_path(&self) -> &str {
            "model.json"
        }

        fn dataset_path(&self) -> &str {
            "data.csv"
        }

        fn assets_dir(&self) -> &str {
            "img"
        }

        fn preview_rows(&self) -> usize {
            1
        }
    }

    fn model() -> Vec<u8> {
        serde_json::json!({
            "model_type": "decision_tree_classifier",
            "feature_names": ["Pclass", "Sex", "Age", "SibSp", "Fare"],
            "categories": { "Sex": ["female", "male"] },
            "classes": ["died", "survived"],
            "root": { "split": {
                "feature_idx": 1,
                "threshold": 0.5,
                "left": { "leaf": { "class_counts": [1.0, 9.0] } },
                "right": { "leaf": { "class_counts": [8.0, 2.0] } }
            } }
        })
        .to_string()
        .into_bytes()
    }

    fn source(with_model: bool, with_dataset: bool) -> MemorySource {
        let mut files = HashMap::new();
        if with_model {
            files.insert("model.json".to_string(), model());
        }
        if with_dataset {
            files.insert("data.csv".to_string(), b"Survived,Sex\n0,male\n1,female\n".to_vec());
        }
        MemorySource { files }
    }

    fn form(sex: Sex) -> PassengerForm {
        PassengerForm {
            sex,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            sib_sp: 0,
            pclass: Pclass::First,
            fare: 0,
        }
    }

    #[tokio::test]
    async fn test_handle_renders_prediction() {
        let app = PredictionApp::load(&source(true, true), &MockConfig).await.unwrap();
        assert_eq!(app.preview().rows.len(), 1);

        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let view = app.handle(&form(Sex::Female), today).unwrap();
        assert_eq!(view.label, Label::Survived);
        assert_eq!(view.probability_text, "The survival probability: **90.00%**");
        assert!(view.image.ends_with("Survived.jpg"));

        let view = app.handle(&form(Sex::Male), today).unwrap();
        assert_eq!(view.label, Label::Died);
        assert_eq!(view.caption, "Did not survive");
    }

    #[tokio::test]
    async fn test_missing_model_is_artifact_missing() {
        let result = PredictionApp::load(&source(false, true), &MockConfig).await;
        assert!(matches!(result, Err(PredictError::ArtifactMissing { .. })));
    }

    #[tokio::test]
    async fn test_missing_dataset_is_artifact_missing() {
        let result = PredictionApp::load(&source(true, false), &MockConfig).await;
        assert!(matches!(result, Err(PredictError::ArtifactMissing { .. })));
    }
}
