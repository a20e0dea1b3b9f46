use crate::domain::model::{Label, PassengerRecord, PredictionResult};
use crate::domain::ports::Classifier;
use crate::utils::error::Result;

/// Single-record inference over a classifier loaded once at startup.
///
/// The service never mutates its classifier, so one instance can be shared
/// by reference across every request the process handles.
pub struct InferenceService<C: Classifier> {
    classifier: C,
}

impl<C: Classifier> InferenceService<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn predict(&self, record: &PassengerRecord) -> Result<PredictionResult> {
        let proba = self.classifier.predict_proba(&record.columns())?;

        // argmax, ties resolve to the first class
        let label = if proba[1] > proba[0] {
            Label::Survived
        } else {
            Label::Died
        };

        tracing::debug!(
            "Predicted {} (p_survived={:.4}) for {:?}",
            label,
            proba[1],
            record
        );

        Ok(PredictionResult {
            label,
            probability_survived: proba[1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FeatureValue, Pclass, Sex};
    use crate::utils::error::PredictError;

    struct FixedClassifier {
        names: Vec<String>,
        proba: [f64; 2],
    }

    impl FixedClassifier {
        fn new(proba: [f64; 2]) -> Self {
            Self {
                names: ["Pclass", "Sex", "Age", "SibSp", "Fare"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                proba,
            }
        }
    }

    impl Classifier for FixedClassifier {
        fn feature_names(&self) -> &[String] {
            &self.names
        }

        fn predict_proba(&self, row: &[(&str, FeatureValue)]) -> Result<[f64; 2]> {
            let actual: Vec<&str> = row.iter().map(|(n, _)| *n).collect();
            if actual != self.names {
                return Err(PredictError::SchemaMismatch {
                    expected: format!("{:?}", self.names),
                    actual: format!("{:?}", actual),
                });
            }
            Ok(self.proba)
        }
    }

    fn record() -> PassengerRecord {
        PassengerRecord {
            pclass: Pclass::Second,
            sex: Sex::Female,
            age: 30,
            sib_sp: 0,
            fare: 0,
        }
    }

    #[test]
    fn test_label_follows_majority_class() {
        let service = InferenceService::new(FixedClassifier::new([0.3, 0.7]));
        let result = service.predict(&record()).unwrap();
        assert_eq!(result.label, Label::Survived);
        assert_eq!(result.probability_survived, 0.7);

        let service = InferenceService::new(FixedClassifier::new([0.9, 0.1]));
        assert_eq!(service.predict(&record()).unwrap().label, Label::Died);
    }

    #[test]
    fn test_even_split_predicts_died() {
        let service = InferenceService::new(FixedClassifier::new([0.5, 0.5]));
        let result = service.predict(&record()).unwrap();
        assert_eq!(result.label, Label::Died);
        assert_eq!(result.probability_survived, 0.5);
    }

    #[test]
    fn test_schema_mismatch_propagates() {
        let mut classifier = FixedClassifier::new([0.5, 0.5]);
        classifier.names.swap(0, 1);
        let service = InferenceService::new(classifier);
        assert!(matches!(
            service.predict(&record()),
            Err(PredictError::SchemaMismatch { .. })
        ));
    }
}
