pub mod app;
pub mod classifier;
pub mod dataset;
pub mod form;
pub mod inference;
pub mod presentation;

pub use crate::domain::model::{Label, PassengerForm, PassengerRecord, PredictionResult};
pub use crate::domain::ports::{ArtifactSource, Classifier, ConfigProvider};
pub use crate::utils::error::Result;
