pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Artifacts};

pub use config::{cli::LocalArtifacts, toml_config::AppConfig};
pub use core::{app::PredictionApp, inference::InferenceService};
pub use domain::model::{Label, PassengerForm, PassengerRecord, Pclass, PredictionResult, Sex};
pub use utils::error::{PredictError, Result};
