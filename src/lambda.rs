#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use std::sync::Arc;
#[cfg(feature = "lambda")]
use titanic_survival::core::dataset::DatasetPreview;
#[cfg(feature = "lambda")]
use titanic_survival::core::presentation::RenderedView;
#[cfg(feature = "lambda")]
use titanic_survival::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use titanic_survival::{
    LambdaConfig, LocalArtifacts, PassengerForm, PredictError, PredictionApp, S3Artifacts,
};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    #[serde(flatten)]
    pub form: PassengerForm,
    #[serde(default)]
    pub include_sample: bool,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    #[serde(flatten)]
    pub view: RenderedView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<DatasetPreview>,
}

#[cfg(feature = "lambda")]
async fn function_handler(app: &PredictionApp, event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling prediction request");

    let today = chrono::Utc::now().date_naive();
    let view = app
        .handle(&event.payload.form, today)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    Ok(Response {
        view,
        sample: event
            .payload
            .include_sample
            .then(|| app.preview().clone()),
    })
}

#[cfg(feature = "lambda")]
async fn load_app(config: &LambdaConfig) -> Result<PredictionApp, PredictError> {
    match &config.artifact_bucket {
        Some(bucket) => {
            // 從 S3 讀取模型與資料集
            let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
            let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
                .region(Region::new(config.artifact_region.clone()))
                .force_path_style(true)
                .build();
            let source = S3Artifacts::new(S3Client::from_conf(s3_config), bucket.clone());
            PredictionApp::load(&source, config).await
        }
        None => PredictionApp::load(&LocalArtifacts::new("."), config).await,
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    // 冷啟動時載入一次，之後所有請求共用
    let app = Arc::new(load_app(&config).await?);

    run(service_fn(move |event: LambdaEvent<Request>| {
        let app = Arc::clone(&app);
        async move { function_handler(&app, event).await }
    }))
    .await
}
