pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{PassengerForm, Pclass, Sex};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use toml_config::AppConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "titanic-survival")]
#[command(about = "Predict whether a Titanic passenger would have survived")]
pub struct CliConfig {
    /// TOML configuration file; relative artifact paths resolve against its directory
    #[arg(short, long)]
    pub config: Option<String>,

    /// Serialized decision-tree classifier (JSON)
    #[arg(long)]
    pub model: Option<String>,

    /// Titanic dataset used for the sample preview (CSV)
    #[arg(long)]
    pub dataset: Option<String>,

    /// Directory the result images (Survived.jpg, Died.jpg) are referenced from.
    /// The image files are not bundled; only their paths are reported
    #[arg(long)]
    pub assets_dir: Option<String>,

    /// Sex (female or male)
    #[arg(long, default_value = "female", value_parser = parse_sex)]
    pub sex: Sex,

    /// Date of birth, DD/MM/YYYY (defaults to today)
    #[arg(long)]
    pub dob: Option<String>,

    /// # of siblings / spouses aboard
    #[arg(long, default_value_t = 0)]
    pub sib_sp: u32,

    /// Ticket class (1 = 1st, 2 = 2nd, 3 = 3rd)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub pclass: u8,

    /// # of parents / children aboard. NOTE: the classifier receives this as its `Fare` feature
    #[arg(long, default_value_t = 0)]
    pub fare: u32,

    #[arg(long, help = "Show the first rows of the dataset")]
    pub show_sample: bool,

    #[arg(long, help = "Explain which features the prediction uses")]
    pub explain: bool,

    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
fn parse_sex(value: &str) -> std::result::Result<Sex, String> {
    value.parse().map_err(|e: crate::utils::error::PredictError| e.to_string())
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Load the file config (or defaults) and apply command-line overrides.
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        // 應用命令列覆蓋設定
        if let Some(model) = &self.model {
            config.model.path = model.clone();
        }
        if let Some(dataset) = &self.dataset {
            config.dataset.path = dataset.clone();
        }
        if let Some(assets_dir) = &self.assets_dir {
            config.presentation.assets_dir = assets_dir.clone();
        }

        Ok(config)
    }

    /// Base directory for relative model / dataset paths: the config file's
    /// directory when `--config` is given, otherwise the working directory.
    /// `--model` and `--dataset` overrides resolve against the same base.
    pub fn artifact_base(&self) -> PathBuf {
        self.config
            .as_deref()
            .and_then(|config| Path::new(config).parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The submitted form; a missing date of birth defaults to `today`.
    pub fn form(&self, today: chrono::NaiveDate) -> Result<PassengerForm> {
        let date_of_birth = match &self.dob {
            Some(dob) => crate::core::form::parse_birth_date(dob)?,
            None => today,
        };

        Ok(PassengerForm {
            sex: self.sex,
            date_of_birth,
            sib_sp: self.sib_sp,
            pclass: Pclass::try_from(self.pclass)?,
            fare: self.fare,
        })
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_defaults_match_form_widgets() {
        let cli = CliConfig::parse_from(["titanic-survival"]);
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let form = cli.form(today).unwrap();

        assert_eq!(form.sex, Sex::Female);
        assert_eq!(form.date_of_birth, today);
        assert_eq!(form.pclass, Pclass::First);
        assert_eq!(form.sib_sp, 0);
        assert_eq!(form.fare, 0);
    }

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let cli = CliConfig::parse_from([
            "titanic-survival",
            "--model",
            "other.json",
            "--sex",
            "male",
            "--dob",
            "01/02/1990",
            "--pclass",
            "3",
        ]);
        let config = cli.app_config().unwrap();
        assert_eq!(config.model.path, "other.json");
        assert_eq!(config.dataset.path, toml_config::DEFAULT_DATASET_PATH);

        let form = cli.form(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()).unwrap();
        assert_eq!(form.sex, Sex::Male);
        assert_eq!(form.pclass, Pclass::Third);
        assert_eq!(form.date_of_birth, NaiveDate::from_ymd_opt(1990, 2, 1).unwrap());
    }

    #[test]
    fn test_artifact_base_follows_config_file() {
        let cli = CliConfig::parse_from(["titanic-survival", "--config", "conf/titanic.toml"]);
        assert_eq!(cli.artifact_base(), PathBuf::from("conf"));

        let cli = CliConfig::parse_from(["titanic-survival", "--config", "titanic.toml"]);
        assert_eq!(cli.artifact_base(), PathBuf::from("."));

        let cli = CliConfig::parse_from(["titanic-survival"]);
        assert_eq!(cli.artifact_base(), PathBuf::from("."));
    }

    #[test]
    fn test_assets_dir_help_says_images_are_not_bundled() {
        use clap::CommandFactory;

        let command = CliConfig::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "assets_dir")
            .and_then(|arg| arg.get_long_help().or(arg.get_help()))
            .map(|help| help.to_string())
            .unwrap();
        assert!(help.contains("Survived.jpg"));
        assert!(help.contains("not bundled"));
    }

    #[test]
    fn test_pclass_out_of_range_is_rejected_by_parser() {
        assert!(CliConfig::try_parse_from(["titanic-survival", "--pclass", "4"]).is_err());
        assert!(CliConfig::try_parse_from(["titanic-survival", "--sex", "x"]).is_err());
    }
}
