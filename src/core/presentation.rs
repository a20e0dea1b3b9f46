use crate::domain::model::{Label, PredictionResult};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Fixed text and image shown for one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBundle {
    pub message: &'static str,
    pub image: &'static str,
    pub caption: &'static str,
}

const DIED: DisplayBundle = DisplayBundle {
    message: "This passenger is predicted to be: **died**",
    image: "Died.jpg",
    caption: "Did not survive",
};

const SURVIVED: DisplayBundle = DisplayBundle {
    message: "This passenger is predicted to be: **survived**",
    image: "Survived.jpg",
    caption: "Survived!",
};

pub fn select_bundle(label: Label) -> &'static DisplayBundle {
    match label {
        Label::Died => &DIED,
        Label::Survived => &SURVIVED,
    }
}

pub fn probability_text(probability_survived: f64) -> String {
    format!(
        "The survival probability: **{:.2}%**",
        probability_survived * 100.0
    )
}

/// Everything the page shows for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedView {
    pub probability_text: String,
    pub label_text: String,
    pub image: String,
    pub caption: String,
    pub label: Label,
    pub probability_survived: f64,
}

impl RenderedView {
    pub fn new(result: &PredictionResult, assets_dir: &str) -> Self {
        let bundle = select_bundle(result.label);
        Self {
            probability_text: probability_text(result.probability_survived),
            label_text: bundle.message.to_string(),
            image: Path::new(assets_dir)
                .join(bundle.image)
                .to_string_lossy()
                .into_owned(),
            caption: bundle.caption.to_string(),
            label: result.label,
            probability_survived: result.probability_survived,
        }
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.probability_text)?;
        writeln!(f, "{}", self.label_text)?;
        write!(f, "[image: {}] {}", self.image, self.caption)
    }
}

pub fn explanation() -> &'static str {
    "**Features used:**
- Ticket class (`Pclass`)
- Sex (`Sex`)
- Age (`Age`)
- Number of siblings/spouses aboard (`SibSp`)
- Number of parents/children aboard (`Fare`)

**Limitations:**
- This model is trained only on historical Titanic data; it may not generalize beyond it.
- It does not account for other factors such as cabin location, deck, or port of embarkation.
- Probabilities are approximate and not guarantees of survival."
}
