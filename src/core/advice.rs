use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceItem {
    pub title: String,
    pub steps: Vec<String>,
}

impl AdviceItem {
    pub fn new<I, S>(title: impl Into<String>, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }
}
