use serde::{Deserialize, Serialize};

use crate::classifier::Classification;
use crate::corpus::Document;
use crate::vectordb::SearchHit;

/// Body of an analyze call. A missing title defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub title: String,
    pub text: String,
}

impl AnalyzeRequest {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Text sent to the sentence encoder.
    ///
    /// Built through [`Document`] so the title and body are cut to the same
    /// limits as indexed documents before they are joined.
    pub fn semantic_query(&self) -> String {
        Document::new(&self.title, &self.text, String::new()).embedding_text()
    }
}

/// A retrieved document offered as supporting context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evidence {
    pub title: String,
    pub text: String,
    pub url: String,
    pub score: f32,
}

impl From<SearchHit> for Evidence {
    fn from(hit: SearchHit) -> Self {
        Self {
            title: hit.document.title().to_string(),
            text: hit.document.text().to_string(),
            url: hit.document.url().to_string(),
            score: hit.score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NotImplemented,
}

/// Placeholder verification block; claim verification is out of scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verification {
    pub verdict: Verdict,
    pub confidence: Option<f32>,
    pub evidence: Vec<Evidence>,
}

impl Verification {
    pub fn unverified(evidence: Vec<Evidence>) -> Self {
        Self {
            verdict: Verdict::NotImplemented,
            confidence: None,
            evidence,
        }
    }
}

/// Full response of an analyze call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub classification: Classification,
    pub verification: Verification,
}

impl AnalysisResult {
    pub fn evidence(&self) -> &[Evidence] {
        &self.verification.evidence
    }
}
