//! Response selection and acquisition backend descriptors.
//!
//! The reconstruction core never talks to an acquisition backend. This
//! module only models what the acquisition layer hands over: which response
//! is available, and which backend/action combination produced it.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::{RawResponse, ResponseKind};
use crate::parser::Features;

/// A raw response tagged with the operation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Result of a document analysis (text, tables, forms)
    Analysis(RawResponse),
    /// Result of a text detection (text only)
    Text(RawResponse),
}

impl Response {
    /// Tag a raw response with a kind.
    pub fn new(kind: ResponseKind, raw: RawResponse) -> Self {
        match kind {
            ResponseKind::Analysis => Response::Analysis(raw),
            ResponseKind::Text => Response::Text(raw),
        }
    }

    /// Kind of the response.
    pub fn kind(&self) -> ResponseKind {
        match self {
            Response::Analysis(_) => ResponseKind::Analysis,
            Response::Text(_) => ResponseKind::Text,
        }
    }

    /// The underlying raw response.
    pub fn raw(&self) -> &RawResponse {
        match self {
            Response::Analysis(raw) | Response::Text(raw) => raw,
        }
    }

    /// Consume and return the underlying raw response.
    pub fn into_raw(self) -> RawResponse {
        match self {
            Response::Analysis(raw) | Response::Text(raw) => raw,
        }
    }
}

/// Results an acquisition run may have produced.
#[derive(Debug, Clone, Default)]
pub struct ResponseSlots {
    /// Analysis result, if an analysis was run
    pub analysis: Option<RawResponse>,
    /// Text-detection result, if a text detection was run
    pub text: Option<RawResponse>,
}

impl ResponseSlots {
    /// Pick the response to reconstruct from, preferring the analysis.
    pub fn select(self) -> Result<Response> {
        match (self.analysis, self.text) {
            (Some(raw), _) => Ok(Response::Analysis(raw)),
            (None, Some(raw)) => Ok(Response::Text(raw)),
            (None, None) => Err(Error::Precondition(
                "neither an analysis nor a text response is available; \
                 run text detection or document analysis first"
                    .to_string(),
            )),
        }
    }
}

/// Acquisition backends known to the surrounding tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Aws,
    Google,
    Tika,
    Camelot,
}

/// Extraction actions a backend may be asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// OCR text only
    OcrText,
    /// OCR with tables
    OcrTables,
    /// OCR with forms
    OcrForms,
    /// OCR with tables and forms
    OcrTablesForms,
    /// Embedded text without OCR
    Text,
    /// Tables without OCR
    Tables,
}

impl Backend {
    /// All backends.
    pub const ALL: [Backend; 4] = [Backend::Aws, Backend::Google, Backend::Tika, Backend::Camelot];

    /// Actions this backend can perform.
    pub fn supported_actions(self) -> &'static [Action] {
        match self {
            Backend::Aws => &[
                Action::OcrText,
                Action::OcrTables,
                Action::OcrForms,
                Action::OcrTablesForms,
            ],
            Backend::Google => &[Action::OcrText],
            Backend::Tika => &[Action::OcrText, Action::Text],
            Backend::Camelot => &[Action::Tables],
        }
    }

    /// Whether this backend can perform an action.
    pub fn supports(self, action: Action) -> bool {
        self.supported_actions().contains(&action)
    }

    /// Fail unless this backend can perform an action.
    pub fn validate(self, action: Action) -> Result<()> {
        if self.supports(action) {
            return Ok(());
        }
        let options = self
            .supported_actions()
            .iter()
            .map(Action::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::Unsupported(format!(
            "action '{}' can't be used with the '{}' backend (options: {})",
            action, self, options
        )))
    }

    /// Tag of this backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Aws => "aws",
            Backend::Google => "google",
            Backend::Tika => "tika",
            Backend::Camelot => "camelot",
        }
    }
}

impl Action {
    /// All actions.
    pub const ALL: [Action; 6] = [
        Action::OcrText,
        Action::OcrTables,
        Action::OcrForms,
        Action::OcrTablesForms,
        Action::Text,
        Action::Tables,
    ];

    /// Tag of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::OcrText => "ocr_text",
            Action::OcrTables => "ocr_tables",
            Action::OcrForms => "ocr_forms",
            Action::OcrTablesForms => "ocr_tables_forms",
            Action::Text => "text",
            Action::Tables => "tables",
        }
    }

    /// Structures worth reconstructing for this action.
    pub fn features(self) -> Features {
        match self {
            Action::OcrText | Action::Text => Features::NONE,
            Action::OcrTables | Action::Tables => Features {
                tables: true,
                forms: false,
            },
            Action::OcrForms => Features {
                tables: false,
                forms: true,
            },
            Action::OcrTablesForms => Features::ALL,
        }
    }

    /// Kind of response this action yields.
    pub fn response_kind(self) -> ResponseKind {
        match self {
            Action::OcrText | Action::Text => ResponseKind::Text,
            _ => ResponseKind::Analysis,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Backend::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Unsupported(format!("unknown backend '{}'", s)))
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Unsupported(format!("unknown action '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;

    #[test]
    fn test_select_prefers_analysis() {
        let slots = ResponseSlots {
            analysis: Some(RawResponse::new(Vec::new(), 1)),
            text: Some(RawResponse::new(Vec::new(), 2)),
        };
        let response = slots.select().unwrap();
        assert_eq!(response.kind(), ResponseKind::Analysis);
        assert_eq!(response.raw().page_count().unwrap(), 1);
    }

    #[test]
    fn test_select_falls_back_to_text() {
        let slots = ResponseSlots {
            analysis: None,
            text: Some(RawResponse::new(Vec::new(), 1)),
        };
        assert_eq!(slots.select().unwrap().kind(), ResponseKind::Text);
    }

    #[test]
    fn test_select_without_response() {
        let err = ResponseSlots::default().select().unwrap_err();
        assert_eq!(err.class(), ErrorClass::Precondition);
    }

    #[test]
    fn test_backend_actions() {
        assert!(Backend::Aws.supports(Action::OcrTablesForms));
        assert!(!Backend::Google.supports(Action::OcrTables));
        assert!(Backend::Tika.supports(Action::Text));
        assert!(Backend::Camelot.validate(Action::Tables).is_ok());

        let err = Backend::Google.validate(Action::OcrForms).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Unsupported);
        assert!(err.to_string().contains("ocr_text"));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("aws".parse::<Backend>().unwrap(), Backend::Aws);
        assert_eq!("OCR_TABLES".parse::<Action>().unwrap(), Action::OcrTables);
        assert!("azure".parse::<Backend>().is_err());
        assert!("tables-forms".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_features() {
        assert_eq!(Action::OcrText.features(), Features::NONE);
        assert!(Action::OcrForms.features().forms);
        assert!(!Action::OcrForms.features().tables);
        assert_eq!(Action::OcrTablesForms.features(), Features::ALL);
        assert_eq!(Action::OcrText.response_kind(), ResponseKind::Text);
        assert_eq!(Action::OcrTables.response_kind(), ResponseKind::Analysis);
    }
}
