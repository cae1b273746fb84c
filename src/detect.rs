//! Response kind detection.

use crate::error::{Error, Result};
use crate::model::{RawResponse, ResponseKind};
use crate::source::Response;
use serde_json::Value;

/// Marker field present on analysis results.
const ANALYSIS_MARKER: &str = "AnalyzeDocumentModelVersion";
/// Marker field present on text-detection results.
const TEXT_MARKER: &str = "DetectDocumentTextModelVersion";
/// Block types that only an analysis emits.
const ANALYSIS_BLOCK_TYPES: [&str; 4] = ["TABLE", "CELL", "KEY_VALUE_SET", "SELECTION_ELEMENT"];

/// Detect which operation produced a raw JSON response.
///
/// Model version markers decide first. Without a marker, a response is an
/// analysis if it carries any table, cell, form, or selection block. A JSON
/// array is treated as the parts of one paginated response.
///
/// # Example
/// ```
/// use blockdoc::detect::detect_response_kind;
/// use blockdoc::ResponseKind;
///
/// let value = serde_json::json!({
///     "DetectDocumentTextModelVersion": "1.0",
///     "Blocks": []
/// });
/// assert_eq!(detect_response_kind(&value), ResponseKind::Text);
/// ```
pub fn detect_response_kind(value: &Value) -> ResponseKind {
    if let Value::Array(parts) = value {
        return match parts.first() {
            Some(first) if has_marker(first) => detect_response_kind(first),
            _ if parts.iter().any(has_analysis_blocks) => ResponseKind::Analysis,
            _ => ResponseKind::Text,
        };
    }

    if value.get(ANALYSIS_MARKER).is_some() {
        ResponseKind::Analysis
    } else if value.get(TEXT_MARKER).is_some() {
        ResponseKind::Text
    } else if has_analysis_blocks(value) {
        ResponseKind::Analysis
    } else {
        ResponseKind::Text
    }
}

fn has_marker(value: &Value) -> bool {
    value.get(ANALYSIS_MARKER).is_some() || value.get(TEXT_MARKER).is_some()
}

fn has_analysis_blocks(value: &Value) -> bool {
    value
        .get("Blocks")
        .and_then(Value::as_array)
        .map(|blocks| {
            blocks.iter().any(|block| {
                block
                    .get("BlockType")
                    .and_then(Value::as_str)
                    .is_some_and(|t| ANALYSIS_BLOCK_TYPES.contains(&t))
            })
        })
        .unwrap_or(false)
}

/// Build a tagged response from raw JSON, merging paginated parts.
pub fn response_from_value(value: Value) -> Result<Response> {
    let kind = detect_response_kind(&value);
    let raw = match value {
        Value::Array(parts) => {
            let parts = parts
                .into_iter()
                .map(serde_json::from_value::<RawResponse>)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            RawResponse::merge(parts)?
        }
        Value::Object(_) => serde_json::from_value(value)?,
        other => {
            return Err(Error::malformed(format!(
                "expected a response object or an array of parts, found {}",
                json_type_name(&other)
            )))
        }
    };
    Ok(Response::new(kind, raw))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markers_win() {
        let value = json!({
            "AnalyzeDocumentModelVersion": "1.0",
            "Blocks": [{"BlockType": "PAGE", "Id": "p"}]
        });
        assert_eq!(detect_response_kind(&value), ResponseKind::Analysis);

        let value = json!({
            "DetectDocumentTextModelVersion": "1.0",
            "Blocks": [{"BlockType": "TABLE", "Id": "t"}]
        });
        assert_eq!(detect_response_kind(&value), ResponseKind::Text);
    }

    #[test]
    fn test_block_type_fallback() {
        let value = json!({"Blocks": [{"BlockType": "KEY_VALUE_SET", "Id": "k"}]});
        assert_eq!(detect_response_kind(&value), ResponseKind::Analysis);

        let value = json!({"Blocks": [{"BlockType": "WORD", "Id": "w"}]});
        assert_eq!(detect_response_kind(&value), ResponseKind::Text);

        assert_eq!(detect_response_kind(&json!({})), ResponseKind::Text);
    }

    #[test]
    fn test_parts_array() {
        let value = json!([
            {"DocumentMetadata": {"Pages": 2}, "NextToken": "t",
             "Blocks": [{"BlockType": "PAGE", "Id": "p1"}]},
            {"Blocks": [{"BlockType": "PAGE", "Id": "p2"},
                        {"BlockType": "TABLE", "Id": "t1"}]}
        ]);
        assert_eq!(detect_response_kind(&value), ResponseKind::Analysis);

        let response = response_from_value(value).unwrap();
        assert_eq!(response.kind(), ResponseKind::Analysis);
        assert_eq!(response.raw().blocks().unwrap().len(), 3);
    }

    #[test]
    fn test_scalar_is_malformed() {
        let err = response_from_value(json!(42)).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("a number"));
    }
}
