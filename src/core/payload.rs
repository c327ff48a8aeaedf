//! Validation and sanitization of a 200 response body before it is trusted
//! as a PTAX payload.

use crate::domain::model::{QuoteEntry, QuotePayload, RawResponse};
use crate::utils::error::{QuoteError, Result};

pub const SNIPPET_MAX_CHARS: usize = 200;

/// Upper bound on how much of a 5xx body is kept for diagnostics.
pub const ERROR_BODY_MAX_BYTES: usize = 1024;

/// Trimmed, char-bounded excerpt of a body for log lines and error messages.
pub fn body_snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .trim()
        .chars()
        .take(SNIPPET_MAX_CHARS)
        .collect()
}

/// Snippet of at most the first [`ERROR_BODY_MAX_BYTES`] of a server-error body.
pub fn error_body_snippet(body: &[u8]) -> String {
    body_snippet(&body[..body.len().min(ERROR_BODY_MAX_BYTES)])
}

/// Accept the body when the server declares JSON or the body looks like JSON.
pub fn ensure_json(response: &RawResponse) -> Result<()> {
    let text = String::from_utf8_lossy(&response.body);
    let trimmed = text.trim();
    let declared_json = response
        .content_type
        .to_ascii_lowercase()
        .contains("application/json");

    if declared_json || trimmed.starts_with('{') || trimmed.starts_with('[') {
        Ok(())
    } else {
        Err(QuoteError::UnexpectedContentType {
            content_type: response.content_type.clone(),
            snippet: body_snippet(&response.body),
        })
    }
}

/// Remove one `/* ... */` envelope, if the whole trimmed body is wrapped in one.
pub fn strip_comment_wrapper(body: &str) -> &str {
    let trimmed = body.trim();
    match trimmed
        .strip_prefix("/*")
        .and_then(|inner| inner.strip_suffix("*/"))
    {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// Run the full pipeline: content check, unwrap, parse.
pub fn parse_entries(response: &RawResponse) -> Result<Vec<QuoteEntry>> {
    ensure_json(response)?;

    let text = String::from_utf8_lossy(&response.body);
    let cleaned = strip_comment_wrapper(&text);
    let payload: QuotePayload = serde_json::from_str(cleaned)?;

    tracing::debug!("Parsed {} quote entries", payload.value.len());
    Ok(payload.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"value":[{"cotacaoCompra":6.1,"cotacaoVenda":6.2,"dataHoraCotacao":"2025-09-18 13:04:21.123"}]}"#;

    fn json_response(body: &str) -> RawResponse {
        RawResponse::new(200, "application/json", body)
    }

    #[test]
    fn test_comment_wrapped_body_parses_like_plain_body() {
        let plain = parse_entries(&json_response(VALID)).unwrap();
        let wrapped = parse_entries(&json_response(&format!("  /*{} */\n", VALID))).unwrap();

        assert_eq!(plain.len(), 1);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(plain[0].buy_rate, wrapped[0].buy_rate);
        assert_eq!(plain[0].sell_rate, wrapped[0].sell_rate);
        assert_eq!(plain[0].quoted_at, wrapped[0].quoted_at);
    }

    #[test]
    fn test_strip_comment_wrapper_strips_exactly_one_layer() {
        assert_eq!(strip_comment_wrapper("/* {} */"), "{}");
        assert_eq!(strip_comment_wrapper("/*/* {} */*/"), "/* {} */");
        assert_eq!(strip_comment_wrapper("  {\"a\":1}  "), "{\"a\":1}");
        // Only a leading marker is not a wrapper.
        assert_eq!(strip_comment_wrapper("/* {}"), "/* {}");
    }

    #[test]
    fn test_plain_text_body_is_rejected_even_on_200() {
        let response = RawResponse::new(200, "text/plain; charset=utf-8", "Service temporarily unavailable");
        match parse_entries(&response) {
            Err(QuoteError::UnexpectedContentType { content_type, snippet }) => {
                assert_eq!(content_type, "text/plain; charset=utf-8");
                assert_eq!(snippet, "Service temporarily unavailable");
            }
            other => panic!("expected UnexpectedContentType, got {:?}", other),
        }
    }

    #[test]
    fn test_body_shape_overrides_missing_content_type() {
        let response = RawResponse::new(200, "", format!("\n  {}", VALID));
        assert_eq!(parse_entries(&response).unwrap().len(), 1);
    }

    #[test]
    fn test_declared_json_with_comment_wrapper_is_accepted() {
        // The wrapper hides the leading brace, so only the header lets it through.
        let response = RawResponse::new(200, "application/json; charset=utf-8", format!("/*{}*/", VALID));
        assert_eq!(parse_entries(&response).unwrap()[0].sell_rate, 6.2);

        let undeclared = RawResponse::new(200, "text/plain", format!("/*{}*/", VALID));
        assert!(matches!(
            parse_entries(&undeclared),
            Err(QuoteError::UnexpectedContentType { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_a_payload_error() {
        let response = json_response(r#"{"value":[{"cotacaoCompra":"abc"}]}"#);
        assert!(matches!(parse_entries(&response), Err(QuoteError::MalformedPayload(_))));

        let array_body = json_response("[1,2,3]");
        assert!(matches!(parse_entries(&array_body), Err(QuoteError::MalformedPayload(_))));
    }

    #[test]
    fn test_empty_and_missing_value_arrays_yield_no_entries() {
        assert!(parse_entries(&json_response(r#"{"value":[]}"#)).unwrap().is_empty());
        assert!(parse_entries(&json_response(r#"{"@odata.context":"x"}"#)).unwrap().is_empty());
    }

    #[test]
    fn test_null_value_array_yields_no_entries() {
        assert!(parse_entries(&json_response(r#"{"value":null}"#)).unwrap().is_empty());
        assert!(parse_entries(&json_response(r#"/* {"value":null} */"#)).unwrap().is_empty());
    }

    #[test]
    fn test_snippets_are_bounded() {
        let long = "x".repeat(5000);
        assert_eq!(body_snippet(long.as_bytes()).chars().count(), SNIPPET_MAX_CHARS);

        let padded = format!("{}{}", " ".repeat(ERROR_BODY_MAX_BYTES), "tail");
        // The tail lies past the 1024-byte window and is never looked at.
        assert_eq!(error_body_snippet(padded.as_bytes()), "");

        let multibyte = "é".repeat(300);
        assert_eq!(body_snippet(multibyte.as_bytes()).chars().count(), SNIPPET_MAX_CHARS);
    }
}
