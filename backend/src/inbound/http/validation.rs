//! Request validation helpers for the HTTP adapter.
//!
//! Extractor failures and ISBN parsing are reported through the shared
//! [`Error`] payload so clients always receive the same JSON shape.

use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{Error, Isbn};

/// Parse an ISBN from request input, reporting failures against `field`.
pub(crate) fn parse_isbn(field: &'static str, raw: &str) -> Result<Isbn, Error> {
    Isbn::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": field,
            "value": raw,
            "code": "invalid_isbn",
        }))
    })
}

/// JSON body extractor settings returning domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("invalid request body: {err}"))
            .with_details(json!({ "code": "invalid_body" }))
            .into()
    })
}

/// Query string extractor settings returning domain errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("invalid query string: {err}"))
            .with_details(json!({ "code": "invalid_query" }))
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parse_isbn_trims_input() {
        let isbn = parse_isbn("isbn", " 9780345391803 ").expect("valid ISBN");
        assert_eq!(isbn.as_str(), "9780345391803");
    }

    #[rstest]
    #[case("", "ISBN cannot be empty.")]
    #[case("97803 45391803", "ISBN must not contain whitespace.")]
    fn parse_isbn_reports_field(#[case] raw: &str, #[case] message: &str) {
        let err = parse_isbn("isbn", raw).expect_err("invalid ISBN");
        assert_eq!(err.message(), message);
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "isbn");
        assert_eq!(details["code"], "invalid_isbn");
    }
}
