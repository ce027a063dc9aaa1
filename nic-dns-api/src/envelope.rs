//! dns-master response envelope
//!
//! Every dns-master response looks like
//!
//! ```xml
//! <response>
//!   <status>success</status>
//!   <data>...</data>
//!   <errors><error code="4097">...</error></errors>
//! </response>
//! ```
//!
//! The root tag is not checked. Parsing happens in two passes: the head
//! (`status` + `errors`) first, so a failed call is reported from its error
//! list even when `<data>` has an unexpected shape, then the typed `<data>`.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{NicError, Result};
use crate::http_client::HttpUtils;

/// Status value of a successful call.
pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct ErrorXml {
    #[serde(rename = "@code", default)]
    code: Option<String>,
    #[serde(rename = "$text", default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorsXml {
    #[serde(default)]
    error: Vec<ErrorXml>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeHead {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Option<ErrorsXml>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeBody<T> {
    data: Option<T>,
}

/// A successful envelope carrying optional `<data>` of type `T`.
#[derive(Debug)]
pub struct Envelope<T> {
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// The `<data>` payload, if the response had one.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// For list-shaped callers: an absent `<data>` becomes `T::default()`.
    pub fn into_list(self) -> T
    where
        T: Default,
    {
        self.data.unwrap_or_default()
    }

    /// For callers that need data: an absent `<data>` is a malformed response.
    pub fn into_required(self) -> Result<T> {
        self.data
            .ok_or_else(|| NicError::malformed("can't find <data> in response"))
    }
}

/// Joins `<error code="N">text</error>` entries as `Code: N. text`.
fn error_message(errors: Option<ErrorsXml>) -> String {
    let mut message = String::new();
    for item in errors.unwrap_or_default().error {
        message.push_str(&format!(
            " Code: {}. {}",
            item.code.unwrap_or_default(),
            item.text.unwrap_or_default()
        ));
    }
    message.trim().to_string()
}

/// Checks `<status>` and extracts the typed `<data>`.
///
/// # Errors
/// * [`NicError::MalformedResponse`] - not XML, or no `<status>` at all
/// * [`NicError::Api`] - status other than `success`, with the concatenated errors
pub fn parse_envelope<T>(body: &str) -> Result<Envelope<T>>
where
    T: DeserializeOwned,
{
    let head: EnvelopeHead = HttpUtils::parse_xml(body)?;

    let Some(status) = head.status else {
        return Err(NicError::malformed(format!(
            "can't find <status> in response: {}",
            crate::utils::log_sanitizer::truncate_for_log(body)
        )));
    };

    if status.trim() != STATUS_SUCCESS {
        return Err(NicError::Api {
            message: error_message(head.errors),
        });
    }

    let envelope: EnvelopeBody<T> = HttpUtils::parse_xml(body)?;
    Ok(Envelope {
        data: envelope.data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IgnoredAny;

    #[derive(Debug, Default, Deserialize)]
    struct Payload {
        #[serde(default)]
        x: Vec<IgnoredAny>,
    }

    #[test]
    fn success_returns_data() {
        let env: Envelope<Payload> =
            parse_envelope("<response><status>success</status><data><x/></data></response>")
                .unwrap();
        assert!(env.data().is_some_and(|payload| payload.x.len() == 1));
    }

    #[test]
    fn root_tag_is_not_checked() {
        let env: Envelope<Payload> =
            parse_envelope("<answer><status>success</status><data><x/></data></answer>").unwrap();
        assert!(env.into_required().is_ok());
    }

    #[test]
    fn error_status_concatenates_all_errors() {
        let body = r#"<response>
            <status>error</status>
            <errors>
                <error code="4097">Zone not found</error>
                <error code="4001">Access denied</error>
            </errors>
        </response>"#;
        let err = parse_envelope::<Payload>(body).unwrap_err();
        let NicError::Api { message } = &err else {
            panic!("expected Api error, got {err:?}");
        };
        assert_eq!(message, "Code: 4097. Zone not found Code: 4001. Access denied");
    }

    #[test]
    fn error_status_without_errors_has_empty_message() {
        let err =
            parse_envelope::<Payload>("<response><status>fail</status></response>").unwrap_err();
        assert!(matches!(err, NicError::Api { message } if message.is_empty()));
    }

    #[test]
    fn missing_status_is_malformed() {
        for body in [
            "<response><data><x/></data></response>",
            r#"<response><errors><error code="1">boom</error></errors></response>"#,
            "<response/>",
        ] {
            let err = parse_envelope::<Payload>(body).unwrap_err();
            assert!(
                matches!(err, NicError::MalformedResponse { .. }),
                "unexpected error for {body}: {err:?}"
            );
        }
    }

    #[test]
    fn non_xml_body_is_malformed() {
        let err = parse_envelope::<Payload>("").unwrap_err();
        assert!(matches!(err, NicError::MalformedResponse { .. }));
    }

    #[test]
    fn absent_data_list_vs_required() {
        let body = "<response><status>success</status></response>";

        let list = parse_envelope::<Payload>(body).unwrap().into_list();
        assert!(list.x.is_empty());

        let err = parse_envelope::<Payload>(body).unwrap().into_required().unwrap_err();
        assert!(matches!(err, NicError::MalformedResponse { .. }));
    }
}
