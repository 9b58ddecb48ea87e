//! Challenge header parsing
//!
//! Turns `WWW-Authenticate` / `Proxy-Authenticate` header values into named
//! challenges with parameters. A header value may carry several challenges
//! separated by commas, and parameter values may themselves be quoted
//! strings containing commas.

use std::collections::HashMap;

use http::{HeaderMap, HeaderName};

use super::scheme::AuthError;

/// One server-offered authentication challenge.
#[derive(Debug, Clone)]
pub struct Challenge {
    scheme: String,
    token: Option<String>,
    params: Vec<(String, String)>,
}

impl Challenge {
    fn new(scheme: &str) -> Self {
        Self {
            scheme: scheme.to_ascii_lowercase(),
            token: None,
            params: Vec::new(),
        }
    }

    /// The scheme name, lowercase.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The bare token of a token68-style challenge, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Look up a parameter by name, case-insensitively.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Parse every challenge carried by `header` across all its occurrences.
///
/// # Errors
///
/// Returns [`AuthError::MalformedChallenge`] when a header value is not
/// valid UTF-8 or carries parameters before any scheme name.
pub fn parse_challenges(
    headers: &HeaderMap,
    header: &HeaderName,
) -> Result<Vec<Challenge>, AuthError> {
    let mut challenges = Vec::new();
    for value in headers.get_all(header) {
        let text = value
            .to_str()
            .map_err(|_| AuthError::MalformedChallenge("header value is not UTF-8".into()))?;
        parse_header_value(text, &mut challenges)?;
    }
    Ok(challenges)
}

/// Index challenges by lowercase scheme name, first occurrence winning.
#[must_use]
pub fn challenge_map(challenges: Vec<Challenge>) -> HashMap<String, Challenge> {
    let mut map = HashMap::new();
    for challenge in challenges {
        map.entry(challenge.scheme.clone()).or_insert(challenge);
    }
    map
}

fn parse_header_value(text: &str, challenges: &mut Vec<Challenge>) -> Result<(), AuthError> {
    for element in split_unquoted_commas(text) {
        let element = element.trim();
        if element.is_empty() {
            continue;
        }
        match element.split_once(char::is_whitespace) {
            None => {
                if element.contains('=') {
                    // a parameter continuing the previous challenge
                    let current = challenges.last_mut().ok_or_else(|| {
                        AuthError::MalformedChallenge(format!(
                            "parameter '{element}' precedes any scheme name"
                        ))
                    })?;
                    push_param(current, element);
                } else {
                    challenges.push(Challenge::new(element));
                }
            }
            Some((scheme, rest)) if !scheme.contains('=') => {
                let mut challenge = Challenge::new(scheme);
                let rest = rest.trim();
                if is_token68(rest) {
                    challenge.token = Some(rest.to_owned());
                } else {
                    push_param(&mut challenge, rest);
                }
                challenges.push(challenge);
            }
            Some(_) => {
                // a parameter whose quoted value contains whitespace
                let current = challenges.last_mut().ok_or_else(|| {
                    AuthError::MalformedChallenge(format!(
                        "parameter '{element}' precedes any scheme name"
                    ))
                })?;
                push_param(current, element);
            }
        }
    }
    Ok(())
}

fn push_param(challenge: &mut Challenge, element: &str) {
    let Some((name, value)) = element.split_once('=') else {
        return;
    };
    challenge
        .params
        .push((name.trim().to_owned(), unquote(value.trim())));
}

fn unquote(value: &str) -> String {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    stripped.replace("\\\"", "\"")
}

// token68 carries no '=' except as trailing padding
fn is_token68(text: &str) -> bool {
    let trimmed = text.trim_end_matches('=');
    !trimmed.is_empty()
        && !trimmed.contains('=')
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-._~+/".contains(&b))
}

fn split_unquoted_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (idx, ch) in text.char_indices() {
        match ch {
            '\\' if in_quotes => escaped = !escaped,
            '"' if !escaped => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => escaped = false,
        }
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::WWW_AUTHENTICATE;
    use http::HeaderValue;

    fn parse_one(value: &'static str) -> Vec<Challenge> {
        let mut headers = HeaderMap::new();
        headers.insert(WWW_AUTHENTICATE, HeaderValue::from_static(value));
        parse_challenges(&headers, &WWW_AUTHENTICATE).expect("challenge should parse")
    }

    #[test]
    fn parses_basic_with_realm() {
        let challenges = parse_one("Basic realm=test");
        assert_eq!(challenges.len(), 1);
        assert_eq!(challenges[0].scheme(), "basic");
        assert_eq!(challenges[0].param("realm"), Some("test"));
    }

    #[test]
    fn parses_quoted_realm_with_comma() {
        let challenges = parse_one("Basic realm=\"a, b\"");
        assert_eq!(challenges.len(), 1);
        assert_eq!(challenges[0].param("realm"), Some("a, b"));
    }

    #[test]
    fn parses_multiple_challenges_in_one_header() {
        let challenges = parse_one("Negotiate, Basic realm=test");
        assert_eq!(challenges.len(), 2);
        assert_eq!(challenges[0].scheme(), "negotiate");
        assert_eq!(challenges[1].scheme(), "basic");
        assert_eq!(challenges[1].param("realm"), Some("test"));
    }

    #[test]
    fn parses_token68_continuation() {
        let challenges = parse_one("NTLM TlRMTVNTUAACAAAA==");
        assert_eq!(challenges.len(), 1);
        assert_eq!(challenges[0].scheme(), "ntlm");
        assert_eq!(challenges[0].token(), Some("TlRMTVNTUAACAAAA=="));
    }

    #[test]
    fn parses_multiple_params() {
        let challenges = parse_one("Digest realm=\"r\", nonce=\"abc\", stale=false");
        assert_eq!(challenges.len(), 1);
        assert_eq!(challenges[0].param("realm"), Some("r"));
        assert_eq!(challenges[0].param("nonce"), Some("abc"));
        assert_eq!(challenges[0].param("STALE"), Some("false"));
    }

    #[test]
    fn rejects_parameter_before_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(WWW_AUTHENTICATE, HeaderValue::from_static("realm=test"));
        let err = parse_challenges(&headers, &WWW_AUTHENTICATE)
            .expect_err("orphan parameter should fail");
        assert!(matches!(err, AuthError::MalformedChallenge(_)));
    }

    #[test]
    fn collects_challenges_across_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append(WWW_AUTHENTICATE, HeaderValue::from_static("Negotiate"));
        headers.append(
            WWW_AUTHENTICATE,
            HeaderValue::from_static("Basic realm=test"),
        );
        let challenges =
            parse_challenges(&headers, &WWW_AUTHENTICATE).expect("challenges should parse");
        assert_eq!(challenges.len(), 2);
    }
}
