//! Authenticated request pipeline
//!
//! Every outgoing request passes through here: when a token is stored the
//! request gains a bearer Authorization header, otherwise it is forwarded
//! unauthenticated. There is no retry and no refresh; an invalid or
//! expired token comes back from the server as a normal rejected response.

use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;
use session::store::SessionStore;
use tracing::debug;

/// Attach `Authorization: Bearer <token>` when a token is present
pub fn attach_bearer(request: RequestBuilder, session: &SessionStore) -> RequestBuilder {
    match session.token() {
        Some(token) => {
            debug!("attaching bearer token to outgoing request");
            request.header(AUTHORIZATION, format!("Bearer {}", token))
        }
        None => {
            debug!("no session token, request goes out unauthenticated");
            request
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session::backend::MemoryBackend;

    fn build(request: RequestBuilder) -> reqwest::Request {
        request.build().expect("build request")
    }

    #[test]
    fn bearer_header_added_when_token_saved() {
        let session = SessionStore::new(MemoryBackend::new());
        session.save_token("abc").expect("save token");

        let client = reqwest::Client::new();
        let request = build(attach_bearer(
            client.get("http://example.invalid/assets"),
            &session,
        ));

        let header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        assert_eq!(header, Some("Bearer abc"));
    }

    #[test]
    fn no_header_without_token() {
        let session = SessionStore::new(MemoryBackend::new());

        let client = reqwest::Client::new();
        let request = build(attach_bearer(
            client.get("http://example.invalid/assets"),
            &session,
        ));

        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn no_header_on_unbound_store() {
        let session = SessionStore::unbound();

        let client = reqwest::Client::new();
        let request = build(attach_bearer(
            client.get("http://example.invalid/assets"),
            &session,
        ));

        assert!(request.headers().get(AUTHORIZATION).is_none());
    }
}
