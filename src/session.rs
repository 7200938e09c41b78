use axum_extra::extract::cookie::{Cookie, PrivateCookieJar};
use serde::{Deserialize, Serialize};

/// Name of the encrypted session cookie
pub const SESSION_COOKIE: &str = "quill_session";

/// Per-request session state, round-tripped through one private cookie.
///
/// Handlers decode a `Session` from the inbound jar, mutate it, and write
/// it back onto the response. Nothing is shared across requests; when a
/// client races two requests, the last response's cookie wins.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Session {
    user: Option<String>,
    message: Option<String>,
}

impl Session {
    /// Decode the session from the request's cookie jar.
    ///
    /// A missing or undecodable cookie yields an anonymous session.
    pub fn from_jar(jar: &PrivateCookieJar) -> Self {
        jar.get(SESSION_COOKIE)
            .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
            .unwrap_or_default()
    }

    /// Currently signed-in username, if any
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn set_user(&mut self, name: &str) {
        self.user = Some(name.to_string());
    }

    pub fn clear_user(&mut self) {
        self.user = None;
    }

    /// Queue a message for the next rendered page, replacing any pending one
    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(text.into());
    }

    /// Take the pending message, clearing it.
    ///
    /// Called once per rendered page so a message shows up on exactly the
    /// next response.
    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    /// Encode the session back into the jar for the response
    pub fn write(self, jar: PrivateCookieJar) -> PrivateCookieJar {
        let value = serde_json::to_string(&self).unwrap_or_default();
        let mut cookie = Cookie::new(SESSION_COOKIE, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        jar.add(cookie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    #[test]
    fn take_message_clears_it() {
        let mut session = Session::default();
        session.set_message("x.txt was created");
        assert_eq!(session.take_message().as_deref(), Some("x.txt was created"));
        assert_eq!(session.take_message(), None);
    }

    #[test]
    fn set_message_overwrites_pending() {
        let mut session = Session::default();
        session.set_message("first");
        session.set_message("second");
        assert_eq!(session.take_message().as_deref(), Some("second"));
    }

    #[test]
    fn round_trips_through_the_jar() {
        let jar = PrivateCookieJar::new(Key::generate());

        let mut session = Session::default();
        session.set_user("admin");
        session.set_message("Welcome!");
        let jar = session.write(jar);

        let mut decoded = Session::from_jar(&jar);
        assert_eq!(decoded.user(), Some("admin"));
        assert_eq!(decoded.take_message().as_deref(), Some("Welcome!"));
    }

    #[test]
    fn missing_cookie_is_anonymous() {
        let jar = PrivateCookieJar::new(Key::generate());
        let session = Session::from_jar(&jar);
        assert_eq!(session.user(), None);
    }
}
