//! User-facing login messages

use crate::error::Error;
use crate::wire::ErrorBody;

pub const MISSING_CREDENTIALS: &str = "Please enter both email and password.";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
pub const CONNECTION_FAILED: &str = "Unable to connect to server. Please check your internet.";

/// Reject an empty email or password before anything is sent
pub fn check_credentials(email: &str, password: &str) -> Result<(), &'static str> {
    if email.is_empty() || password.is_empty() {
        Err(MISSING_CREDENTIALS)
    } else {
        Ok(())
    }
}

/// Message to show for a failed login.
///
/// A JSON error body with a `message` wins, then a 401 becomes the invalid
/// credentials message, and anything else is treated as a connection problem.
pub fn login_failure_message(err: &Error) -> String {
    match err {
        Error::Rejected(message) => message.clone(),
        Error::Status { status, body } => {
            if let Some(message) = body_message(body) {
                message
            } else if *status == 401 {
                INVALID_CREDENTIALS.to_string()
            } else {
                CONNECTION_FAILED.to_string()
            }
        }
        _ => CONNECTION_FAILED.to_string(),
    }
}

fn body_message(body: &str) -> Option<String> {
    let start = body.find('{')?;
    let parsed: ErrorBody = serde_json::from_str(&body[start..]).ok()?;
    parsed.message.filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, body: &str) -> Error {
        Error::Status {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_missing_credentials() {
        assert_eq!(check_credentials("", "pw"), Err(MISSING_CREDENTIALS));
        assert_eq!(check_credentials("a@b.c", ""), Err(MISSING_CREDENTIALS));
        assert_eq!(check_credentials("a@b.c", "pw"), Ok(()));
    }

    #[test]
    fn test_body_message_wins() {
        let err = status(401, r#"{"success":false,"message":"Invalid credentials"}"#);
        assert_eq!(login_failure_message(&err), "Invalid credentials");

        let err = status(500, r#"Internal error {"message":"Database down"}"#);
        assert_eq!(login_failure_message(&err), "Database down");
    }

    #[test]
    fn test_status_fallbacks() {
        assert_eq!(login_failure_message(&status(401, "")), INVALID_CREDENTIALS);
        assert_eq!(
            login_failure_message(&status(401, r#"{"message":""}"#)),
            INVALID_CREDENTIALS
        );
        assert_eq!(login_failure_message(&status(404, "not found")), CONNECTION_FAILED);
        assert_eq!(
            login_failure_message(&Error::Connection("refused".into())),
            CONNECTION_FAILED
        );
    }

    #[test]
    fn test_rejected_login_shows_server_message() {
        let err = Error::Rejected("Login failed.".into());
        assert_eq!(login_failure_message(&err), "Login failed.");
    }
}
