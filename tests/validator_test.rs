mod common;

use common::{serve_once, serve_raw, unused_url};
use git_genius::credentials::CredentialStore;
use git_genius::error_log::ErrorLog;
use git_genius::github::{TokenValidator, Validation, ValidationError};
use git_genius::network::NetworkStatus;
use git_genius::paths::GeniusPaths;
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    credentials: CredentialStore,
    log: ErrorLog,
}

impl Fixture {
    fn with_token(token: &str) -> anyhow::Result<Self> {
        let temp = TempDir::new()?;
        let paths = GeniusPaths::new(temp.path());
        let credentials = CredentialStore::new(paths.token_file());
        credentials.save(token)?;
        Ok(Self {
            _temp: temp,
            credentials,
            log: ErrorLog::new(paths.error_log()),
        })
    }

    fn validator(&self, api_url: &str) -> TokenValidator {
        TokenValidator::new(
            self.credentials.clone(),
            NetworkStatus::Online,
            api_url,
            self.log.clone(),
        )
    }
}

#[test]
fn test_valid_token_returns_login() -> anyhow::Result<()> {
    let fixture = Fixture::with_token("ghp_valid")?;
    let (url, server) = serve_once("200 OK", r#"{"login": "octocat", "id": 1}"#)?;

    let result = fixture.validator(&url).validate()?;
    assert_eq!(result, Validation::User("octocat".to_string()));

    let request = server.join().expect("server thread").to_lowercase();
    assert!(request.starts_with("get /user "));
    assert!(request.contains("authorization: token ghp_valid"));
    assert!(request.contains("user-agent: git-genius"));
    Ok(())
}

#[test]
fn test_rejected_token_is_invalid() -> anyhow::Result<()> {
    let fixture = Fixture::with_token("ghp_revoked")?;
    let (url, server) = serve_once("401 Unauthorized", r#"{"message": "Bad credentials"}"#)?;

    let result = fixture.validator(&url).validate();
    server.join().expect("server thread");

    assert!(matches!(
        result,
        Err(ValidationError::InvalidToken { status: 401 })
    ));
    // The validator itself never deletes the token.
    assert_eq!(fixture.credentials.get(), "ghp_revoked");
    assert!(!fixture.log.exists());
    Ok(())
}

#[test]
fn test_response_without_login_is_malformed() -> anyhow::Result<()> {
    let fixture = Fixture::with_token("ghp_valid")?;

    for body in [r#"{"id": 1}"#, r#"{"login": ""}"#, "not json"] {
        let (url, server) = serve_once("200 OK", body)?;
        let result = fixture.validator(&url).validate();
        server.join().expect("server thread");
        assert!(
            matches!(result, Err(ValidationError::MalformedResponse)),
            "{body:?} gave {result:?}"
        );
    }
    Ok(())
}

#[test]
fn test_transport_failure_is_logged_as_network_error() -> anyhow::Result<()> {
    let fixture = Fixture::with_token("ghp_valid")?;

    let result = fixture.validator(&unused_url()?).validate();

    assert!(matches!(result, Err(ValidationError::Network(_))));
    assert!(fixture.log.exists());
    let log = std::fs::read_to_string(fixture.log.path())?;
    assert!(log.contains("github api request failed"));
    Ok(())
}

#[test]
fn test_truncated_body_is_network_error() -> anyhow::Result<()> {
    let fixture = Fixture::with_token("ghp_valid")?;
    let (url, server) = serve_raw(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\nConnection: close\r\n\r\n{\"login\":"
            .to_string(),
    )?;

    let result = fixture.validator(&url).validate();
    server.join().expect("server thread");

    assert!(
        matches!(result, Err(ValidationError::Network(_))),
        "got {result:?}"
    );
    let log = std::fs::read_to_string(fixture.log.path())?;
    assert!(log.contains("github api response failed"));
    Ok(())
}
