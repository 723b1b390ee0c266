use oauth2::{
    basic::{BasicClient, BasicErrorResponse, BasicTokenResponse},
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    HttpRequest, HttpResponse, RedirectUrl, RefreshToken, RequestTokenError, Scope,
    TokenResponse, TokenUrl,
};
use secrecy::ExposeSecret;

use super::config::ClientCredentials;
use super::orchestrator::AuthorizationServer;
use crate::common::TokenRecord;
use crate::error::AuthError;

pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

// Spotify always sends expires_in, this only covers a malformed response
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

// Simple async HTTP client for OAuth2
async fn http_client(request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let mut builder = client
        .request(request.method().clone(), request.uri().to_string())
        .body(request.body().clone());

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    let mut http_response = HttpResponse::new(body);
    *http_response.status_mut() = status;

    Ok(http_response)
}

/// Talks to the Spotify accounts service
pub struct OAuthClient {
    client: ConfiguredClient,
    requested_scopes: Vec<String>,
}

impl OAuthClient {
    pub fn new(credentials: &ClientCredentials) -> Result<Self, AuthError> {
        Self::with_endpoints(credentials, SPOTIFY_AUTH_URL, SPOTIFY_TOKEN_URL)
    }

    pub fn with_endpoints(
        credentials: &ClientCredentials,
        auth_url: &str,
        token_url: &str,
    ) -> Result<Self, AuthError> {
        let auth_url = AuthUrl::new(auth_url.to_string())
            .map_err(|e| AuthError::Configuration(format!("Invalid auth URL: {}", e)))?;

        let token_url = TokenUrl::new(token_url.to_string())
            .map_err(|e| AuthError::Configuration(format!("Invalid token URL: {}", e)))?;

        let redirect_url = RedirectUrl::new(credentials.redirect_uri.clone())
            .map_err(|e| AuthError::Configuration(format!("Invalid redirect URI: {}", e)))?;

        let client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
            .set_client_secret(ClientSecret::new(
                credentials.client_secret.expose_secret().to_owned(),
            ))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url);

        Ok(Self {
            client,
            requested_scopes: credentials.requested_scopes.clone(),
        })
    }

    fn record_from(
        &self,
        response: &BasicTokenResponse,
        previous_refresh_token: Option<&str>,
    ) -> Result<TokenRecord, AuthError> {
        let refresh_token = match (response.refresh_token(), previous_refresh_token) {
            (Some(token), _) => token.secret().to_string(),
            (None, Some(previous)) => previous.to_string(),
            (None, None) => {
                return Err(AuthError::TokenEndpoint(
                    "No refresh token in response".to_string(),
                ))
            }
        };

        let expires_in = match response.expires_in() {
            Some(duration) => chrono::Duration::from_std(duration)
                .map_err(|e| AuthError::TokenEndpoint(format!("Invalid expiry: {}", e)))?,
            None => chrono::Duration::seconds(DEFAULT_EXPIRES_IN_SECS),
        };

        let scope = match response.scopes() {
            Some(scopes) => scopes
                .iter()
                .map(|scope| scope.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            None => self.requested_scopes.join(" "),
        };

        TokenRecord::issued_now(
            response.access_token().secret().to_string(),
            refresh_token,
            response.token_type().as_ref().to_string(),
            scope,
            expires_in,
        )
    }
}

fn describe<RE>(err: RequestTokenError<RE, BasicErrorResponse>) -> AuthError
where
    RE: std::error::Error + 'static,
{
    let message = match err {
        RequestTokenError::ServerResponse(response) => match response.error_description() {
            Some(description) => format!("{}: {}", response.error(), description),
            None => response.error().to_string(),
        },
        other => other.to_string(),
    };
    AuthError::TokenEndpoint(message)
}

impl AuthorizationServer for OAuthClient {
    /// Build authorization URL with state parameter for CSRF protection
    fn authorize_url(&self, state: &str) -> String {
        let csrf_token = CsrfToken::new(state.to_string());
        let (auth_url, _) = self
            .client
            .authorize_url(|| csrf_token)
            .add_scopes(self.requested_scopes.iter().cloned().map(Scope::new))
            .url();
        auth_url.to_string()
    }

    /// Exchange authorization code for access and refresh tokens
    async fn exchange_code(&self, code: &str) -> Result<TokenRecord, AuthError> {
        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&http_client)
            .await
            .map_err(describe)?;

        let token = self.record_from(&token_result, None)?;
        tracing::debug!(expires_at = %token.expires_at, "Exchanged code for tokens");
        Ok(token)
    }

    /// Refresh an expired access token using its refresh token
    async fn refresh(&self, token: &TokenRecord) -> Result<TokenRecord, AuthError> {
        let token_result = self
            .client
            .exchange_refresh_token(&RefreshToken::new(token.refresh_token.clone()))
            .request_async(&http_client)
            .await
            .map_err(describe)?;

        let refreshed = self.record_from(&token_result, Some(&token.refresh_token))?;
        tracing::debug!(expires_at = %refreshed.expires_at, "Refreshed tokens");
        Ok(refreshed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use secrecy::SecretString;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> ClientCredentials {
        ClientCredentials {
            client_id: "test_client_id".to_string(),
            client_secret: SecretString::from("test_client_secret".to_string()),
            redirect_uri: "http://localhost:8888/callback".to_string(),
            requested_scopes: vec![
                "user-read-playback-state".to_string(),
                "streaming".to_string(),
            ],
        }
    }

    async fn client_for(server: &MockServer) -> OAuthClient {
        OAuthClient::with_endpoints(
            &credentials(),
            SPOTIFY_AUTH_URL,
            &format!("{}/api/token", server.uri()),
        )
        .unwrap()
    }

    #[test]
    fn test_authorize_url_parameters() {
        let client = OAuthClient::new(&credentials()).unwrap();
        let url = Url::parse(&client.authorize_url("state123")).unwrap();

        assert!(url.as_str().starts_with(SPOTIFY_AUTH_URL));
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "test_client_id");
        assert_eq!(params["redirect_uri"], "http://localhost:8888/callback");
        assert_eq!(params["scope"], "user-read-playback-state streaming");
        assert_eq!(params["state"], "state123");
    }

    #[test]
    fn test_rejects_invalid_redirect() {
        let mut creds = credentials();
        creds.redirect_uri = "not a url".to_string();
        assert!(matches!(
            OAuthClient::new(&creds),
            Err(AuthError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_exchange_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=ABC123"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "new_access",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "new_refresh",
                "scope": "user-read-playback-state"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let token = client.exchange_code("ABC123").await.unwrap();

        assert_eq!(token.access_token, "new_access");
        assert_eq!(token.refresh_token, "new_refresh");
        assert_eq!(token.scope, "user-read-playback-state");
        assert!(token.expires_at > Utc::now() + Duration::seconds(3500));
    }

    #[tokio::test]
    async fn test_exchange_rejects_out_of_range_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "new_access",
                "token_type": "Bearer",
                "expires_in": 10_000_000_000_000u64,
                "refresh_token": "new_refresh"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.exchange_code("ABC").await.unwrap_err();

        assert!(matches!(err, AuthError::TokenEndpoint(message) if message.contains("Invalid expiry")));
    }

    #[tokio::test]
    async fn test_exchange_reports_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid authorization code"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.exchange_code("expired").await.unwrap_err();

        match err {
            AuthError::TokenEndpoint(message) => {
                assert!(message.contains("invalid_grant"));
                assert!(message.contains("Invalid authorization code"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_keeps_refresh_token_when_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=old_refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "refreshed_access",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let expired = TokenRecord::issued_now(
            "old_access",
            "old_refresh",
            "Bearer",
            "streaming",
            Duration::seconds(-10),
        )
        .unwrap();

        let client = client_for(&server).await;
        let refreshed = client.refresh(&expired).await.unwrap();

        assert_eq!(refreshed.access_token, "refreshed_access");
        assert_eq!(refreshed.refresh_token, "old_refresh");
        assert!(refreshed.expires_at > expired.expires_at);
        // No scope in the response falls back to what was requested
        assert_eq!(refreshed.scope, "user-read-playback-state streaming");
    }
}
