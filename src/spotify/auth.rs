use crate::{
    error::{BandsError, Result},
    spotify::SpotifyClient,
    types::TokenResponse,
    utils,
};

impl SpotifyClient {
    /// Requests an app access token with the client-credentials grant.
    ///
    /// The client id and secret travel in an HTTP Basic `Authorization`
    /// header; the body only carries `grant_type=client_credentials`. The
    /// returned token is not tied to any user and can read public catalog
    /// data such as playlists and artists.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-success status, or a body without a usable
    /// `access_token` is reported as [`BandsError::Auth`].
    pub async fn request_app_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse> {
        let res = self
            .http
            .post(&self.token_url)
            .header(
                reqwest::header::AUTHORIZATION,
                utils::basic_auth_header(client_id, client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| BandsError::Auth(e.to_string()))?
            .error_for_status()
            .map_err(|e| BandsError::Auth(e.to_string()))?;

        let token = res
            .json::<TokenResponse>()
            .await
            .map_err(|e| BandsError::Auth(format!("Malformed token response: {}", e)))?;

        if token.access_token.is_empty() {
            return Err(BandsError::Auth(
                "Token response carried an empty access token".to_string(),
            ));
        }

        Ok(token)
    }
}
