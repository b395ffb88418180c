//! Login, two-factor and logout operations
//!
//! State machine driven by the caller:
//!
//! ```text
//! Anonymous --authenticate--> DirectSuccess(Session)
//!           \--------------> TwoFactorRequired(challenge)
//!                              --send_sms--> SMS sent
//!                              --authenticate_two_factor--> Session
//! ```
//!
//! Nothing here retries, and nothing stops a caller from verifying before the
//! SMS was sent or from reusing a stale secret; the service rejects those as
//! authentication errors.

use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use venmo_domain::constants::{HEADER_DEVICE_ID, HEADER_OTP, HEADER_OTP_SECRET, SMS_CHANNEL};
use venmo_domain::{normalize_header_key, ApiResponse, ApiResult, Credentials, DeviceIdentity};

use super::grant::{rejection, session_from_grant};
use super::session::{LoginOutcome, Session, TwoFactorChallenge};
use crate::client::VenmoClient;
use crate::normalizer::{normalize, normalize_headers, STATUS_TOO_MANY_REQUESTS};
use crate::transport::{HttpMethod, RawRequest};
use crate::validation::require;

const CTX_AUTHENTICATE: &str = "Error occurred when authenticating to venmo";
const CTX_TWO_FACTOR: &str = "Error occurred when authenticating using two factor auth to venmo";
const CTX_SEND_SMS: &str = "Error occurred when sending out two factor sms";
const CTX_LOGOUT: &str = "Error occurred when logging out user";

impl VenmoClient {
    /// Primary credential exchange.
    ///
    /// Returns [`LoginOutcome::TwoFactorRequired`] whenever the response
    /// carries a `venmo-otp-secret` header (the service pairs it with an error
    /// body, which is not decoded), unless the status is 429. Otherwise
    /// returns [`LoginOutcome::DirectSuccess`] when the body holds an access
    /// token.
    ///
    /// # Errors
    /// - `Validation` if any credential or device field is blank
    /// - `Authentication` if the service rejected the credentials
    /// - `RateLimited`, `MalformedResponse`, `Transport` from the round-trip
    #[instrument(skip_all, fields(device_id = %device.device_id()))]
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
        device: &DeviceIdentity,
    ) -> ApiResult<LoginOutcome> {
        require(&[
            ("username", credentials.identifier()),
            ("password", credentials.password()),
            ("device_id", device.device_id()),
            ("client_id", device.client_id()),
        ])?;

        let request = RawRequest::new(HttpMethod::Post, self.endpoints().access_token())
            .header(HEADER_DEVICE_ID, device.device_id())
            .json(json!({
                "phone_email_or_username": credentials.identifier(),
                "password": credentials.password(),
                "client_id": device.client_id(),
            }));

        let raw = self.dispatch(request, CTX_AUTHENTICATE).await?;

        // The challenge body is not guaranteed to be JSON, so the secret is
        // read before anything is decoded.
        if raw.status != STATUS_TOO_MANY_REQUESTS {
            let headers = normalize_headers(&raw.headers);
            let otp_secret = headers
                .get(&normalize_header_key(HEADER_OTP_SECRET))
                .map(|secret| secret.trim())
                .filter(|secret| !secret.is_empty())
                .map(str::to_owned);
            if let Some(otp_secret) = otp_secret {
                info!(status = raw.status, "two-factor authentication required");
                let challenge = TwoFactorChallenge::new(otp_secret, device.clone());
                return Ok(ApiResponse::new(LoginOutcome::TwoFactorRequired(challenge), headers));
            }
        }

        let response = normalize::<Value>(raw)?;

        match session_from_grant(&response.data, device) {
            Some(session) => {
                info!("authenticated without two-factor");
                Ok(ApiResponse::new(LoginOutcome::DirectSuccess(session), response.headers))
            }
            None => {
                let err =
                    rejection(&response.data, CTX_AUTHENTICATE).with_headers(response.headers);
                warn!(error_kind = err.label(), code = ?err.code(), "login rejected");
                Err(err)
            }
        }
    }

    /// Ask the service to text a one-time password to the account's phone.
    ///
    /// `device` must be the identity used for the primary login.
    ///
    /// # Errors
    /// - `Validation` if the device id or secret is blank
    /// - `RateLimited`, `MalformedResponse`, `Transport` from the round-trip
    #[instrument(skip_all, fields(device_id = %device.device_id()))]
    pub async fn send_sms(&self, device: &DeviceIdentity, otp_secret: &str) -> ApiResult<Value> {
        require(&[("otp_secret", otp_secret), ("device_id", device.device_id())])?;

        let request = RawRequest::new(HttpMethod::Post, self.endpoints().two_factor_token())
            .header(HEADER_DEVICE_ID, device.device_id())
            .header(HEADER_OTP_SECRET, otp_secret)
            .json(json!({ "via": SMS_CHANNEL }));

        let response = self.call(request, CTX_SEND_SMS).await?;
        info!("two-factor sms requested");
        Ok(response)
    }

    /// [`send_sms`](Self::send_sms) for the device and secret of `challenge`.
    ///
    /// # Errors
    /// Same as [`send_sms`](Self::send_sms).
    pub async fn send_sms_for(&self, challenge: &TwoFactorChallenge) -> ApiResult<Value> {
        self.send_sms(challenge.device(), challenge.otp_secret()).await
    }

    /// Exchange a one-time password and its challenge secret for a session.
    ///
    /// # Errors
    /// - `Validation` if any argument is blank
    /// - `Authentication` for a wrong OTP or an expired secret
    /// - `RateLimited`, `MalformedResponse`, `Transport` from the round-trip
    #[instrument(skip_all, fields(device_id = %device.device_id()))]
    pub async fn authenticate_two_factor(
        &self,
        otp_secret: &str,
        otp: &str,
        device: &DeviceIdentity,
    ) -> ApiResult<Session> {
        require(&[
            ("otp_secret", otp_secret),
            ("otp", otp),
            ("device_id", device.device_id()),
            ("client_id", device.client_id()),
        ])?;

        let request = RawRequest::new(HttpMethod::Post, self.endpoints().access_token())
            .header(HEADER_DEVICE_ID, device.device_id())
            .header(HEADER_OTP, otp)
            .header(HEADER_OTP_SECRET, otp_secret)
            .json(json!({ "client_id": device.client_id() }));

        let response = self.call::<Value>(request, CTX_TWO_FACTOR).await?;

        match session_from_grant(&response.data, device) {
            Some(session) => {
                info!("two-factor authentication succeeded");
                Ok(ApiResponse::new(session, response.headers))
            }
            None => {
                let err = rejection(&response.data, CTX_TWO_FACTOR).with_headers(response.headers);
                warn!(
                    error_kind = err.label(),
                    code = ?err.code(),
                    "two-factor verification rejected"
                );
                Err(err)
            }
        }
    }

    /// [`authenticate_two_factor`](Self::authenticate_two_factor) using the
    /// secret and device of `challenge`.
    ///
    /// # Errors
    /// Same as [`authenticate_two_factor`](Self::authenticate_two_factor).
    pub async fn verify_two_factor(
        &self,
        challenge: &TwoFactorChallenge,
        otp: &str,
    ) -> ApiResult<Session> {
        self.authenticate_two_factor(challenge.otp_secret(), otp, challenge.device()).await
    }

    /// Revoke an access token.
    ///
    /// Any 2xx status counts as revoked, whatever the body. The caller must
    /// stop using the token afterwards; requests still in flight with it will
    /// come back as authentication errors.
    ///
    /// # Errors
    /// - `Validation` if the token is blank
    /// - `RateLimited` for 429
    /// - `Authentication` for any other non-2xx status whose body decodes
    /// - `MalformedResponse`, `Transport` from the round-trip
    #[instrument(skip_all)]
    pub async fn logout(&self, access_token: &str) -> ApiResult<()> {
        require(&[("access_token", access_token)])?;

        let request = RawRequest::new(HttpMethod::Delete, self.endpoints().access_token())
            .bearer(access_token);

        let response = self.dispatch(request, CTX_LOGOUT).await?;
        if response.is_success() {
            info!(status = response.status, "access token revoked");
            return Ok(ApiResponse::new((), normalize_headers(&response.headers)));
        }

        let status = response.status;
        let decoded = normalize::<Value>(response)?;
        let err = rejection(&decoded.data, CTX_LOGOUT).with_headers(decoded.headers);
        warn!(status, error_kind = err.label(), "logout rejected");
        Err(err)
    }
}
