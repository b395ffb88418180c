//! Authenticated read operations and payment requests
//!
//! Every operation validates its arguments locally, sends exactly one request
//! with `Authorization: Bearer <token>`, and returns the normalized response
//! untouched. Error bodies from the service therefore arrive as data; only
//! 429 and undecodable bodies become errors.

use serde_json::{json, Value};
use tracing::instrument;
use venmo_domain::{ApiResult, FriendsPage, PaymentRequest};

use crate::client::VenmoClient;
use crate::transport::{HttpMethod, RawRequest};
use crate::validation::{require, validate_request_amount};

impl VenmoClient {
    /// Profile of the user with the given username.
    ///
    /// # Errors
    /// `Validation` for blank arguments, otherwise whatever the round-trip
    /// produced (`RateLimited`, `MalformedResponse`, `Transport`).
    #[instrument(skip(self, access_token))]
    pub async fn fetch_user(&self, user_name: &str, access_token: &str) -> ApiResult<Value> {
        require(&[("user_name", user_name), ("access_token", access_token)])?;

        let request =
            RawRequest::new(HttpMethod::Get, self.endpoints().user(user_name)).bearer(access_token);
        let context = format!("Error occurred when fetching user details for user {user_name}");
        self.call(request, &context).await
    }

    /// A single transaction (story).
    ///
    /// # Errors
    /// Same as [`fetch_user`](Self::fetch_user).
    #[instrument(skip(self, access_token))]
    pub async fn fetch_transaction(
        &self,
        transaction_id: &str,
        access_token: &str,
    ) -> ApiResult<Value> {
        require(&[("transaction_id", transaction_id), ("access_token", access_token)])?;

        let request = RawRequest::new(HttpMethod::Get, self.endpoints().story(transaction_id))
            .bearer(access_token);
        let context = format!("Error occurred when fetching the transaction {transaction_id}");
        self.call(request, &context).await
    }

    /// Friends of the user with the given id, using the service's default page.
    ///
    /// # Errors
    /// Same as [`fetch_user`](Self::fetch_user).
    #[instrument(skip(self, access_token))]
    pub async fn fetch_friends(&self, user_id: &str, access_token: &str) -> ApiResult<Value> {
        require(&[("user_id", user_id), ("access_token", access_token)])?;

        let request = RawRequest::new(HttpMethod::Get, self.endpoints().friends(user_id))
            .bearer(access_token);
        self.call(request, &friends_context(user_id)).await
    }

    /// One page of a user's friends.
    ///
    /// # Errors
    /// Same as [`fetch_user`](Self::fetch_user).
    #[instrument(skip(self, access_token))]
    pub async fn fetch_friends_page(
        &self,
        user_id: &str,
        access_token: &str,
        page: FriendsPage,
    ) -> ApiResult<Value> {
        require(&[("user_id", user_id), ("access_token", access_token)])?;

        let request = RawRequest::new(HttpMethod::Get, self.endpoints().friends_page(user_id, page))
            .bearer(access_token);
        self.call(request, &friends_context(user_id)).await
    }

    /// Request money from another user.
    ///
    /// # Errors
    /// - `Validation` for a blank target user, note or token, or a non-finite
    ///   amount
    /// - `DomainValidation` 506 when `amount >= 0`, 507 when `amount <= -100`
    /// - `RateLimited`, `MalformedResponse`, `Transport` from the round-trip
    #[instrument(
        skip(self, request, access_token),
        fields(target_user = %request.target_user, audience = %request.audience)
    )]
    pub async fn request_payment(
        &self,
        request: &PaymentRequest,
        access_token: &str,
    ) -> ApiResult<Value> {
        require(&[
            ("target_user_name", request.target_user.as_str()),
            ("note", request.note.as_str()),
            ("access_token", access_token),
        ])?;
        validate_request_amount(request.amount)?;

        let raw = RawRequest::new(HttpMethod::Post, self.endpoints().payments())
            .bearer(access_token)
            .json(json!({
                "amount": request.amount,
                "audience": request.audience.as_str(),
                "note": request.note,
                "username": request.target_user,
            }));
        let context = format!(
            "Error occurred when requesting the payment of {} from user {}",
            request.amount, request.target_user
        );
        self.call(raw, &context).await
    }
}

fn friends_context(user_id: &str) -> String {
    format!("Error occurred when fetching the friends for user {user_id}")
}
