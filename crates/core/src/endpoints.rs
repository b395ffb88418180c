//! URL construction for every service endpoint

use url::Url;
use venmo_domain::constants::{
    PATH_ACCESS_TOKEN, PATH_FRIENDS, PATH_PAYMENTS, PATH_STORIES, PATH_TWO_FACTOR_TOKEN,
    PATH_USERS,
};
use venmo_domain::{ConfigError, FriendsPage};

/// Endpoint URLs relative to a base URL.
///
/// Caller-supplied path segments (user names, ids) are percent-encoded, so a
/// value such as `"a/b"` cannot escape its segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// # Errors
    /// Returns `ConfigError::Invalid` if `base` cannot carry path segments.
    pub fn new(base: Url) -> Result<Self, ConfigError> {
        if base.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!("'{base}' cannot be used as a base URL")));
        }
        Ok(Self { base })
    }

    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// `/oauth/access_token`
    #[must_use]
    pub fn access_token(&self) -> Url {
        self.join(PATH_ACCESS_TOKEN, &[])
    }

    /// `/account/two-factor/token`
    #[must_use]
    pub fn two_factor_token(&self) -> Url {
        self.join(PATH_TWO_FACTOR_TOKEN, &[])
    }

    /// `/stories/{transaction_id}`
    #[must_use]
    pub fn story(&self, transaction_id: &str) -> Url {
        self.join(PATH_STORIES, &[transaction_id])
    }

    /// `/users/{user_name}`
    #[must_use]
    pub fn user(&self, user_name: &str) -> Url {
        self.join(PATH_USERS, &[user_name])
    }

    /// `/users/{user_id}/friends`
    #[must_use]
    pub fn friends(&self, user_id: &str) -> Url {
        self.join(PATH_USERS, &[user_id, PATH_FRIENDS])
    }

    /// `/users/{user_id}/friends?limit=&offset=`
    #[must_use]
    pub fn friends_page(&self, user_id: &str, page: FriendsPage) -> Url {
        let mut url = self.friends(user_id);
        url.query_pairs_mut()
            .append_pair("limit", &page.limit.to_string())
            .append_pair("offset", &page.offset.to_string());
        url
    }

    /// `/payments`
    #[must_use]
    pub fn payments(&self) -> Url {
        self.join(PATH_PAYMENTS, &[])
    }

    fn join(&self, fixed: &str, dynamic: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(fixed.split('/')).extend(dynamic);
        }
        url
    }
}
