use neighborly_utils::routes::{get_access_denied_path, LOGIN_ROUTE, VERIFY_IDENTITY_ROUTE};

use crate::service::ContentService;
use crate::user::User;

/// Page a user is sent to when they cannot access a community.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessRedirect {
    Login,
    VerifyIdentity,
    AccessDenied { community_id: String },
}

impl AccessRedirect {
    pub fn path(&self) -> String {
        match self {
            AccessRedirect::Login => String::from(LOGIN_ROUTE),
            AccessRedirect::VerifyIdentity => String::from(VERIFY_IDENTITY_ROUTE),
            AccessRedirect::AccessDenied { community_id } => get_access_denied_path(community_id),
        }
    }
}

/// Checks, in order, that a user is logged in, verified and an approved member of the community.
/// Failing membership lookups deny access.
pub async fn check_community_access(
    service: &dyn ContentService,
    user: Option<&User>,
    community_id: &str,
) -> Result<(), AccessRedirect> {
    let user = user.ok_or(AccessRedirect::Login)?;
    if !user.is_verified {
        return Err(AccessRedirect::VerifyIdentity);
    }
    let access_denied = || AccessRedirect::AccessDenied { community_id: community_id.to_string() };
    match service.get_membership(community_id, &user.user_id).await {
        Ok(Some(membership)) if membership.grants_access() => Ok(()),
        Ok(_) => {
            log::debug!("User {} is not an approved member of {community_id}", user.user_id);
            Err(access_denied())
        },
        Err(e) => {
            log::error!("Failed to get membership of user {} in {community_id}: {e}", user.user_id);
            Err(access_denied())
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::access::AccessRedirect;

    #[test]
    fn test_access_redirect_path() {
        assert_eq!(AccessRedirect::Login.path(), "/login");
        assert_eq!(AccessRedirect::VerifyIdentity.path(), "/verify-identity");
        assert_eq!(
            AccessRedirect::AccessDenied { community_id: String::from("maple-street") }.path(),
            "/access-denied?community=maple-street"
        );
    }
}
