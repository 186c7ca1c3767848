use serde::{Deserialize, Deserializer, Serialize};

use finledger_core::{AuthResponse, User, UserId};

use crate::Role;

/// Profile of the signed-in user, as kept in the session.
///
/// `role` is `None` when the backend sent no role or one outside the closed
/// [`Role`] set; every positive role predicate is then false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn new(id: UserId, username: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            id,
            username: username.into(),
            role,
            email: None,
        }
    }

    /// Profile carried by a successful login/register response.
    pub fn from_auth(response: &AuthResponse) -> Self {
        Self::new(
            response.user_id,
            response.username.clone(),
            parse_role(response.role.as_deref()),
        )
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: parse_role(user.role.as_deref()),
            email: user.email.clone(),
        }
    }
}

fn parse_role(raw: Option<&str>) -> Option<Role> {
    raw.and_then(|r| r.parse::<Role>().ok())
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(parse_role(raw.as_deref()))
}
