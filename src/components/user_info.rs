use super::{Pass, UriComponent, User};
use crate::compat::{Cow, String, format};
use crate::error::{Error, Result};
use crate::uri::Uri;
use core::fmt;

/// User information: a user and an optional password.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UserInfo {
    pub(crate) user: User,
    pub(crate) pass: Pass,
}

impl UserInfo {
    /// Build user information from its two parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUserInfo`] when a password is given without a
    /// user, or when either part contains a forbidden character.
    pub fn new(user: Option<&str>, pass: Option<&str>) -> Result<Self> {
        if user.is_none() && pass.is_some() {
            tracing::debug!("password given without a user");
            return Err(Error::InvalidUserInfo(format!(":{}", pass.unwrap_or_default())));
        }

        Ok(Self {
            user: User::new(user)?,
            pass: Pass::new(pass)?,
        })
    }

    /// Split an encoded `user[:pass]` string at its first colon.
    ///
    /// # Errors
    ///
    /// Same as [`UserInfo::new`].
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(Self::default()),
            Some(value) => match value.split_once(':') {
                Some((user, pass)) => Self::new(Some(user), Some(pass)),
                None => Self::new(Some(value), None),
            },
        }
    }

    pub fn from_uri(uri: &Uri) -> Self {
        uri.user_info().clone()
    }

    /// Replace the password, keeping the user.
    ///
    /// # Errors
    ///
    /// Same as [`UserInfo::new`].
    pub fn with_pass(&self, pass: Option<&str>) -> Result<Self> {
        if self.user.is_absent() && pass.is_some() {
            return Err(Error::InvalidUserInfo(format!(":{}", pass.unwrap_or_default())));
        }
        Ok(Self {
            user: self.user.clone(),
            pass: Pass::new(pass)?,
        })
    }

    pub fn user(&self) -> Option<&str> {
        self.user.value()
    }

    pub fn pass(&self) -> Option<&str> {
        self.pass.value()
    }

    pub fn is_absent(&self) -> bool {
        self.user.is_absent()
    }
}

impl UriComponent for UserInfo {
    fn to_encoded(&self) -> Option<Cow<'_, str>> {
        let user = self.user.encoded()?;
        match self.pass.encoded() {
            Some(pass) => Some(Cow::Owned(format!("{user}:{pass}"))),
            None => Some(user),
        }
    }

    /// "user:pass@", or an empty string when absent
    fn uri_component(&self) -> String {
        self.to_encoded()
            .map(|value| format!("{value}@"))
            .unwrap_or_default()
    }

    fn is_present(&self) -> bool {
        !self.user.is_absent()
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_encoded().unwrap_or_default())
    }
}

impl TryFrom<&str> for UserInfo {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(Some(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info() {
        let info = UserInfo::new(Some("user"), Some("pass")).unwrap();
        assert_eq!(info.user(), Some("user"));
        assert_eq!(info.pass(), Some("pass"));
        assert_eq!(info.to_string(), "user:pass");
        assert_eq!(info.uri_component(), "user:pass@");
    }

    #[test]
    fn test_absent_user_info() {
        let info = UserInfo::new(None, None).unwrap();
        assert!(info.is_absent());
        assert_eq!(info.uri_component(), "");
        assert!(matches!(
            UserInfo::new(None, Some("pass")),
            Err(Error::InvalidUserInfo(_))
        ));
    }

    #[test]
    fn test_parse_splits_at_first_colon() {
        let info = UserInfo::parse(Some("a:b:c")).unwrap();
        assert_eq!(info.user(), Some("a"));
        assert_eq!(info.pass(), Some("b:c"));

        let info = UserInfo::parse(Some("")).unwrap();
        assert_eq!(info.user(), Some(""));
        assert_eq!(info.uri_component(), "@");
    }

    #[test]
    fn test_with_pass() {
        let info = UserInfo::new(Some("user"), None).unwrap();
        let info = info.with_pass(Some("p a")).unwrap();
        assert_eq!(info.uri_component(), "user:p%20a@");
        assert!(UserInfo::default().with_pass(Some("x")).is_err());
        assert_eq!(info.with_pass(None).unwrap().to_string(), "user");
    }
}
