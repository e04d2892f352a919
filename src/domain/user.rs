use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub nickname: String,
}

/// Team-wide teammate name display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameDisplay {
    #[default]
    Username,
    FullName,
    NicknameFullName,
}

impl NameDisplay {
    pub fn parse(value: &str) -> Self {
        match value {
            "full_name" => Self::FullName,
            "nickname_full_name" => Self::NicknameFullName,
            _ => Self::Username,
        }
    }

    /// Formats a profile per the preference, falling back through full name
    /// to username when the preferred fields are empty.
    pub fn format(&self, user: &UserProfile) -> String {
        match self {
            Self::Username => user.username.clone(),
            Self::FullName => non_empty(full_name(user)).unwrap_or_else(|| user.username.clone()),
            Self::NicknameFullName => non_empty(user.nickname.clone())
                .or_else(|| non_empty(full_name(user)))
                .unwrap_or_else(|| user.username.clone()),
        }
    }
}

fn full_name(user: &UserProfile) -> String {
    format!("{} {}", user.first_name, user.last_name)
        .trim()
        .to_string()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            username: "alice".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            nickname: "Al".to_string(),
        }
    }

    #[test]
    fn username_preference() {
        assert_eq!(NameDisplay::Username.format(&profile()), "alice");
    }

    #[test]
    fn full_name_preference() {
        assert_eq!(NameDisplay::FullName.format(&profile()), "Alice Liddell");
    }

    #[test]
    fn nickname_preference_falls_back() {
        assert_eq!(NameDisplay::NicknameFullName.format(&profile()), "Al");

        let mut user = profile();
        user.nickname.clear();
        assert_eq!(NameDisplay::NicknameFullName.format(&user), "Alice Liddell");

        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(NameDisplay::NicknameFullName.format(&user), "alice");
    }

    #[test]
    fn parse_unknown_defaults_to_username() {
        assert_eq!(NameDisplay::parse("bogus"), NameDisplay::Username);
        assert_eq!(NameDisplay::parse("full_name"), NameDisplay::FullName);
    }
}
