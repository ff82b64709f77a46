// ── Presentation state ──
//
// `UiState` is the single source of truth for what a front end shows.
// Variants are mutually exclusive and every renderer matches them
// exhaustively.

use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

use crate::error::LookupError;
use crate::model::{ProfileRecord, RepositoryRecord};

/// Lookup lifecycle as observed by renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UiState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Profile call in flight.
    Loading,
    /// Profile received, repositories call in flight.
    ProfileShown { profile: ProfileRecord },
    /// The attempt failed. `profile` is kept when the failure happened
    /// after the profile was already displayed.
    Error {
        #[serde(rename = "message", serialize_with = "serialize_message")]
        error: LookupError,
        profile: Option<ProfileRecord>,
    },
    /// Both calls succeeded.
    Loaded {
        profile: ProfileRecord,
        repositories: Vec<RepositoryRecord>,
    },
}

fn serialize_message<S: Serializer>(error: &LookupError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.user_message())
}

impl UiState {
    pub fn failed(error: LookupError, profile: Option<ProfileRecord>) -> Self {
        Self::Error { error, profile }
    }

    /// Whether a network call for this state is still outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Loading | Self::ProfileShown { .. })
    }

    /// The profile to display, if any.
    pub fn profile(&self) -> Option<&ProfileRecord> {
        match self {
            Self::ProfileShown { profile } | Self::Loaded { profile, .. } => Some(profile),
            Self::Error { profile, .. } => profile.as_ref(),
            Self::Idle | Self::Loading => None,
        }
    }

    /// Repositories, only once both calls have succeeded.
    pub fn repositories(&self) -> Option<&[RepositoryRecord]> {
        match self {
            Self::Loaded { repositories, .. } => Some(repositories),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LookupError> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Short label for status bars and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::ProfileShown { .. } => "loading repositories",
            Self::Error { .. } => "error",
            Self::Loaded { .. } => "loaded",
        }
    }
}

/// Presentation theme. Toggling is pure and independent of lookups.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Class applied to `<body>`; light is the unstyled default.
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("dark-mode"),
        }
    }
}

/// Everything a renderer needs, passed explicitly instead of living in
/// shared render targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub state: UiState,
    pub theme: Theme,
}

impl ViewModel {
    pub fn new(state: UiState, theme: Theme) -> Self {
        Self { state, theme }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::str::FromStr;

    fn profile() -> ProfileRecord {
        ProfileRecord {
            login: "octocat".into(),
            display_name: None,
            avatar_url: String::new(),
            bio: None,
            company: None,
            location: None,
            public_repo_count: 0,
            follower_count: 0,
            following_count: 0,
            created_at: DateTime::from_timestamp(0, 0).expect("epoch"),
            profile_url: String::new(),
        }
    }

    #[test]
    fn theme_toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.body_class(), Some("dark-mode"));
        assert_eq!(Theme::Light.body_class(), None);
    }

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!(Theme::from_str("DARK"), Ok(Theme::Dark));
        assert_eq!(Theme::Light.to_string(), "light");
        assert!(Theme::from_str("sepia").is_err());
    }

    #[test]
    fn view_model_toggle_leaves_state_alone() {
        let mut view = ViewModel::new(UiState::Loading, Theme::Light);
        view.toggle_theme();
        assert_eq!(view.theme, Theme::Dark);
        assert_eq!(view.state, UiState::Loading);
    }

    #[test]
    fn accessors_follow_variant() {
        let shown = UiState::ProfileShown { profile: profile() };
        assert!(shown.is_in_flight());
        assert_eq!(shown.profile().map(|p| p.login.as_str()), Some("octocat"));
        assert!(shown.repositories().is_none());

        let failed = UiState::failed(
            LookupError::RepositoriesFailed { message: None },
            Some(profile()),
        );
        assert!(!failed.is_in_flight());
        assert!(failed.profile().is_some());
        assert_eq!(failed.label(), "error");
    }

    #[test]
    fn error_serializes_as_message() {
        let state = UiState::failed(LookupError::EmptyInput, None);
        let json = serde_json::to_value(&state).expect("serializable");
        assert_eq!(json["state"], "error");
        assert_eq!(json["message"], "Please enter a GitHub username.");
        assert!(json["profile"].is_null());
    }
}
