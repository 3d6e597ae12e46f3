//! Uniform state for async list screens.

use crate::directory::DirectoryLoad;
use crate::error::ClientResult;

/// What a list screen renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Loading,
    /// Banner text, shown with a retry action
    Error(String),
    Empty,
    Populated(Vec<T>),
}

impl<T> ScreenState<T> {
    /// Map a load result onto a screen state.
    pub fn from_result(result: ClientResult<Vec<T>>) -> Self {
        match result {
            Ok(items) if items.is_empty() => ScreenState::Empty,
            Ok(items) => ScreenState::Populated(items),
            Err(e) => ScreenState::Error(e.user_message()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            ScreenState::Populated(items) => items,
            _ => &[],
        }
    }
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        ScreenState::Loading
    }
}

impl From<DirectoryLoad> for ScreenState<dentago_core::models::Doctor> {
    fn from(load: DirectoryLoad) -> Self {
        match load.error {
            Some(message) if load.doctors.is_empty() => ScreenState::Error(message),
            _ if load.doctors.is_empty() => ScreenState::Empty,
            _ => ScreenState::Populated(load.doctors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use dentago_core::models::Doctor;

    #[test]
    fn test_from_result() {
        let state: ScreenState<u32> = ScreenState::from_result(Ok(vec![]));
        assert_eq!(state, ScreenState::Empty);

        let state = ScreenState::from_result(Ok(vec![1, 2]));
        assert_eq!(state.items(), &[1, 2]);

        let state: ScreenState<u32> = ScreenState::from_result(Err(ClientError::Unauthenticated));
        assert_eq!(
            state,
            ScreenState::Error("Token topilmadi. Iltimos tizimga qayta kiring.".into())
        );
        assert!(ScreenState::<u32>::default().is_loading());
    }

    #[test]
    fn test_from_directory_load() {
        let failed = DirectoryLoad {
            doctors: vec![],
            error: Some("offline".into()),
        };
        assert_eq!(ScreenState::<Doctor>::from(failed), ScreenState::Error("offline".into()));

        let loaded = DirectoryLoad {
            doctors: vec![Doctor::new("1", "Ali")],
            error: None,
        };
        assert_eq!(ScreenState::<Doctor>::from(loaded).items().len(), 1);
        assert_eq!(
            ScreenState::<Doctor>::from(DirectoryLoad::default()),
            ScreenState::Empty
        );
    }
}
