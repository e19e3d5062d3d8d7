//! The logged-in identity, read from `localStorage` once at boot and
//! handed down from the root.

use payloads::session::{self, Session, SessionStorage};
use yew::prelude::*;

/// `window.localStorage`. Every operation is a no-op when storage is
/// unavailable, e.g. in a private window with storage disabled.
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStorage for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::warn!("Could not persist session: {e:?}");
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(e) = storage.remove_item(key) {
            tracing::warn!("Could not remove session: {e:?}");
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    session: Option<Session>,
    setter: UseStateSetter<Option<Session>>,
}

impl SessionHandle {
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_admin)
    }

    pub fn log_in(&self, session: Session) {
        if let Err(e) = session::save(&LocalStorage, &session) {
            tracing::warn!("Could not encode session: {e}");
        }
        tracing::info!(
            "Logged in as {} ({})",
            session.phone,
            session.login_type
        );
        self.setter.set(Some(session));
    }

    pub fn log_out(&self) {
        session::clear(&LocalStorage);
        self.setter.set(None);
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component]
pub fn SessionProvider(props: &SessionProviderProps) -> Html {
    let session = use_state(|| session::load(&LocalStorage));

    let handle = SessionHandle {
        session: (*session).clone(),
        setter: session.setter(),
    };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<SessionHandle>>
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
        .expect("use_session must be used within a SessionProvider")
}
