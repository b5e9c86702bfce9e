use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::session::SessionStore;

/// Navigation targets the core can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    NotAuthorized,
    Events,
    AdminEvents,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::NotAuthorized => "/not-authorized",
            Route::Events => "/events",
            Route::AdminEvents => "/admin/events",
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.path())
    }
}

/// Which kind of viewer a list serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    User,
    Admin,
}

impl Surface {
    /// Where an unauthorized outcome sends this surface's viewer.
    ///
    /// Admin surfaces go to the not-authorized page whether the token was
    /// missing or rejected; that page links on to login.
    pub fn unauthorized_route(&self) -> Route {
        match self {
            Surface::User => Route::Login,
            Surface::Admin => Route::NotAuthorized,
        }
    }
}

/// Decide whether a protected view may render.
///
/// The admin check reads unverified claims and only hides UI; the server
/// still enforces privilege on every admin request.
pub fn gate(session: &SessionStore, surface: Surface) -> Result<(), Route> {
    match surface {
        Surface::User if session.has_token() => Ok(()),
        Surface::Admin if session.has_elevated_privilege() => Ok(()),
        _ => Err(surface.unauthorized_route()),
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use super::{gate, Route, Surface};
    use crate::session::SessionStore;

    fn session_with(payload: &str) -> SessionStore {
        let session = SessionStore::in_memory();
        session
            .establish(&format!("e30.{}.c2ln", URL_SAFE_NO_PAD.encode(payload)))
            .unwrap();
        session
    }

    #[test]
    fn logged_out_viewers_are_redirected() {
        let session = SessionStore::in_memory();
        assert_eq!(gate(&session, Surface::User), Err(Route::Login));
        assert_eq!(gate(&session, Surface::Admin), Err(Route::NotAuthorized));
    }

    #[test]
    fn standard_users_cannot_open_admin_views() {
        let session = session_with(r#"{"isAdmin":false}"#);
        assert_eq!(gate(&session, Surface::User), Ok(()));
        assert_eq!(gate(&session, Surface::Admin), Err(Route::NotAuthorized));
    }

    #[test]
    fn admins_open_both() {
        let session = session_with(r#"{"isAdmin":true}"#);
        assert_eq!(gate(&session, Surface::User), Ok(()));
        assert_eq!(gate(&session, Surface::Admin), Ok(()));
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::NotAuthorized.to_string(), "/not-authorized");
        assert_eq!(Route::Login.path(), "/login");
    }
}
