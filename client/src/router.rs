//! Route table, auth guard, and on-demand page construction.
//!
//! DESIGN
//! ======
//! Pages are built from an explicit `Route -> factory` map when navigated
//! to. The guard consults [`AuthClient::is_authenticated`] at navigation
//! time only; an open page is not torn down by a later logout.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::net::api::ItemsApi;
use crate::pages::dashboard::DashboardPage;
use crate::pages::list::ListPage;
use crate::pages::login::LoginPage;
use crate::state::auth::AuthClient;
use crate::state::list::ListStore;
use crate::util::notify::Notifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    List,
}

impl Route {
    pub const ALL: [Self; 3] = [Self::Login, Self::Dashboard, Self::List];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::List => "list",
        }
    }

    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard | Self::List)
    }

    /// Map a path to a route. Leading/trailing slashes are ignored; the
    /// empty path and unknown paths resolve to login.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let path = path.trim().trim_matches('/');
        Self::ALL.into_iter().find(|route| route.path() == path).unwrap_or(Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// Shared collaborators handed to page factories.
#[derive(Clone)]
pub struct AppContext {
    pub auth: AuthClient,
    pub items: Arc<dyn ItemsApi>,
    pub notifier: Notifier,
}

pub enum Page {
    Login(LoginPage),
    Dashboard(DashboardPage),
    List(Box<ListPage>),
}

impl Page {
    #[must_use]
    pub fn route(&self) -> Route {
        match self {
            Self::Login(_) => Route::Login,
            Self::Dashboard(_) => Route::Dashboard,
            Self::List(_) => Route::List,
        }
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Page").field(&self.route()).finish()
    }
}

pub type PageFactory = fn(&AppContext) -> Page;

/// Outcome of a navigation request.
#[derive(Debug)]
pub struct Navigation {
    pub requested: String,
    pub route: Route,
    /// True when the requested path was unknown or blocked by the guard.
    pub redirected: bool,
    pub page: Page,
}

fn build_login(ctx: &AppContext) -> Page {
    Page::Login(LoginPage::new(ctx.auth.clone(), ctx.notifier.clone()))
}

fn build_dashboard(ctx: &AppContext) -> Page {
    Page::Dashboard(DashboardPage::new(ctx.auth.clone(), ctx.notifier.clone()))
}

/// Building the list page kicks off the initial item load.
fn build_list(ctx: &AppContext) -> Page {
    let store = ListStore::new(Arc::clone(&ctx.items));
    let page = ListPage::new(store, ctx.auth.clone(), ctx.notifier.clone());
    page.load_items();
    Page::List(Box::new(page))
}

pub struct Router {
    ctx: AppContext,
    factories: HashMap<Route, PageFactory>,
}

impl Router {
    /// Router with the default page for every route.
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        let mut router = Self { ctx, factories: HashMap::new() };
        router.register(Route::Login, build_login);
        router.register(Route::Dashboard, build_dashboard);
        router.register(Route::List, build_list);
        router
    }

    /// Replace the factory for `route`.
    pub fn register(&mut self, route: Route, factory: PageFactory) {
        self.factories.insert(route, factory);
    }

    #[must_use]
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Resolve `path`, apply the guard, and build the destination page.
    /// Must be called from within a tokio runtime.
    pub fn navigate(&self, path: &str) -> Navigation {
        let resolved = Route::resolve(path);
        let known = resolved.path() == path.trim().trim_matches('/');
        let route = if resolved.is_protected() && !self.ctx.auth.is_authenticated() {
            tracing::info!(path, "guard: not authenticated, redirecting to login");
            Route::Login
        } else {
            resolved
        };
        if !known {
            tracing::debug!(path, "unknown path, redirecting to login");
        }

        let factory = self.factories.get(&route).copied().unwrap_or(build_login);
        Navigation { requested: path.to_owned(), route, redirected: !known || route != resolved, page: factory(&self.ctx) }
    }

    pub fn navigate_to(&self, route: Route) -> Navigation {
        self.navigate(route.path())
    }
}
