use soniy_admin_shared::PageKey;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{console_context::ConsoleProvider, panels::shell::Root, player_context::PlayerProvider};

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/:page")]
    Panel { page: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// URL of a panel. The dashboard lives at the root.
    pub fn for_page(page: PageKey) -> Self {
        match page {
            PageKey::Dashboard => Route::Home,
            other => Route::Panel {
                page: other.as_str().to_string(),
            },
        }
    }

    /// Page key this route names, if any.
    pub fn page_key(&self) -> Option<PageKey> {
        match self {
            Route::Home => Some(PageKey::Dashboard),
            Route::Panel {
                page,
            } => PageKey::parse(page),
            Route::NotFound => None,
        }
    }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <ConsoleProvider>
                <PlayerProvider>
                    <Root />
                </PlayerProvider>
            </ConsoleProvider>
        </BrowserRouter>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_maps_back_to_itself() {
        for page in PageKey::ALL {
            assert_eq!(Route::for_page(page).page_key(), Some(page));
        }
    }

    #[test]
    fn dashboard_lives_at_root() {
        assert_eq!(Route::for_page(PageKey::Dashboard), Route::Home);
        assert_eq!(
            Route::Panel {
                page: "nowhere".to_string()
            }
            .page_key(),
            None
        );
        assert_eq!(Route::NotFound.page_key(), None);
    }
}
