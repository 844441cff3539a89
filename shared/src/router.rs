//! Page-key view router: exactly one panel is active at any time.

use std::fmt;

/// One full-screen admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageKey {
    /// Manifest summary and publish action.
    Dashboard,
    /// Book detail and chapters.
    Book,
    /// Page grid, image upload, PDF import.
    Pages,
    /// Audio asset review.
    Audio,
    /// Waveform viewer.
    Waveform,
    /// Reader feedback table.
    Feedback,
    /// Telegram notification settings.
    Settings,
    /// Audit log table.
    Audit,
}

impl PageKey {
    /// Every panel in navigation order.
    pub const ALL: [PageKey; 8] = [
        PageKey::Dashboard,
        PageKey::Book,
        PageKey::Pages,
        PageKey::Audio,
        PageKey::Waveform,
        PageKey::Feedback,
        PageKey::Settings,
        PageKey::Audit,
    ];

    /// Parse a page key; unknown keys yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        PageKey::ALL
            .into_iter()
            .find(|page| page.as_str() == raw.trim())
    }

    /// Stable key used in URLs and nav markers.
    pub fn as_str(self) -> &'static str {
        match self {
            PageKey::Dashboard => "dashboard",
            PageKey::Book => "book",
            PageKey::Pages => "pages",
            PageKey::Audio => "audio",
            PageKey::Waveform => "waveform",
            PageKey::Feedback => "feedback",
            PageKey::Settings => "settings",
            PageKey::Audit => "audit",
        }
    }

    /// Title label shown in the top bar.
    pub fn title(self) -> &'static str {
        match self {
            PageKey::Dashboard => "Dashboard",
            PageKey::Book => "Kitob",
            PageKey::Pages => "Sahifalar",
            PageKey::Audio => "Audio",
            PageKey::Waveform => "Waveform Editor",
            PageKey::Feedback => "Fikr-mulohazalar",
            PageKey::Settings => "Sozlamalar",
            PageKey::Audit => "Audit Log",
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction to run one page's loader exactly once.
///
/// Panels key their fetch effect on `seq`; a fresh ticket means a fresh load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    /// Page whose loader must run.
    pub page: PageKey,
    /// Strictly increasing across all tickets of one router.
    pub seq: u64,
}

/// Active page, mobile drawer, and load sequencing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRouter {
    active: PageKey,
    drawer_open: bool,
    seq: u64,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self {
            active: PageKey::Dashboard,
            drawer_open: false,
            seq: 0,
        }
    }
}

impl ViewRouter {
    /// Currently active page.
    pub fn active(&self) -> PageKey {
        self.active
    }

    /// Title of the active page.
    pub fn title(&self) -> &'static str {
        self.active.title()
    }

    /// Whether `page` carries the active marker.
    pub fn is_active(&self, page: PageKey) -> bool {
        self.active == page
    }

    /// Ticket of the most recent navigation; `seq == 0` means none yet.
    pub fn current_ticket(&self) -> LoadTicket {
        LoadTicket {
            page: self.active,
            seq: self.seq,
        }
    }

    /// Whether the mobile navigation drawer is open.
    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Navigate by key. Unknown keys change nothing.
    ///
    /// Navigating to the already-active page re-issues its load.
    pub fn navigate(&mut self, key: &str) -> Option<LoadTicket> {
        let Some(page) = PageKey::parse(key) else {
            tracing::debug!(key, "ignoring navigation to unknown page");
            return None;
        };
        Some(self.navigate_to(page))
    }

    /// Navigate to a known page.
    pub fn navigate_to(&mut self, page: PageKey) -> LoadTicket {
        self.active = page;
        self.seq += 1;
        self.drawer_open = false;
        tracing::debug!(page = page.as_str(), seq = self.seq, "navigate");
        self.current_ticket()
    }

    /// Follow an external location change (URL). Unlike [`Self::navigate`]
    /// this does nothing when `key` already names the active page, so a URL
    /// update that mirrors a navigation never loads twice.
    pub fn sync(&mut self, key: &str) -> Option<LoadTicket> {
        let page = PageKey::parse(key)?;
        if page == self.active && self.seq > 0 {
            return None;
        }
        Some(self.navigate_to(page))
    }

    /// Open or close the mobile drawer.
    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    /// Close the mobile drawer.
    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_parse() {
        for page in PageKey::ALL {
            assert_eq!(PageKey::parse(page.as_str()), Some(page));
        }
        assert_eq!(PageKey::parse("unknown"), None);
    }

    #[test]
    fn unknown_page_is_a_no_op() {
        let mut router = ViewRouter::default();
        router.navigate("audio");
        let before = router.clone();

        assert_eq!(router.navigate("nowhere"), None);
        assert_eq!(router, before);
    }

    #[test]
    fn navigation_sets_title_and_closes_drawer() {
        let mut router = ViewRouter::default();
        router.toggle_drawer();
        assert!(router.drawer_open());

        let ticket = router.navigate("feedback").expect("known page");

        assert_eq!(ticket.page, PageKey::Feedback);
        assert_eq!(router.title(), "Fikr-mulohazalar");
        assert!(!router.drawer_open());
    }

    #[test]
    fn repeated_navigation_reissues_one_load_each_time() {
        let mut router = ViewRouter::default();

        let first = router.navigate("pages").expect("pages");
        let second = router.navigate("pages").expect("pages again");

        assert!(second.seq == first.seq + 1);
        let active = PageKey::ALL.iter().filter(|page| router.is_active(**page)).count();
        assert_eq!(active, 1);
        assert!(router.is_active(PageKey::Pages));
    }

    #[test]
    fn url_sync_does_not_reload_the_active_page() {
        let mut router = ViewRouter::default();
        let ticket = router.navigate("book").expect("book");

        assert_eq!(router.sync("book"), None);
        assert_eq!(router.current_ticket(), ticket);

        let next = router.sync("audit").expect("audit");
        assert_eq!(next.page, PageKey::Audit);
    }

    #[test]
    fn first_sync_loads_even_the_default_page() {
        let mut router = ViewRouter::default();
        let ticket = router.sync("dashboard").expect("initial load");
        assert_eq!(ticket.seq, 1);
    }
}
