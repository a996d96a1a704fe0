use serde::{Deserialize, Serialize};

/// Dashboard pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Dashboard,
    Upload,
    Result,
    History,
    About,
}

impl Page {
    pub const ALL: [Page; 5] = [Page::Dashboard, Page::Upload, Page::Result, Page::History, Page::About];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Upload => "upload",
            Page::Result => "result",
            Page::History => "history",
            Page::About => "about",
        }
    }

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Upload => "Verify Identity",
            Page::Result => "Results",
            Page::History => "History",
            Page::About => "About",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
