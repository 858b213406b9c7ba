//! Endpoint table
//!
//! Every path the client talks to is a variant here. `path` is an exhaustive
//! match, so adding a variant without giving it a path does not compile.

use std::fmt;

use crate::query::FilterField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Username,
    Flags,
    SignIn,
    News,
    ContestList,
    RpgList,
    RpgListTitle,
    RpgListUName,
    RpgListSuid,
    RpgListPassword,
    MyRpgList,
    RpgDownload,
    RpgReview,
    Infomercial,
    RpgUpload,
    RpgDelete,
}

impl Endpoint {
    pub const ALL: [Endpoint; 16] = [
        Endpoint::Username,
        Endpoint::Flags,
        Endpoint::SignIn,
        Endpoint::News,
        Endpoint::ContestList,
        Endpoint::RpgList,
        Endpoint::RpgListTitle,
        Endpoint::RpgListUName,
        Endpoint::RpgListSuid,
        Endpoint::RpgListPassword,
        Endpoint::MyRpgList,
        Endpoint::RpgDownload,
        Endpoint::RpgReview,
        Endpoint::Infomercial,
        Endpoint::RpgUpload,
        Endpoint::RpgDelete,
    ];

    /// Request path the client posts to
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Username => "/api/username",
            Endpoint::Flags => "/api/flags",
            Endpoint::SignIn => "/api/signin",
            Endpoint::News => "/api/news",
            Endpoint::ContestList => "/api/contestlist",
            Endpoint::RpgList => "/api/rpglist",
            Endpoint::RpgListTitle => "/api/rpglisttitle",
            Endpoint::RpgListUName => "/api/rpglistuname",
            Endpoint::RpgListSuid => "/api/rpglistsuid",
            Endpoint::RpgListPassword => "/api/rpglistpassword",
            Endpoint::MyRpgList => "/api/myrpglist",
            Endpoint::RpgDownload => "/api/rpgdownload",
            Endpoint::RpgReview => "/api/rpgreview",
            Endpoint::Infomercial => "/api/infomercial",
            Endpoint::RpgUpload => "/api/rpgupload",
            Endpoint::RpgDelete => "/api/rpgdelete",
        }
    }

    /// Short name, the path without `/api/`
    pub fn name(self) -> &'static str {
        &self.path()["/api/".len()..]
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|endpoint| endpoint.path() == path)
    }

    /// For the catalog listing endpoints, the filter the path selects.
    /// `Some(FilterField::None)` is the unfiltered `rpglist`.
    pub fn list_filter(self) -> Option<FilterField> {
        match self {
            Endpoint::RpgList => Some(FilterField::None),
            Endpoint::RpgListTitle => Some(FilterField::Title),
            Endpoint::RpgListUName => Some(FilterField::UName),
            Endpoint::RpgListSuid => Some(FilterField::Suid),
            Endpoint::RpgListPassword => Some(FilterField::Password),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique_and_resolve() {
        let paths: HashSet<_> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(paths.len(), Endpoint::ALL.len());

        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_path(endpoint.path()), Some(endpoint));
        }
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Endpoint::from_path("/api/"), None);
        assert_eq!(Endpoint::from_path("/api/rpglistgenre"), None);
        assert_eq!(Endpoint::from_path("/username"), None);
        assert_eq!(Endpoint::from_path("/api/username/"), None);
    }

    #[test]
    fn test_list_filters() {
        assert_eq!(Endpoint::RpgList.list_filter(), Some(FilterField::None));
        assert_eq!(Endpoint::RpgListTitle.list_filter(), Some(FilterField::Title));
        assert_eq!(
            Endpoint::RpgListPassword.list_filter(),
            Some(FilterField::Password)
        );
        assert_eq!(Endpoint::RpgDownload.list_filter(), None);
        assert_eq!(Endpoint::MyRpgList.list_filter(), None);
    }

    #[test]
    fn test_display_is_short_name() {
        assert_eq!(Endpoint::RpgListUName.to_string(), "rpglistuname");
        assert_eq!(Endpoint::Flags.to_string(), "flags");
    }
}
