//! Callback tokens understood by a list while it is being browsed

/// Token of a button that does nothing (greyed out navigation)
pub const NOOP: &str = "noop";

const NEXT_PAGE: &str = "next_page";
const PREV_PAGE: &str = "prev_page";
const RELOAD: &str = "reload";
const SORT_PREFIX: &str = "sort:";
const FILTER_PREFIX: &str = "filter:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    /// Pick the item at this index of the filtered view
    Select(usize),
    NextPage,
    PrevPage,
    Reload,
    /// Toggle the sort key with this field key
    Sort(String),
    /// Toggle this filter bucket
    Filter(String),
    Noop,
}

impl ListCommand {
    pub fn parse(token: &str) -> Option<Self> {
        if let Some(key) = token.strip_prefix(SORT_PREFIX) {
            return Some(ListCommand::Sort(key.to_string()));
        }
        if let Some(bucket) = token.strip_prefix(FILTER_PREFIX) {
            return Some(ListCommand::Filter(bucket.to_string()));
        }
        match token {
            NEXT_PAGE => Some(ListCommand::NextPage),
            PREV_PAGE => Some(ListCommand::PrevPage),
            RELOAD => Some(ListCommand::Reload),
            NOOP => Some(ListCommand::Noop),
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                digits.parse().ok().map(ListCommand::Select)
            }
            _ => None,
        }
    }

    pub fn token(&self) -> String {
        match self {
            ListCommand::Select(index) => index.to_string(),
            ListCommand::NextPage => NEXT_PAGE.to_string(),
            ListCommand::PrevPage => PREV_PAGE.to_string(),
            ListCommand::Reload => RELOAD.to_string(),
            ListCommand::Sort(key) => format!("{}{}", SORT_PREFIX, key),
            ListCommand::Filter(bucket) => format!("{}{}", FILTER_PREFIX, bucket),
            ListCommand::Noop => NOOP.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ListCommand::parse("0"), Some(ListCommand::Select(0)));
        assert_eq!(ListCommand::parse("12"), Some(ListCommand::Select(12)));
        assert_eq!(ListCommand::parse("next_page"), Some(ListCommand::NextPage));
        assert_eq!(ListCommand::parse("prev_page"), Some(ListCommand::PrevPage));
        assert_eq!(ListCommand::parse("reload"), Some(ListCommand::Reload));
        assert_eq!(ListCommand::parse("noop"), Some(ListCommand::Noop));
        assert_eq!(ListCommand::parse("sort:size"), Some(ListCommand::Sort("size".into())));
        // Bucket values are taken verbatim, colons included
        assert_eq!(
            ListCommand::parse("filter:no torrent:x"),
            Some(ListCommand::Filter("no torrent:x".into()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(ListCommand::parse(""), None);
        assert_eq!(ListCommand::parse("-1"), None);
        assert_eq!(ListCommand::parse("act:remove"), None);
        assert_eq!(ListCommand::parse("99999999999999999999999"), None);
    }

    #[test]
    fn test_token_is_parseable() {
        let commands = [
            ListCommand::Select(3),
            ListCommand::NextPage,
            ListCommand::Reload,
            ListCommand::Sort("date".into()),
            ListCommand::Filter("seeding".into()),
        ];
        for command in commands {
            assert_eq!(ListCommand::parse(&command.token()), Some(command));
        }
    }
}
