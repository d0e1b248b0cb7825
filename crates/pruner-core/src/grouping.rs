/// Maps a cache key to the base key of its lineage.
pub trait KeyGrouping {
    fn base_key(&self, key: &str) -> String;
}

impl<F> KeyGrouping for F
where
    F: Fn(&str) -> String,
{
    fn base_key(&self, key: &str) -> String {
        self(key)
    }
}

/// Drops the final separator-delimited segment and keeps the trailing
/// separator, so `linux-cargo-abc` groups under `linux-cargo-`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripLastSegment {
    pub separator: char,
}

impl Default for StripLastSegment {
    fn default() -> Self {
        Self { separator: '-' }
    }
}

impl KeyGrouping for StripLastSegment {
    fn base_key(&self, key: &str) -> String {
        // A key without a separator keeps its full text as the prefix.
        let prefix = key
            .rsplit_once(self.separator)
            .map(|(head, _)| head)
            .unwrap_or(key);
        let mut base = String::with_capacity(prefix.len() + self.separator.len_utf8());
        base.push_str(prefix);
        base.push(self.separator);
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_segment() {
        let grouping = StripLastSegment::default();
        assert_eq!(grouping.base_key("linux-abc"), "linux-");
        assert_eq!(grouping.base_key("linux-cargo-1f2e"), "linux-cargo-");
    }

    #[test]
    fn key_without_separator_keeps_full_text() {
        let grouping = StripLastSegment::default();
        assert_eq!(grouping.base_key("linux"), "linux-");
        assert_eq!(grouping.base_key(""), "-");
    }

    #[test]
    fn trailing_separator_yields_same_prefix() {
        let grouping = StripLastSegment::default();
        assert_eq!(grouping.base_key("linux-"), "linux-");
    }

    #[test]
    fn custom_separator() {
        let grouping = StripLastSegment { separator: '_' };
        assert_eq!(grouping.base_key("win_node_99"), "win_node_");
    }

    #[test]
    fn closures_act_as_groupings() {
        let by_first = |key: &str| key.split('-').next().unwrap_or_default().to_string();
        assert_eq!(by_first.base_key("mac-x-y"), "mac");
    }
}
