//! Branch name parsing for template placeholders

/// Ordered tokens of a branch name.
///
/// Placeholder `{bN}` refers to the N-th part (1-based).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchParts(Vec<String>);

impl BranchParts {
    /// Split a branch name on every literal occurrence of `separator`
    ///
    /// Empty tokens are kept so that `{bN}` indices stay stable.
    /// An empty separator yields one part per character (none for an
    /// empty branch name).
    pub fn parse(branch_name: &str, separator: &str) -> Self {
        if separator.is_empty() {
            return Self(branch_name.chars().map(String::from).collect());
        }

        Self(branch_name.split(separator).map(str::to_string).collect())
    }

    /// Get the part referenced by placeholder number `n` (1-based)
    pub fn placeholder(&self, n: usize) -> Option<&str> {
        let index = n.checked_sub(1)?;
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for BranchParts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
