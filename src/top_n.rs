use crate::group::Group;

/// Number of groups reported when no limit is configured.
pub const DEFAULT_TOP_N: usize = 5;

/// Keeps the `n` largest groups, largest first.
///
/// Equal sizes keep first-seen order. `n == 0` selects nothing.
pub fn select_top_n(mut groups: Vec<Group<'_>>, n: usize) -> Vec<Group<'_>> {
    groups.sort_by(|a, b| {
        b.size()
            .cmp(&a.size())
            .then_with(|| a.ordinal.cmp(&b.ordinal))
    });
    groups.truncate(n);
    groups
}
