//! Offset window applied to catalog listings.

/// Default page size used by the HTTP listing endpoint.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Window over the catalog in storage order.
///
/// `limit: None` means "everything after `skip`".
///
/// # Examples
/// ```
/// use catalog::domain::Page;
///
/// let page = Page::new(1, Some(2));
/// let window: Vec<_> = page.apply(["a", "b", "c", "d"]).collect();
/// assert_eq!(window, ["b", "c"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    pub skip: usize,
    pub limit: Option<usize>,
}

impl Page {
    /// Build a window skipping `skip` records and returning at most `limit`.
    pub fn new(skip: usize, limit: Option<usize>) -> Self {
        Self { skip, limit }
    }

    /// Every record, in storage order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Apply the window to an in-memory sequence.
    pub fn apply<I>(self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        items
            .into_iter()
            .skip(self.skip)
            .take(self.limit.unwrap_or(usize::MAX))
    }
}
