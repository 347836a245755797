use serde::Serialize;

/// One page of a filtered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub current_page: usize,
    pub total_items: usize,
}

/// Slice `records` for 1-based `page`. A zero page size counts as 1 and page 0
/// as page 1; a page past the end is empty but keeps its number.
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> Page<T> {
    let size = page_size.max(1);
    let page = page.max(1);
    let total_pages = records.len().div_ceil(size);

    let start = (page - 1).saturating_mul(size).min(records.len());
    let end = start.saturating_add(size).min(records.len());

    Page {
        items: records[start..end].to_vec(),
        total_pages,
        current_page: page,
        total_items: records.len(),
    }
}

/// "page N" of a view. `set_page` clamps into `[1, max(total, 1)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub page: usize,
    pub per_page: usize,
}

impl PageCursor {
    pub fn new(per_page: usize) -> Self {
        PageCursor {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn set_page(&mut self, requested: usize, total_pages: usize) -> usize {
        self.page = requested.clamp(1, total_pages.max(1));
        self.page
    }
}

/// Filter plus cursor of one collection view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<F> {
    filter: F,
    cursor: PageCursor,
}

impl<F: Default> ViewState<F> {
    pub fn new(per_page: usize) -> Self {
        ViewState {
            filter: F::default(),
            cursor: PageCursor::new(per_page),
        }
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(F::default());
    }
}

impl<F> ViewState<F> {
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Replace the filter; the view jumps back to page 1.
    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.cursor.reset();
    }

    /// Edit a copy of the filter and keep it only when `edit` succeeds. On
    /// success the view jumps back to page 1; on failure nothing changes.
    pub fn try_update_filter<E>(
        &mut self,
        edit: impl FnOnce(&mut F) -> Result<(), E>,
    ) -> Result<(), E>
    where
        F: Clone,
    {
        let mut draft = self.filter.clone();
        edit(&mut draft)?;
        self.set_filter(draft);
        Ok(())
    }

    pub fn page(&self) -> usize {
        self.cursor.page
    }

    pub fn per_page(&self) -> usize {
        self.cursor.per_page
    }

    pub fn set_page(&mut self, requested: usize, total_pages: usize) -> usize {
        self.cursor.set_page(requested, total_pages)
    }
}

/// One button of the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PagerSlot {
    Page(usize),
    Gap,
}

/// Pager layout: first page, gap, pages within two of `current`, gap, last
/// page. Nothing when there is a single page or none.
pub fn page_window(current: usize, total: usize) -> Vec<PagerSlot> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let mut slots = Vec::new();

    if current > 3 {
        slots.push(PagerSlot::Page(1));
        if current > 4 {
            slots.push(PagerSlot::Gap);
        }
    }

    let low = current.saturating_sub(2).max(1);
    let high = (current + 2).min(total);
    slots.extend((low..=high).map(PagerSlot::Page));

    if current + 2 < total {
        if current + 3 < total {
            slots.push(PagerSlot::Gap);
        }
        slots.push(PagerSlot::Page(total));
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_page_of_five() {
        let page = paginate(&[1, 2, 3, 4, 5], 2, 2);
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
    }

    #[test]
    fn degenerate_inputs() {
        let empty: [u8; 0] = [];
        let page = paginate(&empty, 1, 15);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());

        let page = paginate(&[1, 2, 3], 0, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items, vec![1]);
        assert_eq!(page.total_pages, 3);

        let page = paginate(&[1, 2, 3], 9, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 9);
    }

    #[test]
    fn filter_change_resets_and_set_page_clamps() {
        let mut view: ViewState<Option<String>> = ViewState::new(15);
        assert_eq!(view.set_page(4, 6), 4);

        view.set_filter(Some("fire".into()));
        assert_eq!(view.page(), 1);

        assert_eq!(view.set_page(99, 6), 6);
        assert_eq!(view.set_page(0, 6), 1);
        assert_eq!(view.set_page(3, 0), 1);

        view.set_page(2, 6);
        view.try_update_filter(|f| {
            *f = None;
            Ok::<_, ()>(())
        })
        .unwrap();
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn failed_filter_edit_keeps_filter_and_page() {
        let mut view: ViewState<Option<String>> = ViewState::new(15);
        view.set_filter(Some("fire".into()));
        view.set_page(3, 6);

        let result = view.try_update_filter(|f| {
            *f = Some("water".into());
            Err("bad value")
        });

        assert_eq!(result, Err("bad value"));
        assert_eq!(view.filter().as_deref(), Some("fire"));
        assert_eq!(view.page(), 3);
    }

    #[test]
    fn pager_window_shape() {
        use PagerSlot::{Gap, Page as P};

        assert!(page_window(1, 1).is_empty());
        assert_eq!(page_window(1, 3), vec![P(1), P(2), P(3)]);
        assert_eq!(
            page_window(1, 10),
            vec![P(1), P(2), P(3), Gap, P(10)]
        );
        assert_eq!(
            page_window(6, 10),
            vec![P(1), Gap, P(4), P(5), P(6), P(7), P(8), Gap, P(10)]
        );
        assert_eq!(page_window(4, 6), vec![P(1), P(2), P(3), P(4), P(5), P(6)]);
    }
}
