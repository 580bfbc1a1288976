use crate::domain::model::{Artwork, ArtworkPage, PageWindow};
use crate::domain::ports::ArtworkSource;
use crate::domain::selection::SelectionSet;
use crate::utils::error::{Result, TableError};
use std::collections::HashSet;

/// Summary of one bulk "select first N" run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSelectOutcome {
    pub added: usize,
    pub removed: usize,
    pub pages_fetched: u64,
}

/// Owns the displayed page and the cross-page selection.
///
/// Readers get snapshots through `window()`, `records()` and `selection()`;
/// every mutation goes through a method. `bulk_select` holds `&mut self`
/// across its fetches, so nothing can navigate while it runs.
pub struct SelectionReconciler<S: ArtworkSource> {
    source: S,
    window: PageWindow,
    records: Vec<Artwork>,
    selection: SelectionSet,
    loading: bool,
}

impl<S: ArtworkSource> SelectionReconciler<S> {
    pub fn new(source: S, page_size: u64) -> Self {
        Self {
            source,
            window: PageWindow::new(1, page_size),
            records: Vec::new(),
            selection: SelectionSet::new(),
            loading: false,
        }
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// True while a page request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    async fn fetch(&mut self, page_number: u64, page_size: u64) -> Option<ArtworkPage> {
        self.loading = true;
        tracing::info!("Loading page {}...", page_number);

        let result = self.source.fetch_page(page_number, page_size).await;
        self.loading = false;

        match result {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::error!(
                    "Error fetching artworks page {} (limit {}): {}",
                    page_number,
                    page_size,
                    e
                );
                None
            }
        }
    }

    async fn load_window(&mut self, page_number: u64, page_size: u64) -> bool {
        let Some(page) = self.fetch(page_number, page_size).await else {
            return false;
        };

        self.records = page.records;
        self.window = PageWindow {
            page_number,
            page_size,
            total_records: page.total_records,
        };
        true
    }

    /// Loads `page_number` at the current page size. On failure the previous
    /// page stays displayed and `false` is returned. Never touches the selection.
    pub async fn load_page(&mut self, page_number: u64) -> bool {
        self.load_window(page_number.max(1), self.window.page_size).await
    }

    /// Navigates to `page_number`, clamped to the known page range.
    pub async fn go_to_page(&mut self, page_number: u64) -> bool {
        let last = self.window.total_pages().max(1);
        self.load_page(page_number.clamp(1, last)).await
    }

    /// Moves by one page. At either end of the range nothing is fetched.
    async fn step_page(&mut self, forward: bool) -> bool {
        let last = self.window.total_pages().max(1);
        let current = self.window.page_number;
        let target = if forward {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1)
        }
        .clamp(1, last);

        if target == current {
            return true;
        }
        self.load_page(target).await
    }

    pub async fn next_page(&mut self) -> bool {
        self.step_page(true).await
    }

    pub async fn prev_page(&mut self) -> bool {
        self.step_page(false).await
    }

    /// Changes rows per page, keeping the first visible record on screen.
    pub async fn set_page_size(&mut self, page_size: u64) -> bool {
        let page_size = page_size.max(1);
        let page_number = (self.window.first_index() / page_size).saturating_add(1);
        self.load_window(page_number, page_size).await
    }

    pub fn current_page_ids(&self) -> HashSet<u64> {
        self.records.iter().map(|r| r.id).collect()
    }

    /// Ids on the current page that are selected, in page order.
    pub fn checked_on_page(&self) -> Vec<u64> {
        self.records
            .iter()
            .filter(|r| self.selection.contains(r.id))
            .map(|r| r.id)
            .collect()
    }

    /// Flips one record. Returns whether it is selected afterwards.
    ///
    /// Selecting needs the record on the current page; deselecting works for
    /// any selected id.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        if self.selection.remove(id).is_some() {
            tracing::debug!("Deselected artwork {}", id);
            return Ok(false);
        }

        let record = self
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| {
                TableError::command(format!("artwork {} is not on the current page", id))
            })?;

        self.selection.insert(record);
        tracing::debug!("Selected artwork {}", id);
        Ok(true)
    }

    /// Replaces the current page's share of the selection with `checked`.
    ///
    /// Selections on other pages keep their order; the newly checked rows
    /// are appended in the order given. Ids not on this page are ignored.
    pub fn merge_page_selection(&mut self, checked: &[u64]) {
        let page_ids = self.current_page_ids();
        self.selection.remove_where(|id| page_ids.contains(&id));

        let checked_records: Vec<Artwork> = checked
            .iter()
            .filter_map(|id| self.records.iter().find(|r| r.id == *id).cloned())
            .collect();
        self.selection.extend(checked_records);
    }

    /// Selects the first `target` records, starting from the current page
    /// and fetching later pages one at a time as needed.
    ///
    /// A target at or below the current selection size truncates the
    /// selection to its first `target` records (negative counts as zero).
    /// Additions are committed once, after the last fetch.
    pub async fn bulk_select(&mut self, target: i64) -> BulkSelectOutcome {
        let target = usize::try_from(target.max(0)).unwrap_or(usize::MAX);
        let already = self.selection.len();

        if target <= already {
            let removed = self.selection.truncate(target);
            tracing::info!(
                "Bulk select {}: truncated selection, dropped {} records",
                target,
                removed
            );
            return BulkSelectOutcome {
                removed,
                ..Default::default()
            };
        }

        let mut remaining = target - already;
        let mut additions = Vec::new();
        let mut pending = HashSet::new();

        take_unselected(
            &self.selection,
            self.records.iter().cloned(),
            &mut pending,
            &mut remaining,
            &mut additions,
        );

        // Page count as known when the operation started.
        let last_page = self.window.total_pages();
        let page_size = self.window.page_size;
        let mut next_page = self.window.page_number.saturating_add(1);
        let mut pages_fetched = 0;

        while remaining > 0 && next_page <= last_page {
            let page = self.fetch(next_page, page_size).await.unwrap_or_default();
            pages_fetched += 1;

            take_unselected(
                &self.selection,
                page.records,
                &mut pending,
                &mut remaining,
                &mut additions,
            );
            match next_page.checked_add(1) {
                Some(page) => next_page = page,
                None => break,
            }
        }

        let added = self.selection.extend(additions);
        tracing::info!(
            "Bulk select {}: added {} records across {} extra page fetches",
            target,
            added,
            pages_fetched
        );

        BulkSelectOutcome {
            added,
            removed: 0,
            pages_fetched,
        }
    }
}

fn take_unselected<I: IntoIterator<Item = Artwork>>(
    selection: &SelectionSet,
    records: I,
    pending: &mut HashSet<u64>,
    remaining: &mut usize,
    out: &mut Vec<Artwork>,
) {
    for record in records {
        if *remaining == 0 {
            break;
        }
        if selection.contains(record.id) || !pending.insert(record.id) {
            continue;
        }
        out.push(record);
        *remaining -= 1;
    }
}
