use crate::api::{IdSet, ObjectRecord};
use crate::catalog;
use crate::output::DisplayMode;

/// Mutable state of one browse session: the selected department, its cached
/// id set, the current page, the display mode, and the records currently on
/// screen. Selecting a department resets the page and invalidates the id
/// cache; the record list is only ever replaced wholesale.
#[derive(Clone, Debug)]
pub struct ViewState {
    department_id: u32,
    id_set: Option<IdSet>,
    records: Vec<ObjectRecord>,
    current_page: usize,
    items_per_page: usize,
    mode: DisplayMode,
    generation: u64,
}

impl ViewState {
    pub fn new(department_id: u32, items_per_page: usize, mode: DisplayMode) -> Self {
        Self {
            department_id,
            id_set: None,
            records: Vec::new(),
            current_page: 1,
            items_per_page,
            mode,
            generation: 0,
        }
    }

    pub fn department_id(&self) -> u32 {
        self.department_id
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn records(&self) -> &[ObjectRecord] {
        &self.records
    }

    pub fn needs_ids(&self) -> bool {
        self.id_set.is_none()
    }

    pub fn set_ids(&mut self, id_set: IdSet) {
        self.id_set = Some(id_set);
    }

    pub fn ids(&self) -> &[u64] {
        self.id_set.as_ref().map(|s| s.ids.as_slice()).unwrap_or(&[])
    }

    pub fn total_objects(&self) -> usize {
        self.id_set.as_ref().map(|s| s.total).unwrap_or(0)
    }

    pub fn total_pages(&self) -> usize {
        catalog::page_count(self.ids().len(), self.items_per_page)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Advances one page; a no-op at the last page.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page; a no-op at the first page.
    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn toggle_mode(&mut self) -> DisplayMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Switches department: page resets to 1 and the cached id set is
    /// invalidated, forcing a refetch on the next load.
    pub fn select_department(&mut self, department_id: u32) {
        self.department_id = department_id;
        self.current_page = 1;
        self.id_set = None;
        self.records.clear();
    }

    /// Mints the token for a new page load. Loads started earlier become
    /// stale the moment a newer one begins.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Applies a finished load unless a newer one has started since its
    /// token was minted; stale results are dropped.
    pub fn apply_load(&mut self, token: u64, records: Vec<ObjectRecord>) -> bool {
        if token != self.generation {
            return false;
        }
        self.records = records;
        true
    }
}
