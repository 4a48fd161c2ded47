// ============================================================================
// LIST VIEWMODEL - Fetch once, filter in memory
// ============================================================================

use std::future::Future;

use chrono::NaiveDate;

use crate::error::ApiError;
use crate::models::appointment::Appointment;
use crate::models::patient::Patient;
use crate::models::report::MedicalReport;
use crate::utils::format::parse_date;

/// A row of a list screen
pub trait Listable {
    fn id(&self) -> &str;

    /// Text matched by the search box
    fn search_text(&self) -> String;

    /// Value matched by the type/status dropdown
    fn type_tag(&self) -> Option<&str> {
        None
    }

    fn effective_date(&self) -> Option<NaiveDate>;
}

fn first_date(fields: &[&Option<String>]) -> Option<NaiveDate> {
    fields
        .iter()
        .filter_map(|field| field.as_deref())
        .filter(|raw| !raw.trim().is_empty())
        .find_map(parse_date)
}

impl Listable for Patient {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        self.full_name()
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        first_date(&[&self.last_visit, &self.created_at])
    }
}

impl Listable for Appointment {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.patient_name.as_deref().unwrap_or_default(), self.reason)
    }

    fn type_tag(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        first_date(&[&self.date])
    }
}

impl Listable for MedicalReport {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.display_title(), self.patient_name.as_deref().unwrap_or_default())
    }

    fn type_tag(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        MedicalReport::effective_date(self)
    }
}

/// Search box, type dropdown and inclusive date range
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ListFilter {
    pub search: String,
    pub type_tag: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ListFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.type_tag.is_some() || self.from.is_some() || self.to.is_some()
    }

    pub fn matches<R: Listable>(&self, record: &R) -> bool {
        self.matches_search(record) && self.matches_type(record) && self.matches_dates(record)
    }

    fn matches_search<R: Listable>(&self, record: &R) -> bool {
        let term = self.search.trim().to_lowercase();
        term.is_empty() || record.search_text().to_lowercase().contains(&term)
    }

    fn matches_type<R: Listable>(&self, record: &R) -> bool {
        match self.type_tag.as_deref().filter(|tag| !tag.is_empty() && *tag != "all") {
            None => true,
            Some(wanted) => record.type_tag().is_some_and(|tag| tag.eq_ignore_ascii_case(wanted)),
        }
    }

    // Undated records are never hidden by the range
    fn matches_dates<R: Listable>(&self, record: &R) -> bool {
        let Some(date) = record.effective_date() else {
            return true;
        };
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Collection state of one list screen
#[derive(Clone, PartialEq, Debug)]
pub struct ListViewModel<R> {
    items: Vec<R>,
    pub filter: ListFilter,
    loading: bool,
    error: Option<ApiError>,
}

impl<R> Default for ListViewModel<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filter: ListFilter::default(),
            loading: false,
            error: None,
        }
    }
}

impl<R: Listable> ListViewModel<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A failed fetch keeps whatever was shown before
    pub fn finish_load(&mut self, result: Result<Vec<R>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(e) => {
                log::error!("❌ List fetch failed: {}", e);
                self.error = Some(e);
            }
        }
    }

    pub async fn load<F>(&mut self, fetch: F)
    where
        F: Future<Output = Result<Vec<R>, ApiError>>,
    {
        self.begin_load();
        let result = fetch.await;
        self.finish_load(result);
    }

    pub fn visible(&self) -> Vec<&R> {
        self.items.iter().filter(|item| self.filter.matches(*item)).collect()
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<R> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Confirmation first, then a single delete call, then local removal.
    /// Returns whether the record was removed.
    pub async fn delete_with<F, Fut>(&mut self, id: &str, confirmed: bool, delete: F) -> Result<bool, ApiError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        if !confirmed {
            return Ok(false);
        }
        let result = delete(id.to_string()).await;
        self.finish_delete(id, result)
    }

    /// Applies the answer of a delete call: local removal on success, the
    /// row stays and the error is kept otherwise
    pub fn finish_delete(&mut self, id: &str, result: Result<(), ApiError>) -> Result<bool, ApiError> {
        if let Err(e) = result {
            self.error = Some(e.clone());
            return Err(e);
        }
        Ok(self.remove_by_id(id).is_some())
    }
}
