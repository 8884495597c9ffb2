//! In-memory activity store backing the CLI.
//!
//! The store keeps a registry of activities keyed by id, acting as the local
//! source of truth between server round-trips. Each remote operation toggles
//! a busy flag around the call, reconciles the registry on success, and on
//! failure logs and leaves the registry untouched. Two in-flight operations
//! on the same id are not guarded against; the last writer wins.

use std::collections::HashMap;

use chrono::SubsecRound;
use uuid::Uuid;

use crate::api::ActivityApi;
use crate::models::Activity;

pub struct ActivityStore<A> {
    api: A,
    registry: HashMap<Uuid, Activity>,
    selected: Option<Activity>,
    loading: bool,
    submitting: bool,
    edit_mode: bool,
    /// Id of the activity a delete is currently in flight for.
    target: Option<Uuid>,
}

impl<A: ActivityApi> ActivityStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            registry: HashMap::new(),
            selected: None,
            loading: false,
            submitting: false,
            edit_mode: false,
            target: None,
        }
    }

    /// Returns a cached activity by id.
    pub fn activity(&self, id: Uuid) -> Option<&Activity> {
        self.registry.get(&id)
    }

    /// Returns all cached activities, ordered by date ascending.
    pub fn activities_by_date(&self) -> Vec<Activity> {
        let mut activities: Vec<Activity> = self.registry.values().cloned().collect();
        activities.sort_by_key(|a| a.date);
        activities
    }

    pub fn selected_activity(&self) -> Option<&Activity> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn delete_target(&self) -> Option<Uuid> {
        self.target
    }

    /// Fetches all activities from the server into the registry.
    ///
    /// Timestamps are truncated to whole seconds so that records re-fetched
    /// after a round-trip compare equal to locally created ones.
    pub async fn load_activities(&mut self) {
        self.loading = true;
        match self.api.list().await {
            Ok(activities) => {
                for mut activity in activities {
                    activity.date = activity.date.trunc_subsecs(0);
                    self.registry.insert(activity.id, activity);
                }
            }
            Err(e) => tracing::warn!("Failed to load activities: {}", e),
        }
        self.loading = false;
    }

    /// Selects an activity, fetching it from the server on a cache miss.
    ///
    /// A fetched activity is only selected, not added to the registry; the
    /// registry is populated by `load_activities` and the mutating actions.
    pub async fn load_activity(&mut self, id: Uuid) {
        if let Some(activity) = self.registry.get(&id) {
            self.selected = Some(activity.clone());
            return;
        }

        self.loading = true;
        match self.api.details(id).await {
            Ok(activity) => self.selected = Some(activity),
            Err(e) => tracing::warn!("Failed to load activity {}: {}", id, e),
        }
        self.loading = false;
    }

    /// Creates an activity on the server and caches it locally.
    pub async fn create_activity(&mut self, activity: Activity) {
        self.submitting = true;
        match self.api.create(&activity).await {
            Ok(()) => {
                self.registry.insert(activity.id, activity);
                self.edit_mode = false;
            }
            Err(e) => tracing::warn!("Failed to create activity: {}", e),
        }
        self.submitting = false;
    }

    /// Replaces an activity on the server and in the registry.
    pub async fn edit_activity(&mut self, activity: Activity) {
        self.submitting = true;
        match self.api.update(&activity).await {
            Ok(()) => {
                self.selected = Some(activity.clone());
                self.registry.insert(activity.id, activity);
                self.edit_mode = false;
            }
            Err(e) => tracing::warn!("Failed to update activity {}: {}", activity.id, e),
        }
        self.submitting = false;
    }

    /// Deletes an activity on the server and evicts it from the registry.
    pub async fn delete_activity(&mut self, id: Uuid) {
        self.submitting = true;
        self.target = Some(id);
        match self.api.delete(id).await {
            Ok(()) => {
                self.registry.remove(&id);
            }
            Err(e) => tracing::warn!("Failed to delete activity {}: {}", id, e),
        }
        self.submitting = false;
        self.target = None;
    }

    pub fn select_activity(&mut self, id: Uuid) {
        self.selected = self.registry.get(&id).cloned();
        self.edit_mode = false;
    }

    pub fn open_create_form(&mut self) {
        self.edit_mode = true;
        self.selected = None;
    }

    pub fn open_edit_form(&mut self, id: Uuid) {
        self.selected = self.registry.get(&id).cloned();
        self.edit_mode = true;
    }

    pub fn cancel_selected_activity(&mut self) {
        self.selected = None;
    }

    pub fn cancel_form(&mut self) {
        self.edit_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use chrono::{DateTime, TimeZone, Timelike, Utc};
    use std::cell::{Cell, RefCell};

    /// In-memory stand-in for the REST API.
    struct FakeApi {
        activities: RefCell<Vec<Activity>>,
        fail: Cell<bool>,
        remote_calls: Cell<usize>,
    }

    impl FakeApi {
        fn new() -> Self {
            Self {
                activities: RefCell::new(Vec::new()),
                fail: Cell::new(false),
                remote_calls: Cell::new(0),
            }
        }

        fn with_activities(activities: Vec<Activity>) -> Self {
            let api = Self::new();
            *api.activities.borrow_mut() = activities;
            api
        }

        fn check(&self) -> Result<(), ApiError> {
            self.remote_calls.set(self.remote_calls.get() + 1);
            if self.fail.get() {
                Err(ApiError::ConnectionError("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl ActivityApi for FakeApi {
        async fn list(&self) -> Result<Vec<Activity>, ApiError> {
            self.check()?;
            Ok(self.activities.borrow().clone())
        }

        async fn details(&self, id: Uuid) -> Result<Activity, ApiError> {
            self.check()?;
            self.activities
                .borrow()
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or(ApiError::UnexpectedStatus(404))
        }

        async fn create(&self, activity: &Activity) -> Result<(), ApiError> {
            self.check()?;
            self.activities.borrow_mut().push(activity.clone());
            Ok(())
        }

        async fn update(&self, activity: &Activity) -> Result<(), ApiError> {
            self.check()?;
            let mut activities = self.activities.borrow_mut();
            match activities.iter_mut().find(|a| a.id == activity.id) {
                Some(existing) => {
                    *existing = activity.clone();
                    Ok(())
                }
                None => Err(ApiError::UnexpectedStatus(404)),
            }
        }

        async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
            self.check()?;
            self.activities.borrow_mut().retain(|a| a.id != id);
            Ok(())
        }
    }

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 19, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let mut store = ActivityStore::new(FakeApi::new());
        let activity = Activity::new("Pub quiz", date(1));
        let id = activity.id;

        store.create_activity(activity.clone()).await;

        assert_eq!(store.activity(id), Some(&activity));
        assert!(!store.is_submitting());
    }

    #[tokio::test]
    async fn test_delete_removes_from_cache() {
        let mut store = ActivityStore::new(FakeApi::new());
        let activity = Activity::new("Pub quiz", date(1));
        let id = activity.id;

        store.create_activity(activity).await;
        store.delete_activity(id).await;

        assert_eq!(store.activity(id), None);
        assert!(!store.is_submitting());
        assert_eq!(store.delete_target(), None);
    }

    #[tokio::test]
    async fn test_list_sorted_by_date_for_any_insertion_order() {
        let api = FakeApi::with_activities(vec![
            Activity::new("third", date(20)),
            Activity::new("first", date(3)),
            Activity::new("second", date(11)),
        ]);
        let mut store = ActivityStore::new(api);

        store.load_activities().await;

        let activities = store.activities_by_date();
        let titles: Vec<&str> = activities.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_cache_unchanged_and_flag_clear() {
        let api = FakeApi::with_activities(vec![Activity::new("party", date(5))]);
        api.fail.set(true);
        let mut store = ActivityStore::new(api);

        store.load_activities().await;

        assert!(store.activities_by_date().is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_failed_create_leaves_cache_unchanged() {
        let api = FakeApi::new();
        api.fail.set(true);
        let mut store = ActivityStore::new(api);
        let activity = Activity::new("Pub quiz", date(1));
        let id = activity.id;

        store.open_create_form();
        store.create_activity(activity).await;

        assert_eq!(store.activity(id), None);
        assert!(!store.is_submitting());
        // the form stays open: the create did not go through
        assert!(store.edit_mode());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entry_and_clears_target() {
        let mut store = ActivityStore::new(FakeApi::new());
        let activity = Activity::new("Pub quiz", date(1));
        let id = activity.id;
        store.create_activity(activity).await;

        store.api.fail.set(true);
        store.delete_activity(id).await;

        assert!(store.activity(id).is_some());
        assert_eq!(store.delete_target(), None);
        assert!(!store.is_submitting());
    }

    #[tokio::test]
    async fn test_load_truncates_fractional_seconds() {
        let with_nanos = date(1).with_nanosecond(123_456_789).unwrap();
        let api = FakeApi::with_activities(vec![Activity::new("party", with_nanos)]);
        let mut store = ActivityStore::new(api);

        store.load_activities().await;

        let loaded = &store.activities_by_date()[0];
        assert_eq!(loaded.date, date(1));
        assert_eq!(loaded.date.nanosecond(), 0);
    }

    #[tokio::test]
    async fn test_reload_does_not_duplicate() {
        let api = FakeApi::with_activities(vec![
            Activity::new("one", date(1)),
            Activity::new("two", date(2)),
        ]);
        let mut store = ActivityStore::new(api);

        store.load_activities().await;
        store.load_activities().await;

        assert_eq!(store.activities_by_date().len(), 2);
    }

    #[tokio::test]
    async fn test_load_activity_cache_hit_skips_remote_call() {
        let activity = Activity::new("party", date(5));
        let id = activity.id;
        let api = FakeApi::with_activities(vec![activity]);
        let mut store = ActivityStore::new(api);

        store.load_activities().await;
        let calls_after_list = store.api.remote_calls.get();

        store.load_activity(id).await;

        assert_eq!(store.api.remote_calls.get(), calls_after_list);
        assert_eq!(store.selected_activity().map(|a| a.id), Some(id));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_load_activity_miss_fetches_without_caching() {
        let activity = Activity::new("party", date(5));
        let id = activity.id;
        let api = FakeApi::with_activities(vec![activity]);
        let mut store = ActivityStore::new(api);

        store.load_activity(id).await;

        assert_eq!(store.selected_activity().map(|a| a.id), Some(id));
        // details fetch selects but does not populate the registry
        assert_eq!(store.activity(id), None);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_edit_updates_cache_and_selection() {
        let mut store = ActivityStore::new(FakeApi::new());
        let activity = Activity::new("Pub quiz", date(1));
        let id = activity.id;
        store.create_activity(activity.clone()).await;

        store.open_edit_form(id);
        assert!(store.edit_mode());

        let mut updated = activity;
        updated.title = "Pub quiz night".to_string();
        store.edit_activity(updated.clone()).await;

        assert_eq!(store.activity(id), Some(&updated));
        assert_eq!(store.selected_activity(), Some(&updated));
        assert!(!store.edit_mode());
    }

    #[tokio::test]
    async fn test_selection_and_form_flags() {
        let mut store = ActivityStore::new(FakeApi::new());
        let activity = Activity::new("Pub quiz", date(1));
        let id = activity.id;
        store.create_activity(activity).await;

        store.open_create_form();
        assert!(store.edit_mode());
        assert!(store.selected_activity().is_none());

        store.select_activity(id);
        assert!(!store.edit_mode());
        assert_eq!(store.selected_activity().map(|a| a.id), Some(id));

        store.cancel_selected_activity();
        assert!(store.selected_activity().is_none());

        store.open_edit_form(id);
        assert!(store.edit_mode());
        store.cancel_form();
        assert!(!store.edit_mode());
    }
}
