//! Options store shared by the modules of a pipeline run
//!
//! Each module publishes exactly one fragment, keyed by its own slug. Fragments
//! keep their insertion order so summaries and exports read the way the
//! questions were asked.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Options contributed by a single module
pub type Fragment = Map<String, Value>;

/// Ordered `slug -> fragment` mapping filled during the collecting phase
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsStore {
    fragments: Vec<(String, Fragment)>,
}

impl OptionsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a module's fragment. Only the pipeline writes, and only once per slug.
    pub(crate) fn publish(&mut self, slug: &str, fragment: Fragment) -> Result<()> {
        if self.contains(slug) {
            return Err(Error::DuplicateSlug(slug.to_string()));
        }
        self.fragments.push((slug.to_string(), fragment));
        Ok(())
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.fragments.iter().any(|(s, _)| s == slug)
    }

    pub fn fragment(&self, slug: &str) -> Option<&Fragment> {
        self.fragments
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, fragment)| fragment)
    }

    /// Typed read access to a fragment a module depends on. The view borrows
    /// the store only, not `slug`.
    pub fn view(&self, slug: &str) -> Result<FragmentView<'_>> {
        self.fragments
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(s, fragment)| FragmentView::new(s, fragment))
            .ok_or_else(|| Error::MissingFragment(slug.to_string()))
    }

    pub fn require_str(&self, slug: &str, key: &str) -> Result<&str> {
        self.view(slug)?.str(key)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|(slug, _)| slug.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fragment)> {
        self.fragments
            .iter()
            .map(|(slug, fragment)| (slug.as_str(), fragment))
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Whole store as one JSON object, for template contexts and debugging
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(slug, fragment)| (slug.to_string(), Value::Object(fragment.clone())))
            .collect();
        Value::Object(map)
    }
}

/// Borrowed fragment with accessors that report which slug/key was missing
#[derive(Debug, Clone, Copy)]
pub struct FragmentView<'a> {
    slug: &'a str,
    fragment: &'a Fragment,
}

impl<'a> FragmentView<'a> {
    pub fn new(slug: &'a str, fragment: &'a Fragment) -> Self {
        Self { slug, fragment }
    }

    pub fn get(&self, key: &str) -> Result<&'a Value> {
        self.fragment
            .get(key)
            .ok_or_else(|| Error::missing_option(self.slug, key))
    }

    pub fn str(&self, key: &str) -> Result<&'a str> {
        self.get(key)?
            .as_str()
            .ok_or_else(|| Error::missing_option(self.slug, key))
    }

    pub fn bool(&self, key: &str) -> Result<bool> {
        self.get(key)?
            .as_bool()
            .ok_or_else(|| Error::missing_option(self.slug, key))
    }

    pub fn port(&self, key: &str) -> Result<u16> {
        self.get(key)?
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| Error::missing_option(self.slug, key))
    }
}

/// Render a fragment value for the confirmation listing
pub fn display_value(fragment: &Fragment, key: &str) -> String {
    match fragment.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => "yes".to_string(),
        Some(Value::Bool(false)) => "no".to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fragment(value: Value) -> Fragment {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_publish_keeps_order() {
        let mut store = OptionsStore::new();
        store.publish("b", Fragment::new()).unwrap();
        store.publish("a", Fragment::new()).unwrap();

        assert_eq!(store.slugs().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_publish_rejects_second_write() {
        let mut store = OptionsStore::new();
        store.publish("git", Fragment::new()).unwrap();

        let err = store.publish("git", Fragment::new()).unwrap_err();
        assert!(matches!(err, Error::DuplicateSlug(slug) if slug == "git"));
    }

    #[test]
    fn test_missing_fragment_and_option() {
        let mut store = OptionsStore::new();
        store
            .publish("project_info", fragment(json!({"project_name": "Demo"})))
            .unwrap();

        assert!(matches!(
            store.require_str("docker_compose", "db"),
            Err(Error::MissingFragment(_))
        ));
        assert!(matches!(
            store.require_str("project_info", "project_slug"),
            Err(Error::MissingOption { key, .. }) if key == "project_slug"
        ));
        assert_eq!(store.require_str("project_info", "project_name").unwrap(), "Demo");
    }

    #[test]
    fn test_view_outlives_slug_argument() {
        let mut store = OptionsStore::new();
        store
            .publish("project_info", fragment(json!({"project_slug": "demo"})))
            .unwrap();

        let view = {
            let slug = String::from("project_info");
            store.view(&slug).unwrap()
        };
        let project_slug = {
            let key = String::from("project_slug");
            store.require_str(&String::from("project_info"), &key).unwrap()
        };

        assert_eq!(view.str("project_slug").unwrap(), "demo");
        assert_eq!(project_slug, "demo");
    }

    #[test]
    fn test_view_typed_accessors() {
        let data = fragment(json!({"port": 8080, "big": 70000, "flag": true}));
        let view = FragmentView::new("docker_compose", &data);

        assert_eq!(view.port("port").unwrap(), 8080);
        assert!(view.port("big").is_err());
        assert!(view.bool("flag").unwrap());
        assert!(view.str("port").is_err());
    }

    #[test]
    fn test_display_value() {
        let data = fragment(json!({"name": "x", "on": true, "off": false, "port": 80}));

        assert_eq!(display_value(&data, "name"), "x");
        assert_eq!(display_value(&data, "on"), "yes");
        assert_eq!(display_value(&data, "off"), "no");
        assert_eq!(display_value(&data, "port"), "80");
        assert_eq!(display_value(&data, "absent"), "");
    }

    #[test]
    fn test_to_value() {
        let mut store = OptionsStore::new();
        store
            .publish("project_info", fragment(json!({"project_slug": "demo"})))
            .unwrap();

        assert_eq!(
            store.to_value(),
            json!({"project_info": {"project_slug": "demo"}})
        );
    }
}
