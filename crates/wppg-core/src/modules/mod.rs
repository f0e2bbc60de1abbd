//! Concrete modules of the WordPress project generator
//!
//! Order matters: a module may only read fragments of modules listed before it.

pub mod docker_compose;
pub mod editor_config;
pub mod git;
pub mod project_info;
pub mod wordpress;

pub use docker_compose::DockerCompose;
pub use editor_config::EditorConfig;
pub use git::Git;
pub use project_info::ProjectInfo;
pub use wordpress::WordPressConfigurator;

use crate::module::Module;

/// The generator's module sequence, producers before consumers
pub fn default_modules() -> Vec<Box<dyn Module>> {
    vec![
        Box::new(ProjectInfo),
        Box::new(WordPressConfigurator),
        Box::new(DockerCompose),
        Box::new(Git),
        Box::new(EditorConfig),
    ]
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::options::{Fragment, OptionsStore};
    use serde_json::Value;

    /// Store pre-filled with `(slug, json object)` pairs
    pub fn store(entries: &[(&str, Value)]) -> OptionsStore {
        let mut store = OptionsStore::new();
        for (slug, value) in entries {
            let fragment: Fragment = value.as_object().cloned().unwrap();
            store.publish(slug, fragment).unwrap();
        }
        store
    }
}
