//! Template rendering for generated project files
//!
//! Templates are embedded in the binary. A local directory can override any of
//! them by providing `<name>.j2` (same layout as `templates/` in this crate).

use minijinja::Environment;
use serde::Serialize;
use std::path::Path;

use crate::error::{Error, Result};

/// Embedded templates as `(name, source)`
const TEMPLATES: &[(&str, &str)] = &[
    ("git/gitignore", include_str!("../templates/git/gitignore.j2")),
    (
        "git/gitattributes",
        include_str!("../templates/git/gitattributes.j2"),
    ),
    (
        "editorconfig/editorconfig",
        include_str!("../templates/editorconfig/editorconfig.j2"),
    ),
    (
        "docker_compose/vhost/apache",
        include_str!("../templates/docker_compose/vhost/apache.j2"),
    ),
    (
        "docker_compose/vhost/nginx",
        include_str!("../templates/docker_compose/vhost/nginx.j2"),
    ),
    (
        "docker_compose/php/php-ini-overrides",
        include_str!("../templates/docker_compose/php/php-ini-overrides.j2"),
    ),
    (
        "docker_compose/wpcli/scripts/entrypoint",
        include_str!("../templates/docker_compose/wpcli/scripts/entrypoint.j2"),
    ),
];

/// Template engine wrapper around minijinja
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Renderer using only the embedded templates
    pub fn new() -> Result<Self> {
        Self::with_overrides(None)
    }

    /// Renderer where files found in `dir` replace the embedded templates
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_filter("bashescape", bash_escape);

        for (name, embedded) in TEMPLATES {
            let source = match dir.map(|d| d.join(format!("{}.j2", name))) {
                Some(path) if path.is_file() => {
                    tracing::info!(
                        template = name,
                        path = %path.display(),
                        "using template override"
                    );
                    std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?
                }
                _ => (*embedded).to_string(),
            };
            env.add_template_owned(*name, source)
                .map_err(|source| Error::Render {
                    template: name.to_string(),
                    source,
                })?;
        }

        Ok(Self { env })
    }

    /// Render a template by name with the given variables
    pub fn render<S: Serialize>(&self, name: &str, variables: S) -> Result<String> {
        let to_error = |source| Error::Render {
            template: name.to_string(),
            source,
        };
        let template = self.env.get_template(name).map_err(to_error)?;
        template.render(variables).map_err(to_error)
    }

    /// Names of all known templates
    pub fn template_names() -> impl Iterator<Item = &'static str> {
        TEMPLATES.iter().map(|(name, _)| *name)
    }
}

/// Escape a value for use inside a double-quoted shell string
fn bash_escape(value: String) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '$' | '`' | '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
