//! WordPress admin account and database table prefix

use serde_json::Value;

use crate::error::Result;
use crate::module::{ExecContext, Module, SummaryEntry};
use crate::options::{display_value, Fragment, OptionsStore};
use crate::prompt::{ask, Prompter, Question};
use crate::validate;

pub const SLUG: &str = "wordpress_configurator";

/// Keys kept out of exported configuration files
const SECRET_KEYS: &[&str] = &["wp_user_password"];

#[derive(Debug, Clone, Copy, Default)]
pub struct WordPressConfigurator;

impl Module for WordPressConfigurator {
    fn name(&self) -> &'static str {
        "WordPress Configuration"
    }

    fn slug(&self) -> &'static str {
        SLUG
    }

    fn run(&self, prompter: &mut dyn Prompter, _store: &OptionsStore) -> Result<Fragment> {
        let user_name = ask(
            prompter,
            &Question::new("What is the name of the admin account?")
                .default_value("adminwp")
                .validator(validate::non_empty),
        )?;
        let user_email = ask(
            prompter,
            &Question::new("What is the email address of the admin account?")
                .default_value("adminwp@example.com")
                .validator(validate::email),
        )?;
        let user_password = ask(
            prompter,
            &Question::new("What is the admin password?")
                .validator(validate::password)
                .secret(),
        )?;
        let db_prefix = ask(
            prompter,
            &Question::new("The prefix of your database tables?").default_value("wppg_"),
        )?;

        let mut fragment = Fragment::new();
        fragment.insert("wp_user_name".into(), Value::String(user_name));
        fragment.insert("wp_user_email".into(), Value::String(user_email));
        fragment.insert("wp_user_password".into(), Value::String(user_password));
        fragment.insert("wp_db_prefix".into(), Value::String(db_prefix));
        Ok(fragment)
    }

    fn summarize(&self, fragment: &Fragment) -> Vec<SummaryEntry> {
        vec![
            SummaryEntry::new("Admin name", display_value(fragment, "wp_user_name")),
            SummaryEntry::new("Admin email", display_value(fragment, "wp_user_email")),
            SummaryEntry::new("Admin password", display_value(fragment, "wp_user_password")),
            SummaryEntry::new(
                "Table prefix (database)",
                display_value(fragment, "wp_db_prefix"),
            ),
        ]
    }

    fn execute(&self, _options: &OptionsStore, _ctx: &ExecContext<'_>) -> Result<()> {
        // Consumed by the docker_compose entrypoint script.
        Ok(())
    }

    fn export(&self, options: &OptionsStore) -> Fragment {
        let mut fragment = options.fragment(SLUG).cloned().unwrap_or_default();
        for key in SECRET_KEYS {
            fragment.shift_remove(*key);
        }
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::store;
    use crate::prompt::ScriptedPrompter;
    use serde_json::json;

    #[test]
    fn test_run_collects_account() {
        let mut prompter = ScriptedPrompter::new([
            "",
            "not-an-email",
            "me@example.org",
            "short",
            "Aa1!aaaaaaaa",
            "",
        ]);
        let fragment = WordPressConfigurator
            .run(&mut prompter, &OptionsStore::new())
            .unwrap();

        assert_eq!(
            Value::Object(fragment),
            json!({
                "wp_user_name": "adminwp",
                "wp_user_email": "me@example.org",
                "wp_user_password": "Aa1!aaaaaaaa",
                "wp_db_prefix": "wppg_",
            })
        );
        assert_eq!(prompter.warnings().len(), 2);
    }

    #[test]
    fn test_export_omits_password() {
        let options = store(&[(
            SLUG,
            json!({
                "wp_user_name": "adminwp",
                "wp_user_email": "adminwp@example.com",
                "wp_user_password": "Aa1!aaaaaaaa",
                "wp_db_prefix": "wppg_",
            }),
        )]);

        let exported = WordPressConfigurator.export(&options);
        assert!(!exported.contains_key("wp_user_password"));
        assert_eq!(exported.len(), 3);
    }

    #[test]
    fn test_summary_has_four_entries() {
        let options = store(&[(SLUG, json!({"wp_user_name": "adminwp"}))]);
        let entries = WordPressConfigurator.summarize(options.fragment(SLUG).unwrap());

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0], SummaryEntry::new("Admin name", "adminwp"));
    }
}
