//! Docker Compose stack: web server, PHP, database and phpMyAdmin
//!
//! Answers are stored flat in the fragment; the service definitions written to
//! `docker-compose.yml` are derived from them at execution time.

use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::module::{ExecContext, Module, SummaryEntry};
use crate::options::{display_value, Fragment, FragmentView, OptionsStore};
use crate::prompt::{ask, Prompter, Question};
use crate::validate;

use super::{project_info, wordpress};

pub const SLUG: &str = "docker_compose";

const WEB_SERVERS: &[&str] = &["apache", "nginx"];
const PHP_VERSIONS: &[&str] = &["7.2", "7.1", "7.0", "5.6", "5.5", "5.4"];
const DB_MANAGERS: &[&str] = &["mariadb", "mysql"];

/// Keys kept out of exported configuration files
const SECRET_KEYS: &[&str] = &["db_root_password"];

/// Port the database listens on inside the compose network
const DB_INTERNAL_PORT: u16 = 3306;

const DB_SERVICE: &str = "mysql";

const PHPMYADMIN_PORT: &str = "8080:80";

#[derive(Debug, Clone, Copy, Default)]
pub struct DockerCompose;

/// Versions offered for a database manager, with the default first
fn db_versions(db: &str) -> (&'static [&'static str], &'static str) {
    match db {
        "mysql" => (&["8.0", "5.7", "5.6", "5.5"], "5.7"),
        _ => (&["10.4", "10.3", "10.2", "10.1", "10.0"], "10.4"),
    }
}

/// Default database name: the project slug as an SQL identifier
fn default_db_name(store: &OptionsStore) -> String {
    store
        .require_str(project_info::SLUG, "project_slug")
        .map(|slug| slug.replace('-', "_"))
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "wp".to_string())
}

fn ask_port(prompter: &mut dyn Prompter, prompt: &str, default: u16) -> Result<u16> {
    let answer = ask(
        prompter,
        &Question::new(prompt)
            .default_value(default.to_string())
            .validator(validate::port),
    )?;
    validate::parse_port(&answer).map_err(|e| Error::InvalidInput {
        field: prompt.to_string(),
        attempts: 1,
        reason: e.to_string(),
    })
}

impl Module for DockerCompose {
    fn name(&self) -> &'static str {
        "Docker Compose"
    }

    fn slug(&self) -> &'static str {
        SLUG
    }

    fn run(&self, prompter: &mut dyn Prompter, store: &OptionsStore) -> Result<Fragment> {
        let mut fragment = Fragment::new();

        prompter.section("Web server")?;
        let webserver = ask(
            prompter,
            &Question::new("Which web server do you want to use?")
                .choices(WEB_SERVERS.iter().copied())
                .default_value(WEB_SERVERS[0]),
        )?;
        let webserver_port =
            ask_port(prompter, "Which port number should the web server use?", 80)?;
        let php_version = ask(
            prompter,
            &Question::new("Which version of PHP do you want to use?")
                .choices(PHP_VERSIONS.iter().copied())
                .default_value(PHP_VERSIONS[0]),
        )?;
        fragment.insert("webserver".into(), Value::String(webserver));
        fragment.insert("webserver_port".into(), json!(webserver_port));
        fragment.insert("php_version".into(), Value::String(php_version));

        prompter.section("Database")?;
        let db = ask(
            prompter,
            &Question::new("Which database manager should the project use?")
                .choices(DB_MANAGERS.iter().copied())
                .default_value(DB_MANAGERS[0]),
        )?;
        let (versions, default_version) = db_versions(&db);
        let db_version = ask(
            prompter,
            &Question::new("Which version of the database manager should the project use?")
                .choices(versions.iter().copied())
                .default_value(default_version),
        )?;
        let db_service_name = ask(
            prompter,
            &Question::new("Docker image for the database")
                .default_value(format!("{}:{}", db, db_version))
                .validator(validate::non_empty),
        )?
        .to_lowercase();
        let db_port = ask_port(prompter, "Which port number should the db server use?", 3306)?;
        let db_name = ask(
            prompter,
            &Question::new("What is the name of the database?")
                .default_value(default_db_name(store))
                .validator(validate::non_empty),
        )?;
        let db_root_password = ask(
            prompter,
            &Question::new("What is the password of the root user?")
                .default_value("wp")
                .validator(validate::non_empty),
        )?;
        fragment.insert("db".into(), Value::String(db));
        fragment.insert("db_version".into(), Value::String(db_version));
        fragment.insert("db_port".into(), json!(db_port));
        fragment.insert("db_service_name".into(), Value::String(db_service_name));
        fragment.insert("db_name".into(), Value::String(db_name));
        fragment.insert("db_root_password".into(), Value::String(db_root_password));

        prompter.section("phpMyAdmin")?;
        let phpmyadmin = prompter.confirm("Do you want to include phpMyAdmin?", true)?;
        fragment.insert("phpmyadmin".into(), Value::Bool(phpmyadmin));

        Ok(fragment)
    }

    fn summarize(&self, fragment: &Fragment) -> Vec<SummaryEntry> {
        [
            ("Web server", "webserver"),
            ("Port", "webserver_port"),
            ("PHP version", "php_version"),
            ("Database", "db"),
            ("Database version", "db_version"),
            ("Database port", "db_port"),
            ("Database service name", "db_service_name"),
            ("Database name", "db_name"),
            ("Database root password", "db_root_password"),
            ("Include phpMyAdmin", "phpmyadmin"),
        ]
        .into_iter()
        .map(|(label, key)| SummaryEntry::new(label, display_value(fragment, key)))
        .collect()
    }

    fn execute(&self, options: &OptionsStore, ctx: &ExecContext<'_>) -> Result<()> {
        let project = options.view(project_info::SLUG)?;
        let wordpress = options.view(wordpress::SLUG)?;
        let stack = options.view(SLUG)?;
        let slug = project.str("project_slug")?;

        let compose = compose_file(&stack)?;
        ctx.write_file(format!("{}/docker-compose.yml", slug), to_yaml(&compose)?)?;

        if let Some(overrides) = compose_override_file(&stack)? {
            ctx.write_file(
                format!("{}/docker-compose.override.yml", slug),
                to_yaml(&overrides)?,
            )?;
        }

        let webserver = stack.str("webserver")?;
        ctx.render_to(
            &format!("docker_compose/vhost/{}", webserver),
            json!({ "port": stack.port("webserver_port")? }),
            format!("{}/development/docker/vhost.conf", slug),
        )?;

        ctx.render_to(
            "docker_compose/php/php-ini-overrides",
            json!({}),
            format!("{}/development/docker/php/php-ini-overrides.ini", slug),
        )?;

        ctx.render_to(
            "docker_compose/wpcli/scripts/entrypoint",
            json!({
                "webserver": webserver,
                "webserver_port": stack.port("webserver_port")?,
                "db_host": DB_SERVICE,
                "db_port": DB_INTERNAL_PORT,
                "db_name": stack.str("db_name")?,
                "db_root_password": stack.str("db_root_password")?,
                "project_name": project.str("project_name")?,
                "wp_db_prefix": wordpress.str("wp_db_prefix")?,
                "wp_user_name": wordpress.str("wp_user_name")?,
                "wp_user_password": wordpress.str("wp_user_password")?,
                "wp_user_email": wordpress.str("wp_user_email")?,
            }),
            format!("{}/development/docker/php/scripts/entrypoint.sh", slug),
        )
    }

    fn export(&self, options: &OptionsStore) -> Fragment {
        let mut fragment = options.fragment(SLUG).cloned().unwrap_or_default();
        for key in SECRET_KEYS {
            fragment.shift_remove(*key);
        }
        fragment
    }
}

fn to_yaml(value: &Value) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| Error::Encode {
        format: "yaml",
        reason: e.to_string(),
    })
}

/// Content of `docker-compose.yml`
pub fn compose_file(stack: &FragmentView<'_>) -> Result<Value> {
    Ok(json!({
        "version": "3",
        "services": Value::Object(services(stack)?),
        "volumes": { "db": {} },
    }))
}

/// Content of `docker-compose.override.yml`, if any optional service is enabled
pub fn compose_override_file(stack: &FragmentView<'_>) -> Result<Option<Value>> {
    if !stack.bool("phpmyadmin")? {
        return Ok(None);
    }

    Ok(Some(json!({
        "version": "3",
        "services": {
            "phpmyadmin": {
                "image": "phpmyadmin/phpmyadmin",
                "environment": [
                    format!("PMA_HOST={}", DB_SERVICE),
                    "PMA_USER=root",
                    format!("PMA_PASSWORD={}", stack.str("db_root_password")?),
                ],
                "restart": "always",
                "ports": [PHPMYADMIN_PORT],
            }
        },
    })))
}

fn services(stack: &FragmentView<'_>) -> Result<Map<String, Value>> {
    let webserver = stack.str("webserver")?;
    let port = stack.port("webserver_port")?;
    let php = stack.str("php_version")?;
    let published = format!("{}:80", port);

    let mut services = Map::new();
    let mut php_service = if webserver == "apache" {
        json!({
            "image": format!("chialab/php-dev:{}-apache", php),
            "ports": [published],
            "volumes": [
                "./:/var/www",
                "./development/docker/vhost.conf:/etc/apache2/sites-enabled/000-default.conf",
            ],
        })
    } else {
        services.insert(
            "nginx".into(),
            json!({
                "image": "nginx:latest",
                "ports": [published],
                "volumes": [
                    "./:/var/www",
                    "./development/docker/vhost.conf:/etc/nginx/conf.d/default.conf",
                ],
                "links": ["php"],
            }),
        );
        json!({
            "image": format!("chialab/php-dev:{}-fpm", php),
            "volumes": ["./:/var/www"],
        })
    };

    if let Some(volumes) = php_service["volumes"].as_array_mut() {
        volumes.push(json!(
            "./development/docker/php/php-ini-overrides.ini:/usr/local/etc/php/conf.d/99-overrides.ini"
        ));
        volumes.push(json!("./development/docker/php/scripts:/scripts"));
    }
    if let Some(service) = php_service.as_object_mut() {
        service.insert("restart".into(), json!("on-failure"));
        service.insert("working_dir".into(), json!("/var/www/html"));
        service.insert("depends_on".into(), json!([DB_SERVICE]));
    }
    services.insert("php".into(), php_service);

    services.insert(
        "wpcli".into(),
        json!({
            "image": format!("chialab/php-dev:{}-fpm", php),
            "volumes": [
                "./:/var/www",
                "./development/docker/php/scripts:/scripts",
                "./development/docker/php/php-ini-overrides.ini:/usr/local/etc/php/conf.d/99-overrides.ini",
            ],
            "entrypoint": ["bash", "/scripts/entrypoint.sh"],
            "working_dir": "/var/www/html",
            "depends_on": [DB_SERVICE],
        }),
    );

    services.insert(
        DB_SERVICE.into(),
        json!({
            "image": stack.str("db_service_name")?,
            "ports": [format!("{}:{}", stack.port("db_port")?, DB_INTERNAL_PORT)],
            "environment": {
                "MYSQL_DATABASE": stack.str("db_name")?,
                "MYSQL_ROOT_PASSWORD": stack.str("db_root_password")?,
            },
            "volumes": ["db:/var/lib/mysql"],
            "healthcheck": {
                "test": "mysql --database=$$MYSQL_DATABASE --password=$$MYSQL_ROOT_PASSWORD --execute=\"SELECT count(table_name) > 0 FROM information_schema.tables;\" --skip-column-names -B",
                "interval": "30s",
                "timeout": "10s",
                "retries": 4,
            },
        }),
    );

    Ok(services)
}
