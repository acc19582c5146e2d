//! コマンドラインのエントリポイント: プロジェクトのカタログから 1 件のメッセージを解決する
//!
//! Usage: `i18n-resolver <id> [locale] [category] [name=value ...]`

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use i18n_resolver::config::ConfigManager;
use i18n_resolver::event::TracingSink;
use i18n_resolver::formatter::PlaceholderFormatter;
use i18n_resolver::store::JsonCatalogStore;
use i18n_resolver::{
    ResolveOptions,
    Translator,
};
use tracing_subscriber::EnvFilter;

/// 使い方
const USAGE: &str = "usage: i18n-resolver <id> [locale] [category] [name=value ...]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// 引数を解釈し、1 件のメッセージを解決して標準出力に書く
fn run(mut args: impl Iterator<Item = String>) -> Result<(), Box<dyn std::error::Error>> {
    let id = args.next().ok_or(USAGE)?;
    let mut options = ResolveOptions::new();
    if let Some(locale) = args.next().filter(|locale| !locale.is_empty()) {
        options = options.with_locale(locale);
    }
    if let Some(category) = args.next().filter(|category| !category.is_empty()) {
        options = options.with_category(category);
    }
    for parameter in args {
        let (name, value) = parameter
            .split_once('=')
            .ok_or_else(|| format!("parameter '{parameter}' is not name=value\n{USAGE}"))?;
        options = options.with_parameter(name, value);
    }

    let mut config = ConfigManager::new();
    config.load_settings(Some(std::env::current_dir()?))?;
    let settings = config.get_settings();

    let store =
        Arc::new(JsonCatalogStore::new(config.catalog_directory(), &settings.catalog.key_separator));
    let translator = Translator::from_settings(settings, store, Arc::new(TracingSink))?
        .with_formatter(Arc::new(PlaceholderFormatter));

    let text = translator.resolve(&id, &options)?;
    writeln!(std::io::stdout().lock(), "{text}")?;
    Ok(())
}
