//! Localized interface messages
//!
//! Messages are Fluent resources for each supported interface language.
//! Lookup falls back to English, then to the message key itself.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

const EN: &str = r#"
searching = Searching...
noResults = No results found.
searchError = Search error.
suggestionPrefix = { $brand }: { $suggestion }
settingsSaved = Settings saved.
settingsReset = Settings restored to defaults.
"#;

const ES: &str = r#"
searching = Buscando...
noResults = No se encontraron resultados.
searchError = Error de búsqueda.
suggestionPrefix = { $brand }: { $suggestion }
settingsSaved = Configuración guardada.
settingsReset = Configuración restablecida.
"#;

const PT_BR: &str = r#"
searching = Pesquisando...
noResults = Nenhum resultado encontrado.
searchError = Erro na pesquisa.
suggestionPrefix = { $brand }: { $suggestion }
settingsSaved = Configurações salvas.
settingsReset = Configurações restauradas.
"#;

/// Interface languages with a message catalog
pub const UI_LANGUAGES: &[&str] = &["en", "es", "pt-BR"];

/// Message catalog for one interface language
pub struct Messages {
    bundle: FluentBundle<FluentResource>,
    fallback: Option<FluentBundle<FluentResource>>,
}

impl Messages {
    /// Catalog for a language code; unsupported languages get English
    pub fn for_language(code: &str) -> Self {
        let language = match_language(code);
        let fallback = (language != "en").then(|| build_bundle("en"));
        Self {
            bundle: build_bundle(language),
            fallback,
        }
    }

    /// Message text for `key`
    pub fn get(&self, key: &str) -> String {
        self.format(key, &[])
    }

    /// Message text for `key` with named arguments
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, *value);
        }
        let args = (!args.is_empty()).then_some(&fluent_args);

        lookup(&self.bundle, key, args)
            .or_else(|| self.fallback.as_ref().and_then(|b| lookup(b, key, args)))
            .unwrap_or_else(|| key.to_string())
    }
}

/// Interface language for a preference or locale code
pub fn match_language(code: &str) -> &'static str {
    let lower = code.trim().to_lowercase();
    let base = lower.split(['-', '_']).next().unwrap_or_default();
    match base {
        "es" => "es",
        "pt" => "pt-BR",
        _ => "en",
    }
}

fn build_bundle(language: &'static str) -> FluentBundle<FluentResource> {
    let source = match language {
        "es" => ES,
        "pt-BR" => PT_BR,
        _ => EN,
    };
    let langid: LanguageIdentifier = language.parse().unwrap_or_default();
    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    bundle.set_use_isolating(false);

    let resource = FluentResource::try_new(source.to_string()).unwrap_or_else(|(resource, errors)| {
        warn!("{} message catalog has {} parse errors", language, errors.len());
        resource
    });
    if let Err(errors) = bundle.add_resource(resource) {
        warn!("{} message catalog has {} conflicts", language, errors.len());
    }
    bundle
}

fn lookup(
    bundle: &FluentBundle<FluentResource>,
    key: &str,
    args: Option<&FluentArgs>,
) -> Option<String> {
    let message = bundle.get_message(key)?;
    let pattern = message.value()?;
    let mut errors = vec![];
    let text = bundle.format_pattern(pattern, args, &mut errors);
    if !errors.is_empty() {
        debug!("Formatting {} produced {} errors", key, errors.len());
    }
    Some(text.into_owned())
}
