//! Localized UI strings with a default-table fallback.

type StringTable = &'static [(&'static str, &'static str)];

pub const DEFAULT_LOCALE: &str = "en-us";

const DEFAULT_STRINGS: StringTable = &[
    ("PropertyPaneDescription", "Configure all Anchor tags to be displayed"),
    ("WarningHTagRequiredLabel", "Please select any one of the Hx tags"),
    ("H2AnchorTag", "Anchor Title Heading 2"),
    ("H3AnchorTag", "Anchor Title Heading 3"),
    ("H4AnchorTag", "Anchor Title Heading 4"),
    ("IconNameLabel", "Fluent UI Icon Name"),
    ("IgnoreLastAnchorTag", "Ignore last anchor tag"),
    ("IgnoreSecondLastTag", "Ignore second last anchor tag"),
    ("UIIconEmptyValue", "Please provide UI icon for the anchor tag"),
    ("NoAnchorsFound", "No Anchors found in this page"),
    (
        "NoAnchorsFoundDescription",
        "No anchors found in the page!. Please set up some anchors ",
    ),
    ("ToggleNumericLayout", "Change to Numeric layout"),
];

const DE_DE_STRINGS: StringTable = &[
    ("PropertyPaneDescription", "Alle anzuzeigenden Anker konfigurieren"),
    ("WarningHTagRequiredLabel", "Bitte mindestens eine Hx-Überschrift auswählen"),
    ("IconNameLabel", "Fluent UI Symbolname"),
    ("IgnoreLastAnchorTag", "Letzten Anker ignorieren"),
    ("IgnoreSecondLastTag", "Vorletzten Anker ignorieren"),
    ("UIIconEmptyValue", "Bitte ein Symbol für den Anker angeben"),
    ("NoAnchorsFound", "Keine Anker auf dieser Seite gefunden"),
    ("ToggleNumericLayout", "Zur nummerierten Darstellung wechseln"),
];

const FR_FR_STRINGS: StringTable = &[
    ("PropertyPaneDescription", "Configurer les ancres à afficher"),
    ("WarningHTagRequiredLabel", "Veuillez sélectionner au moins un titre Hx"),
    ("UIIconEmptyValue", "Veuillez indiquer une icône pour l'ancre"),
    ("NoAnchorsFound", "Aucune ancre trouvée sur cette page"),
    ("ToggleNumericLayout", "Passer à la présentation numérotée"),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("no translation for `{key}` in locale `{locale}` or the default locale")]
    MissingKey { key: String, locale: String },
}

fn table_for(locale: &str) -> Option<StringTable> {
    match locale.to_ascii_lowercase().replace('_', "-").as_str() {
        "en-us" => Some(DEFAULT_STRINGS),
        "de-de" | "de-ch" => Some(DE_DE_STRINGS),
        "fr-fr" | "fr-ch" => Some(FR_FR_STRINGS),
        _ => None,
    }
}

fn find(table: StringTable, key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Looks `key` up in the table for `locale`, then in the default table.
pub fn lookup(key: &str, locale: &str) -> Result<&'static str, LocaleError> {
    if let Some(value) = table_for(locale).and_then(|table| find(table, key)) {
        return Ok(value);
    }

    find(DEFAULT_STRINGS, key).ok_or_else(|| {
        tracing::warn!(key, locale, "missing translation");
        LocaleError::MissingKey {
            key: key.to_owned(),
            locale: locale.to_owned(),
        }
    })
}
