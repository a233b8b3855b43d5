//! Localized diagnostic messages.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKey {
    MarksymbolizerParseFailedUnknownWellknownName,
    NoFilterDetected,
    SymbolizerKindParseFailed,
    ColorMapEntriesParseFailedColorUndefined,
    ContrastEnhancParseFailedHistoAndNormalizeMutuallyExclusive,
    #[serde(rename = "channelSelectionParseFailedRGBAndGrayscaleMutuallyExclusive")]
    ChannelSelectionParseFailedRgbAndGrayscaleMutuallyExclusive,
    #[serde(rename = "channelSelectionParseFailedRGBChannelsUndefined")]
    ChannelSelectionParseFailedRgbChannelsUndefined,
}

/// Locale → message templates. Templates reference parameters as `{name}`.
pub type Translations = IndexMap<String, IndexMap<MessageKey, String>>;

pub const DEFAULT_LOCALE: &str = "en";

pub fn default_translations() -> Translations {
    use MessageKey::*;
    let table: [(&str, [(MessageKey, &str); 7]); 3] = [
        (
            "en",
            [
                (
                    MarksymbolizerParseFailedUnknownWellknownName,
                    "MarkSymbolizer cannot be parsed. WellKnownName {wellKnownName} is not supported.",
                ),
                (NoFilterDetected, "No Filter detected."),
                (
                    SymbolizerKindParseFailed,
                    "Failed to parse SymbolizerKind {sldSymbolizerName} from SldRule.",
                ),
                (
                    ColorMapEntriesParseFailedColorUndefined,
                    "Cannot parse ColorMapEntries. color is undefined.",
                ),
                (
                    ContrastEnhancParseFailedHistoAndNormalizeMutuallyExclusive,
                    "Cannot parse ContrastEnhancement. Histogram and Normalize are mutually exclusive.",
                ),
                (
                    ChannelSelectionParseFailedRgbAndGrayscaleMutuallyExclusive,
                    "Cannot parse ChannelSelection. RGB and Grayscale are mutually exclusive.",
                ),
                (
                    ChannelSelectionParseFailedRgbChannelsUndefined,
                    "Cannot parse ChannelSelection. Red, Green and Blue channels must be defined.",
                ),
            ],
        ),
        (
            "de",
            [
                (
                    MarksymbolizerParseFailedUnknownWellknownName,
                    "MarkSymbolizer kann nicht geparsed werden. WellKnownName {wellKnownName} wird nicht unterstützt.",
                ),
                (NoFilterDetected, "Kein Filter erkannt."),
                (
                    SymbolizerKindParseFailed,
                    "Der SymbolizerKind {sldSymbolizerName} der SldRule kann nicht geparsed werden.",
                ),
                (
                    ColorMapEntriesParseFailedColorUndefined,
                    "ColorMapEntries können nicht geparsed werden. color ist nicht definiert.",
                ),
                (
                    ContrastEnhancParseFailedHistoAndNormalizeMutuallyExclusive,
                    "ContrastEnhancement kann nicht geparsed werden. Histogram und Normalize schließen sich gegenseitig aus.",
                ),
                (
                    ChannelSelectionParseFailedRgbAndGrayscaleMutuallyExclusive,
                    "ChannelSelection kann nicht geparsed werden. RGB und Grayscale schließen sich gegenseitig aus.",
                ),
                (
                    ChannelSelectionParseFailedRgbChannelsUndefined,
                    "ChannelSelection kann nicht geparsed werden. Red, Green und Blue müssen definiert sein.",
                ),
            ],
        ),
        (
            "fr",
            [
                (
                    MarksymbolizerParseFailedUnknownWellknownName,
                    "Échec de lecture du symbole de type MarkSymbolizer. Le WellKnownName {wellKnownName} n'est pas supporté.",
                ),
                (NoFilterDetected, "Aucun filtre détecté."),
                (
                    SymbolizerKindParseFailed,
                    "Échec de lecture du type de symbole {sldSymbolizerName} à partir de SldRule.",
                ),
                (
                    ColorMapEntriesParseFailedColorUndefined,
                    "Lecture de ColorMapEntries échouée. color n'est pas défini.",
                ),
                (
                    ContrastEnhancParseFailedHistoAndNormalizeMutuallyExclusive,
                    "Échec de lecture de ContrastEnhancement. Histogram et Normalize sont mutuellement exclusifs.",
                ),
                (
                    ChannelSelectionParseFailedRgbAndGrayscaleMutuallyExclusive,
                    "Échec de lecture de ChannelSelection. RGB et Grayscale sont mutuellement exclusifs.",
                ),
                (
                    ChannelSelectionParseFailedRgbChannelsUndefined,
                    "Échec de lecture de ChannelSelection. Red, Green et Blue doivent être définis.",
                ),
            ],
        ),
    ];

    table
        .into_iter()
        .map(|(locale, messages)| {
            let messages = messages
                .into_iter()
                .map(|(key, template)| (key, template.to_string()))
                .collect();
            (locale.to_string(), messages)
        })
        .collect()
}

/// Look up `key` for `locale`, falling back to [`DEFAULT_LOCALE`], and
/// substitute `{name}` parameters.
pub fn translate(
    translations: &Translations,
    locale: &str,
    key: MessageKey,
    params: &[(&str, &str)],
) -> Option<String> {
    let template = translations
        .get(locale)
        .and_then(|m| m.get(&key))
        .or_else(|| translations.get(DEFAULT_LOCALE).and_then(|m| m.get(&key)))?;
    Some(render(template, params))
}

pub fn render(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{}}}", name), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_parameters() {
        assert_eq!(
            render("WellKnownName {wellKnownName} is bad", &[("wellKnownName", "hex")]),
            "WellKnownName hex is bad"
        );
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let t = default_translations();
        assert_eq!(
            translate(&t, "xx", MessageKey::NoFilterDetected, &[]).as_deref(),
            Some("No Filter detected.")
        );
        assert_eq!(
            translate(&t, "de", MessageKey::NoFilterDetected, &[]).as_deref(),
            Some("Kein Filter erkannt.")
        );
    }

    #[test]
    fn every_locale_covers_every_key() {
        let t = default_translations();
        for (_, messages) in &t {
            assert_eq!(messages.len(), 7);
        }
    }
}
