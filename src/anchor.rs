//! Heading slugs and render-unique anchors.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Slug used when a title has no alphanumeric characters at all.
const EMPTY_SLUG: &str = "section";

/// Hands out unique anchors for slugs within one render pass.
///
/// The first reservation of a slug returns it unchanged, the Nth returns
/// `slug-N`, skipping any candidate already handed out for another slug
/// (a heading titled `API 2` claims `api-2`). A registry must not outlive the render it belongs to: two
/// documents rendered with separate registries never affect each other's
/// anchors.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    seen: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl AnchorRegistry {
    /// Creates an empty registry for a new render pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next anchor for `slug`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdviewer::AnchorRegistry;
    ///
    /// let mut anchors = AnchorRegistry::new();
    /// assert_eq!(anchors.reserve("usage"), "usage");
    /// assert_eq!(anchors.reserve("usage"), "usage-2");
    /// assert_eq!(anchors.reserve("usage"), "usage-3");
    /// ```
    pub fn reserve(&mut self, slug: &str) -> String {
        let count = self.seen.entry(slug.to_string()).or_default();

        loop {
            *count += 1;
            let candidate = match *count {
                1 => slug.to_string(),
                n => format!("{slug}-{n}"),
            };

            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Converts a heading title to a URL safe slug.
///
/// Lowercases, folds common Latin diacritics to their ASCII base letters,
/// collapses every run of other characters to a single hyphen and trims
/// hyphens from both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        let folded = fold_diacritic(c);
        let mut pushed = false;

        for f in folded.chars() {
            if f.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(f);
                pushed = true;
            }
        }

        if !pushed {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        return EMPTY_SLUG.to_string();
    }

    slug
}

/// Maps a lowercase character to its ASCII transliteration.
///
/// Characters without a known mapping are returned unchanged, which makes
/// non ASCII letters act as separators in [`slugify`].
fn fold_diacritic(c: char) -> Cow<'static, str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ä' | 'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'ö' | 'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ü' => "ue",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        other => return Cow::Owned(other.to_string()),
    };

    Cow::Borrowed(folded)
}
