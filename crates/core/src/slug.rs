//! URL slug generation.
//!
//! Slugs are derived server-side from plot titles: Cyrillic is
//! transliterated to Latin, the result is lowercased, separators become
//! hyphens, and anything outside `[a-z0-9-]` is dropped. Uniqueness is
//! enforced by the repository layer against `uq_plots_slug`.

/// Transliterate a single lowercase Cyrillic character to its Latin
/// rendering. Returns `None` for characters that are not Cyrillic.
fn transliterate(c: char) -> Option<&'static str> {
    let mapped = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' | 'й' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(mapped)
}

/// Derive a URL slug from a human-readable title.
///
/// Rules, applied in order:
/// 1. lowercase;
/// 2. Cyrillic letters transliterated to Latin;
/// 3. whitespace, `_`, and `/` become hyphens;
/// 4. every other character outside `[a-z0-9-]` is dropped;
/// 5. runs of hyphens collapse to one, leading/trailing hyphens trimmed.
///
/// # Examples
///
/// ```
/// use zemli_core::slug::slugify;
///
/// assert_eq!(slugify("Участок у леса"), "uchastok-u-lesa");
/// assert_eq!(slugify("Lake View / Plot #7"), "lake-view-plot-7");
/// ```
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());

    for c in title.to_lowercase().chars() {
        if let Some(mapped) = transliterate(c) {
            out.push_str(mapped);
        } else if c.is_ascii_alphanumeric() || c == '-' {
            out.push(c);
        } else if c.is_whitespace() || c == '_' || c == '/' {
            out.push('-');
        }
        // Everything else is dropped.
    }

    // Collapse hyphen runs and trim.
    let mut slug = String::with_capacity(out.len());
    let mut prev_hyphen = true; // true so leading hyphens are dropped
    for c in out.chars() {
        if c == '-' {
            if !prev_hyphen {
                slug.push('-');
            }
            prev_hyphen = true;
        } else {
            slug.push(c);
            prev_hyphen = false;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}
