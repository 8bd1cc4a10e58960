//! Filename sanitizer
//!
//! Turns whatever name a browser sent into something safe to put on disk and
//! in a URL: only `[A-Za-z0-9._-]`, Turkish letters transliterated, no path
//! tricks and no reserved device names.

const FALLBACK_NAME: &str = "file";
const MAX_STEM_LEN: usize = 100;
const MAX_EXTENSION_LEN: usize = 10;

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// ASCII replacement for letters outside the whitelist that have an obvious one.
fn transliterate(c: char) -> Option<&'static str> {
    let replacement = match c {
        'ç' => "c",
        'Ç' => "C",
        'ğ' => "g",
        'Ğ' => "G",
        'ı' => "i",
        'İ' => "I",
        'ö' => "o",
        'Ö' => "O",
        'ş' => "s",
        'Ş' => "S",
        'ü' => "u",
        'Ü' => "U",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ė' | 'Ę' | 'Ě' => "E",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'Į' => "I",
        'ò' | 'ó' | 'ô' | 'õ' | 'ø' | 'ō' | 'ő' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ø' | 'Ō' | 'Ő' => "O",
        'ù' | 'ú' | 'û' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ū' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ñ' | 'ń' | 'ň' => "n",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'ý' | 'ÿ' => "y",
        'Ý' | 'Ÿ' => "Y",
        'ć' | 'č' => "c",
        'Ć' | 'Č' => "C",
        'ś' | 'š' => "s",
        'Ś' | 'Š' => "S",
        'ź' | 'ż' | 'ž' => "z",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ł' => "l",
        'Ł' => "L",
        'ř' => "r",
        'Ř' => "R",
        'ď' => "d",
        'Ď' => "D",
        'ť' => "t",
        'Ť' => "T",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        _ => return None,
    };
    Some(replacement)
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'
}

fn is_edge_junk(c: char) -> bool {
    c == '_' || c == '.'
}

/// Sanitize a user supplied filename.
///
/// The result is never empty, never starts with a dot, never contains `..`,
/// has no leading, trailing or doubled underscores, and never names a reserved
/// device such as `CON` or `LPT1`.
pub fn sanitize_filename(filename: &str) -> String {
    // Browsers on Windows may send the full client path.
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);

    let mut cleaned = String::with_capacity(base.len());
    let mut push = |c: char| match (c, cleaned.chars().last()) {
        ('_', Some('_' | '.')) | ('.', Some('.')) => {}
        ('.', Some('_')) => {
            cleaned.pop();
            cleaned.push('.');
        }
        _ => cleaned.push(c),
    };

    for c in base.chars() {
        if is_allowed(c) {
            push(c);
        } else if let Some(replacement) = transliterate(c) {
            replacement.chars().for_each(&mut push);
        } else if !is_combining_mark(c) {
            push('_');
        }
    }

    let cleaned = limit_length(cleaned.trim_matches(is_edge_junk));

    if cleaned.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    avoid_reserved_name(&cleaned)
}

fn limit_length(name: &str) -> String {
    let (stem, extension) = match name.rfind('.') {
        Some(idx) if name.len() - idx - 1 <= MAX_EXTENSION_LEN => name.split_at(idx),
        _ => (name, ""),
    };
    if stem.len() <= MAX_STEM_LEN {
        return name.to_string();
    }
    // Only ASCII remains at this point, byte slicing is char safe.
    let stem = stem[..MAX_STEM_LEN].trim_end_matches(is_edge_junk);
    format!("{}{}", stem, extension)
}

fn avoid_reserved_name(name: &str) -> String {
    let (stem, rest) = match name.find('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    };
    let upper = stem.to_ascii_uppercase();
    if RESERVED_NAMES.contains(&upper.as_str()) {
        format!("{}_{}{}", stem, FALLBACK_NAME, rest)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_safe(name: &str) {
        assert!(!name.is_empty(), "empty name");
        assert!(
            name.chars().all(is_allowed),
            "unexpected character in {:?}",
            name
        );
        assert!(!name.starts_with('_') && !name.ends_with('_'), "{:?}", name);
        assert!(!name.starts_with('.'), "{:?}", name);
        assert!(!name.contains("__"), "{:?}", name);
        assert!(!name.contains(".."), "{:?}", name);
    }

    #[test]
    fn test_turkish_letters_are_transliterated() {
        assert_eq!(sanitize_filename("Öğrenci Ödevi Çalışma.pdf"), "Ogrenci_Odevi_Calisma.pdf");
        assert_eq!(sanitize_filename("İşlem_ğüşıöç.jpg"), "Islem_gusioc.jpg");
    }

    #[test]
    fn test_other_diacritics_are_folded() {
        assert_eq!(sanitize_filename("résumé.pdf"), "resume.pdf");
        // decomposed e + combining acute accent
        assert_eq!(sanitize_filename("cafe\u{0301}.png"), "cafe.png");
    }

    #[test]
    fn test_special_characters_become_single_underscore() {
        assert_eq!(sanitize_filename("my   file (1)!.pdf"), "my_file_1.pdf");
        assert_eq!(sanitize_filename("__a__b__.txt"), "a_b.txt");
        assert_eq!(sanitize_filename("  spaced out  .jpg"), "spaced_out.jpg");
    }

    #[test]
    fn test_traversal_is_neutralised() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("a..b.pdf"), "a.b.pdf");
        assert_eq!(sanitize_filename(".htaccess"), "htaccess");
    }

    #[test]
    fn test_empty_results_fall_back() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename("???"), "file");
        assert_eq!(sanitize_filename("..."), "file");
        assert_eq!(sanitize_filename("日本語"), "file");
    }

    #[test]
    fn test_reserved_names_get_suffix() {
        assert_eq!(sanitize_filename("CON.pdf"), "CON_file.pdf");
        assert_eq!(sanitize_filename("lpt1"), "lpt1_file");
        assert_eq!(sanitize_filename("aux.tar.gz"), "aux_file.tar.gz");
        assert_eq!(sanitize_filename("console.pdf"), "console.pdf");
    }

    #[test]
    fn test_long_names_are_truncated_keeping_extension() {
        let long = format!("{}.pdf", "a".repeat(300));
        let sanitized = sanitize_filename(&long);
        assert!(sanitized.ends_with(".pdf"));
        assert_eq!(sanitized.len(), MAX_STEM_LEN + 4);
    }

    #[test]
    fn test_outputs_are_always_safe() {
        let inputs = [
            "normal.pdf",
            "  spaced out  .jpg",
            "_._._",
            "-dash-.png",
            "a/b/c/../../d.pdf",
            "%00null\0byte.pdf",
            "emoji 😀 photo.webp",
            "ŞİRKET_RAPORU_2024.PDF",
            "._hidden_.jpg",
            "x_.-_.y",
        ];
        for input in inputs {
            assert_safe(&sanitize_filename(input));
        }
    }
}
