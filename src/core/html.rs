// src/core/html.rs
//
// Just enough HTML handling for spreadsheet cells exported from a web LMS:
// entity decoding and tag stripping. No DOM, no regex.

/// Named entities seen in question banks. Anything else is left verbatim.
const NAMED: &[(&str, char)] = &[
    ("amp", '&'), ("lt", '<'), ("gt", '>'), ("quot", '"'), ("apos", '\''),
    ("nbsp", '\u{a0}'), ("ndash", '–'), ("mdash", '—'), ("hellip", '…'),
    ("lsquo", '‘'), ("rsquo", '’'), ("ldquo", '“'), ("rdquo", '”'),
    ("laquo", '«'), ("raquo", '»'), ("ordf", 'ª'), ("ordm", 'º'), ("deg", '°'),
    ("sect", '§'), ("para", '¶'), ("middot", '·'), ("bull", '•'), ("copy", '©'),
    ("reg", '®'), ("euro", '€'), ("cent", '¢'), ("pound", '£'),
    ("aacute", 'á'), ("Aacute", 'Á'), ("agrave", 'à'), ("Agrave", 'À'),
    ("acirc", 'â'), ("Acirc", 'Â'), ("atilde", 'ã'), ("Atilde", 'Ã'),
    ("auml", 'ä'), ("Auml", 'Ä'),
    ("eacute", 'é'), ("Eacute", 'É'), ("egrave", 'è'), ("Egrave", 'È'),
    ("ecirc", 'ê'), ("Ecirc", 'Ê'), ("euml", 'ë'),
    ("iacute", 'í'), ("Iacute", 'Í'), ("igrave", 'ì'), ("icirc", 'î'), ("iuml", 'ï'),
    ("oacute", 'ó'), ("Oacute", 'Ó'), ("ograve", 'ò'), ("ocirc", 'ô'), ("Ocirc", 'Ô'),
    ("otilde", 'õ'), ("Otilde", 'Õ'), ("ouml", 'ö'),
    ("uacute", 'ú'), ("Uacute", 'Ú'), ("ugrave", 'ù'), ("ucirc", 'û'), ("uuml", 'ü'),
    ("ccedil", 'ç'), ("Ccedil", 'Ç'), ("ntilde", 'ñ'), ("Ntilde", 'Ñ'),
];

// Longest name in NAMED plus slack for numeric forms like "#x1F600".
const MAX_ENTITY_LEN: usize = 10;

fn lookup_named(name: &str) -> Option<char> {
    NAMED.iter().find(|(n, _)| *n == name).map(|&(_, c)| c)
}

fn decode_numeric(body: &str) -> Option<char> {
    let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        body.parse::<u32>().ok()?
    };
    // NUL and surrogates are not characters we want to produce
    if code == 0 { return None; }
    char::from_u32(code)
}

/// Decode `&name;`, `&#NN;` and `&#xHH;`. Unknown or malformed references
/// are copied through untouched.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let decoded = tail
            .find(';')
            .filter(|&semi| semi > 0 && semi <= MAX_ENTITY_LEN)
            .and_then(|semi| {
                let body = &tail[..semi];
                let ch = match body.strip_prefix('#') {
                    Some(num) => decode_numeric(num),
                    None => lookup_named(body),
                };
                ch.map(|c| (c, semi))
            });

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Remove `<...>` tags. A tag needs at least one character between the
/// brackets and a closing `>`; a lone `<` (as in "a < b") is kept.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => {
                rest = &after[close + 1..];
            }
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&quot;x&quot;"), "\"x\"");
        assert_eq!(decode_entities("S&atilde;o Paulo"), "São Paulo");
        assert_eq!(decode_entities("&#231;&#xE3;o"), "ção");
        assert_eq!(decode_entities("&#X41;"), "A");
    }

    #[test]
    fn leaves_unknown_references() {
        assert_eq!(decode_entities("R&D"), "R&D");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_entities("&;"), "&;");
        assert_eq!(decode_entities("&#0;"), "&#0;");
        assert_eq!(decode_entities("fim &"), "fim &");
    }

    #[test]
    fn decodes_only_one_level() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn strips_tags_but_keeps_comparisons() {
        assert_eq!(strip_tags("<p>Olá <b>mundo</b></p>"), "Olá mundo");
        assert_eq!(strip_tags("a < b"), "a < b");
        assert_eq!(strip_tags("a <> b"), "a <> b");
        assert_eq!(strip_tags("x<br/>y"), "xy");
        assert_eq!(strip_tags("dangling <b"), "dangling <b");
    }
}
