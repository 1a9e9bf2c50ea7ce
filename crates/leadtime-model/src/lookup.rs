use std::collections::HashMap;

/// Fold a header or label for loose comparison.
///
/// Lower-cases, strips Spanish accents, drops a leading BOM and collapses
/// internal whitespace, so `"Fecha  Último Estado"` and `"fecha ultimo estado"`
/// compare equal.
pub fn fold_key(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut out = String::with_capacity(trimmed.len());
    let mut last_space = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !last_space && !out.is_empty() {
                out.push(' ');
            }
            last_space = true;
            continue;
        }
        last_space = false;
        for lower in ch.to_lowercase() {
            out.push(match lower {
                'á' | 'à' | 'ä' | 'â' => 'a',
                'é' | 'è' | 'ë' | 'ê' => 'e',
                'í' | 'ì' | 'ï' | 'î' => 'i',
                'ó' | 'ò' | 'ö' | 'ô' => 'o',
                'ú' | 'ù' | 'ü' | 'û' => 'u',
                'ñ' => 'n',
                other => other,
            });
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Header names indexed by their folded form.
#[derive(Debug, Clone)]
pub struct HeaderLookup {
    map: HashMap<String, String>,
}

impl HeaderLookup {
    /// The first header wins when two fold to the same key.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            map.entry(fold_key(name))
                .or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// Actual header matching `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&fold_key(name)).map(String::as_str)
    }

    /// First actual header matching any of `aliases`, in alias order.
    pub fn find_any(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|alias| self.get(alias))
    }
}
