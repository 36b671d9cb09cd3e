//! Line-break repair for run-together characteristics text
//!
//! The characteristics block on product pages renders labels such as
//! "Вес" or "Фасовка" directly after the previous value, so the flattened
//! text reads `Вес500гРазмер упаковки10x10`. [`KeywordBoundaries`] puts
//! each configured label back at the start of its own line.

/// An ordered list of labels that must each start a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordBoundaries {
    keywords: Vec<String>,
}

impl KeywordBoundaries {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(Into::into)
                .filter(|k: &String| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Inserts a newline before every keyword occurrence not already
    /// preceded by one, then trims the result
    ///
    /// Keywords are applied in list order, each over the output of the
    /// previous one.
    pub fn apply(&self, text: &str) -> String {
        let mut repaired = text.to_string();
        for keyword in &self.keywords {
            repaired = break_before(&repaired, keyword);
        }
        repaired.trim().to_string()
    }
}

/// Inserts `\n` before each occurrence of `keyword` that does not follow one
fn break_before(text: &str, keyword: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;

    for (index, _) in text.match_indices(keyword) {
        out.push_str(&text[last..index]);
        if !text[..index].ends_with('\n') {
            out.push('\n');
        }
        last = index;
    }

    out.push_str(&text[last..]);
    out
}

/// Drops blank lines and trims the remaining ones
pub fn clean_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
