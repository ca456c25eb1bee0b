/// Letters permitted on domestic plates: only the Cyrillic letters that have
/// a Latin look-alike are ever issued.
const DOMESTIC_LETTERS: &str = "АВЕКМНОРСТУХ";

/// A pattern describing the character-class and length structure of a valid
/// plate string. Grammars are tried in [`PlateGrammar::PRIORITY`] order;
/// validity is the OR across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateGrammar {
    /// Domestic format: letter, 3 digits, 2 letters, 2-3 region digits
    /// (e.g. "А123ВС77"). Matches as a prefix; trailing characters are
    /// tolerated.
    Domestic,
    /// Fallback: a leading run of 4-10 uppercase Latin letters or digits.
    Generic,
}

impl PlateGrammar {
    pub const PRIORITY: [PlateGrammar; 2] = [PlateGrammar::Domestic, PlateGrammar::Generic];

    pub fn matches(&self, text: &str) -> bool {
        match self {
            PlateGrammar::Domestic => matches_domestic(text),
            PlateGrammar::Generic => matches_generic(text),
        }
    }
}

/// True if the normalized text matches any known plate grammar.
pub fn is_plate(text: &str) -> bool {
    PlateGrammar::PRIORITY
        .iter()
        .any(|grammar| grammar.matches(text))
}

fn is_domestic_letter(c: char) -> bool {
    DOMESTIC_LETTERS.contains(c)
}

fn matches_domestic(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 8 {
        return false;
    }
    // letter, digit x3, letter x2, then at least the two mandatory region
    // digits; a third region digit or any trailing text may follow.
    is_domestic_letter(chars[0])
        && chars[1..4].iter().all(|c| c.is_ascii_digit())
        && chars[4..6].iter().all(|c| is_domestic_letter(*c))
        && chars[6..8].iter().all(|c| c.is_ascii_digit())
}

fn matches_generic(text: &str) -> bool {
    let run = text
        .chars()
        .take_while(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .count();
    (4..=10).contains(&run)
}
