// Locale-aware string ordering for categorical columns and option lists.
//
// Comparison runs in three levels, each consulted only when the previous
// one ties:
// 1. primary: base letters, ignoring accents and case
// 2. secondary: accents (`e` before `é`)
// 3. tertiary: case (lowercase before uppercase)
//
// Spanish tailors the primary level so that `ñ` is its own letter between
// `n` and `o`. Any other language uses the plain folded order.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tailoring {
    Spanish,
    Root,
}

/// Comparator for user-visible text under a fixed locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collator {
    tailoring: Tailoring,
}

impl Collator {
    /// Build a collator from a tag such as `es`, `es-CO` or `en_US`.
    pub fn for_locale(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let tailoring = match language.as_str() {
            "es" => Tailoring::Spanish,
            _ => Tailoring::Root,
        };
        Collator { tailoring }
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        let l: Vec<Weights> = left.chars().map(|ch| self.weights(ch)).collect();
        let r: Vec<Weights> = right.chars().map(|ch| self.weights(ch)).collect();

        l.iter()
            .map(|w| w.primary)
            .cmp(r.iter().map(|w| w.primary))
            .then_with(|| l.iter().map(|w| w.secondary).cmp(r.iter().map(|w| w.secondary)))
            .then_with(|| l.iter().map(|w| w.tertiary).cmp(r.iter().map(|w| w.tertiary)))
            // Distinct strings that fold identically still need a stable order.
            .then_with(|| left.cmp(right))
    }

    /// Sort and dedupe, the way filter option lists are built.
    pub fn unique_sorted<I, S>(&self, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = values.into_iter().map(Into::into).collect();
        out.sort_by(|a, b| self.compare(a, b));
        out.dedup();
        out
    }

    fn weights(&self, ch: char) -> Weights {
        let (base, accent) = strip_diacritic(ch);
        let lower = base.to_lowercase().next().unwrap_or(base);
        let tertiary = u8::from(ch.is_uppercase());

        // Primary weights are spaced by two so a tailored letter can sit
        // directly after its base letter.
        let primary = match (self.tailoring, ch) {
            (Tailoring::Spanish, 'ñ' | 'Ñ') => (u32::from('n') << 1) | 1,
            _ => u32::from(lower) << 1,
        };
        let secondary = match (self.tailoring, ch) {
            (Tailoring::Spanish, 'ñ' | 'Ñ') => 0,
            _ => accent,
        };
        Weights {
            primary,
            secondary,
            tertiary,
        }
    }
}

impl Default for Collator {
    fn default() -> Self {
        Collator {
            tailoring: Tailoring::Spanish,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Weights {
    primary: u32,
    secondary: u8,
    tertiary: u8,
}

/// Base letter and accent class for the Latin-1 letters used in Spanish and
/// neighbouring languages. Accent classes: 0 none, 1 acute, 2 grave,
/// 3 circumflex, 4 diaeresis, 5 tilde, 6 other.
fn strip_diacritic(ch: char) -> (char, u8) {
    match ch {
        'á' => ('a', 1),
        'Á' => ('A', 1),
        'à' => ('a', 2),
        'À' => ('A', 2),
        'â' => ('a', 3),
        'Â' => ('A', 3),
        'ä' => ('a', 4),
        'Ä' => ('A', 4),
        'ã' => ('a', 5),
        'Ã' => ('A', 5),
        'å' => ('a', 6),
        'Å' => ('A', 6),
        'ç' => ('c', 6),
        'Ç' => ('C', 6),
        'é' => ('e', 1),
        'É' => ('E', 1),
        'è' => ('e', 2),
        'È' => ('E', 2),
        'ê' => ('e', 3),
        'Ê' => ('E', 3),
        'ë' => ('e', 4),
        'Ë' => ('E', 4),
        'í' => ('i', 1),
        'Í' => ('I', 1),
        'ì' => ('i', 2),
        'Ì' => ('I', 2),
        'î' => ('i', 3),
        'Î' => ('I', 3),
        'ï' => ('i', 4),
        'Ï' => ('I', 4),
        'ñ' => ('n', 5),
        'Ñ' => ('N', 5),
        'ó' => ('o', 1),
        'Ó' => ('O', 1),
        'ò' => ('o', 2),
        'Ò' => ('O', 2),
        'ô' => ('o', 3),
        'Ô' => ('O', 3),
        'ö' => ('o', 4),
        'Ö' => ('O', 4),
        'õ' => ('o', 5),
        'Õ' => ('O', 5),
        'ú' => ('u', 1),
        'Ú' => ('U', 1),
        'ù' => ('u', 2),
        'Ù' => ('U', 2),
        'û' => ('u', 3),
        'Û' => ('U', 3),
        'ü' => ('u', 4),
        'Ü' => ('U', 4),
        'ý' => ('y', 1),
        'Ý' => ('Y', 1),
        'ÿ' => ('y', 4),
        _ => (ch, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(collator: Collator, words: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        v.sort_by(|a, b| collator.compare(a, b));
        v
    }

    #[test]
    fn spanish_places_enye_after_n() {
        let es = Collator::for_locale("es-CO");
        assert_eq!(
            sorted(es, &["oso", "ñandú", "nube"]),
            vec!["nube", "ñandú", "oso"]
        );
    }

    #[test]
    fn root_folds_enye_into_n() {
        let root = Collator::for_locale("en");
        assert_eq!(root.compare("ñb", "nc"), Ordering::Less);
    }

    #[test]
    fn accents_and_case_only_break_ties() {
        let es = Collator::default();
        assert_eq!(
            sorted(es, &["Ávila", "avion", "Banco", "árbol", "azul"]),
            vec!["árbol", "Ávila", "avion", "azul", "Banco"]
        );
        assert_eq!(es.compare("e", "é"), Ordering::Less);
        assert_eq!(es.compare("a", "A"), Ordering::Less);
        assert_eq!(es.compare("Banco", "Banco"), Ordering::Equal);
    }

    #[test]
    fn byte_order_is_not_used_for_case() {
        let es = Collator::default();
        // Raw bytes would put "Zeta" before "alfa".
        assert_eq!(es.compare("alfa", "Zeta"), Ordering::Less);
    }

    #[test]
    fn unique_sorted_dedupes() {
        let es = Collator::default();
        assert_eq!(
            es.unique_sorted(["S2", "S1", "S2", "S10"]),
            vec!["S1", "S10", "S2"]
        );
    }
}
