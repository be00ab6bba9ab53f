use super::HarmonyClass;

/// Marker written in place of a word-initial `a`.
pub const VOWEL_INITIAL_MARKER: char = 'آ';

/// Script form of one Latin letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Fixed(char),
    /// Harmony-sensitive letter: `back` for back-vowel words, `front` otherwise.
    Harmonic { back: char, front: char },
}

impl Glyph {
    pub fn select(self, harmony: HarmonyClass) -> char {
        match self {
            Glyph::Fixed(c) => c,
            Glyph::Harmonic { back, front } => match harmony {
                HarmonyClass::Back => back,
                HarmonyClass::Front => front,
            },
        }
    }
}

/// Look up the glyph for an already-lowercased Latin letter.
///
/// Returns `None` for anything outside the table; callers pass such
/// characters through unchanged.
pub fn glyph(c: char) -> Option<Glyph> {
    let g = match c {
        'a' => Glyph::Harmonic {
            back: 'ا',
            front: 'ه',
        },
        'g' => Glyph::Harmonic {
            back: 'غ',
            front: 'گ',
        },
        'k' => Glyph::Harmonic {
            back: 'ق',
            front: 'ك',
        },
        's' => Glyph::Harmonic {
            back: 'ص',
            front: 'س',
        },
        't' => Glyph::Harmonic {
            back: 'ط',
            front: 'ت',
        },
        'b' => Glyph::Fixed('ب'),
        'c' => Glyph::Fixed('ج'),
        'ç' => Glyph::Fixed('چ'),
        'd' => Glyph::Fixed('د'),
        'e' => Glyph::Fixed('ه'),
        'f' => Glyph::Fixed('ف'),
        'ğ' => Glyph::Fixed('غ'),
        'h' => Glyph::Fixed('ه'),
        'ı' => Glyph::Fixed('ى'),
        'i' => Glyph::Fixed('ي'),
        'j' => Glyph::Fixed('ژ'),
        'l' => Glyph::Fixed('ل'),
        'm' => Glyph::Fixed('م'),
        'n' => Glyph::Fixed('ن'),
        'o' | 'ö' | 'u' | 'ü' | 'v' => Glyph::Fixed('و'),
        'p' => Glyph::Fixed('پ'),
        'r' => Glyph::Fixed('ر'),
        'ş' => Glyph::Fixed('ش'),
        'y' => Glyph::Fixed('ي'),
        'z' => Glyph::Fixed('ز'),
        'â' => Glyph::Fixed('ا'),
        'î' => Glyph::Fixed('ي'),
        'û' => Glyph::Fixed('و'),
        _ => return None,
    };
    Some(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "abcçdefgğhıijklmnoöprsştuüvyzâîû";

    #[test]
    fn test_every_turkish_letter_is_mapped() {
        for c in ALPHABET.chars() {
            assert!(glyph(c).is_some(), "no glyph for {c:?}");
        }
    }

    #[test]
    fn test_harmonic_letters() {
        let harmonic: String = ALPHABET
            .chars()
            .filter(|&c| matches!(glyph(c), Some(Glyph::Harmonic { .. })))
            .collect();
        assert_eq!(harmonic, "agkst");
    }

    #[test]
    fn test_select_by_harmony() {
        let k = glyph('k').unwrap();
        assert_eq!(k.select(HarmonyClass::Back), 'ق');
        assert_eq!(k.select(HarmonyClass::Front), 'ك');
        let n = glyph('n').unwrap();
        assert_eq!(n.select(HarmonyClass::Back), 'ن');
        assert_eq!(n.select(HarmonyClass::Front), 'ن');
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(glyph('1'), None);
        assert_eq!(glyph('-'), None);
        assert_eq!(glyph('q'), None);
        assert_eq!(glyph('K'), None);
        assert_eq!(glyph('ك'), None);
    }
}
