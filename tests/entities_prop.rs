//! Property-based tests for the entity codec.

use proptest::prelude::*;
use xmlfold::{decode_entities, encode_attrib_entities, encode_entities};

proptest! {
    /// Any string survives a full attribute-width encode/decode cycle.
    #[test]
    fn attrib_encode_decode_round_trip(s in "\\PC*") {
        let encoded = encode_attrib_entities(&s);
        let decoded = decode_entities(&encoded);
        prop_assert_eq!(decoded.as_ref(), s.as_str());
    }

    /// Text-width encoding also round-trips (quotes pass untouched).
    #[test]
    fn text_encode_decode_round_trip(s in "\\PC*") {
        let encoded = encode_entities(&s);
        let decoded = decode_entities(&encoded);
        prop_assert_eq!(decoded.as_ref(), s.as_str());
    }

    /// Encoded text contains no unescaped markup-significant bytes.
    #[test]
    fn encoded_text_is_markup_clean(s in "\\PC*") {
        let encoded = encode_entities(&s);
        prop_assert!(!encoded.contains('<'));
        prop_assert!(!encoded.contains('>'));
        // Every remaining '&' must open a recognized escape
        for (i, _) in encoded.match_indices('&') {
            let rest = &encoded[i..];
            prop_assert!(
                rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;"),
                "bare ampersand in {encoded:?}"
            );
        }
    }

    /// Decoding never fails and never grows the input.
    #[test]
    fn decode_is_total_and_shrinking(s in "\\PC*") {
        let decoded = decode_entities(&s);
        prop_assert!(decoded.len() <= s.len());
    }

    /// A parse/compose cycle preserves arbitrary text content.
    #[test]
    fn parsed_text_survives_compose(s in "[ -~]*") {
        let trimmed = s.trim();
        let xml = format!("<t>{}</t>", encode_entities(&s));
        let tree = xmlfold::parse(&xml).unwrap();
        prop_assert_eq!(tree.as_text(), Some(trimmed));

        let composed = xmlfold::stringify(&tree, "t");
        let reparsed = xmlfold::parse(&composed).unwrap();
        prop_assert_eq!(reparsed.as_text(), Some(trimmed));
    }
}
