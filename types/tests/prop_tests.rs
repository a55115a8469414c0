use proptest::prelude::*;

use zkid_types::{
    AccountAddress, AttributeType, FieldElement, Hash256, Timestamp, VerificationLevel,
};

proptest! {
    /// Hash256::is_zero is true only for all-zero bytes.
    #[test]
    fn hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let hash = Hash256::new(bytes);
        prop_assert_eq!(hash.is_zero(), bytes == [0u8; 32]);
    }

    /// Hash256 survives its own hex display.
    #[test]
    fn hash_display_parses_back(bytes in prop::array::uniform32(0u8..)) {
        let hash = Hash256::new(bytes);
        let parsed: Hash256 = hash.to_string().parse().unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// Hash256 bincode serialization roundtrip.
    #[test]
    fn hash_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = Hash256::new(bytes);
        let encoded = bincode::serialize(&hash).unwrap();
        let decoded: Hash256 = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, hash);
    }

    /// Addresses parse from their display form regardless of case.
    #[test]
    fn address_display_parses_back(bytes in prop::array::uniform20(0u8..)) {
        let addr = AccountAddress::new(bytes);
        let shown = addr.to_string();
        prop_assert_eq!(shown.len(), 42);
        prop_assert_eq!(shown.parse::<AccountAddress>().unwrap(), addr);
        let upper = shown.to_uppercase().replacen("0X", "0x", 1);
        prop_assert_eq!(upper.parse::<AccountAddress>().unwrap(), addr);
    }

    /// Field elements built from u128 print the same decimal as the integer.
    #[test]
    fn field_decimal_matches_u128(v in any::<u128>()) {
        let fe = FieldElement::from_u128(v);
        prop_assert_eq!(fe.to_dec_string(), v.to_string());
        prop_assert_eq!(FieldElement::from_dec_str(&v.to_string()).unwrap(), fe);
    }

    /// Big-endian bytes order field elements like the integers they encode.
    #[test]
    fn field_ordering_matches_integers(a in any::<u128>(), b in any::<u128>()) {
        let fa = FieldElement::from_u128(a);
        let fb = FieldElement::from_u128(b);
        prop_assert_eq!(fa.cmp(&fb), a.cmp(&b));
    }

    /// Any 32 bytes survive the decimal representation.
    #[test]
    fn field_decimal_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let fe = FieldElement::new(bytes);
        let back = FieldElement::from_dec_str(&fe.to_dec_string()).unwrap();
        prop_assert_eq!(back, fe);
    }

    /// Field elements in JSON are decimal strings.
    #[test]
    fn field_json_is_decimal(v in any::<u64>()) {
        let json = serde_json::to_string(&FieldElement::from_u64(v)).unwrap();
        prop_assert_eq!(json, format!("\"{v}\""));
    }

    /// Attribute codes below seven decode; everything else is rejected.
    #[test]
    fn attribute_code_range(code in any::<u8>()) {
        let parsed = AttributeType::try_from(code);
        prop_assert_eq!(parsed.is_ok(), code < 7);
        if let Ok(attr) = parsed {
            prop_assert_eq!(attr.code(), code);
        }
    }

    /// Level codes below four decode and preserve ordering.
    #[test]
    fn level_code_order(a in 0u8..4, b in 0u8..4) {
        let la = VerificationLevel::try_from(a).unwrap();
        let lb = VerificationLevel::try_from(b).unwrap();
        prop_assert_eq!(la.cmp(&lb), a.cmp(&b));
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// A timestamp is "future" only when strictly beyond the tolerance.
    #[test]
    fn timestamp_future_tolerance(
        now in 0u64..1_000_000,
        ahead in 0u64..1_000,
        tol in 0u64..1_000,
    ) {
        let ts = Timestamp::new(now + ahead);
        prop_assert_eq!(ts.is_future(Timestamp::new(now), tol), ahead > tol);
    }
}
