//! Canonical parameter string
//!
//! The server recomputes the signature from the parameters it receives, so
//! this rendering must match it byte for byte:
//!
//! - keys in bytewise ascending order at every nesting level
//! - each key immediately followed by its value, no separators
//! - arrays concatenate their elements in their original order
//! - nested maps recurse with the same rule
//! - `Null` entries are dropped together with their key

use cryptocom_types::{ParamValue, Params};

/// Flatten parameters into the string that enters the signature
pub fn canonicalize(params: &Params) -> String {
    let mut out = String::new();
    write_params(params, &mut out);
    out
}

fn write_params(params: &Params, out: &mut String) {
    // Params iterates in key order already
    for (key, value) in params.iter() {
        if value.is_null() {
            continue;
        }
        out.push_str(key);
        write_value(value, out);
    }
}

fn write_value(value: &ParamValue, out: &mut String) {
    match value {
        ParamValue::Null => {}
        ParamValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        ParamValue::Int(i) => out.push_str(&i.to_string()),
        ParamValue::Decimal(d) => out.push_str(&d.to_string()),
        ParamValue::String(s) => out.push_str(s),
        ParamValue::Array(items) => {
            for item in items {
                write_value(item, out);
            }
        }
        ParamValue::Map(nested) => write_params(nested, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_golden_vector() {
        let params = Params::new().with("page", 0).with("currency", "BTC");
        assert_eq!(canonicalize(&params), "currencyBTCpage0");
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(canonicalize(&Params::new()), "");
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a = Params::try_from(json!({
            "instrument_name": "BTC_USDT",
            "side": "BUY",
            "quantity": 1,
            "nested": {"z": true, "a": "x"},
        }))
        .unwrap();
        let b = Params::new()
            .with("nested", Params::new().with("a", "x").with("z", true))
            .with("quantity", 1)
            .with("side", "BUY")
            .with("instrument_name", "BTC_USDT");

        assert_eq!(canonicalize(&a), canonicalize(&b));
        assert_eq!(
            canonicalize(&a),
            "instrument_nameBTC_USDTnestedaxztruequantity1sideBUY"
        );
    }

    #[test]
    fn test_keys_compare_bytewise() {
        // Uppercase sorts before lowercase, '_' (0x5F) before 'a'
        let params = Params::new().with("a", 1).with("B", 2).with("_c", 3);
        assert_eq!(canonicalize(&params), "B2_c3a1");
    }

    #[test]
    fn test_arrays_keep_element_order() {
        let params = Params::new().with("ids", vec!["c", "a", "b"]);
        assert_eq!(canonicalize(&params), "idscab");
    }

    #[test]
    fn test_array_of_maps_recurses() {
        let params = Params::new().with(
            "order_list",
            ParamValue::Array(vec![
                ParamValue::Map(Params::new().with("side", "SELL").with("price", dec!(2.5))),
                ParamValue::Map(Params::new().with("side", "BUY").with("price", dec!(1))),
            ]),
        );

        assert_eq!(
            canonicalize(&params),
            "order_listprice2.5sideSELLprice1sideBUY"
        );
    }

    #[test]
    fn test_null_fields_are_omitted() {
        let params = Params::new()
            .with("currency", "BTC")
            .with("status", Option::<String>::None)
            .with("nested", Params::new().with("gone", ParamValue::Null).with("kept", 1));

        assert_eq!(canonicalize(&params), "currencyBTCnestedkept1");
    }

    #[test]
    fn test_scalar_rendering() {
        let params = Params::new()
            .with("flag", false)
            .with("neg", -42)
            .with("amount", dec!(0.000100))
            .with("big", dec!(12345678901234567890.5));

        assert_eq!(
            canonicalize(&params),
            "amount0.000100big12345678901234567890.5flagfalseneg-42"
        );
    }

    #[test]
    fn test_empty_string_is_kept() {
        let params = Params::new().with("address_tag", "");
        assert_eq!(canonicalize(&params), "address_tag");
    }
}
