//! End-to-end extraction scenarios over the full pipeline.

use pretty_assertions::assert_eq;

use donhang_core::{extract_order, normalize_amount, OrderParser, Policy};

#[test]
fn full_message_with_product_name_phone_and_address() {
    let parsed =
        extract_order("Gửi son cho Thuỷ 0922001100, 103A Nguyễn Hữu Cảnh, Q. Bình Thạnh");

    assert_eq!(parsed.order.phone.as_deref(), Some("0922001100"));

    let name = parsed.order.name.as_deref().unwrap();
    assert!(name.contains("Thuỷ"), "name was {name:?}");

    let product = parsed.order.product.as_deref().unwrap();
    assert!(product.contains("son"), "product was {product:?}");

    let address = parsed.order.address.as_deref().unwrap();
    assert!(
        address.contains("103A Nguyễn Hữu Cảnh"),
        "address was {address:?}"
    );
    let raw_address = parsed.raw.address.as_deref().unwrap();
    assert!(
        raw_address.contains("Bình Thạnh"),
        "raw address was {raw_address:?}"
    );
}

#[test]
fn advanced_policy_handles_the_same_message() {
    let parser = OrderParser::new().with_policy(Policy::Advanced);
    let parsed = parser
        .parse("Gửi son cho Thuỷ 0922001100, 103A Nguyễn Hữu Cảnh, Q. Bình Thạnh")
        .unwrap();

    assert_eq!(parsed.order.phone.as_deref(), Some("0922001100"));
    assert!(parsed.order.name.as_deref().unwrap().contains("Thuỷ"));
    assert!(parsed.order.product.as_deref().unwrap().contains("son"));
    assert!(parsed
        .raw
        .address
        .as_deref()
        .unwrap()
        .contains("103A Nguyễn Hữu Cảnh"));
}

#[test]
fn money_idioms_normalize_to_integers() {
    assert_eq!(normalize_amount("2 triệu rưỡi"), Some(2_500_000));
    assert_eq!(normalize_amount("150k"), Some(150_000));
    assert_eq!(normalize_amount("1tr5"), Some(1_500_000));
    assert_eq!(normalize_amount("2kg"), Some(2_000));
}

#[test]
fn phone_span_is_removed_from_residual_fields() {
    let parsed = extract_order("sđt 0922.001.100 giao hàng");

    assert_eq!(parsed.order.phone.as_deref(), Some("0922001100"));
    for field in [
        &parsed.order.name,
        &parsed.order.address,
        &parsed.order.product,
    ] {
        if let Some(value) = field {
            assert!(!value.contains("0922"), "phone digits leaked into {value:?}");
        }
    }
}

#[test]
fn lone_amount_near_value_keyword_is_declared_value_not_cod() {
    let parsed = extract_order("hàng dễ vỡ, giá trị 500k");

    assert_eq!(parsed.order.cod, None);
    assert_eq!(parsed.order.value, Some(500_000));
}

#[test]
fn lone_amount_without_keyword_is_cod() {
    let parsed = extract_order("khách lấy áo thun, 350k nhé");

    assert_eq!(parsed.order.cod, Some(350_000));
    assert_eq!(parsed.order.value, None);
}

#[test]
fn generic_order_phrase_is_not_a_product() {
    let parsed = extract_order("gửi đơn hàng này cho chị Hoa, 25 Lê Lợi");

    assert_eq!(parsed.order.product, None);
}

#[test]
fn unit_phrase_keeps_product_content() {
    let parsed = extract_order("2 hộp bánh kem gửi về 103A Nguyễn Hữu Cảnh, Q. Bình Thạnh");

    let product = parsed.order.product.as_deref().unwrap();
    assert!(product.contains("bánh kem"), "product was {product:?}");
    assert_ne!(product, "2 hộp");
}

#[test]
fn every_field_is_defined_for_arbitrary_input() {
    for input in ["", "xin chào", "!!!", "0", "gửi", "về nhà ăn cơm"] {
        let parsed = extract_order(input);
        // Reaching here means a complete record came back; spot-check one
        // field of each half.
        let _ = (&parsed.order.name, &parsed.raw.name);
    }
}

#[test]
fn cod_and_weight_coexist() {
    let parsed = extract_order("thu hộ 2 triệu rưỡi, nặng 2kg, giao về 25 Lê Lợi, Huế");

    assert_eq!(parsed.order.cod, Some(2_500_000));
    assert_eq!(parsed.order.weight, Some(2_000));
    let address = parsed.order.address.as_deref().unwrap();
    assert!(address.contains("25 Lê Lợi"), "address was {address:?}");
}
