//! PIX Payload Integration Tests

use bible_crentech_pix::{parse_fields, verify, Amount, PaymentPayload, PixError};

const BCB_EXAMPLE: &str = "00020126580014br.gov.bcb.pix0136123e4567-e12b-12d1-a456-4266554400005204000053039865802BR5913Fulano de Tal6008BRASILIA62070503***63041D3D";

#[test]
fn test_matches_central_bank_example() {
    let payload = PaymentPayload::new("123e4567-e12b-12d1-a456-426655440000", "Fulano de Tal", "BRASILIA")
        .unwrap();
    assert_eq!(payload.encode(), BCB_EXAMPLE);
    assert!(verify(BCB_EXAMPLE).is_ok());
}

#[test]
fn test_donation_with_amount() {
    let payload = PaymentPayload::new("doacoes@example.com", "Bible Crentech", "Sao Paulo")
        .unwrap()
        .with_amount(Amount::parse("10").unwrap());
    assert_eq!(
        payload.encode(),
        "00020126410014br.gov.bcb.pix0119doacoes@example.com520400005303986540510.005802BR5914Bible Crentech6009Sao Paulo62070503***63040A8B"
    );
}

#[test]
fn test_accented_fields_count_bytes() {
    let payload = PaymentPayload::new("doacoes@example.com", "João da Silva", "São Paulo")
        .unwrap()
        .with_amount(Amount::parse("5,50").unwrap())
        .with_transaction_id("OFERTA01");
    let encoded = payload.encode();
    assert_eq!(
        encoded,
        "00020126410014br.gov.bcb.pix0119doacoes@example.com52040000530398654045.505802BR5914João da Silva6010São Paulo62120508OFERTA016304F78E"
    );

    let fields = verify(&encoded).unwrap();
    let name = fields.iter().find(|f| f.id == "59").unwrap();
    assert_eq!(name.value, "João da Silva");
}

#[test]
fn test_declared_lengths_match_values() {
    let payload = PaymentPayload::new(
        "+5511999999999",
        "Igreja Evangelica Assembleia de Deus",
        "Sao Jose dos Campos",
    )
    .unwrap()
    .with_amount(Amount::from_cents(123_456).unwrap())
    .encode();

    // parse_fields fails on any declared length that does not match.
    let fields = parse_fields(&payload).unwrap();
    let rebuilt: String = fields
        .iter()
        .map(|f| format!("{}{:02}{}", f.id, f.value.len(), f.value))
        .collect();
    assert_eq!(rebuilt, payload);

    for field in &fields {
        if field.id == "26" || field.id == "62" {
            assert!(field.children().is_ok(), "template {}", field.id);
        }
    }
}

#[test]
fn test_encoding_is_deterministic() {
    let build = || {
        PaymentPayload::new("doacoes@example.com", "Bible Crentech", "Sao Paulo")
            .unwrap()
            .with_amount(Amount::parse("25.00").unwrap())
            .encode()
    };
    assert_eq!(build(), build());
}

#[test]
fn test_zero_amount_leaves_value_open() {
    let open = PaymentPayload::new("doacoes@example.com", "Bible Crentech", "Sao Paulo").unwrap();
    let zero = open.clone().with_amount(Amount::ZERO);
    assert_eq!(open.encode(), zero.encode());
    assert!(!zero.encode().contains("5404"));
}

#[test]
fn test_tampered_payload_fails_checksum() {
    let tampered = BCB_EXAMPLE.replace("Fulano", "Ciclano");
    assert!(matches!(
        verify(&tampered),
        Err(PixError::Malformed(_)) | Err(PixError::ChecksumMismatch { .. })
    ));

    let same_length = BCB_EXAMPLE.replace("Fulano", "Beltra");
    assert!(matches!(verify(&same_length), Err(PixError::ChecksumMismatch { .. })));
}
