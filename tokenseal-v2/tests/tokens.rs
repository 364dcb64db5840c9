use blake2::Blake2bMac;
use digest::consts::U24;
use digest::Mac;
use serde::{Deserialize, Serialize};
use tokenseal_core::{base64, token, FixedNonceGenerator, PasetoError, TokenWithFooter};
use tokenseal_json::Json;
use tokenseal_v2::{LocalKey, Paseto, PublicKey, SecretKey};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Claims {
    data: String,
    exp: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct KeyId {
    kid: String,
}

fn claims() -> Json<Claims> {
    Json(Claims {
        data: "this is a secret message".to_string(),
        exp: "2019-01-01T00:00:00+00:00".to_string(),
    })
}

fn local_key() -> LocalKey {
    let bytes =
        hex::decode("707172737475767778797a7b7c7d7e7f808182838485868788898a8b8c8d8e8f").unwrap();
    LocalKey::from_bytes(&bytes).unwrap()
}

fn nonce_material() -> Vec<u8> {
    hex::decode("000102030405060708090a0b0c0d0e0f1011121314151617").unwrap()
}

/// Change one character of the token, avoiding the final base64 quad so the
/// mutated section still decodes.
fn flip_char(token: &str, index: usize) -> String {
    let mut bytes = token.as_bytes().to_vec();
    bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
    String::from_utf8(bytes).unwrap()
}

#[test]
fn local_round_trip() {
    let paseto = Paseto::new();
    let key = LocalKey::random().unwrap();

    let token = paseto.encrypt(&claims(), &key, None).unwrap();
    assert!(token.starts_with("v2.local."));
    assert_eq!(token.split('.').count(), 3);

    let decrypted: Json<Claims> = paseto.decrypt(&token, &key, None).unwrap();
    assert_eq!(decrypted.0, claims().0);
}

#[test]
fn local_round_trip_with_footer() {
    let paseto = Paseto::new();
    let key = local_key();

    let token = paseto.encrypt(&claims(), &key, Some("kid:gandalf0")).unwrap();
    assert_eq!(token.split('.').count(), 4);

    let decrypted: Json<Claims> = paseto.decrypt(&token, &key, Some("kid:gandalf0")).unwrap();
    assert_eq!(decrypted.0, claims().0);

    // the advisory check can be skipped, authentication still covers the footer
    let decrypted: Json<Claims> = paseto.decrypt(&token, &key, None).unwrap();
    assert_eq!(decrypted.0, claims().0);

    assert!(matches!(
        paseto.decrypt::<Json<Claims>>(&token, &key, Some("kid:saruman0")),
        Err(PasetoError::InvalidFooter)
    ));
}

#[test]
fn local_round_trip_empty_message() {
    let paseto = Paseto::new();
    let key = LocalKey::from_raw_bytes([0x33; 32]);

    let token = paseto.encrypt(&String::new(), &key, None).unwrap();
    let decrypted: String = paseto.decrypt(&token, &key, None).unwrap();
    assert_eq!(decrypted, "");
}

#[test]
fn local_rejects_wrong_key() {
    let paseto = Paseto::new();
    let token = paseto.encrypt(&claims(), &local_key(), None).unwrap();

    let other = LocalKey::random().unwrap();
    assert!(matches!(
        paseto.decrypt::<Json<Claims>>(&token, &other, None),
        Err(PasetoError::AuthenticationFailed)
    ));
}

#[test]
fn local_rejects_tampered_payload() {
    let paseto = Paseto::new();
    let key = local_key();
    let token = paseto.encrypt(&claims(), &key, None).unwrap();

    // inside the nonce region of the payload section
    let tampered = flip_char(&token, "v2.local.".len() + 1);
    assert!(matches!(
        paseto.decrypt::<Json<Claims>>(&tampered, &key, None),
        Err(PasetoError::AuthenticationFailed)
    ));
}

#[test]
fn local_rejects_tampered_footer() {
    let paseto = Paseto::new();
    let key = local_key();
    let token = paseto.encrypt(&claims(), &key, Some("kid:gandalf0")).unwrap();

    let footer_start = token.rfind('.').unwrap() + 1;
    let tampered = flip_char(&token, footer_start);

    // the footer is not encrypted, but it is authenticated
    assert!(matches!(
        paseto.decrypt::<Json<Claims>>(&tampered, &key, None),
        Err(PasetoError::AuthenticationFailed)
    ));
    // with a pinned footer the advisory check fires first
    assert!(matches!(
        paseto.decrypt::<Json<Claims>>(&tampered, &key, Some("kid:gandalf0")),
        Err(PasetoError::InvalidFooter)
    ));
}

#[test]
fn local_rejects_tampered_header() {
    let paseto = Paseto::new();
    let key = local_key();
    let token = paseto.encrypt(&claims(), &key, None).unwrap();

    let tampered = token.replacen("v2", "v1", 1);
    match paseto.decrypt::<Json<Claims>>(&tampered, &key, None) {
        Err(PasetoError::InvalidHeader { found, expected }) => {
            assert_eq!(found, "v1.local.");
            assert_eq!(expected, "v2.local.");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn local_token_cannot_be_verified_as_public() {
    let paseto = Paseto::new();
    let key = local_key();
    let pair = paseto.generate_key_pair().unwrap();
    let token = paseto.encrypt(&claims(), &key, None).unwrap();

    assert!(matches!(
        paseto.verify::<Json<Claims>>(&token, &pair.public, None),
        Err(PasetoError::InvalidHeader { .. })
    ));
}

#[test]
fn malformed_section_counts() {
    let paseto = Paseto::new();
    let key = local_key();

    for bad in ["v2.local", "v2.local.a.b.c", "v2", ""] {
        assert!(
            matches!(
                paseto.decrypt::<Json<Claims>>(bad, &key, None),
                Err(PasetoError::MalformedToken)
            ),
            "{bad:?} should be malformed"
        );
    }
}

#[test]
fn malformed_base64_fails_before_crypto() {
    let paseto = Paseto::new();
    let key = local_key();

    assert!(matches!(
        paseto.decrypt::<Json<Claims>>("v2.local.!!!", &key, None),
        Err(PasetoError::MalformedEncoding)
    ));
    assert!(matches!(
        paseto.decrypt::<Json<Claims>>("v2.local.cGF5bG9hZA.!!!", &key, None),
        Err(PasetoError::MalformedEncoding)
    ));
}

#[test]
fn fixed_nonce_encryption_is_deterministic() {
    let key = local_key();
    let paseto =
        Paseto::with_nonce_generator(Box::new(FixedNonceGenerator::new(nonce_material())));

    let a = paseto.encrypt(&claims(), &key, Some("kid:gandalf0")).unwrap();
    let b = paseto.encrypt(&claims(), &key, Some("kid:gandalf0")).unwrap();
    assert_eq!(a, b);

    let decrypted: Json<Claims> = paseto.decrypt(&a, &key, Some("kid:gandalf0")).unwrap();
    assert_eq!(decrypted.0, claims().0);
}

#[test]
fn cipher_nonce_is_derived_from_payload() {
    let key = local_key();
    let material = nonce_material();
    let paseto =
        Paseto::with_nonce_generator(Box::new(FixedNonceGenerator::new(material.clone())));

    let message_a = br#"{"data":"A"}"#;
    let message_b = br#"{"data":"B"}"#;
    let token_a = paseto
        .encrypt(&String::from_utf8(message_a.to_vec()).unwrap(), &key, None)
        .unwrap();
    let token_b = paseto
        .encrypt(&String::from_utf8(message_b.to_vec()).unwrap(), &key, None)
        .unwrap();

    let payload_a = base64::decode(token::split(&token_a).unwrap().payload).unwrap();
    let payload_b = base64::decode(token::split(&token_b).unwrap().payload).unwrap();

    // same generator output, different payloads, different cipher nonces
    assert_ne!(payload_a[..24], payload_b[..24]);

    // and the nonce matches the published derivation formula
    let mut mac: Blake2bMac<U24> = Mac::new_from_slice(&material).unwrap();
    mac.update(message_a);
    assert_eq!(payload_a[..24], mac.finalize().into_bytes()[..]);
}

#[test]
fn public_round_trip() {
    let paseto = Paseto::new();
    let pair = paseto.generate_key_pair().unwrap();

    let token = paseto.sign(&claims(), &pair.secret, None).unwrap();
    assert!(token.starts_with("v2.public."));

    let verified: Json<Claims> = paseto.verify(&token, &pair.public, None).unwrap();
    assert_eq!(verified.0, claims().0);
}

#[test]
fn public_signing_is_deterministic() {
    let paseto = Paseto::new();
    let secret = SecretKey::from_bytes(&[0x42; 32]).unwrap();

    let a = paseto.sign(&claims(), &secret, Some("kid:gandalf0")).unwrap();
    let b = paseto.sign(&claims(), &secret, Some("kid:gandalf0")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn public_rejects_wrong_key() {
    let paseto = Paseto::new();
    let pair = paseto.generate_key_pair().unwrap();
    let other = paseto.generate_key_pair().unwrap();

    let token = paseto.sign(&claims(), &pair.secret, None).unwrap();
    assert!(matches!(
        paseto.verify::<Json<Claims>>(&token, &other.public, None),
        Err(PasetoError::SignatureInvalid)
    ));
}

#[test]
fn public_rejects_tampered_message() {
    let paseto = Paseto::new();
    let pair = paseto.generate_key_pair().unwrap();
    let token = paseto.sign(&claims(), &pair.secret, Some("kid:gandalf0")).unwrap();

    let tampered = flip_char(&token, "v2.public.".len() + 1);
    assert!(matches!(
        paseto.verify::<Json<Claims>>(&tampered, &pair.public, None),
        Err(PasetoError::SignatureInvalid)
    ));
}

#[test]
fn public_rejects_short_payload() {
    let paseto = Paseto::new();
    let pair = paseto.generate_key_pair().unwrap();

    // payload shorter than one signature: a verification failure, not a panic
    let token = format!("v2.public.{}", base64::encode(b"short"));
    assert!(matches!(
        paseto.verify::<Json<Claims>>(&token, &pair.public, None),
        Err(PasetoError::SignatureInvalid)
    ));
}

#[test]
fn footer_returning_variants() {
    let paseto = Paseto::new();
    let key = local_key();
    let footer = Json(KeyId {
        kid: "gandalf0".to_string(),
    });

    let token = paseto.encrypt_with_footer(&claims(), &key, &footer).unwrap();
    let TokenWithFooter { message, footer }: TokenWithFooter<Json<Claims>, Json<KeyId>> =
        paseto.decrypt_with_footer(&token, &key).unwrap();
    assert_eq!(message.0, claims().0);
    assert_eq!(footer.unwrap().0.kid, "gandalf0");

    let pair = paseto.generate_key_pair().unwrap();
    let footer = Json(KeyId {
        kid: "saruman0".to_string(),
    });
    let token = paseto
        .sign_with_footer(&claims(), &pair.secret, &footer)
        .unwrap();
    let TokenWithFooter { message, footer }: TokenWithFooter<Json<Claims>, Json<KeyId>> =
        paseto.verify_with_footer(&token, &pair.public).unwrap();
    assert_eq!(message.0, claims().0);
    assert_eq!(footer.unwrap().0.kid, "saruman0");

    // no footer on the token means no footer in the result
    let token = paseto.encrypt(&claims(), &key, None).unwrap();
    let TokenWithFooter { footer, .. }: TokenWithFooter<Json<Claims>, Json<KeyId>> =
        paseto.decrypt_with_footer(&token, &key).unwrap();
    assert!(footer.is_none());
}

#[test]
fn extract_footer_without_keys() {
    let paseto = Paseto::new();
    let key = local_key();
    let token = paseto
        .encrypt(&claims(), &key, Some(r#"{"kid":"gandalf0"}"#))
        .unwrap();

    assert_eq!(
        tokenseal_core::extract_footer(&token).unwrap().as_deref(),
        Some(r#"{"kid":"gandalf0"}"#)
    );
    let footer: Option<Json<KeyId>> = tokenseal_core::extract_footer_as(&token).unwrap();
    assert_eq!(footer.unwrap().0.kid, "gandalf0");
}

#[test]
fn key_length_is_policed() {
    assert!(matches!(
        LocalKey::from_bytes(&[0; 31]),
        Err(PasetoError::KeyLength {
            expected: 32,
            actual: 31
        })
    ));
    assert!(matches!(
        SecretKey::from_bytes(&[0; 64]),
        Err(PasetoError::KeyLength {
            expected: 32,
            actual: 64
        })
    ));
    assert!(matches!(
        PublicKey::from_bytes(&[0; 33]),
        Err(PasetoError::KeyLength {
            expected: 32,
            actual: 33
        })
    ));
}

#[test]
fn public_key_bytes_round_trip() {
    let secret = SecretKey::from_bytes(&[0x42; 32]).unwrap();
    assert_eq!(secret.to_bytes(), [0x42; 32]);

    let public = secret.public_key();
    let decoded = PublicKey::from_bytes(public.as_bytes()).unwrap();
    assert_eq!(decoded.as_bytes(), public.as_bytes());
}
