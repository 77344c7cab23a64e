//! Verification-ladder tests for both token schemes.

use std::collections::HashMap;

use gatewarden_core::{
    issue_exit_token, issue_qr_signature, verify_exit_token, verify_qr_signature, Asset,
    AssetStatus, Directory, DirectoryError, ExitSecret, ExitTokenError, FixedClock, QrSecret,
    QrVerifyError, Student, TokenError,
};

const NOW: i64 = 1_700_000_000;
const QR_WINDOW: i64 = 24 * 3600;
const TTL: i64 = 300;

struct TestDirectory {
    assets: HashMap<u64, Asset>,
}

impl TestDirectory {
    fn with_asset(asset: Asset) -> Self {
        let mut assets = HashMap::new();
        assets.insert(asset.asset_id, asset);
        Self { assets }
    }
}

impl Directory for TestDirectory {
    fn student(&self, _student_id: &str) -> Result<Option<Student>, DirectoryError> {
        Ok(None)
    }

    fn asset(&self, asset_id: u64) -> Result<Option<Asset>, DirectoryError> {
        Ok(self.assets.get(&asset_id).cloned())
    }

    fn active_assets_owned_by(&self, _student_id: &str) -> Result<Vec<Asset>, DirectoryError> {
        Ok(Vec::new())
    }
}

fn laptop(owner: &str, serial: &str) -> Asset {
    Asset {
        asset_id: 1,
        owner_student_id: owner.to_string(),
        serial_number: serial.to_string(),
        brand: Some("Lenovo".to_string()),
        color: None,
        visible_specs: None,
        status: AssetStatus::Active,
        qr_signature: None,
        registered_at: Some(NOW),
    }
}

fn qr_secret() -> QrSecret {
    QrSecret::new("qr-secret-for-tests")
}

fn exit_secret() -> ExitSecret {
    ExitSecret::new("exit-secret-for-tests")
}

#[test]
fn qr_round_trip_resolves_the_asset() {
    let clock = FixedClock::at(NOW);
    let asset = laptop("DBU1401234", "SN-001");
    let token = issue_qr_signature(&asset, &qr_secret(), &clock);
    let directory = TestDirectory::with_asset(asset.clone());

    let resolved =
        verify_qr_signature(&token, &directory, &qr_secret(), QR_WINDOW, &clock).unwrap();
    assert_eq!(resolved, asset);
}

#[test]
fn qr_expiry_is_inclusive_at_the_boundary() {
    let clock = FixedClock::at(NOW);
    let asset = laptop("DBU1401234", "SN-001");
    let token = issue_qr_signature(&asset, &qr_secret(), &clock);
    let directory = TestDirectory::with_asset(asset);

    clock.set(NOW + QR_WINDOW);
    assert!(verify_qr_signature(&token, &directory, &qr_secret(), QR_WINDOW, &clock).is_ok());

    clock.advance(1);
    assert!(matches!(
        verify_qr_signature(&token, &directory, &qr_secret(), QR_WINDOW, &clock),
        Err(QrVerifyError::Token(TokenError::Expired { .. }))
    ));
}

#[test]
fn qr_with_wrong_secret_is_bad_signature() {
    let clock = FixedClock::at(NOW);
    let asset = laptop("DBU1401234", "SN-001");
    let token = issue_qr_signature(&asset, &qr_secret(), &clock);
    let directory = TestDirectory::with_asset(asset);

    let forged = QrSecret::new("not-the-qr-secret");
    assert!(matches!(
        verify_qr_signature(&token, &directory, &forged, QR_WINDOW, &clock),
        Err(QrVerifyError::Token(TokenError::BadSignature))
    ));
}

#[test]
fn qr_for_a_deleted_asset_is_unknown() {
    let clock = FixedClock::at(NOW);
    let asset = laptop("DBU1401234", "SN-001");
    let token = issue_qr_signature(&asset, &qr_secret(), &clock);
    let directory = TestDirectory {
        assets: HashMap::new(),
    };

    assert!(matches!(
        verify_qr_signature(&token, &directory, &qr_secret(), QR_WINDOW, &clock),
        Err(QrVerifyError::UnknownAsset { asset_id: 1 })
    ));
}

#[test]
fn qr_detects_serial_number_edits() {
    let clock = FixedClock::at(NOW);
    let asset = laptop("DBU1401234", "SN-001");
    let token = issue_qr_signature(&asset, &qr_secret(), &clock);

    // Serial changed in the directory after the label was printed.
    let mut edited = asset;
    edited.serial_number = "SN-002".to_string();
    let directory = TestDirectory::with_asset(edited);

    assert!(matches!(
        verify_qr_signature(&token, &directory, &qr_secret(), QR_WINDOW, &clock),
        Err(QrVerifyError::FieldMismatch {
            field: "serial number"
        })
    ));
}

#[test]
fn qr_detects_ownership_reassignment_despite_valid_signature() {
    let clock = FixedClock::at(NOW);
    let asset = laptop("DBU1401234", "SN-001");
    let token = issue_qr_signature(&asset, &qr_secret(), &clock);

    let mut reassigned = asset;
    reassigned.owner_student_id = "DBU1409999".to_string();
    let directory = TestDirectory::with_asset(reassigned);

    match verify_qr_signature(&token, &directory, &qr_secret(), QR_WINDOW, &clock) {
        Err(QrVerifyError::OwnershipMismatch {
            token_owner,
            record_owner,
        }) => {
            assert_eq!(token_owner, "DBU1401234");
            assert_eq!(record_owner, "DBU1409999");
        }
        other => panic!("expected ownership mismatch, got {other:?}"),
    }
}

#[test]
fn qr_verification_does_not_judge_asset_status() {
    let clock = FixedClock::at(NOW);
    let mut asset = laptop("DBU1401234", "SN-001");
    asset.status = AssetStatus::Revoked;
    let token = issue_qr_signature(&asset, &qr_secret(), &clock);
    let directory = TestDirectory::with_asset(asset);

    // Authentic and current, even though the asset is revoked; status is
    // the workflow's concern.
    let resolved =
        verify_qr_signature(&token, &directory, &qr_secret(), QR_WINDOW, &clock).unwrap();
    assert_eq!(resolved.status, AssetStatus::Revoked);
}

#[test]
fn exit_token_round_trip_yields_claims() {
    let clock = FixedClock::at(NOW);
    let token = issue_exit_token("DBU1401234", "op-1", true, &exit_secret(), &clock);

    let claims = verify_exit_token(
        &token,
        "DBU1401234",
        "op-1",
        Some(true),
        TTL,
        &exit_secret(),
        &clock,
    )
    .unwrap();
    assert_eq!(claims.student_id, "DBU1401234");
    assert_eq!(claims.operator_id, "op-1");
    assert!(claims.has_assets);
    assert_eq!(claims.issued_at, NOW);
    assert_eq!(claims.nonce.len(), 16);
}

#[test]
fn exit_token_rejects_a_different_operator() {
    let clock = FixedClock::at(NOW);
    let token = issue_exit_token("DBU1401234", "op-1", true, &exit_secret(), &clock);

    assert!(matches!(
        verify_exit_token(
            &token,
            "DBU1401234",
            "op-2",
            Some(true),
            TTL,
            &exit_secret(),
            &clock,
        ),
        Err(ExitTokenError::IdentityMismatch { .. })
    ));
}

#[test]
fn exit_token_rejects_a_different_student() {
    let clock = FixedClock::at(NOW);
    let token = issue_exit_token("DBU1401234", "op-1", true, &exit_secret(), &clock);

    assert!(matches!(
        verify_exit_token(
            &token,
            "DBU1409999",
            "op-1",
            Some(true),
            TTL,
            &exit_secret(),
            &clock,
        ),
        Err(ExitTokenError::IdentityMismatch { .. })
    ));
}

#[test]
fn exit_token_flag_mismatch_blocks_the_wrong_branch() {
    let clock = FixedClock::at(NOW);
    let token = issue_exit_token("DBU1401234", "op-1", true, &exit_secret(), &clock);

    match verify_exit_token(
        &token,
        "DBU1401234",
        "op-1",
        Some(false),
        TTL,
        &exit_secret(),
        &clock,
    ) {
        Err(ExitTokenError::FlagMismatch { expected, actual }) => {
            assert!(!expected);
            assert!(actual);
        }
        other => panic!("expected flag mismatch, got {other:?}"),
    }
}

#[test]
fn exit_token_flag_check_is_optional() {
    let clock = FixedClock::at(NOW);
    let token = issue_exit_token("DBU1401234", "op-1", true, &exit_secret(), &clock);

    let claims = verify_exit_token(
        &token,
        "DBU1401234",
        "op-1",
        None,
        TTL,
        &exit_secret(),
        &clock,
    )
    .unwrap();
    assert!(claims.has_assets);
}

#[test]
fn exit_token_ttl_is_inclusive_at_the_boundary() {
    let clock = FixedClock::at(NOW);
    let token = issue_exit_token("DBU1401234", "op-1", false, &exit_secret(), &clock);

    clock.set(NOW + TTL);
    assert!(verify_exit_token(
        &token,
        "DBU1401234",
        "op-1",
        Some(false),
        TTL,
        &exit_secret(),
        &clock,
    )
    .is_ok());

    clock.advance(1);
    assert!(matches!(
        verify_exit_token(
            &token,
            "DBU1401234",
            "op-1",
            Some(false),
            TTL,
            &exit_secret(),
            &clock,
        ),
        Err(ExitTokenError::Token(TokenError::Expired { .. }))
    ));
}

#[test]
fn qr_secret_does_not_verify_exit_tokens_unless_derived() {
    let clock = FixedClock::at(NOW);
    let qr = qr_secret();
    let independent = exit_secret();
    let derived = ExitSecret::derive_from_qr(&qr);

    let token = issue_exit_token("DBU1401234", "op-1", false, &derived, &clock);

    // The derived secret (single-shared-key deployment) verifies its own
    // tokens; an independent exit secret does not.
    assert!(verify_exit_token(
        &token,
        "DBU1401234",
        "op-1",
        None,
        TTL,
        &derived,
        &clock
    )
    .is_ok());
    assert!(matches!(
        verify_exit_token(&token, "DBU1401234", "op-1", None, TTL, &independent, &clock),
        Err(ExitTokenError::Token(TokenError::BadSignature))
    ));
}
