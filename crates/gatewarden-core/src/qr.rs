//! Asset QR signature scheme.
//!
//! A long-lived token binding an asset's identity (id, owner, serial) so a
//! counterfeit or altered label fails verification. Issued when an asset is
//! registered and reissued whenever ownership changes; presented at every
//! exit attempt until reissued or the asset is revoked.

use gatewarden_token::{codec, generate_nonce, Clock, QrSecret, TokenError};
use thiserror::Error;

use crate::directory::{Directory, DirectoryError};
use crate::records::Asset;

/// Number of signed fields in an asset QR token:
/// `[asset_id, owner_student_id, serial_number, nonce, issued_at]`.
pub const QR_FIELD_COUNT: usize = 5;

/// Errors from QR signature verification.
#[derive(Error, Debug)]
pub enum QrVerifyError {
    /// Transport, signature, or expiry failure.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// The token's asset id resolves to nothing.
    #[error("unknown asset {asset_id}")]
    UnknownAsset {
        /// Asset id claimed by the token.
        asset_id: u64,
    },
    /// A signed field no longer matches the current asset record.
    #[error("{field} does not match the current asset record")]
    FieldMismatch {
        /// Which field diverged.
        field: &'static str,
    },
    /// The asset was reassigned since the label was issued.
    #[error("owner mismatch: token says {token_owner}, record says {record_owner}")]
    OwnershipMismatch {
        /// Owner embedded in the token.
        token_owner: String,
        /// Owner on the current record.
        record_owner: String,
    },
    /// The directory backend failed; not a verification verdict.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Issues the QR signature for an asset.
///
/// Called at registration and on every ownership reassignment; the returned
/// token is what gets printed/encoded on the physical label.
pub fn issue_qr_signature(asset: &Asset, secret: &QrSecret, clock: &impl Clock) -> String {
    let fields = vec![
        asset.asset_id.to_string(),
        asset.owner_student_id.clone(),
        asset.serial_number.clone(),
        generate_nonce(),
        clock.now_unix().to_string(),
    ];
    codec::encode(&fields, secret.signing_key())
}

/// Verifies a scanned QR token and resolves the asset it names.
///
/// Checks, in order: signature and framing, age against `validity_secs`
/// (inclusive at the boundary), that the asset exists, that the signed
/// serial number still matches the record, and that the signed owner still
/// matches the record. On success returns the resolved asset.
///
/// The asset's active/revoked status is deliberately not checked here:
/// "is this signature authentic and current" is this scheme's concern,
/// "is this asset currently usable" is the caller's.
pub fn verify_qr_signature<D: Directory + ?Sized>(
    token: &str,
    directory: &D,
    secret: &QrSecret,
    validity_secs: i64,
    clock: &impl Clock,
) -> Result<Asset, QrVerifyError> {
    let fields = codec::decode(token, QR_FIELD_COUNT, secret.signing_key())?;

    let asset_id: u64 = fields[0].parse().map_err(|_| TokenError::Malformed {
        reason: "asset id is not numeric".to_string(),
    })?;
    let issued_at: i64 = fields[4].parse().map_err(|_| TokenError::Malformed {
        reason: "issue timestamp is not numeric".to_string(),
    })?;

    codec::check_age(issued_at, clock.now_unix(), validity_secs)?;

    let asset = directory
        .asset(asset_id)?
        .ok_or(QrVerifyError::UnknownAsset { asset_id })?;

    if asset.serial_number != fields[2] {
        return Err(QrVerifyError::FieldMismatch {
            field: "serial number",
        });
    }
    if asset.owner_student_id != fields[1] {
        return Err(QrVerifyError::OwnershipMismatch {
            token_owner: fields[1].clone(),
            record_owner: asset.owner_student_id.clone(),
        });
    }

    Ok(asset)
}
