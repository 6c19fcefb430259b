// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Credential encoding and request signing.
//!
//! The signed variant authenticates each call with six headers. The
//! signature is the hex SHA-1 digest of
//! `timeout + timestamp + nonce + token`.

use md5::Md5;
use rand::Rng;
use sha1::{Digest, Sha1};

/// Timeout value advertised in the `X-Zc-Timeout` header, in seconds.
pub const REQUEST_TIMEOUT: &str = "300";

/// Length of the request nonce.
pub const NONCE_LEN: usize = 16;

const NONCE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Header carrying the Unix timestamp of the request.
pub const HEADER_TIMESTAMP: &str = "X-Zc-Timestamp";
/// Header carrying [`REQUEST_TIMEOUT`].
pub const HEADER_TIMEOUT: &str = "X-Zc-Timeout";
/// Header carrying the nonce.
pub const HEADER_NONCE: &str = "X-Zc-Nonce";
/// Header carrying the user id.
pub const HEADER_USER_ID: &str = "X-Zc-User-Id";
/// Header carrying the signature.
pub const HEADER_SIGNATURE: &str = "X-Zc-User-Signature";
/// Header carrying the body length.
pub const HEADER_CONTENT_LENGTH: &str = "X-Zc-Content-Length";

/// Returns the MD5 hex digest the form variant expects as password.
///
/// # Examples
///
/// ```
/// use lvi_lib::protocol::signing::password_digest;
///
/// assert_eq!(password_digest("password"), "5f4dcc3b5aa765d61d8327deb882cf99");
/// ```
#[must_use]
pub fn password_digest(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}

/// Generates a random nonce of [`NONCE_LEN`] uppercase alphanumerics.
#[must_use]
pub fn nonce() -> String {
    let mut rng = rand::thread_rng();
    (0..NONCE_LEN)
        .map(|_| char::from(NONCE_CHARSET[rng.gen_range(0..NONCE_CHARSET.len())]))
        .collect()
}

/// Computes the request signature.
#[must_use]
pub fn signature(timeout: &str, timestamp: &str, nonce: &str, token: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(timeout.as_bytes());
    hasher.update(timestamp.as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Builds the full signed header set for one request.
#[must_use]
pub fn signed_headers(
    token: &str,
    user_id: &str,
    body_len: usize,
    timestamp: i64,
) -> Vec<(&'static str, String)> {
    let timestamp = timestamp.to_string();
    let nonce = nonce();
    let signature = signature(REQUEST_TIMEOUT, &timestamp, &nonce, token);

    vec![
        (HEADER_TIMESTAMP, timestamp),
        (HEADER_TIMEOUT, REQUEST_TIMEOUT.to_string()),
        (HEADER_NONCE, nonce),
        (HEADER_USER_ID, user_id.to_string()),
        (HEADER_SIGNATURE, signature),
        (HEADER_CONTENT_LENGTH, body_len.to_string()),
    ]
}
