//! Unit tests for [`openai_client::mask_token`] and [`openai_client::image_data_url`].
//!
//! Keys of length ≤ 11 are fully masked as `***` to avoid leaking any segment.

use openai_client::{image_data_url, mask_token};

/// **Test: Short or empty tokens are fully masked.**
#[test]
fn mask_token_short_returns_all_star() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("a"), "***");
    assert_eq!(mask_token("AIzaSy123"), "***");
    assert_eq!(mask_token("sk-proj-12"), "***");
}

/// **Test: Long tokens show first 7 and last 4 characters.**
#[test]
fn mask_token_long_shows_head_and_tail() {
    assert_eq!(mask_token("sk-proj-abcdefghijklmnop"), "sk-proj***mnop");
    assert_eq!(mask_token("AIzaSyD-0123456789wxyz"), "AIzaSyD***wxyz");
}

/// **Test: Non-ASCII tokens are masked on char boundaries.**
#[test]
fn mask_token_multibyte_does_not_panic() {
    let masked = mask_token("ключ-ключ-ключ-ключ");
    assert!(masked.starts_with("ключ-кл"));
    assert!(masked.ends_with("ключ"));
}

/// **Test: Image bytes are encoded as a base64 data URL.**
#[test]
fn image_data_url_encodes_base64() {
    assert_eq!(image_data_url("image/jpeg", b"abc"), "data:image/jpeg;base64,YWJj");
}
