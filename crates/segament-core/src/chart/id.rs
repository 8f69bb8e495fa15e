use sha1::{Digest, Sha1};

use crate::chart::normalize_title;

/// Literal appended to World's End ids before hashing.
const WORLDS_END_SUFFIX: &str = "segament";

/// Number of hex characters kept from the digest.
const ID_LENGTH: usize = 16;

/// Generate a content-derived song identifier.
///
/// World's End charts with a known upstream id hash `{original_id}segament`;
/// everything else hashes the normalized title, followed by the normalized
/// artist when one is given.
pub fn generate_segament_id(
    title: &str,
    artist: Option<&str>,
    is_worlds_end: bool,
    original_id: Option<&str>,
) -> String {
    let base = match original_id.filter(|id| is_worlds_end && !id.is_empty()) {
        Some(id) => format!("{}{}", id, WORLDS_END_SUFFIX),
        None => {
            let mut base = normalize_title(Some(title));
            if let Some(artist) = artist.filter(|a| !a.is_empty()) {
                base.push_str(&normalize_title(Some(artist)));
            }
            base
        }
    };

    let digest = format!("{:x}", Sha1::digest(base.as_bytes()));
    digest[..ID_LENGTH].to_string()
}
