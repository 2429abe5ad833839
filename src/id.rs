//! Derives the identifiers that name each remote's output files.

use rand::Rng;

/// The length of generated identifiers.
pub const GENERATED_ID_LENGTH: usize = 6;

/// The characters generated identifiers are drawn from.
pub const GENERATED_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Returns the identifier for a remote. An alias is lowercased and used as-is;
/// without one, a random identifier of [`GENERATED_ID_LENGTH`] characters from
/// [`GENERATED_ID_CHARSET`] is generated. Identifiers are not checked for
/// uniqueness, so two remotes with the same alias share output files.
pub fn remote_id(alias: Option<&str>) -> String {
    match alias {
        Some(alias) => alias.to_lowercase(),
        None => generate_id(GENERATED_ID_LENGTH),
    }
}

/// Generates a random identifier of `size` characters.
pub fn generate_id(size: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..size)
        .map(|_| GENERATED_ID_CHARSET[rng.gen_range(0..GENERATED_ID_CHARSET.len())] as char)
        .collect()
}
