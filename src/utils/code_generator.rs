//! Short code generation.
//!
//! Codes are drawn from the operating system CSPRNG so that live links cannot
//! be enumerated by guessing.

/// Number of symbols in a generated code.
pub const CODE_LENGTH: usize = 8;

/// The 62-symbol code alphabet: `[A-Za-z0-9]`.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Largest multiple of 62 that fits in a byte. Bytes at or above it are
/// rejected so every symbol is equally likely.
const REJECTION_LIMIT: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Generates a random short code of [`CODE_LENGTH`] symbols.
///
/// # Errors
///
/// Returns the `getrandom` error if the system entropy source fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> Result<String, getrandom::Error> {
    let mut code = String::with_capacity(CODE_LENGTH);
    let mut buffer = [0u8; CODE_LENGTH * 2];

    while code.len() < CODE_LENGTH {
        getrandom::fill(&mut buffer)?;

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_LIMIT) {
            if code.len() == CODE_LENGTH {
                break;
            }
            code.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
        }
    }

    Ok(code)
}

/// Returns true if `code` has the shape of a generated code.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}
