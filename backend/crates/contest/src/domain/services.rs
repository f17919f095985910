//! Domain Services
//!
//! Pure functions: no I/O, randomness injected by the caller.

use platform::filename::sanitize_filename;
use rand::Rng;

use crate::domain::value_objects::{AccessCode, CODE_ALPHABET, CodeFormat, FileCategory};

/// Sample a candidate access code. Uniqueness is the store's job.
pub fn generate_access_code<R: Rng + ?Sized>(format: &CodeFormat, rng: &mut R) -> AccessCode {
    let mut code = String::with_capacity(format.prefix().len() + format.length());
    code.push_str(format.prefix());
    for _ in 0..format.length() {
        let idx = rng.random_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    AccessCode::from_generated(code)
}

/// Name a file is stored under inside its registrant's directory
pub fn stored_filename(category: FileCategory, original_name: &str) -> String {
    sanitize_filename(&format!("{}{}", category.filename_prefix(), original_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_codes_parse_back() {
        let format = CodeFormat::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let code = generate_access_code(&format, &mut rng);
            assert_eq!(format.parse(code.as_str()), Some(code.clone()));
            assert_eq!(code.as_str().len(), "CARN2-".len() + 8);
        }
    }

    #[test]
    fn test_custom_format() {
        let format = CodeFormat::new("X-", 3).unwrap();
        let code = generate_access_code(&format, &mut rand::rng());
        assert!(code.as_str().starts_with("X-"));
        assert_eq!(code.as_str().len(), 5);
    }

    #[test]
    fn test_stored_filename_is_prefixed_and_sanitized() {
        assert_eq!(
            stored_filename(FileCategory::Project, "Mi Proyecto.pdf"),
            "proyecto_Mi_Proyecto.pdf"
        );
        assert_eq!(
            stored_filename(FileCategory::Declaration, "declaración.pdf"),
            "declaracion_declaracion.pdf"
        );
        assert_eq!(
            stored_filename(FileCategory::Project, "../../x.pdf"),
            "proyecto_.._.._x.pdf"
        );
    }
}
