//! Atomic field validators.
//!
//! Every rule is a pure function of its input. A `None` value stands for a field that
//! was never filled in; it behaves exactly like an empty string. Messages are meant for
//! display only: callers branch on [`FieldCheck::valid`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Outcome of a single rule. `message` is empty when `valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub valid: bool,
    pub message: String,
}

impl FieldCheck {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Absent, or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn required_message(label: &str) -> String {
    format!("O campo {label} é obrigatório.")
}

pub fn required(value: Option<&str>, label: &str) -> FieldCheck {
    if is_blank(value) {
        FieldCheck::fail(required_message(label))
    } else {
        FieldCheck::ok()
    }
}

/// Mandatory `local@domain.tld` address.
pub fn email(value: Option<&str>) -> FieldCheck {
    let Some(address) = value.filter(|v| !v.trim().is_empty()) else {
        return FieldCheck::fail(required_message("email"));
    };

    if EMAIL_PATTERN.is_match(address) {
        FieldCheck::ok()
    } else {
        FieldCheck::fail("Informe um endereço de email válido.")
    }
}

/// Optional phone number; when present it must carry 10 or 11 digits (area code + number).
pub fn phone(value: Option<&str>) -> FieldCheck {
    let Some(number) = value.filter(|v| !v.trim().is_empty()) else {
        return FieldCheck::ok();
    };

    let digits = number.chars().filter(char::is_ascii_digit).count();
    if (10..=11).contains(&digits) {
        FieldCheck::ok()
    } else {
        FieldCheck::fail("Informe um número de telefone válido com DDD.")
    }
}

/// Mandatory text of at least `min` characters.
pub fn min_length(value: Option<&str>, min: usize, label: &str) -> FieldCheck {
    let Some(text) = value.filter(|v| !v.trim().is_empty()) else {
        return FieldCheck::fail(required_message(label));
    };

    if text.chars().count() >= min {
        FieldCheck::ok()
    } else {
        FieldCheck::fail(format!("O campo {label} deve ter pelo menos {min} caracteres."))
    }
}

/// Optional text of at most `max` characters.
pub fn max_length(value: Option<&str>, max: usize, label: &str) -> FieldCheck {
    let Some(text) = value.filter(|v| !v.trim().is_empty()) else {
        return FieldCheck::ok();
    };

    if text.chars().count() <= max {
        FieldCheck::ok()
    } else {
        FieldCheck::fail(format!("O campo {label} deve ter no máximo {max} caracteres."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_absent_and_blank_values() {
        assert!(!required(None, "Categoria").valid);
        assert!(!required(Some(""), "Categoria").valid);
        assert!(!required(Some("   "), "Categoria").valid);
        assert!(required(Some("capacete"), "Categoria").valid);
    }

    #[test]
    fn required_message_names_the_field() {
        let check = required(Some(" "), "Categoria de EPI");
        assert_eq!(check.message, "O campo Categoria de EPI é obrigatório.");
        assert!(required(Some("x"), "Categoria de EPI").message.is_empty());
    }

    #[test]
    fn email_accepts_common_addresses() {
        for address in [
            "a@b.co",
            "x@x.com",
            "joao.silva+epi@empresa.com.br",
            "A_B%C-D@sub-dominio.org",
        ] {
            assert!(email(Some(address)).valid, "{address}");
        }
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for address in ["not-an-email", "a@b", "a@b.c", "@b.com", "a b@c.com", "a@b.c0m"] {
            let check = email(Some(address));
            assert!(!check.valid, "{address}");
            assert!(!check.message.is_empty());
        }
    }

    #[test]
    fn empty_email_reports_required() {
        let check = email(Some(""));
        assert!(!check.valid);
        assert!(check.message.contains("obrigatório"));
        assert_eq!(email(None), check);
    }

    #[test]
    fn phone_is_optional() {
        assert!(phone(None).valid);
        assert!(phone(Some("")).valid);
        assert!(phone(Some("  ")).valid);
    }

    #[test]
    fn phone_counts_digits_only() {
        assert!(phone(Some("11987654321")).valid);
        assert!(phone(Some("(11) 98765-4321")).valid);
        assert!(phone(Some("(11) 8765-4321")).valid);
        assert!(!phone(Some("123")).valid);
        assert!(!phone(Some("119876543210")).valid);
        assert!(!phone(Some("telefone")).valid);
    }

    #[test]
    fn min_length_requires_a_value() {
        let check = min_length(Some(""), 3, "Nome Completo");
        assert!(!check.valid);
        assert!(check.message.contains("obrigatório"));

        let check = min_length(Some("Jo"), 3, "Nome Completo");
        assert!(!check.valid);
        assert!(check.message.contains("pelo menos 3"));

        assert!(min_length(Some("Ana"), 3, "Nome Completo").valid);
        assert!(min_length(Some("Zé!"), 3, "Nome Completo").valid);
    }

    #[test]
    fn max_length_only_bounds_present_values() {
        assert!(max_length(None, 5, "Mensagem").valid);
        assert!(max_length(Some(""), 5, "Mensagem").valid);
        assert!(max_length(Some("cinco"), 5, "Mensagem").valid);
        assert!(!max_length(Some("seis!!"), 5, "Mensagem").valid);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a failing check always carries a message, a passing one never does.
            #[test]
            fn message_is_empty_iff_valid(input in ".{0,30}", n in 0usize..10) {
                let checks = [
                    required(Some(&input), "campo"),
                    email(Some(&input)),
                    phone(Some(&input)),
                    min_length(Some(&input), n, "campo"),
                    max_length(Some(&input), n, "campo"),
                ];
                for check in checks {
                    prop_assert_eq!(check.valid, check.message.is_empty());
                }
            }

            /// Property: phone validity depends only on the digit count.
            #[test]
            fn phone_valid_iff_ten_or_eleven_digits(digits in "[0-9]{1,14}", noise in "[ ()-]{0,4}") {
                let formatted = format!("{noise}{digits}{noise}");
                prop_assert_eq!(phone(Some(&formatted)).valid, (10..=11).contains(&digits.len()));
            }
        }
    }
}
