//! As-you-type phone formatting for Brazilian numbers.

/// Format the digits of `input` as `(DD) NNNN-NNNN` or `(DD) NNNNN-NNNN`.
///
/// Non-digits are dropped and input is cut at 11 digits. Partial input is formatted as
/// far as it goes, so the function can run on every keystroke.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(11).collect();

    if digits.len() <= 2 {
        return digits;
    }

    let (area, local) = digits.split_at(2);
    let split = if local.len() > 8 { 5 } else { 4 };

    if local.len() <= split {
        format!("({area}) {local}")
    } else {
        let (head, tail) = local.split_at(split);
        format!("({area}) {head}-{tail}")
    }
}
