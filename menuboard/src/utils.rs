//! Common helpers.

use std::time::{SystemTime, UNIX_EPOCH};

use byte_unit::{Byte, UnitType};

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Returns a timestamp-derived id for which `taken` is false.
///
/// Ids only need to be unique among their siblings, so a clash just bumps
/// the number.
pub fn unique_timestamp_id(taken: impl Fn(&str) -> bool) -> String {
    let mut n = now_millis();
    loop {
        let id = n.to_string();
        if !taken(&id) {
            return id;
        }
        n += 1;
    }
}

/// Expands `${env:VAR_NAME}` placeholders from the environment.
///
/// Unset variables expand to an empty string. Anything that is not a
/// complete `${env:...}` placeholder is kept verbatim.
///
/// ```rust
/// use menuboard::utils::replace_env_placeholders;
///
/// unsafe { std::env::set_var("MENU_DOC_VAR", "hello"); }
/// assert_eq!(replace_env_placeholders("say ${env:MENU_DOC_VAR}"), "say hello");
/// assert_eq!(replace_env_placeholders("${other}"), "${other}");
/// ```
pub fn replace_env_placeholders(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${env:") {
        result.push_str(&rest[..start]);
        let after = &rest[start + "${env:".len()..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                if !name.is_empty() {
                    result.push_str(&std::env::var(name).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                // 没有闭合的大括号，原样保留
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

/// Formats a byte count for humans, e.g. `2.41 KiB`.
pub fn human_size(bytes: usize) -> String {
    let adjusted = Byte::from_u64(bytes as u64).get_appropriate_unit(UnitType::Binary);
    format!("{adjusted:.2}")
}
