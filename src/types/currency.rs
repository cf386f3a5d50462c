const CURRENCY_CODE_HEX_LENGTH: usize = 40;

/// Turns a ledger currency code into something a person can read.
///
/// Three letter codes pass through untouched. A 160-bit hex code is decoded
/// to its ASCII text when it carries one, otherwise it is returned as given.
pub fn normalize_currency_code(code: &str) -> String {
    if code.len() != CURRENCY_CODE_HEX_LENGTH {
        return code.to_string();
    }

    let Ok(bytes) = hex::decode(code) else {
        return code.to_string();
    };

    //NOTE: A leading zero byte marks the standard layout, where the ISO code sits in bytes 12..15
    if bytes[0] == 0 {
        let is_standard = bytes[..12].iter().all(|byte| *byte == 0)
            && bytes[15..].iter().all(|byte| *byte == 0)
            && bytes[12..15].iter().all(|byte| byte.is_ascii_alphanumeric());

        return match is_standard {
            true => String::from_utf8_lossy(&bytes[12..15]).into_owned(),
            false => code.to_string()
        };
    }

    let end = bytes.iter().rposition(|byte| *byte != 0).map_or(0, |position| position + 1);
    let text = &bytes[..end];

    if text.is_empty() || !text.iter().all(|byte| (0x20..=0x7e).contains(byte)) {
        return code.to_string();
    }

    String::from_utf8_lossy(text).into_owned()
}
