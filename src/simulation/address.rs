pub const ADDRESS_PREFIX: &str = "0x";
pub const ADDRESS_LEN: usize = 42;

/// Shape check only: `0x` prefix and exactly 42 characters. No hex or
/// checksum validation.
pub fn is_valid_withdrawal_address(text: &str) -> bool {
    text.starts_with(ADDRESS_PREFIX) && text.chars().count() == ADDRESS_LEN
}

/// First 10 and last 8 characters joined by `...`.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 18 {
        return address.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{head}...{tail}")
}

/// First 16 characters followed by `...`.
pub fn shorten_hash(hash: &str) -> String {
    let head: String = hash.chars().take(16).collect();
    format!("{head}...")
}

pub fn explorer_tx_url(explorer_host: &str, tx_hash: &str) -> String {
    format!("https://{explorer_host}/tx/{tx_hash}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address_accepted() {
        let addr = format!("0x{}", "a".repeat(40));
        assert!(is_valid_withdrawal_address(&addr));
    }

    #[test]
    fn test_short_address_rejected() {
        let addr = format!("0x{}", "a".repeat(39));
        assert!(!is_valid_withdrawal_address(&addr));
    }

    #[test]
    fn test_missing_prefix_rejected() {
        let addr = "a".repeat(42);
        assert!(!is_valid_withdrawal_address(&addr));
        assert!(!is_valid_withdrawal_address(&format!("0X{}", "a".repeat(40))));
    }

    #[test]
    fn test_mixed_case_example_accepted() {
        assert!(is_valid_withdrawal_address(
            "0x71C7656EC7ab88b098defB751B7401B5f6d8976F"
        ));
    }

    #[test]
    fn test_shorten_address() {
        let short = shorten_address("0x71C7656EC7ab88b098defB751B7401B5f6d8976F");
        assert_eq!(short, "0x71C7656E...f6d8976F");
        assert_eq!(shorten_address("0xabc"), "0xabc");
    }

    #[test]
    fn test_shorten_hash_and_url() {
        let hash = format!("0x{}", "f".repeat(64));
        assert_eq!(shorten_hash(&hash), "0xffffffffffffff...");
        assert_eq!(
            explorer_tx_url("etherscan.io", &hash),
            format!("https://etherscan.io/tx/{hash}")
        );
    }
}
