//! Subnet size and per-IP price arithmetic.

use netlease_core::DomainError;

/// Number of addresses in a CIDR-style subnet descriptor such as
/// `"192.168.1.0/24"`.
pub fn ips_in_subnet(subnet: &str) -> Result<u64, DomainError> {
    let prefix = subnet
        .split_once('/')
        .map(|(_, p)| p)
        .ok_or_else(|| DomainError::validation(format!("subnet has no prefix length: {subnet}")))?;

    let prefix: u32 = prefix
        .parse()
        .map_err(|_| DomainError::validation(format!("invalid prefix length: {subnet}")))?;

    if prefix > 32 {
        return Err(DomainError::validation(format!(
            "prefix length out of range: {subnet}"
        )));
    }

    Ok(1u64 << (32 - prefix))
}

/// Monthly price divided across the addresses of the block.
pub fn price_per_ip(price: u64, subnet: &str) -> Result<f64, DomainError> {
    let ips = ips_in_subnet(subnet)?;
    Ok(price as f64 / ips as f64)
}

/// Display formatting for a per-IP price, three decimal places.
pub fn format_price_per_ip(price_per_ip: f64) -> String {
    format!("{price_per_ip:.3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_24_has_256_ips() {
        assert_eq!(ips_in_subnet("192.168.1.0/24").unwrap(), 256);
    }

    #[test]
    fn slash_18_has_16384_ips() {
        assert_eq!(ips_in_subnet("10.0.0.0/18").unwrap(), 16_384);
    }

    #[test]
    fn slash_32_is_a_single_address() {
        assert_eq!(ips_in_subnet("10.0.0.1/32").unwrap(), 1);
    }

    #[test]
    fn missing_prefix_is_rejected() {
        let err = ips_in_subnet("192.168.1.0").unwrap_err();
        assert!(err.to_string().contains("no prefix length"));
    }

    #[test]
    fn non_numeric_prefix_is_rejected() {
        assert!(ips_in_subnet("192.168.1.0/abc").is_err());
    }

    #[test]
    fn oversized_prefix_is_rejected() {
        assert!(ips_in_subnet("192.168.1.0/33").is_err());
    }

    #[test]
    fn price_per_ip_divides_across_block() {
        let per_ip = price_per_ip(1999, "192.168.1.0/24").unwrap();
        assert!((per_ip - 1999.0 / 256.0).abs() < f64::EPSILON);
        assert_eq!(format_price_per_ip(per_ip), "7.809");
    }
}
