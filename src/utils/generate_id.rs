use hex::encode as hex_encode;
use rand::RngCore;

/// Opaque configuration id: `config_<unix millis>_<random hex>`.
pub fn generate_id() -> String {
    let mut b = [0u8; 5];
    rand::thread_rng().fill_bytes(&mut b);
    format!(
        "config_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        hex_encode(b)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_have_prefix_and_differ() {
        let a = generate_id();
        let b = generate_id();
        assert!(a.starts_with("config_"));
        assert_ne!(a, b);
    }
}
