use cryptolab_core::enhanced::EnhancedAffineCipher;
use cryptolab_core::protection::{protect_bytes_with_rng, unprotect_bytes, Defense};
use cryptolab_core::LabConfig;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn fast_config() -> LabConfig {
    let mut config = LabConfig::default();
    config.key_stretch.memory_cost_kib = 64;
    config.key_stretch.time_cost = 1;
    config
}

proptest! {
    #[test]
    fn prop_noise_roundtrip(
        data in proptest::collection::vec(any::<u8>(), 0..256),
        ratio in 0.0f64..=1.0,
        seed in any::<[u8; 32]>(),
    ) {
        let mut config = fast_config();
        config.noise_ratio = ratio;
        let mut rng = ChaCha20Rng::from_seed(seed);

        let (noisy, meta) = protect_bytes_with_rng(&data, Defense::Noise, &config, &mut rng).unwrap();
        prop_assert!(noisy.len() >= data.len());
        prop_assert_eq!(unprotect_bytes(&noisy, &meta).unwrap(), data);
    }

    #[test]
    fn prop_dh_roundtrip(
        data in proptest::collection::vec(any::<u8>(), 0..256),
        seed in any::<[u8; 32]>(),
    ) {
        let mut rng = ChaCha20Rng::from_seed(seed);
        let (sealed, meta) =
            protect_bytes_with_rng(&data, Defense::DhXorHmac, &fast_config(), &mut rng).unwrap();
        prop_assert_eq!(sealed.len(), data.len());
        prop_assert_eq!(unprotect_bytes(&sealed, &meta).unwrap(), data);
    }

    #[test]
    fn prop_dh_detects_any_flip(
        data in proptest::collection::vec(any::<u8>(), 1..64),
        index in any::<prop::sample::Index>(),
        seed in any::<[u8; 32]>(),
    ) {
        let mut rng = ChaCha20Rng::from_seed(seed);
        let (mut sealed, meta) =
            protect_bytes_with_rng(&data, Defense::DhXorHmac, &fast_config(), &mut rng).unwrap();
        let i = index.index(sealed.len());
        sealed[i] ^= 0x01;
        prop_assert!(unprotect_bytes(&sealed, &meta).unwrap_err().is_tampering());
    }

    #[test]
    fn prop_enhanced_affine_roundtrip(
        passphrase in "\\PC{0,24}",
        message in "\\PC{0,64}",
        iv in any::<u8>(),
    ) {
        let cipher = EnhancedAffineCipher::from_passphrase(&passphrase);
        let sealed = cipher.encrypt_with_iv(&message, iv);
        prop_assert_eq!(cipher.decrypt(&sealed.ciphertext).unwrap(), message);
        prop_assert_eq!(sealed.iv, format!("{:02x}", iv));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_key_stretch_roundtrip(
        data in proptest::collection::vec(any::<u8>(), 0..64),
        seed in any::<[u8; 32]>(),
    ) {
        let mut rng = ChaCha20Rng::from_seed(seed);
        let (sealed, meta) =
            protect_bytes_with_rng(&data, Defense::KeyStretch, &fast_config(), &mut rng).unwrap();
        prop_assert_eq!(unprotect_bytes(&sealed, &meta).unwrap(), data);
    }
}
