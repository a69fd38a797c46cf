use dynlight_config::{DynLightsConfig, ExplosiveLightingMode, QualityMode};
use proptest::prelude::*;

fn arb_quality() -> impl Strategy<Value = QualityMode> {
    prop::sample::select(QualityMode::ALL.to_vec())
}

fn arb_explosive() -> impl Strategy<Value = ExplosiveLightingMode> {
    prop::sample::select(ExplosiveLightingMode::ALL.to_vec())
}

// Flips the case of each letter according to `mask`.
fn mixed_case(name: &str, mask: u32) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| if mask & (1 << (i % 32)) != 0 { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    // Names parse back regardless of case and surrounding blanks
    #[test]
    fn quality_name_parses_back(m in arb_quality(), mask in any::<u32>(), pad in 0usize..3) {
        let s = format!("{}{}{}", " ".repeat(pad), mixed_case(m.name(), mask), " ".repeat(pad));
        prop_assert_eq!(s.parse::<QualityMode>().unwrap(), m);
    }

    #[test]
    fn explosive_name_parses_back(m in arb_explosive(), mask in any::<u32>()) {
        prop_assert_eq!(mixed_case(m.name(), mask).parse::<ExplosiveLightingMode>().unwrap(), m);
    }

    // Anything that is not a mode name is rejected
    #[test]
    fn unknown_names_rejected(s in "[a-z]{1,10}") {
        let known = QualityMode::ALL.iter().any(|m| m.name() == s);
        prop_assert_eq!(s.parse::<QualityMode>().is_ok(), known);
    }

    // Cycling through every mode comes back to the start
    #[test]
    fn next_cycles_back(m in arb_quality(), e in arb_explosive()) {
        let mut q = m;
        for _ in 0..QualityMode::ALL.len() {
            q = q.next();
        }
        prop_assert_eq!(q, m);
        let mut x = e;
        for _ in 0..ExplosiveLightingMode::ALL.len() {
            x = x.next();
        }
        prop_assert_eq!(x, e);
    }

    // Any config survives a write and reload
    #[test]
    fn config_reloads_identically(
        quality in arb_quality(),
        explosive_lighting in arb_explosive(),
        entity_lighting in any::<bool>(),
        block_entity_lighting in any::<bool>(),
    ) {
        let cfg = DynLightsConfig { quality, entity_lighting, block_entity_lighting, explosive_lighting };
        let again = DynLightsConfig::from_toml_str(&cfg.to_toml_string().unwrap()).unwrap();
        prop_assert_eq!(again, cfg);
    }
}
