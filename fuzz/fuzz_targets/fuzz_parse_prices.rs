#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Whatever the game API sends back, parsing must not panic and any
    // decoded window must yield a decision
    if let Ok(prices) = bunkerwatch::prices::parse_price_response(data) {
        let decision = bunkerwatch::alert::decide(
            &prices,
            "12:00",
            &bunkerwatch::alert::Thresholds { fuel: 500, co2: 10 },
            &bunkerwatch::cooldown::CooldownState::default(),
        );
        assert_eq!(decision.is_some(), !prices.is_empty());
    }
});
