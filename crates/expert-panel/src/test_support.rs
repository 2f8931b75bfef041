use advisory_core::{InstrumentReading, ResolvedReading};

/// Build a resolved reading priced at `price`, adjusted by `tweak`.
pub fn reading(price: f64, tweak: impl FnOnce(&mut InstrumentReading)) -> ResolvedReading {
    let mut raw = InstrumentReading {
        current_price: Some(price),
        ..Default::default()
    };
    tweak(&mut raw);
    raw.resolve("TEST").expect("test reading has a price")
}
