//! Default monitored universe and category display names.

pub struct AssetCategory {
    pub key: &'static str,
    pub display_name: &'static str,
    /// (symbol, display name)
    pub assets: &'static [(&'static str, &'static str)],
}

pub const US_STOCKS: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corp."),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("NVDA", "NVIDIA Corp."),
    ("META", "Meta Platforms Inc."),
    ("TSLA", "Tesla Inc."),
    ("SPY", "S&P 500 ETF"),
    ("QQQ", "Nasdaq-100 ETF"),
    ("IWM", "Russell 2000 ETF"),
    ("VTI", "Total Stock Market ETF"),
];

pub const PRECIOUS_METALS: &[(&str, &str)] = &[
    ("GLD", "Gold ETF"),
    ("SLV", "Silver ETF"),
    ("PPLT", "Platinum ETF"),
    ("PALL", "Palladium ETF"),
];

pub const ENERGY: &[(&str, &str)] = &[
    ("USO", "WTI Crude Oil ETF"),
    ("BNO", "Brent Crude Oil ETF"),
    ("UNG", "Natural Gas ETF"),
];

pub const COMMODITIES: &[(&str, &str)] = &[
    ("JJC", "Copper ETF"),
    ("JJU", "Aluminum ETF"),
    ("REMX", "Rare Earth ETF"),
];

pub const CRYPTO: &[(&str, &str)] = &[
    ("BTC-USD", "Bitcoin"),
    ("ETH-USD", "Ethereum"),
    ("SOL-USD", "Solana"),
    ("WLD-USD", "Worldcoin"),
];

pub const MACRO: &[(&str, &str)] = &[
    ("^VIX", "VIX Volatility Index"),
    ("UUP", "US Dollar Index ETF"),
    ("TLT", "20+ Year Treasury ETF"),
    ("SHY", "1-3 Year Treasury ETF"),
    ("LQD", "Investment Grade Corporate Bond ETF"),
    ("HYG", "High Yield Bond ETF"),
];

pub const CATEGORIES: &[AssetCategory] = &[
    AssetCategory { key: "us_stocks", display_name: "US Stocks", assets: US_STOCKS },
    AssetCategory { key: "precious_metals", display_name: "Precious Metals", assets: PRECIOUS_METALS },
    AssetCategory { key: "energy", display_name: "Energy", assets: ENERGY },
    AssetCategory { key: "commodities", display_name: "Commodities", assets: COMMODITIES },
    AssetCategory { key: "crypto", display_name: "Crypto", assets: CRYPTO },
    AssetCategory { key: "macro", display_name: "Macro", assets: MACRO },
];

/// Display name for a category key, or the key itself when unknown.
pub fn category_display_name(key: &str) -> &str {
    match CATEGORIES.iter().find(|c| c.key == key) {
        Some(category) => category.display_name,
        None => key,
    }
}

/// Display name of a monitored symbol, if it is part of the default universe.
pub fn asset_display_name(symbol: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.assets.iter())
        .find(|(s, _)| *s == symbol)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display_name() {
        assert_eq!(category_display_name("precious_metals"), "Precious Metals");
        assert_eq!(category_display_name("bonds"), "bonds");
    }

    #[test]
    fn test_asset_display_name() {
        assert_eq!(asset_display_name("BTC-USD"), Some("Bitcoin"));
        assert_eq!(asset_display_name("DOGE-USD"), None);
    }

    #[test]
    fn test_universe_symbols_are_unique() {
        let mut symbols: Vec<&str> = CATEGORIES
            .iter()
            .flat_map(|c| c.assets.iter().map(|(s, _)| *s))
            .collect();
        let total = symbols.len();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), total);
        assert_eq!(total, 31);
    }
}
