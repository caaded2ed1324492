//! Selectable coins

/// Entry in the coin selection list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinOption {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

/// Entry in the "top cryptocurrencies" shortlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopCoin {
    pub id: &'static str,
    pub symbol: &'static str,
    pub image_url: &'static str,
}

pub const COIN_OPTIONS: &[CoinOption] = &[
    CoinOption { id: "bitcoin", name: "Bitcoin", symbol: "BTC" },
    CoinOption { id: "ethereum", name: "Ethereum", symbol: "ETH" },
    CoinOption { id: "dogecoin", name: "Dogecoin", symbol: "DOGE" },
    CoinOption { id: "cardano", name: "Cardano", symbol: "ADA" },
    CoinOption { id: "polkadot", name: "Polkadot", symbol: "DOT" },
    CoinOption { id: "solana", name: "Solana", symbol: "SOL" },
    CoinOption { id: "ripple", name: "XRP", symbol: "XRP" },
    CoinOption { id: "litecoin", name: "Litecoin", symbol: "LTC" },
    CoinOption { id: "binancecoin", name: "Binance Coin", symbol: "BNB" },
    CoinOption { id: "polygon", name: "Polygon", symbol: "MATIC" },
];

pub const TOP_COINS: &[TopCoin] = &[
    TopCoin {
        id: "bitcoin",
        symbol: "BTC",
        image_url: "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
    },
    TopCoin {
        id: "ethereum",
        symbol: "ETH",
        image_url: "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
    },
    TopCoin {
        id: "dogecoin",
        symbol: "DOGE",
        image_url: "https://assets.coingecko.com/coins/images/5/large/dogecoin.png",
    },
    TopCoin {
        id: "cardano",
        symbol: "ADA",
        image_url: "https://assets.coingecko.com/coins/images/975/large/cardano.png",
    },
];

/// Lowercase slug check: non-empty, `[a-z0-9-]` only
pub fn is_valid_coin_id(coin_id: &str) -> bool {
    !coin_id.is_empty()
        && coin_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Resolve user input to a coin id
///
/// Accepts a catalog symbol in any case ("btc" -> "bitcoin"); anything else is
/// trimmed and lowercased and must then be a valid slug.
pub fn resolve_coin_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if let Some(option) = COIN_OPTIONS
        .iter()
        .find(|c| c.symbol.eq_ignore_ascii_case(trimmed))
    {
        return Some(option.id.to_string());
    }

    let lowered = trimmed.to_lowercase();
    is_valid_coin_id(&lowered).then_some(lowered)
}

pub fn is_top_coin(coin_id: &str) -> bool {
    TOP_COINS.iter().any(|c| c.id == coin_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coin_ids() {
        assert!(is_valid_coin_id("bitcoin"));
        assert!(is_valid_coin_id("avalanche-2"));
        assert!(!is_valid_coin_id(""));
        assert!(!is_valid_coin_id("Bitcoin"));
        assert!(!is_valid_coin_id("bit coin"));
        assert!(!is_valid_coin_id("../etc"));
    }

    #[test]
    fn test_resolve_symbol_and_slug() {
        assert_eq!(resolve_coin_id("btc").as_deref(), Some("bitcoin"));
        assert_eq!(resolve_coin_id("MATIC").as_deref(), Some("polygon"));
        assert_eq!(resolve_coin_id("  Ethereum ").as_deref(), Some("ethereum"));
        assert_eq!(resolve_coin_id("shiba-inu").as_deref(), Some("shiba-inu"));
        assert_eq!(resolve_coin_id("a/b"), None);
    }

    #[test]
    fn test_shortlist_is_subset_of_catalog() {
        for top in TOP_COINS {
            assert!(COIN_OPTIONS.iter().any(|c| c.id == top.id && c.symbol == top.symbol));
        }
        assert!(is_top_coin("cardano"));
        assert!(!is_top_coin("solana"));
    }
}
