// Offer Catalogue
//
// Prices are in Stars and fixed at build time.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferScope {
    /// Applies until the contest ends
    RemainderOfContest,
    /// One retry window, once per contest
    SingleUse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOffer {
    pub id: &'static str,
    pub price_stars: u32,
    /// Point accrual multiplier, Boost only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    pub scope: OfferScope,
}

pub const BOOST_PRICING: PricingOffer = PricingOffer {
    id: "boost",
    price_stars: 100,
    multiplier: Some(1.5),
    scope: OfferScope::RemainderOfContest,
};

pub const SECOND_CHANCE_PRICING: PricingOffer = PricingOffer {
    id: "second_chance",
    price_stars: 75,
    multiplier: None,
    scope: OfferScope::SingleUse,
};

pub fn catalogue() -> [PricingOffer; 2] {
    [BOOST_PRICING, SECOND_CHANCE_PRICING]
}
