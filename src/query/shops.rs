use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Item, ItemId, PriceKind};

/// The four fixed shops. Each sells a configured list of items in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopKind {
    Casino,
    Mile,
    Book,
    Tm,
}

impl ShopKind {
    pub const ALL: [ShopKind; 4] = [ShopKind::Casino, ShopKind::Mile, ShopKind::Book, ShopKind::Tm];

    pub fn as_str(self) -> &'static str {
        match self {
            ShopKind::Casino => "casino",
            ShopKind::Mile => "mile",
            ShopKind::Book => "book",
            ShopKind::Tm => "tm",
        }
    }

    /// Which price of the item this shop charges.
    pub fn currency(self) -> PriceKind {
        match self {
            ShopKind::Casino => PriceKind::Casino,
            ShopKind::Mile => PriceKind::Mile,
            ShopKind::Book | ShopKind::Tm => PriceKind::Buy,
        }
    }
}

impl fmt::Display for ShopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShopKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casino" => Ok(ShopKind::Casino),
            "mile" | "miles" => Ok(ShopKind::Mile),
            "book" | "books" => Ok(ShopKind::Book),
            "tm" | "tms" => Ok(ShopKind::Tm),
            other => Err(format!("unknown shop '{}'", other)),
        }
    }
}

/// Configured item ids per shop, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopLists {
    pub casino: Vec<ItemId>,
    pub mile: Vec<ItemId>,
    pub book: Vec<ItemId>,
    pub tm: Vec<ItemId>,
}

impl ShopLists {
    pub fn get(&self, shop: ShopKind) -> &[ItemId] {
        match shop {
            ShopKind::Casino => &self.casino,
            ShopKind::Mile => &self.mile,
            ShopKind::Book => &self.book,
            ShopKind::Tm => &self.tm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopEntry<'a> {
    pub item: &'a Item,
    pub currency: PriceKind,
    /// 0 when the item has no price in this currency.
    pub price: u32,
}

/// Configured items of `shop` that exist in the catalog, in configured order.
pub fn shop_listing<'a>(catalog: &'a Catalog, lists: &ShopLists, shop: ShopKind) -> Vec<ShopEntry<'a>> {
    let currency = shop.currency();
    lists
        .get(shop)
        .iter()
        .filter_map(|id| catalog.items.get(id))
        .map(|item| ShopEntry {
            item,
            currency,
            price: item.price.get(currency).unwrap_or(0),
        })
        .collect()
}
