mod collection;
#[cfg(feature = "http")]
mod http;
mod loader;
mod model;
mod store;
mod validator;

pub use collection::{Catalog, CatalogError, Collection};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use loader::{LoadError, parse_collection, parse_collection_str};
pub use store::{CollectionStore, SourceUrls, Transport};
pub use validator::{ValidationError, validate_catalog};

pub use model::{
    Ability, AbilityId, AbilitySets, AbilitySlot, BuyOffer, CollectionKind, Coordinates, Creature,
    CreatureId, Evolution, EvolutionStage, FORM_ID_THRESHOLD, Forageable, FormKind, HeldItem,
    InteractiveObject, Item, ItemId, LevelMove, LootDrop, LootTable, MapAccess, MapArea, MapId,
    Move, MoveId, ObjectId, ObjectKind, PointOfInterest, Price, PriceKind, Production,
    RecipeEntry, Record, ShopData, Stats, Tier, Tiered, direction_rank,
};
