mod detail;
mod facets;
mod filters;
mod helpers;
mod paginate;
mod regions;
pub mod resolve;
mod shops;

pub use detail::{
    AbilityDetail, CreatureDetail, Detail, ItemDetail, MapDetail, MoveDetail, ObjectDetail, open,
    open_ability, open_creature, open_item, open_map, open_move, open_object,
};
pub use facets::{CREATURE_TYPES, Facets};
pub use filters::{
    AbilityFilter, CreatureFilter, Filter, FilterContext, FilterError, ItemFilter, MapFilter,
    MoveFilter, ObjectFilter, apply,
};
pub use helpers::{contains_ci, dex_number, eq_ci};
pub use paginate::{Page, PageCursor, PagerSlot, ViewState, page_window, paginate};
pub use regions::{Region, RegionTable};
pub use shops::{ShopEntry, ShopKind, ShopLists, shop_listing};
