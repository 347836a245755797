mod cards;
pub mod labels;
mod output;

pub use cards::{
    ability_card, creature_card, item_card, map_card, move_card, object_card, pager_line,
    render_detail, render_facets, render_maps, render_page, render_shop, render_validation,
};
pub use output::{Output, OutputBlock};
