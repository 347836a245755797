use std::collections::HashSet;

use proptest::prelude::*;
use seira_catalog::catalog::{Creature, Item};
use seira_catalog::query::{
    CreatureFilter, Filter, FilterContext, ItemFilter, PageCursor, Region, RegionTable, apply,
    paginate,
};
use serde_json::json;

const CATEGORIES: [&str; 4] = ["medicine", "pokeball", "berry", "tm"];
const RARITIES: [&str; 3] = ["comum", "raro", "epico"];

fn item_strategy() -> impl Strategy<Value = (usize, usize, bool, String)> {
    (0..CATEGORIES.len(), 0..RARITIES.len(), any::<bool>(), "[a-zA-Z ]{1,12}")
}

fn build_items(specs: Vec<(usize, usize, bool, String)>) -> Vec<Item> {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, (category, rarity, craftable, name))| {
            serde_json::from_value(json!({
                "id": i + 1,
                "name": name,
                "category": CATEGORIES[category],
                "rarity": RARITIES[rarity],
                "is_craftable": craftable,
            }))
            .unwrap()
        })
        .collect()
}

fn filter_strategy() -> impl Strategy<Value = ItemFilter> {
    (
        proptest::option::of(0..CATEGORIES.len()),
        proptest::option::of(0..RARITIES.len()),
        any::<bool>(),
        proptest::option::of("[a-z]{1,2}"),
    )
        .prop_map(|(category, rarity, craftable, search)| ItemFilter {
            search,
            category: category.map(|c| CATEGORIES[c].to_uppercase()),
            rarity: rarity.map(|r| RARITIES[r].to_string()),
            craftable,
            ..ItemFilter::default()
        })
}

const TYPES: [&str; 5] = ["Fire", "Water", "Grass", "Dragon", "Ice"];
const PREFIXES: [&str; 3] = ["", "Alolan ", "Galarian "];

fn creature_strategy() -> impl Strategy<Value = (Vec<usize>, usize, String)> {
    (
        proptest::collection::vec(0..TYPES.len(), 1..3),
        0..PREFIXES.len(),
        "[b-z]{3,8}",
    )
}

fn build_creatures(specs: Vec<(Vec<usize>, usize, String)>) -> Vec<Creature> {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, (types, prefix, name))| {
            let types: Vec<&str> = types.into_iter().map(|t| TYPES[t]).collect();
            serde_json::from_value(json!({
                "id": i + 1,
                "name": format!("{}{}", PREFIXES[prefix], name),
                "types": types,
            }))
            .unwrap()
        })
        .collect()
}

fn creature_filter_strategy() -> impl Strategy<Value = CreatureFilter> {
    (
        proptest::option::of((0..TYPES.len(), any::<bool>())),
        proptest::option::of(prop_oneof![Just(Region::Alola), Just(Region::Galar)]),
    )
        .prop_map(|(creature_type, region)| CreatureFilter {
            creature_type: creature_type.map(|(t, upper)| {
                if upper {
                    TYPES[t].to_uppercase()
                } else {
                    TYPES[t].to_lowercase()
                }
            }),
            region,
            ..CreatureFilter::default()
        })
}

proptest! {
    #[test]
    fn creature_type_and_region_facets(
        specs in proptest::collection::vec(creature_strategy(), 0..30),
        filter in creature_filter_strategy(),
        alola_ids in proptest::collection::hash_set(1u32..31, 0..5),
    ) {
        let creatures = build_creatures(specs);
        let regions = RegionTable::new().with_ids(Region::Alola, alola_ids.iter().copied());
        let hidden = HashSet::new();
        let ctx = FilterContext::new(&regions, &hidden);

        let once = apply(&creatures, &filter, &ctx);
        let twice = apply(once.iter().copied(), &filter, &ctx);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.windows(2).all(|w| w[0].id < w[1].id));

        // any one of the tags matches, ignoring case; a region takes listed
        // ids or names carrying its keyword
        let expected: Vec<u32> = creatures
            .iter()
            .filter(|c| {
                let typed = filter.creature_type.as_deref().is_none_or(|wanted| {
                    c.types.iter().any(|t| t.to_lowercase() == wanted.to_lowercase())
                });
                let regional = match filter.region {
                    Some(Region::Alola) => alola_ids.contains(&c.id) || c.name.starts_with("Alolan "),
                    Some(Region::Galar) => c.name.starts_with("Galarian "),
                    Some(_) => false,
                    None => true,
                };
                typed && regional
            })
            .map(|c| c.id)
            .collect();
        let got: Vec<u32> = once.iter().map(|c| c.id).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn filtering_is_stable_and_idempotent(
        specs in proptest::collection::vec(item_strategy(), 0..40),
        filter in filter_strategy(),
    ) {
        let items = build_items(specs);
        let regions = RegionTable::new();
        let hidden = HashSet::new();
        let ctx = FilterContext::new(&regions, &hidden);

        let once = apply(&items, &filter, &ctx);
        let twice = apply(once.iter().copied(), &filter, &ctx);
        prop_assert_eq!(&once, &twice);

        // order preserved: ids strictly increase like the source
        prop_assert!(once.windows(2).all(|w| w[0].id < w[1].id));
        prop_assert!(once.iter().all(|item| filter.matches(item, &ctx)));

        let rejected = items.iter().filter(|item| !filter.matches(item, &ctx)).count();
        prop_assert_eq!(once.len() + rejected, items.len());
    }

    #[test]
    fn empty_filter_keeps_everything(specs in proptest::collection::vec(item_strategy(), 0..40)) {
        let items = build_items(specs);
        let regions = RegionTable::new();
        let hidden = HashSet::new();
        let ctx = FilterContext::new(&regions, &hidden);

        prop_assert!(ItemFilter::default().is_empty());
        prop_assert_eq!(apply(&items, &ItemFilter::default(), &ctx).len(), items.len());
    }

    #[test]
    fn pages_partition_the_input(records in proptest::collection::vec(any::<u16>(), 0..100), size in 1usize..12) {
        let first = paginate(&records, 1, size);
        prop_assert_eq!(first.total_pages == 0, records.is_empty());
        prop_assert_eq!(first.total_pages, records.len().div_ceil(size));

        let mut joined = Vec::new();
        for page in 1..=first.total_pages {
            let slice = paginate(&records, page, size);
            prop_assert!(slice.items.len() <= size);
            prop_assert!(!slice.items.is_empty());
            prop_assert_eq!(slice.current_page, page);
            joined.extend(slice.items);
        }
        prop_assert_eq!(joined, records.clone());

        let past_end = paginate(&records, first.total_pages + 1, size);
        prop_assert!(past_end.items.is_empty());
    }

    #[test]
    fn cursor_stays_in_range(requested in 0usize..1000, total in 0usize..50) {
        let mut cursor = PageCursor::new(10);
        let page = cursor.set_page(requested, total);
        prop_assert!(page >= 1);
        prop_assert!(page <= total.max(1));
        prop_assert_eq!(page, cursor.page);
    }
}
