pub mod catalog;
pub mod config;
pub mod query;
pub mod render;

use tracing::debug;

use catalog::{
    Ability, Catalog, CollectionKind, Creature, InteractiveObject, Item, MapArea, Move,
    ValidationError, validate_catalog,
};
use query::{
    AbilityFilter, CreatureFilter, Detail, Facets, Filter, FilterContext, FilterError, ItemFilter,
    MapFilter, MoveFilter, ObjectFilter, Page, ShopEntry, ShopKind, ViewState, apply, paginate,
    shop_listing,
};
use render::Output;

pub use config::{CatalogConfig, ConfigError, load_config_from_file, load_config_from_str};

/// A browsing session: the loaded catalog plus one filter and page cursor per
/// view. Views are independent; changing a filter sends that view to page 1.
pub struct CatalogSession {
    pub catalog: Catalog,
    pub config: CatalogConfig,
    pub creature_view: ViewState<CreatureFilter>,
    pub item_view: ViewState<ItemFilter>,
    pub move_view: ViewState<MoveFilter>,
    pub ability_view: ViewState<AbilityFilter>,
    pub object_view: ViewState<ObjectFilter>,
    pub map_filter: MapFilter,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use std::collections::HashMap;

    use super::*;
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use serde_wasm_bindgen::{from_value, to_value};
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<render::OutputBlock>,
        quit: bool,
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    fn parse_kind(kind: &str) -> Result<CollectionKind, JsValue> {
        kind.parse().map_err(|e: String| JsValue::from_str(&e))
    }

    fn filter_from<F: DeserializeOwned>(value: JsValue) -> Result<F, JsValue> {
        from_value(value).map_err(js_err)
    }

    #[wasm_bindgen]
    pub struct WasmCatalog {
        session: CatalogSession,
    }

    #[wasm_bindgen]
    impl WasmCatalog {
        /// Build a session from config TOML and an object mapping collection
        /// names to the JSON text of their documents.
        #[wasm_bindgen(constructor)]
        pub fn new(config_toml: &str, documents: JsValue) -> Result<WasmCatalog, JsValue> {
            let config = load_config_from_str(config_toml).map_err(js_err)?;
            let documents: HashMap<CollectionKind, String> =
                from_value(documents).map_err(js_err)?;
            let catalog = Catalog::from_documents(&documents).map_err(js_err)?;
            Ok(WasmCatalog {
                session: CatalogSession::new(catalog, config),
            })
        }

        /// Process one command line and return the output blocks and quit flag.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            let (out, quit) = self.session.step(input);
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit,
            })
            .unwrap_or(JsValue::NULL)
        }

        /// Replace a view's whole filter with a filter object.
        #[wasm_bindgen(js_name = setFilter)]
        pub fn set_filter(&mut self, kind: &str, filter: JsValue) -> Result<(), JsValue> {
            let s = &mut self.session;
            match parse_kind(kind)? {
                CollectionKind::Creatures => s.creature_view.set_filter(filter_from(filter)?),
                CollectionKind::Items => s.item_view.set_filter(filter_from(filter)?),
                CollectionKind::Moves => s.move_view.set_filter(filter_from(filter)?),
                CollectionKind::Abilities => s.ability_view.set_filter(filter_from(filter)?),
                CollectionKind::Objects => s.object_view.set_filter(filter_from(filter)?),
                CollectionKind::Maps => s.map_filter = filter_from(filter)?,
            }
            Ok(())
        }

        #[wasm_bindgen(js_name = setField)]
        pub fn set_field(&mut self, kind: &str, key: &str, value: &str) -> Result<(), JsValue> {
            self.session
                .set_field(parse_kind(kind)?, key, value)
                .map_err(js_err)
        }

        #[wasm_bindgen(js_name = clearFilter)]
        pub fn clear_filter(&mut self, kind: &str) -> Result<(), JsValue> {
            self.session.clear_filter(parse_kind(kind)?);
            Ok(())
        }

        /// Returns the page actually selected after clamping.
        #[wasm_bindgen(js_name = setPage)]
        pub fn set_page(&mut self, kind: &str, page: usize) -> Result<usize, JsValue> {
            Ok(self.session.set_page(parse_kind(kind)?, page))
        }

        /// Current page of a view as `{ items, total_pages, current_page, total_items }`.
        #[wasm_bindgen]
        pub fn page(&self, kind: &str) -> Result<JsValue, JsValue> {
            let s = &self.session;
            match parse_kind(kind)? {
                CollectionKind::Creatures => to_value(&s.creature_page()),
                CollectionKind::Items => to_value(&s.item_page()),
                CollectionKind::Moves => to_value(&s.move_page()),
                CollectionKind::Abilities => to_value(&s.ability_page()),
                CollectionKind::Objects => to_value(&s.object_page()),
                CollectionKind::Maps => to_value(&s.visible_maps()),
            }
            .map_err(js_err)
        }

        #[wasm_bindgen]
        pub fn open(&self, kind: &str, id: &str) -> Result<JsValue, JsValue> {
            let detail = self.session.open(parse_kind(kind)?, id);
            to_value(&detail).map_err(js_err)
        }

        #[wasm_bindgen]
        pub fn shop(&self, shop: &str) -> Result<JsValue, JsValue> {
            let shop: ShopKind = shop.parse().map_err(|e: String| JsValue::from_str(&e))?;
            to_value(&self.session.shop(shop)).map_err(js_err)
        }

        /// Visible maps under the current map filter.
        #[wasm_bindgen]
        pub fn maps(&self) -> JsValue {
            to_value(&self.session.visible_maps()).unwrap_or(JsValue::NULL)
        }

        #[wasm_bindgen]
        pub fn facets(&self) -> JsValue {
            to_value(&self.session.facets()).unwrap_or(JsValue::NULL)
        }
    }
}

fn view_page<'a, T, F: Filter<T>>(
    records: &'a [T],
    view: &ViewState<F>,
    ctx: &FilterContext<'_>,
) -> Page<&'a T> {
    let filtered = apply(records, view.filter(), ctx);
    paginate(&filtered, view.page(), view.per_page())
}

fn assign<T, F: Filter<T>>(filter: &mut F, fields: &[(String, String)]) -> Result<(), FilterError> {
    for (key, value) in fields {
        filter.set_field(key, value)?;
    }
    Ok(())
}

fn page_count<T, F: Filter<T>>(records: &[T], view: &ViewState<F>, ctx: &FilterContext<'_>) -> usize {
    apply(records, view.filter(), ctx)
        .len()
        .div_ceil(view.per_page().max(1))
}

impl CatalogSession {
    pub fn new(catalog: Catalog, config: CatalogConfig) -> Self {
        let per_page = config.per_page;
        CatalogSession {
            catalog,
            config,
            creature_view: ViewState::new(per_page),
            item_view: ViewState::new(per_page),
            move_view: ViewState::new(per_page),
            ability_view: ViewState::new(per_page),
            object_view: ViewState::new(per_page),
            map_filter: MapFilter::default(),
        }
    }

    fn ctx(&self) -> FilterContext<'_> {
        FilterContext::new(&self.config.regions, &self.config.hidden_maps)
    }

    ////////////////////
    /// VIEWS        ///
    ////////////////////

    pub fn creature_page(&self) -> Page<&Creature> {
        view_page(self.catalog.creatures.as_slice(), &self.creature_view, &self.ctx())
    }

    pub fn item_page(&self) -> Page<&Item> {
        view_page(self.catalog.items.as_slice(), &self.item_view, &self.ctx())
    }

    pub fn move_page(&self) -> Page<&Move> {
        view_page(self.catalog.moves.as_slice(), &self.move_view, &self.ctx())
    }

    pub fn ability_page(&self) -> Page<&Ability> {
        view_page(self.catalog.abilities.as_slice(), &self.ability_view, &self.ctx())
    }

    pub fn object_page(&self) -> Page<&InteractiveObject> {
        view_page(self.catalog.objects.as_slice(), &self.object_view, &self.ctx())
    }

    /// Maps matching the map filter, hidden maps excluded. Not paginated.
    pub fn visible_maps(&self) -> Vec<&MapArea> {
        apply(self.catalog.maps.as_slice(), &self.map_filter, &self.ctx())
    }

    /// Set one filter field of a view from `key=value` text.
    pub fn set_field(
        &mut self,
        kind: CollectionKind,
        key: &str,
        value: &str,
    ) -> Result<(), FilterError> {
        self.set_fields(kind, &[(key.to_string(), value.to_string())])
    }

    /// Set several filter fields at once. Either every assignment applies or
    /// none does; a rejected one leaves the filter and its page as they were.
    pub fn set_fields(
        &mut self,
        kind: CollectionKind,
        fields: &[(String, String)],
    ) -> Result<(), FilterError> {
        debug!(%kind, count = fields.len(), "filter fields");
        match kind {
            CollectionKind::Creatures => self.creature_view.try_update_filter(|f| assign::<Creature, _>(f, fields)),
            CollectionKind::Items => self.item_view.try_update_filter(|f| assign::<Item, _>(f, fields)),
            CollectionKind::Moves => self.move_view.try_update_filter(|f| assign::<Move, _>(f, fields)),
            CollectionKind::Abilities => self.ability_view.try_update_filter(|f| assign::<Ability, _>(f, fields)),
            CollectionKind::Objects => self.object_view.try_update_filter(|f| assign::<InteractiveObject, _>(f, fields)),
            CollectionKind::Maps => {
                let mut draft = self.map_filter.clone();
                assign::<MapArea, _>(&mut draft, fields)?;
                self.map_filter = draft;
                Ok(())
            }
        }
    }

    pub fn clear_filter(&mut self, kind: CollectionKind) {
        match kind {
            CollectionKind::Creatures => self.creature_view.clear_filter(),
            CollectionKind::Items => self.item_view.clear_filter(),
            CollectionKind::Moves => self.move_view.clear_filter(),
            CollectionKind::Abilities => self.ability_view.clear_filter(),
            CollectionKind::Objects => self.object_view.clear_filter(),
            CollectionKind::Maps => self.map_filter = MapFilter::default(),
        }
    }

    /// Number of pages the view currently spans.
    pub fn total_pages(&self, kind: CollectionKind) -> usize {
        let ctx = self.ctx();
        match kind {
            CollectionKind::Creatures => page_count(self.catalog.creatures.as_slice(), &self.creature_view, &ctx),
            CollectionKind::Items => page_count(self.catalog.items.as_slice(), &self.item_view, &ctx),
            CollectionKind::Moves => page_count(self.catalog.moves.as_slice(), &self.move_view, &ctx),
            CollectionKind::Abilities => page_count(self.catalog.abilities.as_slice(), &self.ability_view, &ctx),
            CollectionKind::Objects => page_count(self.catalog.objects.as_slice(), &self.object_view, &ctx),
            CollectionKind::Maps => 1,
        }
    }

    pub fn current_page(&self, kind: CollectionKind) -> usize {
        match kind {
            CollectionKind::Creatures => self.creature_view.page(),
            CollectionKind::Items => self.item_view.page(),
            CollectionKind::Moves => self.move_view.page(),
            CollectionKind::Abilities => self.ability_view.page(),
            CollectionKind::Objects => self.object_view.page(),
            CollectionKind::Maps => 1,
        }
    }

    /// Move a view to `requested`, clamped to the pages it has. Returns the
    /// page selected.
    pub fn set_page(&mut self, kind: CollectionKind, requested: usize) -> usize {
        let total = self.total_pages(kind);
        match kind {
            CollectionKind::Creatures => self.creature_view.set_page(requested, total),
            CollectionKind::Items => self.item_view.set_page(requested, total),
            CollectionKind::Moves => self.move_view.set_page(requested, total),
            CollectionKind::Abilities => self.ability_view.set_page(requested, total),
            CollectionKind::Objects => self.object_view.set_page(requested, total),
            CollectionKind::Maps => 1,
        }
    }

    pub fn open(&self, kind: CollectionKind, id: &str) -> Option<Detail<'_>> {
        query::open(&self.catalog, kind, id)
    }

    pub fn shop(&self, shop: ShopKind) -> Vec<ShopEntry<'_>> {
        shop_listing(&self.catalog, &self.config.shops, shop)
    }

    pub fn facets(&self) -> Facets {
        Facets::collect(&self.catalog)
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validate_catalog(&self.catalog)
    }

    ////////////////////
    /// RENDERING    ///
    ////////////////////

    /// Render the current page of a view.
    pub fn render_view(&self, kind: CollectionKind) -> Output {
        let mut out = Output::new();
        match kind {
            CollectionKind::Creatures => {
                render::render_page(&mut out, "Pokémon", &self.creature_page(), render::creature_card)
            }
            CollectionKind::Items => {
                render::render_page(&mut out, "Itens", &self.item_page(), render::item_card)
            }
            CollectionKind::Moves => {
                render::render_page(&mut out, "Golpes", &self.move_page(), render::move_card)
            }
            CollectionKind::Abilities => {
                render::render_page(&mut out, "Habilidades", &self.ability_page(), render::ability_card)
            }
            CollectionKind::Objects => {
                render::render_page(&mut out, "Objetos", &self.object_page(), render::object_card)
            }
            CollectionKind::Maps => render::render_maps(&mut out, &self.visible_maps()),
        }
        out
    }

    ////////////////////
    /// COMMANDS     ///
    ////////////////////

    /// Process one command line. Returns the output and whether to quit.
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let input = input.trim();
        let mut out = Output::new();
        if input.is_empty() {
            return (out, false);
        }

        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (input, ""),
        };

        match verb.to_lowercase().as_str() {
            "quit" | "exit" => {
                out.say("Até mais.");
                return (out, true);
            }
            "help" | "?" => render_help(&mut out),
            "list" | "ls" => {
                let (kind, page) = match rest.split_once(char::is_whitespace) {
                    Some((k, p)) => (k, Some(p.trim())),
                    None => (rest, None),
                };
                let Some(kind) = parse_kind(&mut out, kind) else {
                    return (out, false);
                };
                if let Some(page) = page {
                    match page.parse::<usize>() {
                        Ok(n) => {
                            self.set_page(kind, n);
                        }
                        Err(_) => {
                            out.say(format!("'{}' não é um número de página.", page));
                            return (out, false);
                        }
                    }
                }
                out = self.render_view(kind);
            }
            "maps" => {
                if let Err(e) = self.set_fields(CollectionKind::Maps, &parse_assignments(rest)) {
                    out.say(e.to_string());
                    return (out, false);
                }
                out = self.render_view(CollectionKind::Maps);
            }
            "filter" => {
                let (kind, assignments) = match rest.split_once(char::is_whitespace) {
                    Some((k, a)) => (k, a.trim()),
                    None => (rest, ""),
                };
                let Some(kind) = parse_kind(&mut out, kind) else {
                    return (out, false);
                };
                let assignments = parse_assignments(assignments);
                if assignments.is_empty() {
                    out.say("Use: filter <coleção> campo=valor ...");
                    return (out, false);
                }
                if let Err(e) = self.set_fields(kind, &assignments) {
                    out.say(e.to_string());
                    return (out, false);
                }
                out = self.render_view(kind);
            }
            "clear" => {
                if let Some(kind) = parse_kind(&mut out, rest) {
                    self.clear_filter(kind);
                    out = self.render_view(kind);
                }
            }
            "page" | "next" | "prev" => {
                let (kind, arg) = match rest.split_once(char::is_whitespace) {
                    Some((k, a)) => (k, a.trim()),
                    None => (rest, ""),
                };
                let Some(kind) = parse_kind(&mut out, kind) else {
                    return (out, false);
                };
                let current = self.current_page(kind);
                let requested = match verb.to_lowercase().as_str() {
                    "next" => Some(current + 1),
                    "prev" => Some(current.saturating_sub(1)),
                    _ => arg.parse::<usize>().ok(),
                };
                match requested {
                    Some(n) => {
                        self.set_page(kind, n);
                        out = self.render_view(kind);
                    }
                    None => out.say(format!("'{}' não é um número de página.", arg)),
                }
            }
            "show" | "open" => {
                let (kind, id) = match rest.split_once(char::is_whitespace) {
                    Some((k, i)) => (k, i.trim()),
                    None => (rest, ""),
                };
                let Some(kind) = parse_kind(&mut out, kind) else {
                    return (out, false);
                };
                if id.is_empty() {
                    out.say("Abrir qual registro?");
                } else {
                    match self.open(kind, id) {
                        Some(detail) => render::render_detail(&mut out, &detail),
                        None => out.say(format!("Nenhum registro '{}' em {}.", id, kind)),
                    }
                }
            }
            "shop" => match rest.parse::<ShopKind>() {
                Ok(shop) => render::render_shop(&mut out, shop, &self.shop(shop)),
                Err(e) => out.say(e),
            },
            "facets" => render::render_facets(&mut out, &self.facets()),
            "check" => render::render_validation(&mut out, &self.validate()),
            _ => out.say("Comando desconhecido. Digite 'help' para ver os comandos."),
        }

        (out, false)
    }
}

fn parse_kind(out: &mut Output, text: &str) -> Option<CollectionKind> {
    if text.trim().is_empty() {
        out.say("Qual coleção? (creatures, items, moves, abilities, maps, objects)");
        return None;
    }
    match text.parse() {
        Ok(kind) => Some(kind),
        Err(e) => {
            out.say(e);
            None
        }
    }
}

/// Split `key=value key2=two words` into pairs. Words without `=` continue
/// the previous value.
fn parse_assignments(text: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for word in text.split_whitespace() {
        match word.split_once('=') {
            Some((key, value)) => pairs.push((key.to_lowercase(), value.to_string())),
            None => {
                if let Some((_, value)) = pairs.last_mut() {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(word);
                }
            }
        }
    }
    pairs
}

fn render_help(out: &mut Output) {
    out.title("Comandos");
    for line in [
        "list <coleção> [página]      lista a página atual de uma coleção",
        "filter <coleção> campo=valor filtra (valor vazio limpa o campo)",
        "clear <coleção>              remove todos os filtros",
        "page <coleção> <n>           vai para a página n (next/prev também)",
        "show <coleção> <id|nome>     abre um registro com suas relações",
        "maps [campo=valor]           lista os mapas visíveis",
        "shop <casino|mile|book|tm>   itens de uma loja",
        "facets                       valores disponíveis para os filtros",
        "check                        verifica referências quebradas",
        "quit                         sai",
    ] {
        out.entry(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputBlock;

    #[test]
    fn assignments_join_words_into_values() {
        assert_eq!(
            parse_assignments("search=mr mime type=Psychic region="),
            vec![
                ("search".to_string(), "mr mime".to_string()),
                ("type".to_string(), "Psychic".to_string()),
                ("region".to_string(), String::new()),
            ]
        );
        assert!(parse_assignments("dangling words").is_empty());
    }

    #[test]
    fn unknown_commands_and_kinds_are_reported_not_fatal() {
        let mut session = CatalogSession::new(Catalog::default(), CatalogConfig::default());

        let (out, quit) = session.step("dance");
        assert!(!quit);
        assert!(matches!(out.blocks.as_slice(), [OutputBlock::Text(_)]));

        let (out, _) = session.step("list pokedex");
        assert!(matches!(out.blocks.as_slice(), [OutputBlock::Text(t)] if t.contains("pokedex")));

        let (_, quit) = session.step("quit");
        assert!(quit);
    }

    #[test]
    fn empty_view_renders_single_page() {
        let mut session = CatalogSession::new(Catalog::default(), CatalogConfig::default());
        assert_eq!(session.set_page(CollectionKind::Items, 9), 1);

        let (out, _) = session.step("list items");
        assert!(matches!(out.blocks.last(), Some(OutputBlock::Footer(f)) if f.starts_with("Página 1 de 1")));
    }
}
