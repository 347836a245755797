use super::labels;
use super::output::Output;
use crate::catalog::{
    Ability, Creature, InteractiveObject, Item, LootTable, MapArea, Move, PriceKind,
    ValidationError, direction_rank,
};
use crate::query::{
    AbilityDetail, CreatureDetail, Detail, Facets, ItemDetail, MapDetail, MoveDetail, ObjectDetail,
    Page, PagerSlot, ShopEntry, ShopKind, dex_number, page_window,
};

////////////////////////
/// CARDS            ///
////////////////////////

pub fn creature_card(c: &Creature) -> String {
    let mut line = format!(
        "#{:03} {} [{}]",
        dex_number(c),
        labels::creature_name(&c.name, c.base_form, c.form_kind()),
        c.types.join("/")
    );
    if !c.rarity.is_empty() {
        line.push_str(&format!(" {}", c.rarity));
    }
    line.push_str(&format!(" BST {}", c.stats.total()));
    if let Some(kind) = c.form_kind().filter(|_| !c.base_form) {
        line.push_str(&format!(" {}", labels::form_badge(kind)));
    }
    line
}

pub fn item_card(i: &Item) -> String {
    let mut line = format!(
        "#{:04} {} · {} · {}",
        i.id,
        i.name,
        labels::item_category(&i.category),
        i.rarity_or_default()
    );
    if let Some((kind, value)) = i.price.primary() {
        line.push_str(&format!(" · {} {}", value, labels::currency(kind)));
    }
    line
}

pub fn move_card(m: &Move) -> String {
    let mut line = format!("#{:04} {} [{}] {}", m.id, m.name, m.move_type, m.category);
    let power = m.power.map_or("-".to_string(), |p| p.to_string());
    let accuracy = m.accuracy.map_or("-".to_string(), |a| format!("{}%", a));
    line.push_str(&format!(" POW {} ACC {}", power, accuracy));
    if m.modified_for_rpg {
        line.push_str(" *");
    }
    line
}

pub fn ability_card(a: &Ability) -> String {
    let marker = if a.modified_for_rpg { " *" } else { "" };
    format!("#{:04} {}{}", a.id, a.name, marker)
}

pub fn object_card(o: &InteractiveObject) -> String {
    let mut line = format!("{} ({}) · {}", o.name, o.id, labels::object_type(&o.object_type));
    if let Some(hours) = o.cooldown_hours {
        line.push_str(&format!(" · {}h", hours));
    }
    line
}

pub fn map_card(m: &MapArea) -> String {
    let mut line = format!("{} ({}) · {}", m.name, m.id, labels::map_type(&m.map_type));
    if let Some(biome) = m.biome.as_deref().filter(|b| !b.is_empty()) {
        line.push_str(&format!(" · {}", biome));
    }
    line
}

////////////////////////
/// PAGES            ///
////////////////////////

pub fn pager_line(current: usize, total: usize) -> String {
    page_window(current, total)
        .into_iter()
        .map(|slot| match slot {
            PagerSlot::Page(p) if p == current => format!("[{}]", p),
            PagerSlot::Page(p) => p.to_string(),
            PagerSlot::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_page<T>(out: &mut Output, title: &str, page: &Page<&T>, card: impl Fn(&T) -> String) {
    out.title(title);

    if page.items.is_empty() {
        out.say("Nenhum resultado encontrado.");
    }
    for record in &page.items {
        out.entry(card(*record));
    }

    let mut footer = format!(
        "Página {} de {} ({} resultados)",
        page.current_page,
        page.total_pages.max(1),
        page.total_items
    );
    let pager = pager_line(page.current_page, page.total_pages);
    if !pager.is_empty() {
        footer.push_str(&format!("  {}", pager));
    }
    out.set_footer(footer);
}

pub fn render_maps(out: &mut Output, maps: &[&MapArea]) {
    out.title("Mapas");
    if maps.is_empty() {
        out.say("Nenhum mapa encontrado.");
    }
    for map in maps {
        out.entry(map_card(map));
    }
    out.set_footer(format!("{} mapas", maps.len()));
}

pub fn render_shop(out: &mut Output, shop: ShopKind, entries: &[ShopEntry<'_>]) {
    out.title(format!("Loja: {}", shop));
    if entries.is_empty() {
        out.say("Nenhum item configurado.");
    }
    for e in entries {
        out.entry(format!(
            "#{:04} {} · {} · {} {}",
            e.item.id,
            e.item.name,
            labels::item_category(&e.item.category),
            e.price,
            labels::currency(e.currency)
        ));
    }
}

pub fn render_facets(out: &mut Output, facets: &Facets) {
    out.title("Filtros disponíveis");
    let rows = [
        ("tipos", &facets.creature_types),
        ("categorias de item", &facets.item_categories),
        ("raridades de item", &facets.item_rarities),
        ("categorias de golpe", &facets.move_categories),
        ("classes de golpe", &facets.move_classes),
        ("tipos de mapa", &facets.map_types),
        ("biomas", &facets.map_biomes),
        ("tipos de objeto", &facets.object_types),
    ];
    for (label, values) in rows {
        if !values.is_empty() {
            out.entry(format!("{}: {}", label, values.join(", ")));
        }
    }
}

pub fn render_validation(out: &mut Output, errors: &[ValidationError]) {
    out.title("Verificação do catálogo");
    if errors.is_empty() {
        out.say("Nenhum problema encontrado.");
        return;
    }
    for e in errors {
        out.entry(e.to_string());
    }
    out.set_footer(format!("{} problemas", errors.len()));
}

////////////////////////
/// DETAILS          ///
////////////////////////

pub fn render_detail(out: &mut Output, detail: &Detail<'_>) {
    match detail {
        Detail::Creature(d) => render_creature(out, d),
        Detail::Item(d) => render_item(out, d),
        Detail::Move(d) => render_move(out, d),
        Detail::Ability(d) => render_ability(out, d),
        Detail::Map(d) => render_map(out, d),
        Detail::Object(d) => render_object(out, d),
    }
}

fn render_creature(out: &mut Output, d: &CreatureDetail<'_>) {
    let c = d.creature;
    out.title(format!("#{:03} - {}", d.dex_number, c.name));
    out.say(format!("Tipos: {}", c.types.join(", ")));
    if let Some(class) = c.classification.as_deref() {
        out.say(format!("Classificação: {}", class));
    }
    if let Some(base) = d.base {
        out.say(format!("Forma de: {}", base.name));
    }
    if let Some(entry) = c.dex_entry.as_deref() {
        out.say(entry);
    }

    out.section(format!("Stats (BST {})", c.stats.total()));
    for (name, value) in c.stats.entries() {
        out.entry(format!("{:<9} {}", labels::stat(name), value));
    }

    out.list(
        "Habilidades",
        d.abilities
            .iter()
            .map(|(slot, a)| format!("{}: {}", labels::ability_slot(*slot), a.name)),
    );
    out.list(
        "Formas alternativas",
        d.alternate_forms.iter().map(|f| creature_card(f)),
    );
    out.list(
        "Variações regionais",
        d.regional_variants.iter().map(|f| creature_card(f)),
    );
    out.list(
        "Moveset por level",
        d.level_moves
            .iter()
            .map(|lm| format!("Lv {:>3} {}", lm.level, lm.learned.name)),
    );
    out.list(
        "Golpes aprendíveis",
        d.learnable_moves.iter().map(|m| m.name.clone()),
    );
    out.list("Egg moves", d.egg_moves.iter().map(|m| m.name.clone()));
    out.list(
        "Localizações",
        d.locations
            .iter()
            .map(|l| format!("{} ({})", l.map.name, labels::tier(l.tier))),
    );
    out.list(
        "Objetos",
        d.objects.iter().map(|o| match o.tier {
            Some(tier) => format!("{} ({})", o.object.name, labels::tier(tier)),
            None => o.object.name.clone(),
        }),
    );

    out.list(
        "Cadeia evolutiva",
        d.evolution.iter().flat_map(|stage| {
            let head = format!("Stage {}: {}", stage.stage, stage.name);
            let steps = stage.evolutions.iter().map(|e| {
                let via = match e.item {
                    Some(item) => item.name.clone(),
                    None if e.condition.is_empty() => e.method.to_string(),
                    None => format!("{}: {}", e.method, e.condition),
                };
                format!("  → {} ({})", e.to_name, via)
            });
            std::iter::once(head).chain(steps)
        }),
    );
    out.list(
        "Itens de evolução",
        d.evolution_items.iter().map(|i| item_card(i)),
    );
    out.list(
        "Produção",
        d.production.iter().map(|p| match p.item {
            Some(item) if p.description.is_empty() => item.name.clone(),
            Some(item) => format!("{} - {}", item.name, p.description),
            None => p.description.to_string(),
        }),
    );
    out.list(
        "Held items",
        d.held_items
            .iter()
            .map(|h| format!("{} (drop {}%)", h.item.name, h.chance)),
    );
}

fn render_item(out: &mut Output, d: &ItemDetail<'_>) {
    let i = d.item;
    out.title(format!("#{:04} - {}", i.id, i.name));
    out.say(format!(
        "{} · {}",
        labels::item_category(&i.category),
        i.rarity_or_default()
    ));
    if let Some(sub) = i.subcategory.as_deref() {
        out.say(format!("Subcategoria: {}", sub));
    }
    if i.forageable {
        match i.posts_to_collect {
            Some(posts) => out.say(format!("Coletável ({} posts para coletar)", posts)),
            None => out.say("Coletável"),
        }
    }
    if i.is_book {
        out.say(format!(
            "Livro: {}",
            i.book_category.as_deref().unwrap_or("N/A")
        ));
    }
    if !i.description.is_empty() {
        out.say(&i.description);
    }

    out.list(
        "Preços",
        [PriceKind::Buy, PriceKind::Sell, PriceKind::Casino, PriceKind::Mile]
            .into_iter()
            .filter_map(|kind| {
                i.price.get(kind).map(|v| {
                    format!("{}: {} {}", labels::price_kind(kind), v, labels::currency(kind))
                })
            }),
    );

    if let Some(mv) = d.tm_move {
        out.section("TM");
        out.entry(move_card(mv));
    }
    if let Some(rate) = i.capture_rate {
        out.say(format!("Taxa de captura: {}x", rate));
    }
    out.list(
        "Evolui",
        d.linked_creatures.iter().map(|c| creature_card(c)),
    );
    out.list(
        "Receitas desbloqueadas",
        d.unlocked_recipes.iter().map(|r| item_card(r)),
    );
    out.list(
        "Desbloqueado por",
        d.unlocked_by.iter().map(|b| item_card(b)),
    );
    out.list(
        "Receita",
        d.recipe
            .iter()
            .map(|ing| format!("{}x {}", ing.quantity, ing.item.name)),
    );
    out.list(
        "Usado em",
        d.used_in
            .iter()
            .map(|u| format!("{} ({}x)", u.product.name, u.quantity)),
    );
    out.list(
        "Onde encontrar",
        d.forage_locations
            .iter()
            .map(|m| format!("{} (coleta)", m.name))
            .chain(
                d.loot_sources
                    .iter()
                    .map(|s| format!("{} ({})", s.object.name, labels::tier(s.tier))),
            ),
    );
    out.list(
        "Carregado por",
        d.held_by
            .iter()
            .map(|h| format!("{} (drop {}%)", h.creature.name, h.chance)),
    );
    out.list(
        "Produzido por",
        d.produced_by.iter().map(|c| c.name.clone()),
    );
    out.list(
        "Lojas",
        d.shops.iter().map(|s| {
            let mut line = format!("{} - {}", s.map.name, s.shop);
            if s.sells {
                line.push_str(" · vende");
            }
            match s.buys_for {
                Some(Some(price)) => line.push_str(&format!(" · compra por {} ₽", price)),
                Some(None) => line.push_str(" · compra"),
                None => {}
            }
            line
        }),
    );
}

fn render_move(out: &mut Output, d: &MoveDetail<'_>) {
    let m = d.mv;
    out.title(format!("#{:04} - {}", m.id, m.name));
    out.say(move_card(m));
    if !m.move_class.is_empty() {
        out.say(format!("Classe: {}", m.move_class));
    }
    if let Some(pp) = m.pp {
        out.say(format!("PP {} · prioridade {}", pp, m.priority));
    }
    if let Some(effect) = m.effect.as_deref() {
        out.say(effect);
    }
    out.list("TMs", d.tms.iter().map(|i| item_card(i)));
    out.list(
        "Aprendido por",
        d.learners.iter().map(|l| {
            let mut ways = Vec::new();
            if let Some(level) = l.level {
                ways.push(format!("Lv {}", level));
            }
            if l.learnable {
                ways.push("TM/Tutor".to_string());
            }
            if l.egg {
                ways.push("Egg".to_string());
            }
            format!("{} ({})", l.creature.name, ways.join(", "))
        }),
    );
}

fn render_ability(out: &mut Output, d: &AbilityDetail<'_>) {
    let a = d.ability;
    out.title(format!("#{:04} - {}", a.id, a.name));
    out.say(&a.effect);
    out.list(
        "Pokémon",
        d.holders
            .iter()
            .map(|h| format!("{} ({})", h.creature.name, labels::ability_slot(h.slot))),
    );
}

fn render_map(out: &mut Output, d: &MapDetail<'_>) {
    let m = d.map;
    out.title(m.name.clone());
    out.say(map_card(m));
    if let Some(c) = m.coordinates {
        out.say(format!("Coordenadas: {}, {}", c.x, c.y));
    }
    if !m.description.is_empty() {
        out.say(&m.description);
    }

    let mut accesses: Vec<_> = m.accesses.iter().collect();
    accesses.sort_by_key(|(direction, _)| direction_rank(direction));
    out.list(
        "Acessos",
        accesses.into_iter().map(|(direction, access)| {
            let mut line = format!("{}: {}", labels::direction(direction), access.name);
            if let Some(posts) = access.posts_required {
                line.push_str(&format!(" ({} posts)", posts));
            }
            line
        }),
    );
    out.list(
        "Spawns",
        d.spawns
            .iter()
            .map(|s| format!("{} ({})", creature_card(s.creature), labels::tier(s.tier))),
    );
    out.list(
        "Itens coletáveis",
        d.forageable_items.iter().map(|f| match f.posts_to_collect {
            Some(posts) => format!("{} · {} posts para coletar", item_card(f.item), posts),
            None => item_card(f.item),
        }),
    );
    out.list("Objetos", d.objects.iter().map(|o| object_card(o)));
    out.list(
        "Pontos de interesse",
        m.points_of_interest
            .iter()
            .map(|poi| match poi.description.as_deref().filter(|t| !t.is_empty()) {
                Some(text) => format!("{} - {}", poi.name, text),
                None => poi.name.clone(),
            }),
    );
    for shop in &d.shops {
        out.list(
            &format!("Loja: {}", shop.name),
            shop.sells
                .iter()
                .map(|i| format!("vende {}", item_card(i)))
                .chain(shop.buys.iter().map(|b| {
                    let mut line = format!("compra {}", b.item.name);
                    if let Some(price) = b.price {
                        line.push_str(&format!(" por {} ₽", price));
                    }
                    if let Some(fame) = b.requires_fame {
                        line.push_str(&format!(" (fama {})", fame));
                    }
                    line
                })),
        );
    }
}

fn render_object(out: &mut Output, d: &ObjectDetail<'_>) {
    let o = d.object;
    out.title(o.name.clone());
    out.say(object_card(o));
    out.say(&o.description);
    if let Some(narrative) = o.narrative.as_deref() {
        out.say(narrative);
    }

    let loot_heading = match o.loot {
        LootTable::CreatureAndItems { .. } => "Itens pescáveis",
        _ => "Loot",
    };
    out.list(
        loot_heading,
        d.loot_items
            .iter()
            .map(|l| format!("{} ({}){}", l.item.name, labels::tier(l.tier), rate(l.rate))),
    );
    out.list(
        "Pokémon",
        d.creatures.iter().map(|c| match c.tier {
            Some(tier) => format!(
                "{} ({}){}",
                c.creature.name,
                labels::tier(tier),
                rate(c.rate)
            ),
            None => c.creature.name.clone(),
        }),
    );
    out.list("Localizações", d.locations.iter().map(|m| m.name.clone()));
}

fn rate(rate: Option<f32>) -> String {
    rate.map(|r| format!(" · Taxa: {}%", r)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::paginate;
    use crate::render::OutputBlock;
    use serde_json::json;

    #[test]
    fn cards_show_the_key_fields() {
        let item: Item = serde_json::from_value(json!({
            "id": 4, "name": "Great Ball", "category": "pokeball", "price": { "buy": 600 }
        }))
        .unwrap();
        assert_eq!(item_card(&item), "#0004 Great Ball · Pokébolas · comum · 600 ₽");

        let form: Creature = serde_json::from_value(json!({
            "id": 10034, "name": "Charizard", "types": ["Fire", "Dragon"], "form_of": 6,
            "base_form": false, "form_type": "mega", "stats": { "hp": 78, "attack": 130 }
        }))
        .unwrap();
        assert_eq!(
            creature_card(&form),
            "#006 Charizard (Mega) [Fire/Dragon] BST 208 MEGA"
        );
    }

    #[test]
    fn page_footer_carries_the_pager() {
        let records: Vec<u32> = (1..=40).collect();
        let refs: Vec<&u32> = records.iter().collect();
        let page = paginate(&refs, 2, 15);

        let mut out = Output::new();
        render_page(&mut out, "Números", &page, |n| n.to_string());

        assert_eq!(
            out.blocks.last(),
            Some(&OutputBlock::Footer(
                "Página 2 de 3 (40 resultados)  1 [2] 3".into()
            ))
        );
        assert_eq!(out.blocks.len(), 1 + 15 + 1);
    }
}
