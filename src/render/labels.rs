//! Fixed display labels. Unknown tags fall through unchanged.

use crate::catalog::{AbilitySlot, FormKind, PriceKind, Tier};

pub fn item_category(category: &str) -> &str {
    match category {
        "medicine" => "Consumíveis",
        "key-item" => "Itens Chave",
        "pokeball" => "Pokébolas",
        "other" => "Outros",
        "berry" => "Berries",
        "held-item" => "Held Items",
        "tm" => "TMs",
        "craft-material" => "Materiais de Craft",
        "evolution-item" => "Item de Evolução",
        other => other,
    }
}

pub fn map_type(map_type: &str) -> &str {
    match map_type {
        "city" => "Cidade",
        "route" => "Rota",
        "landmark" => "Landmark",
        other => other,
    }
}

pub fn direction(direction: &str) -> &str {
    match direction {
        "north" => "Norte",
        "south" => "Sul",
        "east" => "Leste",
        "west" => "Oeste",
        other => other,
    }
}

pub fn object_type(object_type: &str) -> &str {
    match object_type {
        "berry_tree" => "Árvore de Berries",
        "apricorn_tree" => "Árvore de Apricorn",
        "fishing_spot" => "Ponto de Pesca",
        "evolution_stone" => "Pedra de Evolução",
        "evolution_location" => "Local de Evolução",
        "social_spot" => "Local Social",
        other => other,
    }
}

pub fn stat(name: &str) -> String {
    match name {
        "hp" => "HP".into(),
        "attack" => "ATQ".into(),
        "defense" => "DEF".into(),
        "special_attack" => "ATQ ESP.".into(),
        "special_defense" => "DEF ESP.".into(),
        "speed" => "VEL".into(),
        other => other.to_uppercase(),
    }
}

pub fn tier(tier: Tier) -> &'static str {
    match tier {
        Tier::Common => "comum",
        Tier::Rare => "raro",
        Tier::Epic => "épico",
    }
}

pub fn currency(kind: PriceKind) -> &'static str {
    match kind {
        PriceKind::Buy | PriceKind::Sell => "₽",
        PriceKind::Casino => "chips",
        PriceKind::Mile => "miles",
    }
}

pub fn price_kind(kind: PriceKind) -> &'static str {
    match kind {
        PriceKind::Buy => "Compra",
        PriceKind::Sell => "Venda",
        PriceKind::Casino => "Casino",
        PriceKind::Mile => "Miles",
    }
}

pub fn ability_slot(slot: AbilitySlot) -> &'static str {
    match slot {
        AbilitySlot::Normal => "Normal",
        AbilitySlot::Hidden => "Hidden",
        AbilitySlot::Exotic => "Exótica",
    }
}

pub fn form_badge(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Mega => "MEGA",
        FormKind::Gigantamax => "GMAX",
        FormKind::Regional => "REGIONAL",
    }
}

/// Display name of a creature: alternate forms get their form in parentheses
/// unless the name already says it. Regional forms already named after
/// their region get nothing.
pub fn creature_name(name: &str, base_form: bool, form: Option<FormKind>) -> String {
    const REGIONAL_ADJECTIVES: [&str; 5] = ["Alolan", "Galarian", "Hisuian", "Paldean", "Seirian"];

    let label = match (base_form, form) {
        (false, Some(FormKind::Mega)) => "Mega",
        (false, Some(FormKind::Gigantamax)) => "Gigantamax",
        (false, Some(FormKind::Regional))
            if !REGIONAL_ADJECTIVES.iter().any(|a| name.contains(a)) =>
        {
            "Regional"
        }
        _ => return name.to_string(),
    };

    if name.contains(label) {
        name.to_string()
    } else {
        format!("{} ({})", name, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_translate_and_unknown_pass_through() {
        assert_eq!(item_category("pokeball"), "Pokébolas");
        assert_eq!(item_category("fossil"), "fossil");
        assert_eq!(map_type("route"), "Rota");
        assert_eq!(object_type("fishing_spot"), "Ponto de Pesca");
        assert_eq!(direction("west"), "Oeste");
        assert_eq!(direction("up"), "up");
        assert_eq!(stat("special_defense"), "DEF ESP.");
        assert_eq!(stat("luck"), "LUCK");
    }

    #[test]
    fn form_names() {
        assert_eq!(creature_name("Charizard", false, Some(FormKind::Mega)), "Charizard (Mega)");
        assert_eq!(creature_name("Mega Charizard X", false, Some(FormKind::Mega)), "Mega Charizard X");
        assert_eq!(creature_name("Alolan Vulpix", false, Some(FormKind::Regional)), "Alolan Vulpix");
        assert_eq!(creature_name("Wooper", false, Some(FormKind::Regional)), "Wooper (Regional)");
        assert_eq!(creature_name("Pikachu", true, None), "Pikachu");
    }
}
