use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum OutputBlock {
    Title(String),
    Section(String),
    Text(String),
    Entry(String),
    Footer(String),
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Title(s));
        }
    }

    pub fn section(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Section(s));
        }
    }

    pub fn say(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Text(s));
        }
    }

    /// One line of a list (a card, a relation, a stat).
    pub fn entry(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Entry(s));
        }
    }

    /// Section heading followed by its entries; nothing when `entries` is empty.
    pub fn list(&mut self, heading: &str, entries: impl IntoIterator<Item = String>) {
        let entries: Vec<String> = entries.into_iter().collect();
        if entries.is_empty() {
            return;
        }
        self.section(heading);
        for e in entries {
            self.entry(e);
        }
    }

    pub fn set_footer(&mut self, s: impl Into<String>) {
        let s = s.into();
        if s.trim().is_empty() {
            return;
        }

        // ensure only one Footer block exists, always last
        self.blocks.retain(|b| !matches!(b, OutputBlock::Footer(_)));
        self.blocks.push(OutputBlock::Footer(s));
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
