//! In-memory document model: a flat list of blocks built with chained calls.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// A span of text with uniform formatting. `\n` inside the text becomes a
/// line break within the same paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Level 0 is the document title; levels 1-9 map to Heading styles.
    Heading {
        text: String,
        level: u8,
        alignment: Alignment,
    },
    Paragraph(Vec<Run>),
    Bullet(String),
    Table(Table),
}

/// Grid-styled table; every row has the same number of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    title: Option<String>,
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a centered level-0 heading and records it as the package title.
    pub fn title(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.title.get_or_insert_with(|| text.clone());
        self.blocks.push(Block::Heading {
            text,
            level: 0,
            alignment: Alignment::Center,
        });
        self
    }

    pub fn heading(mut self, text: impl Into<String>, level: u8) -> Self {
        self.blocks.push(Block::Heading {
            text: text.into(),
            level: level.min(9),
            alignment: Alignment::Left,
        });
        self
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph(vec![Run::plain(text)]));
        self
    }

    pub fn runs(mut self, runs: Vec<Run>) -> Self {
        self.blocks.push(Block::Paragraph(runs));
        self
    }

    /// One paragraph of `label` in bold followed by `value`, per pair.
    pub fn labeled(self, fields: &[(&str, &str)]) -> Self {
        let runs = fields
            .iter()
            .flat_map(|(label, value)| [Run::bold(*label), Run::plain(*value)])
            .collect();
        self.runs(runs)
    }

    pub fn bullets<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks
            .extend(items.into_iter().map(|item| Block::Bullet(item.into())));
        self
    }

    /// Two-column label/value table.
    pub fn table(mut self, rows: &[(&str, &str)]) -> Self {
        self.blocks.push(Block::Table(Table {
            rows: rows
                .iter()
                .map(|(label, value)| vec![label.to_string(), value.to_string()])
                .collect(),
        }));
        self
    }

    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}
