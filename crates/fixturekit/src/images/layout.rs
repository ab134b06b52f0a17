/// Fixed-margin, fixed-leading text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBlock {
    pub x: i32,
    pub top: i32,
    pub line_height: i32,
}

impl TextBlock {
    /// Pairs each non-blank line with its y position. Blank (or
    /// whitespace-only) lines are not returned but still take up a row.
    pub fn place<'a>(&self, lines: &[&'a str]) -> Vec<(i32, &'a str)> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(row, line)| (self.top + row as i32 * self.line_height, *line))
            .collect()
    }
}
