//! reStructuredText "simple table" rendering.

/// A table with `N` columns rendered in the rST simple-table layout:
///
/// ```text
/// ====== ======= =====
/// Number EXTNAME Type
/// ====== ======= =====
/// HDU0_          IMAGE
/// ====== ======= =====
/// ```
///
/// Each column is as wide as its widest cell, header included. Cells are
/// left-aligned and separated by one space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<const N: usize> {
    header: [String; N],
    rows: Vec<[String; N]>,
}

impl<const N: usize> Table<N> {
    pub fn new(header: [&str; N]) -> Self {
        Table {
            header: header.map(String::from),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: [String; N]) {
        self.rows.push(row);
    }

    /// Number of body rows, excluding the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn all_rows(&self) -> impl Iterator<Item = &[String; N]> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }

    /// Width of each column in characters.
    pub fn column_widths(&self) -> [usize; N] {
        let mut widths = [0; N];
        for row in self.all_rows() {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// The `=` rule drawn above, below and under the header.
    pub fn rule(&self) -> String {
        self.column_widths()
            .iter()
            .map(|&w| "=".repeat(w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn format_row(row: &[String; N], widths: &[usize; N]) -> String {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        cells.join(" ").trim_end().to_string()
    }

    /// Render the table as lines: rule, header, rule, rows, rule.
    pub fn render(&self) -> Vec<String> {
        let widths = self.column_widths();
        let rule = self.rule();

        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(rule.clone());
        lines.push(Self::format_row(&self.header, &widths));
        lines.push(rule.clone());
        lines.extend(self.rows.iter().map(|row| Self::format_row(row, &widths)));
        lines.push(rule);
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: [&str; 3]) -> [String; 3] {
        cells.map(String::from)
    }

    #[test]
    fn widths_cover_header_and_body() {
        let mut table = Table::new(["A", "Name", "Type"]);
        table.push(row(["HDU0_", "", "IMAGE"]));
        table.push(row(["HDU1_", "SPECTRA", "BINTABLE"]));
        assert_eq!(table.column_widths(), [5, 7, 8]);
        assert_eq!(table.rule(), "===== ======= ========");
    }

    #[test]
    fn render_three_rule_layout() {
        let mut table = Table::new(["Number", "EXTNAME", "Type"]);
        table.push(row(["HDU0_", "", "IMAGE"]));
        table.push(row(["HDU1_", "SPECTRA", "BINTABLE"]));

        let lines = table.render();
        assert_eq!(
            lines,
            vec![
                "====== ======= ========",
                "Number EXTNAME Type",
                "====== ======= ========",
                "HDU0_          IMAGE",
                "HDU1_  SPECTRA BINTABLE",
                "====== ======= ========",
            ]
        );
    }

    #[test]
    fn empty_table_renders_header_only() {
        let table: Table<2> = Table::new(["KEY", "Value"]);
        assert!(table.is_empty());
        assert_eq!(table.render().len(), 4);
    }

    #[test]
    fn widths_count_characters_not_bytes() {
        let mut table = Table::new(["Unit"]);
        table.push([String::from("Å")]);
        assert_eq!(table.column_widths(), [4]);
    }
}
