//! Plain-text table rendering for repository, branch, and file listings.

/// A titled table built row by row and rendered with padded columns.
#[derive(Debug, Default)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| (*h).to_owned()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(String::len).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        let format_row = |cells: &[String]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}", width = *width))
                .collect();
            format!("  {}", padded.join("  "))
        };

        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1) + 2;
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.title));
        out.push_str(&format_row(&self.headers));
        out.push('\n');
        out.push_str(&format!("{}\n", "-".repeat(rule_width)));
        for row in &self.rows {
            out.push_str(&format_row(row));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_padded_columns() {
        let mut table = Table::new("Repositories", &["No", "Name", "Visibility"]);
        table.add_row(vec!["1".into(), "demo".into(), "Public".into()]);
        table.add_row(vec!["2".into(), "a-much-longer-name".into(), "Private".into()]);

        let rendered = table.render();
        assert!(rendered.starts_with("Repositories\n"));
        assert!(rendered.contains("a-much-longer-name"));
        // Every row aligns with the widest cell in the column.
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
    }
}
