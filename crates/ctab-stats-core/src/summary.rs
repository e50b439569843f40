//! Plain-text summary tables

use std::fmt;

use comfy_table::{presets::ASCII_BORDERS_ONLY_CONDENSED, Cell, CellAlignment, Row, Table};

/// One headed block of a summary table
#[derive(Debug, Clone, PartialEq)]
struct Block {
    headers: Vec<String>,
    stubs: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Text table with a left-aligned stub column and right-aligned data columns
///
/// Further blocks can be stacked with [`SummaryTable::extend`]; they render
/// as one table, so all blocks share column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    blocks: Vec<Block>,
}

impl SummaryTable {
    pub fn new<S: Into<String>>(headers: Vec<S>, stubs: Vec<S>, rows: Vec<Vec<String>>) -> Self {
        Self {
            blocks: vec![Block {
                headers: headers.into_iter().map(Into::into).collect(),
                stubs: stubs.into_iter().map(Into::into).collect(),
                rows,
            }],
        }
    }

    /// Append the blocks of `other` below this table
    pub fn extend(&mut self, other: SummaryTable) {
        self.blocks.extend(other.blocks);
    }

    /// Text of the data cell at `row` / `col` of block `block`
    pub fn cell(&self, block: usize, row: usize, col: usize) -> Option<&str> {
        self.blocks
            .get(block)?
            .rows
            .get(row)?
            .get(col)
            .map(String::as_str)
    }

    /// Lay the blocks out as a single `comfy_table::Table`
    ///
    /// Headers of the first block become the table header; headers of later
    /// blocks are emitted as a row above that block, unless all are blank.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(ASCII_BORDERS_ONLY_CONDENSED);

        for (i, block) in self.blocks.iter().enumerate() {
            let headed = block.headers.iter().any(|h| !h.is_empty());
            if i == 0 && headed {
                table.set_header(data_row("", &block.headers));
            } else if headed {
                table.add_row(data_row("", &block.headers));
            }
            for (j, row) in block.rows.iter().enumerate() {
                let stub = block.stubs.get(j).map_or("", String::as_str);
                table.add_row(data_row(stub, row));
            }
        }
        table
    }
}

fn data_row(stub: &str, cells: &[String]) -> Row {
    let mut row = Row::new();
    row.add_cell(Cell::new(stub).set_alignment(CellAlignment::Left));
    for cell in cells {
        row.add_cell(Cell::new(cell).set_alignment(CellAlignment::Right));
    }
    row
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_summary() -> SummaryTable {
        SummaryTable::new(
            vec!["Statistic", "P-value"],
            vec!["Symmetry", "Homogeneity"],
            vec![
                vec!["1.000".to_string(), "0.317".to_string()],
                vec!["12.500".to_string(), "0.002".to_string()],
            ],
        )
    }

    #[test]
    fn test_render_aligns_columns() {
        let text = square_summary().to_string();
        let lines: Vec<&str> = text.lines().collect();

        let header = lines.iter().position(|l| l.contains("Statistic")).unwrap();
        let sym = lines.iter().position(|l| l.contains("Symmetry")).unwrap();
        let hom = lines.iter().position(|l| l.contains("Homogeneity")).unwrap();
        assert!(header < sym && sym < hom);

        // Data columns are right-aligned, so the values end in the same place
        let end = |line: &str, value: &str| line.find(value).unwrap() + value.len();
        assert_eq!(end(lines[sym], "1.000"), end(lines[hom], "12.500"));
        assert_eq!(end(lines[sym], "0.317"), end(lines[hom], "0.002"));
        // The stub column is left-aligned
        assert_eq!(lines[sym].find("Symmetry"), lines[hom].find("Homogeneity"));
    }

    #[test]
    fn test_extend_stacks_blocks() {
        let mut table = SummaryTable::new(vec!["A"], vec!["x"], vec![vec!["1".to_string()]]);
        table.extend(SummaryTable::new(vec![""], vec!["y"], vec![vec!["22".to_string()]]));
        assert_eq!(table.cell(1, 0, 0), Some("22"));
        assert_eq!(table.cell(2, 0, 0), None);

        // Unheaded second block adds only its data row
        assert_eq!(table.to_table().row_iter().count(), 2);
        let text = table.to_string();
        assert!(text.find('x').unwrap() < text.find('y').unwrap());
    }

    #[test]
    fn test_later_headers_become_rows() {
        let mut table = square_summary();
        table.extend(SummaryTable::new(
            vec!["Estimate", "LCB"],
            vec!["Common odds"],
            vec![vec!["2.000".to_string(), "1.500".to_string()]],
        ));
        assert_eq!(table.to_table().row_iter().count(), 4);
        assert!(table.to_string().contains("Estimate"));
    }
}
