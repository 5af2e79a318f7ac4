//! Probability table for the in-game help screen.

use colored::{ColoredString, Colorize};
use fairdice_core::dice::{DieSet, MatrixCell, ProbabilityMatrix};
use prettytable::format::{Alignment, FormatBuilder, LinePosition, LineSeparator, TableFormat};
use prettytable::{Cell, Row, Table};
use std::cmp::Ordering;

const CORNER: &str = "User dice v \\ Computer dice >";
const TIE: &str = "- (tie)";
const RULE_WIDTH: usize = 60;
const LEGEND: [&str; 3] = [
    "PROBABILITY TABLE - Win chances for USER vs COMPUTER",
    "Green = User advantage (>50%), Red = Computer advantage (<50%)",
    "Each cell shows probability that ROW player beats COLUMN player",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Header,
    Plain,
    Dim,
    Advantage,
    Disadvantage,
    Even,
}

impl Tone {
    /// Shade of a probability cell relative to an even chance
    fn of(cell: MatrixCell) -> Self {
        match cell {
            MatrixCell::Tie => Tone::Dim,
            MatrixCell::Win(p) => match p.cmp_even() {
                Ordering::Greater => Tone::Advantage,
                Ordering::Less => Tone::Disadvantage,
                Ordering::Equal => Tone::Even,
            },
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        match self {
            Tone::Header => text.cyan().bold(),
            Tone::Plain => text.normal(),
            Tone::Dim => text.dimmed(),
            Tone::Advantage => text.green(),
            Tone::Disadvantage => text.red(),
            Tone::Even => text.yellow(),
        }
    }
}

fn cell(text: &str, tone: Tone) -> Cell {
    Cell::new_align(&tone.paint(text).to_string(), Alignment::CENTER)
}

fn matrix_cell(value: MatrixCell) -> Cell {
    let text = match value {
        MatrixCell::Tie => TIE.to_string(),
        MatrixCell::Win(p) => p.to_string(),
    };
    cell(&text, Tone::of(value))
}

fn table_format() -> TableFormat {
    let line = LineSeparator::new('-', '+', '+', '+');
    FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separators(
            &[LinePosition::Top, LinePosition::Intern, LinePosition::Bottom],
            line,
        )
        .separator(LinePosition::Title, LineSeparator::new('=', '+', '+', '+'))
        .padding(1, 1)
        .build()
}

/// Build the table: one row per user die, one column per computer die
fn probability_table(dice: &DieSet) -> Table {
    let matrix = ProbabilityMatrix::for_dice(dice.as_slice());

    let mut table = Table::new();
    table.set_format(table_format());
    table.set_titles(Row::new(
        std::iter::once(cell(CORNER, Tone::Header))
            .chain(dice.iter().map(|d| cell(&d.describe(), Tone::Header)))
            .collect(),
    ));
    for (die, row) in dice.iter().zip(matrix.rows()) {
        table.add_row(Row::new(
            std::iter::once(cell(&die.describe(), Tone::Plain))
                .chain(row.iter().map(|&value| matrix_cell(value)))
                .collect(),
        ));
    }
    table
}

/// Render the chance that each row die (user) beats each column die
/// (computer), framed by the legend.
pub fn render_probability_table(dice: &DieSet) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let table = probability_table(dice).to_string();
    format!(
        "\n{rule}\n{}\n{rule}\n{}\n{}\n{rule}\n{}\n{rule}\n",
        LEGEND[0],
        LEGEND[1],
        LEGEND[2],
        table.trim_end()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairdice_core::dice::{pairwise_win_probability, Die};

    fn classic() -> DieSet {
        DieSet::parse(&["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]).unwrap()
    }

    #[test]
    fn test_table_contents() {
        colored::control::set_override(false);
        let table = render_probability_table(&classic());

        assert!(table.contains("PROBABILITY TABLE - Win chances for USER vs COMPUTER"));
        assert!(table.contains(CORNER));
        assert_eq!(table.matches(TIE).count(), 3);
        // Each die wins 20 of 36 pairs against the next one in the cycle
        assert_eq!(table.matches("0.5556").count(), 3);
        assert_eq!(table.matches("0.4444").count(), 3);
    }

    #[test]
    fn test_table_rows_align() {
        colored::control::set_override(false);
        let table = render_probability_table(&classic());

        let framed: Vec<&str> = table
            .lines()
            .filter(|l| l.starts_with('|') || l.starts_with('+'))
            .collect();
        // header + 3 rows, each with a border above, plus the closing border
        assert_eq!(framed.len(), 9);
        let width = framed[0].chars().count();
        assert!(framed.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_row_starts_with_die() {
        colored::control::set_override(false);
        let table = render_probability_table(&classic());

        let row = table
            .lines()
            .find(|l| l.contains("6,8,1,1,8,6") && l.contains(TIE))
            .unwrap();
        let cells: Vec<&str> = row.trim_matches('|').split('|').map(str::trim).collect();
        assert_eq!(cells, ["6,8,1,1,8,6", "0.4444", TIE, "0.5556"]);
    }

    #[test]
    fn test_table_has_title_and_rows() {
        let table = probability_table(&classic());
        assert_eq!(table.len(), 3);
        assert_eq!(table.get_row(0).map(|r| r.len()), Some(4));
    }

    #[test]
    fn test_tone_thresholds() {
        let low = Die::new(&[1, 1, 1, 2, 2, 2]).unwrap();
        let high = Die::new(&[9; 6]).unwrap();
        let split = Die::new(&[0, 0, 0, 9, 9, 9]).unwrap();
        let five = Die::new(&[5; 6]).unwrap();

        // 9 of 36 pairs
        let p = pairwise_win_probability(&low, &low);
        assert_eq!(Tone::of(MatrixCell::Win(p)), Tone::Disadvantage);

        let p = pairwise_win_probability(&high, &low);
        assert_eq!(Tone::of(MatrixCell::Win(p)), Tone::Advantage);

        // exactly 18 of 36 pairs
        let p = pairwise_win_probability(&split, &five);
        assert_eq!(Tone::of(MatrixCell::Win(p)), Tone::Even);

        assert_eq!(Tone::of(MatrixCell::Tie), Tone::Dim);
    }
}
