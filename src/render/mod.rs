//! Plain-text rendering of heatmaps, slices and series for the terminal.

use colored::Colorize;

use spendgrid_core::{
    format_amount, format_currency, Color, NumberLocale, Translate, LABEL_NO_DATA,
};
use spendgrid_domain::{Heatmap, HeatmapCell, IntensityLevel, PieSlice, TimeSeriesDataset};

/// Output switches shared by every renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    pub currency: String,
    pub locale: NumberLocale,
    pub decimals: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            currency: "USD".into(),
            locale: NumberLocale::default(),
            decimals: 2,
        }
    }
}

impl RenderOptions {
    fn money(&self, amount: f64) -> String {
        format_currency(&self.locale, amount, &self.currency, self.decimals)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub align: Align,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Right,
        }
    }
}

/// Simple table model; column widths follow the widest cell.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain([column.header.chars().count()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let headers: Vec<&str> = self.columns.iter().map(|col| col.header.as_str()).collect();
        let mut lines = vec![self.line(&headers, &widths)];
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            let cells: Vec<&str> = (0..self.columns.len())
                .map(|idx| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect();
            lines.push(self.line(&cells, &widths));
        }
        lines.join("\n")
    }

    fn line(&self, cells: &[&str], widths: &[usize]) -> String {
        let mut line = String::new();
        for (idx, column) in self.columns.iter().enumerate() {
            if idx > 0 {
                line.push_str("  ");
            }
            let cell = cells.get(idx).copied().unwrap_or("");
            let width = widths.get(idx).copied().unwrap_or(0);
            match column.align {
                Align::Left => line.push_str(&format!("{:<width$}", cell)),
                Align::Right => line.push_str(&format!("{:>width$}", cell)),
            }
        }
        line.trim_end().to_string()
    }
}

pub struct TerminalRenderer;

impl TerminalRenderer {
    /// Month grid with one `|`-bordered row per week.
    ///
    /// Each day shows its number and an intensity mark (` `, `.`, `:`, `*`,
    /// `#` from none to critical); colour is added on top when enabled.
    pub fn heatmap(heatmap: &Heatmap, labels: &impl Translate, options: &RenderOptions) -> String {
        let (Some(first), Some(last)) = (heatmap.first_day(), heatmap.last_day()) else {
            return labels.translate(LABEL_NO_DATA);
        };
        let first_month = first.month_key().long_label();
        let last_month = last.month_key().long_label();
        let title = if first_month == last_month {
            first_month
        } else {
            format!("{first_month} - {last_month}")
        };

        let mut lines = vec![title];
        let headers: Vec<String> = heatmap
            .weekday_headers()
            .iter()
            .map(|header| format!("{header:>2} "))
            .collect();
        lines.push(format!("|{}|", headers.join(" ")));
        for week in heatmap.weeks() {
            let mut cells: Vec<String> = week
                .iter()
                .map(|cell| Self::heatmap_cell(cell, options.color))
                .collect();
            cells.resize(7, "   ".to_string());
            lines.push(format!("|{}|", cells.join(" ")));
        }
        lines.push(format!(
            "{} {}  {} {}  {} {}  {} {}",
            intensity_mark(IntensityLevel::Low),
            IntensityLevel::Low,
            intensity_mark(IntensityLevel::Medium),
            IntensityLevel::Medium,
            intensity_mark(IntensityLevel::High),
            IntensityLevel::High,
            intensity_mark(IntensityLevel::Critical),
            IntensityLevel::Critical,
        ));
        lines.push(format!("max {}", options.money(heatmap.max_amount)));
        lines.join("\n")
    }

    /// Name, value and share of total per slice.
    pub fn slices(slices: &[PieSlice], options: &RenderOptions) -> String {
        let total: f64 = slices.iter().map(|slice| slice.value).sum();
        let mut table = Table::new(vec![
            TableColumn::left("Name"),
            TableColumn::right("Value"),
            TableColumn::right("Share"),
        ]);
        for slice in slices {
            let share = if total > 0.0 {
                slice.value / total * 100.0
            } else {
                0.0
            };
            table.add_row(vec![
                slice.name.clone(),
                options.money(slice.value),
                format!("{}%", format_amount(&options.locale, share, 1)),
            ]);
        }
        let rendered = table.render();
        if !options.color {
            return rendered;
        }
        // Colour a swatch per data row; the header and rule stay plain.
        rendered
            .lines()
            .enumerate()
            .map(|(idx, line)| match idx.checked_sub(2).and_then(|row| slices.get(row)) {
                Some(slice) => format!("{} {line}", swatch(&slice.color)),
                None => format!("  {line}"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One row per record, one column per series line.
    pub fn series(dataset: &TimeSeriesDataset, options: &RenderOptions) -> String {
        let mut columns = vec![TableColumn::left("Period")];
        columns.extend(
            dataset
                .lines
                .iter()
                .map(|line| TableColumn::right(line.name.clone())),
        );
        let mut table = Table::new(columns);
        for record in &dataset.records {
            let mut cells = vec![record.label.clone()];
            cells.extend(
                dataset
                    .lines
                    .iter()
                    .map(|line| options.money(record.value(&line.name))),
            );
            table.add_row(cells);
        }
        table.render()
    }

    fn heatmap_cell(cell: &HeatmapCell, color: bool) -> String {
        match cell {
            HeatmapCell::Pad => "   ".to_string(),
            HeatmapCell::Day { date, level, .. } => {
                let text = format!("{:>2}{}", date.day(), intensity_mark(*level));
                if color {
                    paint_level(&text, *level)
                } else {
                    text
                }
            }
        }
    }
}

/// Single-character mark per intensity level.
pub fn intensity_mark(level: IntensityLevel) -> char {
    match level {
        IntensityLevel::None => ' ',
        IntensityLevel::Low => '.',
        IntensityLevel::Medium => ':',
        IntensityLevel::High => '*',
        IntensityLevel::Critical => '#',
    }
}

fn paint_level(text: &str, level: IntensityLevel) -> String {
    match level {
        IntensityLevel::None => text.dimmed().to_string(),
        IntensityLevel::Low => text.green().to_string(),
        IntensityLevel::Medium => text.yellow().to_string(),
        IntensityLevel::High => text.truecolor(0xff, 0x95, 0x00).to_string(),
        IntensityLevel::Critical => text.red().bold().to_string(),
    }
}

fn swatch(hex: &str) -> String {
    match Color::parse(hex) {
        Ok(color) => {
            let (r, g, b) = color.rgb();
            "#".truecolor(r, g, b).to_string()
        }
        Err(_) => "#".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_to_widest_cell() {
        let mut table = Table::new(vec![TableColumn::left("A"), TableColumn::right("B")]);
        table.add_row(vec!["long name", "1"]);
        table.add_row(vec!["x", "1,000"]);
        assert_eq!(
            table.render(),
            "A              B\n---------  -----\nlong name      1\nx          1,000"
        );
    }

    #[test]
    fn marks_rise_with_level() {
        let marks: String = IntensityLevel::ALL.iter().map(|l| intensity_mark(*l)).collect();
        assert_eq!(marks, " .:*#");
    }
}
