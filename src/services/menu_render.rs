//! Presentation views over a [`WeeklyMenu`].
//!
//! Iteration order always comes from [`Day::ALL`] and [`MealSlot::ALL`],
//! never from the decoded payload.

use serde::Serialize;

use crate::models::menu::{Day, MealSlot, WeeklyMenu};

/// Header of the first table column (meal time).
pub const TIME_COLUMN_LABEL: &str = "Час";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealCell {
    pub day: Day,
    pub slot: MealSlot,
    pub label: &'static str,
    pub text: String,
}

/// Narrow-screen layout: one section per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySection {
    pub day: Day,
    pub label: &'static str,
    pub meals: Vec<MealCell>,
}

/// Wide-screen layout: meal slots as rows, days as columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub header: Vec<&'static str>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub slot: MealSlot,
    pub label: &'static str,
    pub cells: Vec<MealCell>,
}

fn cell(menu: &WeeklyMenu, day: Day, slot: MealSlot, label: &'static str) -> MealCell {
    MealCell {
        day,
        slot,
        label,
        text: menu.meal(day, slot).to_string(),
    }
}

pub fn list_view(menu: &WeeklyMenu) -> Vec<DaySection> {
    Day::ALL
        .iter()
        .map(|&day| DaySection {
            day,
            label: day.label(),
            meals: MealSlot::ALL
                .iter()
                .map(|&slot| cell(menu, day, slot, slot.label()))
                .collect(),
        })
        .collect()
}

pub fn table_view(menu: &WeeklyMenu) -> TableView {
    let mut header = vec![TIME_COLUMN_LABEL];
    header.extend(Day::ALL.iter().map(|d| d.label()));

    let rows = MealSlot::ALL
        .iter()
        .map(|&slot| TableRow {
            slot,
            label: slot.label(),
            cells: Day::ALL
                .iter()
                .map(|&day| cell(menu, day, slot, day.label()))
                .collect(),
        })
        .collect();

    TableView { header, rows }
}

const PRINT_STYLE: &str = r#"
@page { size: landscape; margin: 1cm; }
* { background-color: white !important; print-color-adjust: exact; -webkit-print-color-adjust: exact; }
body { margin: 0; padding: 0; font-family: system-ui, -apple-system, sans-serif; }
table.print-table { width: 100%; table-layout: fixed; border: 1.5px solid black; border-collapse: collapse; page-break-inside: avoid; }
table.print-table th, table.print-table td { border: 1px solid black; padding: 0.2cm; vertical-align: top; font-size: 10pt; line-height: 1.3; overflow-wrap: break-word; text-align: left; }
table.print-table thead th { font-weight: bold; font-size: 11pt; }
table.print-table th:first-child { width: 10%; }
table.print-table td:first-child { font-weight: bold; }
table.print-table th:not(:first-child), table.print-table td:not(:first-child) { width: calc(90% / 7); }
"#;

/// Standalone landscape document holding the week as a single table.
pub fn print_document(menu: &WeeklyMenu) -> String {
    let table = table_view(menu);

    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="uk">
<head><meta charset="utf-8"><title>Меню на тиждень</title><style>{PRINT_STYLE}</style></head>
<body>
<table class="print-table">
<thead><tr>"#
    );
    for label in &table.header {
        html.push_str(&format!("<th>{}</th>", escape_html(label)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        html.push_str(&format!("<tr><td>{}</td>", escape_html(row.label)));
        for cell in &row.cells {
            html.push_str(&format!("<td>{}</td>", escape_html(&cell.text)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::menu_codec::apply_edit;

    #[test]
    fn test_list_view_follows_canonical_order() {
        let view = list_view(&WeeklyMenu::default());
        let days: Vec<Day> = view.iter().map(|s| s.day).collect();
        assert_eq!(days, Day::ALL.to_vec());
        for section in &view {
            let slots: Vec<MealSlot> = section.meals.iter().map(|m| m.slot).collect();
            assert_eq!(slots, MealSlot::ALL.to_vec());
        }
        assert_eq!(view[4].label, "П'ятниця");
        assert_eq!(view[0].meals[3].label, "Перекус");
    }

    #[test]
    fn test_table_view_shape() {
        let menu = apply_edit(&WeeklyMenu::default(), Day::Sunday, MealSlot::Dinner, "Риба");
        let table = table_view(&menu);

        assert_eq!(table.header.len(), 8);
        assert_eq!(table.header[0], "Час");
        assert_eq!(table.header[1], "Понеділок");
        assert_eq!(table.rows.len(), 5);
        assert!(table.rows.iter().all(|r| r.cells.len() == 7));
        assert_eq!(table.rows[4].slot, MealSlot::Dinner);
        assert_eq!(table.rows[4].cells[6].text, "Риба");
    }

    #[test]
    fn test_print_document_escapes_cells() {
        let menu = apply_edit(
            &WeeklyMenu::default(),
            Day::Monday,
            MealSlot::Breakfast,
            "<b>Toast</b> & jam",
        );
        let html = print_document(&menu);

        assert!(html.contains("size: landscape"));
        assert!(html.contains("<td>&lt;b&gt;Toast&lt;/b&gt; &amp; jam</td>"));
        assert!(!html.contains("<b>Toast</b>"));
        assert_eq!(html.matches("<tr>").count(), 6);
    }
}
