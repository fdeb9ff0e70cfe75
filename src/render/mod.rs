//! Server-side HTML rendering of the single-page UI
//!
//! The page is a pure function of (table, filter selection, panel
//! selection, notice); every request re-renders it from scratch. Sections
//! top to bottom: registration form, genre filter, edit/delete panel
//! (when the table has rows), record table, statistics table and trend
//! charts (when the filtered table has rows).

pub mod chart;

use crate::stats::{title_stats, TitleStats};
use crate::store::{Entry, Genre, RecordStore};
use crate::trend::trend_series;

/// Render inputs for one request
pub struct PageView<'a> {
    pub store: &'a RecordStore,
    /// None renders the full table ("All")
    pub genre_filter: Option<Genre>,
    /// Clamped panel selection; None when the table is empty
    pub selected_pos: Option<usize>,
    /// One-shot confirmation carried across the redirect
    pub notice: Option<&'a str>,
}

/// Escape text for HTML element and attribute context
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

pub fn render_page(view: &PageView) -> String {
    let filtered = view.store.filtered(view.genre_filter);
    let rows: Vec<&Entry> = filtered.iter().map(|(_, e)| *e).collect();

    let mut page = String::new();
    page.push_str(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Ohako</title></head><body>",
    );
    page.push_str("<h1>Ohako: karaoke attempt log</h1>");

    if let Some(notice) = view.notice {
        page.push_str(&format!("<p class=\"notice\">{}</p>", escape(notice)));
    }

    render_entry_form(&mut page);
    render_filter(&mut page, view);
    if let Some(pos) = view.selected_pos {
        render_edit_panel(&mut page, view, pos);
    }
    render_records(&mut page, &filtered);
    if !rows.is_empty() {
        render_stats(&mut page, &title_stats(&rows));
        render_trends(&mut page, &rows);
    }

    page.push_str("</body></html>");
    page
}

fn score_cell(score: Option<u32>) -> String {
    score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
}

fn render_entry_form(page: &mut String) {
    page.push_str("<section id=\"entry-form\"><h2>Log a song</h2>");
    page.push_str("<form method=\"post\" action=\"/entries\">");
    page.push_str("<p><label>Title <input type=\"text\" name=\"title\"></label></p>");
    page.push_str("<p><label>Genre <select name=\"genre\">");
    for genre in Genre::ALL {
        page.push_str(&format!("<option value=\"{g}\">{g}</option>", g = genre));
    }
    page.push_str("</select></label></p>");
    page.push_str(
        "<p><label>Score <input type=\"number\" name=\"score\" min=\"0\" max=\"100\" step=\"1\" value=\"0\"></label></p>",
    );
    page.push_str("<p><label>Memo <textarea name=\"memo\"></textarea></label></p>");
    page.push_str("<p><button type=\"submit\">Save</button></p>");
    page.push_str("</form></section>");
}

fn render_filter(page: &mut String, view: &PageView) {
    page.push_str("<section id=\"filter\"><h2>Filter by genre</h2>");
    page.push_str("<form method=\"get\" action=\"/\"><select name=\"genre\">");

    let all_selected = if view.genre_filter.is_none() { " selected" } else { "" };
    page.push_str(&format!("<option value=\"All\"{}>All</option>", all_selected));

    for genre in view.store.present_genres() {
        let selected = if view.genre_filter == Some(genre) { " selected" } else { "" };
        page.push_str(&format!(
            "<option value=\"{g}\"{sel}>{g}</option>",
            g = genre,
            sel = selected
        ));
    }

    page.push_str("</select> <button type=\"submit\">Apply</button></form></section>");
}

fn render_edit_panel(page: &mut String, view: &PageView, pos: usize) {
    let Some(entry) = view.store.get(pos) else {
        return;
    };

    page.push_str("<section id=\"edit-panel\"><h2>Edit or delete a song</h2>");

    // position selector; its range shrinks with the table on every render
    page.push_str("<form method=\"get\" action=\"/\">");
    if let Some(genre) = view.genre_filter {
        page.push_str(&format!(
            "<input type=\"hidden\" name=\"genre\" value=\"{}\">",
            genre
        ));
    }
    page.push_str("<label>Position <select name=\"pos\">");
    for p in 0..view.store.len() {
        let selected = if p == pos { " selected" } else { "" };
        page.push_str(&format!("<option value=\"{p}\"{selected}>{p}</option>"));
    }
    page.push_str("</select></label> <button type=\"submit\">Show</button></form>");

    // the selected record, shown for confirmation
    page.push_str(&format!(
        "<table id=\"selected-record\"><tr><th>Title</th><td>{}</td></tr><tr><th>Genre</th><td>{}</td></tr><tr><th>Score</th><td>{}</td></tr><tr><th>Memo</th><td>{}</td></tr><tr><th>Registered</th><td>{}</td></tr></table>",
        escape(&entry.title),
        entry.genre,
        score_cell(entry.score),
        escape(&entry.memo),
        entry.registered_date.format("%Y-%m-%d")
    ));

    page.push_str(&format!(
        "<form method=\"post\" action=\"/entries/{pos}/delete\"><button type=\"submit\">Delete this song</button></form>"
    ));

    // update form pre-seeded with the record's current values
    page.push_str(&format!("<form method=\"post\" action=\"/entries/{pos}/update\">"));
    page.push_str(&format!(
        "<p><label>New title <input type=\"text\" name=\"title\" value=\"{}\"></label></p>",
        escape(&entry.title)
    ));
    page.push_str("<p><label>New genre <select name=\"genre\">");
    for genre in Genre::ALL {
        let selected = if genre == entry.genre { " selected" } else { "" };
        page.push_str(&format!(
            "<option value=\"{g}\"{sel}>{g}</option>",
            g = genre,
            sel = selected
        ));
    }
    page.push_str("</select></label></p>");
    page.push_str(&format!(
        "<p><label>New score <input type=\"number\" name=\"score\" min=\"0\" max=\"100\" step=\"1\" value=\"{}\"></label></p>",
        entry.score.unwrap_or(0)
    ));
    page.push_str(&format!(
        "<p><label>New memo <textarea name=\"memo\">{}</textarea></label></p>",
        escape(&entry.memo)
    ));
    page.push_str("<p><button type=\"submit\">Update</button></p>");
    page.push_str("</form></section>");
}

fn render_records(page: &mut String, filtered: &[(usize, &Entry)]) {
    page.push_str("<section id=\"records\"><h2>Recorded songs</h2>");
    page.push_str(
        "<table><thead><tr><th>#</th><th>Title</th><th>Genre</th><th>Score</th><th>Memo</th><th>Registered</th></tr></thead><tbody>",
    );
    for (position, entry) in filtered {
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            position,
            escape(&entry.title),
            entry.genre,
            score_cell(entry.score),
            escape(&entry.memo),
            entry.registered_date.format("%Y-%m-%d")
        ));
    }
    page.push_str("</tbody></table>");
    page.push_str(&format!(
        "<p class=\"count\">{} recorded attempts</p>",
        filtered.len()
    ));
    page.push_str("</section>");
}

fn render_stats(page: &mut String, stats: &[TitleStats]) {
    page.push_str("<section id=\"stats\"><h2>Mean and max score per song</h2>");
    page.push_str(
        "<table><thead><tr><th>Title</th><th>Attempts</th><th>Mean</th><th>Max</th></tr></thead><tbody>",
    );
    for row in stats {
        let mean = row
            .mean_score
            .map(|m| format!("{:.1}", m))
            .unwrap_or_else(|| "-".to_string());
        let max = row
            .max_score
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.title),
            row.attempts,
            mean,
            max
        ));
    }
    page.push_str("</tbody></table></section>");
}

fn render_trends(page: &mut String, rows: &[&Entry]) {
    let series = trend_series(rows);
    if series.is_empty() {
        return;
    }

    page.push_str("<section id=\"trends\"><h2>Score trends</h2>");
    for s in &series {
        page.push_str(&format!("<h3>{}</h3>", escape(&s.title)));
        page.push_str(&chart::render_chart(s));
    }
    page.push_str("</section>");
}
