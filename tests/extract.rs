// tests/extract.rs
//
// Month extraction against synthetic calendar pages.

use roster_scrape::RosterError;
use roster_scrape::config::consts::ID_MONTH_HEADING;
use roster_scrape::core::Document;
use roster_scrape::specs::month::{cell_id, extract, month_label};

fn calendar(label: Option<&str>, cells: impl IntoIterator<Item = (u32, String)>) -> Document {
    let mut html = String::from("<!DOCTYPE html><html><head><title>My Roster</title></head><body><form>");
    if let Some(l) = label {
        html.push_str(&format!(r#"<div class="hdr"><span id="{ID_MONTH_HEADING}">{l}</span></div>"#));
    }
    html.push_str("<table class=\"cal\"><tr>");
    for (i, (pos, text)) in cells.into_iter().enumerate() {
        if i > 0 && i % 7 == 0 {
            html.push_str("</tr><tr>");
        }
        html.push_str(&format!(
            r##"<td id="{}" class="day"><a href="#">{pos}</a><div class="shift">{text}</div></td>"##,
            cell_id(pos)
        ));
    }
    html.push_str("</tr></table></form></body></html>");
    Document::new(html)
}

fn full_month_without(absent: &[u32]) -> Document {
    let cells = (1..=31u32)
        .filter(|p| !absent.contains(p))
        .map(|p| (p, format!("P{p}")));
    calendar(Some("January 2025"), cells)
}

#[test]
fn absent_cells_are_skipped_and_days_stay_dense() {
    let doc = full_month_without(&[5, 17]);
    let month = extract(&doc).unwrap();

    assert_eq!(month.days.len(), 29);
    let numbers: Vec<u32> = month.days.iter().map(|d| d.day).collect();
    assert_eq!(numbers, (1..=29).collect::<Vec<_>>());
    assert!(month.days.iter().all(|d| d.shift != "P5" && d.shift != "P17"));
    assert!(month.days.iter().all(|d| d.month == "January 2025"));
}

#[test]
fn day_numbers_strictly_increase_from_one() {
    let doc = calendar(
        Some("February 2025"),
        [(1, s("")), (2, s("E")), (3, s("")), (9, s("L")), (10, s("N")), (40, s("X"))],
    );
    let month = extract(&doc).unwrap();
    let numbers: Vec<u32> = month.days.iter().map(|d| d.day).collect();
    assert_eq!(numbers, [1, 2, 3, 4]);
    assert!(numbers.windows(2).all(|w| w[1] == w[0] + 1));
}

#[test]
fn extraction_is_idempotent() {
    let doc = full_month_without(&[3]);
    assert_eq!(extract(&doc).unwrap(), extract(&doc).unwrap());
}

#[test]
fn every_closing_paren_gets_a_space() {
    let doc = calendar(Some("March 2025"), [(1, s("E(0600)x")), (2, s("A(1)B(2)C")), (3, s("(x)"))]);
    let month = extract(&doc).unwrap();
    assert_eq!(month.days[0].shift, "E(0600) x");
    assert_eq!(month.days[1].shift, "A(1) B(2) C");
    assert_eq!(month.days[2].shift, "(x) ");
}

#[test]
fn page_without_heading_yields_no_partial_data() {
    let doc = calendar(None, (1..=28).map(|p| (p, format!("P{p}"))));
    match extract(&doc) {
        Err(RosterError::InvalidMonthPage { heading_id }) => assert_eq!(heading_id, ID_MONTH_HEADING),
        other => panic!("expected InvalidMonthPage, got {other:?}"),
    }
    assert_eq!(month_label(&doc), None);
}

#[test]
fn login_page_is_not_a_month() {
    let doc = Document::new(
        r#"<html><body><form><input name="ctl00$ContentPlaceHolder1$txtPersonnelId" value=""/></form></body></html>"#,
    );
    assert!(extract(&doc).unwrap_err().is_recoverable());
}

#[test]
fn entities_in_shift_text_are_decoded() {
    let doc = calendar(Some("April 2025"), [(1, s("Early&nbsp;(0600)")), (2, s("A &amp; B"))]);
    let month = extract(&doc).unwrap();
    assert_eq!(month.days[0].shift, "Early (0600) ");
    assert_eq!(month.days[1].shift, "A & B");
}

fn s(v: &str) -> String {
    v.to_owned()
}
